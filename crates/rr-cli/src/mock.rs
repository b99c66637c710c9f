//! Mock participants for rehearsals without a real issue

use rr_core::{Candidate, CandidatePool};

const MOCK_LOGINS: &[&str] = &[
    "devfest_fan",
    "code_master",
    "flutter_dev",
    "angular_ninja",
    "react_lover",
    "kotlin_knight",
    "swift_samurai",
    "python_pro",
    "rust_enthusiast",
    "go_guru",
    "typescript_titan",
    "vue_virtuoso",
    "node_ninja",
    "docker_dude",
    "kubernetes_king",
    "cloud_champion",
    "ai_adventurer",
    "ml_maven",
    "data_scientist",
    "devops_dragon",
    "backend_boss",
    "frontend_fighter",
    "fullstack_falcon",
    "mobile_master",
    "web_wizard",
];

/// Pool of `count` fake participants; names past the stock list get a
/// numbered fallback
pub fn mock_pool(count: usize) -> CandidatePool {
    let logins = MOCK_LOGINS
        .iter()
        .take(count)
        .map(|l| l.to_string())
        .chain((MOCK_LOGINS.len()..count).map(|i| format!("participant_{}", i + 1)));

    CandidatePool::from_candidates(logins.map(|login| {
        let avatar = format!("https://avatars.githubusercontent.com/{login}");
        Candidate::new(login.clone(), login, avatar)
    }))
}
