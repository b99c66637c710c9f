//! GitHub comments client and eligibility filtering

use log::{debug, info};
use serde::{Deserialize, Serialize};

use rr_core::Candidate;

use crate::error::ParticipantError;
use crate::issue::IssueRef;

const USER_AGENT: &str = concat!("reelraffle/", env!("CARGO_PKG_VERSION"));
const PER_PAGE: u32 = 100;
/// Safety cap for very large threads
const MAX_PAGES: u32 = 20;

/// Wire shape of a comment author
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentUser {
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
}

/// Wire shape of an issue comment; `user` is absent for deleted accounts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueComment {
    pub id: u64,
    pub user: Option<CommentUser>,
}

/// Eligibility settings for a fetch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterSettings {
    /// Logins to leave out (e.g. the repo owner), compared
    /// case-insensitively
    pub exclude_logins: Vec<String>,
}

impl FilterSettings {
    pub fn excluding(logins: impl IntoIterator<Item = String>) -> Self {
        Self {
            exclude_logins: logins.into_iter().collect(),
        }
    }

    fn is_excluded(&self, login: &str) -> bool {
        self.exclude_logins
            .iter()
            .any(|e| e.eq_ignore_ascii_case(login))
    }
}

/// Reduce raw comments to eligible candidates
///
/// First-comment order is preserved; later comments by the same login
/// collapse into the first. Bot accounts (the `[bot]` login suffix) and
/// excluded logins never qualify.
pub fn collect_candidates(comments: &[IssueComment], filter: &FilterSettings) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = Vec::new();

    for comment in comments {
        let Some(user) = &comment.user else {
            continue;
        };
        if user.login.ends_with("[bot]") || filter.is_excluded(&user.login) {
            continue;
        }
        if candidates.iter().any(|c| c.id == user.login) {
            continue;
        }
        candidates.push(Candidate::new(
            &user.login,
            &user.login,
            &user.avatar_url,
        ));
    }

    candidates
}

/// Thin client for the issue comments endpoint
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    token: Option<String>,
}

impl GithubClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .expect("reqwest client with static config"),
            token: None,
        }
    }

    /// Authenticate requests; lifts the anonymous rate limit
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Fetch all commenters on the issue and reduce them to an eligible,
    /// deduplicated, ordered candidate list
    pub async fn fetch_participants(
        &self,
        issue: &IssueRef,
        filter: &FilterSettings,
    ) -> Result<Vec<Candidate>, ParticipantError> {
        let mut comments: Vec<IssueComment> = Vec::new();

        for page in 1..=MAX_PAGES {
            let batch = self.fetch_page(issue, page).await?;
            let batch_len = batch.len();
            comments.extend(batch);
            debug!("{issue}: page {page} carried {batch_len} comments");
            if batch_len < PER_PAGE as usize {
                break;
            }
        }

        let candidates = collect_candidates(&comments, filter);
        info!(
            "{issue}: {} comments, {} eligible participants",
            comments.len(),
            candidates.len()
        );

        if candidates.is_empty() {
            return Err(ParticipantError::NoParticipants);
        }
        Ok(candidates)
    }

    async fn fetch_page(
        &self,
        issue: &IssueRef,
        page: u32,
    ) -> Result<Vec<IssueComment>, ParticipantError> {
        let mut request = self
            .http
            .get(issue.comments_url(page, PER_PAGE))
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        match response.status().as_u16() {
            200 => Ok(response.json().await?),
            403 | 429 => Err(ParticipantError::RateLimited),
            404 => Err(ParticipantError::NotFound),
            status => Err(ParticipantError::Api(status)),
        }
    }
}

impl Default for GithubClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(id: u64, login: &str) -> IssueComment {
        IssueComment {
            id,
            user: Some(CommentUser {
                login: login.to_string(),
                avatar_url: format!("https://avatars.test/{login}"),
            }),
        }
    }

    #[test]
    fn test_dedup_keeps_first_comment_order() {
        let comments = vec![
            comment(1, "alice"),
            comment(2, "bob"),
            comment(3, "alice"),
            comment(4, "carol"),
            comment(5, "bob"),
        ];

        let candidates = collect_candidates(&comments, &FilterSettings::default());

        let ids: Vec<&str> = candidates.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["alice", "bob", "carol"]);
    }

    #[test]
    fn test_bots_are_filtered() {
        let comments = vec![
            comment(1, "alice"),
            comment(2, "dependabot[bot]"),
            comment(3, "github-actions[bot]"),
        ];

        let candidates = collect_candidates(&comments, &FilterSettings::default());

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].id, "alice");
    }

    #[test]
    fn test_exclude_list_is_case_insensitive() {
        let comments = vec![comment(1, "RepoOwner"), comment(2, "alice")];
        let filter = FilterSettings::excluding(["repoowner".to_string()]);

        let candidates = collect_candidates(&comments, &filter);

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].id, "alice");
    }

    #[test]
    fn test_deleted_users_are_skipped() {
        let comments = vec![
            IssueComment { id: 1, user: None },
            comment(2, "alice"),
        ];

        let candidates = collect_candidates(&comments, &FilterSettings::default());

        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn test_error_messages_are_operator_friendly() {
        assert!(
            ParticipantError::RateLimited
                .to_string()
                .contains("rate limit")
        );
        assert!(ParticipantError::NotFound.to_string().contains("not found"));
        assert!(
            ParticipantError::NoParticipants
                .to_string()
                .contains("eligible")
        );
        assert!(
            ParticipantError::InvalidIssueRef
                .to_string()
                .contains("issues/123")
        );
    }

    #[test]
    fn test_comment_wire_shape() {
        let json = r#"{"id": 7, "user": {"login": "alice", "avatar_url": "https://a/b"}}"#;
        let comment: IssueComment = serde_json::from_str(json).unwrap();

        assert_eq!(comment.user.unwrap().login, "alice");

        let json = r#"{"id": 8, "user": null}"#;
        let comment: IssueComment = serde_json::from_str(json).unwrap();
        assert!(comment.user.is_none());
    }
}
