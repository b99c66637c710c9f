//! Draw path benchmarks

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use rr_core::{Candidate, CandidatePool, RoundPlan, SeededIndexSource, SessionPhase};
use rr_engine::{RoundEngine, draw_winner};

fn pool(n: usize) -> CandidatePool {
    CandidatePool::from_candidates(
        (0..n).map(|i| Candidate::new(format!("user-{i}"), format!("User {i}"), "")),
    )
}

fn bench_single_draw(c: &mut Criterion) {
    let pool = pool(100);
    let mut source = SeededIndexSource::new(0);

    c.bench_function("draw_winner_100", |b| {
        b.iter(|| draw_winner(black_box(&pool), &mut source).unwrap())
    });
}

fn bench_full_session(c: &mut Criterion) {
    let pool = pool(100);

    c.bench_function("session_5_5_1_from_100", |b| {
        b.iter(|| {
            let mut engine = RoundEngine::new();
            let mut source = SeededIndexSource::new(0);
            engine
                .start(RoundPlan::standard(), black_box(pool.clone()))
                .unwrap();
            while engine.phase() != SessionPhase::SessionCompleted {
                engine.begin_round().unwrap();
                while engine.phase() == SessionPhase::RoundDrawing {
                    engine.draw_one(&mut source).unwrap();
                }
                engine.advance().unwrap();
            }
            engine.state().total_winners()
        })
    });
}

criterion_group!(benches, bench_single_draw, bench_full_session);
criterion_main!(benches);
