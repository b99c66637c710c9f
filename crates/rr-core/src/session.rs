//! Explicit session state for a draw ceremony
//!
//! The whole ceremony is one value passed through engine operations — no
//! ambient state. The presentation layer holds the latest value and
//! re-renders on change.

use serde::{Deserialize, Serialize};

use crate::candidate::{Candidate, CandidatePool};
use crate::plan::{RoundPlan, RoundResult};

/// Where the session currently is
///
/// The active round index lives in [`SessionState::current_round`];
/// `SessionCompleted` and `Idle` are terminal for forward draw progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    #[default]
    Idle,
    RoundPending,
    RoundDrawing,
    RoundCompleted,
    SessionCompleted,
}

/// Full state of one draw ceremony
///
/// While a round is drawing, its partial [`RoundResult`] is already in
/// `results`, so the conservation invariant
/// `Σ winners + |pool| == initial_pool_size` holds at every step, not just
/// at round boundaries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub plan: RoundPlan,
    pub current_round: usize,
    pub pool: CandidatePool,
    pub results: Vec<RoundResult>,
    pub phase: SessionPhase,
    pub initial_pool_size: usize,
}

impl SessionState {
    /// Fresh idle state — no plan, no pool, no results
    pub fn idle() -> Self {
        Self::default()
    }

    /// Total winners drawn so far, across all rounds
    pub fn total_winners(&self) -> usize {
        self.results.iter().map(|r| r.winners.len()).sum()
    }

    /// All winners in draw order, rounds concatenated
    pub fn all_winners(&self) -> impl Iterator<Item = &Candidate> {
        self.results.iter().flat_map(|r| r.winners.iter())
    }

    /// Candidates still undecided
    pub fn remaining(&self) -> usize {
        self.pool.len()
    }

    /// Specification of the round at `current_round`, if any
    pub fn current_spec(&self) -> Option<&crate::plan::RoundSpec> {
        self.plan.get(self.current_round)
    }
}
