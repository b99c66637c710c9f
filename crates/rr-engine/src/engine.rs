//! RoundEngine — the round progression state machine
//!
//! ```text
//! Idle ──start──> RoundPending ──begin_round──> RoundDrawing
//!                      ▲                            │ draw_one (repeat)
//!                      │                            v
//!                 RoundCompleted <──quota met / pool empty
//!                      │
//!                   advance ──> RoundPending(i+1) … or SessionCompleted
//! ```
//!
//! Pool exhaustion is never an error at this boundary: a round that runs
//! out of candidates completes short, observable through
//! [`RoundResult::is_short`](rr_core::RoundResult::is_short). Only an
//! explicit [`RoundEngine::reset`] returns to `Idle`; no transition ever
//! re-adds a removed candidate within a session.

use rr_core::{
    Candidate, CandidatePool, IndexSource, RaffleError, RaffleResult, RoundPlan, RoundResult,
    RoundSpec, SessionPhase, SessionState,
};

use crate::draw::draw_winner;

/// What one `draw_one` call produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOutcome {
    /// A winner was drawn and removed from the pool
    Winner {
        candidate: Candidate,
        round_index: usize,
        /// 0-based position of this winner within its round
        draw_index: u32,
    },
    /// The pool was already empty; the round completed short
    Exhausted,
}

/// Owns the session state and enforces its transitions
#[derive(Debug, Default)]
pub struct RoundEngine {
    state: SessionState,
}

impl RoundEngine {
    /// New engine in `Idle`
    pub fn new() -> Self {
        Self::default()
    }

    /// Current session state value
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    pub fn pool(&self) -> &CandidatePool {
        &self.state.pool
    }

    pub fn results(&self) -> &[RoundResult] {
        &self.state.results
    }

    /// Specification of the active round, if the session has started
    pub fn current_spec(&self) -> Option<&RoundSpec> {
        self.state.current_spec()
    }

    /// Begin a session: validate the plan, install the pool, move to the
    /// first round
    ///
    /// A plan with a zero-winner round (or no rounds at all) is fatal here
    /// and leaves the engine in `Idle`.
    pub fn start(&mut self, plan: RoundPlan, pool: CandidatePool) -> RaffleResult<()> {
        if self.state.phase != SessionPhase::Idle {
            return Err(RaffleError::Phase(self.state.phase));
        }
        plan.validate()?;

        self.state = SessionState {
            initial_pool_size: pool.len(),
            plan,
            current_round: 0,
            pool,
            results: Vec::new(),
            phase: SessionPhase::RoundPending,
        };
        Ok(())
    }

    /// Open the pending round for drawing
    ///
    /// With an already-empty pool the round completes immediately with zero
    /// winners — a shortfall, not an error.
    pub fn begin_round(&mut self) -> RaffleResult<&RoundSpec> {
        if self.state.phase != SessionPhase::RoundPending {
            return Err(RaffleError::Phase(self.state.phase));
        }
        let spec = self
            .state
            .plan
            .get(self.state.current_round)
            .expect("pending round within plan")
            .clone();

        self.state.results.push(RoundResult::empty(spec));
        self.state.phase = if self.state.pool.is_empty() {
            SessionPhase::RoundCompleted
        } else {
            SessionPhase::RoundDrawing
        };

        Ok(&self.state.results.last().expect("just pushed").spec)
    }

    /// Draw the round's next winner and remove it from the pool
    ///
    /// Completes the round (quota met or pool drained) as a side effect;
    /// an empty-pool draw is absorbed as [`DrawOutcome::Exhausted`] rather
    /// than surfacing [`RaffleError::EmptyPool`] to the caller.
    pub fn draw_one(&mut self, source: &mut dyn IndexSource) -> RaffleResult<DrawOutcome> {
        if self.state.phase != SessionPhase::RoundDrawing {
            return Err(RaffleError::Phase(self.state.phase));
        }

        let candidate = match draw_winner(&self.state.pool, source) {
            Ok(candidate) => candidate,
            Err(RaffleError::EmptyPool) => {
                self.state.phase = SessionPhase::RoundCompleted;
                return Ok(DrawOutcome::Exhausted);
            }
            Err(other) => return Err(other),
        };

        self.state.pool = self.state.pool.removed(&candidate.id);
        let round_index = self.state.current_round;
        let result = self
            .state
            .results
            .last_mut()
            .expect("drawing round has a working result");
        result.winners.push(candidate.clone());
        let draw_index = result.winners.len() as u32 - 1;

        let quota_met = result.winners.len() as u32 >= result.spec.winners_required;
        if quota_met || self.state.pool.is_empty() {
            self.state.phase = SessionPhase::RoundCompleted;
        }

        Ok(DrawOutcome::Winner {
            candidate,
            round_index,
            draw_index,
        })
    }

    /// Move past a completed round
    pub fn advance(&mut self) -> RaffleResult<SessionPhase> {
        if self.state.phase != SessionPhase::RoundCompleted {
            return Err(RaffleError::Phase(self.state.phase));
        }
        if self.state.current_round + 1 < self.state.plan.len() {
            self.state.current_round += 1;
            self.state.phase = SessionPhase::RoundPending;
        } else {
            self.state.phase = SessionPhase::SessionCompleted;
        }
        Ok(self.state.phase)
    }

    /// Discard the session and return to `Idle`
    ///
    /// Results are dropped; the full pool comes back only by re-supplying
    /// it to [`RoundEngine::start`].
    pub fn reset(&mut self) {
        self.state = SessionState::idle();
    }
}
