//! Error types for ReelRaffle

use thiserror::Error;

use crate::session::SessionPhase;

/// Core error type
///
/// `EmptyPool` is absorbed by the round engine as "round ends early" and
/// never reaches the presentation boundary; `InvalidPlan` is fatal at
/// session start; `DrawInFlight` rejects a draw request while a reveal is
/// still running.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RaffleError {
    #[error("draw attempted on an empty candidate pool")]
    EmptyPool,

    #[error("invalid round plan: {0}")]
    InvalidPlan(String),

    #[error("a reveal is already in flight; wait for it to settle")]
    DrawInFlight,

    #[error("operation not permitted in phase {0:?}")]
    Phase(SessionPhase),
}

/// Result type alias
pub type RaffleResult<T> = Result<T, RaffleError>;
