//! Reveal phases and the events they emit
//!
//! A phase is the semantic meaning of a moment in the reveal, not an
//! animation. The presentation layer reacts to [`RevealEvent`]s; it never
//! drives the sequence.

use serde::{Deserialize, Serialize};

use rr_core::Candidate;

/// The four phases of one draw's reveal, in contract order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealPhase {
    /// Rapid cosmetic shuffle at a fixed interval
    Shuffle,
    /// Same cosmetic shuffle, visually braking on growing intervals
    Decelerate,
    /// Display switches to the resolved winner
    Reveal,
    /// Fixed pause before the next draw may start
    Settle,
}

impl RevealPhase {
    /// Phase that contractually follows this one, if any
    pub fn next(&self) -> Option<RevealPhase> {
        match self {
            Self::Shuffle => Some(Self::Decelerate),
            Self::Decelerate => Some(Self::Reveal),
            Self::Reveal => Some(Self::Settle),
            Self::Settle => None,
        }
    }
}

/// Notification emitted by the sequencer
///
/// During `Shuffle` and `Decelerate` the candidate in a `DisplayTick` is
/// chosen independently at random and carries no semantic weight. Only
/// `WinnerRevealed` and `DrawFinalized` name the actual winner, and they
/// name the same one by contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RevealEvent {
    /// A phase began for the given draw
    PhaseStarted {
        phase: RevealPhase,
        draw_index: u32,
    },
    /// Cosmetic shuffle frame — display this candidate
    DisplayTick { candidate: Candidate },
    /// The resolved winner is now on display
    WinnerRevealed { candidate: Candidate },
    /// Settle pause elapsed; the draw is final. Emitted exactly once.
    DrawFinalized { winner: Candidate, draw_index: u32 },
}
