//! # rr-reveal — ReelRaffle Reveal Sequencer
//!
//! Turns one already-determined winner into a timed multi-phase
//! presentation. The result is fixed before the animation starts; only the
//! pacing and the cosmetic shuffle are produced here.
//!
//! ## Phases
//!
//! ```text
//! Shuffle ──> Decelerate ──> Reveal ──> Settle ──> (DrawFinalized)
//!   fixed       growing       winner     fixed
//!   interval    intervals     shown      pause
//! ```
//!
//! Strictly ordered, non-skippable, non-reorderable; the winner threaded
//! through all four phases is a single resolved value, and the caller is
//! notified exactly once, after Settle.
//!
//! Scheduling runs on [`Timeline`], a logical millisecond clock with
//! cancellable timers, so tests advance virtual time deterministically and
//! a real-time driver sleeps until the next due timer.

pub mod phase;
pub mod sequencer;
pub mod timeline;
pub mod timing;

pub use phase::*;
pub use sequencer::*;
pub use timeline::*;
pub use timing::*;
