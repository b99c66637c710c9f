//! # rr-engine — ReelRaffle Round Engine
//!
//! The ceremony core: uniform without-replacement draws, the round
//! progression state machine, and the controller that paces draws through
//! the reveal sequencer.
//!
//! ## Architecture
//!
//! ```text
//! Ceremony (controller)
//!     │
//!     ├── RoundEngine ── SessionState (plan, pool, results, phase)
//!     │       └── draw_winner() ── IndexSource (semantic draws)
//!     │
//!     └── RevealSequencer ── Timeline (timed phases)
//!             └── IndexSource (cosmetic shuffle only)
//! ```
//!
//! One draw in flight at a time; the pool has exactly one writer.

pub mod ceremony;
pub mod draw;
pub mod engine;

pub use ceremony::*;
pub use draw::*;
pub use engine::*;
