//! # rr-core — ReelRaffle Core Types
//!
//! Shared vocabulary for the ReelRaffle draw ceremony: candidates and the
//! candidate pool, round plans and results, the explicit session state
//! value, the injectable randomness seam, and the error taxonomy.
//!
//! ## Architecture
//!
//! ```text
//! CandidatePool ──┐
//!                 ├── SessionState ── (driven by rr-engine)
//! RoundPlan ──────┘
//!
//! IndexSource (trait)
//!     ├── CryptoIndexSource   (production, OS-entropy CSPRNG)
//!     ├── SeededIndexSource   (replayable ceremonies, tests)
//!     └── ScriptedIndexSource (exact-outcome tests)
//! ```

pub mod candidate;
pub mod error;
pub mod plan;
pub mod rng;
pub mod session;

pub use candidate::*;
pub use error::*;
pub use plan::*;
pub use rng::*;
pub use session::*;
