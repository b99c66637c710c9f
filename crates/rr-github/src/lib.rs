//! # rr-github — ReelRaffle Participant Source
//!
//! Turns a GitHub issue reference into a deduplicated, ordered candidate
//! pool: every unique commenter, bots and excluded accounts filtered out.
//!
//! Failure conditions are distinct and user-facing: malformed reference,
//! rate limited, not found, no eligible participants.

pub mod client;
pub mod error;
pub mod issue;

pub use client::*;
pub use error::*;
pub use issue::*;
