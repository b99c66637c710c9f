//! Participant source errors
//!
//! Every variant renders as a message fit for the operator's screen; the
//! draw core never sees these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParticipantError {
    #[error(
        "invalid GitHub issue reference; expected https://github.com/owner/repo/issues/123 or owner/repo#123"
    )]
    InvalidIssueRef,

    #[error("GitHub API rate limit exceeded; wait a bit or pass a token")]
    RateLimited,

    #[error("issue not found, or the repository is private")]
    NotFound,

    #[error("no eligible participants commented on this issue")]
    NoParticipants,

    #[error("GitHub API error: HTTP {0}")]
    Api(u16),

    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),
}
