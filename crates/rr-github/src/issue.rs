//! GitHub issue references

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ParticipantError;

/// A parsed issue reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRef {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl IssueRef {
    /// Parse either the canonical issue URL
    /// (`https://github.com/owner/repo/issues/123`, query and fragment
    /// tolerated) or the `owner/repo#123` shorthand.
    pub fn parse(input: &str) -> Result<Self, ParticipantError> {
        let input = input.trim();

        if let Some(rest) = input.split("github.com/").nth(1) {
            return Self::parse_path(rest);
        }
        if let Some((path, number)) = input.split_once('#') {
            if let Some((owner, repo)) = path.split_once('/') {
                return Self::from_parts(owner, repo, number);
            }
        }
        Err(ParticipantError::InvalidIssueRef)
    }

    /// Comments API URL for one result page
    pub fn comments_url(&self, page: u32, per_page: u32) -> String {
        format!(
            "https://api.github.com/repos/{}/{}/issues/{}/comments?per_page={}&page={}",
            self.owner, self.repo, self.number, per_page, page
        )
    }

    fn parse_path(path: &str) -> Result<Self, ParticipantError> {
        let mut segments = path.split('/');
        let owner = segments.next().unwrap_or_default();
        let repo = segments.next().unwrap_or_default();
        let issues = segments.next().unwrap_or_default();
        let number = segments.next().unwrap_or_default();
        if issues != "issues" {
            return Err(ParticipantError::InvalidIssueRef);
        }
        // Tolerate trailing junk like ?tab=... or #issuecomment-...
        let number = number
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        Self::from_parts(owner, repo, number)
    }

    fn from_parts(owner: &str, repo: &str, number: &str) -> Result<Self, ParticipantError> {
        if owner.is_empty() || repo.is_empty() {
            return Err(ParticipantError::InvalidIssueRef);
        }
        let number: u64 = number
            .parse()
            .map_err(|_| ParticipantError::InvalidIssueRef)?;
        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            number,
        })
    }
}

impl fmt::Display for IssueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}
