//! Candidates and the working candidate pool

use serde::{Deserialize, Serialize};

/// A raffle participant
///
/// Identity is `id`; two candidates are the same participant iff their ids
/// match. For GitHub-sourced pools the id is the login.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    /// Unique identifier
    pub id: String,
    /// Name shown during the reveal
    pub display_name: String,
    /// Avatar image reference
    pub avatar_url: String,
}

impl Candidate {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        avatar_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            avatar_url: avatar_url.into(),
        }
    }
}

/// Ordered set of undecided participants, unique by id
///
/// The pool is treated as a value: winner extraction goes through
/// [`CandidatePool::removed`], which returns a new pool, so round-result
/// bookkeeping stays auditable. The pool is never reordered during a
/// session; the reveal shuffle is display-only and does not touch it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidatePool {
    candidates: Vec<Candidate>,
}

impl CandidatePool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pool from candidates, keeping the first occurrence of each id
    pub fn from_candidates(candidates: impl IntoIterator<Item = Candidate>) -> Self {
        let mut pool = Self::new();
        for candidate in candidates {
            if !pool.contains(&candidate.id) {
                pool.candidates.push(candidate);
            }
        }
        pool
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.candidates.iter().any(|c| c.id == id)
    }

    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.candidates.get(index)
    }

    /// All remaining candidates, in original order
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter()
    }

    /// Pool with the given candidate removed
    ///
    /// Idempotent: an absent id returns the pool unchanged, which is not an
    /// error condition.
    pub fn removed(&self, id: &str) -> Self {
        Self {
            candidates: self
                .candidates
                .iter()
                .filter(|c| c.id != id)
                .cloned()
                .collect(),
        }
    }
}

impl FromIterator<Candidate> for CandidatePool {
    fn from_iter<T: IntoIterator<Item = Candidate>>(iter: T) -> Self {
        Self::from_candidates(iter)
    }
}
