//! Round plans and per-round results

use serde::{Deserialize, Serialize};

use crate::candidate::Candidate;
use crate::error::{RaffleError, RaffleResult};

/// One round of the ceremony
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSpec {
    /// Display name, e.g. "Round 1" or "Grand Finale"
    pub name: String,
    /// How many winners this round wants
    pub winners_required: u32,
}

impl RoundSpec {
    pub fn new(name: impl Into<String>, winners_required: u32) -> Self {
        Self {
            name: name.into(),
            winners_required,
        }
    }
}

/// Ordered list of round specifications, fixed for a session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundPlan {
    rounds: Vec<RoundSpec>,
}

impl RoundPlan {
    pub fn new(rounds: Vec<RoundSpec>) -> Self {
        Self { rounds }
    }

    /// The canonical three-round ceremony: 5, 5, then a single grand finale
    pub fn standard() -> Self {
        Self::new(vec![
            RoundSpec::new("Round 1", 5),
            RoundSpec::new("Round 2", 5),
            RoundSpec::new("Grand Finale", 1),
        ])
    }

    /// Check the plan is usable: non-empty, every round wanting at least one winner
    pub fn validate(&self) -> RaffleResult<()> {
        if self.rounds.is_empty() {
            return Err(RaffleError::InvalidPlan("plan has no rounds".into()));
        }
        for (index, round) in self.rounds.iter().enumerate() {
            if round.winners_required == 0 {
                return Err(RaffleError::InvalidPlan(format!(
                    "round {} ({:?}) requires zero winners",
                    index, round.name
                )));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RoundSpec> {
        self.rounds.get(index)
    }

    pub fn rounds(&self) -> &[RoundSpec] {
        &self.rounds
    }

    /// Sum of winners across all rounds
    pub fn total_winners_required(&self) -> u32 {
        self.rounds.iter().map(|r| r.winners_required).sum()
    }
}

/// Winners of one completed (or in-progress) round, in strict draw order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub spec: RoundSpec,
    pub winners: Vec<Candidate>,
}

impl RoundResult {
    pub fn empty(spec: RoundSpec) -> Self {
        Self {
            spec,
            winners: Vec::new(),
        }
    }

    /// True when the pool ran out before the round's quota was met
    pub fn is_short(&self) -> bool {
        (self.winners.len() as u32) < self.spec.winners_required
    }

    /// How many requested winners the pool could not provide
    pub fn shortfall(&self) -> u32 {
        self.spec
            .winners_required
            .saturating_sub(self.winners.len() as u32)
    }
}
