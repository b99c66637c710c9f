//! Injectable uniform random index generation
//!
//! The draw primitive and the reveal shuffle both pick indices through the
//! [`IndexSource`] trait, so production wiring uses a cryptographically
//! strong source while tests drive a seeded or scripted stand-in.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha12Rng;

/// Uniform random index generator
pub trait IndexSource {
    /// Return an index in `0..bound`. `bound` must be non-zero.
    ///
    /// Each element of the range must be selected with probability
    /// `1/bound` (up to the modulo-reduction bias, negligible for raffle
    /// pool sizes against a 32-bit draw).
    fn next_index(&mut self, bound: usize) -> usize;
}

/// Production source: CSPRNG seeded from OS entropy
///
/// Draws a random `u32` and reduces modulo `bound`, the same selection the
/// live ceremony audience expects from a non-fixable draw.
#[derive(Debug)]
pub struct CryptoIndexSource {
    rng: StdRng,
}

impl CryptoIndexSource {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl Default for CryptoIndexSource {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexSource for CryptoIndexSource {
    fn next_index(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0, "index bound must be non-zero");
        self.rng.next_u32() as usize % bound
    }
}

/// Deterministic source for replayable ceremonies and tests
#[derive(Debug, Clone)]
pub struct SeededIndexSource {
    rng: ChaCha12Rng,
}

impl SeededIndexSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha12Rng::seed_from_u64(seed),
        }
    }
}

impl IndexSource for SeededIndexSource {
    fn next_index(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0, "index bound must be non-zero");
        self.rng.next_u32() as usize % bound
    }
}

/// Fixed index sequence for exact-outcome tests
///
/// Indices are reduced modulo the requested bound; an exhausted script
/// yields index 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedIndexSource {
    indices: VecDeque<usize>,
}

impl ScriptedIndexSource {
    pub fn new(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            indices: indices.into_iter().collect(),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.indices.is_empty()
    }
}

impl IndexSource for ScriptedIndexSource {
    fn next_index(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0, "index bound must be non-zero");
        self.indices.pop_front().map(|i| i % bound).unwrap_or(0)
    }
}
