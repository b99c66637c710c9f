//! Random draw primitive

use rr_core::{Candidate, CandidatePool, IndexSource, RaffleError, RaffleResult};

/// Pick one candidate from the pool with uniform probability
///
/// Errors with [`RaffleError::EmptyPool`] when the pool is empty; callers
/// either check the size first or treat the error as "skip the draw".
/// The candidate is cloned out, not removed — removal is the round
/// engine's bookkeeping step.
pub fn draw_winner(
    pool: &CandidatePool,
    source: &mut dyn IndexSource,
) -> RaffleResult<Candidate> {
    if pool.is_empty() {
        return Err(RaffleError::EmptyPool);
    }
    let index = source.next_index(pool.len());
    Ok(pool.candidates()[index].clone())
}
