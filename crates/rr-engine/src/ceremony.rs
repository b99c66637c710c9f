//! Ceremony — pacing controller for a live draw session
//!
//! Glues the round engine, the reveal sequencer and the timeline behind
//! the three commands a presentation layer is allowed to issue: `start`,
//! `begin_round`, `reset`. Draws within a round chain automatically once
//! each reveal settles; round- and session-completion come back as events.

use serde::{Deserialize, Serialize};

use log::warn;

use rr_core::{
    CandidatePool, CryptoIndexSource, IndexSource, RaffleError, RaffleResult, RoundPlan,
    RoundResult, RoundSpec, SeededIndexSource, SessionPhase, SessionState,
};
use rr_reveal::{RevealEvent, RevealSequencer, RevealTiming, Timeline};

use crate::engine::{DrawOutcome, RoundEngine};

/// Notification to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CeremonyEvent {
    /// Session opened with a validated plan and a fresh pool
    SessionStarted { participants: usize, rounds: usize },
    /// A round is now drawing
    RoundStarted { round_index: usize, spec: RoundSpec },
    /// One draw's reveal has begun
    DrawStarted { round_index: usize, draw_index: u32 },
    /// Reveal sequencer notification for the in-flight draw
    Reveal(RevealEvent),
    /// The round met its quota or drained the pool (check
    /// `result.is_short()` for the shortfall case)
    RoundCompleted {
        round_index: usize,
        result: RoundResult,
    },
    /// Every round has completed
    SessionCompleted { results: Vec<RoundResult> },
}

/// Single-owner controller for one ceremony at a time
///
/// All scheduling runs on the internal [`Timeline`]; the caller owns the
/// pacing by advancing it, either in virtual time (tests) or by sleeping
/// until [`Ceremony::next_due_ms`] (a real-time driver).
pub struct Ceremony {
    engine: RoundEngine,
    sequencer: RevealSequencer,
    timeline: Timeline,
    draw_source: Box<dyn IndexSource>,
    display_source: Box<dyn IndexSource>,
    timing: RevealTiming,
    finale_timing: RevealTiming,
}

impl Ceremony {
    /// Production ceremony: crypto-strong draws, independent cosmetic source
    pub fn new() -> Self {
        Self::with_sources(
            Box::new(CryptoIndexSource::new()),
            Box::new(CryptoIndexSource::new()),
        )
    }

    /// Replayable ceremony: both sources seeded deterministically
    pub fn seeded(seed: u64) -> Self {
        Self::with_sources(
            Box::new(SeededIndexSource::new(seed)),
            Box::new(SeededIndexSource::new(seed.wrapping_add(1))),
        )
    }

    /// Ceremony with explicit sources; semantic draws and cosmetic shuffle
    /// are deliberately separate streams
    pub fn with_sources(
        draw_source: Box<dyn IndexSource>,
        display_source: Box<dyn IndexSource>,
    ) -> Self {
        Self {
            engine: RoundEngine::new(),
            sequencer: RevealSequencer::new(),
            timeline: Timeline::new(),
            draw_source,
            display_source,
            timing: RevealTiming::normal(),
            finale_timing: RevealTiming::grand_finale(),
        }
    }

    /// Override the pacing for non-finale rounds
    pub fn with_timing(mut self, timing: RevealTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Override the pacing for the last plan round
    pub fn with_finale_timing(mut self, timing: RevealTiming) -> Self {
        self.finale_timing = timing;
        self
    }

    pub fn state(&self) -> &SessionState {
        self.engine.state()
    }

    pub fn phase(&self) -> SessionPhase {
        self.engine.phase()
    }

    pub fn is_draw_in_flight(&self) -> bool {
        self.sequencer.is_active()
    }

    pub fn now_ms(&self) -> f64 {
        self.timeline.now_ms()
    }

    /// Due time of the next scheduled callback, if a draw is in flight
    pub fn next_due_ms(&mut self) -> Option<f64> {
        self.timeline.next_due()
    }

    /// Command: open a session
    pub fn start(
        &mut self,
        plan: RoundPlan,
        pool: CandidatePool,
    ) -> RaffleResult<Vec<CeremonyEvent>> {
        let participants = pool.len();
        let rounds = plan.len();
        self.engine.start(plan, pool)?;
        Ok(vec![CeremonyEvent::SessionStarted {
            participants,
            rounds,
        }])
    }

    /// Command: begin the pending round
    ///
    /// Rejected with [`RaffleError::DrawInFlight`] while a reveal is still
    /// running — logged, with no state change. The round's first draw is
    /// started immediately; subsequent draws chain on their own as each
    /// reveal settles.
    pub fn begin_round(&mut self) -> RaffleResult<Vec<CeremonyEvent>> {
        if self.sequencer.is_active() {
            warn!("begin_round rejected: a reveal is already in flight");
            return Err(RaffleError::DrawInFlight);
        }

        let spec = self.engine.begin_round()?.clone();
        let round_index = self.state().current_round;
        let mut events = vec![CeremonyEvent::RoundStarted { round_index, spec }];

        if self.engine.phase() == SessionPhase::RoundCompleted {
            // Empty pool: the round is already complete, zero winners.
            events.extend(self.complete_round()?);
        } else {
            events.extend(self.start_next_draw()?);
        }
        Ok(events)
    }

    /// Command: abandon the session
    ///
    /// Cancels the in-flight reveal and every pending callback so nothing
    /// stale fires into post-reset state, then returns the engine to
    /// `Idle`. The pool comes back only by re-supplying it to `start`.
    pub fn reset(&mut self) {
        self.sequencer.cancel(&mut self.timeline);
        self.timeline.clear();
        self.engine.reset();
    }

    /// Advance virtual time by `delta_ms`, processing every callback that
    /// comes due
    pub fn advance_by(&mut self, delta_ms: f64) -> Vec<CeremonyEvent> {
        self.advance_to(self.timeline.now_ms() + delta_ms.max(0.0))
    }

    /// Advance virtual time to `target_ms`, processing every callback that
    /// comes due
    pub fn advance_to(&mut self, target_ms: f64) -> Vec<CeremonyEvent> {
        let mut events = Vec::new();

        // Step timer by timer so callbacks scheduled from a firing land
        // relative to its due time, not to the advance target.
        loop {
            let Some(due) = self.timeline.next_due() else {
                break;
            };
            if due > target_ms {
                break;
            }
            for fired in self.timeline.advance_to(due) {
                let reveal_events = self.sequencer.handle_timer(
                    fired,
                    &mut self.timeline,
                    self.display_source.as_mut(),
                );
                for event in reveal_events {
                    let finalized = matches!(event, RevealEvent::DrawFinalized { .. });
                    events.push(CeremonyEvent::Reveal(event));
                    if finalized {
                        match self.after_draw_finalized() {
                            Ok(more) => events.extend(more),
                            Err(err) => warn!("post-draw bookkeeping failed: {err}"),
                        }
                    }
                }
            }
        }

        self.timeline.advance_to(target_ms);
        events
    }

    /// Advance straight to the next due callback, if any
    pub fn advance_to_next(&mut self) -> Vec<CeremonyEvent> {
        match self.timeline.next_due() {
            Some(due) => self.advance_to(due),
            None => Vec::new(),
        }
    }

    /// Run the in-flight round (and its chained draws) to completion
    pub fn run_until_idle(&mut self) -> Vec<CeremonyEvent> {
        let mut events = Vec::new();
        while self.timeline.next_due().is_some() {
            events.extend(self.advance_to_next());
        }
        events
    }

    fn start_next_draw(&mut self) -> RaffleResult<Vec<CeremonyEvent>> {
        // Cosmetic snapshot is taken before removal, so the pending winner
        // still shuffles past the audience.
        let display = self.engine.pool().candidates().to_vec();

        let outcome = self.engine.draw_one(self.draw_source.as_mut())?;
        let DrawOutcome::Winner {
            candidate,
            round_index,
            draw_index,
        } = outcome
        else {
            // Unreachable in practice: begin_round already short-circuits
            // an empty pool.
            return self.complete_round();
        };

        let timing = if round_index + 1 == self.state().plan.len() {
            self.finale_timing.clone()
        } else {
            self.timing.clone()
        };

        let mut events = vec![CeremonyEvent::DrawStarted {
            round_index,
            draw_index,
        }];
        let reveal = self.sequencer.begin(
            candidate,
            display,
            draw_index,
            timing,
            &mut self.timeline,
        )?;
        events.extend(reveal.into_iter().map(CeremonyEvent::Reveal));
        Ok(events)
    }

    fn after_draw_finalized(&mut self) -> RaffleResult<Vec<CeremonyEvent>> {
        match self.engine.phase() {
            SessionPhase::RoundDrawing => self.start_next_draw(),
            SessionPhase::RoundCompleted => self.complete_round(),
            phase => Err(RaffleError::Phase(phase)),
        }
    }

    fn complete_round(&mut self) -> RaffleResult<Vec<CeremonyEvent>> {
        let round_index = self.state().current_round;
        let result = self
            .engine
            .results()
            .last()
            .expect("completed round has a result")
            .clone();

        let mut events = vec![CeremonyEvent::RoundCompleted {
            round_index,
            result,
        }];
        if self.engine.advance()? == SessionPhase::SessionCompleted {
            events.push(CeremonyEvent::SessionCompleted {
                results: self.engine.results().to_vec(),
            });
        }
        Ok(events)
    }
}

impl Default for Ceremony {
    fn default() -> Self {
        Self::new()
    }
}
