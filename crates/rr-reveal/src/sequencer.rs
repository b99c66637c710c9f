//! RevealSequencer — one draw, four phases, one notification
//!
//! The winner is resolved *before* the sequencer starts and is threaded
//! through every phase untouched; the shuffle frames are cosmetic draws
//! from a display snapshot and never influence the outcome.

use log::debug;

use rr_core::{Candidate, IndexSource, RaffleError, RaffleResult};

use crate::phase::{RevealEvent, RevealPhase};
use crate::timeline::{TimerId, Timeline};
use crate::timing::RevealTiming;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DrawStep {
    Shuffle { tick: u32 },
    Decelerate { tick: u32 },
    Settle,
}

#[derive(Debug)]
struct ActiveDraw {
    winner: Candidate,
    display: Vec<Candidate>,
    timing: RevealTiming,
    draw_index: u32,
    shuffle_ticks: u32,
    step: DrawStep,
    pending: TimerId,
}

/// Drives the Shuffle → Decelerate → Reveal → Settle sequence for one draw
/// at a time
#[derive(Debug, Default)]
pub struct RevealSequencer {
    active: Option<ActiveDraw>,
}

impl RevealSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a draw is currently mid-reveal
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Public phase of the in-flight draw, if any
    pub fn active_phase(&self) -> Option<RevealPhase> {
        self.active.as_ref().map(|d| match d.step {
            DrawStep::Shuffle { .. } => RevealPhase::Shuffle,
            DrawStep::Decelerate { .. } => RevealPhase::Decelerate,
            DrawStep::Settle => RevealPhase::Settle,
        })
    }

    /// Start revealing an already-determined winner
    ///
    /// `display` is the cosmetic snapshot shown during the shuffle — the
    /// remaining pool as it stood when the winner was drawn. Rejects with
    /// [`RaffleError::DrawInFlight`] while a previous draw has not settled.
    pub fn begin(
        &mut self,
        winner: Candidate,
        display: Vec<Candidate>,
        draw_index: u32,
        timing: RevealTiming,
        timeline: &mut Timeline,
    ) -> RaffleResult<Vec<RevealEvent>> {
        if self.active.is_some() {
            return Err(RaffleError::DrawInFlight);
        }

        let display = if display.is_empty() {
            vec![winner.clone()]
        } else {
            display
        };

        let shuffle_ticks = timing.shuffle_ticks(draw_index);
        let pending = timeline.schedule_in(timing.shuffle_interval_ms);
        debug!(
            "reveal begin: draw {} ({} shuffle ticks, {} in display)",
            draw_index,
            shuffle_ticks,
            display.len()
        );

        self.active = Some(ActiveDraw {
            winner,
            display,
            timing,
            draw_index,
            shuffle_ticks,
            step: DrawStep::Shuffle { tick: 0 },
            pending,
        });

        Ok(vec![RevealEvent::PhaseStarted {
            phase: RevealPhase::Shuffle,
            draw_index,
        }])
    }

    /// React to a fired timeline timer
    ///
    /// Stale or foreign timer ids are ignored. `display_source` is the
    /// cosmetic index source; it is consulted only for shuffle frames,
    /// never for the winner.
    pub fn handle_timer(
        &mut self,
        fired: TimerId,
        timeline: &mut Timeline,
        display_source: &mut dyn IndexSource,
    ) -> Vec<RevealEvent> {
        let Some(draw) = self.active.as_mut() else {
            return Vec::new();
        };
        if fired != draw.pending {
            return Vec::new();
        }

        let mut events = Vec::new();
        let draw_index = draw.draw_index;

        match draw.step {
            DrawStep::Shuffle { tick } => {
                events.push(Self::display_tick(&draw.display, display_source));
                let next = tick + 1;
                if next >= draw.shuffle_ticks {
                    draw.step = DrawStep::Decelerate { tick: 0 };
                    draw.pending = timeline.schedule_in(draw.timing.decelerate_interval(0));
                    events.push(RevealEvent::PhaseStarted {
                        phase: RevealPhase::Decelerate,
                        draw_index,
                    });
                } else {
                    draw.step = DrawStep::Shuffle { tick: next };
                    draw.pending = timeline.schedule_in(draw.timing.shuffle_interval_ms);
                }
            }
            DrawStep::Decelerate { tick } => {
                events.push(Self::display_tick(&draw.display, display_source));
                let next = tick + 1;
                if next >= draw.timing.decelerate_ticks.max(1) {
                    // Reveal is the instant the display locks onto the
                    // winner; the settle pause follows immediately.
                    events.push(RevealEvent::PhaseStarted {
                        phase: RevealPhase::Reveal,
                        draw_index,
                    });
                    events.push(RevealEvent::WinnerRevealed {
                        candidate: draw.winner.clone(),
                    });
                    events.push(RevealEvent::PhaseStarted {
                        phase: RevealPhase::Settle,
                        draw_index,
                    });
                    draw.step = DrawStep::Settle;
                    draw.pending = timeline.schedule_in(draw.timing.settle_ms);
                } else {
                    draw.step = DrawStep::Decelerate { tick: next };
                    draw.pending = timeline.schedule_in(draw.timing.decelerate_interval(next));
                }
            }
            DrawStep::Settle => {
                let finished = self.active.take().expect("active draw");
                events.push(RevealEvent::DrawFinalized {
                    winner: finished.winner,
                    draw_index: finished.draw_index,
                });
            }
        }

        events
    }

    /// Abort the in-flight draw, cancelling its pending timer
    ///
    /// No further events fire for the cancelled draw; in particular it is
    /// never finalized.
    pub fn cancel(&mut self, timeline: &mut Timeline) {
        if let Some(draw) = self.active.take() {
            debug!("reveal cancelled mid-flight: draw {}", draw.draw_index);
            timeline.cancel(draw.pending);
        }
    }

    fn display_tick(display: &[Candidate], source: &mut dyn IndexSource) -> RevealEvent {
        let index = source.next_index(display.len());
        RevealEvent::DisplayTick {
            candidate: display[index].clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rr_core::{ScriptedIndexSource, SeededIndexSource};

    fn candidates(n: usize) -> Vec<Candidate> {
        (0..n)
            .map(|i| Candidate::new(format!("user-{i}"), format!("User {i}"), ""))
            .collect()
    }

    /// Drive the timeline through every pending timer, collecting events.
    fn run_to_idle(
        sequencer: &mut RevealSequencer,
        timeline: &mut Timeline,
        source: &mut dyn IndexSource,
    ) -> Vec<RevealEvent> {
        let mut events = Vec::new();
        while let Some(due) = timeline.next_due() {
            for fired in timeline.advance_to(due) {
                events.extend(sequencer.handle_timer(fired, timeline, source));
            }
        }
        events
    }

    #[test]
    fn test_phases_run_in_contract_order() {
        let mut sequencer = RevealSequencer::new();
        let mut timeline = Timeline::new();
        let mut source = SeededIndexSource::new(7);
        let pool = candidates(6);
        let winner = pool[2].clone();

        let mut events = sequencer
            .begin(winner, pool, 0, RevealTiming::normal(), &mut timeline)
            .unwrap();
        events.extend(run_to_idle(&mut sequencer, &mut timeline, &mut source));

        let phases: Vec<RevealPhase> = events
            .iter()
            .filter_map(|e| match e {
                RevealEvent::PhaseStarted { phase, .. } => Some(*phase),
                _ => None,
            })
            .collect();

        assert_eq!(
            phases,
            vec![
                RevealPhase::Shuffle,
                RevealPhase::Decelerate,
                RevealPhase::Reveal,
                RevealPhase::Settle,
            ]
        );
        assert!(!sequencer.is_active());
    }

    #[test]
    fn test_revealed_and_finalized_winner_match() {
        let mut sequencer = RevealSequencer::new();
        let mut timeline = Timeline::new();
        let mut source = SeededIndexSource::new(99);
        let pool = candidates(9);
        let winner = pool[4].clone();

        let mut events = sequencer
            .begin(
                winner.clone(),
                pool,
                2,
                RevealTiming::grand_finale(),
                &mut timeline,
            )
            .unwrap();
        events.extend(run_to_idle(&mut sequencer, &mut timeline, &mut source));

        let revealed = events.iter().find_map(|e| match e {
            RevealEvent::WinnerRevealed { candidate } => Some(candidate.clone()),
            _ => None,
        });
        let finalized: Vec<&Candidate> = events
            .iter()
            .filter_map(|e| match e {
                RevealEvent::DrawFinalized { winner, .. } => Some(winner),
                _ => None,
            })
            .collect();

        assert_eq!(revealed.as_ref().map(|c| &c.id), Some(&winner.id));
        // Exactly one finalize, same id as the reveal
        assert_eq!(finalized.len(), 1);
        assert_eq!(finalized[0].id, winner.id);
    }

    #[test]
    fn test_tick_counts_follow_timing() {
        let mut sequencer = RevealSequencer::new();
        let mut timeline = Timeline::new();
        let mut source = SeededIndexSource::new(3);
        let timing = RevealTiming::normal();
        let pool = candidates(5);

        let mut events = sequencer
            .begin(pool[0].clone(), pool, 1, timing.clone(), &mut timeline)
            .unwrap();
        events.extend(run_to_idle(&mut sequencer, &mut timeline, &mut source));

        let ticks = events
            .iter()
            .filter(|e| matches!(e, RevealEvent::DisplayTick { .. }))
            .count() as u32;

        assert_eq!(ticks, timing.shuffle_ticks(1) + timing.decelerate_ticks);
    }

    #[test]
    fn test_begin_while_active_is_rejected() {
        let mut sequencer = RevealSequencer::new();
        let mut timeline = Timeline::new();
        let pool = candidates(4);

        sequencer
            .begin(
                pool[0].clone(),
                pool.clone(),
                0,
                RevealTiming::normal(),
                &mut timeline,
            )
            .unwrap();

        let second = sequencer.begin(
            pool[1].clone(),
            pool,
            1,
            RevealTiming::normal(),
            &mut timeline,
        );

        assert_eq!(second.unwrap_err(), RaffleError::DrawInFlight);
        assert_eq!(sequencer.active_phase(), Some(RevealPhase::Shuffle));
    }

    #[test]
    fn test_cancel_silences_all_pending_callbacks() {
        let mut sequencer = RevealSequencer::new();
        let mut timeline = Timeline::new();
        let mut source = SeededIndexSource::new(5);
        let pool = candidates(4);

        sequencer
            .begin(
                pool[0].clone(),
                pool,
                0,
                RevealTiming::normal(),
                &mut timeline,
            )
            .unwrap();

        // Let a few shuffle frames through, then tear down
        for _ in 0..3 {
            let due = timeline.next_due().unwrap();
            for fired in timeline.advance_to(due) {
                sequencer.handle_timer(fired, &mut timeline, &mut source);
            }
        }
        sequencer.cancel(&mut timeline);

        let leftover = run_to_idle(&mut sequencer, &mut timeline, &mut source);

        assert!(leftover.is_empty());
        assert!(!sequencer.is_active());
    }

    #[test]
    fn test_stale_timer_id_is_ignored() {
        let mut sequencer = RevealSequencer::new();
        let mut timeline = Timeline::new();
        let mut source = SeededIndexSource::new(1);
        let pool = candidates(4);

        let stray = timeline.schedule_in(5.0);
        sequencer
            .begin(
                pool[0].clone(),
                pool,
                0,
                RevealTiming::normal(),
                &mut timeline,
            )
            .unwrap();

        let events = sequencer.handle_timer(stray, &mut timeline, &mut source);

        assert!(events.is_empty());
        assert_eq!(sequencer.active_phase(), Some(RevealPhase::Shuffle));
    }

    #[test]
    fn test_display_ticks_use_cosmetic_source_only() {
        let mut sequencer = RevealSequencer::new();
        let mut timeline = Timeline::new();
        let pool = candidates(5);
        let winner = pool[3].clone();
        // Cosmetic source always lands on index 0; the winner must still
        // come out as resolved.
        let mut source = ScriptedIndexSource::default();

        let mut events = sequencer
            .begin(
                winner.clone(),
                pool.clone(),
                0,
                RevealTiming::turbo(),
                &mut timeline,
            )
            .unwrap();
        events.extend(run_to_idle(&mut sequencer, &mut timeline, &mut source));

        for event in &events {
            if let RevealEvent::DisplayTick { candidate } = event {
                assert_eq!(candidate.id, pool[0].id);
            }
        }
        let finalized = events.iter().find_map(|e| match e {
            RevealEvent::DrawFinalized { winner, .. } => Some(winner.id.clone()),
            _ => None,
        });
        assert_eq!(finalized.as_deref(), Some(winner.id.as_str()));
    }

    #[test]
    fn test_instant_profile_runs_whole_sequence() {
        let mut sequencer = RevealSequencer::new();
        let mut timeline = Timeline::new();
        let mut source = SeededIndexSource::new(0);
        let pool = candidates(3);

        let mut events = sequencer
            .begin(
                pool[1].clone(),
                pool,
                0,
                RevealTiming::instant(),
                &mut timeline,
            )
            .unwrap();
        events.extend(run_to_idle(&mut sequencer, &mut timeline, &mut source));

        assert!(
            events
                .iter()
                .any(|e| matches!(e, RevealEvent::DrawFinalized { .. }))
        );
        assert_eq!(timeline.now_ms(), 0.0);
    }
}
