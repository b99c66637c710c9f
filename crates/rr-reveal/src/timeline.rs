//! Logical clock with cancellable one-shot timers
//!
//! All reveal phases run as callbacks on one timeline. Tests advance
//! virtual time with [`Timeline::advance_by`]; a real-time driver sleeps
//! until [`Timeline::next_due`] and then advances to it. Wall-clock time
//! never enters the core.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::collections::HashSet;

/// Handle to a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct TimerEntry {
    due_ms: f64,
    id: u64,
}

impl PartialEq for TimerEntry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TimerEntry {}

impl Ord for TimerEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, we want the earliest timer on
        // top. Ties fire in scheduling order.
        other
            .due_ms
            .total_cmp(&self.due_ms)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for TimerEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One logical timeline, millisecond resolution
#[derive(Debug, Default)]
pub struct Timeline {
    now_ms: f64,
    next_id: u64,
    pending: BinaryHeap<TimerEntry>,
    cancelled: HashSet<u64>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current logical time
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Schedule a timer `delay_ms` from now
    pub fn schedule_in(&mut self, delay_ms: f64) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.push(TimerEntry {
            due_ms: self.now_ms + delay_ms.max(0.0),
            id,
        });
        TimerId(id)
    }

    /// Cancel a pending timer; cancelling an already-fired or unknown timer
    /// is a no-op
    pub fn cancel(&mut self, timer: TimerId) {
        self.cancelled.insert(timer.0);
    }

    /// Cancel everything still pending
    pub fn clear(&mut self) {
        self.pending.clear();
        self.cancelled.clear();
    }

    /// Number of live (not cancelled) pending timers
    pub fn pending_len(&self) -> usize {
        self.pending
            .iter()
            .filter(|e| !self.cancelled.contains(&e.id))
            .count()
    }

    /// Due time of the next live timer, if any
    pub fn next_due(&mut self) -> Option<f64> {
        self.drop_cancelled_head();
        self.pending.peek().map(|e| e.due_ms)
    }

    /// Move the clock forward by `delta_ms`, returning fired timers in
    /// due-time order
    pub fn advance_by(&mut self, delta_ms: f64) -> Vec<TimerId> {
        self.advance_to(self.now_ms + delta_ms.max(0.0))
    }

    /// Move the clock to `target_ms` (never backwards), firing every live
    /// timer due at or before it
    pub fn advance_to(&mut self, target_ms: f64) -> Vec<TimerId> {
        let target_ms = target_ms.max(self.now_ms);
        let mut fired = Vec::new();

        loop {
            self.drop_cancelled_head();
            let due = match self.pending.peek() {
                Some(entry) if entry.due_ms <= target_ms => entry.due_ms,
                _ => break,
            };
            let entry = self.pending.pop().expect("peeked entry");
            // The clock follows each firing so callbacks scheduled from a
            // fired timer land relative to its due time.
            self.now_ms = due;
            fired.push(TimerId(entry.id));
        }

        self.now_ms = target_ms;
        fired
    }

    fn drop_cancelled_head(&mut self) {
        while let Some(entry) = self.pending.peek() {
            if self.cancelled.remove(&entry.id) {
                self.pending.pop();
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timers_fire_in_due_order() {
        let mut timeline = Timeline::new();
        let late = timeline.schedule_in(500.0);
        let early = timeline.schedule_in(100.0);
        let middle = timeline.schedule_in(250.0);

        let fired = timeline.advance_by(1000.0);

        assert_eq!(fired, vec![early, middle, late]);
        assert_eq!(timeline.now_ms(), 1000.0);
    }

    #[test]
    fn test_partial_advance() {
        let mut timeline = Timeline::new();
        let first = timeline.schedule_in(100.0);
        let second = timeline.schedule_in(300.0);

        assert_eq!(timeline.advance_by(150.0), vec![first]);
        assert_eq!(timeline.pending_len(), 1);
        assert_eq!(timeline.advance_by(150.0), vec![second]);
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut timeline = Timeline::new();
        let keep = timeline.schedule_in(100.0);
        let drop = timeline.schedule_in(50.0);

        timeline.cancel(drop);
        let fired = timeline.advance_by(200.0);

        assert_eq!(fired, vec![keep]);
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut timeline = Timeline::new();
        timeline.schedule_in(10.0);
        timeline.schedule_in(20.0);

        timeline.clear();

        assert_eq!(timeline.pending_len(), 0);
        assert!(timeline.advance_by(100.0).is_empty());
    }

    #[test]
    fn test_next_due_skips_cancelled() {
        let mut timeline = Timeline::new();
        let soon = timeline.schedule_in(10.0);
        timeline.schedule_in(90.0);

        timeline.cancel(soon);

        assert_eq!(timeline.next_due(), Some(90.0));
    }

    #[test]
    fn test_zero_delay_fires_on_zero_advance() {
        let mut timeline = Timeline::new();
        let timer = timeline.schedule_in(0.0);

        assert_eq!(timeline.advance_by(0.0), vec![timer]);
    }

    #[test]
    fn test_same_due_time_fires_in_schedule_order() {
        let mut timeline = Timeline::new();
        let a = timeline.schedule_in(100.0);
        let b = timeline.schedule_in(100.0);

        assert_eq!(timeline.advance_by(100.0), vec![a, b]);
    }
}
