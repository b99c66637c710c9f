//! Timing profiles for the reveal sequence

use serde::{Deserialize, Serialize};

/// Named pacing profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RevealProfile {
    /// Normal ceremony pacing
    #[default]
    Normal,
    /// Faster, longer shuffle for the final round
    GrandFinale,
    /// Impatient-operator mode
    Turbo,
    /// All delays collapsed (testing)
    Instant,
    /// Scaled or hand-tuned values
    Custom,
}

/// Detailed timing configuration for one draw's reveal
///
/// Later draws in a round shuffle slightly longer than earlier ones so the
/// tension builds: `shuffle_ticks_base + draw_index * shuffle_ticks_per_draw`
/// ticks at `shuffle_interval_ms`. Deceleration runs `decelerate_ticks`
/// ticks whose intervals grow geometrically from `decelerate_initial_ms`
/// by `decelerate_growth`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealTiming {
    /// Profile type
    pub profile: RevealProfile,

    /// Interval between shuffle frames (ms)
    pub shuffle_interval_ms: f64,

    /// Shuffle frames for the first draw of a round
    pub shuffle_ticks_base: u32,

    /// Extra shuffle frames per subsequent draw
    pub shuffle_ticks_per_draw: u32,

    /// Frames in the decelerate phase
    pub decelerate_ticks: u32,

    /// First decelerate interval (ms)
    pub decelerate_initial_ms: f64,

    /// Geometric growth factor between decelerate intervals
    pub decelerate_growth: f64,

    /// Pause after the winner is revealed, before the draw finalizes (ms)
    pub settle_ms: f64,
}

impl RevealTiming {
    /// Normal ceremony pacing
    pub fn normal() -> Self {
        Self {
            profile: RevealProfile::Normal,
            shuffle_interval_ms: 100.0,
            shuffle_ticks_base: 25,
            shuffle_ticks_per_draw: 5,
            decelerate_ticks: 5,
            decelerate_initial_ms: 200.0,
            decelerate_growth: 1.5,
            settle_ms: 800.0,
        }
    }

    /// Grand finale: faster frames, longer fixed shuffle
    pub fn grand_finale() -> Self {
        Self {
            profile: RevealProfile::GrandFinale,
            shuffle_interval_ms: 80.0,
            shuffle_ticks_base: 40,
            shuffle_ticks_per_draw: 0,
            decelerate_ticks: 5,
            decelerate_initial_ms: 200.0,
            decelerate_growth: 1.5,
            settle_ms: 1000.0,
        }
    }

    /// Turbo mode for rehearsals
    pub fn turbo() -> Self {
        Self {
            profile: RevealProfile::Turbo,
            shuffle_interval_ms: 30.0,
            shuffle_ticks_base: 10,
            shuffle_ticks_per_draw: 0,
            decelerate_ticks: 3,
            decelerate_initial_ms: 60.0,
            decelerate_growth: 1.5,
            settle_ms: 200.0,
        }
    }

    /// Instant mode: every phase still runs, with zero-length waits
    pub fn instant() -> Self {
        Self {
            profile: RevealProfile::Instant,
            shuffle_interval_ms: 0.0,
            shuffle_ticks_base: 1,
            shuffle_ticks_per_draw: 0,
            decelerate_ticks: 1,
            decelerate_initial_ms: 0.0,
            decelerate_growth: 1.0,
            settle_ms: 0.0,
        }
    }

    /// Get config for profile
    pub fn from_profile(profile: RevealProfile) -> Self {
        match profile {
            RevealProfile::Normal => Self::normal(),
            RevealProfile::GrandFinale => Self::grand_finale(),
            RevealProfile::Turbo => Self::turbo(),
            RevealProfile::Instant => Self::instant(),
            RevealProfile::Custom => Self::normal(),
        }
    }

    /// Scale all intervals by a factor (< 1.0 = faster); tick counts keep
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            profile: RevealProfile::Custom,
            shuffle_interval_ms: self.shuffle_interval_ms * factor,
            shuffle_ticks_base: self.shuffle_ticks_base,
            shuffle_ticks_per_draw: self.shuffle_ticks_per_draw,
            decelerate_ticks: self.decelerate_ticks,
            decelerate_initial_ms: self.decelerate_initial_ms * factor,
            decelerate_growth: self.decelerate_growth,
            settle_ms: self.settle_ms * factor,
        }
    }

    /// Shuffle frames for the draw at `draw_index` within its round
    pub fn shuffle_ticks(&self, draw_index: u32) -> u32 {
        (self.shuffle_ticks_base + draw_index * self.shuffle_ticks_per_draw).max(1)
    }

    /// Interval before decelerate frame `tick` (0-based)
    pub fn decelerate_interval(&self, tick: u32) -> f64 {
        self.decelerate_initial_ms * self.decelerate_growth.powi(tick as i32)
    }

    /// Total reveal duration for one draw (ms)
    pub fn total_duration(&self, draw_index: u32) -> f64 {
        let shuffle = self.shuffle_ticks(draw_index) as f64 * self.shuffle_interval_ms;
        let decelerate: f64 = (0..self.decelerate_ticks.max(1))
            .map(|t| self.decelerate_interval(t))
            .sum();
        shuffle + decelerate + self.settle_ms
    }
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self::normal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_relative_speed() {
        let normal = RevealTiming::normal();
        let finale = RevealTiming::grand_finale();
        let turbo = RevealTiming::turbo();

        // Finale frames are faster but the shuffle runs longer overall
        assert!(finale.shuffle_interval_ms < normal.shuffle_interval_ms);
        assert!(finale.shuffle_ticks_base > normal.shuffle_ticks_base);

        assert!(turbo.total_duration(0) < normal.total_duration(0));
    }

    #[test]
    fn test_later_draws_shuffle_longer() {
        let timing = RevealTiming::normal();

        assert_eq!(timing.shuffle_ticks(0), 25);
        assert_eq!(timing.shuffle_ticks(4), 45);
        assert!(timing.total_duration(4) > timing.total_duration(0));
    }

    #[test]
    fn test_decelerate_intervals_grow() {
        let timing = RevealTiming::normal();

        let mut previous = 0.0;
        for tick in 0..timing.decelerate_ticks {
            let interval = timing.decelerate_interval(tick);
            assert!(interval > previous);
            previous = interval;
        }
    }

    #[test]
    fn test_scaled() {
        let half = RevealTiming::normal().scaled(0.5);

        assert_eq!(half.profile, RevealProfile::Custom);
        assert_eq!(half.shuffle_interval_ms, 50.0);
        assert_eq!(half.settle_ms, 400.0);
        // Tick counts are untouched
        assert_eq!(half.shuffle_ticks_base, 25);
    }

    #[test]
    fn test_instant_still_has_every_phase() {
        let timing = RevealTiming::instant();

        assert!(timing.shuffle_ticks(0) >= 1);
        assert!(timing.decelerate_ticks >= 1);
        assert_eq!(timing.total_duration(0), 0.0);
    }
}
