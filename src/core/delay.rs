//! # Delay Model
//!
//! How long the AI takes to notice a match. The window starts wide and
//! narrows linearly each round until it hits a floor:
//!
//! ```text
//! ceiling(round) = max(floor, max - (round - 1) * step)
//! delay          = min + U[0, 1) * ceiling
//! ```

use std::time::Duration;

use rand::{Rng, RngCore};

pub const DEFAULT_MIN_SECONDS: f64 = 0.2;
pub const DEFAULT_MAX_SECONDS: f64 = 2.0;
pub const DEFAULT_STEP_SECONDS: f64 = 0.15;
pub const DEFAULT_FLOOR_SECONDS: f64 = 0.5;

/// Computes the AI reaction window for a round.
pub trait DelayModel {
    fn compute_delay(&self, round: u32, rng: &mut dyn RngCore) -> Duration;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearDelay {
    pub min_seconds: f64,
    pub max_seconds: f64,
    pub step_seconds: f64,
    pub floor_seconds: f64,
}

impl Default for LinearDelay {
    fn default() -> Self {
        Self {
            min_seconds: DEFAULT_MIN_SECONDS,
            max_seconds: DEFAULT_MAX_SECONDS,
            step_seconds: DEFAULT_STEP_SECONDS,
            floor_seconds: DEFAULT_FLOOR_SECONDS,
        }
    }
}

impl LinearDelay {
    /// Upper bound of the random part for `round`. Round 0 counts as round 1.
    pub fn ceiling(&self, round: u32) -> f64 {
        let elapsed = round.saturating_sub(1) as f64;
        (self.max_seconds - elapsed * self.step_seconds).max(self.floor_seconds)
    }

    /// Exclusive upper bound of [`compute_delay`](DelayModel::compute_delay), in seconds.
    pub fn upper_bound(&self, round: u32) -> f64 {
        self.min_seconds + self.ceiling(round)
    }
}

impl DelayModel for LinearDelay {
    fn compute_delay(&self, round: u32, rng: &mut dyn RngCore) -> Duration {
        let unit: f64 = rng.r#gen();
        let secs = self.min_seconds + unit * self.ceiling(round);
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }
}
