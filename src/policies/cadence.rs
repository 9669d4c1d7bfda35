//! # Spin cadence: how the animation decelerates.
//!
//! [`SpinCadence`] controls how many steps the chase animation takes and how long
//! each step stays lit. It is parameterized by:
//! - [`SpinCadence::rounds`] the number of animation steps;
//! - [`SpinCadence::base`] the delay after the first step;
//! - [`SpinCadence::step`] the linear increment added per step;
//! - [`SpinCadence::landing`] whether the chase is stretched to end on the winner.
//!
//! The delay after step `n` is `base + n × step`, so the chase visibly slows down.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use spinwheel::{Landing, SpinCadence};
//!
//! let cadence = SpinCadence::default();
//!
//! assert_eq!(cadence.delay(0), Duration::from_millis(50));
//! assert_eq!(cadence.delay(39), Duration::from_millis(128));
//! assert_eq!(cadence.steps(3, 8), 40);
//!
//! let landing = SpinCadence { landing: Landing::OnWinner, ..cadence };
//! assert_eq!(landing.steps(0, 8), 41); // step 40 lights slot 0
//! ```

use std::time::Duration;

/// Where the chase stops relative to the winner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Landing {
    /// Run exactly [`SpinCadence::rounds`] steps regardless of the winner (default).
    #[default]
    Fixed,
    /// Add the fewest extra steps so that the last lit slot is the winner.
    OnWinner,
}

/// Deceleration profile of the chase animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpinCadence {
    /// Number of animation steps (before any landing extension).
    pub rounds: u32,
    /// Delay after step 0.
    pub base: Duration,
    /// Linear increment per step.
    pub step: Duration,
    /// Landing behavior.
    pub landing: Landing,
}

impl Default for SpinCadence {
    /// Reference cadence:
    /// - `rounds = 40`;
    /// - `base = 50ms`;
    /// - `step = 2ms`;
    /// - `landing = Landing::Fixed`.
    fn default() -> Self {
        Self {
            rounds: 40,
            base: Duration::from_millis(50),
            step: Duration::from_millis(2),
            landing: Landing::Fixed,
        }
    }
}

impl SpinCadence {
    /// Delay after animation step `round` (0-indexed): `base + round × step`.
    ///
    /// Saturates instead of overflowing for absurd step values.
    pub fn delay(&self, round: u32) -> Duration {
        self.step
            .checked_mul(round)
            .and_then(|extra| self.base.checked_add(extra))
            .unwrap_or(Duration::MAX)
    }

    /// Total number of animation steps for a spin over `slots` outputs landing on `winner`.
    ///
    /// Step `i` lights slot `i % slots`.
    pub fn steps(&self, winner: usize, slots: usize) -> u32 {
        match self.landing {
            Landing::Fixed => self.rounds,
            Landing::OnWinner => {
                if slots == 0 {
                    return self.rounds;
                }
                let rounds = self.rounds.max(1);
                let last = (rounds as usize - 1) % slots;
                let extra = (winner % slots + slots - last) % slots;
                rounds.saturating_add(extra as u32)
            }
        }
    }

    /// Sum of every step delay for a spin of `steps` steps.
    pub fn total(&self, steps: u32) -> Duration {
        (0..steps).fold(Duration::ZERO, |acc, n| acc.saturating_add(self.delay(n)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_grows_linearly() {
        let c = SpinCadence::default();
        for n in 1..40 {
            assert_eq!(c.delay(n) - c.delay(n - 1), Duration::from_millis(2));
        }
    }

    #[test]
    fn reference_cadence_runs_for_about_three_and_a_half_seconds() {
        let c = SpinCadence::default();
        // 40 × 50ms + 2ms × (0 + 1 + ... + 39)
        assert_eq!(c.total(40), Duration::from_millis(2000 + 2 * 780));
    }

    #[test]
    fn fixed_landing_ignores_winner() {
        let c = SpinCadence::default();
        for w in 0..8 {
            assert_eq!(c.steps(w, 8), 40);
        }
    }

    #[test]
    fn on_winner_landing_ends_on_winner() {
        let c = SpinCadence {
            landing: Landing::OnWinner,
            ..SpinCadence::default()
        };
        for slots in 1..12 {
            for w in 0..slots {
                let steps = c.steps(w, slots);
                assert!(steps >= c.rounds);
                assert!(steps < c.rounds + slots as u32);
                assert_eq!((steps as usize - 1) % slots, w, "slots={slots} w={w}");
            }
        }
    }

    #[test]
    fn on_winner_landing_with_zero_rounds_still_lights_winner() {
        let c = SpinCadence {
            rounds: 0,
            landing: Landing::OnWinner,
            ..SpinCadence::default()
        };
        assert_eq!(c.steps(0, 4), 1);
        assert_eq!(c.steps(3, 4), 4);
    }

    #[test]
    fn huge_step_saturates() {
        let c = SpinCadence {
            step: Duration::MAX,
            ..SpinCadence::default()
        };
        assert_eq!(c.delay(2), Duration::MAX);
    }
}
