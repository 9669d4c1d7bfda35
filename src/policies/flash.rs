//! # Emphasis flashing of the winning slot.
//!
//! After the winner is committed the coordinator blinks the winning slot
//! [`FlashPolicy::times`] times so an observer can confirm the result.

use std::time::Duration;

/// Blink pattern used to emphasize the winner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlashPolicy {
    /// Number of on/off cycles (`0` disables emphasis).
    pub times: u32,
    /// Time the slot stays lit per cycle.
    pub on: Duration,
    /// Time the slot stays dark per cycle.
    pub off: Duration,
}

impl Default for FlashPolicy {
    /// Returns 5 cycles of 500ms on / 500ms off.
    fn default() -> Self {
        Self {
            times: 5,
            on: Duration::from_millis(500),
            off: Duration::from_millis(500),
        }
    }
}

impl FlashPolicy {
    /// Total time spent flashing.
    pub fn total(&self) -> Duration {
        self.on
            .saturating_add(self.off)
            .checked_mul(self.times)
            .unwrap_or(Duration::MAX)
    }
}
