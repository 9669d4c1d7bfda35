//! # Wheel configuration.
//!
//! Provides [`WheelConfig`] centralized settings for one wheel.
//!
//! Config is used in two ways:
//! 1. **Lifecycle**: `Roulette::builder(config)` claims `lines` under `consumer`
//! 2. **Spins**: the coordinator reads `cadence`, `flash` and `hold_winner` per spin
//!
//! ## Sentinel values
//! - `flash.times = 0` → no emphasis flashing
//! - `read_capacity < 3` → raised to 3 (fits the unset marker line)

use crate::policies::{FlashPolicy, SpinCadence};

/// GPIO lines of the reference board, in ring order.
pub const DEFAULT_LINES: [u32; 8] = [535, 518, 529, 534, 524, 528, 532, 533];

/// Shortest read buffer that fits the unset marker line `"-1\n"`.
const MIN_READ_CAPACITY: usize = 3;

/// Configuration of a wheel.
///
/// ## Field semantics
/// - `lines`: host output lines in ring order (slot `i` is `lines[i]`)
/// - `consumer`: label used when claiming lines
/// - `cadence`: chase step count and decelerating delay
/// - `flash`: emphasis blink pattern for the winner
/// - `hold_winner`: keep the winner lit once settled
/// - `bus_capacity`: event bus ring buffer size (min 1; clamped by Bus)
/// - `read_capacity`: size of the read-path message buffer
#[derive(Clone, Debug)]
pub struct WheelConfig {
    /// Host output lines, in ring order.
    pub lines: Vec<u32>,

    /// Owner label used when claiming lines from the host.
    pub consumer: String,

    /// Animation step count and deceleration.
    pub cadence: SpinCadence,

    /// Emphasis blink pattern for the committed winner.
    pub flash: FlashPolicy,

    /// Leave the winning slot lit once the spin settles.
    ///
    /// When `false` every slot is dark between spins.
    pub hold_winner: bool,

    /// Capacity of the event bus broadcast channel ring buffer.
    pub bus_capacity: usize,

    /// Size of the buffer the read path formats the result line into.
    ///
    /// Longer lines are truncated to this many bytes.
    pub read_capacity: usize,
}

impl WheelConfig {
    /// Number of slots in the ring.
    #[inline]
    pub fn slots(&self) -> usize {
        self.lines.len()
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }

    /// Returns the read buffer size clamped to a usable minimum.
    #[inline]
    pub fn read_capacity_clamped(&self) -> usize {
        self.read_capacity.max(MIN_READ_CAPACITY)
    }

    /// Config for the given lines with every other field at its default.
    pub fn with_lines(lines: impl IntoIterator<Item = u32>) -> Self {
        Self {
            lines: lines.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl Default for WheelConfig {
    /// Default configuration:
    ///
    /// - `lines = DEFAULT_LINES` (8 slots)
    /// - `consumer = "spinwheel"`
    /// - `cadence = SpinCadence::default()` (40 steps, 50ms + 2ms/step)
    /// - `flash = FlashPolicy::default()` (5 × 500ms/500ms)
    /// - `hold_winner = true`
    /// - `bus_capacity = 1024`
    /// - `read_capacity = 16`
    fn default() -> Self {
        Self {
            lines: DEFAULT_LINES.to_vec(),
            consumer: "spinwheel".to_string(),
            cadence: SpinCadence::default(),
            flash: FlashPolicy::default(),
            hold_winner: true,
            bus_capacity: 1024,
            read_capacity: 16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_board() {
        let cfg = WheelConfig::default();
        assert_eq!(cfg.slots(), 8);
        assert_eq!(cfg.cadence.rounds, 40);
        assert_eq!(cfg.flash.times, 5);
        assert_eq!(cfg.read_capacity_clamped(), 16);
    }

    #[test]
    fn sentinels_are_clamped() {
        let cfg = WheelConfig {
            bus_capacity: 0,
            read_capacity: 0,
            ..WheelConfig::with_lines([1, 2])
        };
        assert_eq!(cfg.slots(), 2);
        assert_eq!(cfg.bus_capacity_clamped(), 1);
        assert_eq!(cfg.read_capacity_clamped(), 3);
    }
}
