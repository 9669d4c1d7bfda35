//! Animation and emphasis policies.
//!
//! This module groups the knobs that control **how long** a spin animates and
//! **how** the winner is shown once committed.
//!
//! ## Contents
//! - [`SpinCadence`] step count and decelerating delay (base + n × step)
//! - [`Landing`] whether the chase is stretched to end on the winner
//! - [`FlashPolicy`] blink pattern for the committed winner
//!
//! ## Quick wiring
//! ```text
//! WheelConfig { cadence: SpinCadence, flash: FlashPolicy, hold_winner: bool }
//!      └─► core::spin::SpinRun uses:
//!           - cadence.steps(winner, n) and cadence.delay(i) for the chase
//!           - flash to blink the winner after commit
//! ```
//!
//! ## Defaults
//! - `SpinCadence::default()` → rounds=40, base=50ms, step=2ms, landing=Fixed.
//! - `FlashPolicy::default()` → 5 × (500ms on, 500ms off).

mod cadence;
mod flash;

pub use cadence::{Landing, SpinCadence};
pub use flash::FlashPolicy;
