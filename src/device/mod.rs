//! Client-facing transport: the character-device view of the wheel.
//!
//! [`DeviceFile`] is what `Roulette::open()` hands out; every open handle
//! tracks its own read offset.

mod file;

pub use file::{DeviceFile, IOCTL_GET_WINNING_LED};
