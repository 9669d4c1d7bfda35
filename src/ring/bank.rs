//! # Output host abstraction.
//!
//! An [`OutputBank`] is whatever owns the physical binary outputs: a GPIO chip,
//! the sysfs GPIO interface, or an in-memory simulation. The ring claims lines
//! from it once at start-up and gives them back once at shutdown.

use crate::error::LineError;

/// Host of addressable binary output lines.
///
/// # Contract
/// - `claim` fails with [`LineError::Claimed`] if another owner holds the line.
/// - `claim` configures the line as an output driven low.
/// - `release` returns the line to its safe default (low / input) and is a no-op
///   for lines that are not claimed.
/// - `set_level` only succeeds on claimed lines.
pub trait OutputBank: Send + Sync + 'static {
    /// Claims `line` on behalf of `consumer`.
    fn claim(&self, line: u32, consumer: &str) -> Result<(), LineError>;

    /// Releases `line`.
    fn release(&self, line: u32);

    /// Drives `line` high (`true`) or low (`false`).
    fn set_level(&self, line: u32, on: bool) -> Result<(), LineError>;

    /// Human-readable name (for logs).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
