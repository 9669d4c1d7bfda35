//! Output ring and the hosts it can be claimed from.
//!
//! - [`OutputBank`] host abstraction (claim / release / set level per line)
//! - [`SimulatedBank`] in-memory host with write history
//! - [`SysfsBank`] Linux `/sys/class/gpio` host
//! - [`OutputRing`] the N claimed slots the coordinator animates

mod bank;
mod output;
mod simulated;
mod sysfs;

pub use bank::OutputBank;
pub use output::{OutputRing, SlotFault};
pub use simulated::SimulatedBank;
pub use sysfs::{SYSFS_GPIO_ROOT, SysfsBank};
