//! Runtime core: spin coordination and device lifecycle.
//!
//! The public API from this module is [`Roulette`] (lifecycle), [`SpinCoordinator`]
//! (the state machine) and the status types.
//!
//! Internal modules:
//! - [`config`]: wheel configuration;
//! - [`state`]: shared state and per-spin tickets;
//! - [`spin`]: runs one spin (chase, commit, flash, settle) and publishes events;
//! - [`coordinator`]: mutual exclusion, waiting and peeking;
//! - [`status`]: terse line and human-readable dump;
//! - [`roulette`]: device node, subscriber listener and shutdown;
//! - [`shutdown`]: cross-platform stop signal handling.

mod builder;
mod config;
mod coordinator;
mod roulette;
mod shutdown;
mod spin;
mod state;
mod status;

pub use builder::RouletteBuilder;
pub use config::{DEFAULT_LINES, WheelConfig};
pub use coordinator::SpinCoordinator;
pub use roulette::Roulette;
pub use state::{Outcome, WheelState};
pub use status::{SpinState, Status, UNSET_WINNER};
