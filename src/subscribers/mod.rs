//! # Event subscribers for the wheel.
//!
//! This module provides the [`Subscribe`] trait, the [`SubscriberSet`] fan-out and
//! the optional built-in [`LogWriter`].
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   SpinCoordinator ── publish(Event) ──► Bus ──► Roulette listener
//!                                                       │
//!                                                       ▼
//!                                              SubscriberSet::emit(&Event)
//!                                                 ┌─────┴─────┬─────────┐
//!                                                 ▼           ▼         ▼
//!                                             LogWriter    Custom     ...
//! ```

#[cfg(feature = "logging")]
mod log;
mod subscribe;
mod subscriber_set;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use subscribe::Subscribe;
pub use subscriber_set::SubscriberSet;
