//! # spinwheel
//!
//! **Spinwheel** drives a roulette wheel on a ring of binary outputs (LEDs on
//! GPIO lines). A spin chases a single lit slot around the ring with a
//! decelerating cadence, commits a uniformly drawn winner, blinks it, and makes
//! the result available to every reader at once.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   DeviceFile      DeviceFile      status_file()     ioctl
//!   (write/read)    (write/read)         │              │
//!        │               │               │              │
//!        ▼               ▼               ▼              ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Roulette (device node)                                           │
//! │  - Bus (broadcast events)                                         │
//! │  - SubscriberSet (fans out to user subscribers)                   │
//! │  - root CancellationToken for open handles                        │
//! └──────────────────────────────┬────────────────────────────────────┘
//!                                ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  SpinCoordinator                                                  │
//! │  - Mutex<OutputRing>     at most one spin (try_lock → Busy)       │
//! │  - watch<WheelState>     Idle / Spinning(ticket) / Settled        │
//! │  - Selector              uniform winner over [0, N)               │
//! └──────┬───────────────────────────────────────────────┬────────────┘
//!        ▼                                               ▼
//!   spin task (owns lock guard)                    await_result()
//!   ├─► chase: slot i % N, sleep base + i·step     (all waiters woken
//!   ├─► commit winner, spins += 1                   with the same winner)
//!   ├─► flash winner, final pattern
//!   └─► Settled, release lock, resolve ticket
//!        │
//!        ▼
//!   OutputRing ──► OutputBank (SysfsBank / SimulatedBank / custom)
//! ```
//!
//! ## Features
//! | Area              | Description                                              | Key types / traits                         |
//! |-------------------|----------------------------------------------------------|--------------------------------------------|
//! | **Wheel**         | Build, open, status, shutdown.                           | [`Roulette`], [`RouletteBuilder`]          |
//! | **Coordination**  | Single-spin admission, waiting, peeking.                 | [`SpinCoordinator`], [`SpinState`]         |
//! | **Outputs**       | Claim/release lines from a host.                         | [`OutputBank`], [`OutputRing`]             |
//! | **Transport**     | Character-device style read/write/ioctl.                 | [`DeviceFile`]                             |
//! | **Policies**      | Chase cadence and winner emphasis.                       | [`SpinCadence`], [`FlashPolicy`]           |
//! | **Subscriber API**| Hook into runtime events.                                | [`Subscribe`]                              |
//! | **Errors**        | Typed errors per layer.                                  | [`RingError`], [`SpinError`], [`DeviceError`] |
//! | **Configuration** | Centralize wheel settings.                               | [`WheelConfig`]                            |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use spinwheel::{Roulette, SeededSelector, SimulatedBank, SpinState, WheelConfig};
//!
//! #[tokio::main(flavor = "current_thread", start_paused = true)]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cfg = WheelConfig::default();
//!     let bank = Arc::new(SimulatedBank::new(cfg.lines.clone()));
//!
//!     #[cfg(feature = "logging")]
//!     let subs: Vec<Arc<dyn spinwheel::Subscribe>> = vec![Arc::new(spinwheel::LogWriter)];
//!     #[cfg(not(feature = "logging"))]
//!     let subs: Vec<Arc<dyn spinwheel::Subscribe>> = Vec::new();
//!
//!     let wheel = Roulette::builder(cfg)
//!         .with_subscribers(subs)
//!         .with_selector(Arc::new(SeededSelector::new(42)))
//!         .build(bank.clone())?;
//!
//!     let winner = wheel.coordinator().trigger().await?;
//!     assert_eq!(wheel.status().state, SpinState::Settled);
//!     assert_eq!(wheel.coordinator().peek_result(), Some(winner));
//!     assert_eq!(bank.lit().len(), 1);
//!
//!     wheel.shutdown().await;
//!     Ok(())
//! }
//! ```
mod core;
mod device;
mod error;
mod events;
mod policies;
mod ring;
mod selector;
mod subscribers;

// ---- Public re-exports ----

pub use crate::core::{
    DEFAULT_LINES, Outcome, Roulette, RouletteBuilder, SpinCoordinator, SpinState, Status,
    UNSET_WINNER, WheelConfig, WheelState,
};
pub use device::{DeviceFile, IOCTL_GET_WINNING_LED};
pub use error::{DeviceError, LineError, RingError, SpinError};
pub use events::{Bus, Event, EventKind};
pub use policies::{FlashPolicy, Landing, SpinCadence};
pub use ring::{OutputBank, OutputRing, SYSFS_GPIO_ROOT, SimulatedBank, SlotFault, SysfsBank};
pub use selector::{SeededSelector, Selector, UniformSelector};
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
