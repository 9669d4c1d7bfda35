//! # Roulette: the device node around one spin coordinator.
//!
//! [`Roulette`] owns the event bus, the subscriber listener and the
//! [`SpinCoordinator`]. It hands out [`DeviceFile`] handles and renders the
//! status file.
//!
//! ## Architecture
//! ```text
//! RouletteBuilder::build(bank)
//!   ├─► OutputRing::acquire(bank, cfg.lines)     (fails → ClaimFailed, nothing registered)
//!   ├─► subscriber_listener(): Bus.subscribe() ─► SubscriberSet::emit(&Event)
//!   └─► SpinCoordinator::new(ring, selector, cfg, bus)
//!
//! open()        → DeviceFile { coordinator, handles.child_token() }
//! status_file() → coordinator.status().dump()
//!
//! Event flow:
//!   SpinCoordinator / spin task / Roulette ── publish(Event) ──► Bus ──► listener
//!                                                                          │
//!                                                               SubscriberSet::emit(&Event)
//!                                                                  ┌───────┴───────┐
//!                                                                  ▼               ▼
//!                                                             [queue S1] ... [queue SN]
//!
//! Shutdown path:
//!   shutdown()
//!     └─► Bus.publish(ShutdownRequested)
//!     └─► handles.cancel()          → pending reads return Interrupted
//!     └─► coordinator.close()       → waits for an in-flight spin, releases the ring once
//!                                     (publishes RingReleased)
//!     └─► stop listener, drain subscriber queues
//! ```
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use spinwheel::{Roulette, SimulatedBank, WheelConfig};
//!
//! #[tokio::main(flavor = "current_thread", start_paused = true)]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cfg = WheelConfig::default();
//!     let bank = Arc::new(SimulatedBank::new(cfg.lines.clone()));
//!     let wheel = Roulette::builder(cfg).build(bank)?;
//!
//!     let mut dev = wheel.open()?;
//!     dev.write(b"1").await?;
//!
//!     let mut buf = [0u8; 16];
//!     let n = dev.read(&mut buf).await?;
//!     assert_eq!(buf[n - 1], b'\n');
//!     assert!(wheel.status_file().ends_with("Spin count: 1\n"));
//!
//!     wheel.shutdown().await;
//!     Ok(())
//! }
//! ```

use std::sync::{Arc, Mutex};

use tokio::{sync::broadcast::error::RecvError, task::JoinHandle};
use tokio_util::sync::CancellationToken;

use super::{
    builder::RouletteBuilder, config::WheelConfig, coordinator::SpinCoordinator, shutdown,
    status::Status,
};
use crate::{
    device::DeviceFile,
    error::DeviceError,
    events::{Bus, Event, EventKind},
    subscribers::SubscriberSet,
};

/// One wheel: claimed ring, coordinator and event plumbing.
pub struct Roulette {
    cfg: WheelConfig,
    bus: Bus,
    coordinator: Arc<SpinCoordinator>,
    handles: CancellationToken,
    stop: CancellationToken,
    listener: Mutex<Option<JoinHandle<()>>>,
}

impl Roulette {
    /// Starts building a wheel from `cfg`.
    pub fn builder(cfg: WheelConfig) -> RouletteBuilder {
        RouletteBuilder::new(cfg)
    }

    pub(crate) fn new_internal(
        cfg: WheelConfig,
        bus: Bus,
        coordinator: Arc<SpinCoordinator>,
        listener: JoinHandle<()>,
        stop: CancellationToken,
    ) -> Self {
        Self {
            cfg,
            bus,
            coordinator,
            handles: CancellationToken::new(),
            stop,
            listener: Mutex::new(Some(listener)),
        }
    }

    /// Subscribes to the bus and forwards events to the subscriber set until `stop`
    /// fires, then drains the subscriber queues.
    pub(crate) fn subscriber_listener(
        bus: &Bus,
        set: SubscriberSet,
        stop: CancellationToken,
    ) -> JoinHandle<()> {
        let mut rx = bus.subscribe();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    msg = rx.recv() => match msg {
                        Ok(ev) => set.emit(&ev),
                        Err(RecvError::Lagged(_)) => continue,
                        Err(RecvError::Closed) => break,
                    },
                    _ = stop.cancelled() => break,
                }
            }
            set.shutdown().await;
        })
    }

    /// Configuration the wheel was built with.
    pub fn config(&self) -> &WheelConfig {
        &self.cfg
    }

    /// The coordinator driving this wheel.
    pub fn coordinator(&self) -> &Arc<SpinCoordinator> {
        &self.coordinator
    }

    /// Opens a new device handle.
    ///
    /// Fails with [`DeviceError::NoDevice`] after [`shutdown`](Self::shutdown).
    pub fn open(&self) -> Result<DeviceFile, DeviceError> {
        if self.handles.is_cancelled() {
            return Err(DeviceError::NoDevice);
        }
        Ok(DeviceFile::new(
            Arc::clone(&self.coordinator),
            self.handles.child_token(),
            self.cfg.read_capacity_clamped(),
        ))
    }

    /// Current status snapshot.
    pub fn status(&self) -> Status {
        self.coordinator.status()
    }

    /// Human-readable status file contents.
    pub fn status_file(&self) -> String {
        self.status().dump()
    }

    /// Interrupts pending reads, waits for an in-flight spin and releases the ring.
    ///
    /// Idempotent.
    pub async fn shutdown(&self) {
        if self.handles.is_cancelled() {
            return;
        }
        self.bus.publish(Event::new(EventKind::ShutdownRequested));
        self.handles.cancel();
        self.coordinator.close().await;

        self.stop.cancel();
        let listener = self.listener.lock().ok().and_then(|mut h| h.take());
        if let Some(h) = listener {
            let _ = h.await;
        }
    }

    /// Waits for SIGINT/SIGTERM/SIGQUIT (Ctrl-C elsewhere), then shuts down.
    pub async fn run_until_signal(&self) -> std::io::Result<()> {
        shutdown::wait_for_stop_signal().await?;
        self.shutdown().await;
        Ok(())
    }
}

impl Drop for Roulette {
    fn drop(&mut self) {
        self.handles.cancel();
        self.stop.cancel();
    }
}
