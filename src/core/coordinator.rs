//! # Spin coordinator: serializes spins and publishes their results.
//!
//! [`SpinCoordinator`] owns the [`OutputRing`] behind an async mutex and the shared
//! [`WheelState`] behind a `watch` channel.
//!
//! ## State machine
//! ```text
//!            trigger() (lock acquired)
//!   Idle ─────────────────────────────► Spinning ──(spin task settles)──► Settled
//!                                          ▲                                  │
//!                                          └────────── trigger() ─────────────┘
//!
//!   trigger() while Spinning → Busy (no state change)
//!   trigger() after close()  → Closed
//! ```
//!
//! ## Rules
//! - At most one spin runs at a time; a concurrent trigger fails fast with
//!   [`SpinError::Busy`] instead of queueing.
//! - The spin body runs in its own task holding the lock guard; dropping the
//!   `trigger()` future does not abandon a half-finished spin.
//! - Every waiter registered during spin `k` is woken with spin `k`'s outcome.
//! - Cancelling a waiter never touches the shared state or the running spin.

use std::sync::Arc;

use tokio::sync::{Mutex, watch};
use tokio_util::sync::CancellationToken;

use super::config::WheelConfig;
use super::spin::SpinRun;
use super::state::{Outcome, Phase, SpinTicket, WheelState};
use super::status::Status;
use crate::error::SpinError;
use crate::events::{Bus, Event, EventKind};
use crate::policies::{FlashPolicy, SpinCadence};
use crate::ring::OutputRing;
use crate::selector::Selector;

/// Serializes spins over one ring and exposes their results.
pub struct SpinCoordinator {
    ring: Arc<Mutex<OutputRing>>,
    state: Arc<watch::Sender<WheelState>>,
    selector: Arc<dyn Selector>,
    bus: Bus,
    cadence: SpinCadence,
    flash: FlashPolicy,
    hold_winner: bool,
    slots: usize,
}

impl SpinCoordinator {
    /// Wraps an acquired ring. Spin parameters are copied from `cfg`.
    pub fn new(ring: OutputRing, selector: Arc<dyn Selector>, cfg: &WheelConfig, bus: Bus) -> Self {
        let (state, _) = watch::channel(WheelState::default());
        Self {
            slots: ring.len(),
            ring: Arc::new(Mutex::new(ring)),
            state: Arc::new(state),
            selector,
            bus,
            cadence: cfg.cadence,
            flash: cfg.flash,
            hold_winner: cfg.hold_winner,
        }
    }

    /// Number of slots in the ring.
    pub fn slots(&self) -> usize {
        self.slots
    }

    /// Runs one spin to completion and returns the committed winner.
    ///
    /// ### Errors
    /// - [`SpinError::Busy`] another spin holds the lock (returned immediately)
    /// - [`SpinError::Closed`] the ring has been released
    /// - [`SpinError::Interrupted`] the spin task was torn down by the runtime
    pub async fn trigger(&self) -> Result<usize, SpinError> {
        let Ok(ring) = Arc::clone(&self.ring).try_lock_owned() else {
            self.reject("spin in progress");
            return Err(SpinError::Busy);
        };
        if ring.is_released() {
            self.reject("ring released");
            return Err(SpinError::Closed);
        }

        let spin = self.state.borrow().spins + 1;
        let (done, ticket) = watch::channel(None);
        self.state.send_modify(|s| {
            s.phase = Phase::Spinning(SpinTicket { spin, done: ticket });
        });

        let winner = self.selector.next(self.slots);
        self.bus.publish(
            Event::new(EventKind::SpinStarted)
                .with_spin(spin)
                .with_source(self.selector.name()),
        );

        let run = SpinRun {
            ring,
            state: Arc::clone(&self.state),
            done,
            bus: self.bus.clone(),
            cadence: self.cadence,
            flash: self.flash,
            hold_winner: self.hold_winner,
            winner,
            spin,
        };
        match tokio::spawn(run.run()).await {
            Ok(_) => Ok(winner),
            Err(_) => {
                self.abandon(spin);
                Err(SpinError::Interrupted)
            }
        }
    }

    /// Waits for the spin in progress (if any) and returns its outcome.
    ///
    /// Returns immediately with the last committed outcome when no spin is running.
    ///
    /// ### Errors
    /// - [`SpinError::Interrupted`] `cancel` fired first, or the spin was torn down
    pub async fn await_outcome(&self, cancel: &CancellationToken) -> Result<Outcome, SpinError> {
        let SpinTicket { spin, mut done } = {
            let state = self.state.borrow();
            match state.ticket() {
                Some(ticket) => ticket,
                None => return Ok(state.outcome()),
            }
        };

        let settled = async { done.wait_for(Option::is_some).await.map(|o| *o) };
        tokio::select! {
            res = settled => match res {
                Ok(Some(outcome)) => Ok(outcome),
                _ => Err(SpinError::Interrupted),
            },
            _ = cancel.cancelled() => {
                self.bus.publish(Event::new(EventKind::WaitInterrupted).with_spin(spin));
                Err(SpinError::Interrupted)
            }
        }
    }

    /// Like [`await_outcome`](Self::await_outcome) but returns only the winner.
    pub async fn await_result(&self, cancel: &CancellationToken) -> Result<Option<usize>, SpinError> {
        self.await_outcome(cancel).await.map(|o| o.winner)
    }

    /// Last committed winner, without waiting.
    ///
    /// During a spin this is the previous spin's winner until the new one commits.
    pub fn peek_result(&self) -> Option<usize> {
        self.state.borrow().winner()
    }

    /// Current status snapshot.
    pub fn status(&self) -> Status {
        self.state.borrow().status()
    }

    /// Watches state transitions.
    pub fn subscribe(&self) -> watch::Receiver<WheelState> {
        self.state.subscribe()
    }

    /// Waits for any running spin, then releases the ring.
    ///
    /// Returns `false` if the ring was already released.
    pub async fn close(&self) -> bool {
        let mut ring = self.ring.lock().await;
        if ring.is_released() {
            return false;
        }
        ring.release();
        self.bus.publish(Event::new(EventKind::RingReleased));
        true
    }

    fn reject(&self, reason: &'static str) {
        self.bus
            .publish(Event::new(EventKind::SpinRejected).with_reason(reason));
    }

    fn abandon(&self, spin: u64) {
        self.state.send_if_modified(|s| {
            if s.spin_in_progress() != Some(spin) {
                return false;
            }
            s.phase = if s.winner.is_some() {
                Phase::Settled
            } else {
                Phase::Idle
            };
            true
        });
    }
}
