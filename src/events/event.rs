//! # Runtime events emitted by the wheel, its coordinator and subscriber workers.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Lifecycle events**: output ring claim/release and shutdown
//! - **Spin events**: one spin's flow (started, rejected, committed, settled)
//! - **Delivery events**: reader interruptions and subscriber overflow/panic
//!
//! The [`Event`] struct carries additional metadata such as timestamps, the slot
//! index, the spin number and a human-readable reason.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Use `seq` to restore the exact order when events are delivered out of order.
//!
//! ## Example
//! ```rust
//! use spinwheel::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::WinnerCommitted)
//!     .with_spin(3)
//!     .with_slot(5);
//!
//! assert_eq!(ev.kind, EventKind::WinnerCommitted);
//! assert_eq!(ev.spin, Some(3));
//! assert_eq!(ev.slot, Some(5));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `source`: subscriber name
    /// - `reason`: panic info/message
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `source`: subscriber name
    /// - `reason`: reason string (e.g., "full", "closed")
    SubscriberOverflow,

    // === Ring lifecycle ===
    /// Every output slot was claimed and switched off.
    ///
    /// Sets:
    /// - `slot`: number of slots in the ring
    RingAcquired,

    /// Claiming an output slot failed; the wheel was not constructed.
    ///
    /// Sets:
    /// - `slot`: index of the slot that could not be claimed
    /// - `reason`: host error message
    ClaimFailed,

    /// Shutdown requested (explicit call or OS signal).
    ShutdownRequested,

    /// Output slots were restored to their safe default and released.
    RingReleased,

    // === Spin flow ===
    /// A trigger was admitted and the animation started.
    ///
    /// Sets:
    /// - `spin`: number the spin will carry once committed
    SpinStarted,

    /// A trigger arrived while another spin was running and was rejected.
    SpinRejected,

    /// Winner index committed and spin counter incremented.
    ///
    /// Sets:
    /// - `spin`: spin number (1-based, never reset)
    /// - `slot`: winning slot index
    WinnerCommitted,

    /// Emphasis finished; waiting readers were released.
    ///
    /// Sets:
    /// - `spin`: spin number
    /// - `slot`: winning slot index
    /// - `elapsed_ms`: wall time of the whole spin
    SpinSettled,

    /// Writing a level to an output slot failed (the spin continues).
    ///
    /// Sets:
    /// - `slot`: slot index
    /// - `reason`: host error message
    OutputFault,

    // === Readers ===
    /// A blocked reader was cancelled before the spin settled.
    ///
    /// Sets:
    /// - `spin`: number of the spin the reader was waiting for
    WaitInterrupted,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Slot index (winner, failing slot) or slot count for `RingAcquired`.
    pub slot: Option<u32>,
    /// Spin number, if applicable.
    pub spin: Option<u64>,
    /// Elapsed time in milliseconds (compact).
    pub elapsed_ms: Option<u32>,
    /// Human-readable reason (errors, overflow details, etc.).
    pub reason: Option<Arc<str>>,
    /// Emitting component: subscriber, output host or selector name.
    pub source: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            slot: None,
            spin: None,
            elapsed_ms: None,
            reason: None,
            source: None,
        }
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches a slot index.
    #[inline]
    pub fn with_slot(mut self, slot: usize) -> Self {
        self.slot = Some(u32::try_from(slot).unwrap_or(u32::MAX));
        self
    }

    /// Attaches a spin number.
    #[inline]
    pub fn with_spin(mut self, spin: u64) -> Self {
        self.spin = Some(spin);
        self
    }

    /// Attaches an elapsed duration (stored as milliseconds).
    #[inline]
    pub fn with_elapsed(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.elapsed_ms = Some(ms);
        self
    }

    /// Attaches the emitting component name.
    #[inline]
    pub fn with_source(mut self, source: impl Into<Arc<str>>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_source(subscriber)
            .with_reason(format!("subscriber={subscriber} reason={reason}"))
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_source(subscriber)
            .with_reason(info)
    }

    #[inline]
    pub fn is_subscriber_overflow(&self) -> bool {
        matches!(self.kind, EventKind::SubscriberOverflow)
    }

    #[inline]
    pub fn is_subscriber_panic(&self) -> bool {
        matches!(self.kind, EventKind::SubscriberPanicked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_numbers_increase() {
        let a = Event::new(EventKind::SpinStarted);
        let b = Event::new(EventKind::SpinSettled);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn elapsed_is_clamped_to_u32() {
        let ev = Event::new(EventKind::SpinSettled).with_elapsed(Duration::from_secs(u64::MAX));
        assert_eq!(ev.elapsed_ms, Some(u32::MAX));
    }

    #[test]
    fn overflow_event_names_subscriber() {
        let ev = Event::subscriber_overflow("audit", "full");
        assert!(ev.is_subscriber_overflow());
        assert_eq!(ev.source.as_deref(), Some("audit"));
        assert_eq!(ev.reason.as_deref(), Some("subscriber=audit reason=full"));
    }
}
