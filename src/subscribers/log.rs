//! # LogWriter: simple event printer
//!
//! A minimal subscriber that prints incoming [`Event`]s to stdout.
//! Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! [ring-acquired] host=Some("sysfs") slots=Some(8)
//! [spin-started] spin=Some(1)
//! [spin-rejected] reason=Some("spin in progress")
//! [winner-committed] spin=Some(1) slot=Some(5)
//! [spin-settled] spin=Some(1) slot=Some(5) elapsed_ms=Some(8588)
//! [shutdown-requested]
//! [ring-released]
//! ```

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;
use async_trait::async_trait;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::RingAcquired => {
                println!("[ring-acquired] host={:?} slots={:?}", e.source, e.slot);
            }
            EventKind::ClaimFailed => {
                println!("[claim-failed] slot={:?} err={:?}", e.slot, e.reason);
            }
            EventKind::ShutdownRequested => {
                println!("[shutdown-requested]");
            }
            EventKind::RingReleased => {
                println!("[ring-released]");
            }
            EventKind::SpinStarted => {
                println!("[spin-started] spin={:?}", e.spin);
            }
            EventKind::SpinRejected => {
                println!("[spin-rejected] reason={:?}", e.reason);
            }
            EventKind::WinnerCommitted => {
                println!("[winner-committed] spin={:?} slot={:?}", e.spin, e.slot);
            }
            EventKind::SpinSettled => {
                println!(
                    "[spin-settled] spin={:?} slot={:?} elapsed_ms={:?}",
                    e.spin, e.slot, e.elapsed_ms
                );
            }
            EventKind::OutputFault => {
                println!("[output-fault] slot={:?} err={:?}", e.slot, e.reason);
            }
            EventKind::WaitInterrupted => {
                println!("[wait-interrupted] spin={:?}", e.spin);
            }
            EventKind::SubscriberOverflow => {
                println!(
                    "[subscriber-overflow] subscriber={:?} reason={:?}",
                    e.source, e.reason
                );
            }
            EventKind::SubscriberPanicked => {
                println!(
                    "[subscriber-panicked] subscriber={} info={}",
                    e.source.as_deref().unwrap_or("unknown"),
                    e.reason.as_deref().unwrap_or("unknown"),
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
