//! # Output ring: N claimed slots driven as one unit.
//!
//! ## Lifecycle
//! ```text
//! OutputRing::acquire(bank, lines)
//!   ├─► claim slot 0 .. N-1 (each driven low)
//!   └─► on failure at slot k: release k-1 .. 0, return ResourceUnavailable{slot: k}
//!
//! set_exclusive(i) / flash(i, ..) / clear()   (exclusive access via &mut self)
//!
//! release()  (idempotent; also runs on drop)
//!   └─► every slot low, then handed back to the host
//! ```
//!
//! ## Rules
//! - Slot indices are positions in ring order, not host line numbers.
//! - Level writes never abort an operation half-way: every slot is written and the
//!   first failure is returned.

use std::sync::Arc;

use crate::error::{LineError, RingError};
use crate::policies::FlashPolicy;
use crate::ring::OutputBank;

/// Ordered set of claimed binary outputs.
pub struct OutputRing {
    bank: Arc<dyn OutputBank>,
    lines: Vec<u32>,
    released: bool,
}

impl std::fmt::Debug for OutputRing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputRing")
            .field("bank", &self.bank.name())
            .field("lines", &self.lines)
            .field("released", &self.released)
            .finish()
    }
}

/// Slot write failure, tagged with the slot index.
#[derive(Debug)]
pub struct SlotFault {
    /// Index of the slot in ring order.
    pub slot: usize,
    /// Host error.
    pub error: LineError,
}

impl OutputRing {
    /// Claims every line in order and switches it off.
    ///
    /// On failure, all lines claimed so far are released before the error is returned.
    pub fn acquire(
        bank: Arc<dyn OutputBank>,
        lines: &[u32],
        consumer: &str,
    ) -> Result<Self, RingError> {
        if lines.is_empty() {
            return Err(RingError::NoSlots);
        }
        for (i, line) in lines.iter().enumerate() {
            if lines[..i].contains(line) {
                return Err(RingError::DuplicateLine { line: *line });
            }
        }

        for (slot, &line) in lines.iter().enumerate() {
            if let Err(source) = bank.claim(line, consumer) {
                for &done in lines[..slot].iter().rev() {
                    bank.release(done);
                }
                return Err(RingError::ResourceUnavailable { slot, source });
            }
        }

        Ok(Self {
            bank,
            lines: lines.to_vec(),
            released: false,
        })
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always `false` for an acquired ring.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Host line numbers in ring order.
    pub fn lines(&self) -> &[u32] {
        &self.lines
    }

    /// `true` once [`release`](Self::release) has run.
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Turns slot `i` on and every other slot off ("all off, then target on").
    ///
    /// An out-of-range `i` leaves every slot off.
    pub fn set_exclusive(&mut self, i: usize) -> Result<(), SlotFault> {
        let mut first = self.clear().err();
        if let Some(&line) = self.lines.get(i) {
            if let Err(error) = self.bank.set_level(line, true) {
                first.get_or_insert(SlotFault { slot: i, error });
            }
        }
        first.map_or(Ok(()), Err)
    }

    /// Turns every slot off.
    pub fn clear(&mut self) -> Result<(), SlotFault> {
        let mut first = None;
        for (slot, &line) in self.lines.iter().enumerate() {
            if let Err(error) = self.bank.set_level(line, false) {
                first.get_or_insert(SlotFault { slot, error });
            }
        }
        first.map_or(Ok(()), Err)
    }

    /// Toggles slot `i` on/off `policy.times` times with the policy's intervals.
    ///
    /// Leaves slot `i` off; other slots are not touched.
    pub async fn flash(&mut self, i: usize, policy: &FlashPolicy) -> Result<(), SlotFault> {
        let Some(&line) = self.lines.get(i) else {
            return Ok(());
        };
        let mut first = None;
        for _ in 0..policy.times {
            if let Err(error) = self.bank.set_level(line, true) {
                first.get_or_insert(SlotFault { slot: i, error });
            }
            tokio::time::sleep(policy.on).await;
            if let Err(error) = self.bank.set_level(line, false) {
                first.get_or_insert(SlotFault { slot: i, error });
            }
            tokio::time::sleep(policy.off).await;
        }
        first.map_or(Ok(()), Err)
    }

    /// Switches every slot off and hands it back to the host.
    ///
    /// Idempotent: only the first call touches the host.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        for &line in &self.lines {
            let _ = self.bank.set_level(line, false);
            self.bank.release(line);
        }
    }
}

impl Drop for OutputRing {
    fn drop(&mut self) {
        self.release();
    }
}
