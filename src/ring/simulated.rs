//! # In-memory output host.
//!
//! [`SimulatedBank`] keeps owner and level per line and records every level
//! write, so the chase pattern can be inspected after the fact. Lines can be
//! pre-claimed by a foreign owner to exercise claim failures.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::error::LineError;
use crate::ring::OutputBank;

#[derive(Debug, Default, Clone)]
struct LineState {
    owner: Option<String>,
    on: bool,
}

#[derive(Debug, Default)]
struct Inner {
    lines: BTreeMap<u32, LineState>,
    writes: Vec<(u32, bool)>,
}

/// Simulated bank of output lines.
///
/// # Example
/// ```
/// use spinwheel::{OutputBank, SimulatedBank};
///
/// let bank = SimulatedBank::new([17, 27]);
/// bank.hold(27, "other-driver");
///
/// assert!(bank.claim(17, "wheel").is_ok());
/// assert!(bank.claim(27, "wheel").is_err());
/// assert_eq!(bank.owner(17).as_deref(), Some("wheel"));
/// ```
#[derive(Debug, Default)]
pub struct SimulatedBank {
    inner: Mutex<Inner>,
}

impl SimulatedBank {
    /// Creates a bank exposing the given lines, all unowned and low.
    pub fn new(lines: impl IntoIterator<Item = u32>) -> Self {
        let lines = lines
            .into_iter()
            .map(|l| (l, LineState::default()))
            .collect();
        Self {
            inner: Mutex::new(Inner {
                lines,
                writes: Vec::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Marks `line` as held by a foreign `owner`.
    pub fn hold(&self, line: u32, owner: &str) {
        let mut inner = self.lock();
        inner.lines.entry(line).or_default().owner = Some(owner.to_string());
    }

    /// Current owner of `line`, if any.
    pub fn owner(&self, line: u32) -> Option<String> {
        self.lock().lines.get(&line).and_then(|s| s.owner.clone())
    }

    /// Current level of `line` (`false` for unknown lines).
    pub fn level(&self, line: u32) -> bool {
        self.lock().lines.get(&line).is_some_and(|s| s.on)
    }

    /// Lines currently driven high, in ascending order.
    pub fn lit(&self) -> Vec<u32> {
        self.lock()
            .lines
            .iter()
            .filter(|(_, s)| s.on)
            .map(|(l, _)| *l)
            .collect()
    }

    /// Lines currently owned by `consumer`, in ascending order.
    pub fn claimed_by(&self, consumer: &str) -> Vec<u32> {
        self.lock()
            .lines
            .iter()
            .filter(|(_, s)| s.owner.as_deref() == Some(consumer))
            .map(|(l, _)| *l)
            .collect()
    }

    /// Every level write since creation (or the last [`clear_history`](Self::clear_history)).
    pub fn history(&self) -> Vec<(u32, bool)> {
        self.lock().writes.clone()
    }

    /// Forgets recorded writes.
    pub fn clear_history(&self) {
        self.lock().writes.clear();
    }
}

impl OutputBank for SimulatedBank {
    fn claim(&self, line: u32, consumer: &str) -> Result<(), LineError> {
        let mut inner = self.lock();
        let state = inner.lines.get_mut(&line).ok_or(LineError::Unknown { line })?;
        if let Some(owner) = &state.owner {
            return Err(LineError::Claimed {
                line,
                owner: owner.clone(),
            });
        }
        state.owner = Some(consumer.to_string());
        state.on = false;
        Ok(())
    }

    fn release(&self, line: u32) {
        let mut inner = self.lock();
        if let Some(state) = inner.lines.get_mut(&line) {
            state.owner = None;
            state.on = false;
        }
    }

    fn set_level(&self, line: u32, on: bool) -> Result<(), LineError> {
        let mut inner = self.lock();
        let state = inner.lines.get_mut(&line).ok_or(LineError::Unknown { line })?;
        if state.owner.is_none() {
            return Err(LineError::NotClaimed { line });
        }
        state.on = on;
        inner.writes.push((line, on));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}
