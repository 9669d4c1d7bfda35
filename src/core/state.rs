//! # Shared wheel state.
//!
//! [`WheelState`] lives in a `tokio::sync::watch` channel owned by the coordinator.
//! Writers are the trigger path (enter `Spinning`) and the spin task (commit, settle);
//! everyone else reads snapshots.
//!
//! While a spin is in progress the state carries a per-spin ticket: a watch receiver
//! that resolves to that spin's [`Outcome`]. Waiters clone the ticket, so a reader
//! woken late still gets the spin it waited on even if the next one already started.

use tokio::sync::watch;

use super::status::{SpinState, Status};

/// Result of one completed spin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Spin number (1-based). `0` means no spin has completed yet.
    pub spin: u64,
    /// Committed winner.
    pub winner: Option<usize>,
}

#[derive(Debug, Clone)]
pub(crate) struct SpinTicket {
    pub(crate) spin: u64,
    pub(crate) done: watch::Receiver<Option<Outcome>>,
}

#[derive(Debug, Clone, Default)]
pub(crate) enum Phase {
    #[default]
    Idle,
    Spinning(SpinTicket),
    Settled,
}

/// Snapshot of the coordinator state.
#[derive(Debug, Clone, Default)]
pub struct WheelState {
    pub(crate) phase: Phase,
    pub(crate) winner: Option<usize>,
    pub(crate) spins: u64,
}

impl WheelState {
    /// Current phase.
    pub fn state(&self) -> SpinState {
        match self.phase {
            Phase::Idle => SpinState::Idle,
            Phase::Spinning(_) => SpinState::Spinning,
            Phase::Settled => SpinState::Settled,
        }
    }

    /// Last committed winner.
    pub fn winner(&self) -> Option<usize> {
        self.winner
    }

    /// Completed spins.
    pub fn spins(&self) -> u64 {
        self.spins
    }

    /// Number of the spin in progress, if any.
    pub fn spin_in_progress(&self) -> Option<u64> {
        match &self.phase {
            Phase::Spinning(t) => Some(t.spin),
            _ => None,
        }
    }

    /// Status view of this snapshot.
    pub fn status(&self) -> Status {
        Status {
            state: self.state(),
            winner: self.winner,
            spins: self.spins,
        }
    }

    pub(crate) fn ticket(&self) -> Option<SpinTicket> {
        match &self.phase {
            Phase::Spinning(t) => Some(t.clone()),
            _ => None,
        }
    }

    pub(crate) fn outcome(&self) -> Outcome {
        Outcome {
            spin: self.spins,
            winner: self.winner,
        }
    }
}
