//! # Status publisher: read-only projections of the wheel state.
//!
//! Two presentations of one [`Status`] snapshot:
//! - [`Status::line`] terse single value, the read-path payload (`"5\n"`, or `"-1\n"` when unset)
//! - [`Status::dump`] human-readable two-line report (also the `Display` impl)
//!
//! ```text
//! Winning LED: 5
//! Spin count: 3
//! ```
//!
//! A snapshot reflects the most recently committed winner; taken during a spin it
//! may still show the previous one.

use std::fmt;

/// Marker used on machine-readable paths when no winner has been committed.
pub const UNSET_WINNER: i32 = -1;

/// Coordinator state machine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinState {
    /// No spin has completed yet.
    #[default]
    Idle,
    /// Animation/commit in progress; the exclusive lock is held.
    Spinning,
    /// Winner committed and readable until the next spin.
    Settled,
}

impl SpinState {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            SpinState::Idle => "idle",
            SpinState::Spinning => "spinning",
            SpinState::Settled => "settled",
        }
    }
}

/// Point-in-time view of the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Status {
    /// Phase at the time of the snapshot.
    pub state: SpinState,
    /// Last committed winner.
    pub winner: Option<usize>,
    /// Completed spins since construction.
    pub spins: u64,
}

impl Status {
    /// Winner as a raw integer, [`UNSET_WINNER`] when none has been committed.
    pub fn raw_winner(&self) -> i32 {
        self.winner
            .and_then(|w| i32::try_from(w).ok())
            .unwrap_or(UNSET_WINNER)
    }

    /// Terse single-line form: decimal winner followed by a newline.
    ///
    /// # Example
    /// ```
    /// use spinwheel::{SpinState, Status};
    ///
    /// let st = Status { state: SpinState::Settled, winner: Some(5), spins: 1 };
    /// assert_eq!(st.line(), "5\n");
    /// assert_eq!(Status::default().line(), "-1\n");
    /// ```
    pub fn line(&self) -> String {
        match self.winner {
            Some(w) => format!("{w}\n"),
            None => format!("{UNSET_WINNER}\n"),
        }
    }

    /// Verbose multi-line dump: winner (or `none`) and total spins.
    ///
    /// # Example
    /// ```
    /// use spinwheel::{SpinState, Status};
    ///
    /// let st = Status { state: SpinState::Settled, winner: Some(2), spins: 7 };
    /// assert_eq!(st.dump(), "Winning LED: 2\nSpin count: 7\n");
    /// ```
    pub fn dump(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.winner {
            Some(w) => writeln!(f, "Winning LED: {w}")?,
            None => writeln!(f, "Winning LED: none")?,
        }
        writeln!(f, "Spin count: {}", self.spins)
    }
}
