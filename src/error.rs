//! Error types used by the wheel, its output ring and the device transport.
//!
//! - [`LineError`]: a single host output line could not be claimed or driven.
//! - [`RingError`]: the output ring could not be acquired (fatal to start-up).
//! - [`SpinError`]: a coordinator operation was rejected or interrupted.
//! - [`DeviceError`]: the transport-boundary view of the above, with `errno()`.
//!
//! All of them provide `as_label` (stable snake_case string for logs).

use thiserror::Error;

/// # Errors produced by an output host for one line.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum LineError {
    /// The line is already held by another owner.
    #[error("line {line} already claimed by {owner}")]
    Claimed {
        /// Host line number.
        line: u32,
        /// Label of the current owner.
        owner: String,
    },

    /// The host has no such line.
    #[error("line {line} does not exist")]
    Unknown {
        /// Host line number.
        line: u32,
    },

    /// The line was driven without being claimed first.
    #[error("line {line} is not claimed")]
    NotClaimed {
        /// Host line number.
        line: u32,
    },

    /// Host I/O failure (sysfs write, etc.).
    #[error("line {line}: {source}")]
    Io {
        /// Host line number.
        line: u32,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl LineError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            LineError::Claimed { .. } => "line_claimed",
            LineError::Unknown { .. } => "line_unknown",
            LineError::NotClaimed { .. } => "line_not_claimed",
            LineError::Io { .. } => "line_io",
        }
    }
}

/// # Errors produced while acquiring the output ring.
///
/// None of these is retried automatically: the wheel is simply not constructed.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RingError {
    /// An output slot could not be claimed from the host.
    ///
    /// Every slot claimed before the failing one has already been released.
    #[error("output slot {slot} unavailable: {source}")]
    ResourceUnavailable {
        /// Index of the failing slot in ring order.
        slot: usize,
        /// Host error.
        #[source]
        source: LineError,
    },

    /// The configuration lists no output lines.
    #[error("ring needs at least one output line")]
    NoSlots,

    /// The same host line appears twice in the configuration.
    #[error("line {line} listed more than once")]
    DuplicateLine {
        /// Host line number.
        line: u32,
    },
}

impl RingError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use spinwheel::RingError;
    ///
    /// assert_eq!(RingError::NoSlots.as_label(), "ring_no_slots");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RingError::ResourceUnavailable { .. } => "ring_resource_unavailable",
            RingError::NoSlots => "ring_no_slots",
            RingError::DuplicateLine { .. } => "ring_duplicate_line",
        }
    }
}

/// # Errors produced by the spin coordinator.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinError {
    /// A spin is already in progress; the request was rejected, not queued.
    #[error("spin already in progress")]
    Busy,

    /// A suspended wait was cancelled before the spin settled.
    #[error("wait for result interrupted")]
    Interrupted,

    /// The wheel has been shut down.
    #[error("wheel closed")]
    Closed,
}

impl SpinError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            SpinError::Busy => "spin_busy",
            SpinError::Interrupted => "spin_interrupted",
            SpinError::Closed => "spin_closed",
        }
    }

    /// Indicates whether the caller may simply try again.
    ///
    /// # Example
    /// ```
    /// use spinwheel::SpinError;
    ///
    /// assert!(SpinError::Busy.is_retryable());
    /// assert!(!SpinError::Closed.is_retryable());
    /// ```
    pub fn is_retryable(&self) -> bool {
        matches!(self, SpinError::Busy | SpinError::Interrupted)
    }
}

pub(crate) const EINTR: i32 = 4;
pub(crate) const EFAULT: i32 = 14;
pub(crate) const EBUSY: i32 = 16;
pub(crate) const ENODEV: i32 = 19;
pub(crate) const EINVAL: i32 = 22;

/// # Errors reported at the device (transport) boundary.
///
/// None of these alters coordinator state.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceError {
    /// A spin is already in progress (resource unavailable).
    #[error("device busy")]
    Busy,

    /// A blocked read was cancelled.
    #[error("interrupted")]
    Interrupted,

    /// Unrecognized fast-query command.
    #[error("invalid ioctl command {cmd:#x}")]
    InvalidArgument {
        /// The rejected command number.
        cmd: u32,
    },

    /// The result could not be copied into the caller's buffer.
    #[error("bad address: need {needed} bytes, buffer has {got}")]
    TransferFault {
        /// Bytes the result needs.
        needed: usize,
        /// Bytes the caller provided.
        got: usize,
    },

    /// The wheel has been shut down.
    #[error("no such device")]
    NoDevice,
}

impl DeviceError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            DeviceError::Busy => "device_busy",
            DeviceError::Interrupted => "device_interrupted",
            DeviceError::InvalidArgument { .. } => "device_invalid_argument",
            DeviceError::TransferFault { .. } => "device_transfer_fault",
            DeviceError::NoDevice => "device_gone",
        }
    }

    /// Linux errno equivalent (positive value).
    ///
    /// # Example
    /// ```
    /// use spinwheel::DeviceError;
    ///
    /// assert_eq!(DeviceError::Busy.errno(), 16);
    /// assert_eq!(DeviceError::InvalidArgument { cmd: 7 }.errno(), 22);
    /// ```
    pub fn errno(&self) -> i32 {
        match self {
            DeviceError::Busy => EBUSY,
            DeviceError::Interrupted => EINTR,
            DeviceError::InvalidArgument { .. } => EINVAL,
            DeviceError::TransferFault { .. } => EFAULT,
            DeviceError::NoDevice => ENODEV,
        }
    }
}

impl From<SpinError> for DeviceError {
    fn from(e: SpinError) -> Self {
        match e {
            SpinError::Busy => DeviceError::Busy,
            SpinError::Interrupted => DeviceError::Interrupted,
            SpinError::Closed => DeviceError::NoDevice,
        }
    }
}
