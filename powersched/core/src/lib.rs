#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

//! # Powersched Core
//!
//! Types shared by every layer of the control task scheduler: the task
//! lifecycle, the interrupt source selector, validated periods, the error
//! taxonomy, and lock-free scalars for handing values between the
//! interrupt-priority task and the background loop.

use core::fmt;

use hal::HalError;

pub mod period;
pub mod shared;
pub mod source;
pub mod status;

pub use period::Period;
pub use shared::{SharedF32, NO_VALUE};
pub use source::InterruptSource;
pub use status::TaskStatus;

/// Result type used throughout the scheduler
pub type SchedResult<T> = Result<T, SchedError>;

/// Reasons a scheduler operation was refused.
///
/// A refused operation leaves the scheduler exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedError {
    /// Operation not legal from the current task status
    InvalidState,
    /// Period is zero or not a whole number of PWM base periods
    InvalidPeriod,
    /// Timer or PWM hardware reports not ready
    DeviceNotReady,
    /// No interrupt source selected
    SourceUnset,
    /// Dispatch cadence cannot be derived because the base period is unknown
    AcquisitionUnavailable,
}

impl fmt::Display for SchedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedError::InvalidState => write!(f, "Operation not allowed in current task status"),
            SchedError::InvalidPeriod => write!(f, "Invalid task period"),
            SchedError::DeviceNotReady => write!(f, "Timing device not ready"),
            SchedError::SourceUnset => write!(f, "Interrupt source not set"),
            SchedError::AcquisitionUnavailable => {
                write!(f, "Acquisition dispatch cadence unavailable")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SchedError {}

#[cfg(feature = "defmt")]
impl defmt::Format for SchedError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            SchedError::InvalidState => defmt::write!(fmt, "InvalidState"),
            SchedError::InvalidPeriod => defmt::write!(fmt, "InvalidPeriod"),
            SchedError::DeviceNotReady => defmt::write!(fmt, "DeviceNotReady"),
            SchedError::SourceUnset => defmt::write!(fmt, "SourceUnset"),
            SchedError::AcquisitionUnavailable => defmt::write!(fmt, "AcquisitionUnavailable"),
        }
    }
}

/// Every driver failure surfaces as the device not being ready.
impl From<HalError> for SchedError {
    fn from(_: HalError) -> Self {
        SchedError::DeviceNotReady
    }
}
