//! Common error types for driver operations

use core::fmt;

/// Driver operation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalError {
    /// Device has not finished initialization
    NotReady,
    /// Invalid parameter provided
    InvalidParameter,
    /// Peripheral used before it was configured
    NotConfigured,
    /// Hardware error occurred
    HardwareError,
    /// Vendor-specific error code
    VendorError(i32),
}

impl fmt::Display for HalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotReady => write!(f, "device not ready"),
            Self::InvalidParameter => write!(f, "invalid parameter"),
            Self::NotConfigured => write!(f, "peripheral not configured"),
            Self::HardwareError => write!(f, "hardware error"),
            Self::VendorError(code) => write!(f, "vendor error code: {}", code),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HalError {}

#[cfg(feature = "defmt")]
impl defmt::Format for HalError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::NotReady => defmt::write!(fmt, "NotReady"),
            Self::InvalidParameter => defmt::write!(fmt, "InvalidParameter"),
            Self::NotConfigured => defmt::write!(fmt, "NotConfigured"),
            Self::HardwareError => defmt::write!(fmt, "HardwareError"),
            Self::VendorError(code) => defmt::write!(fmt, "VendorError({=i32})", code),
        }
    }
}

/// Result type for driver operations
pub type HalResult<T> = Result<T, HalError>;
