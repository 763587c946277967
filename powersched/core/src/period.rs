//! Task period in microseconds

use core::fmt;
use core::num::NonZeroU32;

use crate::{SchedError, SchedResult};

/// Non-zero task period in microseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Period(NonZeroU32);

impl Period {
    /// Validate a raw microsecond count
    pub const fn from_micros(period_us: u32) -> SchedResult<Self> {
        match NonZeroU32::new(period_us) {
            Some(us) => Ok(Self(us)),
            None => Err(SchedError::InvalidPeriod),
        }
    }

    /// Get the raw microsecond count
    pub const fn as_micros(self) -> u32 {
        self.0.get()
    }

    /// Number of `base_us` periods in this period, which must divide evenly.
    pub fn exact_repetitions(self, base_us: NonZeroU32) -> SchedResult<u32> {
        let us = self.as_micros();
        if us % base_us.get() != 0 {
            return Err(SchedError::InvalidPeriod);
        }
        match us / base_us.get() {
            0 => Err(SchedError::InvalidPeriod),
            repetition => Ok(repetition),
        }
    }

    /// Number of whole `base_us` periods in this period, remainder dropped.
    pub fn floor_repetitions(self, base_us: NonZeroU32) -> u32 {
        self.as_micros() / base_us.get()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}us", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Period {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=u32}us", self.0.get());
    }
}
