//! Interrupt source selection

/// Hardware event that paces the synchronous task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterruptSource {
    /// Not selected yet; `define` refuses to run
    #[default]
    Uninitialized,
    /// Dedicated timer programmed in microseconds
    TimerPeripheral,
    /// PWM generator periodic event, every N switching periods
    PwmSynchronized,
}

impl InterruptSource {
    pub const fn is_set(self) -> bool {
        !matches!(self, InterruptSource::Uninitialized)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for InterruptSource {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            InterruptSource::Uninitialized => defmt::write!(fmt, "Uninitialized"),
            InterruptSource::TimerPeripheral => defmt::write!(fmt, "TimerPeripheral"),
            InterruptSource::PwmSynchronized => defmt::write!(fmt, "PwmSynchronized"),
        }
    }
}
