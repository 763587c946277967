//! Timing source backends
//!
//! A backend turns a validated period into a hardware interrupt. Validation
//! is side-effect free so `define` can reject a period before any register
//! is touched; arming is the single registration call with the driver.

use core::num::NonZeroU32;

use hal::{IrqHook, PwmGenerator, TimerPeripheral};
use powersched_core::{Period, SchedError, SchedResult};

/// How a backend will program its hardware for a given period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arming {
    /// Timer update every `period_us` microseconds
    Direct { period_us: u32 },
    /// PWM periodic event every `repetition` base periods
    Repeated { repetition: u32 },
}

/// Strategy turning a period into a hardware tick
pub trait TimingBackend {
    /// Whether the underlying device can be used
    fn is_ready(&self) -> bool;

    /// Check `period` against this backend's constraints without touching
    /// hardware.
    fn validate(&self, period: Period) -> SchedResult<Arming>;

    /// Register `hook` with the hardware. The interrupt stays masked.
    fn arm(&mut self, arming: Arming, hook: IrqHook) -> SchedResult<()>;

    /// Unmask the interrupt
    fn enable(&mut self) -> SchedResult<()>;

    /// Mask the interrupt, keeping the armed configuration
    fn disable(&mut self) -> SchedResult<()>;
}

/// Backend counting microseconds on a dedicated timer
#[derive(Debug)]
pub struct TimerBackend<T> {
    timer: T,
}

impl<T: TimerPeripheral> TimerBackend<T> {
    pub fn new(timer: T) -> Self {
        Self { timer }
    }

    pub fn driver(&self) -> &T {
        &self.timer
    }

    pub fn driver_mut(&mut self) -> &mut T {
        &mut self.timer
    }
}

impl<T: TimerPeripheral> TimingBackend for TimerBackend<T> {
    fn is_ready(&self) -> bool {
        self.timer.is_ready()
    }

    fn validate(&self, period: Period) -> SchedResult<Arming> {
        if !self.timer.is_ready() {
            return Err(SchedError::DeviceNotReady);
        }
        Ok(Arming::Direct {
            period_us: period.as_micros(),
        })
    }

    fn arm(&mut self, arming: Arming, hook: IrqHook) -> SchedResult<()> {
        match arming {
            Arming::Direct { period_us } => Ok(self.timer.configure(period_us, hook)?),
            Arming::Repeated { .. } => Err(SchedError::InvalidPeriod),
        }
    }

    fn enable(&mut self) -> SchedResult<()> {
        if !self.timer.is_ready() {
            return Err(SchedError::DeviceNotReady);
        }
        Ok(self.timer.start()?)
    }

    fn disable(&mut self) -> SchedResult<()> {
        Ok(self.timer.stop()?)
    }
}

/// Backend riding the PWM generator's periodic event
#[derive(Debug)]
pub struct PwmBackend<P> {
    pwm: P,
}

impl<P: PwmGenerator> PwmBackend<P> {
    pub fn new(pwm: P) -> Self {
        Self { pwm }
    }

    pub fn driver(&self) -> &P {
        &self.pwm
    }

    pub fn driver_mut(&mut self) -> &mut P {
        &mut self.pwm
    }

    /// Switching period of the power stage, `None` while unconfigured.
    ///
    /// This is the reference clock of acquisition whatever source paces the
    /// task.
    pub fn base_period(&self) -> Option<NonZeroU32> {
        NonZeroU32::new(self.pwm.base_period_us())
    }
}

impl<P: PwmGenerator> TimingBackend for PwmBackend<P> {
    fn is_ready(&self) -> bool {
        self.base_period().is_some()
    }

    fn validate(&self, period: Period) -> SchedResult<Arming> {
        let base = self.base_period().ok_or(SchedError::DeviceNotReady)?;
        let repetition = period.exact_repetitions(base)?;
        Ok(Arming::Repeated { repetition })
    }

    fn arm(&mut self, arming: Arming, hook: IrqHook) -> SchedResult<()> {
        match arming {
            Arming::Repeated { repetition } => {
                Ok(self.pwm.configure_periodic_event(repetition, hook)?)
            }
            Arming::Direct { .. } => Err(SchedError::InvalidPeriod),
        }
    }

    fn enable(&mut self) -> SchedResult<()> {
        Ok(self.pwm.enable_periodic_event()?)
    }

    fn disable(&mut self) -> SchedResult<()> {
        Ok(self.pwm.disable_periodic_event()?)
    }
}
