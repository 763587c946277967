//! PWM generator periodic event abstraction

use crate::error::HalResult;
use crate::timer::IrqHook;

/// High-resolution PWM generator driving the power stage.
///
/// The master timer runs at a fixed base period. Its repetition counter can
/// raise a periodic event every `repetition` base periods, which keeps code
/// bound to that event phase-locked with the switching cycle.
pub trait PwmGenerator {
    /// Base period in microseconds, or 0 when the generator is not configured
    fn base_period_us(&self) -> u32;

    /// Fire `hook` once every `repetition` base periods
    fn configure_periodic_event(&mut self, repetition: u32, hook: IrqHook) -> HalResult<()>;

    /// Unmask the periodic event interrupt
    fn enable_periodic_event(&mut self) -> HalResult<()>;

    /// Mask the periodic event interrupt, keeping its configuration
    fn disable_periodic_event(&mut self) -> HalResult<()>;

    /// Currently programmed repetition count
    fn repetition(&self) -> u32;
}
