//! Microsecond timer peripheral abstraction

use crate::error::HalResult;

/// Interrupt-context trampoline bound to a timing source.
///
/// Runs at interrupt priority on every hardware event. It must not block and
/// must not allocate.
pub type IrqHook = fn();

/// Basic timer counting microseconds and firing an update interrupt.
///
/// Typically TIM6 on the STM32G4 power boards.
pub trait TimerPeripheral {
    /// Whether the driver finished its own initialization
    fn is_ready(&self) -> bool;

    /// Program the update period and the interrupt hook.
    ///
    /// Must be accepted again while the timer is stopped.
    fn configure(&mut self, period_us: u32, hook: IrqHook) -> HalResult<()>;

    /// Start counting. Starting a running timer is a no-op.
    fn start(&mut self) -> HalResult<()>;

    /// Stop counting. Stopping a stopped timer is a no-op.
    fn stop(&mut self) -> HalResult<()>;
}
