//! Host-side driver doubles
//!
//! Each double keeps the state a real driver would expose plus a
//! fixed-capacity log of the calls it received, so tests can assert exactly
//! which collaborator operations the scheduler performed.

mod acquisition;
mod delay;
mod pwm;
mod timer;

pub use acquisition::{AcquisitionCall, MockAcquisition};
pub use delay::MockDelay;
pub use pwm::{MockPwm, PwmCall};
pub use timer::{MockTimer, TimerCall};

/// Capacity of every mock call log. Calls past this are dropped.
pub const CALL_LOG_CAPACITY: usize = 32;

pub(crate) type CallLog<T> = heapless::Vec<T, CALL_LOG_CAPACITY>;
