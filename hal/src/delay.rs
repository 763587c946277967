//! Suspend contract for the cooperative background task
//!
//! The background task gives the CPU back by sleeping; any
//! [`embedded_hal::delay::DelayNs`] provider will do, whether it busy-waits
//! on a timer or parks the thread of an underlying kernel.

pub use embedded_hal::delay::DelayNs;
