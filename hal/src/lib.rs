//! Driver contracts for the powersched control task scheduler
//!
//! The scheduler never touches a peripheral register itself. Everything it
//! needs from the board is expressed here as a trait: the microsecond timer
//! peripheral, the PWM generator whose periodic event paces the power stage,
//! and the acquisition subsystem that turns raw ADC samples into
//! measurements. Board support crates implement these traits; host tests use
//! the doubles in [`mock`].

#![cfg_attr(not(feature = "std"), no_std)]

pub mod acquisition;
pub mod clock;
pub mod delay;
pub mod error;
pub mod pwm;
pub mod timer;

#[cfg(feature = "mock")]
pub mod mock;

// Re-export commonly used types
pub use acquisition::{Acquisition, DispatchMode};
pub use clock::TimestampFn;
pub use error::{HalError, HalResult};
pub use pwm::PwmGenerator;
pub use timer::{IrqHook, TimerPeripheral};
