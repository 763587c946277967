#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

//! # Powersched synchronous task
//!
//! Runs one control routine at a fixed period, paced either by a dedicated
//! microsecond timer or by the PWM generator's periodic event so the
//! routine stays phase-locked with the power stage. The scheduler can also
//! take over acquisition dispatch so each tick converts the samples
//! accumulated during the last period right before the routine reads them.
//!
//! ## Module Overview
//! - [`backend`]   – timing source strategies and period validation.
//! - [`task`]      – lifecycle of the synchronous task.
//! - [`dispatch`]  – acquisition dispatch ownership.
//! - [`timing`]    – tick phase capture buffers for profiling.
//! - [`config`]    – scheduler configuration builder.
//!
//! ## Usage
//!
//! ```ignore
//! let config = SchedulerConfig::builder()
//!     .source(InterruptSource::PwmSynchronized)
//!     .tick_hook(tick_trampoline)
//!     .build();
//! let mut sched = Scheduler::with_config(config, tim6, hrtim, adc);
//! sched.define(control_task, 100)?;
//! sched.start(true)?;
//! SCHED.install(sched);
//! ```
//!
//! With the `timing` feature the capture buffers live in static storage
//! attached after construction:
//!
//! ```ignore
//! let record = cortex_m::singleton!(: TimingRecord<TIMING_CAPACITY> = TimingRecord::new());
//! if let Some(record) = record {
//!     sched.attach_timing(record);
//! }
//! ```

pub mod backend;
mod cell;
pub mod config;
pub mod dispatch;
mod scheduler;
pub mod task;
mod tick;
pub mod timing;

pub use backend::{Arming, PwmBackend, TimerBackend, TimingBackend};
pub use cell::SharedScheduler;
pub use config::{SchedulerConfig, SchedulerConfigBuilder};
pub use dispatch::DispatchState;
pub use powersched_core::{
    InterruptSource, Period, SchedError, SchedResult, SharedF32, TaskStatus, NO_VALUE,
};
pub use scheduler::Scheduler;
pub use task::{SyncTask, TaskDefinition, TaskFn};
pub use timing::{CaptureBuffer, Span, TimingRecord, TIMING_CAPACITY};
