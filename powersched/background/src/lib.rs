//! Cooperative background task
//!
//! The background loop runs at baseline priority beside the synchronous
//! control task. It only suspends at the end of an iteration, and the
//! control task preempts it at any instruction, so anything the two share
//! must be an atomic such as `powersched_core::SharedF32`.

#![no_std]
#![forbid(unsafe_code)]

use hal::delay::DelayNs;
use log::trace;

/// Suspend interval used unless configured otherwise
pub const DEFAULT_SUSPEND_MS: u32 = 100;

/// Body of one background iteration
pub type BackgroundFn = fn();

/// Background loop: run the body, then sleep, forever
pub struct BackgroundTask<D> {
    body: BackgroundFn,
    suspend_ms: u32,
    delay: D,
    iterations: u32,
}

impl<D: DelayNs> BackgroundTask<D> {
    pub fn new(body: BackgroundFn, delay: D) -> Self {
        Self {
            body,
            suspend_ms: DEFAULT_SUSPEND_MS,
            delay,
            iterations: 0,
        }
    }

    /// Set how long the loop sleeps between iterations
    pub fn with_suspend_ms(mut self, suspend_ms: u32) -> Self {
        self.suspend_ms = suspend_ms;
        self
    }

    pub fn suspend_ms(&self) -> u32 {
        self.suspend_ms
    }

    /// Completed iterations, wrapping on overflow
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Run the body to completion, then yield for the suspend interval
    pub fn run_once(&mut self) {
        (self.body)();
        self.iterations = self.iterations.wrapping_add(1);
        trace!(
            "background iteration {} done, sleeping {} ms",
            self.iterations,
            self.suspend_ms
        );
        self.delay.delay_ms(self.suspend_ms);
    }

    /// Run the loop forever
    pub fn run(mut self) -> ! {
        loop {
            self.run_once();
        }
    }
}

#[cfg(feature = "defmt")]
impl<D> defmt::Format for BackgroundTask<D> {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "BackgroundTask{{suspend_ms: {}, iterations: {}}}",
            self.suspend_ms,
            self.iterations
        );
    }
}
