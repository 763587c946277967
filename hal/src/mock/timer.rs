//! Mock timer peripheral

use super::CallLog;
use crate::error::{HalError, HalResult};
use crate::timer::{IrqHook, TimerPeripheral};

/// Operation received by a [`MockTimer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCall {
    Configure(u32),
    Start,
    Stop,
}

/// Mock timer peripheral
///
/// Tracks period, hook and running state for test verification.
#[derive(Debug)]
pub struct MockTimer {
    ready: bool,
    period_us: Option<u32>,
    hook: Option<IrqHook>,
    running: bool,
    calls: CallLog<TimerCall>,
}

impl MockTimer {
    /// Create a ready, unconfigured timer
    pub fn new() -> Self {
        Self {
            ready: true,
            period_us: None,
            hook: None,
            running: false,
            calls: CallLog::new(),
        }
    }

    /// Create a timer whose driver never became ready
    pub fn not_ready() -> Self {
        Self {
            ready: false,
            ..Self::new()
        }
    }

    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    pub fn period_us(&self) -> Option<u32> {
        self.period_us
    }

    pub fn hook(&self) -> Option<IrqHook> {
        self.hook
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn calls(&self) -> &[TimerCall] {
        &self.calls
    }

    /// Simulate the update interrupt
    pub fn fire(&self) {
        if let (true, Some(hook)) = (self.running, self.hook) {
            hook();
        }
    }
}

impl Default for MockTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerPeripheral for MockTimer {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn configure(&mut self, period_us: u32, hook: IrqHook) -> HalResult<()> {
        if !self.ready {
            return Err(HalError::NotReady);
        }
        if period_us == 0 {
            return Err(HalError::InvalidParameter);
        }
        let _ = self.calls.push(TimerCall::Configure(period_us));
        self.period_us = Some(period_us);
        self.hook = Some(hook);
        Ok(())
    }

    fn start(&mut self) -> HalResult<()> {
        if self.period_us.is_none() {
            return Err(HalError::NotConfigured);
        }
        let _ = self.calls.push(TimerCall::Start);
        self.running = true;
        Ok(())
    }

    fn stop(&mut self) -> HalResult<()> {
        let _ = self.calls.push(TimerCall::Stop);
        self.running = false;
        Ok(())
    }
}
