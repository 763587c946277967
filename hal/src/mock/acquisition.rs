//! Mock acquisition subsystem

use super::CallLog;
use crate::acquisition::{Acquisition, DispatchMode};
use crate::error::HalResult;

/// Configuration operation received by a [`MockAcquisition`].
///
/// Dispatches are counted separately since they happen every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionCall {
    SetDispatchMode(DispatchMode),
    SetRepetitionFactor(u32),
    Start,
}

/// Mock acquisition subsystem
#[derive(Debug)]
pub struct MockAcquisition {
    started: bool,
    mode: DispatchMode,
    repetition_factor: Option<u32>,
    dispatches: u32,
    on_dispatch: Option<fn()>,
    calls: CallLog<AcquisitionCall>,
}

impl MockAcquisition {
    /// Create an idle subsystem
    pub fn new() -> Self {
        Self {
            started: false,
            mode: DispatchMode::default(),
            repetition_factor: None,
            dispatches: 0,
            on_dispatch: None,
            calls: CallLog::new(),
        }
    }

    /// Create a subsystem the application already started on its own
    pub fn already_started() -> Self {
        Self {
            started: true,
            ..Self::new()
        }
    }

    /// Run `hook` inside every dispatch, to observe ordering
    pub fn with_dispatch_hook(mut self, hook: fn()) -> Self {
        self.on_dispatch = Some(hook);
        self
    }

    pub fn mode(&self) -> DispatchMode {
        self.mode
    }

    pub fn repetition_factor(&self) -> Option<u32> {
        self.repetition_factor
    }

    pub fn dispatches(&self) -> u32 {
        self.dispatches
    }

    pub fn calls(&self) -> &[AcquisitionCall] {
        &self.calls
    }
}

impl Default for MockAcquisition {
    fn default() -> Self {
        Self::new()
    }
}

impl Acquisition for MockAcquisition {
    fn is_started(&self) -> bool {
        self.started
    }

    fn set_dispatch_mode(&mut self, mode: DispatchMode) {
        let _ = self.calls.push(AcquisitionCall::SetDispatchMode(mode));
        self.mode = mode;
    }

    fn set_repetition_factor(&mut self, factor: u32) {
        let _ = self.calls.push(AcquisitionCall::SetRepetitionFactor(factor));
        self.repetition_factor = Some(factor);
    }

    fn start(&mut self) -> HalResult<()> {
        let _ = self.calls.push(AcquisitionCall::Start);
        self.started = true;
        Ok(())
    }

    fn run_full_dispatch(&mut self) {
        self.dispatches += 1;
        if let Some(hook) = self.on_dispatch {
            hook();
        }
    }
}
