//! Synchronous task state machine
//!
//! Owns the lifecycle of the one synchronous task. Every transition either
//! completes or leaves the task untouched; hardware is only reconfigured
//! after all checks passed.

use hal::IrqHook;
use log::{debug, warn};
use powersched_core::{InterruptSource, Period, SchedError, SchedResult, TaskStatus};

use crate::backend::TimingBackend;

/// User control routine run on every tick.
///
/// Runs at interrupt priority: it must return well within the task period,
/// must not block and must not allocate.
pub type TaskFn = fn();

/// Definition of the synchronous task
#[derive(Debug, Clone, Copy)]
pub struct TaskDefinition {
    pub callback: TaskFn,
    pub period: Period,
    /// Source bound at definition time
    pub source: InterruptSource,
}

/// The synchronous task slot
#[derive(Debug, Default)]
pub struct SyncTask {
    status: TaskStatus,
    definition: Option<TaskDefinition>,
}

impl SyncTask {
    pub const fn new() -> Self {
        Self {
            status: TaskStatus::Inexistent,
            definition: None,
        }
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn definition(&self) -> Option<&TaskDefinition> {
        self.definition.as_ref()
    }

    /// Source the task was defined with, if any
    pub fn source(&self) -> Option<InterruptSource> {
        self.definition.map(|def| def.source)
    }

    /// Validate and arm a new definition. The interrupt stays masked.
    pub(crate) fn define(
        &mut self,
        definition: TaskDefinition,
        backend: &mut dyn TimingBackend,
        hook: IrqHook,
    ) -> SchedResult<()> {
        if !self.status.accepts_define() {
            warn!("define refused: task is {:?}", self.status);
            return Err(SchedError::InvalidState);
        }

        let arming = backend.validate(definition.period).map_err(|err| {
            warn!("define refused: {} rejected by {:?}", definition.period, definition.source);
            err
        })?;
        backend.arm(arming, hook)?;

        self.definition = Some(definition);
        self.status = TaskStatus::Defined;
        debug!(
            "sync task defined: {} on {:?} ({:?})",
            definition.period, definition.source, arming
        );
        Ok(())
    }

    /// Check that `start` may proceed. `Ok(false)` means already running.
    pub(crate) fn check_start(&self) -> SchedResult<bool> {
        match self.status {
            TaskStatus::Running => Ok(false),
            status if status.accepts_start() => match self.source() {
                Some(source) if source.is_set() => Ok(true),
                _ => Err(SchedError::SourceUnset),
            },
            status => {
                warn!("start refused: task is {:?}", status);
                Err(SchedError::InvalidState)
            }
        }
    }

    /// Unmask the interrupt of an armed task
    pub(crate) fn resume(&mut self, backend: &mut dyn TimingBackend) -> SchedResult<()> {
        if !self.status.accepts_start() {
            return Err(SchedError::InvalidState);
        }
        backend.enable()?;
        self.status = TaskStatus::Running;
        debug!("sync task running");
        Ok(())
    }

    /// Mask the interrupt of a running task, keeping its configuration
    pub(crate) fn suspend(&mut self, backend: &mut dyn TimingBackend) -> SchedResult<()> {
        match self.status {
            TaskStatus::Suspended => Ok(()),
            TaskStatus::Running => {
                backend.disable()?;
                self.status = TaskStatus::Suspended;
                debug!("sync task suspended");
                Ok(())
            }
            status => {
                warn!("stop refused: task is {:?}", status);
                Err(SchedError::InvalidState)
            }
        }
    }

    /// Callback to run on a tick, only while running
    pub(crate) fn runnable(&self) -> Option<TaskFn> {
        if !self.status.is_running() {
            return None;
        }
        self.definition.map(|def| def.callback)
    }
}
