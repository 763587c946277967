//! Scheduler facade

use hal::{Acquisition, PwmGenerator, TimerPeripheral};
use log::{debug, warn};
use powersched_core::{InterruptSource, Period, SchedError, SchedResult, TaskStatus};

use crate::backend::{PwmBackend, TimerBackend, TimingBackend};
use crate::config::SchedulerConfig;
use crate::dispatch::{self, DispatchState};
use crate::task::{SyncTask, TaskDefinition, TaskFn};
#[cfg(feature = "timing")]
use crate::timing::{TimingRecord, TIMING_CAPACITY};

/// Owner of the synchronous task, its timing hardware and the acquisition
/// subsystem it may drive.
///
/// Exactly one task exists per scheduler. Keep the scheduler in a
/// [`SharedScheduler`](crate::SharedScheduler) to reach it from the
/// interrupt trampoline.
pub struct Scheduler<T, P, A> {
    pub(crate) config: SchedulerConfig,
    pub(crate) source: InterruptSource,
    pub(crate) task: SyncTask,
    pub(crate) dispatch: DispatchState,
    pub(crate) timer: TimerBackend<T>,
    pub(crate) pwm: PwmBackend<P>,
    pub(crate) acquisition: A,
    #[cfg(feature = "timing")]
    pub(crate) timing: Option<&'static mut TimingRecord<TIMING_CAPACITY>>,
}

impl<T, P, A> Scheduler<T, P, A>
where
    T: TimerPeripheral,
    P: PwmGenerator,
    A: Acquisition,
{
    /// Build a scheduler with the default configuration
    pub fn new(timer: T, pwm: P, acquisition: A) -> Self {
        Self::with_config(SchedulerConfig::default(), timer, pwm, acquisition)
    }

    pub fn with_config(config: SchedulerConfig, timer: T, pwm: P, acquisition: A) -> Self {
        Self {
            source: config.source,
            config,
            task: SyncTask::new(),
            dispatch: DispatchState::new(),
            timer: TimerBackend::new(timer),
            pwm: PwmBackend::new(pwm),
            acquisition,
            #[cfg(feature = "timing")]
            timing: None,
        }
    }

    /// Select the hardware event pacing the next definition.
    ///
    /// A task already defined keeps the source it was defined with; the new
    /// source applies from the next [`define`](Self::define).
    pub fn set_interrupt_source(&mut self, source: InterruptSource) {
        if self.task.source().is_some_and(|bound| bound != source) {
            debug!(
                "{}: source {:?} applies from next define, task keeps {:?}",
                self.config.name,
                source,
                self.task.source()
            );
        }
        self.source = source;
    }

    /// Source that the next definition will bind
    pub fn interrupt_source(&self) -> InterruptSource {
        self.source
    }

    /// Define the synchronous task and arm its timing source.
    ///
    /// Legal from `Inexistent` and `Suspended`. The interrupt stays masked
    /// until [`start`](Self::start).
    pub fn define(&mut self, callback: TaskFn, period_us: u32) -> SchedResult<()> {
        let status = self.task.status();
        if !status.accepts_define() {
            warn!("{}: define refused, task is {:?}", self.config.name, status);
            return Err(SchedError::InvalidState);
        }
        if !self.source.is_set() {
            warn!("{}: define refused, no interrupt source", self.config.name);
            return Err(SchedError::SourceUnset);
        }
        let Some(hook) = self.config.tick_hook else {
            warn!("{}: define refused, no tick hook to bind", self.config.name);
            return Err(SchedError::DeviceNotReady);
        };
        let period = Period::from_micros(period_us)?;

        let definition = TaskDefinition {
            callback,
            period,
            source: self.source,
        };
        let backend = Self::backend_for(&mut self.timer, &mut self.pwm, self.source)?;
        self.task.define(definition, backend, hook)
    }

    /// Enable the task interrupt.
    ///
    /// With `manage_acquisition`, and unless acquisition was started
    /// elsewhere, the scheduler also takes over dispatch so each tick
    /// dispatches fresh samples before the callback runs. Starting a
    /// running task succeeds without touching hardware.
    pub fn start(&mut self, manage_acquisition: bool) -> SchedResult<()> {
        if !self.task.check_start()? {
            return Ok(());
        }
        let definition = *self.task.definition().ok_or(SchedError::InvalidState)?;

        if !Self::backend_for(&mut self.timer, &mut self.pwm, definition.source)?.is_ready() {
            warn!("{}: start refused, timing device not ready", self.config.name);
            return Err(SchedError::DeviceNotReady);
        }

        if manage_acquisition || self.dispatch.is_owned() {
            let cadence = dispatch::cadence(&self.pwm, &definition);
            self.dispatch.claim(&mut self.acquisition, cadence)?;
        }

        let backend = Self::backend_for(&mut self.timer, &mut self.pwm, definition.source)?;
        self.task.resume(backend)
    }

    /// Mask the task interrupt. The definition is kept for a later
    /// [`start`](Self::start). Stopping a suspended task succeeds.
    pub fn stop(&mut self) -> SchedResult<()> {
        let Some(source) = self.task.source() else {
            warn!("{}: stop refused, no task defined", self.config.name);
            return Err(SchedError::InvalidState);
        };
        let backend = Self::backend_for(&mut self.timer, &mut self.pwm, source)?;
        self.task.suspend(backend)
    }

    /// Define then start in one call
    pub fn launch(
        &mut self,
        callback: TaskFn,
        period_us: u32,
        manage_acquisition: bool,
    ) -> SchedResult<()> {
        self.define(callback, period_us)?;
        self.start(manage_acquisition)
    }

    pub fn status(&self) -> TaskStatus {
        self.task.status()
    }

    pub fn definition(&self) -> Option<&TaskDefinition> {
        self.task.definition()
    }

    pub fn dispatch(&self) -> &DispatchState {
        &self.dispatch
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn timer(&self) -> &T {
        self.timer.driver()
    }

    pub fn pwm(&self) -> &P {
        self.pwm.driver()
    }

    pub fn acquisition(&self) -> &A {
        &self.acquisition
    }

    /// Board-side access to the timer driver, e.g. after a fault
    pub fn timer_mut(&mut self) -> &mut T {
        self.timer.driver_mut()
    }

    /// Board-side access to the PWM generator
    pub fn pwm_mut(&mut self) -> &mut P {
        self.pwm.driver_mut()
    }

    /// Record tick phases into `record`, returning the previous one.
    ///
    /// The record lives in static storage, typically obtained with
    /// `cortex_m::singleton!`, so the scheduler itself stays small enough
    /// to build on the stack. Nothing is recorded until both a record and a
    /// clock are present.
    #[cfg(feature = "timing")]
    pub fn attach_timing(
        &mut self,
        record: &'static mut TimingRecord<TIMING_CAPACITY>,
    ) -> Option<&'static mut TimingRecord<TIMING_CAPACITY>> {
        self.timing.replace(record)
    }

    /// Captured tick phases
    #[cfg(feature = "timing")]
    pub fn timing(&self) -> Option<&TimingRecord<TIMING_CAPACITY>> {
        self.timing.as_deref()
    }

    /// Thaw both capture buffers and restart the capture
    #[cfg(feature = "timing")]
    pub fn reset_timing(&mut self) {
        if let Some(record) = self.timing.as_deref_mut() {
            record.reset();
        }
    }

    fn backend_for<'a>(
        timer: &'a mut TimerBackend<T>,
        pwm: &'a mut PwmBackend<P>,
        source: InterruptSource,
    ) -> SchedResult<&'a mut dyn TimingBackend> {
        match source {
            InterruptSource::TimerPeripheral => Ok(timer as &mut dyn TimingBackend),
            InterruptSource::PwmSynchronized => Ok(pwm as &mut dyn TimingBackend),
            InterruptSource::Uninitialized => Err(SchedError::SourceUnset),
        }
    }
}
