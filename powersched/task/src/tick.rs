//! Tick handler
//!
//! Runs at interrupt priority on every hardware tick. Dispatch, when owned,
//! always completes before the control routine starts. Nothing here blocks,
//! allocates or logs. Overruns are not detected: a routine longer than the
//! period delays or drops the next tick as the hardware decides.
//!
//! A tick runs in three steps: [`begin_tick`](Scheduler::begin_tick) runs
//! the dispatch, [`PendingTick::run`] calls the control routine and
//! [`finish_tick`](Scheduler::finish_tick) stores its timing. The routine
//! runs without holding the scheduler, so it may call back into a
//! [`SharedScheduler`](crate::SharedScheduler), for instance to stop itself
//! on a fault.

use hal::{Acquisition, PwmGenerator, TimerPeripheral};
#[cfg(feature = "timing")]
use hal::TimestampFn;

use crate::task::TaskFn;
use crate::timing::Span;
use crate::Scheduler;

/// Control routine due on the current tick
#[derive(Debug, Clone, Copy)]
pub(crate) struct PendingTick {
    callback: TaskFn,
    #[cfg(feature = "timing")]
    clock: Option<TimestampFn>,
}

impl PendingTick {
    /// Call the control routine, timing it when profiling
    pub(crate) fn run(&self) -> Option<Span> {
        let rise = self.stamp();
        (self.callback)();
        Some(Span::new(rise?, self.stamp()?))
    }

    fn stamp(&self) -> Option<u32> {
        #[cfg(feature = "timing")]
        {
            self.clock.map(|clock| clock())
        }
        #[cfg(not(feature = "timing"))]
        {
            None
        }
    }
}

impl<T, P, A> Scheduler<T, P, A>
where
    T: TimerPeripheral,
    P: PwmGenerator,
    A: Acquisition,
{
    /// Run one tick on a scheduler owned by the caller.
    ///
    /// A tick delivered while the task is not running is ignored. Interrupt
    /// trampolines go through [`SharedScheduler::on_tick`](crate::SharedScheduler::on_tick).
    pub fn on_tick(&mut self) {
        if let Some(tick) = self.begin_tick() {
            let span = tick.run();
            self.finish_tick(span);
        }
    }

    /// Dispatch phase. `None` unless the task is running.
    pub(crate) fn begin_tick(&mut self) -> Option<PendingTick> {
        let callback = self.task.runnable()?;
        let tick = PendingTick {
            callback,
            #[cfg(feature = "timing")]
            clock: self.timing.as_ref().and(self.config.clock),
        };

        if self.dispatch.is_owned() {
            let rise = tick.stamp();
            self.acquisition.run_full_dispatch();
            let fall = tick.stamp();
            if let (Some(rise), Some(fall)) = (rise, fall) {
                self.record_dispatch(Span::new(rise, fall));
            }
        }
        Some(tick)
    }

    /// Store the control phase span measured by [`PendingTick::run`]
    pub(crate) fn finish_tick(&mut self, span: Option<Span>) {
        #[cfg(feature = "timing")]
        if let (Some(span), Some(record)) = (span, self.timing.as_deref_mut()) {
            record.control.record(span);
        }
        #[cfg(not(feature = "timing"))]
        let _ = span;
    }

    #[cfg(feature = "timing")]
    fn record_dispatch(&mut self, span: Span) {
        if let Some(record) = self.timing.as_deref_mut() {
            record.dispatch.record(span);
        }
    }

    #[cfg(not(feature = "timing"))]
    fn record_dispatch(&mut self, _span: Span) {}
}
