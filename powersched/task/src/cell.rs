//! Interrupt-safe home for a scheduler
//!
//! Thread code and the tick trampoline reach the same scheduler through a
//! critical section, so the interrupt never observes a half-applied
//! transition.

use core::cell::RefCell;

use critical_section::Mutex;
use hal::{Acquisition, PwmGenerator, TimerPeripheral};

use crate::Scheduler;

/// A scheduler slot suitable for a `static`
///
/// ```ignore
/// static SCHED: SharedScheduler<Tim6, Hrtim, Adc> = SharedScheduler::new();
///
/// fn tick_trampoline() {
///     SCHED.on_tick();
/// }
/// ```
pub struct SharedScheduler<T, P, A> {
    inner: Mutex<RefCell<Option<Scheduler<T, P, A>>>>,
}

impl<T, P, A> SharedScheduler<T, P, A> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }
}

impl<T, P, A> SharedScheduler<T, P, A>
where
    T: TimerPeripheral,
    P: PwmGenerator,
    A: Acquisition,
{
    /// Place `scheduler` in the slot, returning the previous occupant.
    ///
    /// Panics when called from inside [`with`](Self::with).
    pub fn install(&self, scheduler: Scheduler<T, P, A>) -> Option<Scheduler<T, P, A>> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).replace(scheduler))
    }

    /// Remove the scheduler from the slot.
    ///
    /// Panics when called from inside [`with`](Self::with).
    pub fn take(&self) -> Option<Scheduler<T, P, A>> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).take())
    }

    /// Run `f` on the installed scheduler inside a critical section.
    ///
    /// Returns `None` when nothing is installed, or when called from inside
    /// another `with` on the same slot.
    pub fn with<R>(&self, f: impl FnOnce(&mut Scheduler<T, P, A>) -> R) -> Option<R> {
        critical_section::with(|cs| Self::borrow_with(self.inner.borrow(cs), f))
    }

    /// Forward a hardware tick. Does nothing when nothing is installed.
    ///
    /// The whole tick runs in one critical section, but the control routine
    /// is called with the slot released: it may use [`with`](Self::with),
    /// e.g. to stop its own task.
    pub fn on_tick(&self) {
        critical_section::with(|cs| {
            let slot = self.inner.borrow(cs);
            let Some(tick) = Self::borrow_with(slot, Scheduler::begin_tick).flatten() else {
                return;
            };
            let span = tick.run();
            Self::borrow_with(slot, |sched| sched.finish_tick(span));
        });
    }

    fn borrow_with<R>(
        slot: &RefCell<Option<Scheduler<T, P, A>>>,
        f: impl FnOnce(&mut Scheduler<T, P, A>) -> R,
    ) -> Option<R> {
        let mut slot = slot.try_borrow_mut().ok()?;
        slot.as_mut().map(f)
    }
}

impl<T, P, A> Default for SharedScheduler<T, P, A> {
    fn default() -> Self {
        Self::new()
    }
}
