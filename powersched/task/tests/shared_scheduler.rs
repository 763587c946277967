//! SharedScheduler driven the way an application wires it: a static slot,
//! a tick trampoline registered with the hardware and a control loop
//! exchanging values through atomics.

use std::sync::atomic::{AtomicU32, Ordering};

use hal::mock::{MockAcquisition, MockPwm, MockTimer};
use powersched_task::{
    InterruptSource, Scheduler, SchedulerConfig, SharedF32, SharedScheduler, TaskStatus, NO_VALUE,
};

type Slot = SharedScheduler<MockTimer, MockPwm, MockAcquisition>;

/// Fire the hook the hardware holds, outside the critical section, the way
/// the interrupt controller would.
fn fire_pwm(slot: &Slot) {
    let hook = slot.with(|s| s.pwm().hook()).flatten();
    if let Some(hook) = hook {
        hook();
    }
}

fn fire_timer(slot: &Slot) {
    let hook = slot.with(|s| s.timer().hook()).flatten();
    if let Some(hook) = hook {
        hook();
    }
}

#[test]
fn empty_slot_ignores_ticks() {
    static EMPTY: Slot = SharedScheduler::new();

    EMPTY.on_tick();
    assert!(EMPTY.with(|s| s.status()).is_none());
    assert!(EMPTY.take().is_none());
}

#[test]
fn trampoline_reaches_installed_scheduler() {
    static SCHED: Slot = SharedScheduler::new();
    static TICKS: AtomicU32 = AtomicU32::new(0);

    fn trampoline() {
        SCHED.on_tick();
    }
    fn control() {
        TICKS.fetch_add(1, Ordering::SeqCst);
    }

    let config = SchedulerConfig::builder()
        .source(InterruptSource::TimerPeripheral)
        .tick_hook(trampoline)
        .build();
    let previous = SCHED.install(Scheduler::with_config(
        config,
        MockTimer::new(),
        MockPwm::new(5),
        MockAcquisition::new(),
    ));
    assert!(previous.is_none());

    SCHED.with(|s| s.launch(control, 100, false)).unwrap().unwrap();
    for _ in 0..3 {
        fire_timer(&SCHED);
    }
    assert_eq!(TICKS.load(Ordering::SeqCst), 3);

    SCHED.with(|s| s.stop()).unwrap().unwrap();
    fire_timer(&SCHED);
    assert_eq!(TICKS.load(Ordering::SeqCst), 3);

    let sched = SCHED.take().unwrap();
    assert_eq!(sched.status(), TaskStatus::Suspended);
}

#[test]
fn control_loop_with_shared_measurements() {
    static SCHED: Slot = SharedScheduler::new();
    static MEASURED: SharedF32 = SharedF32::new(NO_VALUE);
    static DUTY: SharedF32 = SharedF32::new(0.0);
    static REFERENCE: SharedF32 = SharedF32::new(12.0);

    fn trampoline() {
        SCHED.on_tick();
    }
    // Acquisition dispatch publishes the latest conversion
    fn publish_sample() {
        let previous = MEASURED.load();
        let next = if previous == NO_VALUE { 10.0 } else { previous + 0.5 };
        MEASURED.update_if_valid(next);
    }
    fn regulate() {
        let measured = MEASURED.load();
        if measured == NO_VALUE {
            return;
        }
        let error = REFERENCE.load() - measured;
        DUTY.store((0.5 + 0.01 * error).clamp(0.0, 1.0));
    }

    let config = SchedulerConfig::builder()
        .name("buck")
        .source(InterruptSource::PwmSynchronized)
        .tick_hook(trampoline)
        .build();
    SCHED.install(Scheduler::with_config(
        config,
        MockTimer::new(),
        MockPwm::new(5),
        MockAcquisition::new().with_dispatch_hook(publish_sample),
    ));

    SCHED.with(|s| s.launch(regulate, 100, true)).unwrap().unwrap();
    assert_eq!(SCHED.with(|s| s.pwm().is_event_enabled()), Some(true));
    assert_eq!(SCHED.with(|s| s.dispatch().repetition_factor()), Some(Some(20)));

    fire_pwm(&SCHED);
    assert_eq!(MEASURED.load(), 10.0);
    assert!((DUTY.load() - 0.52).abs() < 1e-6);

    for _ in 0..4 {
        fire_pwm(&SCHED);
    }
    assert_eq!(MEASURED.load(), 12.0);
    assert!((DUTY.load() - 0.5).abs() < 1e-6);
    assert_eq!(SCHED.with(|s| s.acquisition().dispatches()), Some(5));

    // A rejected reading keeps the last good value
    assert!(!MEASURED.update_if_valid(NO_VALUE));
    assert_eq!(MEASURED.load(), 12.0);
}

#[test]
fn control_routine_may_stop_its_own_task() {
    static SCHED: Slot = SharedScheduler::new();
    static RUNS: AtomicU32 = AtomicU32::new(0);
    static STOPPED: AtomicU32 = AtomicU32::new(0);

    fn trampoline() {
        SCHED.on_tick();
    }
    // Trips on the third tick, like an overcurrent guard would
    fn guarded_control() {
        if RUNS.fetch_add(1, Ordering::SeqCst) + 1 == 3 {
            if let Some(Ok(())) = SCHED.with(|s| s.stop()) {
                STOPPED.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    let config = SchedulerConfig::builder()
        .source(InterruptSource::PwmSynchronized)
        .tick_hook(trampoline)
        .build();
    SCHED.install(Scheduler::with_config(
        config,
        MockTimer::new(),
        MockPwm::new(5),
        MockAcquisition::new(),
    ));
    SCHED.with(|s| s.launch(guarded_control, 50, true)).unwrap().unwrap();

    for _ in 0..5 {
        fire_pwm(&SCHED);
    }

    assert_eq!(RUNS.load(Ordering::SeqCst), 3);
    assert_eq!(STOPPED.load(Ordering::SeqCst), 1);
    assert_eq!(SCHED.with(|s| s.status()), Some(TaskStatus::Suspended));
    assert_eq!(SCHED.with(|s| s.pwm().is_event_enabled()), Some(false));
    assert_eq!(SCHED.with(|s| s.acquisition().dispatches()), Some(3));
}

#[test]
fn nested_access_is_refused() {
    static SCHED: Slot = SharedScheduler::new();

    SCHED.install(Scheduler::new(
        MockTimer::new(),
        MockPwm::new(5),
        MockAcquisition::new(),
    ));

    let nested = SCHED.with(|_| SCHED.with(|s| s.status()));
    assert_eq!(nested, Some(None));
    assert_eq!(SCHED.with(|s| s.status()), Some(TaskStatus::Inexistent));
}
