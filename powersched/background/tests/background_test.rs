//! Background loop tests

use std::sync::atomic::{AtomicU32, Ordering};

use hal::mock::MockDelay;
use powersched_background::{BackgroundTask, DEFAULT_SUSPEND_MS};
use powersched_core::{SharedF32, NO_VALUE};

#[test]
fn default_suspend_interval() {
    fn idle() {}

    let task = BackgroundTask::new(idle, MockDelay::new());
    assert_eq!(task.suspend_ms(), DEFAULT_SUSPEND_MS);
    assert_eq!(task.suspend_ms(), 100);
    assert_eq!(task.iterations(), 0);
}

#[test]
fn each_iteration_runs_body_then_suspends() {
    static RUNS: AtomicU32 = AtomicU32::new(0);
    fn body() {
        RUNS.fetch_add(1, Ordering::SeqCst);
    }

    let mut task = BackgroundTask::new(body, MockDelay::new()).with_suspend_ms(20);
    for _ in 0..3 {
        task.run_once();
    }

    assert_eq!(RUNS.load(Ordering::SeqCst), 3);
    assert_eq!(task.iterations(), 3);
    assert_eq!(task.delay().suspensions(), 3);
    assert_eq!(task.delay().total_ms(), 60);
}

#[test]
fn reads_values_published_by_control_task() {
    static MEASURED: SharedF32 = SharedF32::new(NO_VALUE);
    static REPORTED: SharedF32 = SharedF32::new(0.0);
    fn report() {
        REPORTED.store(MEASURED.load());
    }

    let mut task = BackgroundTask::new(report, MockDelay::new());
    task.run_once();
    assert_eq!(REPORTED.load(), NO_VALUE);

    // Written from interrupt context between two background iterations
    MEASURED.update_if_valid(11.5);
    task.run_once();
    assert_eq!(REPORTED.load(), 11.5);
    assert_eq!(task.delay().total_ms(), 200);
}
