//! Cadence behavior of the polling scheduler against the manual driver.

use chainpulse::scheduler::PollingScheduler;
use chainpulse_testkit::ManualTimerDriver;
use std::{cell::Cell, rc::Rc, time::Duration};

fn counting_scheduler(
    driver: &Rc<ManualTimerDriver>,
) -> (PollingScheduler, Rc<Cell<u32>>) {
    let scheduler = PollingScheduler::new(driver.clone(), Duration::from_secs(30));
    let count = Rc::new(Cell::new(0u32));
    (scheduler, count)
}

fn start_counting(scheduler: &PollingScheduler, count: &Rc<Cell<u32>>) -> bool {
    let count = Rc::clone(count);
    scheduler.start(move || {
        let count = Rc::clone(&count);
        async move { count.set(count.get() + 1) }
    })
}

#[test]
fn first_tick_is_immediate_then_interval_takes_over() {
    let driver = Rc::new(ManualTimerDriver::new());
    let (scheduler, count) = counting_scheduler(&driver);

    assert!(start_counting(&scheduler, &count));
    assert_eq!(count.get(), 0);

    // the registration-time tick
    driver.run_one_shots();
    assert_eq!(count.get(), 1);
    assert_eq!(driver.active_intervals(), 1);

    // subsequent ticks ride the interval
    driver.fire_intervals();
    driver.fire_intervals();
    driver.fire_intervals();
    assert_eq!(count.get(), 4);
}

#[test]
fn double_start_yields_exactly_one_timer() {
    let driver = Rc::new(ManualTimerDriver::new());
    let (scheduler, count) = counting_scheduler(&driver);

    assert!(start_counting(&scheduler, &count));
    assert!(!start_counting(&scheduler, &count));

    driver.run_one_shots();
    assert!(!start_counting(&scheduler, &count));

    assert_eq!(driver.active_intervals(), 1);

    // tick count over a fixed number of firings proves a single cadence
    driver.fire_intervals();
    driver.fire_intervals();
    assert_eq!(count.get(), 3);
    assert_eq!(driver.total_interval_ticks(), 2);
}

#[test]
fn stop_before_the_first_tick_prevents_everything() {
    let driver = Rc::new(ManualTimerDriver::new());
    let (scheduler, count) = counting_scheduler(&driver);

    start_counting(&scheduler, &count);
    assert!(scheduler.stop());

    assert_eq!(driver.run_one_shots(), 0);
    assert_eq!(driver.active_intervals(), 0);
    assert_eq!(count.get(), 0);
}

#[test]
fn stop_after_ticks_silences_the_interval() {
    let driver = Rc::new(ManualTimerDriver::new());
    let (scheduler, count) = counting_scheduler(&driver);

    start_counting(&scheduler, &count);
    driver.run_one_shots();
    driver.fire_intervals();
    assert_eq!(count.get(), 2);

    assert!(scheduler.stop());
    assert_eq!(driver.fire_intervals(), 0);
    assert_eq!(count.get(), 2);
}

#[test]
fn restart_after_stop_builds_a_fresh_cadence() {
    let driver = Rc::new(ManualTimerDriver::new());
    let (scheduler, count) = counting_scheduler(&driver);

    start_counting(&scheduler, &count);
    driver.run_one_shots();
    scheduler.stop();

    assert!(start_counting(&scheduler, &count));
    driver.run_one_shots();
    driver.fire_intervals();

    assert_eq!(count.get(), 3);
    assert_eq!(driver.active_intervals(), 1);
}
