use chainpulse::scheduler::{IntervalTask, TimerDriver, TimerId};
use futures::future::LocalBoxFuture;
use std::{
    cell::{Cell, RefCell},
    collections::{HashMap, VecDeque},
    time::Duration,
};

struct IntervalEntry {
    interval: Duration,
    task: Option<IntervalTask>,
    ticks: u64,
}

///
/// ManualTimerDriver
///
/// A timer driver where nothing fires until the test says so. One-shots
/// queue in scheduling order; intervals tick only on `fire_intervals`.
/// Scheduled tasks may themselves schedule or clear timers while running;
/// the driver never holds a borrow across task execution.
///

#[derive(Default)]
pub struct ManualTimerDriver {
    next_id: Cell<u64>,
    one_shots: RefCell<VecDeque<(TimerId, LocalBoxFuture<'static, ()>)>>,
    intervals: RefCell<HashMap<u64, IntervalEntry>>,
    order: RefCell<Vec<u64>>,
}

impl ManualTimerDriver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn issue_id(&self) -> TimerId {
        self.next_id.set(self.next_id.get() + 1);
        TimerId(self.next_id.get())
    }

    /// Run every queued one-shot to completion, in scheduling order,
    /// including one-shots queued by the tasks themselves. Returns how
    /// many ran.
    pub fn run_one_shots(&self) -> usize {
        let mut ran = 0;

        loop {
            let task = self.one_shots.borrow_mut().pop_front();
            let Some((_, task)) = task else { break };

            futures::executor::block_on(task);
            ran += 1;
        }

        ran
    }

    /// Drain queued one-shots without running them, for tests that need to
    /// interleave them on their own executor (e.g. against deferred
    /// transport responses).
    #[must_use]
    pub fn take_one_shots(&self) -> Vec<LocalBoxFuture<'static, ()>> {
        self.one_shots
            .borrow_mut()
            .drain(..)
            .map(|(_, task)| task)
            .collect()
    }

    /// Produce one tick future per armed interval, in arming order,
    /// without running them.
    #[must_use]
    pub fn take_interval_ticks(&self) -> Vec<LocalBoxFuture<'static, ()>> {
        let ids: Vec<u64> = self.order.borrow().clone();
        let mut futures = Vec::new();

        for id in ids {
            let mut intervals = self.intervals.borrow_mut();
            let Some(entry) = intervals.get_mut(&id) else {
                continue;
            };

            // take the task out, call it, put it straight back; producing
            // the future is synchronous
            let Some(mut task) = entry.task.take() else {
                continue;
            };
            let fut = task();
            entry.task = Some(task);
            entry.ticks += 1;

            drop(intervals);
            futures.push(fut);
        }

        futures
    }

    /// Tick every armed interval once, running each tick to completion.
    /// Returns how many ticked.
    pub fn fire_intervals(&self) -> usize {
        let ticks = self.take_interval_ticks();
        let fired = ticks.len();

        for fut in ticks {
            futures::executor::block_on(fut);
        }

        fired
    }

    #[must_use]
    pub fn pending_one_shots(&self) -> usize {
        self.one_shots.borrow().len()
    }

    #[must_use]
    pub fn active_intervals(&self) -> usize {
        self.intervals.borrow().len()
    }

    /// Total ticks fired across all intervals ever armed on this driver.
    #[must_use]
    pub fn total_interval_ticks(&self) -> u64 {
        self.intervals.borrow().values().map(|e| e.ticks).sum()
    }

    /// The cadence of the single armed interval, if exactly one is armed.
    #[must_use]
    pub fn sole_interval(&self) -> Option<Duration> {
        let intervals = self.intervals.borrow();
        if intervals.len() == 1 {
            intervals.values().next().map(|e| e.interval)
        } else {
            None
        }
    }
}

impl TimerDriver for ManualTimerDriver {
    fn set_timer(&self, _delay: Duration, task: LocalBoxFuture<'static, ()>) -> TimerId {
        let id = self.issue_id();
        self.one_shots.borrow_mut().push_back((id, task));
        id
    }

    fn set_interval(&self, interval: Duration, task: IntervalTask) -> TimerId {
        let id = self.issue_id();

        self.intervals.borrow_mut().insert(
            id.0,
            IntervalEntry {
                interval,
                task: Some(task),
                ticks: 0,
            },
        );
        self.order.borrow_mut().push(id.0);

        id
    }

    fn clear(&self, id: TimerId) {
        self.one_shots.borrow_mut().retain(|(t, _)| *t != id);
        self.intervals.borrow_mut().remove(&id.0);
        self.order.borrow_mut().retain(|t| *t != id.0);
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn one_shots_run_in_scheduling_order() {
        let driver = ManualTimerDriver::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        for n in 1..=3 {
            let seen = Rc::clone(&seen);
            driver.set_timer(
                Duration::ZERO,
                Box::pin(async move { seen.borrow_mut().push(n) }),
            );
        }

        assert_eq!(driver.run_one_shots(), 3);
        assert_eq!(*seen.borrow(), vec![1, 2, 3]);
        assert_eq!(driver.pending_one_shots(), 0);
    }

    #[test]
    fn a_task_may_schedule_another_one_shot() {
        let driver = Rc::new(ManualTimerDriver::new());
        let seen = Rc::new(RefCell::new(Vec::new()));

        let inner_driver = Rc::clone(&driver);
        let inner_seen = Rc::clone(&seen);
        driver.set_timer(
            Duration::ZERO,
            Box::pin(async move {
                inner_seen.borrow_mut().push("outer");
                let seen = Rc::clone(&inner_seen);
                inner_driver.set_timer(
                    Duration::ZERO,
                    Box::pin(async move { seen.borrow_mut().push("inner") }),
                );
            }),
        );

        assert_eq!(driver.run_one_shots(), 2);
        assert_eq!(*seen.borrow(), vec!["outer", "inner"]);
    }

    #[test]
    fn intervals_tick_only_when_fired() {
        let driver = ManualTimerDriver::new();
        let ticks = Rc::new(Cell::new(0u32));

        let t = Rc::clone(&ticks);
        driver.set_interval(
            Duration::from_secs(30),
            Box::new(move || {
                let t = Rc::clone(&t);
                Box::pin(async move { t.set(t.get() + 1) })
            }),
        );

        assert_eq!(ticks.get(), 0);
        driver.fire_intervals();
        driver.fire_intervals();
        assert_eq!(ticks.get(), 2);
        assert_eq!(driver.total_interval_ticks(), 2);
    }

    #[test]
    fn cleared_timers_never_fire() {
        let driver = ManualTimerDriver::new();
        let fired = Rc::new(Cell::new(false));

        let f = Rc::clone(&fired);
        let shot = driver.set_timer(
            Duration::ZERO,
            Box::pin(async move { f.set(true) }),
        );
        let f = Rc::clone(&fired);
        let interval = driver.set_interval(
            Duration::from_secs(1),
            Box::new(move || {
                let f = Rc::clone(&f);
                Box::pin(async move { f.set(true) })
            }),
        );

        driver.clear(shot);
        driver.clear(interval);

        assert_eq!(driver.run_one_shots(), 0);
        assert_eq!(driver.fire_intervals(), 0);
        assert!(!fired.get());
        assert_eq!(driver.active_intervals(), 0);
    }
}
