use crate::log::Topic;
use futures::future::LocalBoxFuture;
use std::{cell::RefCell, future::Future, rc::Rc, time::Duration};

///
/// TimerId
/// Opaque driver-issued timer handle.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TimerId(pub u64);

/// A repeating task: produces a fresh future on each tick.
pub type IntervalTask = Box<dyn FnMut() -> LocalBoxFuture<'static, ()>>;

///
/// TimerDriver
///
/// Seam to the host event loop's timer facility. The host owns execution:
/// it must run each produced future to completion on its single-threaded
/// executor. A zero-delay one-shot doubles as "spawn this soon", which is
/// how user-driven immediate fetches bypass the poll cadence.
///

pub trait TimerDriver {
    /// Schedule a one-shot task.
    fn set_timer(&self, delay: Duration, task: LocalBoxFuture<'static, ()>) -> TimerId;

    /// Schedule a repeating task.
    fn set_interval(&self, interval: Duration, task: IntervalTask) -> TimerId;

    /// Cancel a previously scheduled timer. Clearing an already-fired
    /// one-shot is a no-op.
    fn clear(&self, id: TimerId);
}

///
/// PollingScheduler
///
/// One recurring refetch timer per view session. `start` runs the task once
/// immediately (zero-delay one-shot), then installs the repeating interval
/// once that first run completes. The slot guard makes `start` idempotent:
/// while a timer is armed, further `start` calls do nothing, so view
/// re-renders can never stack a second cadence.
///
/// `stop` clears the armed timer. It does not interrupt a tick already in
/// flight; discarding that tick's eventual result is the session
/// generation check's job (see `session`).
///

pub struct PollingScheduler {
    driver: Rc<dyn TimerDriver>,
    interval: Duration,
    slot: Rc<RefCell<Option<TimerId>>>,
}

impl PollingScheduler {
    #[must_use]
    pub fn new(driver: Rc<dyn TimerDriver>, interval: Duration) -> Self {
        Self {
            driver,
            interval,
            slot: Rc::new(RefCell::new(None)),
        }
    }

    /// The cadence this scheduler was built with.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// True while a timer (init one-shot or interval) is armed.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.slot.borrow().is_some()
    }

    /// Arm the cadence. Returns false when a timer is already armed.
    ///
    /// The interval is only installed after the immediate first tick
    /// completes, and only if the slot still holds the init timer; a `stop`
    /// racing the first tick therefore wins.
    pub fn start<F, Fut>(&self, task: F) -> bool
    where
        F: FnMut() -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        if self.slot.borrow().is_some() {
            log!(Topic::Scheduler, Debug, "start ignored, timer already armed");
            return false;
        }

        let slot = Rc::clone(&self.slot);
        let driver = Rc::clone(&self.driver);
        let interval = self.interval;

        let task = Rc::new(RefCell::new(task));
        let init_task = Rc::clone(&task);

        let init_id_cell = Rc::new(RefCell::new(None));
        let init_id_cell_task = Rc::clone(&init_id_cell);

        let init_id = self.driver.set_timer(
            Duration::ZERO,
            Box::pin(async move {
                let fut = { (init_task.borrow_mut())() };
                fut.await;

                let Some(init_id) = *init_id_cell_task.borrow() else {
                    return;
                };

                let still_armed = *slot.borrow() == Some(init_id);
                if !still_armed {
                    return;
                }

                let interval_id = driver.set_interval(
                    interval,
                    Box::new(move || {
                        let fut = { (task.borrow_mut())() };
                        Box::pin(fut)
                    }),
                );

                // Atomically replace the slot value and clear the previous
                // timer id, so a stop racing the handover cannot orphan the
                // interval.
                let old = slot.borrow_mut().replace(interval_id);
                if let Some(old_id) = old
                    && old_id != interval_id
                {
                    driver.clear(old_id);
                }
            }),
        );

        *init_id_cell.borrow_mut() = Some(init_id);
        *self.slot.borrow_mut() = Some(init_id);

        log!(
            Topic::Scheduler,
            Info,
            "armed, interval {}s",
            interval.as_secs()
        );

        true
    }

    /// Disarm the cadence. Returns true when a timer was cleared.
    pub fn stop(&self) -> bool {
        let cleared = self
            .slot
            .borrow_mut()
            .take()
            .is_some_and(|id| {
                self.driver.clear(id);
                true
            });

        if cleared {
            log!(Topic::Scheduler, Info, "disarmed");
        }

        cleared
    }
}

///
/// TESTS
///
/// Full cadence behavior is exercised against the manual driver in the
/// integration suite; these cover the slot guard itself.
///
