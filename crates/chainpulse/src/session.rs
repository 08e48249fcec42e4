use crate::{
    log::Topic,
    scheduler::{PollingScheduler, TimerDriver},
};
use std::{cell::Cell, rc::Rc, time::Duration};

///
/// SessionToken
///
/// Issued to every fetch at launch time and compared at resolution time.
/// A token from a torn-down session never matches, so a slow response
/// resolving after unmount is dropped instead of applied.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SessionToken {
    generation: u64,
}

///
/// ViewSession
///
/// Per-page lifecycle root: owns the page's one polling scheduler and the
/// generation counter that invalidates in-flight work. Created on view
/// mount, torn down on unmount. State is owned, not global; two mounted
/// pages never share a session.
///

pub struct ViewSession {
    scheduler: PollingScheduler,
    generation: Cell<u64>,
    alive: Cell<bool>,
}

impl ViewSession {
    #[must_use]
    pub fn new(driver: Rc<dyn TimerDriver>, interval: Duration) -> Self {
        Self {
            scheduler: PollingScheduler::new(driver, interval),
            generation: Cell::new(0),
            alive: Cell::new(true),
        }
    }

    #[must_use]
    pub const fn scheduler(&self) -> &PollingScheduler {
        &self.scheduler
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive.get()
    }

    /// Tag for an in-flight piece of work issued now.
    #[must_use]
    pub fn token(&self) -> SessionToken {
        SessionToken {
            generation: self.generation.get(),
        }
    }

    /// Whether work tagged with `token` may still commit its result.
    #[must_use]
    pub fn is_current(&self, token: SessionToken) -> bool {
        self.alive.get() && self.generation.get() == token.generation
    }

    /// Stop the scheduler and invalidate everything in flight. Idempotent.
    pub fn teardown(&self) {
        if !self.alive.get() {
            return;
        }

        self.alive.set(false);
        self.generation.set(self.generation.get().wrapping_add(1));
        self.scheduler.stop();

        log!(Topic::Session, Info, "torn down");
    }
}

///
/// TESTS
///
