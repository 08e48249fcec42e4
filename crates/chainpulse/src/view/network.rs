use crate::{
    Error,
    config::Config,
    dto::stats::{NetworkSample, NetworkStats},
    endpoint::NETWORK_STATS,
    fetch::FetchResult,
    log::Topic,
    scheduler::TimerDriver,
    session::ViewSession,
    summary,
    transport::{Transport, get_json},
};
use std::{cell::RefCell, rc::Rc, time::Duration};

///
/// NetworkHeadline
/// The page's headline numbers, taken from the latest sample.
///

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NetworkHeadline {
    pub tps: f64,
    pub avg_processing_time_ms: f64,
    pub active_resources: u64,
    pub pending_intents: u64,
}

///
/// NetworkView
///
/// The network statistics page: polls the network-stats endpoint over the
/// configured window (a week by default, against the overview's day) and
/// derives headline and series summaries from the raw samples.
///

pub struct NetworkView {
    session: Rc<ViewSession>,
    transport: Rc<dyn Transport>,
    url: String,
    series: RefCell<FetchResult<Vec<NetworkSample>>>,
}

impl NetworkView {
    pub fn mount(
        transport: Rc<dyn Transport>,
        driver: Rc<dyn TimerDriver>,
    ) -> Result<Rc<Self>, Error> {
        let cfg = Config::get()?;

        let session = Rc::new(ViewSession::new(
            Rc::clone(&driver),
            Duration::from_secs(cfg.poll_interval_secs),
        ));

        let url = NETWORK_STATS.url(
            &cfg.api_base,
            &[("hours", cfg.network_page_hours.to_string())],
        );

        let view = Rc::new(Self {
            session,
            transport,
            url,
            series: RefCell::new(FetchResult::Pending),
        });

        let tick_view = Rc::clone(&view);
        view.session.scheduler().start(move || {
            let view = Rc::clone(&tick_view);
            async move { view.tick().await }
        });

        Ok(view)
    }

    pub async fn tick(&self) {
        let token = self.session.token();

        let outcome = get_json::<NetworkStats>(&*self.transport, &self.url)
            .await
            .map(|stats| stats.stats);

        if !self.session.is_current(token) {
            log!(Topic::Fetch, Debug, "network: tick for dead session discarded");
            return;
        }

        if let Err(e) = &outcome {
            log!(Topic::Fetch, Warn, "network: fetch failed: {e}");
        }

        self.series.borrow_mut().absorb(outcome);
    }

    #[must_use]
    pub fn series(&self) -> FetchResult<Vec<NetworkSample>> {
        self.series.borrow().clone()
    }

    /// Latest-sample metrics; `None` until the first successful fetch or
    /// when the window came back empty.
    #[must_use]
    pub fn headline(&self) -> Option<NetworkHeadline> {
        let series = self.series.borrow();
        let samples = series.latest()?;

        summary::latest(samples).map(|s| NetworkHeadline {
            tps: s.tps,
            avg_processing_time_ms: s.avg_processing_time_ms,
            active_resources: s.active_resources,
            pending_intents: s.pending_intents,
        })
    }

    /// Mean TPS across the fetched window; 0 when nothing is loaded.
    #[must_use]
    pub fn tps_average(&self) -> f64 {
        self.series
            .borrow()
            .latest()
            .map_or(0.0, |samples| summary::average(samples, |s| s.tps))
    }

    /// Peak TPS across the fetched window; 0 when nothing is loaded.
    #[must_use]
    pub fn tps_peak(&self) -> f64 {
        self.series
            .borrow()
            .latest()
            .map_or(0.0, |samples| summary::peak(samples, |s| s.tps))
    }

    #[must_use]
    pub const fn session(&self) -> &Rc<ViewSession> {
        &self.session
    }

    pub fn unmount(&self) {
        self.session.teardown();
    }
}

///
/// TESTS
///
