use crate::{
    Error,
    config::Config,
    dto::stats::{IntentStats, NetworkStats, ResourceStats, TransactionStats},
    endpoint::{INTENT_STATS, NETWORK_STATS, RESOURCE_STATS, TRANSACTION_STATS},
    fetch::FetchResult,
    log::Topic,
    scheduler::TimerDriver,
    session::ViewSession,
    summary,
    transport::{Transport, get_json},
};
use std::{cell::RefCell, rc::Rc, time::Duration};

///
/// OverviewSnapshot
///
/// The dashboard page's committed state: one slot per stats endpoint.
/// A refetch cycle updates all four slots in a single borrow scope, only
/// after every request of the cycle has settled, so a renderer can never
/// observe a half-updated mix of old and new cycles.
///

#[derive(Clone, Debug, Default)]
pub struct OverviewSnapshot {
    pub resources: FetchResult<ResourceStats>,
    pub transactions: FetchResult<TransactionStats>,
    pub intents: FetchResult<IntentStats>,
    pub network: FetchResult<NetworkStats>,
}

impl OverviewSnapshot {
    /// True until the first cycle has produced something to show.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.resources.is_loading()
            && self.transactions.is_loading()
            && self.intents.is_loading()
            && self.network.is_loading()
    }

    /// Headline numbers derived from the raw distributions. Absent data
    /// derives to zero / `None`; placeholder substitution is a rendering
    /// concern, not part of this contract.
    #[must_use]
    pub fn cards(&self) -> OverviewCards {
        let total_resources = self
            .resources
            .latest()
            .map_or(0, |s| summary::count_total(&s.distribution_by_kind, |k| k.count));

        let total_transactions = self
            .transactions
            .latest()
            .map_or(0, |s| summary::count_total(&s.daily_volume, |d| d.count));

        let total_intents = self
            .intents
            .latest()
            .map_or(0, |s| summary::count_total(&s.distribution_by_status, |c| c.count));

        let current_block = self
            .network
            .latest()
            .and_then(|s| summary::latest(&s.stats))
            .map(|sample| sample.block_height);

        OverviewCards {
            total_resources,
            total_transactions,
            total_intents,
            current_block,
        }
    }
}

///
/// OverviewCards
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OverviewCards {
    pub total_resources: u64,
    pub total_transactions: u64,
    pub total_intents: u64,
    pub current_block: Option<u64>,
}

///
/// OverviewView
///
/// The dashboard page: polls the four stats endpoints on the configured
/// cadence and commits each cycle atomically into an `OverviewSnapshot`.
///

pub struct OverviewView {
    session: Rc<ViewSession>,
    transport: Rc<dyn Transport>,
    api_base: String,
    network_hours: u32,
    snapshot: RefCell<OverviewSnapshot>,
}

impl OverviewView {
    /// Wire the view and arm its poll cadence; the first cycle runs
    /// immediately.
    pub fn mount(
        transport: Rc<dyn Transport>,
        driver: Rc<dyn TimerDriver>,
    ) -> Result<Rc<Self>, Error> {
        let cfg = Config::get()?;

        let session = Rc::new(ViewSession::new(
            Rc::clone(&driver),
            Duration::from_secs(cfg.poll_interval_secs),
        ));

        let view = Rc::new(Self {
            session,
            transport,
            api_base: cfg.api_base.clone(),
            network_hours: cfg.overview_network_hours,
            snapshot: RefCell::new(OverviewSnapshot::default()),
        });

        let tick_view = Rc::clone(&view);
        view.session.scheduler().start(move || {
            let view = Rc::clone(&tick_view);
            async move { view.tick().await }
        });

        Ok(view)
    }

    /// One refetch cycle: all four requests issued concurrently, committed
    /// together once every one of them has settled. A failed endpoint only
    /// degrades its own slot.
    pub async fn tick(&self) {
        let token = self.session.token();

        let resources_url = RESOURCE_STATS.url(&self.api_base, &[]);
        let transactions_url = TRANSACTION_STATS.url(&self.api_base, &[]);
        let intents_url = INTENT_STATS.url(&self.api_base, &[]);
        let network_url =
            NETWORK_STATS.url(&self.api_base, &[("hours", self.network_hours.to_string())]);

        let (resources, transactions, intents, network) = futures::join!(
            get_json::<ResourceStats>(&*self.transport, &resources_url),
            get_json::<TransactionStats>(&*self.transport, &transactions_url),
            get_json::<IntentStats>(&*self.transport, &intents_url),
            get_json::<NetworkStats>(&*self.transport, &network_url),
        );

        if !self.session.is_current(token) {
            log!(Topic::Fetch, Debug, "overview: cycle for dead session discarded");
            return;
        }

        for err in [
            resources.as_ref().err(),
            transactions.as_ref().err(),
            intents.as_ref().err(),
            network.as_ref().err(),
        ]
        .into_iter()
        .flatten()
        {
            log!(Topic::Fetch, Warn, "overview: endpoint failed: {err}");
        }

        // single borrow scope = atomic commit
        let mut snapshot = self.snapshot.borrow_mut();
        snapshot.resources.absorb(resources);
        snapshot.transactions.absorb(transactions);
        snapshot.intents.absorb(intents);
        snapshot.network.absorb(network);

        log!(Topic::Fetch, Debug, "overview: cycle committed");
    }

    #[must_use]
    pub fn snapshot(&self) -> OverviewSnapshot {
        self.snapshot.borrow().clone()
    }

    #[must_use]
    pub fn cards(&self) -> OverviewCards {
        self.snapshot.borrow().cards()
    }

    #[must_use]
    pub const fn session(&self) -> &Rc<ViewSession> {
        &self.session
    }

    /// Stop polling and invalidate any cycle still in flight.
    pub fn unmount(&self) {
        self.session.teardown();
    }
}

///
/// TESTS
///
