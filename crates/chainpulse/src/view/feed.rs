use crate::{
    Error,
    config::Config,
    dto::{
        page::{BlockFeed, IntentFeed, TransactionFeed},
        rows::{BlockRow, IntentRow, TransactionRow},
    },
    endpoint::{BLOCKS, Endpoint, INTENTS, TRANSACTIONS},
    fetch::FetchResult,
    log::Topic,
    scheduler::TimerDriver,
    session::ViewSession,
    transport::{self, FetchError, Transport},
};
use serde_json::Value;
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    time::Duration,
};

///
/// FeedQuery
/// Endpoint + decoder pair for the single-shot row feeds.
///

pub trait FeedQuery: 'static {
    type Row: Clone + 'static;

    fn endpoint() -> &'static Endpoint;

    fn decode(body: Value) -> Result<Vec<Self::Row>, FetchError>;
}

pub struct TransactionsQuery;

impl FeedQuery for TransactionsQuery {
    type Row = TransactionRow;

    fn endpoint() -> &'static Endpoint {
        &TRANSACTIONS
    }

    fn decode(body: Value) -> Result<Vec<TransactionRow>, FetchError> {
        let feed: TransactionFeed = transport::decode(body)?;
        Ok(feed.transactions)
    }
}

pub struct IntentsQuery;

impl FeedQuery for IntentsQuery {
    type Row = IntentRow;

    fn endpoint() -> &'static Endpoint {
        &INTENTS
    }

    fn decode(body: Value) -> Result<Vec<IntentRow>, FetchError> {
        let feed: IntentFeed = transport::decode(body)?;
        Ok(feed.intents)
    }
}

pub struct BlocksQuery;

impl FeedQuery for BlocksQuery {
    type Row = BlockRow;

    fn endpoint() -> &'static Endpoint {
        &BLOCKS
    }

    fn decode(body: Value) -> Result<Vec<BlockRow>, FetchError> {
        let feed: BlockFeed = transport::decode(body)?;
        Ok(feed.blocks)
    }
}

///
/// FeedView
///
/// Single-shot detail pages (transactions, intents, blocks): one fetch of
/// the newest rows at mount time, no poll cadence. `reload` is available
/// for an explicit user refresh and carries the same staleness discipline
/// as the list controller: only the most recently issued load may commit.
///

pub struct FeedView<Q: FeedQuery> {
    session: Rc<ViewSession>,
    transport: Rc<dyn Transport>,
    driver: Rc<dyn TimerDriver>,
    url: String,
    rows: RefCell<FetchResult<Vec<Q::Row>>>,
    issue: Cell<u64>,
}

impl<Q: FeedQuery> FeedView<Q> {
    /// Wire the view and queue the initial load.
    pub fn mount(
        transport: Rc<dyn Transport>,
        driver: Rc<dyn TimerDriver>,
    ) -> Result<Rc<Self>, Error> {
        let cfg = Config::get()?;

        let session = Rc::new(ViewSession::new(
            Rc::clone(&driver),
            Duration::from_secs(cfg.poll_interval_secs),
        ));

        let url = Q::endpoint().url(
            &cfg.api_base,
            &[("per_page", cfg.feed_per_page.to_string())],
        );

        let view = Rc::new(Self {
            session,
            transport,
            driver,
            url,
            rows: RefCell::new(FetchResult::Pending),
            issue: Cell::new(0),
        });

        view.reload();

        Ok(view)
    }

    /// Queue a fetch of the newest rows on the host event loop.
    pub fn reload(self: &Rc<Self>) {
        self.issue.set(self.issue.get() + 1);
        let issue = self.issue.get();

        let this = Rc::clone(self);
        self.driver.set_timer(
            Duration::ZERO,
            Box::pin(async move { this.load(issue).await }),
        );
    }

    /// Run load number `issue` to completion and commit unless superseded.
    async fn load(&self, issue: u64) {
        let token = self.session.token();

        let outcome = match self.transport.get(&self.url).await {
            Ok(body) => Q::decode(body),
            Err(e) => Err(e),
        };

        if !self.session.is_current(token) {
            log!(
                Topic::Fetch,
                Debug,
                "{}: load for dead session discarded",
                Q::endpoint().id
            );
            return;
        }

        if self.issue.get() != issue {
            log!(
                Topic::Fetch,
                Debug,
                "{}: superseded load discarded",
                Q::endpoint().id
            );
            return;
        }

        if let Err(e) = &outcome {
            log!(Topic::Fetch, Warn, "{}: load failed: {e}", Q::endpoint().id);
        }

        self.rows.borrow_mut().absorb(outcome);
    }

    #[must_use]
    pub fn rows(&self) -> FetchResult<Vec<Q::Row>> {
        self.rows.borrow().clone()
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
