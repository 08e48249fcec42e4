use crate::{
    dto::page::PageMeta,
    endpoint::Endpoint,
    fetch::FetchResult,
    log::Topic,
    scheduler::TimerDriver,
    session::{SessionToken, ViewSession},
    transport::{FetchError, Transport},
};
use serde_json::Value;
use std::{cell::RefCell, collections::BTreeMap, rc::Rc, time::Duration};

///
/// FilterState
///
/// Server-side filter criteria for one list view. Keys are the fixed set
/// the endpoint accepts; a key that is not present is unconstrained. Keys
/// iterate in lexicographic order, which keeps request URLs deterministic.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FilterState {
    values: BTreeMap<&'static str, String>,
}

impl FilterState {
    /// Set or clear one criterion. An empty value means unconstrained and
    /// removes the key. Returns true when the state actually changed.
    pub fn set(&mut self, key: &'static str, value: impl Into<String>) -> bool {
        let value = value.into();

        if value.is_empty() {
            self.values.remove(key).is_some()
        } else {
            self.values.insert(key, value.clone()) != Some(value)
        }
    }

    /// Drop every criterion. Returns true when any was set.
    pub fn clear(&mut self) -> bool {
        let had_any = !self.values.is_empty();
        self.values.clear();
        had_any
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.values.is_empty()
    }

    /// Constrained entries, in key order.
    pub fn pairs(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

///
/// PaginationState
///
/// Invariants: `page >= 1`, `per_page >= 1`, `page <= max(total_pages, 1)`.
/// `total` and `total_pages` are whatever the server last reported.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PaginationState {
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl PaginationState {
    #[must_use]
    pub const fn new(per_page: u32) -> Self {
        Self {
            page: 1,
            per_page,
            total: 0,
            total_pages: 0,
        }
    }

    /// Highest page a caller may select right now.
    #[must_use]
    pub const fn last_page(&self) -> u32 {
        if self.total_pages == 0 { 1 } else { self.total_pages }
    }

    /// Overwrite totals from a server response. The current page is left
    /// alone unless it now overshoots the reported page count, in which
    /// case it is clamped down (never below 1).
    pub fn absorb_meta(&mut self, meta: PageMeta) {
        self.total = meta.total;
        self.total_pages = meta.pages;

        if self.page > self.last_page() {
            self.page = self.last_page();
        }
    }
}

///
/// PageEnvelope
/// Decoded payload of one list fetch: the rows plus the server's
/// pagination envelope.
///

#[derive(Clone, Debug)]
pub struct PageEnvelope<T> {
    pub rows: Vec<T>,
    pub meta: PageMeta,
}

///
/// PagedQuery
///
/// Binds an endpoint to its response decoder. Each list page implements
/// this once; the controller below is generic over it, so there is exactly
/// one filter/pagination state machine in the codebase.
///

pub trait PagedQuery: 'static {
    type Row: Clone + 'static;

    fn endpoint() -> &'static Endpoint;

    fn decode(body: Value) -> Result<PageEnvelope<Self::Row>, FetchError>;
}

///
/// ListState
///

struct ListState<T> {
    filters: FilterState,
    page: PaginationState,
    rows: FetchResult<Vec<T>>,
    /// Issue number of the most recently launched fetch. Only the fetch
    /// carrying this number may commit; anything older was launched for a
    /// filter/page state that has since changed.
    issue: u64,
}

///
/// LaunchedFetch
/// Tag captured when a fetch is launched, compared at resolution.
///

struct LaunchedFetch {
    issue: u64,
    token: SessionToken,
    url: String,
}

///
/// ListController
///
/// Deterministic state machine over `(FilterState, page)`:
///
/// - `set_filter` / `clear_filters` reset the page to 1 and trigger an
///   immediate fetch, bypassing the poll cadence.
/// - `set_page` clamps into `[1, max(total_pages, 1)]`; an out-of-range
///   request moves to the nearest valid page. A transition that lands on
///   the current page is suppressed entirely.
/// - Unchanged filter values are suppressed too (no duplicate fetch).
///
/// Every launched fetch is tagged with the session token and an issue
/// number; a result whose tag is no longer current is discarded, so a slow
/// stale response can never overwrite a newer user-driven view.
///

pub struct ListController<Q: PagedQuery> {
    session: Rc<ViewSession>,
    transport: Rc<dyn Transport>,
    driver: Rc<dyn TimerDriver>,
    api_base: String,
    state: Rc<RefCell<ListState<Q::Row>>>,
}

impl<Q: PagedQuery> Clone for ListController<Q> {
    fn clone(&self) -> Self {
        Self {
            session: Rc::clone(&self.session),
            transport: Rc::clone(&self.transport),
            driver: Rc::clone(&self.driver),
            api_base: self.api_base.clone(),
            state: Rc::clone(&self.state),
        }
    }
}

impl<Q: PagedQuery> ListController<Q> {
    #[must_use]
    pub fn new(
        session: Rc<ViewSession>,
        transport: Rc<dyn Transport>,
        driver: Rc<dyn TimerDriver>,
        api_base: impl Into<String>,
        per_page: u32,
    ) -> Self {
        Self {
            session,
            transport,
            driver,
            api_base: api_base.into(),
            state: Rc::new(RefCell::new(ListState {
                filters: FilterState::default(),
                page: PaginationState::new(per_page),
                rows: FetchResult::Pending,
                issue: 0,
            })),
        }
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Update one filter criterion. Resets the page to 1 and fetches
    /// immediately. A key the endpoint does not accept, or a value equal to
    /// the current one, is ignored.
    pub fn set_filter(&self, key: &'static str, value: impl Into<String>) -> bool {
        if !Q::endpoint().accepts_filter(key) {
            log!(
                Topic::Pager,
                Warn,
                "{}: unknown filter key '{key}' ignored",
                Q::endpoint().id
            );
            return false;
        }

        let changed = {
            let mut st = self.state.borrow_mut();
            if st.filters.set(key, value) {
                st.page.page = 1;
                true
            } else {
                false
            }
        };

        if changed {
            self.spawn_refresh();
        }

        changed
    }

    /// Reset every filter to unconstrained and the page to 1, then fetch
    /// immediately. Suppressed when already unfiltered on page 1.
    pub fn clear_filters(&self) -> bool {
        let changed = {
            let mut st = self.state.borrow_mut();
            let filters_changed = st.filters.clear();
            let page_changed = st.page.page != 1;
            st.page.page = 1;
            filters_changed || page_changed
        };

        if changed {
            self.spawn_refresh();
        }

        changed
    }

    /// Move to page `n`, clamped into `[1, max(total_pages, 1)]`, and fetch
    /// immediately. Returns false (no fetch) when the clamped target is the
    /// page already shown.
    pub fn set_page(&self, n: u32) -> bool {
        let changed = {
            let mut st = self.state.borrow_mut();
            let target = n.clamp(1, st.page.last_page());
            if target == st.page.page {
                false
            } else {
                st.page.page = target;
                true
            }
        };

        if changed {
            self.spawn_refresh();
        }

        changed
    }

    /// Change the page size. Resets the page to 1 and fetches immediately.
    pub fn set_per_page(&self, per_page: u32) -> bool {
        if per_page == 0 {
            return false;
        }

        let changed = {
            let mut st = self.state.borrow_mut();
            if st.page.per_page == per_page {
                false
            } else {
                st.page.per_page = per_page;
                st.page.page = 1;
                true
            }
        };

        if changed {
            self.spawn_refresh();
        }

        changed
    }

    // ------------------------------------------------------------------
    // Fetching
    // ------------------------------------------------------------------

    /// Run one fetch for the current filter/page state. This is what both
    /// the poll tick and the immediate transitions execute.
    pub async fn refresh(&self) {
        let launched = self.launch();

        let outcome = match self.transport.get(&launched.url).await {
            Ok(body) => Q::decode(body),
            Err(e) => Err(e),
        };

        self.resolve(&launched, outcome);
    }

    /// Queue a refresh on the host event loop (zero-delay one-shot), so
    /// transitions stay synchronous.
    fn spawn_refresh(&self) {
        let this = self.clone();
        self.driver.set_timer(
            Duration::ZERO,
            Box::pin(async move { this.refresh().await }),
        );
    }

    /// Snapshot the request for the current state and bump the issue
    /// number, invalidating any fetch still in flight.
    fn launch(&self) -> LaunchedFetch {
        let mut st = self.state.borrow_mut();
        st.issue += 1;

        let mut query: Vec<(&str, String)> = st
            .filters
            .pairs()
            .map(|(k, v)| (k, v.to_string()))
            .collect();
        query.push(("page", st.page.page.to_string()));
        query.push(("per_page", st.page.per_page.to_string()));

        LaunchedFetch {
            issue: st.issue,
            token: self.session.token(),
            url: Q::endpoint().url(&self.api_base, &query),
        }
    }

    /// Commit a settled fetch, unless its tag has gone stale.
    fn resolve(
        &self,
        launched: &LaunchedFetch,
        outcome: Result<PageEnvelope<Q::Row>, FetchError>,
    ) {
        if !self.session.is_current(launched.token) {
            log!(
                Topic::Pager,
                Debug,
                "{}: result for dead session discarded",
                Q::endpoint().id
            );
            return;
        }

        let mut st = self.state.borrow_mut();
        if st.issue != launched.issue {
            log!(
                Topic::Pager,
                Debug,
                "{}: stale result (issue {} < {}) discarded",
                Q::endpoint().id,
                launched.issue,
                st.issue
            );
            return;
        }

        match outcome {
            Ok(envelope) => {
                st.rows.absorb(Ok(envelope.rows));
                st.page.absorb_meta(envelope.meta);
                log!(
                    Topic::Pager,
                    Debug,
                    "{}: page {}/{} committed",
                    Q::endpoint().id,
                    st.page.page,
                    st.page.last_page()
                );
            }
            Err(e) => {
                log!(Topic::Pager, Warn, "{}: fetch failed: {e}", Q::endpoint().id);
                st.rows.absorb(Err(e));
            }
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[must_use]
    pub fn rows(&self) -> FetchResult<Vec<Q::Row>> {
        self.state.borrow().rows.clone()
    }

    #[must_use]
    pub fn filters(&self) -> FilterState {
        self.state.borrow().filters.clone()
    }

    #[must_use]
    pub fn pagination(&self) -> PaginationState {
        self.state.borrow().page
    }
}

///
/// TESTS
///
/// The launch/resolve split keeps interleavings explicit here; the full
/// async path (deferred transports, real spawns) is covered by the
/// integration suite.
///
