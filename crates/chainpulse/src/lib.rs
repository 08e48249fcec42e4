//!
//! Chainpulse — client-side data synchronization core for a chain
//! analytics dashboard.
//!
//! The crate owns the part of a dashboard that is easy to get wrong:
//! polling several endpoints on a cadence, committing each refetch cycle
//! atomically so a renderer never sees a half-updated view, driving
//! server-side filtering/pagination as a deterministic state machine, and
//! deriving summary metrics from raw series.
//!
//! Rendering, routing, and the HTTP stack live outside; the host plugs in
//! via two seams: [`transport::Transport`] (async `get(path) -> JSON`) and
//! [`scheduler::TimerDriver`] (the event loop's timer facility).
//!
//! Execution is single-threaded and cooperative. There are no locks;
//! correctness across racing fetches comes from session generations and
//! per-fetch issue tags, checked at resolution time.
//!

#[macro_use]
pub mod log;

pub mod config;
pub mod dto;
pub mod endpoint;
pub mod error;
pub mod fetch;
pub mod pager;
pub mod scheduler;
pub mod session;
pub mod summary;
pub mod transport;
pub mod view;

pub use error::Error;

// -----------------------------------------------------------------------------
// Constants
// -----------------------------------------------------------------------------

pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// -----------------------------------------------------------------------------
// Prelude
// -----------------------------------------------------------------------------

///
/// Opinionated prelude for dashboard embedders: the seams to implement,
/// the views to mount, and the result types they hand back.
///

pub mod prelude {
    pub use crate::{
        Error,
        config::Config,
        fetch::FetchResult,
        pager::{FilterState, ListController, PaginationState},
        scheduler::{PollingScheduler, TimerDriver, TimerId},
        session::ViewSession,
        transport::{FetchError, Transport},
        view::{
            feed::{BlocksQuery, FeedView, IntentsQuery, TransactionsQuery},
            network::NetworkView,
            overview::OverviewView,
            resources::ResourcesView,
        },
    };
}
