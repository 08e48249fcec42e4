//!
//! Per-page view sessions: each submodule wires one dashboard page's
//! lifecycle (mount, poll or single-shot load, unmount) out of the shared
//! building blocks in `scheduler`, `session`, `fetch`, and `pager`.
//!

pub mod feed;
pub mod network;
pub mod overview;
pub mod resources;
