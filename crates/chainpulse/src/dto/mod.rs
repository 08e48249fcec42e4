//!
//! Wire contracts for the analytics endpoints.
//!
//! Shapes mirror the server responses verbatim; every struct derives both
//! `Deserialize` (decode path) and `Serialize` (test builders). Unknown
//! fields are ignored so server-side additions never break the decode path.
//!

pub mod page;
pub mod rows;
pub mod stats;

///
/// PRELUDE
///

pub mod prelude {
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
}
