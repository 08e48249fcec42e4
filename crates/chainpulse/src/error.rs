use crate::{config::ConfigError, transport::FetchError};
use thiserror::Error as ThisError;

///
/// Error
///
/// Top-level error for the sync core. Fetch failures are normally contained
/// inside a `FetchResult` and never surface here; this type covers the
/// infrastructure paths (configuration, view wiring) where a caller gets a
/// hard `Result`.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}
