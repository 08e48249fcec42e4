use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error as ThisError;

///
/// FetchError
///
/// Per-endpoint failure taxonomy. A fetch error never crosses the join
/// boundary of a refetch cycle; it lands in that endpoint's `FetchResult`
/// and leaves sibling endpoints untouched.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum FetchError {
    /// The request could not be sent or timed out.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("http status {0}")]
    Http(u16),

    /// The body was not valid for the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
}

///
/// Transport
///
/// Seam to the host HTTP stack. The core only ever issues GET requests and
/// only ever consumes JSON bodies, so the surface is a single method. The
/// implementation is expected to map its own failure modes onto the
/// `FetchError` taxonomy (non-2xx to `Http`, unreachable/timeout to
/// `Network`, unparseable body to `Decode`).
///
/// Implementations must not retry; the next scheduled tick is the retry
/// mechanism.
///

#[async_trait(?Send)]
pub trait Transport {
    async fn get(&self, path_and_query: &str) -> Result<Value, FetchError>;
}

/// Perform a GET and deserialize the JSON response into `T`.
/// Returns `Decode` when the body does not match the expected shape.
pub async fn get_json<T: DeserializeOwned>(
    transport: &dyn Transport,
    path_and_query: &str,
) -> Result<T, FetchError> {
    let body = transport.get(path_and_query).await?;

    serde_json::from_value(body).map_err(|e| FetchError::Decode(e.to_string()))
}

/// Decode an already-fetched JSON body into `T`.
pub fn decode<T: DeserializeOwned>(body: Value) -> Result<T, FetchError> {
    serde_json::from_value(body).map_err(|e| FetchError::Decode(e.to_string()))
}

///
/// TESTS
///
