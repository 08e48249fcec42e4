use async_trait::async_trait;
use chainpulse::transport::{FetchError, Transport};
use futures::channel::oneshot;
use serde_json::Value;
use std::{
    cell::RefCell,
    collections::{HashMap, VecDeque},
};

enum Scripted {
    Ready(Result<Value, FetchError>),
    Deferred(oneshot::Receiver<Result<Value, FetchError>>),
}

///
/// DeferredResponse
///
/// Handle to a response the test resolves by hand, for forcing a specific
/// settle order between racing fetches. Dropping it unresolved settles the
/// request as a network error.
///

pub struct DeferredResponse(oneshot::Sender<Result<Value, FetchError>>);

impl DeferredResponse {
    pub fn resolve(self, body: Value) {
        let _ = self.0.send(Ok(body));
    }

    pub fn fail(self, error: FetchError) {
        let _ = self.0.send(Err(error));
    }
}

///
/// ScriptedTransport
///
/// Per-path queues of canned outcomes, consumed in order. A request for a
/// path with an empty queue settles as a network error, so a test that
/// under-scripts fails loudly instead of hanging.
///

#[derive(Default)]
pub struct ScriptedTransport {
    scripts: RefCell<HashMap<String, VecDeque<Scripted>>>,
    requests: RefCell<Vec<String>>,
}

impl ScriptedTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful JSON response for `path_and_query`.
    pub fn respond(&self, path_and_query: impl Into<String>, body: Value) {
        self.scripts
            .borrow_mut()
            .entry(path_and_query.into())
            .or_default()
            .push_back(Scripted::Ready(Ok(body)));
    }

    /// Queue a failure for `path_and_query`.
    pub fn fail(&self, path_and_query: impl Into<String>, error: FetchError) {
        self.scripts
            .borrow_mut()
            .entry(path_and_query.into())
            .or_default()
            .push_back(Scripted::Ready(Err(error)));
    }

    /// Queue a response the test resolves manually via the returned handle.
    /// The matching request stays pending until then.
    pub fn defer(&self, path_and_query: impl Into<String>) -> DeferredResponse {
        let (tx, rx) = oneshot::channel();

        self.scripts
            .borrow_mut()
            .entry(path_and_query.into())
            .or_default()
            .push_back(Scripted::Deferred(rx));

        DeferredResponse(tx)
    }

    /// Every request issued so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    /// How many requests were issued for exactly `path_and_query`.
    #[must_use]
    pub fn request_count(&self, path_and_query: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.as_str() == path_and_query)
            .count()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn get(&self, path_and_query: &str) -> Result<Value, FetchError> {
        self.requests.borrow_mut().push(path_and_query.to_string());

        let scripted = self
            .scripts
            .borrow_mut()
            .get_mut(path_and_query)
            .and_then(VecDeque::pop_front);

        match scripted {
            Some(Scripted::Ready(outcome)) => outcome,
            Some(Scripted::Deferred(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(FetchError::Network("deferred response dropped".into()))),
            None => Err(FetchError::Network(format!(
                "unscripted request: {path_and_query}"
            ))),
        }
    }
}

///
/// TESTS
///
