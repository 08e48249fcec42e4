use crate::transport::FetchError;
use chrono::{DateTime, Utc};

///
/// FetchResult
///
/// Lifecycle of one endpoint's data slot. The retention invariant: once a
/// `Success` has been observed, a later failure keeps the last good payload
/// (degrade-to-stale). A slot only ever reads as empty before the very first
/// successful fetch.
///

#[derive(Clone, Debug)]
pub enum FetchResult<T> {
    /// No fetch has settled yet; render a loading indicator.
    Pending,

    /// The most recent fetch succeeded.
    Success { value: T, fetched_at: DateTime<Utc> },

    /// The most recent fetch failed; `last_good` carries the stale payload
    /// from the last success, if any.
    Failure {
        error: FetchError,
        last_good: Option<T>,
    },
}

impl<T> Default for FetchResult<T> {
    fn default() -> Self {
        Self::Pending
    }
}

impl<T> FetchResult<T> {
    /// Fold one settled fetch outcome into the slot.
    pub fn absorb(&mut self, outcome: Result<T, FetchError>) {
        let prev = std::mem::replace(self, Self::Pending);

        *self = match outcome {
            Ok(value) => Self::Success {
                value,
                fetched_at: Utc::now(),
            },
            Err(error) => {
                let last_good = match prev {
                    Self::Success { value, .. } => Some(value),
                    Self::Failure { last_good, .. } => last_good,
                    Self::Pending => None,
                };

                Self::Failure { error, last_good }
            }
        };
    }

    /// The payload a renderer should show: the current value on success, the
    /// stale one after a failure, nothing before the first success.
    #[must_use]
    pub const fn latest(&self) -> Option<&T> {
        match self {
            Self::Success { value, .. } => Some(value),
            Self::Failure {
                last_good: Some(value),
                ..
            } => Some(value),
            _ => None,
        }
    }

    /// True while there is nothing to show at all (first load, or first load
    /// failed and the next tick has not retried yet).
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.latest().is_none()
    }

    /// The error from the most recent fetch, if it failed.
    #[must_use]
    pub const fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Failure { error, .. } => Some(error),
            _ => None,
        }
    }

    /// When the shown payload was fetched, if the last fetch succeeded.
    #[must_use]
    pub const fn fetched_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Success { fetched_at, .. } => Some(*fetched_at),
            _ => None,
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_slot_is_loading() {
        let slot: FetchResult<u64> = FetchResult::Pending;

        assert!(slot.is_loading());
        assert!(slot.latest().is_none());
        assert!(slot.error().is_none());
    }

    #[test]
    fn first_failure_stays_loading() {
        let mut slot: FetchResult<u64> = FetchResult::Pending;
        slot.absorb(Err(FetchError::Http(500)));

        assert!(slot.is_loading());
        assert_eq!(slot.error(), Some(&FetchError::Http(500)));
    }

    #[test]
    fn failure_after_success_keeps_last_good() {
        let mut slot: FetchResult<u64> = FetchResult::Pending;
        slot.absorb(Ok(42));
        slot.absorb(Err(FetchError::Network("unreachable".into())));

        assert!(!slot.is_loading());
        assert_eq!(slot.latest(), Some(&42));
        assert!(matches!(slot.error(), Some(FetchError::Network(_))));
    }

    #[test]
    fn repeated_failures_keep_the_original_payload() {
        let mut slot: FetchResult<u64> = FetchResult::Pending;
        slot.absorb(Ok(42));
        slot.absorb(Err(FetchError::Http(502)));
        slot.absorb(Err(FetchError::Http(503)));

        assert_eq!(slot.latest(), Some(&42));
        assert_eq!(slot.error(), Some(&FetchError::Http(503)));
    }

    #[test]
    fn success_after_failure_replaces_payload() {
        let mut slot: FetchResult<u64> = FetchResult::Pending;
        slot.absorb(Ok(1));
        slot.absorb(Err(FetchError::Http(500)));
        slot.absorb(Ok(2));

        assert_eq!(slot.latest(), Some(&2));
        assert!(slot.error().is_none());
        assert!(slot.fetched_at().is_some());
    }
}
