use derive_more::Display;

///
/// EndpointId
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[remain::sorted]
pub enum EndpointId {
    Blocks,
    IntentStats,
    Intents,
    NetworkStats,
    ResourceStats,
    Resources,
    TransactionStats,
    Transactions,
}

///
/// Endpoint
///
/// Compile-time description of one server resource this layer reads:
/// identifier, path (relative to the configured api base), and the filter
/// keys the server accepts for it. Presence of a filter key in a request is
/// an explicit constraint, so unconstrained keys must be omitted entirely.
///

#[derive(Clone, Copy, Debug)]
pub struct Endpoint {
    pub id: EndpointId,
    pub path: &'static str,
    pub filter_keys: &'static [&'static str],
}

pub const RESOURCE_STATS: Endpoint = Endpoint {
    id: EndpointId::ResourceStats,
    path: "/stats/resources",
    filter_keys: &[],
};

pub const TRANSACTION_STATS: Endpoint = Endpoint {
    id: EndpointId::TransactionStats,
    path: "/stats/transactions",
    filter_keys: &[],
};

pub const INTENT_STATS: Endpoint = Endpoint {
    id: EndpointId::IntentStats,
    path: "/stats/intents",
    filter_keys: &[],
};

pub const NETWORK_STATS: Endpoint = Endpoint {
    id: EndpointId::NetworkStats,
    path: "/stats/network",
    filter_keys: &[],
};

pub const RESOURCES: Endpoint = Endpoint {
    id: EndpointId::Resources,
    path: "/resources",
    filter_keys: &["kind", "owner", "is_consumed"],
};

pub const TRANSACTIONS: Endpoint = Endpoint {
    id: EndpointId::Transactions,
    path: "/transactions",
    filter_keys: &[],
};

pub const INTENTS: Endpoint = Endpoint {
    id: EndpointId::Intents,
    path: "/intents",
    filter_keys: &[],
};

pub const BLOCKS: Endpoint = Endpoint {
    id: EndpointId::Blocks,
    path: "/blocks",
    filter_keys: &[],
};

impl Endpoint {
    /// Whether the server accepts `key` as a filter on this endpoint.
    #[must_use]
    pub fn accepts_filter(&self, key: &str) -> bool {
        self.filter_keys.contains(&key)
    }

    /// Assemble the request URL from the api base and ordered query pairs.
    /// Pairs are emitted in the order given; an empty slice yields a bare path.
    #[must_use]
    pub fn url(&self, api_base: &str, query: &[(&str, String)]) -> String {
        let mut url = format!("{api_base}{}", self.path);

        for (i, (key, value)) in query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            url.push(sep);
            url.push_str(key);
            url.push('=');
            url.push_str(value);
        }

        url
    }
}

///
/// TESTS
///
