use crate::dto::prelude::*;

///
/// KindCount
/// One slice of the resource distribution. Older server builds emit the
/// kind under `name`, current builds under `kind`; accept both.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct KindCount {
    #[serde(alias = "name")]
    pub kind: String,
    pub count: u64,
}

///
/// ResourceStats
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ResourceStats {
    #[serde(default)]
    pub distribution_by_kind: Vec<KindCount>,
}

///
/// DailyCount
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DailyCount {
    pub date: String,
    pub count: u64,
}

///
/// TransactionStats
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct TransactionStats {
    #[serde(default)]
    pub daily_volume: Vec<DailyCount>,
}

///
/// StatusCount
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: u64,
}

///
/// IntentStats
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct IntentStats {
    #[serde(default)]
    pub distribution_by_status: Vec<StatusCount>,
}

///
/// NetworkSample
///
/// One server-side sample of network health. Numeric fields the server may
/// omit decode as zero; that default is part of this crate's contract (the
/// UI's placeholder substitutions are presentation-only and live elsewhere).
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NetworkSample {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub tps: f64,
    #[serde(default)]
    pub avg_processing_time_ms: f64,
    #[serde(default)]
    pub active_resources: u64,
    #[serde(default)]
    pub pending_intents: u64,
    #[serde(default)]
    pub block_height: u64,
}

///
/// NetworkStats
/// Samples are served in ascending timestamp order.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct NetworkStats {
    #[serde(default)]
    pub stats: Vec<NetworkSample>,
}

///
/// TESTS
///
