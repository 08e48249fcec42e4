use crate::dto::prelude::*;

///
/// ResourceRow
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ResourceRow {
    pub id: String,
    pub kind: String,
    pub owner: String,
    pub is_consumed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub consumed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub value: Option<String>,
}

///
/// TransactionRow
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TransactionRow {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub block_height: u64,
    pub timestamp: DateTime<Utc>,
    pub size_bytes: u64,
    pub gas_used: u64,
    pub created_resources_count: u32,
    pub consumed_resources_count: u32,
}

///
/// IntentRow
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct IntentRow {
    pub id: String,
    pub status: String,
    pub creator: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub solver: Option<String>,
    #[serde(default)]
    pub processing_time_ms: Option<f64>,
}

///
/// BlockRow
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct BlockRow {
    pub height: u64,
    pub hash: String,
    pub timestamp: DateTime<Utc>,
    pub transaction_count: u32,
    pub size_bytes: u64,
    #[serde(default)]
    pub proposer: Option<String>,
}

///
/// TESTS
///
