use crate::dto::{
    prelude::*,
    rows::{BlockRow, IntentRow, ResourceRow, TransactionRow},
};

///
/// PageMeta
/// Server-reported pagination envelope.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PageMeta {
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub pages: u32,
}

///
/// ResourcePage
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ResourcePage {
    #[serde(default)]
    pub resources: Vec<ResourceRow>,
    pub pagination: PageMeta,
}

///
/// TransactionFeed
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct TransactionFeed {
    #[serde(default)]
    pub transactions: Vec<TransactionRow>,
}

///
/// IntentFeed
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct IntentFeed {
    #[serde(default)]
    pub intents: Vec<IntentRow>,
}

///
/// BlockFeed
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct BlockFeed {
    #[serde(default)]
    pub blocks: Vec<BlockRow>,
}
