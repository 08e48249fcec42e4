//!
//! Compact constructors for endpoint response bodies.
//!
//! Tests describe payloads in one line; the builders fill in the
//! boilerplate fields with stable placeholder values.
//!

use serde_json::{Value, json};

/// `/stats/resources` body from `(kind, count)` pairs.
#[must_use]
pub fn resource_stats(kinds: &[(&str, u64)]) -> Value {
    let distribution: Vec<Value> = kinds
        .iter()
        .map(|(kind, count)| json!({ "kind": kind, "count": count }))
        .collect();

    json!({ "distribution_by_kind": distribution })
}

/// `/stats/transactions` body from `(date, count)` pairs.
#[must_use]
pub fn transaction_stats(days: &[(&str, u64)]) -> Value {
    let volume: Vec<Value> = days
        .iter()
        .map(|(date, count)| json!({ "date": date, "count": count }))
        .collect();

    json!({ "daily_volume": volume })
}

/// `/stats/intents` body from `(status, count)` pairs.
#[must_use]
pub fn intent_stats(statuses: &[(&str, u64)]) -> Value {
    let distribution: Vec<Value> = statuses
        .iter()
        .map(|(status, count)| json!({ "status": status, "count": count }))
        .collect();

    json!({ "distribution_by_status": distribution })
}

/// One network sample; `minute` spaces samples a minute apart so series
/// stay ascending by timestamp.
#[must_use]
pub fn network_sample(minute: u32, tps: f64, block_height: u64) -> Value {
    json!({
        "timestamp": format!("2026-08-30T12:{:02}:00Z", minute),
        "tps": tps,
        "avg_processing_time_ms": 4.2,
        "active_resources": 10,
        "pending_intents": 2,
        "block_height": block_height
    })
}

/// `/stats/network` body from pre-built samples.
#[must_use]
pub fn network_stats(samples: Vec<Value>) -> Value {
    json!({ "stats": samples })
}

/// One resource row with placeholder ownership fields.
#[must_use]
pub fn resource_row(id: &str, kind: &str) -> Value {
    json!({
        "id": id,
        "kind": kind,
        "owner": "0x00000000000000000000000000000000000000ab",
        "is_consumed": false,
        "created_at": "2026-08-30T12:00:00Z"
    })
}

/// `/resources` page body.
#[must_use]
pub fn resource_page(rows: Vec<Value>, page: u32, per_page: u32, total: u64, pages: u32) -> Value {
    json!({
        "resources": rows,
        "pagination": { "page": page, "per_page": per_page, "total": total, "pages": pages }
    })
}

/// `/transactions` feed body from transaction ids.
#[must_use]
pub fn transaction_feed(ids: &[&str]) -> Value {
    let transactions: Vec<Value> = ids
        .iter()
        .enumerate()
        .map(|(i, id)| {
            json!({
                "id": id,
                "type": "transfer",
                "status": "finalized",
                "block_height": 1000 + i as u64,
                "timestamp": "2026-08-30T12:00:00Z",
                "size_bytes": 512,
                "gas_used": 21_000,
                "created_resources_count": 1,
                "consumed_resources_count": 1
            })
        })
        .collect();

    json!({ "transactions": transactions })
}

/// `/intents` feed body from intent ids.
#[must_use]
pub fn intent_feed(ids: &[&str]) -> Value {
    let intents: Vec<Value> = ids
        .iter()
        .map(|id| {
            json!({
                "id": id,
                "status": "pending",
                "creator": "0x00000000000000000000000000000000000000cd",
                "created_at": "2026-08-30T12:00:00Z"
            })
        })
        .collect();

    json!({ "intents": intents })
}

/// `/blocks` feed body from block heights.
#[must_use]
pub fn block_feed(heights: &[u64]) -> Value {
    let blocks: Vec<Value> = heights
        .iter()
        .map(|h| {
            json!({
                "height": h,
                "hash": format!("0x{h:016x}"),
                "timestamp": "2026-08-30T12:00:00Z",
                "transaction_count": 4,
                "size_bytes": 4096
            })
        })
        .collect();

    json!({ "blocks": blocks })
}
