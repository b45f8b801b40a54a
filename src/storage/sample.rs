//! Sample household dataset
//!
//! Two shared services, four members and a handful of payments. Used by
//! `subsplit init --sample` and throughout the test suite.

use serde_json::{json, Value};

use super::records::RawRecord;
use super::{MemorySource, Table};

fn record(id: &str, fields: Value) -> RawRecord {
    RawRecord::new(id, fields.as_object().cloned().unwrap_or_default())
}

fn payment(id: &str, owner: &str, service: &str, amount: i64, date: &str) -> RawRecord {
    record(
        id,
        json!({"owner": [owner], "service": service, "amount": amount, "date": date}),
    )
}

/// Service records
pub fn services() -> Vec<RawRecord> {
    vec![
        record(
            "recSpotify",
            json!({"Name": "Spotify", "price": 300, "date": "2021-03-17"}),
        ),
        record(
            "recYouTube",
            json!({"Name": "YouTube Premium", "price": 279, "date": "2021-06-05"}),
        ),
    ]
}

/// Member records
pub fn members() -> Vec<RawRecord> {
    vec![
        record(
            "recAlice",
            json!({
                "Name": "Alice",
                "transaction_ids": ["recT1", "recT2", "recT5"],
                "subscription change log": ["recL1", "recL2", "recL3"]
            }),
        ),
        record(
            "recBob",
            json!({
                "Name": "Bob",
                "transaction_ids": ["recT3"],
                "subscription change log": ["recL1"]
            }),
        ),
        record(
            "recCarol",
            json!({
                "Name": "Carol",
                "transaction_ids": ["recT7"],
                "subscription change log": ["recL1", "recL3"]
            }),
        ),
        record(
            "recDave",
            json!({
                "Name": "Dave",
                "transaction_ids": ["recT6", "recT404"],
                "subscription change log": ["recL2", "recL3"]
            }),
        ),
    ]
}

/// Membership intervals
pub fn change_log() -> Vec<RawRecord> {
    vec![
        record(
            "recL1",
            json!({
                "service": ["recSpotify"],
                "members": ["recAlice", "recBob", "recCarol"],
                "start date": "2024-01-01"
            }),
        ),
        record(
            "recL2",
            json!({
                "service": ["recYouTube"],
                "members": ["recAlice", "recDave"],
                "start date": "2023-12-15",
                "end date": "2024-03-31"
            }),
        ),
        record(
            "recL3",
            json!({
                "service": ["recYouTube"],
                "members": ["recAlice", "recDave", "recCarol"],
                "start date": "2024-04-01"
            }),
        ),
    ]
}

/// Payments; the last one references a service nobody tracks
pub fn transactions() -> Vec<RawRecord> {
    vec![
        payment("recT1", "recAlice", "Spotify", 150, "2024-02-01"),
        payment("recT2", "recAlice", "Spotify", 150, "2024-04-01"),
        payment("recT3", "recBob", "Spotify", 450, "2024-01-20"),
        payment("recT5", "recAlice", "YouTube Premium", 400, "2024-01-05"),
        payment("recT6", "recDave", "recYouTube", 200, "2024-02-05"),
        payment("recT7", "recCarol", "Netflix", 100, "2024-03-01"),
    ]
}

/// All four tables in memory
pub fn sample_source() -> MemorySource {
    MemorySource::new()
        .with_table(Table::Transactions, transactions())
        .with_table(Table::Services, services())
        .with_table(Table::ChangeLog, change_log())
        .with_table(Table::Members, members())
}
