//! Core data models for subsplit
//!
//! Typed records for the four source tables (services, members, change log,
//! transactions) plus money and calendar helpers. Records are read-only
//! snapshots; nothing in the crate mutates them after ingestion.

pub mod change_log;
pub mod ids;
pub mod member;
pub mod money;
pub mod period;
pub mod service;
pub mod transaction;

pub use change_log::ChangeLogEntry;
pub use ids::{ChangeLogId, MemberId, ServiceId, TransactionId};
pub use member::Member;
pub use money::Money;
pub use service::Service;
pub use transaction::Transaction;
