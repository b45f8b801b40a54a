//! subsplit - shared subscription billing for a household
//!
//! This library computes who owes what for subscriptions whose cost is split
//! among a changing set of members. It reads four exported tables (services,
//! the membership change log, members, and payment transactions) and produces
//! per-member and per-service billing summaries.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (services, members, change log, transactions)
//! - `storage`: Record sources, ingestion and the loaded snapshot
//! - `services`: The billing pipeline (allocation, payments, summaries)
//! - `reports`: Terminal and CSV rendering of the summaries
//! - `export`: JSON and YAML export envelopes
//! - `cli`: Command handlers for the `subsplit` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use subsplit::storage::{sample, Snapshot};
//! use chrono::NaiveDate;
//!
//! let snapshot = Snapshot::load(&sample::sample_source())?;
//! let now = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
//! let by_service = snapshot.payment_summary_by_service(now);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{SubsplitError, SubsplitResult};
