//! Export module for subsplit
//!
//! Machine-readable exports of any report:
//! - JSON: for scripts and dashboards
//! - YAML: for human-readable archives
//!
//! CSV export lives on each report type since its columns are report-specific.

pub mod json;
pub mod yaml;

pub use json::{export_json, ReportExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_yaml;
