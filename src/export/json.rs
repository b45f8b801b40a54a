//! JSON Export functionality
//!
//! Wraps a report in a versioned envelope and writes it as JSON.

use crate::error::{SubsplitError, SubsplitResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Envelope around an exported report
///
/// Money amounts inside the report are integer cents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportExport<T> {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Report kind (outstanding, services, members)
    pub kind: String,

    /// The report itself
    pub report: T,
}

impl<T: Serialize> ReportExport<T> {
    /// Wrap a report for export
    pub fn new(kind: impl Into<String>, report: T) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            kind: kind.into(),
            report,
        }
    }
}

/// Export a report to JSON
pub fn export_json<T: Serialize, W: Write + ?Sized>(
    kind: &str,
    report: &T,
    writer: &mut W,
    pretty: bool,
) -> SubsplitResult<()> {
    let export = ReportExport::new(kind, report);

    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)
    } else {
        serde_json::to_writer(&mut *writer, &export)
    }
    .map_err(|e| SubsplitError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| SubsplitError::Export(e.to_string()))?;
    Ok(())
}
