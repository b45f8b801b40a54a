//! YAML Export functionality
//!
//! Writes the same envelope as the JSON export in human-readable form.

use crate::error::{SubsplitError, SubsplitResult};
use crate::export::json::ReportExport;
use serde::Serialize;
use std::io::Write;

/// Export a report to YAML
pub fn export_yaml<T: Serialize, W: Write + ?Sized>(
    kind: &str,
    report: &T,
    writer: &mut W,
) -> SubsplitResult<()> {
    let export = ReportExport::new(kind, report);
    let export_err = |e: std::io::Error| SubsplitError::Export(e.to_string());

    writeln!(writer, "# subsplit {} report", kind).map_err(export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_err)?;
    writeln!(writer, "# Amounts are in cents.").map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| SubsplitError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::ServiceOverviewReport;
    use crate::storage::{sample, Snapshot};
    use chrono::NaiveDate;

    #[test]
    fn test_yaml_export() {
        let snapshot = Snapshot::load(&sample::sample_source()).unwrap();
        let as_of = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let report = ServiceOverviewReport::generate(&snapshot, as_of);

        let mut output = Vec::new();
        export_yaml("services", &report, &mut output).unwrap();
        let yaml = String::from_utf8(output).unwrap();

        assert!(yaml.starts_with("# subsplit services report"));
        assert!(yaml.contains("schema_version:"));
        assert!(yaml.contains("service_name: Spotify"));
        assert!(yaml.contains("is_overdue: true"));
    }

    #[test]
    fn test_yaml_parses_back() {
        let snapshot = Snapshot::load(&sample::sample_source()).unwrap();
        let as_of = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let report = ServiceOverviewReport::generate(&snapshot, as_of);

        let mut output = Vec::new();
        export_yaml("services", &report, &mut output).unwrap();

        let value: serde_yaml::Value = serde_yaml::from_slice(&output).unwrap();
        assert_eq!(value["kind"].as_str(), Some("services"));
    }
}
