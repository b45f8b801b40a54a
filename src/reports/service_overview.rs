//! Service Overview Report
//!
//! For each tracked service, every member billed for it with their credit,
//! overdue status and how long their payments cover them.

use crate::display::report::{double_separator, format_date, separator, truncate};
use crate::error::{SubsplitError, SubsplitResult};
use crate::services::ServiceReport;
use crate::storage::Snapshot;
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

/// Service Overview Report
#[derive(Debug, Clone, Serialize)]
pub struct ServiceOverviewReport {
    /// Date the report was computed for
    pub as_of: NaiveDate,
    /// Services in table order
    pub services: Vec<ServiceReport>,
}

impl ServiceOverviewReport {
    /// Generate the report from a snapshot
    pub fn generate(snapshot: &Snapshot, as_of: NaiveDate) -> Self {
        Self {
            as_of,
            services: snapshot.payment_summary_by_service(as_of),
        }
    }

    /// Number of (member, service) pairs that are overdue
    pub fn overdue_count(&self) -> usize {
        self.services
            .iter()
            .flat_map(|s| &s.members)
            .filter(|m| m.payment_info.is_overdue)
            .count()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str, date_format: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Subscription Status as of {}\n", self.as_of));
        output.push_str(&double_separator(84));
        output.push('\n');

        for service in &self.services {
            output.push_str(&format!("\n{}\n", service.service_name.to_uppercase()));

            if service.members.is_empty() {
                output.push_str("  (no members)\n");
                continue;
            }

            output.push_str(&format!(
                "  {:<18} {:>11} {:>11} {:>11} {:>11}  {}\n",
                "Member", "Per Month", "Owed", "Paid", "Credit", "Covered Until"
            ));
            output.push_str("  ");
            output.push_str(&separator(82));
            output.push('\n');

            for member in &service.members {
                let info = &member.payment_info;
                let covered = match (&info.available_until, info.is_overdue) {
                    (_, true) => "OVERDUE".to_string(),
                    (Some(until), false) => format!(
                        "{} ({})",
                        format_date(until.date, date_format),
                        until.relative
                    ),
                    (None, false) => "-".to_string(),
                };

                output.push_str(&format!(
                    "  {:<18} {:>11} {:>11} {:>11} {:>11}  {}\n",
                    truncate(&member.name, 18),
                    info.price_per_head.format_with_symbol(symbol),
                    info.total_price_per_head.format_with_symbol(symbol),
                    info.paid.format_with_symbol(symbol),
                    info.credit.display,
                    covered
                ));
            }
        }

        output.push('\n');
        output.push_str(&separator(84));
        output.push('\n');
        output.push_str(&format!("Overdue: {}\n", self.overdue_count()));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> SubsplitResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| SubsplitError::Export(e.to_string());

        csv.write_record([
            "As Of",
            "Service",
            "Member",
            "Price Per Head",
            "Total Owed",
            "Paid",
            "Credit",
            "Overdue",
            "Available Until",
        ])
        .map_err(export_err)?;

        for service in &self.services {
            for member in &service.members {
                let info = &member.payment_info;
                csv.write_record([
                    self.as_of.to_string(),
                    service.service_name.clone(),
                    member.name.clone(),
                    info.price_per_head.to_string(),
                    info.total_price_per_head.to_string(),
                    info.paid.to_string(),
                    info.credit.display.clone(),
                    info.is_overdue.to_string(),
                    info.available_until
                        .as_ref()
                        .map(|u| u.date.to_string())
                        .unwrap_or_default(),
                ])
                .map_err(export_err)?;
            }
        }

        csv.flush()
            .map_err(|e| SubsplitError::Export(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sample;

    fn report() -> ServiceOverviewReport {
        let snapshot = Snapshot::load(&sample::sample_source()).unwrap();
        ServiceOverviewReport::generate(&snapshot, NaiveDate::from_ymd_opt(2024, 5, 10).unwrap())
    }

    #[test]
    fn test_overdue_count() {
        // Carol on both services, Dave on YouTube Premium
        assert_eq!(report().overdue_count(), 3);
    }

    #[test]
    fn test_format_terminal() {
        let output = report().format_terminal("฿", "%b %d");
        assert!(output.contains("SPOTIFY"));
        assert!(output.contains("YOUTUBE PREMIUM"));
        assert!(output.contains("Jul 17 (2 months)"));
        assert!(output.contains("OVERDUE"));
        assert!(output.ends_with("Overdue: 3\n"));
    }

    #[test]
    fn test_export_csv() {
        let mut buffer = Vec::new();
        report().export_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();

        assert!(csv.contains(
            "2024-05-10,Spotify,Bob,75.00,300.00,450.00,+150.00,false,2024-07-17"
        ));
        assert!(csv.contains("2024-05-10,Spotify,Carol,75.00,300.00,0.00,-300.00,true,"));
        assert_eq!(csv.lines().count(), 7);
    }
}
