//! Outstanding Report
//!
//! Per member and service: what has been paid, what is owed for the elapsed
//! months, and the resulting balance.

use crate::display::report::{double_separator, format_money_colored, separator, truncate};
use crate::error::{SubsplitError, SubsplitResult};
use crate::models::Money;
use crate::services::MemberOwedReport;
use crate::storage::Snapshot;
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

/// Outstanding Report
#[derive(Debug, Clone, Serialize)]
pub struct OutstandingReport {
    /// Date the report was computed for
    pub as_of: NaiveDate,
    /// Members in order of their first payment
    pub members: Vec<MemberOwedReport>,
}

impl OutstandingReport {
    /// Generate the report from a snapshot
    pub fn generate(snapshot: &Snapshot, as_of: NaiveDate) -> Self {
        Self {
            as_of,
            members: snapshot.payment_summary_by_owner(as_of),
        }
    }

    /// Sum of all balances (paid minus owed)
    pub fn total_balance(&self) -> Money {
        self.members
            .iter()
            .flat_map(|m| &m.subscribed_services)
            .map(|s| s.balance())
            .sum()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Outstanding Balances as of {}\n", self.as_of));
        output.push_str(&double_separator(72));
        output.push('\n');

        output.push_str(&format!(
            "{:<30} {:>13} {:>13} {:>13}\n",
            "Service", "Paid", "Owed", "Balance"
        ));
        output.push_str(&separator(72));
        output.push('\n');

        for member in &self.members {
            let name = member
                .member_name
                .clone()
                .unwrap_or_else(|| format!("Unknown ({})", member.owner_id));
            output.push_str(&format!("\n{}\n", name));

            if member.subscribed_services.is_empty() {
                output.push_str("  (no payments for tracked services)\n");
                continue;
            }

            for service in &member.subscribed_services {
                output.push_str(&format!(
                    "  {:<28} {:>13} {:>13} {:>13}\n",
                    truncate(&service.service, 28),
                    service.total_paid.format_with_symbol(symbol),
                    service.need_to_pay.format_with_symbol(symbol),
                    format_money_colored(service.balance(), symbol)
                ));
            }
        }

        output.push_str(&separator(72));
        output.push('\n');
        output.push_str(&format!(
            "{:<30} {:>41}\n",
            "NET BALANCE",
            self.total_balance().format_with_symbol(symbol)
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> SubsplitResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| SubsplitError::Export(e.to_string());

        csv.write_record(["As Of", "Member ID", "Member", "Service", "Paid", "Owed", "Balance"])
            .map_err(export_err)?;

        for member in &self.members {
            for service in &member.subscribed_services {
                csv.write_record([
                    self.as_of.to_string(),
                    member.owner_id.to_string(),
                    member.member_name.clone().unwrap_or_default(),
                    service.service.clone(),
                    service.total_paid.to_string(),
                    service.need_to_pay.to_string(),
                    service.balance().to_string(),
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

    fn report() -> OutstandingReport {
        let snapshot = Snapshot::load(&sample::sample_source()).unwrap();
        OutstandingReport::generate(&snapshot, NaiveDate::from_ymd_opt(2024, 5, 10).unwrap())
    }

    #[test]
    fn test_total_balance() {
        // Alice 0 + 51, Bob +150, Dave -149
        assert_eq!(report().total_balance(), Money::from_units(52));
    }

    #[test]
    fn test_format_terminal() {
        let output = report().format_terminal("฿");
        assert!(output.starts_with("Outstanding Balances as of 2024-05-10"));
        assert!(output.contains("Alice"));
        assert!(output.contains("(no payments for tracked services)"));
        assert!(output.contains("฿52.00"));
    }

    #[test]
    fn test_export_csv() {
        let mut buffer = Vec::new();
        report().export_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();

        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "As Of,Member ID,Member,Service,Paid,Owed,Balance");
        assert_eq!(lines[1], "2024-05-10,recAlice,Alice,Spotify,300.00,300.00,0.00");
        assert!(lines.contains(&"2024-05-10,recDave,Dave,YouTube Premium,200.00,349.00,-149.00"));
        assert_eq!(lines.len(), 5);
    }
}
