//! Member Status Report
//!
//! Each member's billing status across all the services they share, before
//! regrouping by service.

use crate::display::report::format_date;
use crate::error::{SubsplitError, SubsplitResult};
use crate::services::MemberPaymentSummary;
use crate::storage::Snapshot;
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Member Status Report
#[derive(Debug, Clone, Serialize)]
pub struct MemberStatusReport {
    /// Date the report was computed for
    pub as_of: NaiveDate,
    /// Members in table order
    pub members: Vec<MemberPaymentSummary>,
}

#[derive(Tabled)]
struct StatusRow {
    #[tabled(rename = "Member")]
    member: String,
    #[tabled(rename = "Service")]
    service: String,
    #[tabled(rename = "Owed")]
    owed: String,
    #[tabled(rename = "Paid")]
    paid: String,
    #[tabled(rename = "Credit")]
    credit: String,
    #[tabled(rename = "Covered Until")]
    covered_until: String,
}

impl MemberStatusReport {
    /// Generate the report from a snapshot
    pub fn generate(snapshot: &Snapshot, as_of: NaiveDate) -> Self {
        Self {
            as_of,
            members: crate::services::member_payment_summaries(
                &snapshot.transactions,
                &snapshot.services,
                &snapshot.change_log,
                &snapshot.members,
                as_of,
            ),
        }
    }

    /// Members with at least one overdue service
    pub fn members_overdue(&self) -> Vec<&str> {
        self.members
            .iter()
            .filter(|m| m.payment_summary.iter().any(|info| info.is_overdue))
            .map(|m| m.name.as_str())
            .collect()
    }

    /// Format the report as a table
    pub fn format_table(&self, symbol: &str, date_format: &str) -> String {
        let rows: Vec<StatusRow> = self
            .members
            .iter()
            .flat_map(|member| {
                member.payment_summary.iter().map(move |info| StatusRow {
                    member: member.name.clone(),
                    service: info.service_name.clone(),
                    owed: info.total_price_per_head.format_with_symbol(symbol),
                    paid: info.paid.format_with_symbol(symbol),
                    credit: info.credit.display.clone(),
                    covered_until: if info.is_overdue {
                        "OVERDUE".to_string()
                    } else {
                        info.available_until
                            .as_ref()
                            .map(|u| format_date(u.date, date_format))
                            .unwrap_or_else(|| "-".to_string())
                    },
                })
            })
            .collect();

        let mut table = Table::new(rows);
        table.with(Style::modern());

        let mut output = format!("Member Status as of {}\n{}\n", self.as_of, table);
        let overdue = self.members_overdue();
        if !overdue.is_empty() {
            output.push_str(&format!("Overdue: {}\n", overdue.join(", ")));
        }
        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> SubsplitResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| SubsplitError::Export(e.to_string());

        csv.write_record([
            "As Of",
            "Member ID",
            "Member",
            "Service",
            "Owed",
            "Paid",
            "Credit",
            "Overdue",
            "Available Until",
        ])
        .map_err(export_err)?;

        for member in &self.members {
            for info in &member.payment_summary {
                csv.write_record([
                    self.as_of.to_string(),
                    member.member_id.to_string(),
                    member.name.clone(),
                    info.service_name.clone(),
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
