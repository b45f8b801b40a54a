//! Storage layer for subsplit
//!
//! The four source tables are read through a [`RecordSource`], ingested into
//! typed models once, and handed to the billing pipeline as an immutable
//! [`Snapshot`].

pub mod file_io;
pub mod ingest;
pub mod init;
pub mod records;
pub mod sample;

pub use file_io::{read_table_file, write_table_file};
pub use records::RawRecord;

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::info;

use crate::config::{SubsplitPaths, TableNames};
use crate::error::{SubsplitError, SubsplitResult};
use crate::models::{ChangeLogEntry, Member, Service, Transaction};
use crate::services::{self, MemberOwedReport, ServiceReport};

/// The logical source tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Transactions,
    Services,
    ChangeLog,
    Members,
}

impl Table {
    /// All tables, in load order
    pub const ALL: [Table; 4] = [
        Table::Transactions,
        Table::Services,
        Table::ChangeLog,
        Table::Members,
    ];
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Table::Transactions => "transactions",
            Table::Services => "services",
            Table::ChangeLog => "change log",
            Table::Members => "members",
        };
        f.write_str(label)
    }
}

/// Supplies raw records per logical table
pub trait RecordSource {
    /// Name of the table as known to the source (used in error messages)
    fn table_name(&self, table: Table) -> String {
        table.to_string()
    }

    /// Fetch every record of a table
    fn fetch(&self, table: Table) -> SubsplitResult<Vec<RawRecord>>;
}

/// Reads each table from `<data dir>/<table name>.json`
pub struct JsonDirectorySource {
    paths: SubsplitPaths,
    tables: TableNames,
}

impl JsonDirectorySource {
    /// Create a source over the data directory
    pub fn new(paths: SubsplitPaths, tables: TableNames) -> Self {
        Self { paths, tables }
    }

    /// Write a table file, replacing any existing one
    pub fn write_table(&self, table: Table, records: &[RawRecord]) -> SubsplitResult<()> {
        let name = self.tables.name(table);
        write_table_file(name, &self.paths.table_file(name), records)
    }
}

impl RecordSource for JsonDirectorySource {
    fn table_name(&self, table: Table) -> String {
        self.tables.name(table).to_string()
    }

    fn fetch(&self, table: Table) -> SubsplitResult<Vec<RawRecord>> {
        let name = self.tables.name(table);
        read_table_file(name, &self.paths.table_file(name))?
            .into_iter()
            .enumerate()
            .map(|(index, value)| RawRecord::from_value(name, index, value))
            .collect()
    }
}

/// Tables held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    tables: HashMap<Table, Vec<RawRecord>>,
}

impl MemorySource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a table's records
    pub fn with_table(mut self, table: Table, records: Vec<RawRecord>) -> Self {
        self.tables.insert(table, records);
        self
    }

    /// Build a table from JSON values
    pub fn with_json(self, table: Table, values: Vec<Value>) -> SubsplitResult<Self> {
        let name = table.to_string();
        let records = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| RawRecord::from_value(&name, index, value))
            .collect::<SubsplitResult<Vec<_>>>()?;
        Ok(self.with_table(table, records))
    }
}

impl RecordSource for MemorySource {
    fn fetch(&self, table: Table) -> SubsplitResult<Vec<RawRecord>> {
        self.tables
            .get(&table)
            .cloned()
            .ok_or_else(|| SubsplitError::table_not_found(table.to_string()))
    }
}

/// Typed, validated copy of all four tables at one point in time
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub transactions: Vec<Transaction>,
    pub services: Vec<Service>,
    pub change_log: Vec<ChangeLogEntry>,
    pub members: Vec<Member>,
}

impl Snapshot {
    /// Fetch each table once and ingest it
    pub fn load<S: RecordSource + ?Sized>(source: &S) -> SubsplitResult<Self> {
        let fetch = |table: Table| -> SubsplitResult<(String, Vec<RawRecord>)> {
            let records = source.fetch(table)?;
            let name = source.table_name(table);
            info!(table = %name, records = records.len(), "fetched table");
            Ok((name, records))
        };

        let (name, records) = fetch(Table::Transactions)?;
        let transactions = ingest::ingest_all(&name, &records, ingest::transaction_from_record)?;

        let (name, records) = fetch(Table::Services)?;
        let services = ingest::ingest_all(&name, &records, ingest::service_from_record)?;

        let (name, records) = fetch(Table::ChangeLog)?;
        let change_log = ingest::ingest_all(&name, &records, ingest::change_log_from_record)?;

        let (name, records) = fetch(Table::Members)?;
        let members = ingest::ingest_all(&name, &records, ingest::member_from_record)?;

        Ok(Self {
            transactions,
            services,
            change_log,
            members,
        })
    }

    /// Number of records per table
    pub fn counts(&self) -> [(Table, usize); 4] {
        [
            (Table::Transactions, self.transactions.len()),
            (Table::Services, self.services.len()),
            (Table::ChangeLog, self.change_log.len()),
            (Table::Members, self.members.len()),
        ]
    }

    /// References that the billing pipeline will skip
    ///
    /// None of these fail a load; they are reported by `data check`.
    pub fn reference_issues(&self) -> Vec<String> {
        let catalog = services::ServiceCatalog::new(&self.services);
        let mut issues = Vec::new();

        for txn in &self.transactions {
            if let Some(reference) = &txn.service {
                if catalog.resolve_reference(reference).is_none() {
                    issues.push(format!(
                        "transaction {} references unknown service '{}'",
                        txn.id, reference
                    ));
                }
            }
            if let Some(payer) = &txn.payer {
                if !self.members.iter().any(|m| &m.id == payer) {
                    issues.push(format!(
                        "transaction {} references unknown member {}",
                        txn.id, payer
                    ));
                }
            }
        }

        for entry in &self.change_log {
            match &entry.service_id {
                Some(id) if catalog.get(id).is_none() => issues.push(format!(
                    "change log entry {} references unknown service {}",
                    entry.id, id
                )),
                None => issues.push(format!("change log entry {} has no service", entry.id)),
                _ => {}
            }
        }

        for member in &self.members {
            for id in &member.transaction_ids {
                if !self.transactions.iter().any(|t| &t.id == id) {
                    issues.push(format!(
                        "member {} lists unknown transaction {}",
                        member.name, id
                    ));
                }
            }
            for id in &member.change_log_ids {
                if !self.change_log.iter().any(|e| &e.id == id) {
                    issues.push(format!(
                        "member {} lists unknown change log entry {}",
                        member.name, id
                    ));
                }
            }
        }

        issues
    }

    /// Member-centric amounts paid and owed, per service paid for
    pub fn payment_summary_by_owner(&self, now: NaiveDate) -> Vec<MemberOwedReport> {
        services::calculate_payment_summary(
            &self.transactions,
            &self.services,
            &self.change_log,
            &self.members,
            now,
        )
    }

    /// Service-centric billing status of every member
    pub fn payment_summary_by_service(&self, now: NaiveDate) -> Vec<ServiceReport> {
        services::get_payment_summary(
            &self.transactions,
            &self.services,
            &self.change_log,
            &self.members,
            now,
        )
    }
}
