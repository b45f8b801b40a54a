//! CLI commands for the source data
//!
//! Loads the exported tables and reports what the billing pipeline will see.

use crate::config::{Settings, SubsplitPaths};
use crate::error::SubsplitResult;
use crate::storage::{JsonDirectorySource, Snapshot, Table};
use clap::Subcommand;

/// Data subcommands
#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Load and validate every table, then print record counts
    Check,

    /// Show where each table is read from
    Tables,
}

/// Handle data commands
pub fn handle_data_command(
    paths: &SubsplitPaths,
    settings: &Settings,
    cmd: DataCommands,
) -> SubsplitResult<()> {
    match cmd {
        DataCommands::Check => handle_check(paths, settings),
        DataCommands::Tables => {
            for table in Table::ALL {
                let name = settings.tables.name(table);
                let path = paths.table_file(name);
                let status = if path.exists() { "" } else { "  (missing)" };
                println!("{:<14} {}{}", table.to_string(), path.display(), status);
            }
            Ok(())
        }
    }
}

fn handle_check(paths: &SubsplitPaths, settings: &Settings) -> SubsplitResult<()> {
    let source = JsonDirectorySource::new(paths.clone(), settings.tables.clone());
    let snapshot = Snapshot::load(&source)?;

    println!("Data directory: {}", paths.data_dir().display());
    println!();
    for (table, count) in snapshot.counts() {
        println!("  {:<14} {:>6} records", table.to_string(), count);
    }
    println!();

    let issues = snapshot.reference_issues();
    if issues.is_empty() {
        println!("All references resolve.");
    } else {
        println!("{} reference(s) will be skipped:", issues.len());
        for issue in &issues {
            println!("  - {}", issue);
        }
    }

    Ok(())
}
