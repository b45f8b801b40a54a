//! CLI commands for reports
//!
//! Provides commands for rendering and exporting the billing reports.

use crate::config::{Settings, SubsplitPaths};
use crate::error::{SubsplitError, SubsplitResult};
use crate::export::{export_json, export_yaml};
use crate::reports::{MemberStatusReport, OutstandingReport, ServiceOverviewReport};
use crate::storage::{JsonDirectorySource, Snapshot};
use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output
    #[default]
    Terminal,
    /// CSV rows (spreadsheet-compatible)
    Csv,
    /// JSON envelope
    Json,
    /// YAML envelope
    Yaml,
}

/// Options shared by every report
#[derive(Args, Debug, Clone)]
pub struct ReportOptions {
    /// Compute the report as of this date (YYYY-MM-DD, default today)
    #[arg(long)]
    pub as_of: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    pub format: ReportFormat,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Paid, owed and balance per member and service
    #[command(alias = "owed")]
    Outstanding(ReportOptions),

    /// Every member's status grouped by service
    #[command(alias = "summary")]
    Services(ReportOptions),

    /// Every member's status across their services
    Members(ReportOptions),
}

/// Handle report commands
pub fn handle_report_command(
    paths: &SubsplitPaths,
    settings: &Settings,
    cmd: ReportCommands,
) -> SubsplitResult<()> {
    let source = JsonDirectorySource::new(paths.clone(), settings.tables.clone());
    let snapshot = Snapshot::load(&source)?;

    match cmd {
        ReportCommands::Outstanding(opts) => {
            let as_of = parse_as_of(opts.as_of.as_deref())?;
            let report = OutstandingReport::generate(&snapshot, as_of);
            write_report(&opts, |format, writer| match format {
                ReportFormat::Terminal => {
                    write_text(writer, &report.format_terminal(&settings.currency_symbol))
                }
                ReportFormat::Csv => report.export_csv(writer),
                ReportFormat::Json => export_json("outstanding", &report, writer, true),
                ReportFormat::Yaml => export_yaml("outstanding", &report, writer),
            })
        }
        ReportCommands::Services(opts) => {
            let as_of = parse_as_of(opts.as_of.as_deref())?;
            let report = ServiceOverviewReport::generate(&snapshot, as_of);
            write_report(&opts, |format, writer| match format {
                ReportFormat::Terminal => write_text(
                    writer,
                    &report.format_terminal(&settings.currency_symbol, &settings.date_format),
                ),
                ReportFormat::Csv => report.export_csv(writer),
                ReportFormat::Json => export_json("services", &report, writer, true),
                ReportFormat::Yaml => export_yaml("services", &report, writer),
            })
        }
        ReportCommands::Members(opts) => {
            let as_of = parse_as_of(opts.as_of.as_deref())?;
            let report = MemberStatusReport::generate(&snapshot, as_of);
            write_report(&opts, |format, writer| match format {
                ReportFormat::Terminal => write_text(
                    writer,
                    &report.format_table(&settings.currency_symbol, &settings.date_format),
                ),
                ReportFormat::Csv => report.export_csv(writer),
                ReportFormat::Json => export_json("members", &report, writer, true),
                ReportFormat::Yaml => export_yaml("members", &report, writer),
            })
        }
    }
}

/// Parse the `--as-of` date, defaulting to today
pub fn parse_as_of(as_of: Option<&str>) -> SubsplitResult<NaiveDate> {
    match as_of {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
            SubsplitError::Validation(format!("Invalid date format: {}. Use YYYY-MM-DD", s))
        }),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

fn write_text(writer: &mut dyn Write, text: &str) -> SubsplitResult<()> {
    writer
        .write_all(text.as_bytes())
        .map_err(|e| SubsplitError::Export(e.to_string()))
}

/// Send a rendered report to the requested destination
fn write_report<F>(opts: &ReportOptions, render: F) -> SubsplitResult<()>
where
    F: FnOnce(ReportFormat, &mut dyn Write) -> SubsplitResult<()>,
{
    match &opts.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                SubsplitError::Export(format!(
                    "Failed to create file {}: {}",
                    path.display(),
                    e
                ))
            })?;
            let mut writer = BufWriter::new(file);
            render(opts.format, &mut writer)?;
            writer.flush()?;
            info!(path = %path.display(), "report written");
            println!("Report exported to: {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            render(opts.format, &mut writer)?;
            writer.flush()?;
        }
    }

    Ok(())
}
