use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use subsplit::cli::{handle_data_command, handle_report_command, DataCommands, ReportCommands};
use subsplit::config::{paths::DATA_DIR_ENV, Settings, SubsplitPaths};
use subsplit::storage::{init, Table};

/// Environment variable holding the log filter
const LOG_ENV: &str = "SUBSPLIT_LOG";

#[derive(Parser)]
#[command(
    name = "subsplit",
    version,
    about = "Split shared subscription costs across a household",
    long_about = "subsplit reads exported subscription tables (services, membership \
                  change log, members and payments) and reports who owes what, \
                  who is in credit, and how long each member's payments cover them."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Billing reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Inspect the source tables
    #[command(subcommand)]
    Data(DataCommands),

    /// Create the data directory and settings
    Init {
        /// Fill missing tables with a small sample household
        #[arg(long)]
        sample: bool,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var(LOG_ENV).unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = SubsplitPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Report(cmd)) => {
            handle_report_command(&paths, &settings, cmd)?;
        }
        Some(Commands::Data(cmd)) => {
            handle_data_command(&paths, &settings, cmd)?;
        }
        Some(Commands::Init { sample }) => {
            println!("Initializing subsplit at: {}", paths.base_dir().display());
            let summary = init::initialize_storage(&paths, &settings, sample)?;
            settings.save(&paths)?;

            for table in &summary.created {
                println!("  created  {}", paths.table_file(settings.tables.name(*table)).display());
            }
            for table in &summary.existing {
                println!("  kept     {}", paths.table_file(settings.tables.name(*table)).display());
            }
            println!("Initialization complete!");
            println!();
            if sample {
                println!("Run 'subsplit report services' to see the sample household.");
            } else {
                println!("Export your tables as JSON into {}", paths.data_dir().display());
            }
        }
        Some(Commands::Config) => {
            println!("subsplit Configuration");
            println!("======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("(override with {})", DATA_DIR_ENV);
            println!();
            let status = if !paths.is_initialized() {
                "not initialized (run 'subsplit init')"
            } else if init::needs_initialization(&paths, &settings) {
                "some tables are missing (run 'subsplit data tables')"
            } else {
                "ready"
            };
            println!("Status: {}", status);
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Tables:");
            for table in Table::ALL {
                println!("    {:<14} {}", table.to_string(), settings.tables.name(table));
            }
        }
        None => {
            println!("subsplit - shared subscription billing");
            println!();
            println!("Run 'subsplit --help' for usage information.");
            println!("Run 'subsplit init --sample' to try it with sample data.");
        }
    }

    Ok(())
}
