//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the storage and report layers.

pub mod data;
pub mod report;

pub use data::{handle_data_command, DataCommands};
pub use report::{handle_report_command, ReportCommands, ReportFormat, ReportOptions};
