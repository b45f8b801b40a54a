//! Storage initialization
//!
//! Handles first-run setup of the data directory

use tracing::info;

use crate::config::{Settings, SubsplitPaths};
use crate::error::SubsplitError;

use super::{sample, JsonDirectorySource, RawRecord, RecordSource, Table};

/// What `initialize_storage` wrote
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitSummary {
    /// Tables created by this call
    pub created: Vec<Table>,
    /// Tables left untouched because a file already existed
    pub existing: Vec<Table>,
}

/// Initialize storage for a fresh installation
///
/// Creates the data directory and a file for every table that is missing.
/// Missing tables are written empty, or with the sample dataset when
/// `with_sample` is set. Existing table files are never overwritten.
pub fn initialize_storage(
    paths: &SubsplitPaths,
    settings: &Settings,
    with_sample: bool,
) -> Result<InitSummary, SubsplitError> {
    paths.ensure_directories()?;

    let source = JsonDirectorySource::new(paths.clone(), settings.tables.clone());
    let samples = sample::sample_source();
    let mut summary = InitSummary::default();

    for table in Table::ALL {
        let path = paths.table_file(settings.tables.name(table));
        if path.exists() {
            summary.existing.push(table);
            continue;
        }

        let records: Vec<RawRecord> = if with_sample {
            samples.fetch(table)?
        } else {
            Vec::new()
        };
        source.write_table(table, &records)?;
        info!(table = %table, records = records.len(), "created table file");
        summary.created.push(table);
    }

    Ok(summary)
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &SubsplitPaths, settings: &Settings) -> bool {
    Table::ALL
        .iter()
        .any(|&table| !paths.table_file(settings.tables.name(table)).exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Snapshot;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_empty() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SubsplitPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings::default();

        assert!(needs_initialization(&paths, &settings));
        let summary = initialize_storage(&paths, &settings, false).unwrap();
        assert_eq!(summary.created.len(), 4);
        assert!(!needs_initialization(&paths, &settings));

        let source = JsonDirectorySource::new(paths, settings.tables);
        let snapshot = Snapshot::load(&source).unwrap();
        assert!(snapshot.services.is_empty());
        assert!(snapshot.members.is_empty());
    }

    #[test]
    fn test_initialize_with_sample() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SubsplitPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings::default();

        initialize_storage(&paths, &settings, true).unwrap();

        let source = JsonDirectorySource::new(paths, settings.tables);
        let snapshot = Snapshot::load(&source).unwrap();
        assert_eq!(snapshot.services.len(), 2);
        assert_eq!(snapshot.members.len(), 4);
    }

    #[test]
    fn test_existing_tables_are_kept() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SubsplitPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings::default();

        initialize_storage(&paths, &settings, true).unwrap();
        let summary = initialize_storage(&paths, &settings, false).unwrap();
        assert!(summary.created.is_empty());
        assert_eq!(summary.existing.len(), 4);

        let source = JsonDirectorySource::new(paths, settings.tables);
        assert_eq!(Snapshot::load(&source).unwrap().services.len(), 2);
    }
}
