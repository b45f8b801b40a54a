//! Table file I/O with atomic writes
//!
//! A table file holds a JSON array of records. Every error names the table,
//! and writes never leave a half-written table file behind.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::error::{SubsplitError, SubsplitResult};

/// Read the records of a table file
///
/// A missing file is a "not found" error; a file that is not a JSON array is
/// a storage error naming the table and what was found instead.
pub fn read_table_file(table: &str, path: &Path) -> SubsplitResult<Vec<Value>> {
    if !path.exists() {
        return Err(SubsplitError::table_not_found(format!(
            "{} ({})",
            table,
            path.display()
        )));
    }

    let file = File::open(path).map_err(|e| {
        SubsplitError::storage(table, format!("failed to open {}: {}", path.display(), e))
    })?;

    let value: Value = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        SubsplitError::storage(table, format!("failed to parse {}: {}", path.display(), e))
    })?;

    match value {
        Value::Array(records) => Ok(records),
        other => Err(SubsplitError::storage(
            table,
            format!(
                "{} must hold a JSON array of records, found {}",
                path.display(),
                json_kind(&other)
            ),
        )),
    }
}

/// Write the records of a table file atomically (write to temp, then rename)
pub fn write_table_file<T: Serialize>(
    table: &str,
    path: &Path,
    records: &[T],
) -> SubsplitResult<()> {
    let storage_err = |what: &str, e: &dyn std::fmt::Display| {
        SubsplitError::storage(table, format!("failed to {}: {}", what, e))
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| storage_err(&format!("create directory {}", parent.display()), &e))?;
    }

    // Temp file must live in the same directory for the rename to be atomic
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path).map_err(|e| storage_err("create temp file", &e))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records)
        .map_err(|e| storage_err("serialize records", &e))?;
    writer.flush().map_err(|e| storage_err("flush data", &e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| storage_err("sync data", &e))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        storage_err("rename temp file", &e)
    })?;

    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
