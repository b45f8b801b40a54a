//! Raw source records and typed field access
//!
//! Tables arrive as JSON arrays of flat records: a stable `id` plus whatever
//! fields the spreadsheet holds. Records exported through the spreadsheet API
//! nest the fields under a `fields` key; both shapes are accepted.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{SubsplitError, SubsplitResult};

/// One untyped record from a source table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawRecord {
    /// Stable record identifier
    pub id: String,

    /// Field name to value
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl RawRecord {
    /// Create a record from an id and its fields
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Build a record from a JSON value, validating its shape
    ///
    /// `index` is the record's position in the table and only used for
    /// error messages when the record has no usable `id`.
    pub fn from_value(table: &str, index: usize, value: Value) -> SubsplitResult<Self> {
        let Value::Object(mut object) = value else {
            return Err(SubsplitError::ingest(
                table,
                format!("#{}", index),
                "record is not a JSON object",
            ));
        };

        let id = match object.remove("id") {
            Some(Value::String(id)) if !id.trim().is_empty() => id,
            Some(Value::Number(n)) => n.to_string(),
            Some(_) => {
                return Err(SubsplitError::ingest(
                    table,
                    format!("#{}", index),
                    "'id' must be a non-empty string",
                ))
            }
            None => {
                return Err(SubsplitError::ingest(
                    table,
                    format!("#{}", index),
                    "record has no 'id'",
                ))
            }
        };

        let fields = match object.remove("fields") {
            Some(Value::Object(nested)) => {
                let mut fields = object;
                fields.extend(nested);
                fields
            }
            Some(other) => {
                // A field literally named "fields" in a flat record
                object.insert("fields".to_string(), other);
                object
            }
            None => object,
        };

        Ok(Self { id, fields })
    }

    /// Typed accessor for this record's fields
    pub fn reader<'a>(&'a self, table: &'a str) -> FieldReader<'a> {
        FieldReader {
            table,
            record: self,
        }
    }
}

/// Reads typed values out of a [`RawRecord`], producing ingest errors that
/// name the table, record and field
pub struct FieldReader<'a> {
    table: &'a str,
    record: &'a RawRecord,
}

impl<'a> FieldReader<'a> {
    fn error(&self, message: String) -> SubsplitError {
        SubsplitError::ingest(self.table, self.record.id.clone(), message)
    }

    fn get(&self, field: &str) -> Option<&'a Value> {
        match self.record.fields.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value),
        }
    }

    /// A required string field
    pub fn required_str(&self, field: &str) -> SubsplitResult<String> {
        match self.get(field) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(self.error(format!(
                "field '{}' must be a string, found {}",
                field,
                kind(other)
            ))),
            None => Err(self.error(format!("missing required field '{}'", field))),
        }
    }

    /// A required numeric field
    pub fn required_number(&self, field: &str) -> SubsplitResult<f64> {
        self.optional_number(field)?
            .ok_or_else(|| self.error(format!("missing required field '{}'", field)))
    }

    /// An optional numeric field
    pub fn optional_number(&self, field: &str) -> SubsplitResult<Option<f64>> {
        match self.get(field) {
            Some(Value::Number(n)) => n
                .as_f64()
                .map(Some)
                .ok_or_else(|| self.error(format!("field '{}' is not a finite number", field))),
            Some(other) => Err(self.error(format!(
                "field '{}' must be a number, found {}",
                field,
                kind(other)
            ))),
            None => Ok(None),
        }
    }

    /// A list of record ids; absent means empty
    pub fn id_list(&self, field: &str) -> SubsplitResult<Vec<String>> {
        match self.get(field) {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.clone()),
                    other => Err(self.error(format!(
                        "field '{}' must contain strings, found {}",
                        field,
                        kind(other)
                    ))),
                })
                .collect(),
            Some(other) => Err(self.error(format!(
                "field '{}' must be a list, found {}",
                field,
                kind(other)
            ))),
            None => Ok(Vec::new()),
        }
    }

    /// A list of record ids that must be present
    pub fn required_id_list(&self, field: &str) -> SubsplitResult<Vec<String>> {
        if self.get(field).is_none() {
            return Err(self.error(format!("missing required field '{}'", field)));
        }
        self.id_list(field)
    }

    /// A one-to-one reference, transported either as a plain string or as a
    /// list whose first element is the reference
    pub fn single_reference(&self, field: &str) -> SubsplitResult<Option<String>> {
        match self.get(field) {
            Some(Value::String(s)) if s.is_empty() => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Array(_)) => Ok(self.id_list(field)?.into_iter().next()),
            Some(other) => Err(self.error(format!(
                "field '{}' must be a string or a list, found {}",
                field,
                kind(other)
            ))),
            None => Ok(None),
        }
    }

    /// A required date field
    pub fn required_date(&self, field: &str) -> SubsplitResult<NaiveDate> {
        self.optional_date(field)?
            .ok_or_else(|| self.error(format!("missing required field '{}'", field)))
    }

    /// An optional date field
    pub fn optional_date(&self, field: &str) -> SubsplitResult<Option<NaiveDate>> {
        match self.get(field) {
            Some(Value::String(s)) => parse_record_date(s)
                .map(Some)
                .ok_or_else(|| self.error(format!("field '{}' has invalid date '{}'", field, s))),
            Some(other) => Err(self.error(format!(
                "field '{}' must be a date string, found {}",
                field,
                kind(other)
            ))),
            None => Ok(None),
        }
    }
}

/// Parse a `YYYY-MM-DD` date or an RFC 3339 timestamp (date taken in UTC)
pub fn parse_record_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc).date_naive())
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
