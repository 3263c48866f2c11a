//! Record and column definitions
//!
//! A record is an unordered set of `field → value` strings. It is stored in a
//! `BTreeMap` so that files, log lines and rendered output always list fields
//! in lexicographic order.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Result, SmritiError};

use super::format;

/// Name of the primary-key field; its value names the record file
pub const PRIMARY_KEY: &str = "id";

/// A single row of a table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a field value
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Set a field, returning the previous value if any
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.fields.insert(field.into(), value.into())
    }

    /// The primary-key value, if present
    pub fn id(&self) -> Option<&str> {
        self.get(PRIMARY_KEY)
    }

    /// Overwrite matching fields and add new ones from `changes`
    pub fn merge(&mut self, changes: &Record) {
        for (field, value) in changes.iter() {
            self.fields.insert(field.to_string(), value.to_string());
        }
    }

    /// Keep only the requested columns, in request order
    ///
    /// Columns the record does not have are left out.
    pub fn project<S: AsRef<str>>(&self, columns: &[S]) -> Vec<(String, String)> {
        columns
            .iter()
            .filter_map(|column| {
                let column = column.as_ref();
                self.get(column)
                    .map(|value| (column.to_string(), value.to_string()))
            })
            .collect()
    }

    /// Iterate fields in lexicographic order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Reject field names and values the line format cannot hold
    pub fn validate(&self) -> Result<()> {
        for (field, value) in self.iter() {
            format::validate_key(field)?;
            format::validate_value(field, value)?;
        }
        Ok(())
    }

    /// Encode as `field|value` lines
    pub fn encode(&self) -> String {
        format::encode_pairs(self.iter())
    }

    /// Decode a record file body. On duplicate field names the last line wins.
    pub fn decode(content: &str) -> Self {
        format::parse_pairs(content).into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<BTreeMap<String, String>> for Record {
    fn from(fields: BTreeMap<String, String>) -> Self {
        Self { fields }
    }
}

/// One entry of a table's schema descriptor
///
/// The type is an uninterpreted label; it is never checked against data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: String,
    pub type_name: String,
}

impl Column {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }

    /// Encode a schema descriptor as `name|type` lines, in declaration order
    pub fn encode_all(columns: &[Column]) -> String {
        format::encode_pairs(
            columns
                .iter()
                .map(|c| (c.name.as_str(), c.type_name.as_str())),
        )
    }

    /// Decode a schema descriptor
    pub fn decode_all(content: &str) -> Vec<Column> {
        format::parse_pairs(content)
            .into_iter()
            .map(|(name, type_name)| Column { name, type_name })
            .collect()
    }

    /// Reject column definitions the line format cannot hold
    pub fn validate_all(columns: &[Column]) -> Result<()> {
        for column in columns {
            format::validate_key(&column.name)?;
            format::validate_value(&column.name, &column.type_name)?;
        }
        Ok(())
    }
}

/// Check that a record id is usable as a file name inside a table directory
pub fn validate_record_id(id: &str) -> Result<()> {
    if !is_plain_component(id) {
        return Err(SmritiError::InvalidRecordId(format!(
            "{:?} is not a plain file name",
            id
        )));
    }
    if id == super::SCHEMA_FILENAME {
        return Err(SmritiError::InvalidRecordId(format!(
            "{:?} is reserved for the schema descriptor",
            id
        )));
    }
    Ok(())
}

/// A name that maps to exactly one visible path component
pub(crate) fn is_plain_component(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\', '\0'])
}
