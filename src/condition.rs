//! Single-column equality conditions
//!
//! The only predicate the store understands is `column=value`, split on the
//! first `=`. Comparison is exact string equality: no trimming, no type
//! coercion, and a record without the column never matches.

use std::fmt;

use crate::error::{Result, SmritiError};
use crate::table::Record;

/// A parsed `column=value` predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub column: String,
    pub value: String,
}

impl Condition {
    pub fn new(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Parse a condition string
    ///
    /// "age=30"   → column "age", value "30"
    /// "a=b=c"    → column "a", value "b=c"
    /// "age"      → MalformedCondition
    pub fn parse(input: &str) -> Result<Self> {
        match input.split_once('=') {
            Some((column, value)) => Ok(Self::new(column, value)),
            None => Err(SmritiError::MalformedCondition(input.to_string())),
        }
    }

    /// Parse an optional condition; an empty string means "match everything"
    pub fn parse_optional(input: &str) -> Result<Option<Self>> {
        if input.is_empty() {
            Ok(None)
        } else {
            Self::parse(input).map(Some)
        }
    }

    /// True if the record has the column with exactly this value
    pub fn matches(&self, record: &Record) -> bool {
        record.get(&self.column) == Some(self.value.as_str())
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.column, self.value)
    }
}
