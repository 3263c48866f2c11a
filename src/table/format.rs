//! Line codec shared by record files, schema descriptors and the metadata file
//!
//! Every file the store writes is a sequence of `left|right` lines. The
//! split happens on the FIRST `|`, so a right-hand side may itself contain
//! `|` characters. Lines without any `|` are skipped on read.

use crate::error::{Result, SmritiError};

/// Field separator used by every on-disk file
pub const SEPARATOR: char = '|';

/// Split a single line into its `(left, right)` halves
///
/// "name|a|b" → Some(("name", "a|b"))
/// "garbage"  → None
pub fn split_line(line: &str) -> Option<(&str, &str)> {
    line.split_once(SEPARATOR)
}

/// Parse a whole file body into ordered pairs
///
/// Lines are returned in file order; callers decide how duplicates resolve.
pub fn parse_pairs(content: &str) -> Vec<(String, String)> {
    content
        .lines()
        .filter_map(|line| {
            let line = line.strip_suffix('\r').unwrap_or(line);
            match split_line(line) {
                Some((left, right)) => Some((left.to_string(), right.to_string())),
                None => {
                    if !line.is_empty() {
                        tracing::warn!("Skipping line without '{}' separator: {:?}", SEPARATOR, line);
                    }
                    None
                }
            }
        })
        .collect()
}

/// Render pairs as `left|right\n` lines
pub fn encode_pairs<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut out = String::new();
    for (left, right) in pairs {
        out.push_str(left);
        out.push(SEPARATOR);
        out.push_str(right);
        out.push('\n');
    }
    out
}

/// Check that a key can round-trip through the line format
///
/// Keys are the left half of a line, so they may not contain the separator
/// or a line break, and may not be empty.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(SmritiError::MalformedField("empty field name".to_string()));
    }
    if key.contains(SEPARATOR) || key.contains(['\n', '\r']) {
        return Err(SmritiError::MalformedField(format!(
            "field name {:?} contains '{}' or a line break",
            key, SEPARATOR
        )));
    }
    Ok(())
}

/// Check that a value can round-trip through the line format
pub fn validate_value(key: &str, value: &str) -> Result<()> {
    if value.contains(['\n', '\r']) {
        return Err(SmritiError::MalformedField(format!(
            "value of {:?} contains a line break",
            key
        )));
    }
    Ok(())
}
