//! Command outcomes
//!
//! What `Store::execute` hands back, and its console rendering.

use std::fmt;

use serde_json::{json, Value};

use crate::table::{Column, Record};

/// Column list meaning "every field of the row"
pub const ALL_COLUMNS: &str = "*";

/// Result of executing a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    TableCreated(String),

    TableDropped(String),

    Inserted(String),

    /// Full rows plus the columns the caller asked for
    Rows {
        table: String,
        columns: Vec<String>,
        rows: Vec<Record>,
    },

    Updated { table: String, count: usize },

    Deleted { table: String, count: usize },

    Tables(Vec<String>),

    Schema { table: String, columns: Vec<Column> },
}

impl Outcome {
    /// Rows trimmed to the requested columns, in request order
    ///
    /// A lone `*` keeps every field.
    pub fn projected_rows(&self) -> Vec<Vec<(String, String)>> {
        match self {
            Outcome::Rows { columns, rows, .. } => rows
                .iter()
                .map(|row| {
                    if columns.len() == 1 && columns[0] == ALL_COLUMNS {
                        row.iter()
                            .map(|(k, v)| (k.to_string(), v.to_string()))
                            .collect()
                    } else {
                        row.project(columns.as_slice())
                    }
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl Outcome {
    /// JSON rendering for the console's `--json` mode
    ///
    /// `SELECT *` rows are emitted whole; otherwise each row holds only the
    /// requested columns.
    pub fn to_json(&self) -> Value {
        match self {
            Outcome::TableCreated(table) => json!({ "created": table }),
            Outcome::TableDropped(table) => json!({ "dropped": table }),
            Outcome::Inserted(table) => json!({ "inserted": table }),
            Outcome::Rows {
                table,
                columns,
                rows,
            } if columns.len() == 1 && columns[0] == ALL_COLUMNS => {
                json!({ "table": table, "rows": rows })
            }
            Outcome::Rows { table, .. } => {
                let rows: Vec<Value> = self
                    .projected_rows()
                    .into_iter()
                    .map(|row| {
                        Value::Object(row.into_iter().map(|(k, v)| (k, Value::String(v))).collect())
                    })
                    .collect();
                json!({ "table": table, "rows": rows })
            }
            Outcome::Updated { table, count } => json!({ "table": table, "updated": count }),
            Outcome::Deleted { table, count } => json!({ "table": table, "deleted": count }),
            Outcome::Tables(tables) => json!({ "tables": tables }),
            Outcome::Schema { table, columns } => json!({ "table": table, "columns": columns }),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::TableCreated(table) => write!(f, "Table '{}' created successfully!", table),
            Outcome::TableDropped(table) => write!(f, "Table '{}' dropped successfully!", table),
            Outcome::Inserted(table) => write!(f, "Data inserted into '{}' successfully!", table),
            Outcome::Rows { table, rows, .. } if rows.is_empty() => {
                write!(f, "No records found in '{}'", table)
            }
            Outcome::Rows { .. } => {
                let lines: Vec<String> = self
                    .projected_rows()
                    .iter()
                    .map(|row| {
                        row.iter()
                            .map(|(k, v)| format!("{}: {}", k, v))
                            .collect::<Vec<_>>()
                            .join(" ")
                    })
                    .collect();
                write!(f, "{}", lines.join("\n"))
            }
            Outcome::Updated { table, count } => {
                write!(f, "{} record(s) updated in '{}'", count, table)
            }
            Outcome::Deleted { table, count } => {
                write!(f, "{} record(s) deleted from '{}'", count, table)
            }
            Outcome::Tables(tables) if tables.is_empty() => write!(f, "No tables"),
            Outcome::Tables(tables) => write!(f, "{}", tables.join("\n")),
            Outcome::Schema { table, columns } if columns.is_empty() => {
                write!(f, "Table '{}' has no columns", table)
            }
            Outcome::Schema { columns, .. } => {
                let lines: Vec<String> = columns
                    .iter()
                    .map(|c| format!("{} {}", c.name, c.type_name))
                    .collect();
                write!(f, "{}", lines.join("\n"))
            }
        }
    }
}
