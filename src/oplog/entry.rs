//! Operation log entries
//!
//! Each variant renders to exactly one log line.

use std::fmt;

use crate::table::Record;

/// An operation recorded in the log
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    CreateTable {
        table: String,
    },

    DropTable {
        table: String,
    },

    /// Values are listed in field-name order
    Insert {
        table: String,
        values: Vec<String>,
    },

    /// `condition` is logged verbatim, empty when absent
    Select {
        table: String,
        columns: Vec<String>,
        condition: String,
    },

    Update {
        table: String,
        changes: Vec<(String, String)>,
        condition: String,
    },

    Delete {
        table: String,
        condition: String,
    },
}

impl Operation {
    pub fn insert(table: &str, record: &Record) -> Self {
        Operation::Insert {
            table: table.to_string(),
            values: record.iter().map(|(_, v)| v.to_string()).collect(),
        }
    }

    pub fn update(table: &str, changes: &Record, condition: &str) -> Self {
        Operation::Update {
            table: table.to_string(),
            changes: changes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            condition: condition.to_string(),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::CreateTable { table } => write!(f, "CREATE TABLE {}", table),
            Operation::DropTable { table } => write!(f, "DROP TABLE {}", table),
            Operation::Insert { table, values } => {
                write!(f, "INSERT INTO {} VALUES ({})", table, values.join(", "))
            }
            Operation::Select {
                table,
                columns,
                condition,
            } => {
                write!(f, "SELECT {} FROM {}", columns.join(", "), table)?;
                if !condition.is_empty() {
                    write!(f, " WHERE {}", condition)?;
                }
                Ok(())
            }
            Operation::Update {
                table,
                changes,
                condition,
            } => {
                let set = changes
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, v))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "UPDATE {} SET {} WHERE {}", table, set, condition)
            }
            Operation::Delete { table, condition } => {
                write!(f, "DELETE FROM {} WHERE {}", table, condition)
            }
        }
    }
}
