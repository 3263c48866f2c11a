//! Command definitions
//!
//! A parsed command with already-split arguments.

use crate::table::{Column, Record};

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a table with an advisory schema
    CreateTable { table: String, columns: Vec<Column> },

    /// Drop a table and all its records
    DropTable { table: String },

    /// Insert (or replace) a record
    Insert { table: String, record: Record },

    /// Read rows; `condition` is empty when there is no WHERE clause
    Select {
        table: String,
        columns: Vec<String>,
        condition: String,
    },

    /// Merge fields into matching rows
    Update {
        table: String,
        changes: Record,
        condition: String,
    },

    /// Remove matching rows
    Delete { table: String, condition: String },

    /// List tables
    ShowTables,

    /// Show a table's schema descriptor
    Describe { table: String },
}

