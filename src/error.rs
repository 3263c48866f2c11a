//! Error types for SmritiDB
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using SmritiError
pub type Result<T> = std::result::Result<T, SmritiError>;

/// Unified error type for SmritiDB operations
#[derive(Debug, Error)]
pub enum SmritiError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Table Errors
    // -------------------------------------------------------------------------
    #[error("Table '{0}' not found")]
    TableNotFound(String),

    #[error("Table '{0}' already exists")]
    TableExists(String),

    #[error("Invalid table name: {0}")]
    InvalidTableName(String),

    // -------------------------------------------------------------------------
    // Record Errors
    // -------------------------------------------------------------------------
    #[error("Missing required 'id' field")]
    MissingPrimaryKey,

    #[error("Invalid record id: {0}")]
    InvalidRecordId(String),

    #[error("Malformed field: {0}")]
    MalformedField(String),

    #[error("Malformed condition '{0}': expected column=value")]
    MalformedCondition(String),

    // -------------------------------------------------------------------------
    // Metadata Errors
    // -------------------------------------------------------------------------
    #[error("Metadata corruption detected: {0}")]
    Corruption(String),

    // -------------------------------------------------------------------------
    // Command Errors
    // -------------------------------------------------------------------------
    #[error("Parse error: {0}")]
    Parse(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

