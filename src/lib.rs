//! # SmritiDB
//!
//! A minimal persistent record store:
//! - One directory per table, one file per record
//! - An advisory schema descriptor per table
//! - A catalog of table name → directory, cached in a metadata file
//! - An append-only operation log of every call
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Console / Command Parser                     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Command
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Store                                 │
//! │               (per-table RwLock)                             │
//! └──────┬──────────────────┬──────────────────────┬────────────┘
//!        │                  │                      │
//!        ▼                  ▼                      ▼
//!  ┌───────────┐    ┌───────────────┐     ┌────────────────┐
//!  │  Catalog  │    │ Table Dirs    │     │ Operation Log  │
//!  │ metadata  │    │ columns, <id> │     │ operations.log │
//!  └───────────┘    └───────────────┘     └────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod catalog;
pub mod command;
pub mod condition;
pub mod oplog;
pub mod store;
pub mod table;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, SmritiError};
pub use config::Config;
pub use store::Store;
pub use table::{Column, Record};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of SmritiDB
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
