//! Configuration for SmritiDB
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a SmritiDB store
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for all data files
    /// Internal structure:
    ///   {data_dir}/
    ///     ├── metadata         (catalog: name|path per line)
    ///     ├── operations.log   (append-only audit trail)
    ///     └── <table>/
    ///           ├── columns    (schema descriptor)
    ///           └── <id>       (one file per record)
    pub data_dir: PathBuf,

    /// Durability of record, schema and metadata writes
    pub sync_mode: SyncMode,

    // -------------------------------------------------------------------------
    // Query Configuration
    // -------------------------------------------------------------------------
    /// Whether SELECT applies its WHERE condition
    pub select_mode: SelectMode,

    // -------------------------------------------------------------------------
    // Catalog Configuration
    // -------------------------------------------------------------------------
    /// Reconcile the catalog with the table directories on disk when opening
    pub rescan_on_open: bool,
}

/// Sync strategy for file writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// fsync each temp file before it is renamed into place
    Always,

    /// Leave flushing to the OS page cache
    OsBuffered,
}

/// How SELECT treats its condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectMode {
    /// Only rows matching `column=value` are returned
    Filtered,

    /// The condition is logged but every row is returned
    Unfiltered,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./my_database"),
            sync_mode: SyncMode::OsBuffered,
            select_mode: SelectMode::Filtered,
            rescan_on_open: true,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (root for all storage)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the sync mode for file writes
    pub fn sync_mode(mut self, mode: SyncMode) -> Self {
        self.config.sync_mode = mode;
        self
    }

    /// Set how SELECT treats its condition
    pub fn select_mode(mut self, mode: SelectMode) -> Self {
        self.config.select_mode = mode;
        self
    }

    /// Enable or disable catalog reconciliation on open
    pub fn rescan_on_open(mut self, enabled: bool) -> Self {
        self.config.rescan_on_open = enabled;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
