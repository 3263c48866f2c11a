//! Store Module
//!
//! The table store that coordinates catalog, table directories and the
//! operation log.
//!
//! ## Responsibilities
//! - Table lifecycle (create/drop)
//! - Record insert, select, update and delete
//! - Per-table locking so scans never see a half-applied rewrite
//! - Flushing the catalog to `{root}/metadata` on every exit path

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};

use crate::catalog::Catalog;
use crate::command::{Command, Outcome};
use crate::condition::Condition;
use crate::config::{Config, SelectMode};
use crate::error::{Result, SmritiError};
use crate::oplog::{OpLogWriter, Operation};
use crate::table::{self, validate_record_id, Column, Record, TableDir};

/// The table store
///
/// ## Concurrency Model
///
/// - **Per table**: a `RwLock<()>` from `table_locks`
///   - `select` holds the read side for the whole scan
///   - `create`/`drop`/`insert`/`update`/`delete` hold the write side
/// - **Catalog**: its own `RwLock`, always taken after a table lock
/// - **Operation log**: `Mutex`, held only for a single append
///
/// All methods take `&self`, so a store can be shared behind an `Arc`.
/// Nothing guards against a second process using the same root directory.
pub struct Store {
    /// Store configuration
    config: Config,

    /// Path of the catalog cache file
    metadata_path: PathBuf,

    /// Table name → directory path
    catalog: RwLock<Catalog>,

    /// Append-only audit trail
    oplog: Mutex<OpLogWriter>,

    /// One lock per table name while any operation holds it
    table_locks: Mutex<HashMap<String, Weak<RwLock<()>>>>,

    /// Set once `close` has flushed the catalog
    closed: bool,
}

impl Store {
    // =========================================================================
    // Internal Path Constants
    // =========================================================================
    const METADATA_FILENAME: &'static str = "metadata";
    const OPLOG_FILENAME: &'static str = "operations.log";

    /// Open or create a store with the given config
    ///
    /// On startup:
    /// 1. Create the root directory if it doesn't exist
    /// 2. Load the catalog from `{root}/metadata` (missing file = empty)
    /// 3. Optionally reconcile the catalog with the directories on disk
    /// 4. Open the operation log
    pub fn open(config: Config) -> Result<Self> {
        fs::create_dir_all(&config.data_dir)?;

        let metadata_path = config.data_dir.join(Self::METADATA_FILENAME);
        let oplog_path = config.data_dir.join(Self::OPLOG_FILENAME);

        let mut catalog = Catalog::load(&metadata_path)?;
        tracing::debug!("Loaded {} catalog entries", catalog.len());

        if config.rescan_on_open {
            let result = catalog.reconcile(&config.data_dir)?;
            for name in &result.added {
                tracing::info!("Registered table '{}' found on disk", name);
            }
            for name in &result.relocated {
                tracing::info!("Repointed catalog entry '{}' to the current root", name);
            }
            for name in &result.removed {
                tracing::warn!("Dropped stale catalog entry '{}': directory is gone", name);
            }
        }

        let oplog = OpLogWriter::open(&oplog_path)?;

        tracing::info!(
            "Opened store at {} ({} tables)",
            config.data_dir.display(),
            catalog.len()
        );

        Ok(Self {
            config,
            metadata_path,
            catalog: RwLock::new(catalog),
            oplog: Mutex::new(oplog),
            table_locks: Mutex::new(HashMap::new()),
            closed: false,
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified data directory
    pub fn open_path(path: &Path) -> Result<Self> {
        Self::open(Config::builder().data_dir(path).build())
    }

    /// Execute a parsed command
    ///
    /// Routes commands to the matching operation.
    pub fn execute(&self, command: Command) -> Result<Outcome> {
        match command {
            Command::CreateTable { table, columns } => {
                self.create_table(&table, &columns)?;
                Ok(Outcome::TableCreated(table))
            }
            Command::DropTable { table } => {
                self.drop_table(&table)?;
                Ok(Outcome::TableDropped(table))
            }
            Command::Insert { table, record } => {
                self.insert(&table, &record)?;
                Ok(Outcome::Inserted(table))
            }
            Command::Select {
                table,
                columns,
                condition,
            } => {
                let rows = self.select(&table, columns.as_slice(), &condition)?;
                Ok(Outcome::Rows {
                    table,
                    columns,
                    rows,
                })
            }
            Command::Update {
                table,
                changes,
                condition,
            } => {
                let count = self.update(&table, &changes, &condition)?;
                Ok(Outcome::Updated { table, count })
            }
            Command::Delete { table, condition } => {
                let count = self.delete(&table, &condition)?;
                Ok(Outcome::Deleted { table, count })
            }
            Command::ShowTables => Ok(Outcome::Tables(self.list_tables())),
            Command::Describe { table } => {
                let columns = self.describe_table(&table)?;
                Ok(Outcome::Schema { table, columns })
            }
        }
    }

    // =========================================================================
    // Table Lifecycle
    // =========================================================================

    /// Create a table directory with its schema descriptor
    ///
    /// Fails with `TableExists` if the directory is already there.
    pub fn create_table(&self, name: &str, columns: &[Column]) -> Result<()> {
        table::validate_table_name(name)?;
        let lock = self.table_lock(name);
        let _guard = lock.write();

        let dir = self.table_dir(name);
        if dir.exists() {
            return Err(SmritiError::TableExists(name.to_string()));
        }

        dir.create(columns)?;

        if let Err(e) = self.log(&Operation::CreateTable {
            table: name.to_string(),
        }) {
            dir.destroy()?;
            return Err(e);
        }

        self.catalog.write().register(name, dir.path());
        tracing::info!("Created table '{}' with {} columns", name, columns.len());
        Ok(())
    }

    /// Recursively delete a table directory and forget it
    ///
    /// Fails with `TableNotFound` if the directory is missing; a failed
    /// removal is returned as an I/O error and the catalog entry is kept.
    pub fn drop_table(&self, name: &str) -> Result<()> {
        table::validate_table_name(name)?;
        let lock = self.table_lock(name);
        let _guard = lock.write();

        let dir = self.table_dir(name);
        if !dir.exists() {
            return Err(SmritiError::TableNotFound(name.to_string()));
        }

        self.log(&Operation::DropTable {
            table: name.to_string(),
        })?;

        dir.destroy()?;
        self.catalog.write().unregister(name);
        tracing::info!("Dropped table '{}'", name);
        Ok(())
    }

    // =========================================================================
    // Record Operations
    // =========================================================================

    /// Insert a record, replacing any record with the same `id`
    pub fn insert(&self, name: &str, record: &Record) -> Result<()> {
        table::validate_table_name(name)?;
        let lock = self.table_lock(name);
        let _guard = lock.write();

        let dir = self.table_dir(name);
        if !dir.exists() {
            return Err(SmritiError::TableNotFound(name.to_string()));
        }

        let id = record.id().ok_or(SmritiError::MissingPrimaryKey)?;
        validate_record_id(id)?;
        record.validate()?;

        self.log(&Operation::insert(name, record))?;
        dir.write_record(record)
    }

    /// Return full rows from a table
    ///
    /// `condition` is `""` or `column=value`. With `SelectMode::Filtered`
    /// only matching rows come back; with `SelectMode::Unfiltered` the
    /// condition is only logged. A missing table yields no rows.
    ///
    /// `columns` is recorded in the log but does not trim the rows; use
    /// `Record::project` for that.
    pub fn select<S: AsRef<str>>(
        &self,
        name: &str,
        columns: &[S],
        condition: &str,
    ) -> Result<Vec<Record>> {
        table::validate_table_name(name)?;
        let lock = self.table_lock(name);
        let _guard = lock.read();

        let dir = self.table_dir(name);
        if !dir.exists() {
            tracing::debug!("SELECT on missing table '{}'", name);
            return Ok(Vec::new());
        }

        let filter = match self.config.select_mode {
            SelectMode::Filtered => Condition::parse_optional(condition)?,
            SelectMode::Unfiltered => None,
        };

        self.log(&Operation::Select {
            table: name.to_string(),
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            condition: condition.to_string(),
        })?;

        let rows = dir
            .scan()?
            .into_iter()
            .map(|(_, record)| record)
            .filter(|record| filter.as_ref().map_or(true, |f| f.matches(record)))
            .collect();

        Ok(rows)
    }

    /// Merge `changes` into every record matching `condition`
    ///
    /// Returns how many records matched; zero is not an error. Records keep
    /// their file name even if `changes` sets a new `id`.
    pub fn update(&self, name: &str, changes: &Record, condition: &str) -> Result<usize> {
        table::validate_table_name(name)?;
        let lock = self.table_lock(name);
        let _guard = lock.write();

        let dir = self.table_dir(name);
        if !dir.exists() {
            return Err(SmritiError::TableNotFound(name.to_string()));
        }

        let filter = Condition::parse(condition)?;
        changes.validate()?;

        self.log(&Operation::update(name, changes, condition))?;

        let mut count = 0;
        for (file_name, record) in dir.scan()? {
            if !filter.matches(&record) {
                continue;
            }

            let mut merged = record.clone();
            merged.merge(changes);
            if merged != record {
                dir.rewrite_record(&file_name, &merged)?;
            }
            count += 1;
        }

        tracing::debug!("UPDATE {} WHERE {}: {} records", name, filter, count);
        Ok(count)
    }

    /// Remove every record matching `condition`
    ///
    /// Returns how many records were removed; zero is not an error.
    pub fn delete(&self, name: &str, condition: &str) -> Result<usize> {
        table::validate_table_name(name)?;
        let lock = self.table_lock(name);
        let _guard = lock.write();

        let dir = self.table_dir(name);
        if !dir.exists() {
            return Err(SmritiError::TableNotFound(name.to_string()));
        }

        let filter = Condition::parse(condition)?;

        self.log(&Operation::Delete {
            table: name.to_string(),
            condition: condition.to_string(),
        })?;

        let mut count = 0;
        for (file_name, record) in dir.scan()? {
            if filter.matches(&record) && dir.remove_record(&file_name)? {
                count += 1;
            }
        }

        tracing::debug!("DELETE FROM {} WHERE {}: {} records", name, filter, count);
        Ok(count)
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// Names of all cataloged tables, sorted
    pub fn list_tables(&self) -> Vec<String> {
        self.catalog.read().names()
    }

    /// Read a table's schema descriptor
    pub fn describe_table(&self, name: &str) -> Result<Vec<Column>> {
        table::validate_table_name(name)?;
        let lock = self.table_lock(name);
        let _guard = lock.read();

        let dir = self.table_dir(name);
        if !dir.exists() {
            return Err(SmritiError::TableNotFound(name.to_string()));
        }
        dir.columns()
    }

    /// The table-exists predicate: the table directory is present
    pub fn table_exists(&self, name: &str) -> bool {
        table::validate_table_name(name).is_ok() && self.table_dir(name).exists()
    }

    /// Catalog path for a table, if registered
    pub fn catalog_path(&self, name: &str) -> Option<PathBuf> {
        self.catalog.read().get(name).map(Path::to_path_buf)
    }

    // =========================================================================
    // Shutdown
    // =========================================================================

    /// Write the catalog to `{root}/metadata` now
    pub fn flush_metadata(&self) -> Result<()> {
        let catalog = self.catalog.read();
        catalog.save(&self.metadata_path, self.config.sync_mode)?;
        tracing::debug!("Flushed {} catalog entries", catalog.len());
        Ok(())
    }

    /// Close the store, flushing the catalog
    ///
    /// Dropping a store without calling `close` still flushes, but can only
    /// log a failure.
    pub fn close(mut self) -> Result<()> {
        let result = self.flush_metadata();
        self.closed = true;
        tracing::info!("Closed store at {}", self.config.data_dir.display());
        result
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Get the data directory path
    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of table names with a tracked lock
    pub fn tracked_lock_count(&self) -> usize {
        self.table_locks.lock().len()
    }

    /// Entries appended to the operation log by this store
    pub fn logged_operations(&self) -> u64 {
        self.oplog.lock().entries_written()
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Directory handle for a table; the path is always `{root}/{name}`
    fn table_dir(&self, name: &str) -> TableDir {
        TableDir::new(self.config.data_dir.join(name), self.config.sync_mode)
    }

    /// Shared lock for a table name
    ///
    /// The map only holds weak references: a lock lives as long as some
    /// operation holds it, and dead entries are pruned whenever a new lock
    /// has to be created.
    fn table_lock(&self, name: &str) -> Arc<RwLock<()>> {
        let mut locks = self.table_locks.lock();
        if let Some(lock) = locks.get(name).and_then(Weak::upgrade) {
            return lock;
        }

        locks.retain(|_, lock| lock.strong_count() > 0);
        let lock = Arc::new(RwLock::new(()));
        locks.insert(name.to_string(), Arc::downgrade(&lock));
        lock
    }

    fn log(&self, operation: &Operation) -> Result<()> {
        self.oplog.lock().append(operation)
    }
}

impl Drop for Store {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(e) = self.flush_metadata() {
            tracing::error!("Failed to flush catalog on drop: {}", e);
        }
    }
}
