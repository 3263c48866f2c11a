//! Table directory
//!
//! Record-level file I/O for a single table. Callers are responsible for
//! holding the table's lock; nothing here synchronizes.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::SyncMode;
use crate::error::{Result, SmritiError};

use super::{validate_record_id, write_atomic, Column, Record, SCHEMA_FILENAME};

/// Handle to one table's directory
#[derive(Debug, Clone)]
pub struct TableDir {
    /// Directory holding the schema descriptor and record files
    path: PathBuf,

    /// Sync mode for writes through this handle
    sync_mode: SyncMode,
}

impl TableDir {
    /// Wrap an existing (or to-be-created) directory. Does no I/O.
    pub fn new(path: impl Into<PathBuf>, sync_mode: SyncMode) -> Self {
        Self {
            path: path.into(),
            sync_mode,
        }
    }

    /// Create the directory and write its schema descriptor
    ///
    /// Fails with `TableExists` if anything already occupies the path.
    pub fn create(&self, columns: &[Column]) -> Result<()> {
        Column::validate_all(columns)?;

        if let Err(e) = fs::create_dir(&self.path) {
            if e.kind() == ErrorKind::AlreadyExists {
                return Err(SmritiError::TableExists(self.display_name()));
            }
            return Err(e.into());
        }

        if let Err(e) = write_atomic(
            &self.path,
            SCHEMA_FILENAME,
            &Column::encode_all(columns),
            self.sync_mode,
        ) {
            // Don't leave a half-created table behind
            let _ = fs::remove_dir_all(&self.path);
            return Err(e);
        }

        Ok(())
    }

    /// The table-exists predicate: the directory is present on disk
    pub fn exists(&self) -> bool {
        self.path.is_dir()
    }

    /// Read the schema descriptor back
    ///
    /// A missing descriptor yields an empty schema.
    pub fn columns(&self) -> Result<Vec<Column>> {
        match fs::read_to_string(self.path.join(SCHEMA_FILENAME)) {
            Ok(content) => Ok(Column::decode_all(&content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write a record to the file named by its id, replacing any previous one
    pub fn write_record(&self, record: &Record) -> Result<()> {
        let id = record.id().ok_or(SmritiError::MissingPrimaryKey)?;
        validate_record_id(id)?;
        record.validate()?;

        write_atomic(&self.path, id, &record.encode(), self.sync_mode)?;
        tracing::debug!("Wrote record {} ({} fields) to {}", id, record.len(), self.path.display());
        Ok(())
    }

    /// Rewrite the record file `file_name` with `record`
    ///
    /// Used by update: the file keeps its name even if the merge changed the
    /// `id` field.
    pub fn rewrite_record(&self, file_name: &str, record: &Record) -> Result<()> {
        record.validate()?;
        write_atomic(&self.path, file_name, &record.encode(), self.sync_mode)
    }

    /// Read one record file, `None` if it does not exist
    pub fn read_record(&self, file_name: &str) -> Result<Option<Record>> {
        validate_record_id(file_name)?;
        match fs::read_to_string(self.path.join(file_name)) {
            Ok(content) => Ok(Some(Record::decode(&content))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Names of all record files, sorted
    ///
    /// Skips the schema descriptor, hidden temp files and anything that is
    /// not a regular file.
    pub fn record_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();

        for entry in fs::read_dir(&self.path)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    tracing::warn!("Skipping non UTF-8 file {:?} in {}", raw, self.path.display());
                    continue;
                }
            };

            if name == SCHEMA_FILENAME || name.starts_with('.') {
                continue;
            }
            names.push(name);
        }

        names.sort();
        Ok(names)
    }

    /// Load every record as `(file name, record)`, ordered by file name
    pub fn scan(&self) -> Result<Vec<(String, Record)>> {
        let names = self.record_names()?;
        let mut rows = Vec::with_capacity(names.len());

        for name in names {
            match fs::read_to_string(self.path.join(&name)) {
                Ok(content) => rows.push((name, Record::decode(&content))),
                // Removed between listing and reading
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            }
        }

        tracing::debug!("Scanned {} records in {}", rows.len(), self.path.display());
        Ok(rows)
    }

    /// Remove one record file. Returns whether it existed.
    pub fn remove_record(&self, file_name: &str) -> Result<bool> {
        validate_record_id(file_name)?;
        match fs::remove_file(self.path.join(file_name)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Recursively delete the directory and everything in it
    pub fn destroy(&self) -> Result<()> {
        fs::remove_dir_all(&self.path)?;
        Ok(())
    }

    /// Directory path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}
