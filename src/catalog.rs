//! Catalog
//!
//! In-memory map of table name → table directory, cached in `{root}/metadata`
//! as `name|path` lines.
//!
//! The catalog is a cache, not the source of truth: a table exists iff its
//! directory exists. `reconcile` rebuilds the cache from the directory tree.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::SyncMode;
use crate::error::{Result, SmritiError};
use crate::table::{self, format, SCHEMA_FILENAME};

/// Table name → directory path
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: BTreeMap<String, PathBuf>,
}

/// What `Catalog::reconcile` changed
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReconcileResult {
    /// Table directories found on disk but missing from the catalog
    pub added: Vec<String>,

    /// Catalog entries whose directory no longer exists under the root
    pub removed: Vec<String>,

    /// Entries whose stored path was replaced with `root/name`
    pub relocated: Vec<String>,
}

impl ReconcileResult {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.relocated.is_empty()
    }
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from a metadata file
    ///
    /// A missing file is not an error and yields an empty catalog. Lines
    /// without a separator are skipped with a warning; a file that is not
    /// UTF-8 text is reported as `Corruption`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::new()),
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Err(SmritiError::Corruption(format!(
                    "{} is not valid UTF-8",
                    path.display()
                )))
            }
            Err(e) => return Err(e.into()),
        };

        let entries = format::parse_pairs(&content)
            .into_iter()
            .map(|(name, table_path)| (name, PathBuf::from(table_path)))
            .collect();

        Ok(Self { entries })
    }

    /// Write every entry to the metadata file, replacing its contents
    pub fn save(&self, path: &Path, sync: SyncMode) -> Result<()> {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                SmritiError::Config(format!("invalid metadata path {}", path.display()))
            })?;

        let rendered: Vec<(&str, String)> = self
            .entries
            .iter()
            .map(|(name, table_path)| (name.as_str(), table_path.display().to_string()))
            .collect();
        let body = format::encode_pairs(rendered.iter().map(|(n, p)| (*n, p.as_str())));

        table::write_atomic(dir, file_name, &body, sync)
    }

    /// Add or replace an entry
    pub fn register(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) {
        self.entries.insert(name.into(), path.into());
    }

    /// Remove an entry, returning its path if it was present
    pub fn unregister(&mut self, name: &str) -> Option<PathBuf> {
        self.entries.remove(name)
    }

    /// Look up a table's directory
    pub fn get(&self, name: &str) -> Option<&Path> {
        self.entries.get(name).map(PathBuf::as_path)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Table names, sorted
    pub fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Make the catalog agree with the table directories under `root`
    ///
    /// A subdirectory counts as a table when it has a valid name and holds a
    /// schema descriptor. Every table found is mapped to `root/name`, so
    /// entries carrying an outdated path (moved root, relative path written
    /// from another working directory) are repointed rather than dropped.
    pub fn reconcile(&mut self, root: &Path) -> Result<ReconcileResult> {
        let mut result = ReconcileResult::default();
        let mut found = BTreeSet::new();

        for entry in fs::read_dir(root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if table::validate_table_name(&name).is_err() {
                continue;
            }
            if !entry.path().join(SCHEMA_FILENAME).is_file() {
                continue;
            }

            let path = root.join(&name);
            match self.entries.insert(name.clone(), path.clone()) {
                None => result.added.push(name.clone()),
                Some(previous) if previous != path => result.relocated.push(name.clone()),
                Some(_) => {}
            }
            found.insert(name);
        }

        let stale: Vec<String> = self
            .entries
            .keys()
            .filter(|name| !found.contains(*name))
            .cloned()
            .collect();
        for name in stale {
            self.entries.remove(&name);
            result.removed.push(name);
        }

        Ok(result)
    }
}
