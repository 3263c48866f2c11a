//! Table Module
//!
//! One directory per table, one file per record.
//!
//! ## Responsibilities
//! - Create and destroy table directories
//! - Persist the advisory schema descriptor
//! - Read, write, scan and remove record files
//! - Atomic file replacement (temp file + rename)
//!
//! ## Directory Layout
//! ```text
//! {root}/{table}/
//!   ├── columns     name|type per line (never enforced)
//!   ├── 1           id|1, name|John, ...
//!   ├── 2
//!   └── .2.tmp      in-flight write, skipped by scans
//! ```

mod directory;
pub mod format;
mod record;

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::config::SyncMode;
use crate::error::{Result, SmritiError};

pub use directory::TableDir;
pub use record::{validate_record_id, Column, Record, PRIMARY_KEY};

/// File name of the schema descriptor inside every table directory
pub const SCHEMA_FILENAME: &str = "columns";

/// Root-level names a table may not take
const RESERVED_TABLE_NAMES: &[&str] = &["metadata", "operations.log"];

/// Check that a table name is a single, non-reserved directory name
pub fn validate_table_name(name: &str) -> Result<()> {
    if !record::is_plain_component(name) {
        return Err(SmritiError::InvalidTableName(format!(
            "{:?} is not a plain directory name",
            name
        )));
    }
    if RESERVED_TABLE_NAMES.contains(&name) {
        return Err(SmritiError::InvalidTableName(format!(
            "{:?} is reserved",
            name
        )));
    }
    Ok(())
}

/// Replace `dir/name` with `content` without exposing a partial file
///
/// Writes `dir/.name.tmp`, optionally syncs it, then renames it over the
/// target. Readers see either the old or the new content.
pub(crate) fn write_atomic(dir: &Path, name: &str, content: &str, sync: SyncMode) -> Result<()> {
    let tmp_path = dir.join(format!(".{}.tmp", name));
    let final_path = dir.join(name);

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&tmp_path)?;
    file.write_all(content.as_bytes())?;
    if sync == SyncMode::Always {
        file.sync_all()?;
    }
    drop(file);

    if let Err(e) = fs::rename(&tmp_path, &final_path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    // Make the rename itself durable
    if sync == SyncMode::Always {
        if let Ok(dir) = File::open(dir) {
            let _ = dir.sync_all();
        }
    }

    Ok(())
}
