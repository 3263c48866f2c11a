//! Operation log writer
//!
//! Opens the log in append mode for each entry, so no file handle outlives
//! the call that uses it.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;

use super::Operation;

/// Appends entries to the operation log file
pub struct OpLogWriter {
    /// Path to the log file
    path: PathBuf,

    /// Entries appended through this writer
    entries_written: u64,
}

impl OpLogWriter {
    /// Create a writer for the log at `path`
    ///
    /// The file is created if needed, so a root directory that cannot hold
    /// the log is reported at open time rather than on the first append.
    pub fn open(path: &Path) -> Result<Self> {
        OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            entries_written: 0,
        })
    }

    /// Append one entry as a single line
    ///
    /// Line breaks inside the rendered entry are escaped so the file stays
    /// one entry per line.
    pub fn append(&mut self, operation: &Operation) -> Result<()> {
        let mut line = operation.to_string().replace('\r', "\\r").replace('\n', "\\n");
        line.push('\n');

        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.write_all(line.as_bytes())?;

        self.entries_written += 1;
        tracing::trace!("Logged operation: {}", operation);
        Ok(())
    }

    /// Number of entries appended since this writer was opened
    pub fn entries_written(&self) -> u64 {
        self.entries_written
    }

    /// Path to the log file
    pub fn path(&self) -> &Path {
        &self.path
    }
}
