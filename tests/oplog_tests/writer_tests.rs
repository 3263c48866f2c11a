//! Tests for OpLogWriter
//!
//! These tests verify:
//! - Opening creates the file without truncating it
//! - One line per appended operation, in order
//! - Line breaks inside entries are escaped
//! - Open failures are reported

use std::fs;
use std::path::PathBuf;

use smritidb::oplog::{OpLogWriter, Operation};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_log() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("operations.log");
    (temp_dir, log_path)
}

fn create(table: &str) -> Operation {
    Operation::CreateTable {
        table: table.to_string(),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[test]
fn test_open_creates_empty_file() {
    let (_temp, log_path) = setup_temp_log();

    let writer = OpLogWriter::open(&log_path).unwrap();

    assert!(log_path.exists());
    assert_eq!(fs::read_to_string(&log_path).unwrap(), "");
    assert_eq!(writer.entries_written(), 0);
    assert_eq!(writer.path(), log_path.as_path());
}

#[test]
fn test_append_in_order() {
    let (_temp, log_path) = setup_temp_log();
    let mut writer = OpLogWriter::open(&log_path).unwrap();

    writer.append(&create("a")).unwrap();
    writer
        .append(&Operation::Delete {
            table: "a".to_string(),
            condition: "id=1".to_string(),
        })
        .unwrap();
    writer
        .append(&Operation::DropTable {
            table: "a".to_string(),
        })
        .unwrap();

    assert_eq!(
        fs::read_to_string(&log_path).unwrap(),
        "CREATE TABLE a\nDELETE FROM a WHERE id=1\nDROP TABLE a\n"
    );
    assert_eq!(writer.entries_written(), 3);
}

#[test]
fn test_reopen_appends_instead_of_truncating() {
    let (_temp, log_path) = setup_temp_log();

    let mut writer = OpLogWriter::open(&log_path).unwrap();
    writer.append(&create("first")).unwrap();
    drop(writer);

    let mut writer = OpLogWriter::open(&log_path).unwrap();
    writer.append(&create("second")).unwrap();

    assert_eq!(
        fs::read_to_string(&log_path).unwrap(),
        "CREATE TABLE first\nCREATE TABLE second\n"
    );
    assert_eq!(writer.entries_written(), 1);
}

#[test]
fn test_line_breaks_are_escaped() {
    let (_temp, log_path) = setup_temp_log();
    let mut writer = OpLogWriter::open(&log_path).unwrap();

    writer
        .append(&Operation::Select {
            table: "t".to_string(),
            columns: vec!["id".to_string()],
            condition: "a=b\nDROP TABLE t".to_string(),
        })
        .unwrap();

    let content = fs::read_to_string(&log_path).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert_eq!(content, "SELECT id FROM t WHERE a=b\\nDROP TABLE t\n");
}

#[test]
fn test_open_on_directory_fails() {
    let temp_dir = TempDir::new().unwrap();

    assert!(OpLogWriter::open(temp_dir.path()).is_err());
}

#[test]
fn test_append_fails_when_log_is_replaced_by_directory() {
    let (_temp, log_path) = setup_temp_log();
    let mut writer = OpLogWriter::open(&log_path).unwrap();

    fs::remove_file(&log_path).unwrap();
    fs::create_dir(&log_path).unwrap();

    assert!(writer.append(&create("t")).is_err());
    assert_eq!(writer.entries_written(), 0);
}
