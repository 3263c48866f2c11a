//! Tests for TableDir
//!
//! These tests verify:
//! - Directory creation and the schema descriptor
//! - Record writes, reads and atomic replacement
//! - Scans (ordering, skipped files)
//! - Record removal and recursive destroy

use std::fs;
use std::path::PathBuf;

use smritidb::config::SyncMode;
use smritidb::table::{Column, Record, TableDir};
use smritidb::SmritiError;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_table() -> (TempDir, TableDir) {
    let temp_dir = TempDir::new().unwrap();
    let dir = TableDir::new(temp_dir.path().join("users"), SyncMode::OsBuffered);
    dir.create(&[Column::new("id", "string"), Column::new("name", "string")])
        .unwrap();
    (temp_dir, dir)
}

fn record(pairs: &[(&str, &str)]) -> Record {
    pairs.iter().copied().collect()
}

// =============================================================================
// Create Tests
// =============================================================================

#[test]
fn test_create_makes_directory_with_schema() {
    let (_temp, dir) = setup_temp_table();

    assert!(dir.exists());
    assert_eq!(
        dir.columns().unwrap(),
        vec![Column::new("id", "string"), Column::new("name", "string")]
    );
    assert!(dir.record_names().unwrap().is_empty());
}

#[test]
fn test_create_existing_directory_fails() {
    let (_temp, dir) = setup_temp_table();

    let result = dir.create(&[Column::new("id", "string")]);

    assert!(matches!(result, Err(SmritiError::TableExists(name)) if name == "users"));
}

#[test]
fn test_create_rejects_bad_column_before_touching_disk() {
    let temp_dir = TempDir::new().unwrap();
    let path: PathBuf = temp_dir.path().join("t");
    let dir = TableDir::new(&path, SyncMode::OsBuffered);

    let result = dir.create(&[Column::new("a|b", "string")]);

    assert!(matches!(result, Err(SmritiError::MalformedField(_))));
    assert!(!path.exists());
}

#[test]
fn test_create_with_sync_mode_always() {
    let temp_dir = TempDir::new().unwrap();
    let dir = TableDir::new(temp_dir.path().join("t"), SyncMode::Always);

    dir.create(&[Column::new("id", "string")]).unwrap();
    dir.write_record(&record(&[("id", "1")])).unwrap();

    assert_eq!(dir.read_record("1").unwrap(), Some(record(&[("id", "1")])));
}

#[test]
fn test_missing_schema_reads_as_empty() {
    let (_temp, dir) = setup_temp_table();
    fs::remove_file(dir.path().join("columns")).unwrap();

    assert!(dir.columns().unwrap().is_empty());
}

// =============================================================================
// Record Tests
// =============================================================================

#[test]
fn test_write_and_read_record() {
    let (_temp, dir) = setup_temp_table();
    let row = record(&[("id", "7"), ("name", "Ann")]);

    dir.write_record(&row).unwrap();

    assert_eq!(dir.read_record("7").unwrap(), Some(row));
    assert_eq!(dir.read_record("8").unwrap(), None);
}

#[test]
fn test_write_leaves_no_temp_file() {
    let (_temp, dir) = setup_temp_table();

    dir.write_record(&record(&[("id", "1")])).unwrap();
    dir.write_record(&record(&[("id", "1"), ("name", "B")])).unwrap();

    let mut entries: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    entries.sort();
    assert_eq!(entries, vec!["1", "columns"]);
}

#[test]
fn test_write_record_requires_id() {
    let (_temp, dir) = setup_temp_table();

    let result = dir.write_record(&record(&[("name", "Ann")]));

    assert!(matches!(result, Err(SmritiError::MissingPrimaryKey)));
}

#[test]
fn test_rewrite_record_keeps_file_name() {
    let (_temp, dir) = setup_temp_table();
    dir.write_record(&record(&[("id", "1"), ("name", "A")])).unwrap();

    dir.rewrite_record("1", &record(&[("id", "2"), ("name", "A")]))
        .unwrap();

    assert_eq!(dir.record_names().unwrap(), vec!["1"]);
    assert_eq!(dir.read_record("1").unwrap().unwrap().id(), Some("2"));
}

// =============================================================================
// Scan Tests
// =============================================================================

#[test]
fn test_scan_orders_by_file_name() {
    let (_temp, dir) = setup_temp_table();
    for id in ["c", "a", "b"] {
        dir.write_record(&record(&[("id", id)])).unwrap();
    }

    let rows = dir.scan().unwrap();
    let names: Vec<&str> = rows.iter().map(|(name, _)| name.as_str()).collect();

    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn test_scan_skips_schema_hidden_and_subdirectories() {
    let (_temp, dir) = setup_temp_table();
    dir.write_record(&record(&[("id", "1")])).unwrap();
    fs::write(dir.path().join(".2.tmp"), "id|2\n").unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();

    assert_eq!(dir.record_names().unwrap(), vec!["1"]);
    assert_eq!(dir.scan().unwrap().len(), 1);
}

#[test]
fn test_scan_parses_hand_written_files() {
    let (_temp, dir) = setup_temp_table();
    fs::write(dir.path().join("9"), "id|9\nnot a field\nnote|x|y\n").unwrap();

    let rows = dir.scan().unwrap();

    assert_eq!(rows[0].1, record(&[("id", "9"), ("note", "x|y")]));
}

// =============================================================================
// Removal Tests
// =============================================================================

#[test]
fn test_remove_record() {
    let (_temp, dir) = setup_temp_table();
    dir.write_record(&record(&[("id", "1")])).unwrap();

    assert!(dir.remove_record("1").unwrap());
    assert!(!dir.remove_record("1").unwrap());
    assert!(dir.record_names().unwrap().is_empty());
}

#[test]
fn test_remove_record_refuses_schema() {
    let (_temp, dir) = setup_temp_table();

    assert!(matches!(
        dir.remove_record("columns"),
        Err(SmritiError::InvalidRecordId(_))
    ));
    assert!(dir.path().join("columns").exists());
}

#[test]
fn test_destroy_removes_everything() {
    let (_temp, dir) = setup_temp_table();
    dir.write_record(&record(&[("id", "1")])).unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("nested").join("f"), "x").unwrap();

    dir.destroy().unwrap();

    assert!(!dir.exists());
}

#[test]
fn test_destroy_missing_directory_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let dir = TableDir::new(temp_dir.path().join("ghost"), SyncMode::OsBuffered);

    assert!(matches!(dir.destroy(), Err(SmritiError::Io(_))));
}
