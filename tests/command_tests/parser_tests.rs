//! Tests for the text command parser
//!
//! These tests verify:
//! - Every command form parses into the right `Command`
//! - Keywords are case-insensitive, names and values are not
//! - Syntax errors are reported as `SmritiError::Parse`

use smritidb::command::{parse_command, Command};
use smritidb::{Column, Record, SmritiError};

// =============================================================================
// Helper Functions
// =============================================================================

fn record(pairs: &[(&str, &str)]) -> Record {
    pairs.iter().copied().collect()
}

fn assert_parse_error(input: &str) {
    match parse_command(input) {
        Err(SmritiError::Parse(_)) => {}
        other => panic!("expected parse error for {:?}, got {:?}", input, other),
    }
}

// =============================================================================
// Table Lifecycle
// =============================================================================

#[test]
fn test_parse_create_table() {
    let command = parse_command("create table users id string name string age int").unwrap();

    assert_eq!(
        command,
        Command::CreateTable {
            table: "users".to_string(),
            columns: vec![
                Column::new("id", "string"),
                Column::new("name", "string"),
                Column::new("age", "int"),
            ],
        }
    );
}

#[test]
fn test_parse_create_table_odd_definitions() {
    assert_parse_error("create table invalid_table id string name");
}

#[test]
fn test_parse_create_table_without_columns() {
    assert_parse_error("create table users");
    assert_parse_error("create users id string");
}

#[test]
fn test_parse_drop_table() {
    assert_eq!(
        parse_command("DROP TABLE users").unwrap(),
        Command::DropTable {
            table: "users".to_string()
        }
    );
    assert_parse_error("drop table");
    assert_parse_error("drop table a b");
}

// =============================================================================
// Insert
// =============================================================================

#[test]
fn test_parse_insert() {
    assert_eq!(
        parse_command("insert into users id 1 name John age 25").unwrap(),
        Command::Insert {
            table: "users".to_string(),
            record: record(&[("id", "1"), ("name", "John"), ("age", "25")]),
        }
    );
}

#[test]
fn test_parse_insert_without_id_is_left_to_the_store() {
    let command = parse_command("insert into users name Bob age 35").unwrap();
    assert!(matches!(command, Command::Insert { record, .. } if record.id().is_none()));
}

#[test]
fn test_parse_insert_dangling_column() {
    assert_parse_error("insert into users id 1 name");
    assert_parse_error("insert into users");
}

// =============================================================================
// Select
// =============================================================================

#[test]
fn test_parse_select_without_where() {
    assert_eq!(
        parse_command("select name age from users").unwrap(),
        Command::Select {
            table: "users".to_string(),
            columns: vec!["name".to_string(), "age".to_string()],
            condition: String::new(),
        }
    );
}

#[test]
fn test_parse_select_with_where() {
    assert_eq!(
        parse_command("SELECT * FROM users WHERE age=30").unwrap(),
        Command::Select {
            table: "users".to_string(),
            columns: vec!["*".to_string()],
            condition: "age=30".to_string(),
        }
    );
}

#[test]
fn test_parse_select_errors() {
    assert_parse_error("select from users");
    assert_parse_error("select name users");
    assert_parse_error("select name from");
    assert_parse_error("select name from users where");
    assert_parse_error("select name from users order by name");
}

// =============================================================================
// Update / Delete
// =============================================================================

#[test]
fn test_parse_update() {
    assert_eq!(
        parse_command("update users set name=Jim age=40 where id=1").unwrap(),
        Command::Update {
            table: "users".to_string(),
            changes: record(&[("name", "Jim"), ("age", "40")]),
            condition: "id=1".to_string(),
        }
    );
}

#[test]
fn test_parse_update_errors() {
    assert_parse_error("update users set name=Jim");
    assert_parse_error("update users set where id=1");
    assert_parse_error("update users set name Jim where id=1");
    assert_parse_error("update users name=Jim where id=1");
    assert_parse_error("update users set name=Jim where");
}

#[test]
fn test_parse_delete() {
    assert_eq!(
        parse_command("delete from users where id=2").unwrap(),
        Command::Delete {
            table: "users".to_string(),
            condition: "id=2".to_string(),
        }
    );
    assert_parse_error("delete from users");
    assert_parse_error("delete users where id=2");
}

// =============================================================================
// Introspection / Misc
// =============================================================================

#[test]
fn test_parse_show_and_describe() {
    assert_eq!(parse_command("show tables").unwrap(), Command::ShowTables);
    assert_eq!(
        parse_command("describe users").unwrap(),
        Command::Describe {
            table: "users".to_string()
        }
    );
    assert_parse_error("show");
}

#[test]
fn test_parse_keeps_name_case() {
    let command = parse_command("INSERT INTO Users ID 1").unwrap();
    assert_eq!(
        command,
        Command::Insert {
            table: "Users".to_string(),
            record: record(&[("ID", "1")]),
        }
    );
}

#[test]
fn test_parse_invalid_and_empty() {
    assert_parse_error("invalid command");
    assert_parse_error("");
    assert_parse_error("   ");
}
