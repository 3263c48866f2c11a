//! Text command parser
//!
//! Turns one console line into a `Command`. Syntax errors become
//! `SmritiError::Parse` before the store is ever called.

use crate::error::{Result, SmritiError};
use crate::table::{Column, Record};

use super::Command;

/// Help text listing every command form
pub const USAGE: &str = "Supported commands:
  CREATE TABLE <name> <col1> <type1> <col2> <type2> ...
  DROP TABLE <name>
  INSERT INTO <table> <col1> <val1> <col2> <val2> ...
  SELECT <col1> <col2> ... FROM <table> [WHERE <column>=<value>]
  UPDATE <table> SET <column1>=<value1> ... WHERE <column>=<value>
  DELETE FROM <table> WHERE <column>=<value>
  SHOW TABLES
  DESCRIBE <table>";

/// Parse a single command line
pub fn parse_command(input: &str) -> Result<Command> {
    let tokens: Vec<&str> = input.split_whitespace().collect();
    let Some(first) = tokens.first() else {
        return Err(parse_error("Empty command"));
    };

    match first.to_ascii_lowercase().as_str() {
        "create" => parse_create(&tokens),
        "drop" => parse_drop(&tokens),
        "insert" => parse_insert(&tokens),
        "select" => parse_select(&tokens),
        "update" => parse_update(&tokens),
        "delete" => parse_delete(&tokens),
        "show" => parse_show(&tokens),
        "describe" | "desc" => parse_describe(&tokens),
        _ => Err(parse_error(&format!("Invalid command. {}", USAGE))),
    }
}

/// CREATE TABLE <name> <col> <type> ...
fn parse_create(tokens: &[&str]) -> Result<Command> {
    expect_keyword(tokens, 1, "table")?;
    let table = table_at(tokens, 2)?;

    let defs = &tokens[3..];
    if defs.is_empty() {
        return Err(parse_error(
            "CREATE TABLE needs at least one column. Expected format: column_name column_type",
        ));
    }
    if defs.len() % 2 != 0 {
        return Err(parse_error(
            "Invalid column definition. Expected format: column_name column_type",
        ));
    }

    let columns = defs
        .chunks(2)
        .map(|pair| Column::new(pair[0], pair[1]))
        .collect();

    Ok(Command::CreateTable { table, columns })
}

/// DROP TABLE <name>
fn parse_drop(tokens: &[&str]) -> Result<Command> {
    expect_keyword(tokens, 1, "table")?;
    let table = table_at(tokens, 2)?;
    expect_end(tokens, 3)?;
    Ok(Command::DropTable { table })
}

/// INSERT INTO <table> <col> <val> ...
fn parse_insert(tokens: &[&str]) -> Result<Command> {
    expect_keyword(tokens, 1, "into")?;
    let table = table_at(tokens, 2)?;

    let pairs = &tokens[3..];
    if pairs.is_empty() || pairs.len() % 2 != 0 {
        return Err(parse_error(
            "Invalid value pair. Expected format: column_name value",
        ));
    }

    let record: Record = pairs.chunks(2).map(|pair| (pair[0], pair[1])).collect();
    Ok(Command::Insert { table, record })
}

/// SELECT <cols...> FROM <table> [WHERE <cond>]
fn parse_select(tokens: &[&str]) -> Result<Command> {
    const SYNTAX: &str =
        "Invalid SELECT syntax. Expected format: SELECT column1 column2 ... FROM table [WHERE column=value]";

    let from = position_of(tokens, "from").ok_or_else(|| parse_error(SYNTAX))?;
    let columns: Vec<String> = tokens[1..from].iter().map(|c| c.to_string()).collect();
    if columns.is_empty() {
        return Err(parse_error(SYNTAX));
    }

    let table = tokens
        .get(from + 1)
        .map(|t| t.to_string())
        .ok_or_else(|| parse_error(SYNTAX))?;

    let condition = match tokens.get(from + 2) {
        None => String::new(),
        Some(kw) if kw.eq_ignore_ascii_case("where") => {
            let condition = tokens.get(from + 3).ok_or_else(|| parse_error(SYNTAX))?;
            expect_end(tokens, from + 4)?;
            condition.to_string()
        }
        Some(_) => return Err(parse_error(SYNTAX)),
    };

    Ok(Command::Select {
        table,
        columns,
        condition,
    })
}

/// UPDATE <table> SET <col>=<val> ... WHERE <cond>
fn parse_update(tokens: &[&str]) -> Result<Command> {
    let table = table_at(tokens, 1)?;
    expect_keyword(tokens, 2, "set")?;

    let where_pos = position_of(&tokens[3..], "where")
        .map(|pos| pos + 3)
        .ok_or_else(|| parse_error("Invalid UPDATE syntax. Missing WHERE clause"))?;

    let assignments = &tokens[3..where_pos];
    if assignments.is_empty() {
        return Err(parse_error(
            "Invalid UPDATE syntax in SET clause. Expected format: column=value",
        ));
    }

    let mut changes = Record::new();
    for assignment in assignments {
        let (column, value) = assignment.split_once('=').ok_or_else(|| {
            parse_error("Invalid UPDATE syntax in SET clause. Expected format: column=value")
        })?;
        changes.set(column, value);
    }

    let condition = tokens
        .get(where_pos + 1)
        .ok_or_else(|| parse_error("Invalid UPDATE syntax. Missing WHERE condition"))?;
    expect_end(tokens, where_pos + 2)?;

    Ok(Command::Update {
        table,
        changes,
        condition: condition.to_string(),
    })
}

/// DELETE FROM <table> WHERE <cond>
fn parse_delete(tokens: &[&str]) -> Result<Command> {
    expect_keyword(tokens, 1, "from")?;
    let table = table_at(tokens, 2)?;
    expect_keyword(tokens, 3, "where")?;
    let condition = tokens
        .get(4)
        .ok_or_else(|| parse_error("Invalid DELETE syntax. Missing WHERE condition"))?;
    expect_end(tokens, 5)?;

    Ok(Command::Delete {
        table,
        condition: condition.to_string(),
    })
}

/// SHOW TABLES
fn parse_show(tokens: &[&str]) -> Result<Command> {
    expect_keyword(tokens, 1, "tables")?;
    expect_end(tokens, 2)?;
    Ok(Command::ShowTables)
}

/// DESCRIBE <table>
fn parse_describe(tokens: &[&str]) -> Result<Command> {
    let table = table_at(tokens, 1)?;
    expect_end(tokens, 2)?;
    Ok(Command::Describe { table })
}

// =============================================================================
// Helpers
// =============================================================================

fn parse_error(message: &str) -> SmritiError {
    SmritiError::Parse(message.to_string())
}

fn expect_keyword(tokens: &[&str], index: usize, keyword: &str) -> Result<()> {
    match tokens.get(index) {
        Some(token) if token.eq_ignore_ascii_case(keyword) => Ok(()),
        Some(token) => Err(parse_error(&format!(
            "Expected '{}' but found '{}'",
            keyword.to_ascii_uppercase(),
            token
        ))),
        None => Err(parse_error(&format!(
            "Expected '{}'",
            keyword.to_ascii_uppercase()
        ))),
    }
}

fn expect_end(tokens: &[&str], index: usize) -> Result<()> {
    match tokens.get(index) {
        None => Ok(()),
        Some(extra) => Err(parse_error(&format!("Unexpected token '{}'", extra))),
    }
}

fn table_at(tokens: &[&str], index: usize) -> Result<String> {
    tokens
        .get(index)
        .map(|t| t.to_string())
        .ok_or_else(|| parse_error("Missing table name"))
}

fn position_of(tokens: &[&str], keyword: &str) -> Option<usize> {
    tokens.iter().position(|t| t.eq_ignore_ascii_case(keyword))
}
