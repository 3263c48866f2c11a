//! Command Module
//!
//! Text commands for the console and their results.
//!
//! ## Grammar
//! Keywords are case-insensitive; tokens are separated by whitespace.
//! ```text
//! CREATE TABLE <table> <col> <type> [<col> <type> ...]
//! DROP TABLE <table>
//! INSERT INTO <table> <col> <value> [<col> <value> ...]
//! SELECT <col> [<col> ...] FROM <table> [WHERE <col>=<value>]
//! UPDATE <table> SET <col>=<value> [<col>=<value> ...] WHERE <col>=<value>
//! DELETE FROM <table> WHERE <col>=<value>
//! SHOW TABLES
//! DESCRIBE <table>
//! ```

mod command;
mod outcome;
mod parser;

pub use command::Command;
pub use outcome::{Outcome, ALL_COLUMNS};
pub use parser::{parse_command, USAGE};
