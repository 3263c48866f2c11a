//! Operation Log Module
//!
//! Append-only audit trail of every call made against the store.
//!
//! ## Responsibilities
//! - Append one human-readable line per operation, in call order
//! - Report append failures instead of dropping them
//!
//! The log is write-only: nothing in the store ever reads it back, and it
//! plays no part in recovery.
//!
//! ## File Format
//! ```text
//! CREATE TABLE users
//! INSERT INTO users VALUES (1, John)
//! SELECT name FROM users WHERE id=1
//! UPDATE users SET name=Jim WHERE id=1
//! DELETE FROM users WHERE id=1
//! DROP TABLE users
//! ```

mod entry;
mod writer;

pub use entry::Operation;
pub use writer::OpLogWriter;
