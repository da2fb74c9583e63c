//! SQLite connection lifecycle and statement release helpers.
//!
//! # Responsibility
//! - Load connection configuration from a key-value property file.
//! - Open one connection per provider lazily and keep it until closed.
//! - Release statements and row cursors after every repository operation.
//!
//! # Invariants
//! - Repository operations never close the shared connection.
//! - Release helpers are no-ops for absent handles.

use rusqlite::{Rows, Statement};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod config;
mod provider;

pub use config::{ConfigError, DbConfig, DEFAULT_PROPERTIES_FILE};
pub use provider::ConnectionProvider;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    /// Property file missing, unreadable or incomplete.
    Configuration(ConfigError),
    /// Opening, configuring or closing the connection failed.
    Connection(rusqlite::Error),
    /// Releasing a statement failed.
    Resource(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration(err) => write!(f, "configuration error: {err}"),
            Self::Connection(err) => write!(f, "connection error: {err}"),
            Self::Resource(err) => write!(f, "resource release error: {err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Configuration(err) => Some(err),
            Self::Connection(err) => Some(err),
            Self::Resource(err) => Some(err),
        }
    }
}

impl From<ConfigError> for DbError {
    fn from(value: ConfigError) -> Self {
        Self::Configuration(value)
    }
}

/// Finalizes a prepared statement.
///
/// `None` is accepted so callers can release unconditionally.
///
/// # Errors
/// - Returns `DbError::Resource` when SQLite reports a finalize failure.
pub fn close_statement(stmt: Option<Statement<'_>>) -> DbResult<()> {
    match stmt {
        Some(stmt) => stmt.finalize().map_err(DbError::Resource),
        None => Ok(()),
    }
}

/// Releases a row cursor, resetting its statement.
///
/// `rusqlite` resets the statement when `Rows` is dropped and reports no
/// failure for it, so this cannot fail.
pub fn close_cursor(rows: Option<Rows<'_>>) {
    drop(rows);
}
