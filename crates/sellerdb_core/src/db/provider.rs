//! Lazily opened, caller-owned SQLite connection.
//!
//! # Invariants
//! - Configuration is read only when the first connection is requested.
//! - Returned connections honor the configured `foreign_keys` and busy timeout.
//! - A provider holds at most one open connection.
//!
//! The provider is single-threaded (`!Sync`); callers sharing it across
//! threads must add their own synchronization.

use super::config::DbConfig;
use super::{DbError, DbResult};
use log::{error, info};
use once_cell::unsync::OnceCell;
use rusqlite::Connection;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone)]
enum ConfigSource {
    PropertiesFile(PathBuf),
    Inline(DbConfig),
}

impl ConfigSource {
    fn mode(&self) -> &'static str {
        match self {
            Self::PropertiesFile(_) => "properties",
            Self::Inline(_) => "inline",
        }
    }

    fn load(&self) -> DbResult<DbConfig> {
        match self {
            Self::PropertiesFile(path) => Ok(DbConfig::from_properties_file(path)?),
            Self::Inline(config) => Ok(config.clone()),
        }
    }
}

/// Owner of the connection shared by every repository built from it.
pub struct ConnectionProvider {
    source: ConfigSource,
    conn: OnceCell<Connection>,
}

impl ConnectionProvider {
    /// Creates a provider that reads `path` on the first connection request.
    pub fn from_properties_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: ConfigSource::PropertiesFile(path.into()),
            conn: OnceCell::new(),
        }
    }

    /// Creates a provider from an in-process configuration.
    pub fn from_config(config: DbConfig) -> Self {
        Self {
            source: ConfigSource::Inline(config),
            conn: OnceCell::new(),
        }
    }

    /// Returns the shared connection, opening it on first use.
    ///
    /// # Errors
    /// - `DbError::Configuration` when the property file cannot be loaded.
    /// - `DbError::Connection` when SQLite fails to open or configure.
    pub fn connection(&self) -> DbResult<&Connection> {
        self.conn.get_or_try_init(|| self.open())
    }

    /// Returns whether a connection is currently cached.
    pub fn is_open(&self) -> bool {
        self.conn.get().is_some()
    }

    /// Closes the cached connection, if any.
    ///
    /// Calling this on a provider that never opened, or twice in a row, is a
    /// no-op. On failure the connection stays cached.
    pub fn close_connection(&mut self) -> DbResult<()> {
        let Some(conn) = self.conn.take() else {
            return Ok(());
        };

        match conn.close() {
            Ok(()) => {
                info!("event=db_close module=db status=ok");
                Ok(())
            }
            Err((conn, err)) => {
                error!(
                    "event=db_close module=db status=error error_code=db_close_failed error={}",
                    err
                );
                self.conn = OnceCell::from(conn);
                Err(DbError::Connection(err))
            }
        }
    }

    fn open(&self) -> DbResult<Connection> {
        let started_at = Instant::now();
        let mode = self.source.mode();
        info!("event=db_open module=db status=start mode={mode}");

        let result = self
            .source
            .load()
            .and_then(|config| connect(&config));

        match &result {
            Ok(_) => info!(
                "event=db_open module=db status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code={} error={}",
                started_at.elapsed().as_millis(),
                error_code(err),
                err
            ),
        }

        result
    }
}

fn connect(config: &DbConfig) -> DbResult<Connection> {
    let conn = Connection::open(&config.url).map_err(DbError::Connection)?;
    conn.pragma_update(None, "foreign_keys", config.foreign_keys)
        .map_err(DbError::Connection)?;
    conn.busy_timeout(config.busy_timeout)
        .map_err(DbError::Connection)?;
    Ok(conn)
}

fn error_code(err: &DbError) -> &'static str {
    match err {
        DbError::Configuration(_) => "db_config_failed",
        DbError::Connection(_) => "db_open_failed",
        DbError::Resource(_) => "db_resource_failed",
    }
}
