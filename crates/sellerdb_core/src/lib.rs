//! Data access layer for sellers and their departments.
//! Callers obtain a `SellerRepository` from a `ConnectionProvider` through
//! `create_seller_repository` and never depend on the SQLite implementation.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use db::{
    close_cursor, close_statement, ConfigError, ConnectionProvider, DbConfig, DbError, DbResult,
    DEFAULT_PROPERTIES_FILE,
};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::department::{Department, DepartmentId};
pub use model::seller::{Seller, SellerId};
pub use repo::factory::create_seller_repository;
pub use repo::mapper::{map_department, map_seller, MappingError};
pub use repo::seller_repo::{RepoError, RepoResult, SellerRepository, SqliteSellerRepository};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
