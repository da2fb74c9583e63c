//! Repository construction over a provider's connection.

use crate::db::ConnectionProvider;
use crate::repo::seller_repo::{RepoResult, SellerRepository, SqliteSellerRepository};

/// Returns a seller repository bound to the provider's shared connection.
///
/// Opens the connection when the provider has not done so yet. Every call
/// builds a new repository; all of them share the one connection.
///
/// # Errors
/// - `RepoError::Db` when the connection cannot be obtained.
pub fn create_seller_repository(
    provider: &ConnectionProvider,
) -> RepoResult<Box<dyn SellerRepository + '_>> {
    let conn = provider.connection()?;
    Ok(Box::new(SqliteSellerRepository::new(conn)))
}
