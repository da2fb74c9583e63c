//! Seller repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert/update/delete/find APIs over the `seller` table.
//! - Rebuild seller/department graphs from the join query.
//!
//! # Invariants
//! - Every operation finalizes its statement; none closes the connection.
//! - Within one multi-row result, sellers with equal department ids share
//!   one `Rc<Department>`.
//! - Multi-row results are ordered by name, then by id.
//! - `update` does not verify that a row matched, unlike `delete_by_id`.

use crate::db::{close_cursor, close_statement, DbError, DbResult};
use crate::model::department::{Department, DepartmentId};
use crate::model::seller::{Seller, SellerId};
use crate::repo::mapper::{department_key, map_department, map_seller, MappingError};
use log::{debug, warn};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row, Statement};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;
use std::time::Instant;

const SELLER_SELECT_SQL: &str = "SELECT
    seller.Id AS Id,
    seller.Name AS Name,
    seller.Email AS Email,
    seller.BirthDate AS BirthDate,
    seller.BaseSalary AS BaseSalary,
    seller.DepartmentId AS DepartmentId,
    department.Name AS DepName
FROM seller
INNER JOIN department ON seller.DepartmentId = department.Id";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for seller persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Connection provider or statement release failure.
    Db(DbError),
    /// SQLite rejected statement preparation, binding or execution.
    Store(rusqlite::Error),
    /// A write did not take effect as required.
    Integrity(String),
    /// No seller matched the id of a delete.
    NotFound(SellerId),
    Mapping(MappingError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "store error: {err}"),
            Self::Integrity(message) => write!(f, "integrity error: {message}"),
            Self::NotFound(id) => write!(f, "seller not found: {id}"),
            Self::Mapping(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Integrity(_) => None,
            Self::NotFound(_) => None,
            Self::Mapping(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Store(value)
    }
}

impl From<MappingError> for RepoError {
    fn from(value: MappingError) -> Self {
        Self::Mapping(value)
    }
}

/// Repository interface for seller CRUD operations.
pub trait SellerRepository {
    /// Persists a new seller and stores the generated id in `seller.id`.
    fn insert(&self, seller: &mut Seller) -> RepoResult<SellerId>;
    /// Overwrites every mutable column of the row with `seller.id`.
    fn update(&self, seller: &Seller) -> RepoResult<()>;
    fn delete_by_id(&self, id: SellerId) -> RepoResult<()>;
    fn find_by_id(&self, id: SellerId) -> RepoResult<Option<Seller>>;
    fn find_all(&self) -> RepoResult<Vec<Seller>>;
    fn find_by_department(&self, department: &Department) -> RepoResult<Vec<Seller>>;
}

/// SQLite-backed seller repository over a borrowed connection.
pub struct SqliteSellerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSellerRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Runs the join query with an optional department filter.
    fn query_sellers(&self, department_id: Option<DepartmentId>) -> RepoResult<Vec<Seller>> {
        let mut sql = String::from(SELLER_SELECT_SQL);
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(department_id) = department_id {
            sql.push_str(" WHERE seller.DepartmentId = ?");
            bind_values.push(Value::Integer(department_id));
        }

        sql.push_str(" ORDER BY seller.Name ASC, seller.Id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let outcome = collect_sellers(&mut stmt, bind_values);
        finish(outcome, close_statement(Some(stmt)))
    }
}

impl SellerRepository for SqliteSellerRepository<'_> {
    fn insert(&self, seller: &mut Seller) -> RepoResult<SellerId> {
        let started_at = Instant::now();
        let mut stmt = self.conn.prepare(
            "INSERT INTO seller (
                Name,
                Email,
                BirthDate,
                BaseSalary,
                DepartmentId
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
        )?;

        let outcome = stmt
            .execute(params![
                seller.name.as_str(),
                seller.email.as_str(),
                seller.birth_date,
                seller.base_salary,
                seller.department_id(),
            ])
            .map_err(RepoError::from)
            .and_then(|changed| {
                if changed == 0 {
                    return Err(RepoError::Integrity("no rows affected".to_string()));
                }
                Ok(self.conn.last_insert_rowid())
            });

        let id = finish(outcome, close_statement(Some(stmt)))?;
        seller.id = Some(id);

        debug!(
            "event=seller_insert module=repo status=ok seller_id={} duration_ms={}",
            id,
            started_at.elapsed().as_millis()
        );
        Ok(id)
    }

    fn update(&self, seller: &Seller) -> RepoResult<()> {
        let Some(id) = seller.id else {
            return Err(RepoError::Integrity("seller has no id".to_string()));
        };

        let mut stmt = self.conn.prepare(
            "UPDATE seller
             SET
                Name = ?1,
                Email = ?2,
                BirthDate = ?3,
                BaseSalary = ?4,
                DepartmentId = ?5
             WHERE Id = ?6;",
        )?;

        let outcome = stmt
            .execute(params![
                seller.name.as_str(),
                seller.email.as_str(),
                seller.birth_date,
                seller.base_salary,
                seller.department_id(),
                id,
            ])
            .map_err(RepoError::from);

        // Zero matched rows is not an error here.
        let changed = finish(outcome, close_statement(Some(stmt)))?;
        debug!("event=seller_update module=repo status=ok seller_id={id} changed={changed}");
        Ok(())
    }

    fn delete_by_id(&self, id: SellerId) -> RepoResult<()> {
        let mut stmt = self.conn.prepare("DELETE FROM seller WHERE Id = ?1;")?;
        let outcome = stmt
            .execute([id])
            .map_err(RepoError::from)
            .and_then(|changed| {
                if changed == 0 {
                    return Err(RepoError::NotFound(id));
                }
                Ok(())
            });

        finish(outcome, close_statement(Some(stmt)))?;
        debug!("event=seller_delete module=repo status=ok seller_id={id}");
        Ok(())
    }

    fn find_by_id(&self, id: SellerId) -> RepoResult<Option<Seller>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELLER_SELECT_SQL} WHERE seller.Id = ?1;"))?;
        let outcome = first_seller(&mut stmt, id);
        finish(outcome, close_statement(Some(stmt)))
    }

    fn find_all(&self) -> RepoResult<Vec<Seller>> {
        self.query_sellers(None)
    }

    fn find_by_department(&self, department: &Department) -> RepoResult<Vec<Seller>> {
        self.query_sellers(Some(department.id))
    }
}

fn first_seller(stmt: &mut Statement<'_>, id: SellerId) -> RepoResult<Option<Seller>> {
    let mut rows = stmt.query([id])?;
    let seller = match rows.next()? {
        Some(row) => Some(map_seller(row, Rc::new(map_department(row)?))?),
        None => None,
    };
    close_cursor(Some(rows));
    Ok(seller)
}

fn collect_sellers(stmt: &mut Statement<'_>, bind_values: Vec<Value>) -> RepoResult<Vec<Seller>> {
    let mut rows = stmt.query(params_from_iter(bind_values))?;
    let mut departments: HashMap<DepartmentId, Rc<Department>> = HashMap::new();
    let mut sellers = Vec::new();

    while let Some(row) = rows.next()? {
        let department = shared_department(&mut departments, row)?;
        sellers.push(map_seller(row, department)?);
    }

    close_cursor(Some(rows));
    Ok(sellers)
}

fn shared_department(
    departments: &mut HashMap<DepartmentId, Rc<Department>>,
    row: &Row<'_>,
) -> RepoResult<Rc<Department>> {
    let department = match departments.entry(department_key(row)?) {
        Entry::Occupied(entry) => Rc::clone(entry.get()),
        Entry::Vacant(entry) => Rc::clone(entry.insert(Rc::new(map_department(row)?))),
    };
    Ok(department)
}

/// Combines an operation outcome with its statement release.
///
/// The operation's own error wins; a release failure behind it is only logged.
fn finish<T>(outcome: RepoResult<T>, released: DbResult<()>) -> RepoResult<T> {
    match (outcome, released) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(release_err)) => Err(release_err.into()),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(release_err)) => {
            warn!(
                "event=statement_release module=repo status=error error={} masked_by={}",
                release_err, err
            );
            Err(err)
        }
    }
}
