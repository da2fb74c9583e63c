//! Row-to-entity mapping for the seller/department join.
//!
//! # Invariants
//! - Mappers read the current row only; positioning is the caller's job.
//! - Mappers never touch the connection or advance the cursor.

use crate::model::department::{Department, DepartmentId};
use crate::model::seller::Seller;
use rusqlite::types::FromSql;
use rusqlite::Row;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

pub const SELLER_ID_COLUMN: &str = "Id";
pub const SELLER_NAME_COLUMN: &str = "Name";
pub const SELLER_EMAIL_COLUMN: &str = "Email";
pub const SELLER_BIRTH_DATE_COLUMN: &str = "BirthDate";
pub const SELLER_BASE_SALARY_COLUMN: &str = "BaseSalary";
pub const DEPARTMENT_ID_COLUMN: &str = "DepartmentId";
/// Alias of `department.Name` in the join, distinct from `seller.Name`.
pub const DEPARTMENT_NAME_COLUMN: &str = "DepName";

/// A row lacked an expected column or held an incompatible value.
#[derive(Debug)]
pub struct MappingError {
    pub column: &'static str,
    pub source: rusqlite::Error,
}

impl Display for MappingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "cannot map column `{}`: {}", self.column, self.source)
    }
}

impl Error for MappingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Reads the department foreign key of the current row.
pub fn department_key(row: &Row<'_>) -> Result<DepartmentId, MappingError> {
    column(row, DEPARTMENT_ID_COLUMN)
}

/// Builds the department referenced by the current row.
pub fn map_department(row: &Row<'_>) -> Result<Department, MappingError> {
    Ok(Department {
        id: department_key(row)?,
        name: column(row, DEPARTMENT_NAME_COLUMN)?,
    })
}

/// Builds the seller of the current row and attaches `department`.
pub fn map_seller(row: &Row<'_>, department: Rc<Department>) -> Result<Seller, MappingError> {
    Ok(Seller {
        id: Some(column(row, SELLER_ID_COLUMN)?),
        name: column(row, SELLER_NAME_COLUMN)?,
        email: column(row, SELLER_EMAIL_COLUMN)?,
        base_salary: column(row, SELLER_BASE_SALARY_COLUMN)?,
        birth_date: column(row, SELLER_BIRTH_DATE_COLUMN)?,
        department,
    })
}

fn column<T: FromSql>(row: &Row<'_>, name: &'static str) -> Result<T, MappingError> {
    row.get(name)
        .map_err(|source| MappingError { column: name, source })
}
