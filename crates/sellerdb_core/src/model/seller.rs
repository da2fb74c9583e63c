//! Seller domain model.
//!
//! # Invariants
//! - `id` is `None` until the store assigns one on insert.
//! - `department` is shared, not owned: sellers from one result set point at
//!   the same `Department` allocation when their department ids match.

use super::department::{Department, DepartmentId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Store-assigned seller identity.
pub type SellerId = i64;

/// Sales employee record joined with its department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    /// Generated key; `None` before insertion.
    pub id: Option<SellerId>,
    pub name: String,
    pub email: String,
    /// Calendar date without time zone; stored as `YYYY-MM-DD`.
    pub birth_date: NaiveDate,
    pub base_salary: f64,
    pub department: Rc<Department>,
}

impl Seller {
    /// Creates a seller awaiting insertion.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        birth_date: NaiveDate,
        base_salary: f64,
        department: impl Into<Rc<Department>>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            birth_date,
            base_salary,
            department: department.into(),
        }
    }

    /// Creates a seller with a known identity.
    ///
    /// Used by the row mapper and by callers that already hold a stored id.
    pub fn with_id(
        id: SellerId,
        name: impl Into<String>,
        email: impl Into<String>,
        birth_date: NaiveDate,
        base_salary: f64,
        department: impl Into<Rc<Department>>,
    ) -> Self {
        Self {
            id: Some(id),
            ..Self::new(name, email, birth_date, base_salary, department)
        }
    }

    /// Foreign key persisted in `seller.DepartmentId`.
    pub fn department_id(&self) -> DepartmentId {
        self.department.id
    }

    /// Returns whether the store has assigned an id.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

impl Display for Seller {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let id = self
            .id
            .map_or_else(|| "unsaved".to_string(), |id| id.to_string());
        write!(
            f,
            "Seller [id={id}, name={}, email={}, birthDate={}, baseSalary={:.2}, department={}]",
            self.name, self.email, self.birth_date, self.base_salary, self.department
        )
    }
}
