//! Department domain model.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Store-assigned department identity.
pub type DepartmentId = i64;

/// Organizational unit a seller belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
}

impl Department {
    pub fn new(id: DepartmentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl Display for Department {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Department [id={}, name={}]", self.id, self.name)
    }
}
