//! Seller/department domain model.
//!
//! # Responsibility
//! - Define the records materialized by the repository layer.
//!
//! # Invariants
//! - A seller always references exactly one department.
//! - Sellers loaded in one query share `Department` instances by id.

pub mod department;
pub mod seller;
