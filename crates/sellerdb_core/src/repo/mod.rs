//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the seller data access contract.
//! - Isolate SQL and row mapping from callers.
//!
//! # Invariants
//! - Callers obtain repositories through the factory and see only the trait.
//! - Repository APIs return semantic errors (`NotFound`, `Integrity`) in
//!   addition to store errors.

pub mod factory;
pub mod mapper;
pub mod seller_repo;
