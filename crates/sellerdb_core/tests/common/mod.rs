//! Shared fixtures for repository integration tests.
#![allow(dead_code)]

use chrono::NaiveDate;
use sellerdb_core::{ConnectionProvider, DbConfig, Department, Seller};

const SCHEMA_SQL: &str = include_str!("../fixtures/schema.sql");

/// In-memory provider with the seller schema and three departments seeded.
pub fn seeded_provider() -> ConnectionProvider {
    let provider = ConnectionProvider::from_config(DbConfig::new(":memory:"));
    provider
        .connection()
        .unwrap()
        .execute_batch(SCHEMA_SQL)
        .unwrap();
    provider
}

pub fn books() -> Department {
    Department::new(1, "Books")
}

pub fn computers() -> Department {
    Department::new(2, "Computers")
}

pub fn electronics() -> Department {
    Department::new(3, "Electronics")
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn seller(name: &str, department: Department) -> Seller {
    Seller::new(
        name,
        format!("{}@gmail.com", name.to_lowercase()),
        date(1990, 6, 15),
        2500.0,
        department,
    )
}
