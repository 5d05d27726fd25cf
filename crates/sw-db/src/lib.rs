//! sw-db - Database abstraction layer for stepwise
//!
//! This crate provides the `Database` and `Transaction` capability traits,
//! a DuckDB implementation, and (behind `test-support`) a recording test
//! double.

pub mod duckdb;
pub mod error;
#[cfg(any(test, feature = "test-support"))]
pub mod mock;
pub mod traits;

pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use traits::{Database, Transaction};
