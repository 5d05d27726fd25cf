//! sw-core - Core library for stepwise
//!
//! This crate provides the migration file model, the directory catalog that
//! discovers migration files for a direction, and configuration parsing
//! shared by the engine and the CLI.

pub mod catalog;
pub mod config;
pub mod direction;
pub mod error;
pub mod migration_file;

pub use catalog::{list_by_direction, read_content, read_dir};
pub use config::{validate_table_name, Config, DatabaseConfig, DbType};
pub use direction::Direction;
pub use error::{CoreError, CoreResult};
pub use migration_file::{parse_version, MigrationFile};
