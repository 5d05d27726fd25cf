//! Persisted schema version.
//!
//! The version lives in a single-row table (default `migrations`) with one
//! integer `version` column. The table is created with a seed row of 0 the
//! first time a migrator is built against a database. Updates are never
//! issued from here: [`update_version_sql`] is executed by the querier as
//! the last statement of its transaction.

use crate::error::{MigrateError, MigrateResult};
use sw_db::Database;

/// Default name of the version table.
pub const DEFAULT_TABLE: &str = "migrations";

/// DDL creating `table` with its seed row.
pub fn create_table_sql(table: &str) -> String {
    format!(
        "CREATE TABLE {table} (\n    \
             version BIGINT NOT NULL DEFAULT 0\n\
         );\n\
         INSERT INTO {table} (version) VALUES (0);"
    )
}

/// Query reading the current version.
pub fn select_version_sql(table: &str) -> String {
    format!("SELECT version FROM {table}")
}

/// Statement overwriting the stored version.
pub fn update_version_sql(table: &str, version: u64) -> String {
    format!("UPDATE {table} SET version={version}")
}

/// Ping the database and create the version table if it is missing.
pub fn ensure_table(db: &dyn Database, table: &str) -> MigrateResult<()> {
    db.ping().map_err(MigrateError::Connection)?;

    let exists = db
        .relation_exists(table)
        .map_err(MigrateError::Connection)?;
    if exists {
        return Ok(());
    }

    log::info!("Creating version table {table} on {}", db.db_type());
    db.execute_batch(&create_table_sql(table))
        .map_err(|source| MigrateError::CreateTable {
            table: table.to_string(),
            source,
        })
}

/// Return the stored version.
pub fn current_version(db: &dyn Database, table: &str) -> MigrateResult<u64> {
    let value = db
        .query_i64(&select_version_sql(table))
        .map_err(|source| MigrateError::ReadVersion {
            table: table.to_string(),
            source,
        })?
        .ok_or_else(|| MigrateError::NoRows {
            table: table.to_string(),
        })?;

    u64::try_from(value).map_err(|_| MigrateError::InvalidVersion {
        table: table.to_string(),
        value,
    })
}
