//! Error types for the migration engine.

use sw_core::{CoreError, Direction};
use sw_db::DbError;
use thiserror::Error;

/// Migration engine errors.
#[derive(Error, Debug)]
pub enum MigrateError {
    /// Source directory, filename, migration file or config problem (MG001).
    #[error("[MG001] {0}")]
    Catalog(#[from] CoreError),

    /// Database did not answer a ping (MG002).
    #[error("[MG002] Database is unreachable: {0}")]
    Connection(#[source] DbError),

    /// Transaction could not be started (MG003).
    #[error("[MG003] Cannot start transaction: {0}")]
    Begin(#[source] DbError),

    /// A migration file failed to execute (MG004).
    #[error("[MG004] Cannot execute file '{file}' with content {content:?}: {source}")]
    Execution {
        file: String,
        content: String,
        source: DbError,
    },

    /// Requested version is the current version (MG005).
    #[error("[MG005] Requested version {version} equals current version")]
    EqualVersion { version: u64 },

    /// Nothing left to apply above the current version (MG006).
    #[error("[MG006] Migrations are up to date at version {version}")]
    UpToDate { version: u64 },

    /// No migration files exist for the direction a version switch needs (MG007).
    #[error("[MG007] No {direction} migrations found in '{path}'")]
    NoMigrations { direction: Direction, path: String },

    /// Version table exists but holds no row (MG008).
    #[error("[MG008] No rows found in table '{table}'")]
    NoRows { table: String },

    /// Version table holds a value that cannot be a version (MG009).
    #[error("[MG009] Table '{table}' holds invalid version {value}")]
    InvalidVersion { table: String, value: i64 },

    /// Version could not be read (MG010).
    #[error("[MG010] Cannot read version from table '{table}': {source}")]
    ReadVersion { table: String, source: DbError },

    /// Version table could not be created (MG011).
    #[error("[MG011] Cannot create table '{table}': {source}")]
    CreateTable { table: String, source: DbError },

    /// Version update statement failed (MG012).
    #[error("[MG012] Cannot update version of migrations to {version}: {source}")]
    UpdateVersion { version: u64, source: DbError },

    /// Commit failed; the transaction was rolled back (MG013).
    #[error("[MG013] Cannot commit migrations: {0}")]
    Commit(#[source] DbError),
}

/// Broad failure class of a [`MigrateError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad source directory, filename, direction or config
    Configuration,
    /// Database unreachable or transaction not started
    Connectivity,
    /// A migration file's SQL failed
    Execution,
    /// The requested operation makes no sense for the current version
    State,
    /// The version watermark could not be stored
    Persistence,
}

impl MigrateError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MigrateError::Catalog(_) => ErrorKind::Configuration,
            MigrateError::Connection(_)
            | MigrateError::Begin(_)
            | MigrateError::ReadVersion { .. } => ErrorKind::Connectivity,
            MigrateError::Execution { .. } => ErrorKind::Execution,
            MigrateError::EqualVersion { .. }
            | MigrateError::UpToDate { .. }
            | MigrateError::NoMigrations { .. }
            | MigrateError::NoRows { .. }
            | MigrateError::InvalidVersion { .. } => ErrorKind::State,
            MigrateError::CreateTable { .. }
            | MigrateError::UpdateVersion { .. }
            | MigrateError::Commit(_) => ErrorKind::Persistence,
        }
    }
}

/// Result type alias for [`MigrateError`].
pub type MigrateResult<T> = Result<T, MigrateError>;
