//! Up, down and version orchestration.
//!
//! A [`Migrator`] holds no state between calls. Every entry point re-reads
//! the migration directory and the stored version, picks the files to run,
//! and hands them to a fresh [`Querier`].

use crate::error::{MigrateError, MigrateResult};
use crate::events::{EventSink, LogEvents};
use crate::querier::{Querier, RunReport};
use crate::store;
use serde::Serialize;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use sw_core::{catalog, validate_table_name, Config, Direction, MigrationFile};
use sw_db::Database;

static LOG_EVENTS: LogEvents = LogEvents;

/// Where migrations are read from and where the version is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigratorOptions {
    /// Migration source directory
    pub source: PathBuf,

    /// Version table name
    pub table: String,
}

impl MigratorOptions {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            table: store::DEFAULT_TABLE.to_string(),
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Options from a loaded config, with the source resolved against `root`.
    pub fn from_config(config: &Config, root: &Path) -> Self {
        Self::new(config.source_absolute(root)).with_table(config.table.clone())
    }
}

/// Snapshot of where the database stands relative to the source directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    /// Stored version
    pub current: u64,

    /// Highest up-migration version on disk
    pub latest: Option<u64>,

    /// Up migrations above the stored version, ascending
    pub pending: Vec<MigrationFile>,
}

/// Migration engine bound to one database handle and one source directory.
pub struct Migrator<'a> {
    db: &'a dyn Database,
    source: PathBuf,
    table: String,
    events: &'a dyn EventSink,
}

impl<'a> Migrator<'a> {
    /// Create a migrator using the default version table.
    ///
    /// Fails if `source` cannot be listed or the database does not answer.
    /// Creates the version table with version 0 if it does not exist.
    pub fn new(db: &'a dyn Database, source: impl Into<PathBuf>) -> MigrateResult<Self> {
        Self::with_options(db, MigratorOptions::new(source))
    }

    /// Create a migrator from explicit options.
    ///
    /// The table name must be a plain identifier; it is checked before the
    /// database is touched.
    pub fn with_options(db: &'a dyn Database, options: MigratorOptions) -> MigrateResult<Self> {
        validate_table_name(&options.table)?;
        catalog::read_dir(&options.source)?;
        store::ensure_table(db, &options.table)?;

        Ok(Self {
            db,
            source: options.source,
            table: options.table,
            events: &LOG_EVENTS,
        })
    }

    /// Report progress to `events` instead of the `log` facade.
    pub fn with_events(mut self, events: &'a dyn EventSink) -> Self {
        self.events = events;
        self
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn current_version(&self) -> MigrateResult<u64> {
        store::current_version(self.db, &self.table)
    }

    /// Apply every up migration above the stored version.
    pub fn up(&self) -> MigrateResult<RunReport> {
        let files = catalog::list_by_direction(&self.source, Direction::Up)?;
        let current = self.current_version()?;

        self.run(None, &files, Direction::Up, &|v| v <= current)
    }

    /// Revert every down migration at or below the stored version and reset
    /// it to 0.
    pub fn down(&self) -> MigrateResult<RunReport> {
        let files = catalog::list_by_direction(&self.source, Direction::Down)?;
        let current = self.current_version()?;

        self.run(Some(0), &files, Direction::Down, &|v| v > current)
    }

    /// Move the stored version to `target`, going up or down as needed.
    ///
    /// A target above the highest file version is clamped to it with a
    /// warning when the stored version is below it, and fails with
    /// [`MigrateError::UpToDate`] when the stored version equals it. A stored
    /// version already past every file moves straight to `target`.
    pub fn version(&self, target: u64) -> MigrateResult<RunReport> {
        let current = self.current_version()?;

        let direction = match target.cmp(&current) {
            Ordering::Greater => Direction::Up,
            Ordering::Less => Direction::Down,
            Ordering::Equal => return Err(MigrateError::EqualVersion { version: target }),
        };

        let files = catalog::list_by_direction(&self.source, direction)?;
        let latest = files
            .last()
            .map(|file| file.version)
            .ok_or_else(|| MigrateError::NoMigrations {
                direction,
                path: self.source.display().to_string(),
            })?;

        let mut target = target;
        if target > latest {
            if current < latest {
                self.events.warn(&format!(
                    "the selected version {target} is greater than the latest version in files {latest}. Latest version will be set to {latest}."
                ));
                target = latest;
            } else if current == latest {
                return Err(MigrateError::UpToDate { version: current });
            }
        }

        match direction {
            Direction::Up => self.run(Some(target), &files, direction, &|v| {
                v <= current || v > target
            }),
            Direction::Down => self.run(Some(target), &files, direction, &|v| {
                v <= target || v > current
            }),
        }
    }

    /// Stored version and the up migrations still to apply. Read-only.
    pub fn status(&self) -> MigrateResult<Status> {
        let files = catalog::list_by_direction(&self.source, Direction::Up)?;
        let current = self.current_version()?;
        let latest = files.last().map(|file| file.version);
        let pending = files
            .into_iter()
            .filter(|file| file.version > current)
            .collect();

        Ok(Status {
            current,
            latest,
            pending,
        })
    }

    fn run(
        &self,
        target: Option<u64>,
        files: &[MigrationFile],
        direction: Direction,
        skip: &dyn Fn(u64) -> bool,
    ) -> MigrateResult<RunReport> {
        log::debug!(
            "Running {} {direction} migration(s) from {}",
            files.len(),
            self.source.display()
        );
        let querier = Querier::open(self.db, &self.source, &self.table, self.events)?;
        querier.run_all(target, files, direction, skip)
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
