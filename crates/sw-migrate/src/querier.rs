//! Transactional execution of migration files.
//!
//! A [`Querier`] wraps exactly one open transaction. [`Querier::run_all`]
//! executes the selected files, writes the resolved version, and commits;
//! on any failure it rolls back before returning, so a run is never
//! partially visible.

use crate::error::{MigrateError, MigrateResult};
use crate::events::EventSink;
use crate::store;
use serde::Serialize;
use std::path::{Path, PathBuf};
use sw_core::{catalog, parse_version, Direction, MigrationFile};
use sw_db::{Database, DbResult, Transaction};

/// Outcome of a successful migration run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Direction the files were run in
    pub direction: Direction,

    /// Executed filenames, in execution order
    pub applied: Vec<String>,

    /// Number of files excluded by the skip predicate
    pub skipped: usize,

    /// Version written to the version table, if any
    pub version: Option<u64>,
}

impl RunReport {
    fn new(direction: Direction) -> Self {
        Self {
            direction,
            applied: Vec::new(),
            skipped: 0,
            version: None,
        }
    }
}

/// Transaction runner for a single migration run.
pub struct Querier<'a> {
    tx: Box<dyn Transaction + 'a>,
    base_path: PathBuf,
    table: String,
    events: &'a dyn EventSink,
}

impl<'a> Querier<'a> {
    /// Begin a transaction on `db` for files under `base_path`.
    pub fn open(
        db: &'a dyn Database,
        base_path: &Path,
        table: &str,
        events: &'a dyn EventSink,
    ) -> MigrateResult<Self> {
        let tx = db.begin().map_err(MigrateError::Begin)?;
        Ok(Self {
            tx,
            base_path: base_path.to_path_buf(),
            table: table.to_string(),
            events,
        })
    }

    /// Read `file` and execute its whole content as one batch.
    pub fn add(&mut self, file: &MigrationFile) -> MigrateResult<()> {
        let content = catalog::read_content(file)?;
        self.tx
            .execute_batch(&content)
            .map_err(|source| MigrateError::Execution {
                file: file.name.clone(),
                content,
                source,
            })
    }

    /// Execute a raw statement inside the transaction.
    pub fn exec(&mut self, sql: &str) -> DbResult<()> {
        self.tx.execute_batch(sql)
    }

    pub fn commit(self) -> MigrateResult<()> {
        let events = self.events;
        self.tx.commit().map_err(|e| {
            events.error(&format!("cannot commit queries: {e}"));
            MigrateError::Commit(e)
        })
    }

    pub fn rollback(self) {
        if let Err(e) = self.tx.rollback() {
            self.events.error(&format!("rollback failed: {e}"));
        }
    }

    /// Run `files` in `direction` and persist the resulting version.
    ///
    /// `files` must be ascending by version; `down` walks them in reverse.
    /// Files whose version satisfies `skip` are not executed. Going up, the
    /// persisted version is the maximum of `target` and every executed file
    /// version, so `None` persists the highest file run (or nothing if no
    /// file ran). Going down, `target` is persisted unchanged.
    pub fn run_all(
        mut self,
        target: Option<u64>,
        files: &[MigrationFile],
        direction: Direction,
        skip: &dyn Fn(u64) -> bool,
    ) -> MigrateResult<RunReport> {
        match self.apply(target, files, direction, skip) {
            Ok(report) => {
                self.commit()?;
                Ok(report)
            }
            Err(err) => {
                self.events.warn("Rolling back...");
                self.rollback();
                Err(err)
            }
        }
    }

    fn apply(
        &mut self,
        target: Option<u64>,
        files: &[MigrationFile],
        direction: Direction,
        skip: &dyn Fn(u64) -> bool,
    ) -> MigrateResult<RunReport> {
        let mut ordered: Vec<&MigrationFile> = files.iter().collect();
        if direction == Direction::Down {
            ordered.reverse();
        }

        let mut report = RunReport::new(direction);
        let mut version = target;

        for file in ordered {
            let file_version = parse_version(&file.name);
            if skip(file_version) {
                report.skipped += 1;
                continue;
            }
            if direction == Direction::Up {
                version = Some(version.map_or(file_version, |v| v.max(file_version)));
            }

            let display = self.base_path.join(&file.name);
            if let Err(err) = self.add(file) {
                self.events
                    .error(&format!("failed: {}", display.display()));
                self.events.error(&err.to_string());
                return Err(err);
            }
            self.events
                .info(&format!("Success: {}", display.display()));
            report.applied.push(file.name.clone());
        }

        if let Some(version) = version {
            let sql = store::update_version_sql(&self.table, version);
            if let Err(source) = self.exec(&sql) {
                self.events
                    .error(&format!("cannot update version of migrations: {source}"));
                return Err(MigrateError::UpdateVersion { version, source });
            }
            self.events.warn(&format!("New version {version}"));
        }

        report.version = version;
        Ok(report)
    }
}

#[cfg(test)]
#[path = "querier_test.rs"]
mod tests;
