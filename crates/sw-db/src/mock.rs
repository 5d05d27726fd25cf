//! Recording test double for [`Database`].
//!
//! Records every call in order and can be scripted to fail at a chosen
//! point, so tests can assert exactly which statements ran and whether the
//! transaction committed or rolled back.

use crate::error::{DbError, DbResult};
use crate::traits::{Database, Transaction};
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

/// A call observed by [`MockDatabase`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Ping,
    Exec(String),
    Query(String),
    Begin,
    TxExec(String),
    Commit,
    Rollback,
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<MockCall>,
    tables: HashSet<String>,
    version: Option<i64>,
    fail_ping: bool,
    fail_begin: bool,
    fail_commit: bool,
    fail_on: Vec<String>,
}

/// In-process stand-in for a real database.
///
/// Understands just enough SQL to model a single-row version table:
/// `CREATE TABLE <name>` registers the table with version 0, and a committed
/// `... SET version=<n>` replaces the stored version.
#[derive(Debug, Default)]
pub struct MockDatabase {
    state: Mutex<MockState>,
}

impl MockDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend `table` already exists holding `version`.
    pub fn with_version(self, table: &str, version: i64) -> Self {
        {
            let mut state = self.state();
            state.tables.insert(table.to_string());
            state.version = Some(version);
        }
        self
    }

    /// Pretend `table` exists but has no rows.
    pub fn with_empty_table(self, table: &str) -> Self {
        self.state().tables.insert(table.to_string());
        self
    }

    pub fn fail_ping(self) -> Self {
        self.state().fail_ping = true;
        self
    }

    pub fn fail_begin(self) -> Self {
        self.state().fail_begin = true;
        self
    }

    pub fn fail_commit(self) -> Self {
        self.state().fail_commit = true;
        self
    }

    /// Fail any statement containing `fragment`.
    pub fn fail_on(self, fragment: &str) -> Self {
        self.state().fail_on.push(fragment.to_string());
        self
    }

    /// Every call in the order it happened.
    pub fn calls(&self) -> Vec<MockCall> {
        self.state().calls.clone()
    }

    /// Statements executed inside transactions.
    pub fn tx_statements(&self) -> Vec<String> {
        self.state()
            .calls
            .iter()
            .filter_map(|call| match call {
                MockCall::TxExec(sql) => Some(sql.clone()),
                _ => None,
            })
            .collect()
    }

    /// The currently committed version.
    pub fn version(&self) -> Option<i64> {
        self.state().version
    }

    pub fn committed(&self) -> bool {
        self.state().calls.contains(&MockCall::Commit)
    }

    pub fn rolled_back(&self) -> bool {
        self.state().calls.contains(&MockCall::Rollback)
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check_statement(state: &MockState, sql: &str) -> DbResult<()> {
        match state.fail_on.iter().find(|f| sql.contains(f.as_str())) {
            Some(fragment) => Err(DbError::ExecutionError(format!(
                "scripted failure on '{fragment}'"
            ))),
            None => Ok(()),
        }
    }
}

/// Parse the `<n>` out of `... SET version=<n>`.
fn updated_version(sql: &str) -> Option<i64> {
    let (_, value) = sql.rsplit_once("version=")?;
    value.trim().trim_end_matches(';').trim().parse().ok()
}

/// Parse `<name>` out of `CREATE TABLE <name> ...`.
fn created_table(sql: &str) -> Option<String> {
    let rest = sql.trim_start().strip_prefix("CREATE TABLE")?;
    let name = rest
        .trim_start()
        .split(|c: char| c.is_whitespace() || c == '(')
        .next()?;
    Some(name.to_string())
}

impl Database for MockDatabase {
    fn ping(&self) -> DbResult<()> {
        let mut state = self.state();
        state.calls.push(MockCall::Ping);
        if state.fail_ping {
            return Err(DbError::ConnectionError("scripted ping failure".to_string()));
        }
        Ok(())
    }

    fn begin(&self) -> DbResult<Box<dyn Transaction + '_>> {
        let mut state = self.state();
        state.calls.push(MockCall::Begin);
        if state.fail_begin {
            return Err(DbError::TransactionError(
                "scripted begin failure".to_string(),
            ));
        }
        Ok(Box::new(MockTransaction {
            db: self,
            staged_version: None,
            finished: false,
        }))
    }

    fn execute_batch(&self, sql: &str) -> DbResult<()> {
        let mut state = self.state();
        state.calls.push(MockCall::Exec(sql.to_string()));
        Self::check_statement(&state, sql)?;
        if let Some(table) = created_table(sql) {
            state.tables.insert(table);
            state.version = Some(0);
        }
        Ok(())
    }

    fn relation_exists(&self, name: &str) -> DbResult<bool> {
        Ok(self.state().tables.contains(name))
    }

    fn query_i64(&self, sql: &str) -> DbResult<Option<i64>> {
        let mut state = self.state();
        state.calls.push(MockCall::Query(sql.to_string()));
        Self::check_statement(&state, sql)?;
        if state.tables.is_empty() {
            return Err(DbError::TableNotFound(sql.to_string()));
        }
        Ok(state.version)
    }

    fn db_type(&self) -> &'static str {
        "mock"
    }
}

struct MockTransaction<'a> {
    db: &'a MockDatabase,
    staged_version: Option<i64>,
    finished: bool,
}

impl Transaction for MockTransaction<'_> {
    fn execute_batch(&mut self, sql: &str) -> DbResult<()> {
        let mut state = self.db.state();
        state.calls.push(MockCall::TxExec(sql.to_string()));
        MockDatabase::check_statement(&state, sql)?;
        if let Some(version) = updated_version(sql) {
            self.staged_version = Some(version);
        }
        Ok(())
    }

    fn commit(mut self: Box<Self>) -> DbResult<()> {
        self.finished = true;
        let mut state = self.db.state();
        if state.fail_commit {
            state.calls.push(MockCall::Rollback);
            return Err(DbError::TransactionError(
                "scripted commit failure".to_string(),
            ));
        }
        state.calls.push(MockCall::Commit);
        if let Some(version) = self.staged_version {
            state.version = Some(version);
        }
        Ok(())
    }

    fn rollback(mut self: Box<Self>) -> DbResult<()> {
        self.finished = true;
        self.db.state().calls.push(MockCall::Rollback);
        Ok(())
    }
}

impl Drop for MockTransaction<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.db.state().calls.push(MockCall::Rollback);
        }
    }
}
