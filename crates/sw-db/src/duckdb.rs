//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::{Database, Transaction};
use duckdb::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// DuckDB database backend
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }
}

impl Database for DuckDbBackend {
    fn ping(&self) -> DbResult<()> {
        let conn = self.lock()?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i32>(0))
            .map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(())
    }

    fn begin(&self) -> DbResult<Box<dyn Transaction + '_>> {
        let conn = self.lock()?;
        conn.execute_batch("BEGIN TRANSACTION")
            .map_err(|e| DbError::TransactionError(format!("BEGIN failed: {e}")))?;
        Ok(Box::new(DuckDbTransaction {
            conn,
            finished: false,
        }))
    }

    fn execute_batch(&self, sql: &str) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(sql)?;
        Ok(())
    }

    fn relation_exists(&self, name: &str) -> DbResult<bool> {
        let conn = self.lock()?;

        // Handle schema-qualified names
        let (schema, table) = if let Some(pos) = name.rfind('.') {
            (&name[..pos], &name[pos + 1..])
        } else {
            ("main", name)
        };

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = ? AND table_name = ?",
                duckdb::params![schema, table],
                |row| row.get(0),
            )
            .map_err(|e| DbError::ExecutionError(e.to_string()))?;

        Ok(count > 0)
    }

    fn query_i64(&self, sql: &str) -> DbResult<Option<i64>> {
        let conn = self.lock()?;
        match conn.query_row(sql, [], |row| row.get::<_, i64>(0)) {
            Ok(value) => Ok(Some(value)),
            Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

/// Transaction holding the backend's connection lock until it finishes.
struct DuckDbTransaction<'a> {
    conn: MutexGuard<'a, Connection>,
    finished: bool,
}

impl Transaction for DuckDbTransaction<'_> {
    fn execute_batch(&mut self, sql: &str) -> DbResult<()> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    fn commit(mut self: Box<Self>) -> DbResult<()> {
        self.finished = true;
        if let Err(commit_err) = self.conn.execute_batch("COMMIT") {
            let _ = self.conn.execute_batch("ROLLBACK");
            return Err(DbError::TransactionError(format!(
                "COMMIT failed: {commit_err}"
            )));
        }
        Ok(())
    }

    fn rollback(mut self: Box<Self>) -> DbResult<()> {
        self.finished = true;
        self.conn
            .execute_batch("ROLLBACK")
            .map_err(|e| DbError::TransactionError(format!("ROLLBACK failed: {e}")))
    }
}

impl Drop for DuckDbTransaction<'_> {
    fn drop(&mut self) {
        if !self.finished {
            log::debug!("Rolling back unfinished transaction");
            let _ = self.conn.execute_batch("ROLLBACK");
        }
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
