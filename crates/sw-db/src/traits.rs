//! Database capability traits

use crate::error::DbResult;

/// Database handle used by the migration engine.
///
/// The engine borrows an implementation for the duration of a call and never
/// closes it; dropping the handle is the caller's business.
pub trait Database: Send + Sync {
    /// Check that the database is reachable
    fn ping(&self) -> DbResult<()>;

    /// Start a transaction.
    ///
    /// The returned handle must be committed or rolled back; dropping it
    /// unfinished rolls back.
    fn begin(&self) -> DbResult<Box<dyn Transaction + '_>>;

    /// Execute one or more SQL statements outside a transaction
    fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Check if a table or view exists
    fn relation_exists(&self, name: &str) -> DbResult<bool>;

    /// Run a query and return the first column of the first row as an
    /// integer, or `None` when the query yields no rows
    fn query_i64(&self, sql: &str) -> DbResult<Option<i64>>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}

/// An open transaction.
pub trait Transaction {
    /// Execute one or more SQL statements inside the transaction
    fn execute_batch(&mut self, sql: &str) -> DbResult<()>;

    /// Commit all work done in the transaction
    fn commit(self: Box<Self>) -> DbResult<()>;

    /// Discard all work done in the transaction
    fn rollback(self: Box<Self>) -> DbResult<()>;
}
