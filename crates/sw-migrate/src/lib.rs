//! Migration engine for stepwise.
//!
//! Applies or reverts versioned SQL files against a [`Database`] and keeps
//! the applied version in a single-row metadata table. Every `up`, `down`
//! or `version` call runs inside exactly one transaction: either all of the
//! selected files and the version update persist, or none do.
//!
//! [`Database`]: sw_db::Database

pub mod engine;
pub mod error;
pub mod events;
pub mod querier;
pub mod store;

pub use engine::{Migrator, MigratorOptions, Status};
pub use error::{ErrorKind, MigrateError, MigrateResult};
pub use events::{EventSink, LogEvents, NoopEvents};
pub use querier::{Querier, RunReport};

#[cfg(test)]
pub(crate) mod test_helpers;
