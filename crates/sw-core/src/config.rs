//! Configuration types and parsing for stepwise.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file names searched by [`Config::load_from_dir`], in order.
pub const CONFIG_FILE_NAMES: &[&str] = &["stepwise.yml", "stepwise.yaml"];

/// Runner configuration from stepwise.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory containing `<version>_<label>.<direction>.<ext>` files
    #[serde(default = "default_source")]
    pub source: String,

    /// Name of the single-row table holding the applied version
    #[serde(default = "default_table")]
    pub table: String,

    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Database type selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DbType {
    /// DuckDB (default)
    #[default]
    DuckDb,
}

impl std::fmt::Display for DbType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DbType::DuckDb => write!(f, "duckdb"),
        }
    }
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database type
    #[serde(rename = "type", default)]
    pub db_type: DbType,

    /// Database path (DuckDB file or `:memory:`)
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            db_type: DbType::default(),
            path: default_db_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: default_source(),
            table: default_table(),
            database: DatabaseConfig::default(),
        }
    }
}

const DEFAULT_SOURCE: &str = "migrations";

const DEFAULT_TABLE: &str = "migrations";

const DEFAULT_DB_PATH: &str = "stepwise.duckdb";

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

fn default_db_path() -> String {
    DEFAULT_DB_PATH.to_string()
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `stepwise.yml` or `stepwise.yaml` in `dir`
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        match Self::find_in_dir(dir) {
            Some(path) => Self::load(&path),
            None => Err(CoreError::ConfigNotFound {
                path: dir.join(CONFIG_FILE_NAMES[0]).display().to_string(),
            }),
        }
    }

    /// Locate a config file in `dir`, if any
    pub fn find_in_dir(dir: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Migration source directory resolved against `root`
    pub fn source_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.source)
    }

    /// Validate configuration
    pub fn validate(&self) -> CoreResult<()> {
        if self.source.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "source directory cannot be empty".to_string(),
            });
        }

        validate_table_name(&self.table)?;

        if self.database.path.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "database path cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}

/// Check that `table` is a plain, optionally schema-qualified identifier.
///
/// The name is interpolated into DDL and version statements.
pub fn validate_table_name(table: &str) -> CoreResult<()> {
    let valid = !table.is_empty()
        && table
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        && !table.starts_with(|c: char| c.is_ascii_digit());
    if !valid {
        return Err(CoreError::ConfigInvalid {
            message: format!(
                "table '{table}' must be a plain identifier (letters, digits, '_' or '.')"
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
