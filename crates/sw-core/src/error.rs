//! Error types for sw-core

use thiserror::Error;

/// Core error type for stepwise
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Invalid configuration value
    #[error("[E002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E003: Migration source directory cannot be read
    #[error("[E003] Directory '{path}' not found: {source}")]
    SourceUnreadable {
        path: String,
        source: std::io::Error,
    },

    /// E004: Migration filename lacks the `<name>.<direction>.<ext>` structure
    #[error("[E004] File '{name}' should have an extension: expected <version>_<label>.<direction>.<ext>")]
    MissingExtension { name: String },

    /// E005: Direction string other than `up` or `down`
    #[error("[E005] Unhandled direction '{direction}': expected 'up' or 'down'")]
    UnhandledDirection { direction: String },

    /// E006: IO error with file path context
    #[error("[E006] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// E007: YAML parse error
    #[error("[E007] Failed to parse config: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
