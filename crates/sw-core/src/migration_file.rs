//! Migration file model and filename parsing
//!
//! A migration file is named `<version>_<label>.<direction>.<ext>`, for
//! example `0003_add_users.up.sql`. The version is the numeric prefix of the
//! first dot-delimited segment.

use crate::direction::Direction;
use crate::error::{CoreError, CoreResult};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A single migration file discovered on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationFile {
    /// Version parsed from the filename prefix
    pub version: u64,

    /// Whether this file applies or reverts the version
    pub direction: Direction,

    /// Descriptive part of the first segment (`add_users` in `3_add_users.up.sql`)
    pub label: String,

    /// Bare filename
    pub name: String,

    /// Full path to the raw SQL content
    pub path: PathBuf,
}

impl MigrationFile {
    /// Parse a filename found in `dir`.
    ///
    /// Returns `Ok(None)` for well-formed names whose direction segment is
    /// neither `up` nor `down`. Names with fewer than three dot-separated
    /// segments are rejected.
    pub fn parse(dir: &Path, name: &str) -> CoreResult<Option<Self>> {
        let segments: Vec<&str> = name.split('.').collect();
        if segments.len() < 3 {
            return Err(CoreError::MissingExtension {
                name: name.to_string(),
            });
        }

        let direction = match segments[1].parse::<Direction>() {
            Ok(direction) => direction,
            Err(_) => return Ok(None),
        };

        let stem = segments[0];
        let label = stem
            .split_once('_')
            .map(|(_, label)| label.to_string())
            .unwrap_or_default();

        Ok(Some(Self {
            version: parse_version(stem),
            direction,
            label,
            name: name.to_string(),
            path: dir.join(name),
        }))
    }
}

/// Extract the version from a migration filename or its first segment.
///
/// Reads the leading run of ASCII digits and stops at the first other
/// character (`_` and `.` included). A name without leading digits is
/// version 0. Versions that overflow `u64` saturate.
pub fn parse_version(name: &str) -> u64 {
    name.bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u64, |acc, b| {
            acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
        })
}

#[cfg(test)]
#[path = "migration_file_test.rs"]
mod tests;
