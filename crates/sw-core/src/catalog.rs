//! Migration directory catalog
//!
//! Discovers migration files on every call; nothing is cached between runs.

use crate::direction::Direction;
use crate::error::{CoreError, CoreResult};
use crate::migration_file::MigrationFile;
use std::fs;
use std::path::Path;

/// List the regular-file names in `dir`, skipping subdirectories.
pub fn read_dir(dir: &Path) -> CoreResult<Vec<String>> {
    let unreadable = |source: std::io::Error| CoreError::SourceUnreadable {
        path: dir.display().to_string(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;
        if entry.file_type().map_err(unreadable)?.is_dir() {
            continue;
        }
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

/// Collect the migration files in `dir` for `direction`, ascending by version.
///
/// Every regular file in the directory must follow the
/// `<name>.<direction>.<ext>` layout, even those for the other direction.
/// Ties on version are ordered by filename.
pub fn list_by_direction(dir: &Path, direction: Direction) -> CoreResult<Vec<MigrationFile>> {
    let mut files = Vec::new();
    for name in read_dir(dir)? {
        match MigrationFile::parse(dir, &name)? {
            Some(file) if file.direction == direction => files.push(file),
            Some(_) => {}
            None => log::debug!("Ignoring {name}: not an up or down migration"),
        }
    }

    files.sort_by(|a, b| a.version.cmp(&b.version).then_with(|| a.name.cmp(&b.name)));
    Ok(files)
}

/// Read the raw SQL of a migration file.
pub fn read_content(file: &MigrationFile) -> CoreResult<String> {
    fs::read_to_string(&file.path).map_err(|source| CoreError::IoWithPath {
        path: file.path.display().to_string(),
        source,
    })
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
