//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use sw_core::{Config, DbType};
use sw_db::DuckDbBackend;
use sw_migrate::{EventSink, Migrator, MigratorOptions, RunReport};

use crate::cli::GlobalArgs;

/// Config file values merged with command-line overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Settings {
    pub(crate) source: PathBuf,
    pub(crate) table: String,
    pub(crate) db_type: DbType,
    pub(crate) database: String,
}

/// Resolve settings relative to the current working directory.
pub(crate) fn load_settings(global: &GlobalArgs) -> Result<Settings> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    resolve_settings(global, &cwd)
}

/// Resolve settings from an explicit config file, else `stepwise.yml` in
/// `cwd`, else defaults. Flags win over file values.
///
/// A source directory from a config file is relative to that file; one
/// from `--source` is relative to `cwd`.
pub(crate) fn resolve_settings(global: &GlobalArgs, cwd: &Path) -> Result<Settings> {
    let (mut config, root) = match &global.config {
        Some(path) => {
            let path = cwd.join(path);
            let config = Config::load(&path)
                .with_context(|| format!("Failed to load config {}", path.display()))?;
            let root = path.parent().map_or_else(|| cwd.to_path_buf(), Path::to_path_buf);
            (config, root)
        }
        None => match Config::find_in_dir(cwd) {
            Some(path) => (
                Config::load(&path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                cwd.to_path_buf(),
            ),
            None => (Config::default(), cwd.to_path_buf()),
        },
    };

    let mut source = config.source_absolute(&root);
    if let Some(flag) = &global.source {
        config.source = flag.clone();
        source = cwd.join(flag);
    }
    if let Some(table) = &global.table {
        config.table = table.clone();
    }
    if let Some(database) = &global.database {
        config.database.path = database.clone();
    }
    config.validate().context("Invalid configuration")?;

    let db_root = if global.database.is_some() { cwd } else { root.as_path() };
    let database = if config.database.path == ":memory:" {
        config.database.path
    } else {
        db_root.join(&config.database.path).display().to_string()
    };

    Ok(Settings {
        source,
        table: config.table,
        db_type: config.database.db_type,
        database,
    })
}

/// Open the database named by `settings` with the backend for its type.
pub(crate) fn open_database(settings: &Settings) -> Result<DuckDbBackend> {
    match settings.db_type {
        DbType::DuckDb => DuckDbBackend::new(&settings.database).with_context(|| {
            format!(
                "Failed to connect to {} database {}",
                settings.db_type, settings.database
            )
        }),
    }
}

/// Build a migrator over `db` reporting through `events`.
pub(crate) fn build_migrator<'a>(
    db: &'a DuckDbBackend,
    settings: &Settings,
    events: &'a dyn EventSink,
) -> Result<Migrator<'a>> {
    let options = MigratorOptions::new(settings.source.clone()).with_table(settings.table.clone());
    let migrator = Migrator::with_options(db, options)
        .context("Failed to initialize migrator")?
        .with_events(events);
    Ok(migrator)
}

/// Open the database and build a migrator, printing settings when verbose.
pub(crate) fn with_migrator<T>(
    global: &GlobalArgs,
    f: impl FnOnce(&Migrator<'_>) -> Result<T>,
) -> Result<T> {
    let settings = load_settings(global)?;
    if global.verbose {
        println!("Source:   {}", settings.source.display());
        println!("Database: {} ({})", settings.database, settings.db_type);
        println!("Table:    {}", settings.table);
        println!();
    }

    let db = open_database(&settings)?;
    let events = ConsoleEvents;
    let migrator = build_migrator(&db, &settings, &events)?;
    f(&migrator)
}

/// Prints migration progress to the terminal.
pub(crate) struct ConsoleEvents;

impl EventSink for ConsoleEvents {
    fn info(&self, message: &str) {
        println!("  {}", message);
    }

    fn warn(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn error(&self, message: &str) {
        eprintln!("  {}", message);
    }
}

/// Print the summary line for a finished run.
pub(crate) fn print_report(report: &RunReport) {
    println!();
    match (report.applied.len(), report.version) {
        (0, None) => println!("No {} migrations to apply", report.direction),
        (n, Some(version)) => println!(
            "Applied {} {} migration{}, version is now {}",
            n,
            report.direction,
            if n == 1 { "" } else { "s" },
            version
        ),
        (n, None) => println!(
            "Applied {} {} migration{}",
            n,
            report.direction,
            if n == 1 { "" } else { "s" }
        ),
    }
    log::debug!("{} file(s) skipped", report.skipped);
}

/// Print a formatted table to stdout.
///
/// Columns are left-aligned, sized to their widest cell and separated by
/// two spaces, with a dashed line under the header.
pub(crate) fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.len());
        }
    }

    let format_row = |cells: Vec<String>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:<width$}", cell, width = w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    println!(
        "{}",
        format_row(headers.iter().map(|h| h.to_string()).collect())
    );
    println!(
        "{}",
        widths
            .iter()
            .map(|&w| "-".repeat(w))
            .collect::<Vec<_>>()
            .join("  ")
    );
    for row in rows {
        println!("{}", format_row(row.clone()));
    }
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
