//! Up command implementation

use anyhow::{Context, Result};

use crate::cli::GlobalArgs;
use crate::commands::common::{print_report, with_migrator};

/// Execute the up command
pub fn execute(global: &GlobalArgs) -> Result<()> {
    with_migrator(global, |migrator| {
        println!("Migrating up from {}", migrator.source().display());
        let report = migrator.up().context("Migration up failed")?;
        print_report(&report);
        Ok(())
    })
}
