//! Down command implementation

use anyhow::{Context, Result};

use crate::cli::GlobalArgs;
use crate::commands::common::{print_report, with_migrator};

/// Execute the down command
pub fn execute(global: &GlobalArgs) -> Result<()> {
    with_migrator(global, |migrator| {
        println!("Migrating down from {}", migrator.source().display());
        let report = migrator.down().context("Migration down failed")?;
        print_report(&report);
        Ok(())
    })
}
