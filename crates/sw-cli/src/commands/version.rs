//! Version command implementation

use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, VersionArgs};
use crate::commands::common::{print_report, with_migrator};

/// Execute the version command
pub fn execute(args: &VersionArgs, global: &GlobalArgs) -> Result<()> {
    with_migrator(global, |migrator| {
        let current = migrator.current_version()?;
        println!("Migrating from version {} to {}", current, args.target);

        let report = migrator
            .version(args.target)
            .with_context(|| format!("Migration to version {} failed", args.target))?;
        print_report(&report);
        Ok(())
    })
}
