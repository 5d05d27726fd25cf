//! Status command implementation

use anyhow::{Context, Result};
use sw_migrate::Status;

use crate::cli::{GlobalArgs, StatusArgs, StatusOutput};
use crate::commands::common::{print_table, with_migrator};

/// Execute the status command
pub fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    with_migrator(global, |migrator| {
        let status = migrator.status().context("Failed to read migration status")?;
        match args.output {
            StatusOutput::Table => print_status(&status),
            StatusOutput::Json => print_json(&status)?,
        }
        Ok(())
    })
}

fn print_status(status: &Status) {
    println!("Current version: {}", status.current);
    match status.latest {
        Some(latest) => println!("Latest version:  {}", latest),
        None => println!("Latest version:  none"),
    }
    println!();

    if status.pending.is_empty() {
        println!("No pending migrations");
        return;
    }

    let rows: Vec<Vec<String>> = status
        .pending
        .iter()
        .map(|file| {
            vec![
                file.version.to_string(),
                file.label.clone(),
                file.name.clone(),
            ]
        })
        .collect();
    print_table(&["VERSION", "LABEL", "FILE"], &rows);

    println!();
    println!("{} pending migration(s)", status.pending.len());
}

fn print_json(status: &Status) -> Result<()> {
    let json = serde_json::to_string_pretty(status).context("Failed to serialize to JSON")?;
    println!("{}", json);
    Ok(())
}
