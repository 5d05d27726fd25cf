//! Stepwise CLI - apply and revert versioned SQL migrations

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{down, status, up, version};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        cli::Commands::Up => up::execute(&cli.global),
        cli::Commands::Down => down::execute(&cli.global),
        cli::Commands::Version(args) => version::execute(args, &cli.global),
        cli::Commands::Status(args) => status::execute(args, &cli.global),
    }
}
