//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Stepwise - apply and revert versioned SQL migrations
#[derive(Parser, Debug)]
#[command(name = "sw")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory containing migration files
    #[arg(short, long, global = true)]
    pub source: Option<String>,

    /// DuckDB database path (`:memory:` for a throwaway database)
    #[arg(short, long, global = true, env = "STEPWISE_DATABASE")]
    pub database: Option<String>,

    /// Table holding the applied version
    #[arg(long, global = true)]
    pub table: Option<String>,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply every pending up migration
    Up,

    /// Revert every applied migration
    Down,

    /// Migrate up or down to a specific version
    Version(VersionArgs),

    /// Show the applied version and pending migrations
    Status(StatusArgs),
}

/// Arguments for the version command
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Target version
    pub target: u64,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: StatusOutput,
}

/// Status output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutput {
    /// Table format
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
