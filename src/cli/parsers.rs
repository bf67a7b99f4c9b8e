//! The place where the process arguments are parsed.
//!
//! The command language itself has its own parser in
//! [`super::command_parser`]; this one only configures the REPL. Every flag
//! can also be set from the environment or a `.env` file.

use clap::{Parser, ValueEnum};
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "minidb")]
#[command(about = "A minimal in-memory table store", long_about = None)]
pub struct CliParser {
    /// Maximum level of diagnostics written to stderr.
    #[arg(long, env = "MINIDB_LOG_LEVEL", default_value = "warn")]
    pub log_level: LevelFilter,

    /// How command results are printed.
    #[arg(long, value_enum, env = "MINIDB_OUTPUT", default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Disable colored output.
    #[arg(long, env = "MINIDB_NO_COLOR")]
    pub no_color: bool,

    /// Skip the splash screen.
    #[arg(short, long, env = "MINIDB_QUIET")]
    pub quiet: bool,

    /// Number of commands kept in the session history.
    #[arg(long, env = "MINIDB_HISTORY_LIMIT", default_value_t = 500)]
    pub history_limit: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human readable rows and histograms.
    Text,

    /// One JSON document per command.
    Json,
}
