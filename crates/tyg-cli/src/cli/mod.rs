//! Command-line interface definition.

mod commands;

pub use commands::{CheckArgs, Command, DevArgs, GenerateArgs};

use clap::Parser;

/// tyg - generated types for schema-described page data.
#[derive(Parser, Debug)]
#[command(name = "tyg", version, about, long_about = None)]
pub struct Cli {
    /// Enable debug-level logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Only show errors
    #[arg(long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}
