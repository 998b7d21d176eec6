use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Available tyg subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate type modules from all schema files once
    ///
    /// Scans the schema directory for *_schema.json files and writes the
    /// corresponding *.types.ts module beside each of them. Individual
    /// failures are reported but do not stop the rest of the pass.
    Generate(GenerateArgs),

    /// Start the development server with watch mode
    ///
    /// Runs the full generation pass, then serves the project with hot
    /// reload: editing a schema file regenerates exactly its type module
    /// and reloads the pages that import it.
    Dev(DevArgs),

    /// Validate all schema files without writing anything
    ///
    /// Compiles every schema in memory and reports diagnostics. Useful in
    /// CI to catch broken schemas before they reach a dev session.
    Check(CheckArgs),
}

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Directory containing *_schema.json files
    ///
    /// Defaults to the schema_dir setting from tyg.toml, or src/page_data.
    #[arg(short = 'd', long, value_name = "DIR")]
    pub schema_dir: Option<PathBuf>,
}

/// Arguments for the dev command
#[derive(Args, Debug)]
pub struct DevArgs {
    /// Directory containing *_schema.json files
    #[arg(short = 'd', long, value_name = "DIR")]
    pub schema_dir: Option<PathBuf>,

    /// Port for the development server
    #[arg(short = 'p', long, value_name = "PORT")]
    pub port: Option<u16>,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Directory containing *_schema.json files
    #[arg(short = 'd', long, value_name = "DIR")]
    pub schema_dir: Option<PathBuf>,
}
