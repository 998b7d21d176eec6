//! Error handling for the tyg CLI.
//!
//! A single `thiserror` enum covers the CLI's failure categories; pipeline
//! errors convert automatically via `#[from]`. At the very top of the
//! program errors become miette reports for terminal-friendly output.

use miette::Report;
use thiserror::Error;
use tyg_plugin::PluginError;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration loading or validation failed
    #[error("configuration error: {0}\n\nHint: check tyg.toml syntax and TYG_* environment variables")]
    Config(String),

    /// Errors from the generation pipeline
    #[error(transparent)]
    Plugin(#[from] PluginError),

    /// Development server errors
    #[error("server error: {0}")]
    Server(String),

    /// File watching errors
    #[error("file watcher error: {0}")]
    Watch(#[from] notify::Error),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// One or more schema files failed during a full pass
    #[error("{failed} of {total} schema files failed\n\nHint: fix the schemas reported above and re-run")]
    SchemasFailed {
        /// Number of failing schema files
        failed: usize,
        /// Number of schema files processed
        total: usize,
    },
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Convert a [`CliError`] to a miette report for display.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Plugin(PluginError::Compile { path, source }) => miette::miette!(
            "failed to compile schema {}: {}",
            path.display(),
            source
        ),
        other => miette::miette!("{}", other),
    }
}
