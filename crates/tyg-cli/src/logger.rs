//! Logging setup for the tyg CLI.
//!
//! Structured logging via the `tracing` ecosystem. Verbosity is driven by
//! the global CLI flags, with `RUST_LOG` as an escape hatch for precise
//! filters.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// Level resolution order:
/// 1. `--verbose`: debug level for tyg crates
/// 2. `--quiet`: errors only
/// 3. `RUST_LOG` environment variable
/// 4. default: info level for tyg crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new("tyg_cli=debug,tyg_plugin=debug,tyg_compiler=debug,tyg_graph=debug")
    } else if quiet {
        EnvFilter::new("tyg_cli=error,tyg_plugin=error")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("tyg_cli=info,tyg_plugin=info"))
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
