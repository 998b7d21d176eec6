//! Development server command implementation.
//!
//! Orchestrates the dev session lifecycle:
//! - Full generation pass before the server accepts connections, so no
//!   page can import a type module that has not been written yet
//! - File watching with debouncing
//! - HTTP server with SSE hot reload
//! - Per-schema regeneration and graph invalidation on change
//! - Graceful shutdown on Ctrl+C

use std::sync::Arc;

use tokio::signal;
use tyg_plugin::{ChangeOutcome, SchemaTypesPlugin};

use crate::cli::DevArgs;
use crate::config::TygConfig;
use crate::dev::{
    DevEvent, DevServer, DevServerState, FileChange, FileWatcher, SchemaDiagnostic, SharedState,
};
use crate::error::Result;
use crate::ui;

/// Execute the dev command.
///
/// # Errors
///
/// Returns errors for invalid configuration, an unreadable schema
/// directory, server startup failures and watcher failures. Schema compile
/// errors during the session never end it; they surface as diagnostics.
pub async fn execute(args: DevArgs) -> Result<()> {
    ui::info("Starting development server...");

    let config = TygConfig::load(args.schema_dir, args.port)?;
    let cwd = std::env::current_dir()?;
    let schema_dir = if config.schema_dir.is_absolute() {
        config.schema_dir.clone()
    } else {
        cwd.join(&config.schema_dir)
    };
    ui::info(&format!("Schema directory: {}", schema_dir.display()));

    let plugin = SchemaTypesPlugin::new(&schema_dir);

    // Initial pass runs to completion before the listener binds.
    let report = plugin.on_start().await?;
    for (path, err) in &report.failures {
        ui::error(&format!("{}: {err}", path.display()));
    }
    ui::success(&format!(
        "Generated {} type module(s)",
        report.generated.len()
    ));

    let state: SharedState = Arc::new(DevServerState::new(cwd.clone()));

    let (watcher, mut change_rx) = FileWatcher::new(
        cwd.clone(),
        config.watch_ignore.clone(),
        config.debounce_ms,
    )?;
    ui::info(&format!(
        "Watching for changes in {}",
        watcher.root().display()
    ));

    let server = DevServer::new(config.addr()?, state.clone());
    let mut server_handle = tokio::spawn(async move {
        if let Err(e) = server.start().await {
            ui::error(&e.to_string());
        }
    });

    ui::info("Press Ctrl+C to stop");

    loop {
        tokio::select! {
            Some(change) = change_rx.recv() => {
                handle_file_change(change, &plugin, &state).await;
            }

            _ = signal::ctrl_c() => {
                ui::info("Shutting down development server...");
                break;
            }

            _ = &mut server_handle => {
                ui::warning("Server task completed unexpectedly");
                break;
            }
        }
    }

    ui::success("Development server stopped");
    Ok(())
}

/// Handle a watched file change.
///
/// Only writes to schema files matter here; everything else falls through
/// to the browser's own reload behavior. A compile error leaves the old
/// generated module served and raises the overlay (fail-static).
async fn handle_file_change(change: FileChange, plugin: &SchemaTypesPlugin, state: &SharedState) {
    if !change.is_write() || !tyg_plugin::is_schema_file(change.path()) {
        return;
    }
    let path = change.path();
    ui::info(&format!("Schema changed: {}", path.display()));

    match plugin.on_file_changed(path, &state.graph).await {
        Ok(ChangeOutcome::NotHandled) => {}

        Ok(ChangeOutcome::Handled { invalidated }) if invalidated.is_empty() => {
            state.clear_diagnostic();
            ui::info("Regenerated types (module not imported yet)");
        }

        Ok(ChangeOutcome::Handled { invalidated }) => {
            state.clear_diagnostic();

            // The reload set is the invalidated modules plus everything
            // that transitively imports them.
            let mut modules: Vec<String> =
                invalidated.iter().map(|id| id.to_string()).collect();
            for id in &invalidated {
                for dependent in state.graph.transitive_dependents(id) {
                    let name = dependent.to_string();
                    if !modules.contains(&name) {
                        modules.push(name);
                    }
                }
            }

            ui::success(&format!(
                "Regenerated types, reloading {} module(s)",
                modules.len()
            ));
            state
                .broadcast(&DevEvent::ModulesInvalidated { modules })
                .await;
        }

        Err(err) if err.is_compile_error() => {
            let message = err.to_string();
            ui::error(&message);
            state.set_diagnostic(SchemaDiagnostic {
                path: path.to_path_buf(),
                message: message.clone(),
            });
            state
                .broadcast(&DevEvent::SchemaError {
                    path: path.display().to_string(),
                    message,
                })
                .await;
        }

        Err(err) => {
            ui::error(&err.to_string());
        }
    }
}
