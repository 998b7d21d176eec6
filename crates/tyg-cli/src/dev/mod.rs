//! Development server module.
//!
//! Provides the host side of the generation pipeline:
//! - File watching with debouncing
//! - HTTP serving of project files with module-graph registration
//! - Hot reload via Server-Sent Events
//! - Schema diagnostic overlay in the browser

pub mod imports;
pub mod overlay;
pub mod server;
pub mod state;
pub mod watcher;

pub use server::DevServer;
pub use state::{DevServerState, SchemaDiagnostic, SharedState};
pub use watcher::{FileChange, FileWatcher};

use serde::{Deserialize, Serialize};

/// Events pushed to connected clients over SSE.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DevEvent {
    /// A client connected
    Connected {
        /// Client id assigned by the server
        id: usize,
    },

    /// Generated modules went stale and their importers should reload
    ModulesInvalidated {
        /// Module ids (resolved paths) needing reload, including dependents
        modules: Vec<String>,
    },

    /// A schema edit failed to compile; the previous module is still served
    SchemaError {
        /// Path of the schema file
        path: String,
        /// Compiler diagnostic
        message: String,
    },
}
