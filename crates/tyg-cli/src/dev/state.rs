//! Shared state for the development server.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use tyg_graph::ModuleGraph;

use crate::dev::DevEvent;

/// A schema compile failure currently shown to the developer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDiagnostic {
    /// Path of the schema file that failed
    pub path: PathBuf,
    /// Rendered compiler error
    pub message: String,
}

/// Shared development server state.
///
/// The module graph is the single source of truth for what has been served
/// and what is stale; the diagnostic slot holds the latest schema compile
/// failure until a successful regeneration clears it.
pub struct DevServerState {
    /// Live module graph, shared with the change-event loop
    pub graph: ModuleGraph,

    /// Project root files are served from
    pub project_root: PathBuf,

    diagnostic: RwLock<Option<SchemaDiagnostic>>,
    clients: RwLock<HashMap<usize, tokio::sync::mpsc::Sender<String>>>,
    next_client_id: RwLock<usize>,
}

impl DevServerState {
    /// Create new dev server state serving files under `project_root`.
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            graph: ModuleGraph::new(),
            project_root,
            diagnostic: RwLock::new(None),
            clients: RwLock::new(HashMap::new()),
            next_client_id: RwLock::new(0),
        }
    }

    /// Record a schema compile failure.
    pub fn set_diagnostic(&self, diagnostic: SchemaDiagnostic) {
        *self.diagnostic.write() = Some(diagnostic);
    }

    /// Clear the diagnostic after a successful regeneration.
    pub fn clear_diagnostic(&self) {
        *self.diagnostic.write() = None;
    }

    /// The current diagnostic, if any.
    pub fn diagnostic(&self) -> Option<SchemaDiagnostic> {
        self.diagnostic.read().clone()
    }

    /// Register a new SSE client, returning its id and event receiver.
    pub fn register_client(&self) -> (usize, tokio::sync::mpsc::Receiver<String>) {
        let id = {
            let mut next_id = self.next_client_id.write();
            let id = *next_id;
            *next_id += 1;
            id
        };

        let (tx, rx) = tokio::sync::mpsc::channel(100);
        self.clients.write().insert(id, tx);
        (id, rx)
    }

    /// Drop a disconnected SSE client.
    pub fn unregister_client(&self, id: usize) {
        self.clients.write().remove(&id);
    }

    /// Broadcast an event to all connected clients, pruning any that have
    /// gone away.
    pub async fn broadcast(&self, event: &DevEvent) {
        let json = serde_json::to_string(event).unwrap_or_else(|_| "{}".to_string());
        let clients = self.clients.read().clone();

        let mut failed_ids = Vec::new();
        for (id, tx) in clients {
            if tx.send(json.clone()).await.is_err() {
                failed_ids.push(id);
            }
        }
        for id in failed_ids {
            self.unregister_client(id);
        }
    }

    /// Number of connected clients.
    pub fn client_count(&self) -> usize {
        self.clients.read().len()
    }
}

/// Shared state handle for passing around the application.
pub type SharedState = Arc<DevServerState>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_lifecycle() {
        let state = DevServerState::new(PathBuf::from("."));
        assert!(state.diagnostic().is_none());

        state.set_diagnostic(SchemaDiagnostic {
            path: PathBuf::from("alert_schema.json"),
            message: "invalid JSON".to_string(),
        });
        assert_eq!(
            state.diagnostic().unwrap().path,
            PathBuf::from("alert_schema.json")
        );

        state.clear_diagnostic();
        assert!(state.diagnostic().is_none());
    }

    #[tokio::test]
    async fn test_client_registration_and_broadcast() {
        let state = Arc::new(DevServerState::new(PathBuf::from(".")));

        let (id1, mut rx1) = state.register_client();
        let (id2, _rx2) = state.register_client();
        assert_ne!(id1, id2);
        assert_eq!(state.client_count(), 2);

        state
            .broadcast(&DevEvent::Connected { id: id1 })
            .await;
        let received = rx1.recv().await.unwrap();
        assert!(received.contains("Connected"));

        state.unregister_client(id2);
        assert_eq!(state.client_count(), 1);
    }

    #[tokio::test]
    async fn test_broadcast_prunes_dead_clients() {
        let state = DevServerState::new(PathBuf::from("."));
        let (_id, rx) = state.register_client();
        drop(rx);

        state
            .broadcast(&DevEvent::ModulesInvalidated {
                modules: Vec::new(),
            })
            .await;
        assert_eq!(state.client_count(), 0);
    }
}
