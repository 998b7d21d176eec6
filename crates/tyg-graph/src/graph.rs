//! The live module graph.
//!
//! Nodes are keyed by resolved path and appear when the dev server first
//! serves a module. Importer edges are added as modules are scanned; they
//! point against the import direction so invalidation can walk towards the
//! pages that depend on a changed module.

use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::module::{ModuleId, ModuleNode};

/// Thread-safe module graph.
///
/// Interior mutability via a single `RwLock` keeps the public API `&self`,
/// so the graph can be shared behind an `Arc` between the HTTP server and
/// the watcher loop.
#[derive(Debug, Default)]
pub struct ModuleGraph {
    inner: RwLock<GraphInner>,
}

#[derive(Debug, Default)]
struct GraphInner {
    modules: FxHashMap<ModuleId, ModuleNode>,
    by_path: FxHashMap<PathBuf, ModuleId>,
}

impl ModuleGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module, returning its id. Idempotent.
    pub fn ensure_module(&self, path: &Path) -> ModuleId {
        let mut inner = self.inner.write();
        if let Some(id) = inner.by_path.get(path) {
            return id.clone();
        }
        let id = ModuleId::from_path(path);
        inner.by_path.insert(path.to_path_buf(), id.clone());
        inner
            .modules
            .insert(id.clone(), ModuleNode::new(path.to_path_buf()));
        id
    }

    /// Record that `importer` imports `imported`. Both modules are
    /// registered if they are not yet known.
    pub fn add_import(&self, importer: &Path, imported: &Path) {
        let importer_id = self.ensure_module(importer);
        let imported_id = self.ensure_module(imported);
        if importer_id == imported_id {
            return;
        }
        let mut inner = self.inner.write();
        if let Some(node) = inner.modules.get_mut(&imported_id) {
            node.importers.insert(importer_id);
        }
    }

    /// Look up a module by its resolved path.
    pub fn module_by_path(&self, path: &Path) -> Option<ModuleId> {
        self.inner.read().by_path.get(path).cloned()
    }

    /// The resolved path of a module.
    pub fn path_of(&self, id: &ModuleId) -> Option<PathBuf> {
        self.inner
            .read()
            .modules
            .get(id)
            .map(|node| node.path.clone())
    }

    /// Mark a module stale. Returns false when the module is unknown.
    pub fn invalidate(&self, id: &ModuleId) -> bool {
        let mut inner = self.inner.write();
        match inner.modules.get_mut(id) {
            Some(node) => {
                node.stale = true;
                true
            }
            None => false,
        }
    }

    /// Whether a module is currently marked stale.
    pub fn is_stale(&self, id: &ModuleId) -> bool {
        self.inner
            .read()
            .modules
            .get(id)
            .is_some_and(|node| node.stale)
    }

    /// Clear the stale mark after the module has been re-served.
    pub fn mark_fresh(&self, id: &ModuleId) {
        if let Some(node) = self.inner.write().modules.get_mut(id) {
            node.stale = false;
        }
    }

    /// All modules that transitively import `id`, breadth-first, excluding
    /// `id` itself. This is the reload set the host propagates to after an
    /// invalidation.
    pub fn transitive_dependents(&self, id: &ModuleId) -> Vec<ModuleId> {
        let inner = self.inner.read();
        let mut queue: Vec<ModuleId> = Vec::new();
        let mut seen: Vec<ModuleId> = Vec::new();

        if let Some(node) = inner.modules.get(id) {
            queue.extend(node.importers.iter().cloned());
        }
        while let Some(next) = queue.pop() {
            if next == *id || seen.contains(&next) {
                continue;
            }
            if let Some(node) = inner.modules.get(&next) {
                queue.extend(node.importers.iter().cloned());
            }
            seen.push(next);
        }
        seen
    }

    /// Number of registered modules.
    pub fn len(&self) -> usize {
        self.inner.read().modules.len()
    }

    /// Whether the graph has no modules.
    pub fn is_empty(&self) -> bool {
        self.inner.read().modules.is_empty()
    }
}
