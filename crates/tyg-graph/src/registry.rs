//! Narrow graph capability handed to plugins.

use std::path::Path;

use crate::graph::ModuleGraph;
use crate::module::ModuleId;

/// The slice of the module graph a plugin is allowed to touch: look a
/// module up by resolved path, and mark it stale.
///
/// Plugins never create or delete nodes and never walk edges - propagation
/// to importers is the host's reload algorithm. Keeping the surface this
/// small also makes plugin logic testable against an in-memory fake
/// instead of a live server graph.
pub trait ModuleRegistry {
    /// Look up a module by its resolved path.
    fn module_by_path(&self, path: &Path) -> Option<ModuleId>;

    /// Mark a module stale. Returns false when the module is unknown.
    fn invalidate(&self, id: &ModuleId) -> bool;
}

impl ModuleRegistry for ModuleGraph {
    fn module_by_path(&self, path: &Path) -> Option<ModuleId> {
        ModuleGraph::module_by_path(self, path)
    }

    fn invalidate(&self, id: &ModuleId) -> bool {
        ModuleGraph::invalidate(self, id)
    }
}
