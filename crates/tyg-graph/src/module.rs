//! Module identity and node types.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rustc_hash::FxHashSet;

/// Identifier for a module in the graph.
///
/// Backed by the module's resolved path rendered as a string, shared via
/// `Arc` so ids can be cloned freely into invalidation sets and events.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleId(Arc<str>);

impl ModuleId {
    /// Build an id from a resolved filesystem path.
    pub fn from_path(path: &Path) -> Self {
        Self(Arc::from(path.to_string_lossy().as_ref()))
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A node in the module graph.
///
/// Importer edges point from the imported module to the modules that import
/// it, which is the direction invalidation propagates.
#[derive(Debug)]
pub(crate) struct ModuleNode {
    pub(crate) path: PathBuf,
    pub(crate) importers: FxHashSet<ModuleId>,
    pub(crate) stale: bool,
}

impl ModuleNode {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self {
            path,
            importers: FxHashSet::default(),
            stale: false,
        }
    }
}
