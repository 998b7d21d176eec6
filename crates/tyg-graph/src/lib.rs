//! # tyg-graph
//!
//! The dev server's live module graph: a registry of served modules and
//! their import relationships, used to propagate reloads.
//!
//! The graph is deliberately small. Nodes are keyed by resolved path and
//! carry a stale flag plus importer edges; that is everything hot reload
//! needs. Plugins see the graph only through the [`ModuleRegistry`] trait
//! (lookup-by-path, invalidate-by-id), so they can be exercised against an
//! in-memory fake in tests.
//!
//! ## Example
//!
//! ```rust
//! use std::path::Path;
//! use tyg_graph::ModuleGraph;
//!
//! let graph = ModuleGraph::new();
//! graph.add_import(
//!     Path::new("/src/pages/alerts.ts"),
//!     Path::new("/src/page_data/alert.types.ts"),
//! );
//!
//! let id = graph
//!     .module_by_path(Path::new("/src/page_data/alert.types.ts"))
//!     .unwrap();
//! graph.invalidate(&id);
//! assert_eq!(graph.transitive_dependents(&id).len(), 1);
//! ```

mod graph;
mod module;
mod registry;

pub use graph::ModuleGraph;
pub use module::ModuleId;
pub use registry::ModuleRegistry;
