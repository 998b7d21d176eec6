//! # tyg-plugin
//!
//! Dev server plugin that keeps generated TypeScript type modules
//! synchronized with JSON Schema source files.
//!
//! Schema files are named `<name>_schema.json` and live under a configured
//! directory; each compiles to a `<name>.types.ts` module beside it. The
//! plugin exposes two hooks to its host:
//!
//! - [`SchemaTypesPlugin::on_start`] - one-time startup pass: locate every
//!   schema file, compile each, persist each. A single bad schema is
//!   reported and skipped; the rest still build.
//! - [`SchemaTypesPlugin::on_file_changed`] - per-change pass: recompile
//!   exactly the changed file, persist it, and invalidate its generated
//!   module in the host's graph so dependents reload. Everything else in
//!   the module cache stays warm.
//!
//! The plugin holds no state between invocations. All state of record is
//! either on disk (the generated files) or in the host's module graph, so
//! a missed change notification cannot strand the pipeline in an
//! inconsistent view.
//!
//! ## Example
//!
//! ```rust,no_run
//! use tyg_graph::ModuleGraph;
//! use tyg_plugin::SchemaTypesPlugin;
//!
//! # async fn example() -> Result<(), tyg_plugin::PluginError> {
//! let plugin = SchemaTypesPlugin::new("src/page_data");
//! let report = plugin.on_start().await?;
//! println!("generated {} modules", report.generated.len());
//!
//! let graph = ModuleGraph::new();
//! let outcome = plugin
//!     .on_file_changed("src/page_data/alert_schema.json".as_ref(), &graph)
//!     .await?;
//! # let _ = outcome;
//! # Ok(())
//! # }
//! ```

mod coordinator;
mod error;
mod locator;
mod naming;
mod writer;

pub use coordinator::{compile_schema_file, handle_change, ChangeOutcome};
pub use error::{PluginError, Result};
pub use locator::find_schema_files;
pub use naming::{is_schema_file, schema_stem, types_path_for, SCHEMA_SUFFIX, TYPES_SUFFIX};
pub use writer::write_generated;

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use tracing::{debug, error};
use tyg_graph::ModuleRegistry;

/// Outcome of the startup pass.
///
/// Per-file failures do not abort the pass; they are collected here so the
/// host can report them all and decide how loudly to fail.
#[derive(Debug, Default)]
pub struct StartReport {
    /// Generated module paths written this pass
    pub generated: Vec<PathBuf>,
    /// Schema files that failed, with the error for each
    pub failures: Vec<(PathBuf, PluginError)>,
}

impl StartReport {
    /// Whether every schema compiled and persisted.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// The schema-types plugin.
///
/// Stateless apart from its configuration; both hooks recompute everything
/// they need from disk and the host graph.
#[derive(Debug, Clone)]
pub struct SchemaTypesPlugin {
    schema_dir: PathBuf,
}

impl SchemaTypesPlugin {
    /// Create a plugin watching schema files under `schema_dir`.
    pub fn new(schema_dir: impl Into<PathBuf>) -> Self {
        Self {
            schema_dir: schema_dir.into(),
        }
    }

    /// Plugin name for logging and diagnostics.
    pub fn name(&self) -> Cow<'static, str> {
        "schema-types".into()
    }

    /// The directory scanned at startup.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Startup hook: compile and persist every schema file once.
    ///
    /// Failures on individual files are logged, collected into the report
    /// and do not stop the remaining files from building.
    ///
    /// # Errors
    ///
    /// Only an unreadable schema directory aborts the pass, as
    /// [`PluginError::DirectoryUnreadable`].
    pub async fn on_start(&self) -> Result<StartReport> {
        let files = locator::find_schema_files(&self.schema_dir).await?;
        debug!(
            dir = %self.schema_dir.display(),
            count = files.len(),
            "starting schema generation pass"
        );

        let mut report = StartReport::default();
        for path in files {
            match coordinator::compile_and_write(&path).await {
                Ok(out_path) => {
                    debug!(
                        schema = %path.display(),
                        generated = %out_path.display(),
                        "generated type module"
                    );
                    report.generated.push(out_path);
                }
                Err(err) => {
                    error!(schema = %path.display(), %err, "schema generation failed");
                    report.failures.push((path, err));
                }
            }
        }
        Ok(report)
    }

    /// Change hook: delegate to [`handle_change`].
    ///
    /// # Errors
    ///
    /// See [`handle_change`]. A compile error is a developer diagnostic;
    /// the previously generated module stays valid and served.
    pub async fn on_file_changed(
        &self,
        path: &Path,
        registry: &dyn ModuleRegistry,
    ) -> Result<ChangeOutcome> {
        coordinator::handle_change(path, registry).await
    }
}
