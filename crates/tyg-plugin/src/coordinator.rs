//! Change-event handling: recompile one schema and invalidate its module.
//!
//! This is deliberately stateless across invocations. Every event is
//! answered from the current file content and the host's live graph, so a
//! missed or reordered notification can never leave the pipeline holding a
//! view that disagrees with the state of record on disk.

use std::path::{Path, PathBuf};

use tracing::debug;
use tyg_graph::{ModuleId, ModuleRegistry};

use crate::error::{PluginError, Result};
use crate::naming::{is_schema_file, schema_stem};
use crate::writer::write_generated;

/// Result of offering a changed path to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeOutcome {
    /// The path is not a schema file; the host should fall through to its
    /// default handling.
    NotHandled,
    /// The schema was recompiled and persisted. `invalidated` lists the
    /// modules the host must reload - empty when the generated module has
    /// never been imported, which is normal: the file on disk is already
    /// up to date for the next import.
    Handled {
        /// Modules marked stale in the host graph
        invalidated: Vec<ModuleId>,
    },
}

impl ChangeOutcome {
    /// Whether the pipeline claimed this event.
    pub fn is_handled(&self) -> bool {
        matches!(self, ChangeOutcome::Handled { .. })
    }

    /// The invalidated modules, empty for `NotHandled`.
    pub fn invalidated(&self) -> &[ModuleId] {
        match self {
            ChangeOutcome::Handled { invalidated } => invalidated,
            ChangeOutcome::NotHandled => &[],
        }
    }
}

/// Read and compile a schema file without writing anything.
///
/// # Errors
///
/// [`PluginError::NotSchemaFile`] for non-matching paths, [`PluginError::Io`]
/// when the file cannot be read, [`PluginError::Compile`] with the source
/// path attached when compilation fails.
pub async fn compile_schema_file(path: &Path) -> Result<String> {
    let Some(stem) = schema_stem(path) else {
        return Err(PluginError::NotSchemaFile {
            path: path.to_path_buf(),
        });
    };
    let root_name = stem.to_string();

    let source = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| PluginError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    tyg_compiler::compile(&source, &root_name).map_err(|source| PluginError::Compile {
        path: path.to_path_buf(),
        source,
    })
}

/// Compile a schema file and persist the generated module, returning the
/// generated path.
pub(crate) async fn compile_and_write(path: &Path) -> Result<PathBuf> {
    let text = compile_schema_file(path).await?;
    write_generated(path, &text).await
}

/// Handle a watched-file change event.
///
/// 1. Non-schema paths return [`ChangeOutcome::NotHandled`].
/// 2. The file is recompiled from its current content. A compile error
///    propagates without writing or invalidating anything, so the previous
///    generated module stays valid and served (fail-static).
/// 3. On success the generated module is overwritten in place.
/// 4. The generated path is looked up in the host graph; if present it is
///    marked stale and returned, otherwise the outcome is handled-but-empty.
///
/// # Errors
///
/// [`PluginError::Io`] / [`PluginError::Compile`] from steps 2 and 3. The
/// host surfaces compile errors as developer diagnostics.
pub async fn handle_change(path: &Path, registry: &dyn ModuleRegistry) -> Result<ChangeOutcome> {
    if !is_schema_file(path) {
        return Ok(ChangeOutcome::NotHandled);
    }

    let out_path = compile_and_write(path).await?;

    match registry.module_by_path(&out_path) {
        Some(id) => {
            registry.invalidate(&id);
            debug!(module = %id, "invalidated generated type module");
            Ok(ChangeOutcome::Handled {
                invalidated: vec![id],
            })
        }
        None => {
            debug!(path = %out_path.display(), "generated module not in graph yet");
            Ok(ChangeOutcome::Handled {
                invalidated: Vec::new(),
            })
        }
    }
}
