//! Schema file discovery.

use std::path::{Path, PathBuf};

use crate::error::{PluginError, Result};
use crate::naming::is_schema_file;

/// Find all schema files directly under `dir`, in directory-listing order.
///
/// The order is whatever the filesystem reports; nothing downstream depends
/// on it. Zero matches is a normal result - callers treat it as a no-op.
///
/// # Errors
///
/// Returns [`PluginError::DirectoryUnreadable`] when the directory does not
/// exist or cannot be listed. Callers treat this as fatal at startup.
pub async fn find_schema_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries =
        tokio::fs::read_dir(dir)
            .await
            .map_err(|source| PluginError::DirectoryUnreadable {
                path: dir.to_path_buf(),
                source,
            })?;

    let mut found = Vec::new();
    loop {
        let entry = entries
            .next_entry()
            .await
            .map_err(|source| PluginError::DirectoryUnreadable {
                path: dir.to_path_buf(),
                source,
            })?;
        let Some(entry) = entry else { break };

        let path = entry.path();
        let is_file = entry
            .file_type()
            .await
            .map(|ty| ty.is_file())
            .unwrap_or(false);
        if is_file && is_schema_file(&path) {
            found.push(path);
        }
    }
    Ok(found)
}
