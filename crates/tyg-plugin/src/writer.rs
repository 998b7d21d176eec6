//! Generated module persistence.

use std::path::{Path, PathBuf};

use crate::error::{PluginError, Result};
use crate::naming::types_path_for;

/// Write compiled text to the generated module path derived from
/// `schema_path`, returning the path written.
///
/// The write goes to a temp sibling first and is moved into place with a
/// rename, so a reader never observes a partially written module. On any
/// failure the previously generated file is left exactly as it was.
///
/// # Errors
///
/// [`PluginError::NotSchemaFile`] when the path does not follow the naming
/// convention, [`PluginError::Io`] when the write or rename fails.
pub async fn write_generated(schema_path: &Path, text: &str) -> Result<PathBuf> {
    let out_path = types_path_for(schema_path).ok_or_else(|| PluginError::NotSchemaFile {
        path: schema_path.to_path_buf(),
    })?;

    let tmp_path = tmp_sibling(&out_path);
    tokio::fs::write(&tmp_path, text)
        .await
        .map_err(|source| PluginError::Io {
            path: tmp_path.clone(),
            source,
        })?;

    if let Err(source) = tokio::fs::rename(&tmp_path, &out_path).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(PluginError::Io {
            path: out_path,
            source,
        });
    }
    Ok(out_path)
}

/// Hidden temp name beside the target, so the rename stays on one
/// filesystem.
fn tmp_sibling(out_path: &Path) -> PathBuf {
    let name = out_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    out_path.with_file_name(format!(".{name}.tmp"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_writes_to_derived_path() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("alert_schema.json");

        let out = write_generated(&schema, "export interface Alert {}\n")
            .await
            .unwrap();
        assert_eq!(out, dir.path().join("alert.types.ts"));

        let written = std::fs::read_to_string(&out).unwrap();
        assert_eq!(written, "export interface Alert {}\n");
    }

    #[tokio::test]
    async fn test_overwrites_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("alert_schema.json");

        write_generated(&schema, "first").await.unwrap();
        write_generated(&schema, "second").await.unwrap();

        let written = std::fs::read_to_string(dir.path().join("alert.types.ts")).unwrap();
        assert_eq!(written, "second");
    }

    #[tokio::test]
    async fn test_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("alert_schema.json");
        write_generated(&schema, "content").await.unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["alert.types.ts"]);
    }

    #[tokio::test]
    async fn test_rejects_non_schema_path() {
        let err = write_generated(Path::new("/p/readme.md"), "text")
            .await
            .unwrap_err();
        assert!(matches!(err, PluginError::NotSchemaFile { .. }));
    }

    #[tokio::test]
    async fn test_write_failure_preserves_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing_dir = dir.path().join("gone");
        let schema = missing_dir.join("alert_schema.json");

        // Parent directory does not exist, so the temp write fails.
        let err = write_generated(&schema, "content").await.unwrap_err();
        assert!(matches!(err, PluginError::Io { .. }));
    }
}
