//! Error types for the schema-types pipeline.

use std::path::PathBuf;

use thiserror::Error;
use tyg_compiler::CompileError;

/// Errors surfaced by the pipeline's hooks.
///
/// Filesystem failures and compile failures are kept apart because the
/// host treats them differently: an unreadable schema directory aborts
/// startup, while a compile error during a change event is a developer
/// diagnostic that must leave the previously generated module untouched.
#[derive(Debug, Error)]
pub enum PluginError {
    /// The configured schema directory is missing or unreadable. Fatal at
    /// startup - with no directory there is nothing safe to build.
    #[error("schema directory is not readable: {}\n\nHint: check the schema_dir setting and directory permissions", .path.display())]
    DirectoryUnreadable {
        /// The directory that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Reading or writing a single file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// The file being read or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A path that does not follow the schema naming convention was handed
    /// to an operation that requires one
    #[error("not a schema file: {}\n\nHint: schema files end in '_schema.json'", .path.display())]
    NotSchemaFile {
        /// The offending path
        path: PathBuf,
    },

    /// A schema failed to compile; the diagnostic carries the source path
    #[error("failed to compile schema {}: {source}", .path.display())]
    Compile {
        /// The schema file that failed
        path: PathBuf,
        /// The compiler diagnostic
        #[source]
        source: CompileError,
    },
}

impl PluginError {
    /// Whether this error is a schema compile diagnostic rather than an
    /// environment failure.
    pub fn is_compile_error(&self) -> bool {
        matches!(self, PluginError::Compile { .. })
    }
}

/// Result type alias using `PluginError` as the default error type.
pub type Result<T, E = PluginError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_error_carries_path() {
        let compile_err = tyg_compiler::compile("{ nope", "alert").unwrap_err();
        let err = PluginError::Compile {
            path: PathBuf::from("/src/page_data/alert_schema.json"),
            source: compile_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("alert_schema.json"));
        assert!(err.is_compile_error());
    }

    #[test]
    fn test_directory_unreadable_hint() {
        let err = PluginError::DirectoryUnreadable {
            path: PathBuf::from("/missing"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/missing"));
        assert!(msg.contains("Hint:"));
        assert!(!err.is_compile_error());
    }
}
