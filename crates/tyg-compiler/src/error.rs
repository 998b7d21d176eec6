//! Error types for schema compilation.

use thiserror::Error;

/// Errors produced while compiling a schema document into TypeScript.
///
/// The compiler is pure - it never touches the filesystem - so every variant
/// describes a problem with the schema text itself. Callers that know which
/// file the text came from attach the path at their own layer.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The schema text is not valid JSON
    #[error("invalid JSON in schema document: {0}")]
    Json(#[from] serde_json::Error),

    /// The schema is valid JSON but uses a construct the compiler cannot express
    #[error("unsupported schema construct at '{pointer}': {message}")]
    UnsupportedSchema {
        /// JSON pointer to the offending location ("" is the document root)
        pointer: String,
        /// What was found there
        message: String,
    },

    /// A `$ref` that does not point into `#/definitions` or `#/$defs`
    #[error("unresolved schema reference: {reference}\n\nHint: only local #/definitions and #/$defs references are supported")]
    UnresolvedRef {
        /// The reference string as written in the schema
        reference: String,
    },
}

/// Result type alias using `CompileError` as the default error type.
pub type Result<T, E = CompileError> = std::result::Result<T, E>;
