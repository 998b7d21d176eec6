//! # tyg-compiler
//!
//! JSON Schema to TypeScript declaration compiler.
//!
//! This crate is the pure core of the generation pipeline: it takes raw
//! schema text and returns generated declaration source text, performing no
//! I/O of its own. Callers read schema files and persist the output, which
//! keeps the compiler independently testable and trivially deterministic -
//! the same input text always yields byte-identical output.
//!
//! ## Supported schema subset
//!
//! `title`, `description` (rendered as JSDoc), `type` (including multi-type
//! arrays), `properties` / `required` / `additionalProperties`, `items`
//! (single schema or tuple form), `enum`, `const`, `oneOf` / `anyOf`,
//! `allOf`, boolean schemas, and local `$ref` into `#/definitions` or
//! `#/$defs`. Anything else fails with a [`CompileError`] rather than
//! silently producing wrong types.
//!
//! ## Example
//!
//! ```rust
//! let source = r#"{
//!     "type": "object",
//!     "properties": { "name": { "type": "string" } },
//!     "required": ["name"]
//! }"#;
//!
//! let ts = tyg_compiler::compile(source, "alert").unwrap();
//! assert!(ts.contains("export interface Alert"));
//! assert!(ts.contains("name: string;"));
//! ```

mod emit;
mod error;

pub use error::{CompileError, Result};

use serde_json::Value;

/// Compile schema text into TypeScript declaration source.
///
/// `root_name` names the top-level type when the schema carries no `title`;
/// callers usually derive it from the schema file's name. The output starts
/// with a fixed generated-file banner and contains one exported declaration
/// for the root schema plus one per named definition.
///
/// # Errors
///
/// Returns [`CompileError::Json`] when the text is not valid JSON, and
/// [`CompileError::UnsupportedSchema`] / [`CompileError::UnresolvedRef`]
/// when the document uses constructs outside the supported subset.
pub fn compile(source: &str, root_name: &str) -> Result<String> {
    let document: Value = serde_json::from_str(source)?;
    emit::emit_module(&document, root_name)
}
