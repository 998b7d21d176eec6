//! The schema file naming convention and the path mapping derived from it.
//!
//! `<name>_schema.json` maps to `<name>.types.ts` beside it. The mapping is
//! an exact-suffix substitution: it is total over matching paths,
//! deterministic, and injective, and it never matches unrelated files such
//! as `schema.json` or `foo_schema.json.bak`.

use std::path::{Path, PathBuf};

/// Suffix that marks a file as a schema source.
pub const SCHEMA_SUFFIX: &str = "_schema.json";

/// Suffix of the generated type module written beside the source.
pub const TYPES_SUFFIX: &str = ".types.ts";

/// Whether a path follows the schema naming convention.
///
/// The suffix must follow a non-empty stem: a file literally named
/// `_schema.json` has no name to derive a type from and is not matched.
pub fn is_schema_file(path: &Path) -> bool {
    schema_stem(path).is_some()
}

/// The `<name>` part of `<name>_schema.json`, if the path matches.
pub fn schema_stem(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    let stem = name.strip_suffix(SCHEMA_SUFFIX)?;
    if stem.is_empty() {
        None
    } else {
        Some(stem)
    }
}

/// The generated module path for a schema file, or `None` when the path
/// does not match the naming convention.
pub fn types_path_for(path: &Path) -> Option<PathBuf> {
    let stem = schema_stem(path)?;
    Some(path.with_file_name(format!("{stem}{TYPES_SUFFIX}")))
}
