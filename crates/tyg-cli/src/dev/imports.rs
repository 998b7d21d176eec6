//! Relative import scanning for served modules.
//!
//! The dev server needs importer edges to know which pages to reload when a
//! generated module goes stale. A full parser is not warranted for that;
//! a line-oriented scan of ESM import/export clauses covers the module
//! shapes this server hosts.

use std::path::{Component, Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tyg_graph::ModuleGraph;

static IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    // Matches `import ... from "x"`, `export ... from "x"` and bare
    // `import "x"` forms. The specifier must directly follow either the
    // keyword or a from clause, so string literals elsewhere do not match.
    Regex::new(r#"(?:import|export)\s+(?:[^'";]*?\sfrom\s+)?["']([^"']+)["']"#)
        .expect("import regex is valid")
});

/// Extract relative import specifiers (`./x`, `../x`) from module source.
pub fn relative_imports(source: &str) -> Vec<String> {
    IMPORT_RE
        .captures_iter(source)
        .map(|c| c[1].to_string())
        .filter(|spec| spec.starts_with("./") || spec.starts_with("../"))
        .collect()
}

/// Resolve a relative specifier against the importing module's directory.
///
/// Extensionless specifiers get `.ts` appended - enough for the generated
/// modules and the TypeScript pages this server hosts.
pub fn resolve_relative(importer: &Path, spec: &str) -> PathBuf {
    let base = importer.parent().unwrap_or_else(|| Path::new(""));
    let mut resolved = normalize(&base.join(spec));
    if resolved.extension().is_none() {
        resolved.set_extension("ts");
    }
    resolved
}

/// Register a served module and its relative import edges in the graph.
pub fn register_module(graph: &ModuleGraph, path: &Path, source: &str) {
    graph.ensure_module(path);
    for spec in relative_imports(source) {
        let imported = resolve_relative(path, &spec);
        graph.add_import(path, &imported);
    }
}

/// Collapse `.` and `..` components without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_imports_extraction() {
        let source = r#"
            import { Alert } from "./alert.types";
            import type { Task } from '../tasks/task.types';
            import { api } from "@lib/api";
            import "./side-effect";
            export * from "./re-exported";
            const s = "./not-an-import";
        "#;

        let specs = relative_imports(source);
        assert_eq!(
            specs,
            vec![
                "./alert.types",
                "../tasks/task.types",
                "./side-effect",
                "./re-exported"
            ]
        );
    }

    #[test]
    fn test_resolve_relative_appends_ts() {
        let importer = Path::new("/project/src/pages/alerts.ts");
        assert_eq!(
            resolve_relative(importer, "./store"),
            PathBuf::from("/project/src/pages/store.ts")
        );
        assert_eq!(
            resolve_relative(importer, "../page_data/alert.types"),
            PathBuf::from("/project/src/page_data/alert.types.ts")
        );
    }

    #[test]
    fn test_resolve_keeps_explicit_extension() {
        let importer = Path::new("/project/src/pages/alerts.ts");
        assert_eq!(
            resolve_relative(importer, "./helper.js"),
            PathBuf::from("/project/src/pages/helper.js")
        );
    }

    #[test]
    fn test_register_module_builds_edges() {
        let graph = ModuleGraph::new();
        let page = Path::new("/project/src/pages/alerts.ts");
        register_module(
            &graph,
            page,
            r#"import { Alert } from "../page_data/alert.types";"#,
        );

        let types = graph
            .module_by_path(Path::new("/project/src/page_data/alert.types.ts"))
            .unwrap();
        let dependents = graph.transitive_dependents(&types);
        assert_eq!(dependents.len(), 1);
        assert_eq!(dependents[0].as_str(), "/project/src/pages/alerts.ts");
    }
}
