//! End-to-end pipeline tests: startup generation, incremental change
//! handling against a live module graph, and the fail-static guarantee.

use std::fs;
use std::path::Path;

use tyg_graph::ModuleGraph;
use tyg_plugin::{ChangeOutcome, PluginError, SchemaTypesPlugin};

const ALERT_SCHEMA: &str = r#"{
    "type": "object",
    "properties": {
        "id": { "type": "integer" },
        "name": { "type": "string" }
    },
    "required": ["id", "name"]
}"#;

const ALERT_SCHEMA_WITH_CHANNEL: &str = r#"{
    "type": "object",
    "properties": {
        "id": { "type": "integer" },
        "name": { "type": "string" },
        "channel": { "enum": ["email", "webhook"] }
    },
    "required": ["id", "name"]
}"#;

#[tokio::test]
async fn startup_generates_named_type_with_matching_fields() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("alert_schema.json"), ALERT_SCHEMA).unwrap();

    let plugin = SchemaTypesPlugin::new(dir.path());
    let report = plugin.on_start().await.unwrap();
    assert!(report.is_clean());

    let generated = fs::read_to_string(dir.path().join("alert.types.ts")).unwrap();
    assert!(generated.contains("export interface Alert {"));
    assert!(generated.contains("id: number;"));
    assert!(generated.contains("name: string;"));
}

#[tokio::test]
async fn change_event_regenerates_and_invalidates_exactly_one_module() {
    let dir = tempfile::tempdir().unwrap();
    let schema_path = dir.path().join("alert_schema.json");
    fs::write(&schema_path, ALERT_SCHEMA).unwrap();

    let plugin = SchemaTypesPlugin::new(dir.path());
    plugin.on_start().await.unwrap();

    // A page has imported the generated module, so the graph knows it.
    let graph = ModuleGraph::new();
    let types_path = dir.path().join("alert.types.ts");
    graph.add_import(&dir.path().join("pages/alerts.ts"), &types_path);

    // The schema gains a field.
    fs::write(&schema_path, ALERT_SCHEMA_WITH_CHANNEL).unwrap();
    let outcome = plugin.on_file_changed(&schema_path, &graph).await.unwrap();

    let invalidated = outcome.invalidated();
    assert_eq!(invalidated.len(), 1);
    assert_eq!(
        invalidated[0].as_str(),
        types_path.to_string_lossy().as_ref()
    );
    assert!(graph.is_stale(&invalidated[0]));

    let generated = fs::read_to_string(&types_path).unwrap();
    assert!(generated.contains(r#"channel?: "email" | "webhook";"#));
}

#[tokio::test]
async fn change_event_before_first_import_is_handled_quietly() {
    let dir = tempfile::tempdir().unwrap();
    let schema_path = dir.path().join("alert_schema.json");
    fs::write(&schema_path, ALERT_SCHEMA).unwrap();

    let plugin = SchemaTypesPlugin::new(dir.path());
    let graph = ModuleGraph::new();

    let outcome = plugin.on_file_changed(&schema_path, &graph).await.unwrap();
    assert!(outcome.is_handled());
    assert!(outcome.invalidated().is_empty());
    assert!(dir.path().join("alert.types.ts").exists());
}

#[tokio::test]
async fn non_schema_change_is_not_handled_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let readme = dir.path().join("readme.md");
    fs::write(&readme, "# notes").unwrap();

    let plugin = SchemaTypesPlugin::new(dir.path());
    let graph = ModuleGraph::new();

    let outcome = plugin.on_file_changed(&readme, &graph).await.unwrap();
    assert_eq!(outcome, ChangeOutcome::NotHandled);

    let entries: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries, vec!["readme.md"]);
}

#[tokio::test]
async fn regeneration_with_unchanged_content_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let schema_path = dir.path().join("alert_schema.json");
    fs::write(&schema_path, ALERT_SCHEMA).unwrap();

    let plugin = SchemaTypesPlugin::new(dir.path());
    let graph = ModuleGraph::new();

    plugin.on_start().await.unwrap();
    let first = fs::read_to_string(dir.path().join("alert.types.ts")).unwrap();

    plugin.on_file_changed(&schema_path, &graph).await.unwrap();
    let second = fs::read_to_string(dir.path().join("alert.types.ts")).unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn broken_edit_keeps_previous_module_and_recovers_on_fix() {
    let dir = tempfile::tempdir().unwrap();
    let schema_path = dir.path().join("alert_schema.json");
    fs::write(&schema_path, ALERT_SCHEMA).unwrap();

    let plugin = SchemaTypesPlugin::new(dir.path());
    plugin.on_start().await.unwrap();

    let graph = ModuleGraph::new();
    let types_path = dir.path().join("alert.types.ts");
    graph.add_import(&dir.path().join("pages/alerts.ts"), &types_path);
    let before = fs::read_to_string(&types_path).unwrap();

    // Broken edit: diagnostic, no write, no invalidation.
    fs::write(&schema_path, "{ \"type\": ").unwrap();
    let err = plugin.on_file_changed(&schema_path, &graph).await.unwrap_err();
    assert!(matches!(err, PluginError::Compile { .. }));
    assert_eq!(before, fs::read_to_string(&types_path).unwrap());
    let id = graph.module_by_path(&types_path).unwrap();
    assert!(!graph.is_stale(&id));

    // Fixing the schema resumes normal invalidation.
    fs::write(&schema_path, ALERT_SCHEMA_WITH_CHANNEL).unwrap();
    let outcome = plugin.on_file_changed(&schema_path, &graph).await.unwrap();
    assert_eq!(outcome.invalidated().len(), 1);
    assert!(graph.is_stale(&id));
    assert!(fs::read_to_string(&types_path)
        .unwrap()
        .contains("channel?:"));
}

#[tokio::test]
async fn sibling_schemas_are_untouched_by_a_single_change() {
    let dir = tempfile::tempdir().unwrap();
    let alert = dir.path().join("alert_schema.json");
    let task = dir.path().join("task_schema.json");
    fs::write(&alert, ALERT_SCHEMA).unwrap();
    fs::write(
        &task,
        r#"{ "type": "object", "properties": { "done": { "type": "boolean" } } }"#,
    )
    .unwrap();

    let plugin = SchemaTypesPlugin::new(dir.path());
    plugin.on_start().await.unwrap();

    let task_before = fs::read_to_string(dir.path().join("task.types.ts")).unwrap();
    let task_modified = fs::metadata(dir.path().join("task.types.ts"))
        .unwrap()
        .modified()
        .unwrap();

    let graph = ModuleGraph::new();
    fs::write(&alert, ALERT_SCHEMA_WITH_CHANNEL).unwrap();
    plugin.on_file_changed(&alert, &graph).await.unwrap();

    let task_after = fs::read_to_string(dir.path().join("task.types.ts")).unwrap();
    assert_eq!(task_before, task_after);
    assert_eq!(
        task_modified,
        fs::metadata(dir.path().join("task.types.ts"))
            .unwrap()
            .modified()
            .unwrap()
    );
}

#[tokio::test]
async fn generated_path_derivation_is_stable_across_hooks() {
    let schema = Path::new("/project/src/page_data/alert_detail_schema.json");
    let expected = Path::new("/project/src/page_data/alert_detail.types.ts");
    assert_eq!(
        tyg_plugin::types_path_for(schema).as_deref(),
        Some(expected)
    );
}
