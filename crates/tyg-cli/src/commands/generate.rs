//! One-shot generation command.

use tyg_plugin::SchemaTypesPlugin;

use crate::cli::GenerateArgs;
use crate::config::TygConfig;
use crate::error::{CliError, Result};
use crate::ui;

/// Execute the generate command: the startup pass, without a server.
///
/// Every schema file is compiled and persisted. Individual failures are
/// reported and do not stop the rest; the command exits nonzero if any
/// schema failed so CI catches broken schemas.
pub async fn execute(args: GenerateArgs) -> Result<()> {
    let config = TygConfig::load(args.schema_dir, None)?;

    ui::info(&format!(
        "Generating type modules from {}",
        config.schema_dir.display()
    ));

    let plugin = SchemaTypesPlugin::new(&config.schema_dir);
    let report = plugin.on_start().await?;

    for (path, err) in &report.failures {
        ui::error(&format!("{}: {err}", path.display()));
    }
    ui::success(&format!(
        "Generated {} type module(s)",
        report.generated.len()
    ));

    if report.is_clean() {
        Ok(())
    } else {
        Err(CliError::SchemasFailed {
            failed: report.failures.len(),
            total: report.failures.len() + report.generated.len(),
        })
    }
}
