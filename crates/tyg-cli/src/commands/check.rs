//! Schema validation command.

use crate::cli::CheckArgs;
use crate::config::TygConfig;
use crate::error::{CliError, Result};
use crate::ui;

/// Execute the check command: compile every schema in memory, write
/// nothing, report every diagnostic.
pub async fn execute(args: CheckArgs) -> Result<()> {
    let config = TygConfig::load(args.schema_dir, None)?;

    let files = tyg_plugin::find_schema_files(&config.schema_dir).await?;
    if files.is_empty() {
        ui::warning(&format!(
            "No schema files found in {}",
            config.schema_dir.display()
        ));
        return Ok(());
    }

    let mut failed = 0usize;
    for path in &files {
        match tyg_plugin::compile_schema_file(path).await {
            Ok(_) => ui::success(&format!("{}", path.display())),
            Err(err) => {
                failed += 1;
                ui::error(&format!("{err}"));
            }
        }
    }

    if failed == 0 {
        ui::success(&format!("Checked {} schema file(s)", files.len()));
        Ok(())
    } else {
        Err(CliError::SchemasFailed {
            failed,
            total: files.len(),
        })
    }
}
