//! Export command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::export::{export_to_store, ExportError, Exporter, LineArrayExporter, ScriptExporter};
use crate::store::SettingsStore;

use super::{Context, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the export command
pub fn run_export(
    ctx: &Context,
    input: &Path,
    output: Option<&Path>,
    lines: bool,
    store: bool,
) -> ExitCode {
    let workspace = match ctx.workspace(input) {
        Ok(ws) => ws,
        Err(code) => return code,
    };
    let options = &ctx.loaded.config.export;
    let exporter: &dyn Exporter = if lines { &LineArrayExporter } else { &ScriptExporter };

    if store {
        let mut settings = match ctx.settings() {
            Ok(s) => s,
            Err(code) => return code,
        };
        let mut scripts = ctx.scripts(&settings);
        let name = export_to_store(&workspace, options, &mut scripts);
        scripts.persist(&mut settings);
        if let Err(e) = settings.save() {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
        eprintln!("Stored as '{}'", name);
    }

    match output {
        Some(path) => match exporter.export(&workspace, path, options) {
            Ok(()) => {
                eprintln!("Wrote {} ({})", path.display(), exporter.format_name());
                ExitCode::from(EXIT_SUCCESS)
            }
            Err(ExportError::Io(e)) => {
                eprintln!("Error: {}: {}", path.display(), e);
                ExitCode::from(EXIT_ERROR)
            }
        },
        None => {
            println!("{}", exporter.render(&workspace, options));
            ExitCode::from(EXIT_SUCCESS)
        }
    }
}
