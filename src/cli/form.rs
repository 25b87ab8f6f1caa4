//! Form command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::widget::ElementId;
use crate::workspace::TextContainer;

use super::{Context, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the form command
pub fn run_form(ctx: &Context, input: &Path, select: Option<usize>, json: bool) -> ExitCode {
    let mut workspace = match ctx.workspace(input) {
        Ok(ws) => ws,
        Err(code) => return code,
    };
    if workspace.is_empty() {
        eprintln!("Error: {} has no elements", input.display());
        return ExitCode::from(EXIT_ERROR);
    }

    let index = select.unwrap_or(workspace.len());
    let id: Option<ElementId> =
        index.checked_sub(1).and_then(|i| workspace.elements().get(i)).map(|e| e.id());
    let Some(id) = id else {
        eprintln!("Error: element {} out of range (1..={})", index, workspace.len());
        return ExitCode::from(EXIT_INVALID_ARGS);
    };
    if let Err(e) = workspace.select_element(Some(id)) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_ERROR);
    }

    let Some(form) = workspace.form() else {
        return ExitCode::from(EXIT_ERROR);
    };
    if json {
        match serde_json::to_string_pretty(form) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        let mut container = TextContainer::new();
        form.render_into(&mut container);
        print!("{}", container.finish());
    }
    ExitCode::from(EXIT_SUCCESS)
}
