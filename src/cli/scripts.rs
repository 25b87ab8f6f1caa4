//! Scripts command implementation

use std::process::ExitCode;

use clap::Subcommand;

use crate::export::to_line_array;
use crate::store::{ScriptStore, SettingsStore};

use super::{Context, EXIT_ERROR, EXIT_SUCCESS};

#[derive(Subcommand)]
pub enum ScriptsAction {
    /// List script names, marking the current one
    List,
    /// Print a script (default: current)
    Show {
        name: Option<String>,
    },
    /// Add a script holding the given text, or the default script
    Add {
        text: Option<String>,
    },
    /// Rename a script
    Rename {
        from: String,
        to: String,
    },
    /// Delete a script (the last one is cleared instead)
    Rm {
        name: String,
    },
    /// Print a script as a line-array expression (default: current)
    Copy {
        name: Option<String>,
    },
}

/// Execute the scripts command
pub fn run_scripts(ctx: &Context, action: ScriptsAction) -> ExitCode {
    let mut settings = match ctx.settings() {
        Ok(s) => s,
        Err(code) => return code,
    };
    let mut scripts = ctx.scripts(&settings);

    let changed = match action {
        ScriptsAction::List => {
            let current = scripts.current().name.clone();
            for name in scripts.names() {
                let marker = if name == current { "*" } else { " " };
                println!("{} {}", marker, name);
            }
            false
        }
        ScriptsAction::Show { name } => {
            return print_script(&scripts, name.as_deref(), |text| text.to_string());
        }
        ScriptsAction::Copy { name } => {
            return print_script(&scripts, name.as_deref(), to_line_array);
        }
        ScriptsAction::Add { text } => {
            let text = text.unwrap_or_else(|| scripts.default_script().to_string());
            let name = scripts.add_script(&text);
            println!("{}", name);
            true
        }
        ScriptsAction::Rename { from, to } => match scripts.rename(&from, &to) {
            Ok(name) => {
                println!("{}", name);
                true
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        },
        ScriptsAction::Rm { name } => match scripts.delete(&name) {
            Ok(()) => true,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        },
    };

    if changed {
        scripts.persist(&mut settings);
        if let Err(e) = settings.save() {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    }
    ExitCode::from(EXIT_SUCCESS)
}

fn print_script(scripts: &ScriptStore, name: Option<&str>, format: impl Fn(&str) -> String) -> ExitCode {
    let text = match name {
        Some(name) => scripts.get(name),
        None => Some(scripts.current().text.as_str()),
    };
    match text {
        Some(text) => {
            println!("{}", format(text));
            ExitCode::from(EXIT_SUCCESS)
        }
        None => {
            eprintln!("Error: no script named '{}'", name.unwrap_or_default());
            ExitCode::from(EXIT_ERROR)
        }
    }
}
