//! Settings viewer

use std::process::ExitCode;

use clap::Subcommand;

use crate::store::SettingsStore;

use super::{Context, EXIT_ERROR, EXIT_SUCCESS};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// List every key with its value
    List,
    /// Print one value
    Get {
        key: String,
    },
    /// Set a value
    Put {
        key: String,
        value: String,
    },
    /// Remove a key
    Remove {
        key: String,
    },
}

/// Execute the settings command
pub fn run_settings(ctx: &Context, action: SettingsAction) -> ExitCode {
    let mut settings = match ctx.settings() {
        Ok(s) => s,
        Err(code) => return code,
    };

    match action {
        SettingsAction::List => {
            for key in settings.keys() {
                let value = settings.get_or(&key, "");
                println!("{} = {}", key, value.escape_debug());
            }
            return ExitCode::from(EXIT_SUCCESS);
        }
        SettingsAction::Get { key } => {
            return match settings.get(&key) {
                Some(value) => {
                    println!("{}", value);
                    ExitCode::from(EXIT_SUCCESS)
                }
                None => {
                    eprintln!("Error: no setting '{}'", key);
                    ExitCode::from(EXIT_ERROR)
                }
            };
        }
        SettingsAction::Put { key, value } => settings.put(&key, &value),
        SettingsAction::Remove { key } => {
            if settings.remove(&key).is_none() {
                eprintln!("Error: no setting '{}'", key);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    }

    match settings.save() {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
