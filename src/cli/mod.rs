//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod export;
mod form;
mod scripts;
mod session;
mod settings;
mod types;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::{load_config, merge_cli_overrides, CliOverrides, LoadedConfig};
use crate::document::Document;
use crate::registry::ElementRegistry;
use crate::store::{FileSettings, ScriptStore};
use crate::workspace::Workspace;

pub use scripts::ScriptsAction;
pub use session::run_session;
pub use settings::SettingsAction;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "UIFORGE_LOG";

/// Uiforge - build engine UI layouts from property forms and export them as scripts
#[derive(Parser)]
#[command(name = "uiforge")]
#[command(about = "Uiforge - build engine UI layouts from property forms and export them as scripts")]
#[command(version)]
pub struct Cli {
    /// Config file (default: nearest uiforge.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Settings file (overrides settings.path)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List registered element types and their properties
    Types {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate the construction script for a workspace document
    Export {
        /// Workspace document (.toml or .json)
        input: PathBuf,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Wrap the script into a line-array expression
        #[arg(long)]
        lines: bool,

        /// Also add the script to the script store
        #[arg(long)]
        store: bool,

        /// Variable the statements are called on (overrides export.receiver)
        #[arg(long)]
        receiver: Option<String>,
    },

    /// Print the property form of one element of a document
    Form {
        /// Workspace document (.toml or .json)
        input: PathBuf,

        /// Element to show, 1-based (default: last)
        #[arg(short, long)]
        select: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Edit a workspace interactively on stdin
    Session {
        /// Document to start from
        #[arg(long)]
        doc: Option<PathBuf>,
    },

    /// View and edit the settings file
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Maintain the script store
    Scripts {
        #[command(subcommand)]
        action: ScriptsAction,
    },
}

/// Shared state of one CLI invocation.
pub(crate) struct Context {
    pub loaded: LoadedConfig,
    pub registry: Arc<ElementRegistry>,
}

impl Context {
    pub fn settings(&self) -> Result<FileSettings, ExitCode> {
        let path = self.loaded.settings_path();
        FileSettings::open(&path).map_err(|e| {
            eprintln!("Error: {}: {}", path.display(), e);
            ExitCode::from(EXIT_ERROR)
        })
    }

    pub fn scripts(&self, settings: &FileSettings) -> ScriptStore {
        ScriptStore::load(settings, &self.loaded.config.scripts.default_script)
    }

    pub fn workspace(&self, doc: &Path) -> Result<Workspace, ExitCode> {
        Document::read(doc).and_then(|d| d.into_workspace(Arc::clone(&self.registry))).map_err(
            |e| {
                eprintln!("Error: {}: {}", doc.display(), e);
                ExitCode::from(EXIT_ERROR)
            },
        )
    }
}

/// Install the stderr log subscriber.
///
/// `UIFORGE_LOG` wins over the configured level.
pub fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let mut loaded = match load_config(cli.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let receiver = match &cli.command {
        Commands::Export { receiver, .. } => receiver.clone(),
        _ => None,
    };
    let overrides = CliOverrides { receiver, settings: cli.settings.clone() };
    if let Err(e) = merge_cli_overrides(&mut loaded, &overrides) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    init_logging(&loaded.config.logging.level);

    let ctx = Context { loaded, registry: Arc::new(ElementRegistry::builtin()) };

    match cli.command {
        Commands::Types { json } => types::run_types(&ctx, json),
        Commands::Export { input, output, lines, store, receiver: _ } => {
            export::run_export(&ctx, &input, output.as_deref(), lines, store)
        }
        Commands::Form { input, select, json } => form::run_form(&ctx, &input, select, json),
        Commands::Session { doc } => session::run(&ctx, doc.as_deref()),
        Commands::Settings { action } => settings::run_settings(&ctx, action),
        Commands::Scripts { action } => scripts::run_scripts(&ctx, action),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_export_flags() {
        let cli = Cli::try_parse_from([
            "uiforge", "--config", "ui.toml", "export", "doc.toml", "-o", "out.js", "--lines",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("ui.toml")));
        match cli.command {
            Commands::Export { input, output, lines, store, .. } => {
                assert_eq!(input, PathBuf::from("doc.toml"));
                assert_eq!(output, Some(PathBuf::from("out.js")));
                assert!(lines);
                assert!(!store);
            }
            _ => panic!("expected export command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["uiforge", "types", "--settings", "s.json"]).unwrap();
        assert_eq!(cli.settings, Some(PathBuf::from("s.json")));
    }
}
