//! Configuration loading and discovery for `uiforge.toml`
//!
//! Provides functions to find, load, and merge configuration.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use super::schema::UiforgeConfig;

/// Config file name looked up by discovery.
pub const CONFIG_FILE: &str = "uiforge.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse uiforge.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override the export receiver
    pub receiver: Option<String>,
    /// Override the settings file
    pub settings: Option<PathBuf>,
}

/// A loaded configuration and the file it came from.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: UiforgeConfig,
    /// `None` when no config file was found
    pub path: Option<PathBuf>,
    /// Settings file given on the command line, relative to the working
    /// directory
    pub settings_override: Option<PathBuf>,
}

impl LoadedConfig {
    /// Settings file: the command-line override if any, otherwise
    /// `settings.path` resolved against the config file's directory.
    pub fn settings_path(&self) -> PathBuf {
        if let Some(ref path) = self.settings_override {
            return path.clone();
        }
        match self.path.as_deref().and_then(config_root) {
            Some(root) => resolve_path(root, &self.config.settings.path),
            None => self.config.settings.path.clone(),
        }
    }
}

/// Find uiforge.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for uiforge.toml
/// 2. Check XDG_CONFIG_HOME/uiforge/uiforge.toml (or ~/.config/uiforge/uiforge.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find uiforge.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("uiforge").join(CONFIG_FILE);
    config_path.exists().then_some(config_path)
}

/// Find uiforge.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a uiforge.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the default
/// configuration.
pub fn load_config(path: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            let config = load_config_file(&p)?;
            debug!(path = %p.display(), "loaded config");
            Ok(LoadedConfig { config, path: Some(p), settings_override: None })
        }
        None => Ok(LoadedConfig { config: default_config(), ..Default::default() }),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<UiforgeConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: UiforgeConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Configuration used when no uiforge.toml is found.
pub fn default_config() -> UiforgeConfig {
    UiforgeConfig::default()
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values. The merged
/// configuration is validated again.
pub fn merge_cli_overrides(
    loaded: &mut LoadedConfig,
    overrides: &CliOverrides,
) -> Result<(), ConfigError> {
    if let Some(ref receiver) = overrides.receiver {
        loaded.config.export.receiver = receiver.clone();
    }

    let mut errors: Vec<String> =
        loaded.config.validate().into_iter().map(|e| e.to_string()).collect();

    if let Some(ref settings) = overrides.settings {
        if settings.as_os_str().is_empty() {
            errors.push("--settings: must be a non-empty path".to_string());
        }
        loaded.settings_override = Some(settings.clone());
    }

    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors));
    }
    Ok(())
}

/// Directory holding a config file.
pub fn config_root(config_path: &Path) -> Option<&Path> {
    config_path.parent()
}

/// Resolve a path relative to the config directory.
///
/// If the path is absolute, returns it unchanged.
/// If relative, joins it with the config directory.
pub fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
