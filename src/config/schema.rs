//! Configuration schema types for `uiforge.toml`
//!
//! Defines the structure and validation rules for uiforge configuration.

use std::path::PathBuf;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::export::ExportOptions;
use crate::store::DEFAULT_SCRIPT;

/// Log levels accepted by `logging.level`.
pub const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// Settings file section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsConfig {
    /// Settings file, relative to the config file's directory
    #[serde(default = "default_settings_path")]
    pub path: PathBuf,
}

fn default_settings_path() -> PathBuf {
    PathBuf::from("uiforge-settings.json")
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self { path: default_settings_path() }
    }
}

/// Script store section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptsConfig {
    /// Text of newly created scripts
    #[serde(default = "default_script")]
    pub default_script: String,
}

fn default_script() -> String {
    DEFAULT_SCRIPT.to_string()
}

impl Default for ScriptsConfig {
    fn default() -> Self {
        Self { default_script: default_script() }
    }
}

/// Logging section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `UIFORGE_LOG` is unset
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_level() }
    }
}

/// Complete uiforge.toml configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiforgeConfig {
    /// Code generation settings
    #[serde(default)]
    pub export: ExportOptions,
    #[serde(default)]
    pub settings: SettingsConfig,
    #[serde(default)]
    pub scripts: ScriptsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "export.receiver")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "uiforge.toml: '{}' {}", self.field, self.message)
    }
}

fn identifier() -> &'static Regex {
    static IDENTIFIER: OnceLock<Regex> = OnceLock::new();
    IDENTIFIER.get_or_init(|| {
        Regex::new(r"^[$A-Za-z_][$0-9A-Za-z_]*$").expect("identifier regex must compile")
    })
}

/// Whether `name` can be used as a script variable.
pub fn is_identifier(name: &str) -> bool {
    identifier().is_match(name)
}

impl UiforgeConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if !is_identifier(&self.export.receiver) {
            errors.push(ConfigValidationError {
                field: "export.receiver".to_string(),
                message: "must be a valid identifier".to_string(),
            });
        }

        if self.export.indent.contains('\n') {
            errors.push(ConfigValidationError {
                field: "export.indent".to_string(),
                message: "must not contain line breaks".to_string(),
            });
        }

        if self.settings.path.as_os_str().is_empty() {
            errors.push(ConfigValidationError {
                field: "settings.path".to_string(),
                message: "must be a non-empty path".to_string(),
            });
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            errors.push(ConfigValidationError {
                field: "logging.level".to_string(),
                message: format!("must be one of {}", LOG_LEVELS.join(", ")),
            });
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_parse() {
        let config: UiforgeConfig = toml::from_str("").unwrap();
        assert_eq!(config, UiforgeConfig::default());
        assert_eq!(config.export.receiver, "table");
        assert_eq!(config.settings.path, PathBuf::from("uiforge-settings.json"));
        assert_eq!(config.scripts.default_script, DEFAULT_SCRIPT);
        assert_eq!(config.logging.level, "warn");
        assert!(config.is_valid());
    }

    #[test]
    fn test_full_config_parse() {
        let toml = r#"
[export]
receiver = "cont"
indent = "    "
separator = "\n"

[settings]
path = "state/settings.json"

[scripts]
default_script = "// new script"

[logging]
level = "debug"
"#;
        let config: UiforgeConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.export.receiver, "cont");
        assert_eq!(config.export.indent, "    ");
        assert_eq!(config.export.separator, "\n");
        assert_eq!(config.settings.path, PathBuf::from("state/settings.json"));
        assert_eq!(config.scripts.default_script, "// new script");
        assert_eq!(config.logging.level, "debug");
        assert!(config.is_valid());
    }

    #[test]
    fn test_validation_collects_all_errors() {
        let mut config = UiforgeConfig::default();
        config.export.receiver = "my table".to_string();
        config.export.indent = "\n".to_string();
        config.logging.level = "loud".to_string();

        let fields: Vec<String> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["export.receiver", "export.indent", "logging.level"]);
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("table"));
        assert!(is_identifier("$cont_2"));
        assert!(!is_identifier("2table"));
        assert!(!is_identifier("a.b"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn test_validation_error_display() {
        let err = ConfigValidationError {
            field: "export.receiver".to_string(),
            message: "must be a valid identifier".to_string(),
        };
        assert_eq!(err.to_string(), "uiforge.toml: 'export.receiver' must be a valid identifier");
    }
}
