//! Key/value settings persistence.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Settings persistence error
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to access settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed settings file: {0}")]
    Json(#[from] serde_json::Error),
}

/// String-keyed persistent settings.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<String>;

    fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn put(&mut self, key: &str, value: &str);

    fn remove(&mut self, key: &str) -> Option<String>;

    /// All keys, sorted.
    fn keys(&self) -> Vec<String>;

    /// Flush pending changes.
    fn save(&mut self) -> Result<(), SettingsError>;
}

/// In-memory settings. `save` is a no-op.
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    values: BTreeMap<String, String>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn put(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    fn save(&mut self) -> Result<(), SettingsError> {
        Ok(())
    }
}

/// Settings kept in a flat JSON object on disk.
#[derive(Debug, Clone)]
pub struct FileSettings {
    path: PathBuf,
    values: BTreeMap<String, String>,
    dirty: bool,
}

impl FileSettings {
    /// Open a settings file. A missing file starts out empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let values = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            BTreeMap::new()
        };
        debug!(path = %path.display(), entries = values.len(), "opened settings");
        Ok(Self { path, values, dirty: false })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileSettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn put(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        self.dirty = true;
    }

    fn remove(&mut self, key: &str) -> Option<String> {
        let removed = self.values.remove(key);
        self.dirty |= removed.is_some();
        removed
    }

    fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    fn save(&mut self) -> Result<(), SettingsError> {
        if !self.dirty {
            return Ok(());
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, json + "\n")?;
        self.dirty = false;
        debug!(path = %self.path.display(), entries = self.values.len(), "saved settings");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_settings() {
        let mut settings = MemorySettings::new();
        assert_eq!(settings.get_or("a", "fallback"), "fallback");
        settings.put("b", "2");
        settings.put("a", "1");
        assert!(settings.has("a"));
        assert_eq!(settings.keys(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(settings.remove("a"), Some("1".to_string()));
        assert!(!settings.has("a"));
    }

    #[test]
    fn test_file_settings_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let settings = FileSettings::open(dir.path().join("settings.json")).unwrap();
        assert!(settings.keys().is_empty());
    }

    #[test]
    fn test_file_settings_persist() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = FileSettings::open(&path).unwrap();
        settings.put("toolbox.scripts", "Script #1");
        settings.save().unwrap();

        let reopened = FileSettings::open(&path).unwrap();
        assert_eq!(reopened.get("toolbox.scripts"), Some("Script #1".to_string()));
    }

    #[test]
    fn test_file_settings_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(FileSettings::open(&path), Err(SettingsError::Json(_))));
    }

    #[test]
    fn test_clean_store_does_not_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        let mut settings = FileSettings::open(&path).unwrap();
        settings.save().unwrap();
        assert!(!path.exists());
    }
}
