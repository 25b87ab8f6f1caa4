//! Named script store.
//!
//! Scripts live in a `SettingsStore` under two kinds of keys: `toolbox.scripts`
//! holds the comma-joined list of names, and `toolbox.scripts.<name>` holds
//! each script's text. Names therefore never contain commas.

use thiserror::Error;
use tracing::{debug, info};

use crate::workspace::SelectionList;

use super::settings::SettingsStore;

/// Settings key holding the script name list.
pub const SCRIPTS_KEY: &str = "toolbox.scripts";

/// Text of a freshly created script.
pub const DEFAULT_SCRIPT: &str = "print(\"praise the cat god\");";

/// Script store error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("No script named '{0}'")]
    NotFound(String),
    #[error("A script named '{0}' already exists")]
    AlreadyExists(String),
    #[error("Invalid script name '{0}'")]
    InvalidName(String),
}

/// Settings key of one script's text.
pub fn script_key(name: &str) -> String {
    format!("{}.{}", SCRIPTS_KEY, name)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub name: String,
    pub text: String,
}

/// Ordered scripts with a current selection. Never empty.
#[derive(Debug, Clone)]
pub struct ScriptStore {
    scripts: Vec<Script>,
    current: usize,
    default_script: String,
}

impl ScriptStore {
    /// A fresh store holding `Script #1` with the default script.
    pub fn new(default_script: &str) -> Self {
        Self {
            scripts: vec![Script { name: "Script #1".to_string(), text: default_script.to_string() }],
            current: 0,
            default_script: default_script.to_string(),
        }
    }

    /// Load from settings, falling back to a fresh store.
    ///
    /// The last listed script becomes current. Names listed without a text
    /// entry get the default script.
    pub fn load(settings: &dyn SettingsStore, default_script: &str) -> Self {
        let Some(list) = settings.get(SCRIPTS_KEY) else {
            return Self::new(default_script);
        };

        let mut scripts: Vec<Script> = Vec::new();
        for name in list.split(',').filter(|n| !n.is_empty()) {
            if scripts.iter().any(|s| s.name == name) {
                continue;
            }
            let text = settings.get_or(&script_key(name), default_script);
            scripts.push(Script { name: name.to_string(), text });
        }
        if scripts.is_empty() {
            return Self::new(default_script);
        }

        debug!(count = scripts.len(), "loaded scripts");
        let current = scripts.len() - 1;
        Self { scripts, current, default_script: default_script.to_string() }
    }

    /// Write every script back, dropping keys of scripts that no longer exist.
    pub fn persist(&self, settings: &mut dyn SettingsStore) {
        let prefix = format!("{}.", SCRIPTS_KEY);
        for key in settings.keys() {
            if let Some(name) = key.strip_prefix(&prefix) {
                if self.get(name).is_none() {
                    settings.remove(&key);
                }
            }
        }
        settings.put(SCRIPTS_KEY, &self.names().join(","));
        for script in &self.scripts {
            settings.put(&script_key(&script.name), &script.text);
        }
    }

    pub fn default_script(&self) -> &str {
        &self.default_script
    }

    pub fn names(&self) -> Vec<&str> {
        self.scripts.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn scripts(&self) -> &[Script] {
        &self.scripts
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.scripts.iter().find(|s| s.name == name).map(|s| s.text.as_str())
    }

    pub fn current(&self) -> &Script {
        &self.scripts[self.current]
    }

    /// Add a script under a generated `Script #N` name and make it current.
    pub fn add_script(&mut self, text: &str) -> String {
        let mut n = self.scripts.len() + 1;
        let name = loop {
            let candidate = format!("Script #{}", n);
            if self.get(&candidate).is_none() {
                break candidate;
            }
            n += 1;
        };
        self.scripts.push(Script { name: name.clone(), text: text.to_string() });
        self.current = self.scripts.len() - 1;
        info!(script = %name, "added script");
        name
    }

    pub fn select(&mut self, name: &str) -> Result<(), ScriptError> {
        self.current = self.index_of(name)?;
        Ok(())
    }

    /// Let the user pick the current script from a list.
    pub fn select_script(&mut self, ui: &mut dyn SelectionList) -> Option<String> {
        let names: Vec<String> = self.names().into_iter().map(str::to_string).collect();
        let chosen = ui.select("Select script", &names)?;
        self.select(&chosen).ok()?;
        Some(chosen)
    }

    /// Rename a script. Commas are stripped from the new name.
    pub fn rename(&mut self, from: &str, to: &str) -> Result<String, ScriptError> {
        let index = self.index_of(from)?;
        let to: String = to.chars().filter(|c| *c != ',').collect();
        let to = to.trim().to_string();
        if to.is_empty() {
            return Err(ScriptError::InvalidName(to));
        }
        if to != from && self.get(&to).is_some() {
            return Err(ScriptError::AlreadyExists(to));
        }
        self.scripts[index].name = to.clone();
        debug!(from, to = %to, "renamed script");
        Ok(to)
    }

    pub fn edit(&mut self, name: &str, text: &str) -> Result<(), ScriptError> {
        let index = self.index_of(name)?;
        self.scripts[index].text = text.to_string();
        Ok(())
    }

    /// Delete a script. The last remaining script is cleared instead.
    pub fn delete(&mut self, name: &str) -> Result<(), ScriptError> {
        let index = self.index_of(name)?;
        if self.scripts.len() == 1 {
            self.scripts[0].text.clear();
            return Ok(());
        }
        self.scripts.remove(index);
        if self.current == index {
            self.current = 0;
        } else if self.current > index {
            self.current -= 1;
        }
        info!(script = name, "deleted script");
        Ok(())
    }

    fn index_of(&self, name: &str) -> Result<usize, ScriptError> {
        self.scripts
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| ScriptError::NotFound(name.to_string()))
    }
}

impl Default for ScriptStore {
    fn default() -> Self {
        Self::new(DEFAULT_SCRIPT)
    }
}
