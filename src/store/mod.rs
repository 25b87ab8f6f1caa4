//! Persistent settings and the script store built on them.

mod scripts;
mod settings;

pub use scripts::{script_key, Script, ScriptError, ScriptStore, DEFAULT_SCRIPT, SCRIPTS_KEY};
pub use settings::{FileSettings, MemorySettings, SettingsError, SettingsStore};
