//! Code generation for workspaces.
//!
//! A workspace exports to a script of engine construction calls, one
//! statement per placed element:
//!
//! ```text
//! table.add("Hello")
//!     .setWrap(true)
//!     .width(120);
//!
//! table.row();
//! ```
//!
//! Properties still at their default are left out. The script can also be
//! wrapped into a line-array expression (`lines`) for embedding into other
//! scripts.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use uiforge::export::{export_workspace, ExportOptions};
//! use uiforge::registry::ElementRegistry;
//! use uiforge::workspace::Workspace;
//!
//! let mut ws = Workspace::new(Arc::new(ElementRegistry::builtin()));
//! ws.add_element("Label").unwrap();
//! ws.add_element("Row").unwrap();
//! assert_eq!(export_workspace(&ws, &ExportOptions::default()), "table.add(\"Label\");\n\ntable.row();");
//! ```

pub mod lines;
pub mod script;

pub use lines::{to_line_array, LineArrayExporter};
pub use script::{export_to_store, export_workspace, serialize_instance, ScriptExporter};

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::workspace::Workspace;

/// Common error type for export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// IO error during file writing
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Options for code generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Variable the statements are called on
    pub receiver: String,
    /// Prefix of each chained property call
    pub indent: String,
    /// Text placed between element statements
    pub separator: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { receiver: "table".to_string(), indent: "\t".to_string(), separator: "\n\n".to_string() }
    }
}

/// Trait for export format implementations.
pub trait Exporter {
    /// Generate the exported text.
    fn render(&self, workspace: &Workspace, options: &ExportOptions) -> String;

    /// Write the exported text to `output_path`.
    fn export(
        &self,
        workspace: &Workspace,
        output_path: &Path,
        options: &ExportOptions,
    ) -> Result<(), ExportError> {
        let mut text = self.render(workspace, options);
        text.push('\n');
        fs::write(output_path, text)?;
        Ok(())
    }

    /// Get the format name for this exporter.
    fn format_name(&self) -> &'static str;

    /// Get the default file extension for this format.
    fn extension(&self) -> &'static str;
}
