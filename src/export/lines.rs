//! Line-array expressions.
//!
//! Scripts that must be embedded as a single expression are written as an
//! array of quoted lines joined at runtime:
//!
//! ```text
//! [
//!     "first line",
//!     "second line"
//! ].join("\n")
//! ```

use crate::property::escape_str;
use crate::workspace::Workspace;

use super::{export_workspace, ExportOptions, Exporter};

/// Wrap `source` into an array-of-lines expression.
pub fn to_line_array(source: &str) -> String {
    let lines: Vec<String> =
        source.split('\n').map(|line| format!("\"{}\"", escape_str(line))).collect();
    format!("[\n\t{}\n].join(\"\\n\")", lines.join(",\n\t"))
}

/// Exporter producing the script as a line array.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineArrayExporter;

impl Exporter for LineArrayExporter {
    fn render(&self, workspace: &Workspace, options: &ExportOptions) -> String {
        to_line_array(&export_workspace(workspace, options))
    }

    fn format_name(&self) -> &'static str {
        "lines"
    }

    fn extension(&self) -> &'static str {
        "js"
    }
}
