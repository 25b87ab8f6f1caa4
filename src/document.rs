//! Workspace documents.
//!
//! A document lists placed elements with the properties they activate:
//!
//! ```toml
//! [[element]]
//! type = "Label"
//!
//! [element.properties]
//! text = "Hello"
//! wrap = true
//!
//! [[element]]
//! type = "Row"
//! ```
//!
//! Properties keep the order they were activated in, which is also the
//! order their calls are chained in the exported script.
//!
//! TOML and JSON are supported, chosen by file extension.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use toml::{Table, Value};
use tracing::debug;

use crate::registry::ElementRegistry;
use crate::value::PropValue;
use crate::workspace::{Workspace, WorkspaceError};

/// Document loading or saving error
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to access document: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse document: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Failed to write document: {0}")]
    TomlWrite(#[from] toml::ser::Error),
    #[error("Failed to parse document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported document format '{0}' (expected .toml or .json)")]
    UnsupportedFormat(String),
    #[error("Element {index}: {source}")]
    Workspace {
        index: usize,
        #[source]
        source: WorkspaceError,
    },
}

/// Document file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Toml,
    Json,
}

impl DocumentFormat {
    /// Pick the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        match ext.to_ascii_lowercase().as_str() {
            "toml" => Ok(DocumentFormat::Toml),
            "json" => Ok(DocumentFormat::Json),
            _ => Err(DocumentError::UnsupportedFormat(ext.to_string())),
        }
    }
}

/// One placed element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementEntry {
    #[serde(rename = "type")]
    pub element_type: String,
    #[serde(default, skip_serializing_if = "Table::is_empty")]
    pub properties: Table,
}

impl ElementEntry {
    /// Entry for an element type with properties in activation order.
    pub fn new<'a>(
        element_type: &str,
        properties: impl IntoIterator<Item = (&'a str, &'a PropValue)>,
    ) -> Self {
        Self {
            element_type: element_type.to_string(),
            properties: properties
                .into_iter()
                .map(|(name, value)| (name.to_string(), to_toml(value)))
                .collect(),
        }
    }

    /// Typed property values, in document order.
    pub fn property_values(&self) -> Result<Vec<(String, PropValue)>, DocumentError> {
        self.properties
            .iter()
            .map(|(name, value)| {
                let value = value.clone().try_into::<PropValue>()?;
                Ok((name.clone(), value))
            })
            .collect()
    }
}

fn to_toml(value: &PropValue) -> Value {
    match value {
        PropValue::Bool(b) => Value::Boolean(*b),
        PropValue::Number(n) => Value::Float(*n),
        PropValue::Numbers(values) => {
            Value::Array(values.iter().map(|n| Value::Float(*n)).collect())
        }
        PropValue::Text(s) => Value::String(s.clone()),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, rename = "element")]
    pub elements: Vec<ElementEntry>,
}

impl Document {
    pub fn parse(content: &str, format: DocumentFormat) -> Result<Self, DocumentError> {
        match format {
            DocumentFormat::Toml => Ok(toml::from_str(content)?),
            DocumentFormat::Json => Ok(serde_json::from_str(content)?),
        }
    }

    pub fn read(path: &Path) -> Result<Self, DocumentError> {
        let format = DocumentFormat::from_path(path)?;
        let content = fs::read_to_string(path)?;
        Self::parse(&content, format)
    }

    pub fn render(&self, format: DocumentFormat) -> Result<String, DocumentError> {
        match format {
            DocumentFormat::Toml => Ok(toml::to_string_pretty(self)?),
            DocumentFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    pub fn write(&self, path: &Path) -> Result<(), DocumentError> {
        let format = DocumentFormat::from_path(path)?;
        fs::write(path, self.render(format)?)?;
        Ok(())
    }

    /// Snapshot the active properties of every element.
    pub fn from_workspace(workspace: &Workspace) -> Self {
        let elements = workspace
            .elements()
            .iter()
            .map(|instance| {
                ElementEntry::new(instance.element_type().name(), instance.active().iter())
            })
            .collect();
        Self { elements }
    }

    /// Place every element into `workspace`, in order.
    ///
    /// Stops at the first element that fails; elements placed before it stay.
    pub fn populate(&self, workspace: &mut Workspace) -> Result<(), DocumentError> {
        for (index, entry) in self.elements.iter().enumerate() {
            let initial = entry.property_values()?;
            workspace
                .add_element_with(&entry.element_type, initial)
                .map_err(|source| DocumentError::Workspace { index, source })?;
        }
        debug!(elements = self.elements.len(), "populated workspace");
        Ok(())
    }

    /// Build a fresh workspace from this document.
    pub fn into_workspace(
        &self,
        registry: Arc<ElementRegistry>,
    ) -> Result<Workspace, DocumentError> {
        let mut workspace = Workspace::new(registry);
        self.populate(&mut workspace)?;
        Ok(workspace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{export_workspace, ExportOptions};
    use tempfile::TempDir;

    const DOC: &str = r#"
[[element]]
type = "Label"

[element.properties]
text = "Hello"
wrap = true
width = 120

[[element]]
type = "Row"
"#;

    fn registry() -> Arc<ElementRegistry> {
        Arc::new(ElementRegistry::builtin())
    }

    #[test]
    fn test_parse_toml() {
        let doc = Document::parse(DOC, DocumentFormat::Toml).unwrap();
        assert_eq!(doc.elements.len(), 2);
        let values = doc.elements[0].property_values().unwrap();
        assert_eq!(values[2], ("width".to_string(), PropValue::Number(120.0)));
        assert_eq!(values[1], ("wrap".to_string(), PropValue::Bool(true)));
        assert!(doc.elements[1].properties.is_empty());
    }

    #[test]
    fn test_into_workspace() {
        let doc = Document::parse(DOC, DocumentFormat::Toml).unwrap();
        let ws = doc.into_workspace(registry()).unwrap();

        assert_eq!(ws.len(), 2);
        let label = &ws.elements()[0];
        assert_eq!(label.active().names().collect::<Vec<_>>(), vec!["text", "wrap", "width"]);
    }

    #[test]
    fn test_unknown_type_reports_index() {
        let doc = Document::parse(
            r#"{"element": [{"type": "Row"}, {"type": "Slider"}]}"#,
            DocumentFormat::Json,
        )
        .unwrap();
        let err = doc.into_workspace(registry()).unwrap_err();
        assert!(matches!(
            err,
            DocumentError::Workspace { index: 1, source: WorkspaceError::UnknownType(_) }
        ));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(DocumentFormat::from_path(Path::new("a.toml")).unwrap(), DocumentFormat::Toml);
        assert_eq!(DocumentFormat::from_path(Path::new("a.JSON")).unwrap(), DocumentFormat::Json);
        assert!(matches!(
            DocumentFormat::from_path(Path::new("a.yaml")),
            Err(DocumentError::UnsupportedFormat(ext)) if ext == "yaml"
        ));
    }

    #[test]
    fn test_reload_keeps_activation_order() {
        let dir = TempDir::new().unwrap();
        let mut ws = Workspace::new(registry());
        let id = ws.add_element("Label").unwrap();
        ws.add_property(id, "width").unwrap();
        ws.edit_property(id, "width", "120").unwrap();
        ws.add_property(id, "wrap").unwrap();
        ws.edit_property(id, "wrap", crate::property::Edit::Toggle).unwrap();

        let options = ExportOptions::default();
        let before = export_workspace(&ws, &options);
        assert_eq!(before, "table.add(\"Label\")\n\t.width(120)\n\t.setWrap(true);");

        for name in ["order.toml", "order.json"] {
            let path = dir.path().join(name);
            Document::from_workspace(&ws).write(&path).unwrap();
            let reloaded = Document::read(&path).unwrap().into_workspace(registry()).unwrap();
            assert_eq!(export_workspace(&reloaded, &options), before, "{}", name);
        }
    }

    #[test]
    fn test_bad_property_value_is_a_parse_error() {
        let doc = Document::parse(
            r#"{"element": [{"type": "Label", "properties": {"text": {"nested": 1}}}]}"#,
            DocumentFormat::Json,
        )
        .unwrap();
        assert!(matches!(doc.into_workspace(registry()), Err(DocumentError::Toml(_))));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let doc = Document::parse(DOC, DocumentFormat::Toml).unwrap();
        let ws = doc.into_workspace(registry()).unwrap();

        for name in ["saved.toml", "saved.json"] {
            let path = dir.path().join(name);
            Document::from_workspace(&ws).write(&path).unwrap();
            let reloaded = Document::read(&path).unwrap();
            assert_eq!(reloaded, Document::from_workspace(&ws));
        }
    }
}
