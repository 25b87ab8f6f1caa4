//! Construction-call scripts.

use tracing::info;

use crate::property::escape_str;
use crate::registry::ExportStyle;
use crate::store::ScriptStore;
use crate::workspace::{ElementInstance, Workspace};

use super::{ExportOptions, Exporter};

/// Serialize one instance into its reconstruction statement.
pub fn serialize_instance(instance: &ElementInstance, options: &ExportOptions) -> String {
    let ty = instance.element_type();
    match ty.export_style() {
        ExportStyle::Fixed(call) => format!("{}.{}();", options.receiver, call),
        ExportStyle::Custom(serializer) => serializer(instance, options),
        ExportStyle::Chained => chained(instance, options),
    }
}

/// `receiver.add(...)` followed by one chained call per changed property.
fn chained(instance: &ElementInstance, options: &ExportOptions) -> String {
    let ty = instance.element_type();
    let primary = ty.primary();

    let mut out = match primary.and_then(|name| instance.value(name)) {
        Some(value) => format!("{}.add(\"{}\")", options.receiver, escape_str(&value.to_string())),
        None => format!("{}.add(new {}())", options.receiver, ty.name()),
    };

    for (name, value) in instance.active().iter() {
        if Some(name) == primary {
            continue;
        }
        let Some(property) = ty.property(name) else {
            continue;
        };
        if *value == property.default_value() {
            continue;
        }
        out.push('\n');
        out.push_str(&options.indent);
        out.push('.');
        out.push_str(&property.serialize(value));
    }
    out.push(';');
    out
}

/// Serialize every instance in workspace order.
pub fn export_workspace(workspace: &Workspace, options: &ExportOptions) -> String {
    workspace
        .elements()
        .iter()
        .map(|instance| serialize_instance(instance, options))
        .collect::<Vec<_>>()
        .join(&options.separator)
}

/// Export into a new script and return its generated name.
pub fn export_to_store(
    workspace: &Workspace,
    options: &ExportOptions,
    store: &mut ScriptStore,
) -> String {
    let text = export_workspace(workspace, options);
    let name = store.add_script(&text);
    info!(script = %name, elements = workspace.len(), "exported workspace");
    name
}

/// Exporter producing the plain construction script.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptExporter;

impl Exporter for ScriptExporter {
    fn render(&self, workspace: &Workspace, options: &ExportOptions) -> String {
        export_workspace(workspace, options)
    }

    fn format_name(&self) -> &'static str {
        "script"
    }

    fn extension(&self) -> &'static str {
        "js"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::Edit;
    use crate::registry::{ElementRegistry, ElementType};
    use crate::value::PropValue;
    use std::sync::Arc;

    fn workspace() -> Workspace {
        Workspace::new(Arc::new(ElementRegistry::builtin()))
    }

    #[test]
    fn test_defaults_are_omitted() {
        let mut ws = workspace();
        let id = ws.add_element("Label").unwrap();
        ws.add_property(id, "wrap").unwrap();
        ws.add_property(id, "width").unwrap();

        assert_eq!(export_workspace(&ws, &ExportOptions::default()), "table.add(\"Label\");");
    }

    #[test]
    fn test_changed_properties_chain_in_activation_order() {
        let mut ws = workspace();
        let id = ws.add_element("Label").unwrap();
        ws.edit_property(id, "text", "Hello").unwrap();
        ws.add_property(id, "wrap").unwrap();
        ws.edit_property(id, "wrap", Edit::Toggle).unwrap();
        ws.add_property(id, "width").unwrap();
        ws.edit_property(id, "width", "120").unwrap();
        ws.add_property(id, "alignment").unwrap();
        ws.edit_property(id, "alignment", Edit::Choose("right".to_string())).unwrap();

        assert_eq!(
            export_workspace(&ws, &ExportOptions::default()),
            "table.add(\"Hello\")\n\t.setWrap(true)\n\t.width(120)\n\t.setAlignment(Align.right);"
        );
    }

    #[test]
    fn test_primary_text_is_escaped() {
        let mut ws = workspace();
        ws.add_element_with("Label", vec![("text", PropValue::from(r#"say "hi"\n"#))]).unwrap();
        assert_eq!(
            export_workspace(&ws, &ExportOptions::default()),
            r#"table.add("say \"hi\"\\n");"#
        );
    }

    #[test]
    fn test_elements_joined_by_separator() {
        let mut ws = workspace();
        ws.add_element("Label").unwrap();
        ws.add_element("Row").unwrap();
        ws.add_element("Label").unwrap();

        let options = ExportOptions {
            receiver: "cont".to_string(),
            indent: "    ".to_string(),
            separator: "\n".to_string(),
        };
        assert_eq!(
            export_workspace(&ws, &options),
            "cont.add(\"Label\");\ncont.row();\ncont.add(\"Label\");"
        );
    }

    #[test]
    fn test_empty_workspace_exports_nothing() {
        assert_eq!(export_workspace(&workspace(), &ExportOptions::default()), "");
    }

    #[test]
    fn test_type_without_primary() {
        let mut registry = ElementRegistry::builtin();
        registry.register(
            ElementType::builder("Image")
                .widget(|| crate::widget::Widget::new("Image"))
                .properties(crate::registry::base_properties())
                .build(),
        );
        let mut ws = Workspace::new(Arc::new(registry));
        let id = ws.add_element("Image").unwrap();
        ws.add_property(id, "height").unwrap();
        ws.edit_property(id, "height", "64").unwrap();

        assert_eq!(
            export_workspace(&ws, &ExportOptions::default()),
            "table.add(new Image())\n\t.height(64);"
        );
    }

    #[test]
    fn test_custom_serializer() {
        fn stub(instance: &ElementInstance, options: &ExportOptions) -> String {
            format!("{}.stub({});", options.receiver, instance.id().0)
        }
        let mut registry = ElementRegistry::new();
        registry.register(ElementType::builder("Stub").export(ExportStyle::Custom(stub)).build());
        let mut ws = Workspace::new(Arc::new(registry));
        ws.add_element("Stub").unwrap();

        assert_eq!(export_workspace(&ws, &ExportOptions::default()), "table.stub(1);");
    }

    #[test]
    fn test_export_to_store() {
        let mut ws = workspace();
        ws.add_element("Row").unwrap();
        let mut store = ScriptStore::default();

        let name = export_to_store(&ws, &ExportOptions::default(), &mut store);
        assert_eq!(name, "Script #2");
        assert_eq!(store.get(&name), Some("table.row();"));
        assert_eq!(store.current().name, name);
    }
}
