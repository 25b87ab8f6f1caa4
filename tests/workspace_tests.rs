//! End-to-end scenarios over the library API
//!
//! Builds workspaces from the built-in registry, edits them through the same
//! paths a host UI uses, and checks the live preview, forms and export.

use std::sync::Arc;

use uiforge::document::{Document, DocumentFormat};
use uiforge::export::{export_to_store, export_workspace, to_line_array, ExportOptions};
use uiforge::property::{Control, Edit};
use uiforge::registry::ElementRegistry;
use uiforge::store::{MemorySettings, ScriptStore, SettingsStore, DEFAULT_SCRIPT};
use uiforge::value::{AttrValue, PropValue};
use uiforge::widget::ElementId;
use uiforge::workspace::{EditOutcome, ScriptedSelection, Workspace, WorkspaceError};

fn workspace() -> Workspace {
    Workspace::new(Arc::new(ElementRegistry::builtin()))
}

// ============================================================================
// Label / Row scenario
// ============================================================================

#[test]
fn test_label_row_label_scenario() {
    let mut ws = workspace();
    let first = ws.add_element("Label").unwrap();
    ws.edit_property(first, "text", "Name:").unwrap();
    ws.add_property(first, "fontScaleX").unwrap();
    ws.edit_property(first, "fontScaleX", Edit::Slide(1.6)).unwrap();

    let row = ws.add_element("Row").unwrap();
    let second = ws.add_element("Label").unwrap();
    ws.add_property(second, "pad").unwrap();
    ws.edit_property(second, "pad", Edit::Slot { index: 1, text: "8".to_string() }).unwrap();

    assert_eq!(ws.preview().rows(), vec![vec![first], vec![second]]);
    assert!(ws.element(row).unwrap().handle().is_none());

    let first_cell = ws.element(first).unwrap().handle().unwrap();
    assert_eq!(first_cell.widget().get("fontScaleX"), Some(&AttrValue::Number(1.5)));

    assert_eq!(
        export_workspace(&ws, &ExportOptions::default()),
        "table.add(\"Name:\")\n\t.setFontScaleX(1.5);\n\ntable.row();\n\ntable.add(\"Label\")\n\t.pad(4, 8, 4, 4);"
    );
}

#[test]
fn test_new_label_exports_only_its_text() {
    let mut ws = workspace();
    ws.add_element("Label").unwrap();
    assert_eq!(export_workspace(&ws, &ExportOptions::default()), "table.add(\"Label\");");
}

// ============================================================================
// Ordering and structural errors
// ============================================================================

#[test]
fn test_export_follows_placement_order() {
    let mut ws = workspace();
    for text in ["a", "b", "c"] {
        ws.add_element_with("Label", vec![("text", PropValue::from(text))]).unwrap();
    }
    let middle = ws.elements()[1].id();
    ws.remove_element(middle).unwrap();

    assert_eq!(
        export_workspace(&ws, &ExportOptions::default()),
        "table.add(\"a\");\n\ntable.add(\"c\");"
    );
}

#[test]
fn test_removing_missing_element_leaves_sequence_intact() {
    let mut ws = workspace();
    let a = ws.add_element("Label").unwrap();
    let b = ws.add_element("Row").unwrap();
    let before: Vec<ElementId> = ws.elements().iter().map(|e| e.id()).collect();
    let slots = ws.preview().slots().to_vec();

    assert_eq!(
        ws.remove_element(ElementId(999)).unwrap_err(),
        WorkspaceError::NotInWorkspace(ElementId(999))
    );
    let after: Vec<ElementId> = ws.elements().iter().map(|e| e.id()).collect();
    assert_eq!(after, before);
    assert_eq!(after, vec![a, b]);
    assert_eq!(ws.preview().slots(), slots.as_slice());
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_numeric_fields_reject_garbage() {
    let mut ws = workspace();
    let id = ws.add_element("Label").unwrap();
    ws.add_property(id, "height").unwrap();

    for input in ["", "tall", "12px", "NaN"] {
        assert_eq!(ws.edit_property(id, "height", input).unwrap(), EditOutcome::Rejected);
    }
    let label = ws.element(id).unwrap();
    assert_eq!(label.active().get("height"), Some(&PropValue::Number(50.0)));
    assert_eq!(label.handle().unwrap().layout("height"), Some(&AttrValue::Number(50.0)));
}

#[test]
fn test_enum_rejects_non_members() {
    let mut ws = workspace();
    let id = ws.add_element("Label").unwrap();
    ws.add_property(id, "align").unwrap();

    let outcome = ws.edit_property(id, "align", Edit::Choose("isTop".to_string())).unwrap();
    assert_eq!(outcome, EditOutcome::Rejected);
    let outcome = ws.edit_property(id, "align", Edit::Choose("topLeft".to_string())).unwrap();
    assert_eq!(outcome, EditOutcome::Applied);
    assert_eq!(
        ws.element(id).unwrap().handle().unwrap().layout("align"),
        Some(&AttrValue::Ordinal(10))
    );
}

#[test]
fn test_text_is_escaped_in_setter_calls() {
    let mut ws = workspace();
    let id = ws.add_element("Label").unwrap();
    ws.edit_property(id, "text", r#"say "hi"\n"#).unwrap();

    let out = export_workspace(&ws, &ExportOptions::default());
    assert!(out.contains(r#"\"hi\"\\n"#), "unescaped output: {}", out);
}

// ============================================================================
// Forms and selection lists
// ============================================================================

#[test]
fn test_form_tracks_selection() {
    let mut ws = workspace();
    let label = ws.add_element("Label").unwrap();
    let mut ui = ScriptedSelection::new([Some("wrap")]);
    ws.choose_property(label, &mut ui).unwrap();

    let form = ws.form().unwrap();
    assert_eq!(form.title, "Label #1");
    assert_eq!(
        form.rows.iter().map(|r| r.property.as_str()).collect::<Vec<_>>(),
        vec!["text", "wrap"]
    );
    assert_eq!(form.row("wrap").unwrap().control, Control::Toggle { label: "false".to_string() });

    ws.select_element(None).unwrap();
    assert!(ws.form().is_none());
}

#[test]
fn test_cancelled_selection_changes_nothing() {
    let mut ws = workspace();
    let mut ui = ScriptedSelection::new(Vec::<Option<String>>::new());
    assert_eq!(ws.choose_element(&mut ui).unwrap(), None);
    assert!(ws.is_empty());
    assert_eq!(ws.form_revision(), 0);
}

// ============================================================================
// Documents and the script store
// ============================================================================

#[test]
fn test_document_round_trip_preserves_export() {
    let mut ws = workspace();
    let id = ws.add_element("Label").unwrap();
    ws.add_property(id, "wrap").unwrap();
    ws.edit_property(id, "wrap", Edit::Toggle).unwrap();
    ws.add_element("Row").unwrap();

    let text = Document::from_workspace(&ws).render(DocumentFormat::Toml).unwrap();
    let reloaded = Document::parse(&text, DocumentFormat::Toml)
        .unwrap()
        .into_workspace(Arc::clone(ws.registry()))
        .unwrap();

    let options = ExportOptions::default();
    assert_eq!(export_workspace(&reloaded, &options), export_workspace(&ws, &options));
}

#[test]
fn test_export_into_persisted_store() {
    let mut ws = workspace();
    ws.add_element("Label").unwrap();

    let mut settings = MemorySettings::new();
    let mut scripts = ScriptStore::load(&settings, DEFAULT_SCRIPT);
    let name = export_to_store(&ws, &ExportOptions::default(), &mut scripts);
    scripts.persist(&mut settings);

    assert_eq!(settings.get("toolbox.scripts"), Some("Script #1,Script #2".to_string()));
    assert_eq!(settings.get(&format!("toolbox.scripts.{}", name)), Some("table.add(\"Label\");".to_string()));

    let reloaded = ScriptStore::load(&settings, DEFAULT_SCRIPT);
    assert_eq!(reloaded.current().name, name);
    assert_eq!(
        to_line_array(&reloaded.current().text),
        "[\n\t\"table.add(\\\"Label\\\");\"\n].join(\"\\n\")"
    );
}
