//! Property editing form.
//!
//! A `Form` is a snapshot of the controls for one selected element. Hosts
//! render it into their own toolkit through `WidgetContainer`; every
//! interactive control carries a `Binding` the host routes back into the
//! workspace.

use std::fmt::Write as _;

use serde::Serialize;

use crate::property::{Control, Edit};
use crate::value::format_number;
use crate::widget::ElementId;

use super::instance::ElementInstance;

/// What a bound control does when used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormAction {
    /// Route the control's input to `Workspace::edit_property`
    Edit,
    /// Route to `Workspace::remove_property`
    Remove,
    /// Route to `Workspace::choose_property`
    AddProperty,
}

/// Routing information attached to an interactive control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Binding {
    pub element: ElementId,
    pub property: Option<String>,
    pub action: FormAction,
    /// Field index within a grouped number property
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot: Option<usize>,
}

impl Binding {
    /// The edit a host should route for `text` typed into this control.
    pub fn text_edit(&self, text: impl Into<String>) -> Edit {
        let text = text.into();
        match self.slot {
            Some(index) => Edit::Slot { index, text },
            None => Edit::Text(text),
        }
    }
}

/// One active property with its control.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormRow {
    pub property: String,
    pub control: Control,
}

/// Editing form for one element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Form {
    pub element: ElementId,
    pub title: String,
    pub rows: Vec<FormRow>,
    /// Inactive properties offered by the add button
    pub addable: Vec<String>,
}

impl Form {
    /// Build the form for an instance from its active properties.
    pub fn build(instance: &ElementInstance) -> Self {
        let ty = instance.element_type();
        let rows = instance
            .active()
            .iter()
            .filter_map(|(name, value)| {
                ty.property(name)
                    .map(|p| FormRow { property: name.to_string(), control: p.render(value) })
            })
            .collect();
        Self {
            element: instance.id(),
            title: instance.label(),
            rows,
            addable: instance.inactive_properties(),
        }
    }

    /// Whether the add-property button is shown.
    pub fn can_add(&self) -> bool {
        !self.addable.is_empty()
    }

    pub fn row(&self, property: &str) -> Option<&FormRow> {
        self.rows.iter().find(|r| r.property == property)
    }

    /// Replace one row's control after an edit, without a full rebuild.
    pub(crate) fn update_row(&mut self, property: &str, control: Control) {
        if let Some(row) = self.rows.iter_mut().find(|r| r.property == property) {
            row.control = control;
        }
    }

    /// Lay the form out into a widget container.
    pub fn render_into(&self, container: &mut dyn WidgetContainer) {
        container.heading(&self.title);
        for row in &self.rows {
            let edit = self.binding(Some(&row.property), FormAction::Edit);
            container.label(&row.property);
            match &row.control {
                Control::TextField { value } => container.text_field(&edit, value),
                Control::NumberField { value } => container.number_field(&edit, value),
                Control::Toggle { label } => container.toggle(&edit, label),
                Control::Slider { min, max, step, value } => {
                    container.slider(&edit, *min, *max, *step, *value)
                }
                Control::Choice { label, .. } => container.button(&edit, label),
                Control::NumberFields { values } => {
                    for (index, value) in values.iter().enumerate() {
                        let slot = Binding { slot: Some(index), ..edit.clone() };
                        container.number_field(&slot, value);
                    }
                }
            }
            container.button(&self.binding(Some(&row.property), FormAction::Remove), "remove");
            container.row();
        }

        if !self.can_add() {
            return;
        }
        if !self.rows.is_empty() {
            container.separator();
        }
        container.button(&self.binding(None, FormAction::AddProperty), "add property");
    }

    fn binding(&self, property: Option<&str>, action: FormAction) -> Binding {
        Binding { element: self.element, property: property.map(str::to_string), action, slot: None }
    }
}

/// The host toolkit's container-building surface.
pub trait WidgetContainer {
    fn heading(&mut self, text: &str);
    fn label(&mut self, text: &str);
    fn text_field(&mut self, binding: &Binding, value: &str);
    fn number_field(&mut self, binding: &Binding, value: &str);
    fn slider(&mut self, binding: &Binding, min: f64, max: f64, step: f64, value: f64);
    fn toggle(&mut self, binding: &Binding, label: &str);
    fn button(&mut self, binding: &Binding, label: &str);
    fn separator(&mut self);
    /// End the current row.
    fn row(&mut self);
}

/// Plain-text container used by the command line.
#[derive(Debug, Default)]
pub struct TextContainer {
    out: String,
    line: Vec<String>,
}

impl TextContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finished text, flushing any open row.
    pub fn finish(mut self) -> String {
        self.row();
        self.out
    }
}

impl WidgetContainer for TextContainer {
    fn heading(&mut self, text: &str) {
        let _ = writeln!(self.out, "== {} ==", text);
    }

    fn label(&mut self, text: &str) {
        self.line.push(format!("{:<14}", text));
    }

    fn text_field(&mut self, _binding: &Binding, value: &str) {
        self.line.push(format!("[{}]", value));
    }

    fn number_field(&mut self, _binding: &Binding, value: &str) {
        self.line.push(format!("[{}]", value));
    }

    fn slider(&mut self, _binding: &Binding, min: f64, max: f64, _step: f64, value: f64) {
        self.line.push(format!(
            "<{} .. {} .. {}>",
            format_number(min),
            format_number(value),
            format_number(max)
        ));
    }

    fn toggle(&mut self, _binding: &Binding, label: &str) {
        self.line.push(format!("({})", label));
    }

    fn button(&mut self, _binding: &Binding, label: &str) {
        self.line.push(format!("<{}>", label));
    }

    fn separator(&mut self) {
        self.row();
        self.out.push_str("----\n");
    }

    fn row(&mut self) {
        if !self.line.is_empty() {
            self.out.push_str(self.line.join(" ").trim_end());
            self.out.push('\n');
            self.line.clear();
        }
    }
}
