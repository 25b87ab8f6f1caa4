//! Placed element instances.

use std::sync::Arc;

use crate::property::Property;
use crate::registry::ElementType;
use crate::value::PropValue;
use crate::widget::{Cell, ElementId};

/// Active properties of an instance, in activation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActiveProperties {
    entries: Vec<(String, PropValue)>,
}

impl ActiveProperties {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Set a value, keeping the original position of an existing entry.
    pub fn set(&mut self, name: &str, value: PropValue) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<PropValue> {
        let index = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One placed occurrence of an element type.
#[derive(Debug, Clone)]
pub struct ElementInstance {
    id: ElementId,
    element_type: Arc<ElementType>,
    handle: Option<Cell>,
    active: ActiveProperties,
}

impl ElementInstance {
    pub(crate) fn new(id: ElementId, element_type: Arc<ElementType>, handle: Option<Cell>) -> Self {
        Self { id, element_type, handle, active: ActiveProperties::new() }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn element_type(&self) -> &Arc<ElementType> {
        &self.element_type
    }

    /// Display name, e.g. `Label #3`.
    pub fn label(&self) -> String {
        format!("{} {}", self.element_type.name(), self.id)
    }

    /// Live handle, absent for structural types such as `Row`.
    pub fn handle(&self) -> Option<&Cell> {
        self.handle.as_ref()
    }

    pub fn active(&self) -> &ActiveProperties {
        &self.active
    }

    pub(crate) fn active_mut(&mut self) -> &mut ActiveProperties {
        &mut self.active
    }

    /// Current value of a property: its active value, or the descriptor
    /// default when inactive.
    pub fn value(&self, name: &str) -> Option<PropValue> {
        match self.active.get(name) {
            Some(value) => Some(value.clone()),
            None => self.element_type.property(name).map(|p| p.default_value()),
        }
    }

    /// Properties of the type not yet active, in property-set order.
    pub fn inactive_properties(&self) -> Vec<String> {
        self.element_type
            .properties()
            .names()
            .filter(|name| !self.active.contains(name))
            .map(str::to_string)
            .collect()
    }

    /// Push a value onto the live handle, if there is one.
    pub(crate) fn apply(&mut self, property: &dyn Property, value: &PropValue) {
        if let Some(cell) = self.handle.as_mut() {
            property.apply(cell, value);
        }
    }

    /// Re-apply every active property to the live handle.
    pub(crate) fn apply_all(&mut self) {
        let Some(cell) = self.handle.as_mut() else {
            return;
        };
        for (name, value) in self.active.iter() {
            if let Some(property) = self.element_type.property(name) {
                property.apply(cell, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ElementRegistry;
    use crate::widget::Widget;

    #[test]
    fn test_active_properties_keep_order() {
        let mut active = ActiveProperties::new();
        active.set("text", PropValue::from("a"));
        active.set("wrap", PropValue::Bool(true));
        active.set("text", PropValue::from("b"));

        assert_eq!(active.names().collect::<Vec<_>>(), vec!["text", "wrap"]);
        assert_eq!(active.get("text"), Some(&PropValue::from("b")));
        assert_eq!(active.remove("text"), Some(PropValue::from("b")));
        assert_eq!(active.remove("text"), None);
        assert_eq!(active.len(), 1);
    }

    #[test]
    fn test_value_falls_back_to_default() {
        let registry = ElementRegistry::builtin();
        let ty = registry.lookup("Label").unwrap();
        let instance = ElementInstance::new(ElementId(1), ty, Some(Cell::new(Widget::new("Label"))));

        assert_eq!(instance.value("wrap"), Some(PropValue::Bool(false)));
        assert_eq!(instance.value("missing"), None);
        assert_eq!(instance.label(), "Label #1");
        assert_eq!(instance.inactive_properties().len(), 17);
    }

    #[test]
    fn test_apply_all_pushes_active_values() {
        let registry = ElementRegistry::builtin();
        let ty = registry.lookup("Label").unwrap();
        let mut instance =
            ElementInstance::new(ElementId(1), ty, Some(Cell::new(Widget::new("Label"))));
        instance.active_mut().set("text", PropValue::from("Hello"));
        instance.active_mut().set("width", PropValue::Number(90.0));
        instance.apply_all();

        let cell = instance.handle().unwrap();
        assert_eq!(cell.widget().get("text"), Some(&crate::value::AttrValue::Text("Hello".to_string())));
        assert_eq!(cell.layout("width"), Some(&crate::value::AttrValue::Number(90.0)));
    }
}
