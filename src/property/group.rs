//! Cell operation taking a fixed number of numeric arguments.

use crate::value::{format_number, format_numbers, parse_number, AttrValue, PropValue};
use crate::widget::Cell;

use super::{Control, Edit, Property, PropertyKind};

/// Grouped numbers passed together to one cell operation, e.g.
/// `pad(top, left, bottom, right)`.
///
/// Values compare element-wise, so a group equals its default only when
/// every slot does.
#[derive(Debug, Clone)]
pub struct NumberGroupProperty {
    name: String,
    defaults: Vec<f64>,
}

impl NumberGroupProperty {
    /// Group of `count` slots all defaulting to `default`.
    pub fn new(name: &str, count: usize, default: f64) -> Self {
        Self { name: name.to_string(), defaults: vec![default; count] }
    }

    pub fn len(&self) -> usize {
        self.defaults.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty()
    }
}

impl Property for NumberGroupProperty {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> PropertyKind {
        PropertyKind::NumberGroup
    }

    fn default_value(&self) -> PropValue {
        PropValue::Numbers(self.defaults.clone())
    }

    fn apply(&self, cell: &mut Cell, value: &PropValue) {
        if let Some(values) = value.as_numbers() {
            if values.len() == self.defaults.len() {
                cell.call(&self.name, AttrValue::Numbers(values.to_vec()));
            }
        }
    }

    fn read(&self, cell: &Cell) -> Option<PropValue> {
        match cell.layout(&self.name) {
            Some(AttrValue::Numbers(v)) => Some(PropValue::Numbers(v.clone())),
            _ => None,
        }
    }

    fn render(&self, value: &PropValue) -> Control {
        let values = value.as_numbers().unwrap_or(&self.defaults);
        Control::NumberFields { values: values.iter().map(|n| format_number(*n)).collect() }
    }

    fn accept(&self, current: &PropValue, edit: &Edit) -> Option<PropValue> {
        let Edit::Slot { index, text } = edit else {
            return None;
        };
        let mut values = current.as_numbers().unwrap_or(&self.defaults).to_vec();
        let slot = values.get_mut(*index)?;
        *slot = parse_number(text)?;
        Some(PropValue::Numbers(values))
    }

    fn validate(&self, value: &PropValue) -> bool {
        value
            .as_numbers()
            .is_some_and(|v| v.len() == self.defaults.len() && v.iter().all(|n| n.is_finite()))
    }

    fn serialize(&self, value: &PropValue) -> String {
        let values = value.as_numbers().unwrap_or(&self.defaults);
        format!("{}({})", self.name, format_numbers(values))
    }
}
