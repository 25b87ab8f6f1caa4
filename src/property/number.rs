//! Cell sizing operation taking one number.

use crate::value::{format_number, parse_number, AttrValue, PropValue};
use crate::widget::Cell;

use super::{Control, Edit, Property, PropertyKind};

/// Number passed to the cell operation of the same name (`width(50)`).
#[derive(Debug, Clone)]
pub struct NumberProperty {
    name: String,
    default: f64,
}

impl NumberProperty {
    pub fn new(name: &str, default: f64) -> Self {
        Self { name: name.to_string(), default }
    }
}

impl Property for NumberProperty {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> PropertyKind {
        PropertyKind::Number
    }

    fn default_value(&self) -> PropValue {
        PropValue::Number(self.default)
    }

    fn apply(&self, cell: &mut Cell, value: &PropValue) {
        if let Some(n) = value.as_number() {
            cell.call(&self.name, AttrValue::Number(n));
        }
    }

    fn read(&self, cell: &Cell) -> Option<PropValue> {
        match cell.layout(&self.name) {
            Some(AttrValue::Number(n)) => Some(PropValue::Number(*n)),
            _ => None,
        }
    }

    fn render(&self, value: &PropValue) -> Control {
        Control::NumberField { value: value.as_number().map(format_number).unwrap_or_default() }
    }

    fn accept(&self, _current: &PropValue, edit: &Edit) -> Option<PropValue> {
        match edit {
            Edit::Text(text) => parse_number(text).map(PropValue::Number),
            _ => None,
        }
    }

    fn validate(&self, value: &PropValue) -> bool {
        value.as_number().is_some_and(f64::is_finite)
    }

    fn serialize(&self, value: &PropValue) -> String {
        format!("{}({})", self.name, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::Widget;

    #[test]
    fn test_apply_targets_cell() {
        let prop = NumberProperty::new("width", 50.0);
        let mut cell = Cell::new(Widget::new("Label"));
        prop.apply(&mut cell, &PropValue::Number(80.0));

        assert_eq!(cell.layout("width"), Some(&AttrValue::Number(80.0)));
        assert!(cell.widget().get("width").is_none());
        assert_eq!(prop.read(&cell), Some(PropValue::Number(80.0)));
    }

    #[test]
    fn test_accept_rejects_non_numeric() {
        let prop = NumberProperty::new("width", 50.0);
        let current = PropValue::Number(50.0);
        assert_eq!(prop.accept(&current, &Edit::from("abc")), None);
        assert_eq!(prop.accept(&current, &Edit::from("")), None);
        assert_eq!(prop.accept(&current, &Edit::from("72.5")), Some(PropValue::Number(72.5)));
    }

    #[test]
    fn test_serialize_bare_name() {
        let prop = NumberProperty::new("padLeft", 4.0);
        assert_eq!(prop.serialize(&PropValue::Number(12.0)), "padLeft(12)");
        assert_eq!(prop.serialize(&PropValue::Number(0.5)), "padLeft(0.5)");
    }

    #[test]
    fn test_validate() {
        let prop = NumberProperty::new("width", 50.0);
        assert!(prop.validate(&PropValue::Number(1.0)));
        assert!(!prop.validate(&PropValue::Number(f64::NAN)));
        assert!(!prop.validate(&PropValue::from("1")));
    }
}
