//! On/off widget attribute.

use crate::value::{AttrValue, PropValue};
use crate::widget::Cell;

use super::{setter_name, Control, Edit, Property, PropertyKind};

/// Boolean attribute edited with a toggle whose label shows the state.
#[derive(Debug, Clone)]
pub struct BoolProperty {
    name: String,
    setter: String,
    default: bool,
}

impl BoolProperty {
    pub fn new(name: &str, default: bool) -> Self {
        Self { name: name.to_string(), setter: setter_name(name), default }
    }
}

impl Property for BoolProperty {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> PropertyKind {
        PropertyKind::Bool
    }

    fn default_value(&self) -> PropValue {
        PropValue::Bool(self.default)
    }

    fn apply(&self, cell: &mut Cell, value: &PropValue) {
        if let Some(b) = value.as_bool() {
            cell.widget_mut().set(&self.name, AttrValue::Bool(b));
        }
    }

    fn read(&self, cell: &Cell) -> Option<PropValue> {
        match cell.widget().get(&self.name) {
            Some(AttrValue::Bool(b)) => Some(PropValue::Bool(*b)),
            _ => None,
        }
    }

    fn render(&self, value: &PropValue) -> Control {
        Control::Toggle { label: value.as_bool().unwrap_or(self.default).to_string() }
    }

    fn accept(&self, current: &PropValue, edit: &Edit) -> Option<PropValue> {
        match edit {
            Edit::Toggle => {
                let state = current.as_bool().unwrap_or(self.default);
                Some(PropValue::Bool(!state))
            }
            _ => None,
        }
    }

    fn validate(&self, value: &PropValue) -> bool {
        matches!(value, PropValue::Bool(_))
    }

    fn serialize(&self, value: &PropValue) -> String {
        format!("{}({})", self.setter, value.as_bool().unwrap_or(self.default))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::Widget;

    #[test]
    fn test_toggle_flips() {
        let prop = BoolProperty::new("wrap", false);
        let flipped = prop.accept(&PropValue::Bool(false), &Edit::Toggle);
        assert_eq!(flipped, Some(PropValue::Bool(true)));
        assert_eq!(prop.render(&PropValue::Bool(true)), Control::Toggle { label: "true".to_string() });
    }

    #[test]
    fn test_text_edit_rejected() {
        let prop = BoolProperty::new("wrap", false);
        assert_eq!(prop.accept(&PropValue::Bool(false), &Edit::from("true")), None);
    }

    #[test]
    fn test_apply_idempotent() {
        let prop = BoolProperty::new("wrap", false);
        let mut once = Cell::new(Widget::new("Label"));
        prop.apply(&mut once, &PropValue::Bool(true));
        let mut twice = once.clone();
        prop.apply(&mut twice, &PropValue::Bool(true));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_serialize() {
        let prop = BoolProperty::new("wrap", false);
        assert_eq!(prop.serialize(&PropValue::Bool(true)), "setWrap(true)");
    }
}
