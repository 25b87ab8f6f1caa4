//! Free text widget attribute.

use crate::value::{AttrValue, PropValue};
use crate::widget::Cell;

use super::{escape_str, setter_name, Control, Edit, Property, PropertyKind};

/// String attribute set directly on the widget.
///
/// Empty input is rejected; a label with no text is never what the user
/// meant while typing.
#[derive(Debug, Clone)]
pub struct TextProperty {
    name: String,
    setter: String,
    default: String,
}

impl TextProperty {
    pub fn new(name: &str, default: &str) -> Self {
        Self { name: name.to_string(), setter: setter_name(name), default: default.to_string() }
    }
}

impl Property for TextProperty {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> PropertyKind {
        PropertyKind::Text
    }

    fn default_value(&self) -> PropValue {
        PropValue::Text(self.default.clone())
    }

    fn apply(&self, cell: &mut Cell, value: &PropValue) {
        if let Some(text) = value.as_text() {
            cell.widget_mut().set(&self.name, AttrValue::Text(text.to_string()));
        }
    }

    fn read(&self, cell: &Cell) -> Option<PropValue> {
        match cell.widget().get(&self.name) {
            Some(AttrValue::Text(s)) => Some(PropValue::Text(s.clone())),
            _ => None,
        }
    }

    fn render(&self, value: &PropValue) -> Control {
        Control::TextField { value: value.as_text().unwrap_or_default().to_string() }
    }

    fn accept(&self, _current: &PropValue, edit: &Edit) -> Option<PropValue> {
        match edit {
            Edit::Text(text) if !text.is_empty() => Some(PropValue::Text(text.clone())),
            _ => None,
        }
    }

    fn validate(&self, value: &PropValue) -> bool {
        matches!(value, PropValue::Text(_))
    }

    fn serialize(&self, value: &PropValue) -> String {
        format!("{}(\"{}\")", self.setter, escape_str(value.as_text().unwrap_or_default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::Widget;

    fn label_cell() -> Cell {
        Cell::new(Widget::new("Label"))
    }

    #[test]
    fn test_apply_and_read() {
        let prop = TextProperty::new("text", "Label");
        let mut cell = label_cell();
        assert_eq!(prop.read(&cell), None);

        prop.apply(&mut cell, &prop.default_value());
        assert_eq!(prop.read(&cell), Some(PropValue::from("Label")));
    }

    #[test]
    fn test_apply_ignores_wrong_shape() {
        let prop = TextProperty::new("text", "Label");
        let mut cell = label_cell();
        prop.apply(&mut cell, &PropValue::Number(3.0));
        assert_eq!(prop.read(&cell), None);
    }

    #[test]
    fn test_accept_rejects_empty() {
        let prop = TextProperty::new("text", "Label");
        let current = PropValue::from("Label");
        assert_eq!(prop.accept(&current, &Edit::from("")), None);
        assert_eq!(prop.accept(&current, &Edit::Toggle), None);
        assert_eq!(prop.accept(&current, &Edit::from("Hi")), Some(PropValue::from("Hi")));
    }

    #[test]
    fn test_serialize_escapes() {
        let prop = TextProperty::new("text", "Label");
        let out = prop.serialize(&PropValue::from(r#"say "hi"\n"#));
        assert_eq!(out, r#"setText("say \"hi\"\\n")"#);
    }

    #[test]
    fn test_render() {
        let prop = TextProperty::new("text", "Label");
        assert_eq!(
            prop.render(&PropValue::from("Hey")),
            Control::TextField { value: "Hey".to_string() }
        );
    }
}
