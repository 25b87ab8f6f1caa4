//! Non-zero scale factor edited with a slider.

use crate::value::{format_number, AttrValue, PropValue};
use crate::widget::Cell;

use super::{setter_name, Control, Edit, Property, PropertyKind};

pub const SCALE_MIN: f64 = 0.25;
pub const SCALE_MAX: f64 = 3.0;
pub const SCALE_STEP: f64 = 0.25;

/// Numeric widget attribute constrained to `[SCALE_MIN, SCALE_MAX]` in
/// `SCALE_STEP` increments.
#[derive(Debug, Clone)]
pub struct ScaleProperty {
    name: String,
    setter: String,
    default: f64,
}

impl ScaleProperty {
    pub fn new(name: &str, default: f64) -> Self {
        Self { name: name.to_string(), setter: setter_name(name), default }
    }

    /// Clamp into range and round to the nearest step.
    fn snap(value: f64) -> f64 {
        let clamped = value.clamp(SCALE_MIN, SCALE_MAX);
        (clamped / SCALE_STEP).round() * SCALE_STEP
    }
}

impl Property for ScaleProperty {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> PropertyKind {
        PropertyKind::Scale
    }

    fn default_value(&self) -> PropValue {
        PropValue::Number(self.default)
    }

    fn apply(&self, cell: &mut Cell, value: &PropValue) {
        if let Some(n) = value.as_number() {
            cell.widget_mut().set(&self.name, AttrValue::Number(n));
        }
    }

    fn read(&self, cell: &Cell) -> Option<PropValue> {
        match cell.widget().get(&self.name) {
            Some(AttrValue::Number(n)) => Some(PropValue::Number(*n)),
            _ => None,
        }
    }

    fn render(&self, value: &PropValue) -> Control {
        Control::Slider {
            min: SCALE_MIN,
            max: SCALE_MAX,
            step: SCALE_STEP,
            value: value.as_number().unwrap_or(self.default),
        }
    }

    fn accept(&self, _current: &PropValue, edit: &Edit) -> Option<PropValue> {
        match edit {
            Edit::Slide(n) if n.is_finite() => Some(PropValue::Number(Self::snap(*n))),
            _ => None,
        }
    }

    fn validate(&self, value: &PropValue) -> bool {
        match value.as_number() {
            Some(n) => n.is_finite() && n >= SCALE_MIN && n <= SCALE_MAX && Self::snap(n) == n,
            None => false,
        }
    }

    fn serialize(&self, value: &PropValue) -> String {
        format!("{}({})", self.setter, format_number(value.as_number().unwrap_or(self.default)))
    }
}
