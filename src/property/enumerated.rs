//! Properties drawn from a closed enumeration.

use crate::value::{AttrValue, PropValue};
use crate::widget::Cell;

use super::{setter_name, Control, Edit, Property, PropertyKind, Target};

/// One declared entry of a backing enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumEntry {
    /// A constant member with its underlying value
    Constant(i32),
    /// A method exposed alongside the constants, never a selectable member
    Method,
}

/// Statically declared engine enumeration.
#[derive(Debug)]
pub struct Enumeration {
    pub name: &'static str,
    pub entries: &'static [(&'static str, EnumEntry)],
}

impl Enumeration {
    /// Constant members in declaration order.
    pub fn members(&self) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        self.entries.iter().filter_map(|(label, entry)| match entry {
            EnumEntry::Constant(value) => Some((*label, *value)),
            EnumEntry::Method => None,
        })
    }

    pub fn value_of(&self, label: &str) -> Option<i32> {
        self.members().find(|(l, _)| *l == label).map(|(_, v)| v)
    }

    pub fn label_of(&self, value: i32) -> Option<&'static str> {
        self.members().find(|(_, v)| *v == value).map(|(l, _)| l)
    }
}

/// Engine alignment bit flags.
pub static ALIGN: Enumeration = Enumeration {
    name: "Align",
    entries: &[
        ("center", EnumEntry::Constant(1)),
        ("top", EnumEntry::Constant(1 << 1)),
        ("bottom", EnumEntry::Constant(1 << 2)),
        ("left", EnumEntry::Constant(1 << 3)),
        ("right", EnumEntry::Constant(1 << 4)),
        ("topLeft", EnumEntry::Constant((1 << 1) | (1 << 3))),
        ("topRight", EnumEntry::Constant((1 << 1) | (1 << 4))),
        ("bottomLeft", EnumEntry::Constant((1 << 2) | (1 << 3))),
        ("bottomRight", EnumEntry::Constant((1 << 2) | (1 << 4))),
        ("isTop", EnumEntry::Method),
        ("isBottom", EnumEntry::Method),
        ("isLeft", EnumEntry::Method),
        ("isRight", EnumEntry::Method),
        ("isCenterHorizontal", EnumEntry::Method),
        ("isCenterVertical", EnumEntry::Method),
        ("toString", EnumEntry::Method),
    ],
};

/// Enumeration member applied either as a widget attribute or through the
/// cell operation of the same name.
#[derive(Debug, Clone)]
pub struct EnumProperty {
    name: String,
    setter: String,
    target: Target,
    enumeration: &'static Enumeration,
    labels: Vec<&'static str>,
    default: String,
}

impl EnumProperty {
    /// Enum assigned to a widget attribute.
    pub fn widget(name: &str, enumeration: &'static Enumeration, default: &str) -> Self {
        Self::with_target(name, Target::Widget, enumeration, default)
    }

    /// Enum passed to a cell operation.
    pub fn cell(name: &str, enumeration: &'static Enumeration, default: &str) -> Self {
        Self::with_target(name, Target::Cell, enumeration, default)
    }

    fn with_target(
        name: &str,
        target: Target,
        enumeration: &'static Enumeration,
        default: &str,
    ) -> Self {
        let labels: Vec<&'static str> = enumeration.members().map(|(label, _)| label).collect();
        debug_assert!(labels.iter().any(|l| *l == default), "default '{}' is not a member", default);
        Self {
            name: name.to_string(),
            setter: setter_name(name),
            target,
            enumeration,
            labels,
            default: default.to_string(),
        }
    }

    /// Selectable member labels, computed once at construction.
    pub fn labels(&self) -> &[&'static str] {
        &self.labels
    }

    pub fn enumeration(&self) -> &'static Enumeration {
        self.enumeration
    }

    pub fn target(&self) -> Target {
        self.target
    }

    fn is_member(&self, label: &str) -> bool {
        self.labels.iter().any(|l| *l == label)
    }
}

impl Property for EnumProperty {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> PropertyKind {
        PropertyKind::Enum
    }

    fn default_value(&self) -> PropValue {
        PropValue::Text(self.default.clone())
    }

    fn apply(&self, cell: &mut Cell, value: &PropValue) {
        let Some(ordinal) = value.as_text().and_then(|label| self.enumeration.value_of(label))
        else {
            return;
        };
        match self.target {
            Target::Widget => cell.widget_mut().set(&self.name, AttrValue::Ordinal(ordinal)),
            Target::Cell => cell.call(&self.name, AttrValue::Ordinal(ordinal)),
        }
    }

    fn read(&self, cell: &Cell) -> Option<PropValue> {
        let attr = match self.target {
            Target::Widget => cell.widget().get(&self.name),
            Target::Cell => cell.layout(&self.name),
        };
        match attr {
            Some(AttrValue::Ordinal(v)) => {
                self.enumeration.label_of(*v).map(|label| PropValue::Text(label.to_string()))
            }
            _ => None,
        }
    }

    fn render(&self, value: &PropValue) -> Control {
        Control::Choice {
            label: value.as_text().unwrap_or(&self.default).to_string(),
            options: self.labels.iter().map(|l| l.to_string()).collect(),
        }
    }

    fn accept(&self, _current: &PropValue, edit: &Edit) -> Option<PropValue> {
        match edit {
            Edit::Choose(label) if self.is_member(label) => {
                Some(PropValue::Text(label.clone()))
            }
            _ => None,
        }
    }

    fn validate(&self, value: &PropValue) -> bool {
        value.as_text().is_some_and(|label| self.is_member(label))
    }

    fn serialize(&self, value: &PropValue) -> String {
        let label = value.as_text().unwrap_or(&self.default);
        format!("{}({}.{})", self.setter, self.enumeration.name, label)
    }
}
