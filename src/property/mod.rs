//! Property descriptors.
//!
//! A descriptor is everything the workspace needs to know about one editable
//! attribute of an element type:
//! - how to push a value onto a live cell (`apply`) and read it back (`read`)
//! - which control edits it (`render`) and which edits it accepts (`accept`)
//! - how to emit the equivalent construction call (`serialize`)
//! - its default value
//!
//! The workspace and registry only ever see `dyn Property`, so new kinds can
//! be added without touching either.

mod boolean;
mod enumerated;
mod group;
mod number;
mod scale;
mod set;
mod text;

use std::fmt;

use serde::Serialize;

use crate::value::PropValue;
use crate::widget::Cell;

pub use boolean::BoolProperty;
pub use enumerated::{EnumEntry, EnumProperty, Enumeration, ALIGN};
pub use group::NumberGroupProperty;
pub use number::NumberProperty;
pub use scale::{ScaleProperty, SCALE_MAX, SCALE_MIN, SCALE_STEP};
pub use set::PropertySet;
pub use text::TextProperty;

/// Where a property's value lands on the live handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// An attribute of the wrapped widget
    Widget,
    /// A sizing operation on the layout cell
    Cell,
}

/// Descriptor kind, for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    Text,
    Number,
    Bool,
    Scale,
    Enum,
    NumberGroup,
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PropertyKind::Text => "text",
            PropertyKind::Number => "number",
            PropertyKind::Bool => "bool",
            PropertyKind::Scale => "scale",
            PropertyKind::Enum => "enum",
            PropertyKind::NumberGroup => "number_group",
        };
        f.write_str(s)
    }
}

/// Raw interactive input coming back from a rendered control.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    /// New contents of a text or number field
    Text(String),
    /// Toggle button pressed
    Toggle,
    /// Slider moved
    Slide(f64),
    /// Item picked from a choice list
    Choose(String),
    /// New contents of one field of a grouped number control
    Slot { index: usize, text: String },
}

impl From<&str> for Edit {
    fn from(text: &str) -> Self {
        Edit::Text(text.to_string())
    }
}

impl From<String> for Edit {
    fn from(text: String) -> Self {
        Edit::Text(text)
    }
}

/// Editing control for one property, as produced by `Property::render`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "control", rename_all = "snake_case")]
pub enum Control {
    TextField { value: String },
    NumberField { value: String },
    Toggle { label: String },
    Slider { min: f64, max: f64, step: f64, value: f64 },
    Choice { label: String, options: Vec<String> },
    NumberFields { values: Vec<String> },
}

/// Descriptor for one editable property of an element type.
pub trait Property: fmt::Debug + Send + Sync {
    /// Property name, unique within an element type.
    fn name(&self) -> &str;

    fn kind(&self) -> PropertyKind;

    /// Value used when the property becomes active without user input.
    fn default_value(&self) -> PropValue;

    /// Push a value onto a live cell.
    ///
    /// Idempotent: applying the same value twice leaves the cell as applying
    /// it once would. Values of the wrong shape are ignored.
    fn apply(&self, cell: &mut Cell, value: &PropValue);

    /// Read the property back from a live cell, if it was ever applied.
    fn read(&self, cell: &Cell) -> Option<PropValue>;

    /// Build the editing control for the current value.
    fn render(&self, value: &PropValue) -> Control;

    /// Validate an interactive edit against the current value.
    ///
    /// Returns the new value to store, or `None` when the edit is rejected.
    fn accept(&self, current: &PropValue, edit: &Edit) -> Option<PropValue>;

    /// Whether a value supplied programmatically is acceptable.
    fn validate(&self, value: &PropValue) -> bool;

    /// Emit the construction call reproducing `value`.
    fn serialize(&self, value: &PropValue) -> String;
}

/// Setter name for a property: `"set"` followed by the capitalized name.
///
/// Chained calls can't assign fields, so widget attributes are exported
/// through their setters.
pub fn setter_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => format!("set{}{}", first.to_uppercase(), chars.as_str()),
        None => "set".to_string(),
    }
}

/// Escape backslashes and double quotes for a string literal.
pub fn escape_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
    out
}
