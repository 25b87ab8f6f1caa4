//! Built-in element types.
//!
//! Every visual type starts from the shared layout properties in
//! `base_properties` and overlays its own.

use crate::property::{
    BoolProperty, EnumProperty, NumberGroupProperty, NumberProperty, PropertySet, ScaleProperty,
    TextProperty, ALIGN,
};
use crate::widget::{ElementId, Preview, SlotKind, Widget};

use super::element::{ElementType, ExportStyle};

/// Default cell size.
const DEFAULT_SIZE: f64 = 50.0;

/// Default margin and padding on every side.
const DEFAULT_SPACING: f64 = 4.0;

/// Cell layout properties shared by every visual element type.
pub fn base_properties() -> PropertySet {
    PropertySet::new()
        .with(NumberProperty::new("width", DEFAULT_SIZE))
        .with(NumberProperty::new("height", DEFAULT_SIZE))
        .with(NumberProperty::new("marginLeft", DEFAULT_SPACING))
        .with(NumberProperty::new("marginRight", DEFAULT_SPACING))
        .with(NumberProperty::new("marginTop", DEFAULT_SPACING))
        .with(NumberProperty::new("marginBottom", DEFAULT_SPACING))
        .with(NumberProperty::new("padLeft", DEFAULT_SPACING))
        .with(NumberProperty::new("padRight", DEFAULT_SPACING))
        .with(NumberProperty::new("padTop", DEFAULT_SPACING))
        .with(NumberProperty::new("padBottom", DEFAULT_SPACING))
        // top, left, bottom, right
        .with(NumberGroupProperty::new("pad", 4, DEFAULT_SPACING))
        .with(EnumProperty::cell("align", &ALIGN, "center"))
}

/// Structural marker starting a new row. Has no widget and no properties.
pub fn row() -> ElementType {
    ElementType::builder("Row").on_add(add_row_break).export(ExportStyle::Fixed("row")).build()
}

fn add_row_break(id: ElementId, preview: &mut Preview) {
    preview.attach(id, SlotKind::RowBreak);
}

/// Text label.
pub fn label(base: &PropertySet) -> ElementType {
    let specific = PropertySet::new()
        .with(TextProperty::new("text", "Label"))
        .with(ScaleProperty::new("fontScaleX", 1.0))
        .with(ScaleProperty::new("fontScaleY", 1.0))
        .with(EnumProperty::widget("alignment", &ALIGN, "left"))
        .with(BoolProperty::new("wrap", false));

    ElementType::builder("Label")
        .widget(|| Widget::new("Label"))
        .properties(PropertySet::overlay(base, specific))
        .default_active(&["text"])
        .primary("text")
        .build()
}
