//! Live widget model.
//!
//! Stands in for the engine's widget toolkit: a `Widget` carries named
//! attributes, a `Cell` is the layout slot wrapping it and records sizing
//! calls, and the `Preview` is the container elements are placed into.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::value::AttrValue;

/// Identifier of a placed element, unique within one workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A live widget with named attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    kind: String,
    attrs: BTreeMap<String, AttrValue>,
}

impl Widget {
    /// Create a widget of the given kind with no attributes set.
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into(), attrs: BTreeMap::new() }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Set an attribute, replacing any previous value.
    pub fn set(&mut self, name: &str, value: AttrValue) {
        self.attrs.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }

    pub fn attrs(&self) -> impl Iterator<Item = (&String, &AttrValue)> {
        self.attrs.iter()
    }
}

/// Layout cell wrapping a widget. This is an element's live handle.
///
/// Sizing operations (`width`, `padLeft`, `align`, ...) are recorded on the
/// cell, widget attributes go to the wrapped widget.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    widget: Widget,
    layout: BTreeMap<String, AttrValue>,
}

impl Cell {
    pub fn new(widget: Widget) -> Self {
        Self { widget, layout: BTreeMap::new() }
    }

    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut Widget {
        &mut self.widget
    }

    /// Invoke a named sizing operation on the cell.
    pub fn call(&mut self, op: &str, value: AttrValue) {
        self.layout.insert(op.to_string(), value);
    }

    /// Last value passed to a sizing operation.
    pub fn layout(&self, op: &str) -> Option<&AttrValue> {
        self.layout.get(op)
    }
}

/// What a preview slot holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    /// The element's cell
    Widget,
    /// A break starting a new preview row
    RowBreak,
}

/// One entry of the preview container, owned by a placed element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub owner: ElementId,
    pub kind: SlotKind,
}

/// The live preview area elements are placed into.
#[derive(Debug, Clone, Default)]
pub struct Preview {
    slots: Vec<Slot>,
}

impl Preview {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Append a slot owned by `owner`.
    pub fn attach(&mut self, owner: ElementId, kind: SlotKind) {
        self.slots.push(Slot { owner, kind });
    }

    /// Detach every slot owned by `owner`, returning how many were removed.
    pub fn detach(&mut self, owner: ElementId) -> usize {
        let before = self.slots.len();
        self.slots.retain(|slot| slot.owner != owner);
        before - self.slots.len()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn contains(&self, owner: ElementId) -> bool {
        self.slots.iter().any(|slot| slot.owner == owner)
    }

    /// Widgets grouped into rows, split at row breaks.
    ///
    /// Always returns at least one (possibly empty) row.
    pub fn rows(&self) -> Vec<Vec<ElementId>> {
        let mut rows = vec![Vec::new()];
        for slot in &self.slots {
            match slot.kind {
                SlotKind::Widget => {
                    if let Some(row) = rows.last_mut() {
                        row.push(slot.owner);
                    }
                }
                SlotKind::RowBreak => rows.push(Vec::new()),
            }
        }
        rows
    }
}
