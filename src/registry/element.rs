//! Element type definitions.

use std::sync::Arc;

use tracing::warn;

use crate::export::ExportOptions;
use crate::property::{Property, PropertySet};
use crate::widget::{ElementId, Preview, Widget};
use crate::workspace::ElementInstance;

/// Constructs a fresh live widget for a new instance.
pub type WidgetFactory = fn() -> Widget;

/// Runs once when an instance is placed into the preview.
pub type AddHook = fn(ElementId, &mut Preview);

/// Replaces the default per-instance serialization.
pub type InstanceSerializer = fn(&ElementInstance, &ExportOptions) -> String;

/// How an instance of a type is turned into code.
#[derive(Debug, Clone, Copy)]
pub enum ExportStyle {
    /// `receiver.add(...)` followed by one chained call per non-default
    /// property
    Chained,
    /// A single call on the receiver with no instance data, e.g. `row`
    Fixed(&'static str),
    Custom(InstanceSerializer),
}

/// A species of placeable element.
#[derive(Debug, Clone)]
pub struct ElementType {
    name: String,
    factory: Option<WidgetFactory>,
    properties: PropertySet,
    default_active: Vec<String>,
    primary: Option<String>,
    on_add: Option<AddHook>,
    export: ExportStyle,
}

impl ElementType {
    pub fn builder(name: &str) -> ElementTypeBuilder {
        ElementTypeBuilder {
            ty: ElementType {
                name: name.to_string(),
                factory: None,
                properties: PropertySet::new(),
                default_active: Vec::new(),
                primary: None,
                on_add: None,
                export: ExportStyle::Chained,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Build a live widget, if this type has one.
    pub fn create(&self) -> Option<Widget> {
        self.factory.map(|factory| factory())
    }

    pub fn has_widget(&self) -> bool {
        self.factory.is_some()
    }

    pub fn properties(&self) -> &PropertySet {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&Arc<dyn Property>> {
        self.properties.get(name)
    }

    /// Properties activated on every new instance, in order.
    pub fn default_active(&self) -> &[String] {
        &self.default_active
    }

    /// Property embedded in the creating statement, e.g. a label's text.
    pub fn primary(&self) -> Option<&str> {
        self.primary.as_deref()
    }

    pub fn on_add(&self) -> Option<AddHook> {
        self.on_add
    }

    pub fn export_style(&self) -> ExportStyle {
        self.export
    }
}

/// Builder for `ElementType`.
#[derive(Debug)]
pub struct ElementTypeBuilder {
    ty: ElementType,
}

impl ElementTypeBuilder {
    pub fn widget(mut self, factory: WidgetFactory) -> Self {
        self.ty.factory = Some(factory);
        self
    }

    /// Flat property set, usually `PropertySet::overlay(base, specific)`.
    pub fn properties(mut self, properties: PropertySet) -> Self {
        self.ty.properties = properties;
        self
    }

    pub fn default_active(mut self, names: &[&str]) -> Self {
        self.ty.default_active = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn primary(mut self, name: &str) -> Self {
        self.ty.primary = Some(name.to_string());
        self
    }

    pub fn on_add(mut self, hook: AddHook) -> Self {
        self.ty.on_add = Some(hook);
        self
    }

    pub fn export(mut self, style: ExportStyle) -> Self {
        self.ty.export = style;
        self
    }

    /// Finish the type.
    ///
    /// Default-active or primary names missing from the property set are
    /// dropped with a warning.
    pub fn build(mut self) -> ElementType {
        let ty = &mut self.ty;
        let properties = &ty.properties;
        let type_name = &ty.name;
        ty.default_active.retain(|name| {
            let known = properties.contains(name);
            if !known {
                warn!(element = %type_name, property = %name, "dropping unknown default-active property");
            }
            known
        });
        let unknown_primary =
            ty.primary.as_ref().filter(|name| !ty.properties.contains(name)).cloned();
        if let Some(primary) = unknown_primary {
            warn!(element = %ty.name, property = %primary, "dropping unknown primary property");
            ty.primary = None;
        }
        self.ty
    }
}
