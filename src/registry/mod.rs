//! Element type registry.
//!
//! This module provides:
//! - `ElementType`, a named species of placeable element with its flat
//!   property set
//! - `ElementRegistry`, the ordered table of types built once at startup
//! - the shared `Registry` lookup trait
//!
//! The registry is read-only once built. Share it with `Arc` and hand it to
//! each `Workspace` explicitly.

mod builtin;
mod element;
mod traits;

use std::sync::Arc;

use thiserror::Error;

pub use builtin::base_properties;
pub use element::{
    AddHook, ElementType, ElementTypeBuilder, ExportStyle, InstanceSerializer, WidgetFactory,
};
pub use traits::Registry;

/// Error when looking up an element type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No type registered under this name
    #[error("Element type '{0}' not found")]
    NotFound(String),
}

/// Ordered table of element types.
#[derive(Debug, Clone, Default)]
pub struct ElementRegistry {
    types: Vec<Arc<ElementType>>,
}

impl ElementRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self { types: Vec::new() }
    }

    /// Registry holding the built-in `Row` and `Label` types.
    pub fn builtin() -> Self {
        let base = builtin::base_properties();
        let mut registry = Self::new();
        registry.register(builtin::row());
        registry.register(builtin::label(&base));
        registry
    }

    /// Register an element type.
    ///
    /// If a type with the same name already exists, it is replaced in place.
    pub fn register(&mut self, ty: ElementType) {
        let ty = Arc::new(ty);
        match self.types.iter().position(|t| t.name() == ty.name()) {
            Some(i) => self.types[i] = ty,
            None => self.types.push(ty),
        }
    }

    /// Look up a type by name.
    pub fn lookup(&self, name: &str) -> Result<Arc<ElementType>, RegistryError> {
        self.types
            .iter()
            .find(|t| t.name() == name)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    /// All registered type names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.types.iter().map(|t| t.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ElementType>> {
        self.types.iter()
    }
}

impl Registry<Arc<ElementType>> for ElementRegistry {
    fn contains(&self, name: &str) -> bool {
        self.types.iter().any(|t| t.name() == name)
    }

    fn get(&self, name: &str) -> Option<&Arc<ElementType>> {
        self.types.iter().find(|t| t.name() == name)
    }

    fn len(&self) -> usize {
        self.types.len()
    }

    fn clear(&mut self) {
        self.types.clear();
    }

    fn names(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.types.iter().map(|t| t.name()))
    }
}
