//! Ordered property sets and base/overlay composition.

use std::sync::Arc;

use super::Property;

/// Ordered collection of descriptors with unique names.
#[derive(Debug, Clone, Default)]
pub struct PropertySet {
    entries: Vec<Arc<dyn Property>>,
}

impl PropertySet {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Add a descriptor, replacing any existing one with the same name in
    /// place.
    pub fn insert(&mut self, property: impl Property + 'static) {
        self.insert_arc(Arc::new(property));
    }

    fn insert_arc(&mut self, property: Arc<dyn Property>) {
        match self.position(property.name()) {
            Some(i) => self.entries[i] = property,
            None => self.entries.push(property),
        }
    }

    /// Builder-style `insert`.
    pub fn with(mut self, property: impl Property + 'static) -> Self {
        self.insert(property);
        self
    }

    /// Merge `specific` over `base` into a flat set.
    ///
    /// Type-specific descriptors come first, followed by base descriptors
    /// whose names weren't overridden.
    pub fn overlay(base: &PropertySet, specific: PropertySet) -> PropertySet {
        let mut merged = specific;
        for property in &base.entries {
            if !merged.contains(property.name()) {
                merged.entries.push(Arc::clone(property));
            }
        }
        merged
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Property>> {
        self.entries.iter().find(|p| p.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Index of a property in set order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|p| p.name() == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|p| p.name())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Property>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
