//! Lookup interface shared by name-keyed registries.

/// Read access to items registered under unique names.
///
/// `ElementRegistry` implements this for element types; hosts that keep
/// their own catalogs (custom enumerations, widget kinds) can implement it
/// as well and be listed through the same code paths.
///
/// # Example
///
/// ```
/// use uiforge::registry::{ElementRegistry, Registry};
///
/// let registry = ElementRegistry::builtin();
///
/// assert!(Registry::contains(&registry, "Label"));
/// assert_eq!(Registry::len(&registry), 2);
/// assert_eq!(Registry::names(&registry).collect::<Vec<_>>(), vec!["Row", "Label"]);
/// ```
pub trait Registry<V> {
    /// Whether `name` is registered.
    fn contains(&self, name: &str) -> bool;

    /// Item registered under `name`, if any.
    fn get(&self, name: &str) -> Option<&V>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every registered item.
    fn clear(&mut self);

    /// Registered names in registration order.
    fn names(&self) -> Box<dyn Iterator<Item = &str> + '_>;
}
