//! Workspace driver.
//!
//! The workspace is the document being edited: placed element instances in
//! order, the current selection, the live preview they are attached to and
//! the property form of the selected element.
//!
//! Structural misuse (unknown types, elements or properties) fails fast with
//! a `WorkspaceError`. Interactive input that fails validation is never an
//! error: `edit_property` reports `EditOutcome::Rejected` and leaves state
//! alone.

mod form;
mod instance;
mod select;

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::property::{Control, Edit};
use crate::registry::{ElementRegistry, RegistryError};
use crate::value::PropValue;
use crate::widget::{Cell, ElementId, Preview, SlotKind};

pub use form::{Binding, Form, FormAction, FormRow, TextContainer, WidgetContainer};
pub use instance::{ActiveProperties, ElementInstance};
pub use select::{ScriptedSelection, SelectionList, StdinSelection};

/// Workspace misuse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkspaceError {
    #[error("Unknown element type '{0}'")]
    UnknownType(String),
    #[error("Element {0} is not in the workspace")]
    NotInWorkspace(ElementId),
    #[error("Element type '{element}' has no property '{property}'")]
    UnknownProperty { element: String, property: String },
    #[error("Property '{0}' is already active")]
    AlreadyActive(String),
    #[error("Property '{0}' is not active")]
    NotActive(String),
    #[error("Invalid value for property '{property}': {value}")]
    InvalidValue { property: String, value: String },
}

impl From<RegistryError> for WorkspaceError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::NotFound(name) => WorkspaceError::UnknownType(name),
        }
    }
}

/// Result of routing interactive input to a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Value stored and applied
    Applied,
    /// Input failed validation, nothing changed
    Rejected,
}

/// The document being edited.
#[derive(Debug)]
pub struct Workspace {
    registry: Arc<ElementRegistry>,
    elements: Vec<ElementInstance>,
    selected: Option<ElementId>,
    preview: Preview,
    form: Option<Form>,
    form_revision: u64,
    next_id: u64,
}

impl Workspace {
    pub fn new(registry: Arc<ElementRegistry>) -> Self {
        Self {
            registry,
            elements: Vec::new(),
            selected: None,
            preview: Preview::new(),
            form: None,
            form_revision: 0,
            next_id: 1,
        }
    }

    pub fn registry(&self) -> &Arc<ElementRegistry> {
        &self.registry
    }

    /// Placed elements in document order.
    pub fn elements(&self) -> &[ElementInstance] {
        &self.elements
    }

    pub fn element(&self, id: ElementId) -> Option<&ElementInstance> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    /// Form of the selected element, `None` when nothing is selected.
    pub fn form(&self) -> Option<&Form> {
        self.form.as_ref()
    }

    /// Number of form rebuilds so far.
    pub fn form_revision(&self) -> u64 {
        self.form_revision
    }

    /// Place a new element with its default-active properties.
    pub fn add_element(&mut self, type_name: &str) -> Result<ElementId, WorkspaceError> {
        self.add_element_with(type_name, Vec::<(String, PropValue)>::new())
    }

    /// Place a new element, overriding or activating properties from
    /// `initial`.
    ///
    /// Everything is validated before the workspace changes. Overrides of
    /// default-active properties keep their position; newly activated ones
    /// follow in the order given.
    pub fn add_element_with<I, S>(
        &mut self,
        type_name: &str,
        initial: I,
    ) -> Result<ElementId, WorkspaceError>
    where
        I: IntoIterator<Item = (S, PropValue)>,
        S: Into<String>,
    {
        let ty = self.registry.lookup(type_name)?;

        let mut overrides: Vec<(String, PropValue)> = Vec::new();
        for (name, value) in initial {
            let name = name.into();
            let Some(property) = ty.property(&name) else {
                return Err(WorkspaceError::UnknownProperty {
                    element: ty.name().to_string(),
                    property: name,
                });
            };
            if !property.validate(&value) {
                return Err(WorkspaceError::InvalidValue {
                    property: name,
                    value: value.to_string(),
                });
            }
            overrides.push((name, value));
        }

        let id = ElementId(self.next_id);
        self.next_id += 1;

        let handle = ty.create().map(Cell::new);
        if handle.is_some() {
            self.preview.attach(id, SlotKind::Widget);
        }
        let mut instance = ElementInstance::new(id, Arc::clone(&ty), handle);

        for name in ty.default_active() {
            if let Some(property) = ty.property(name) {
                instance.active_mut().set(name, property.default_value());
            }
        }
        for (name, value) in overrides {
            instance.active_mut().set(&name, value);
        }

        if let Some(hook) = ty.on_add() {
            hook(id, &mut self.preview);
        }
        instance.apply_all();

        debug!(element = %instance.label(), active = instance.active().len(), "added element");
        self.elements.push(instance);
        self.selected = Some(id);
        self.rebuild_form();
        Ok(id)
    }

    /// Remove an element and detach it from the preview.
    pub fn remove_element(&mut self, id: ElementId) -> Result<(), WorkspaceError> {
        let index = self.index_of(id)?;
        let detached = self.preview.detach(id);
        let instance = self.elements.remove(index);
        debug!(element = %instance.label(), detached, "removed element");

        if self.selected == Some(id) {
            self.selected = None;
            self.rebuild_form();
        }
        Ok(())
    }

    /// Change the selection and rebuild the form.
    pub fn select_element(&mut self, id: Option<ElementId>) -> Result<(), WorkspaceError> {
        if let Some(id) = id {
            self.index_of(id)?;
        }
        self.selected = id;
        self.rebuild_form();
        Ok(())
    }

    /// Activate an optional property with its default value.
    pub fn add_property(&mut self, id: ElementId, name: &str) -> Result<(), WorkspaceError> {
        let index = self.index_of(id)?;
        let instance = &mut self.elements[index];
        if instance.active().contains(name) {
            return Err(WorkspaceError::AlreadyActive(name.to_string()));
        }
        let ty = Arc::clone(instance.element_type());
        let property = ty.property(name).ok_or_else(|| WorkspaceError::UnknownProperty {
            element: ty.name().to_string(),
            property: name.to_string(),
        })?;

        let value = property.default_value();
        instance.apply(property.as_ref(), &value);
        instance.active_mut().set(name, value);
        debug!(element = %instance.label(), property = name, "activated property");
        self.rebuild_form();
        Ok(())
    }

    /// Deactivate a property, resetting the live value to its default.
    pub fn remove_property(&mut self, id: ElementId, name: &str) -> Result<(), WorkspaceError> {
        let index = self.index_of(id)?;
        let instance = &mut self.elements[index];
        if !instance.active().contains(name) {
            return Err(WorkspaceError::NotActive(name.to_string()));
        }
        let ty = Arc::clone(instance.element_type());
        if let Some(property) = ty.property(name) {
            instance.apply(property.as_ref(), &property.default_value());
        }
        instance.active_mut().remove(name);
        debug!(element = %instance.label(), property = name, "deactivated property");
        self.rebuild_form();
        Ok(())
    }

    /// Route interactive input to an active property.
    ///
    /// Input the descriptor rejects leaves the stored and live values
    /// untouched and returns `EditOutcome::Rejected`.
    pub fn edit_property(
        &mut self,
        id: ElementId,
        name: &str,
        edit: impl Into<Edit>,
    ) -> Result<EditOutcome, WorkspaceError> {
        let edit = edit.into();
        let index = self.index_of(id)?;
        let instance = &mut self.elements[index];
        let ty = Arc::clone(instance.element_type());
        let property = ty.property(name).ok_or_else(|| WorkspaceError::UnknownProperty {
            element: ty.name().to_string(),
            property: name.to_string(),
        })?;
        let Some(current) = instance.active().get(name).cloned() else {
            return Err(WorkspaceError::NotActive(name.to_string()));
        };

        let Some(value) = property.accept(&current, &edit) else {
            debug!(element = %instance.label(), property = name, ?edit, "rejected input");
            return Ok(EditOutcome::Rejected);
        };

        instance.apply(property.as_ref(), &value);
        let control = property.render(&value);
        instance.active_mut().set(name, value);

        if self.selected == Some(id) {
            if let Some(form) = self.form.as_mut() {
                form.update_row(name, control);
            }
        }
        Ok(EditOutcome::Applied)
    }

    /// Offer the registered element types and place the chosen one.
    pub fn choose_element(
        &mut self,
        ui: &mut dyn SelectionList,
    ) -> Result<Option<ElementId>, WorkspaceError> {
        let names: Vec<String> = self.registry.names().into_iter().map(str::to_string).collect();
        match ui.select("Elements", &names) {
            Some(name) => self.add_element(&name).map(Some),
            None => Ok(None),
        }
    }

    /// Offer the inactive properties of an element and activate the chosen
    /// one.
    pub fn choose_property(
        &mut self,
        id: ElementId,
        ui: &mut dyn SelectionList,
    ) -> Result<Option<String>, WorkspaceError> {
        let index = self.index_of(id)?;
        let instance = &self.elements[index];
        let title = format!("Property for {}", instance.label());
        let available = instance.inactive_properties();
        match ui.select(&title, &available) {
            Some(name) => {
                self.add_property(id, &name)?;
                Ok(Some(name))
            }
            None => Ok(None),
        }
    }

    /// Open the member list of an active choice property and apply the
    /// chosen member.
    ///
    /// Returns `None` when the list is closed without a choice.
    pub fn choose_member(
        &mut self,
        id: ElementId,
        name: &str,
        ui: &mut dyn SelectionList,
    ) -> Result<Option<EditOutcome>, WorkspaceError> {
        let index = self.index_of(id)?;
        let instance = &self.elements[index];
        let ty = instance.element_type();
        let property = ty.property(name).ok_or_else(|| WorkspaceError::UnknownProperty {
            element: ty.name().to_string(),
            property: name.to_string(),
        })?;
        let current =
            instance.active().get(name).ok_or_else(|| WorkspaceError::NotActive(name.to_string()))?;

        let Control::Choice { options, .. } = property.render(current) else {
            return Ok(Some(EditOutcome::Rejected));
        };
        match ui.select(&format!("{} enum", name), &options) {
            Some(label) => self.edit_property(id, name, Edit::Choose(label)).map(Some),
            None => Ok(None),
        }
    }

    fn index_of(&self, id: ElementId) -> Result<usize, WorkspaceError> {
        self.elements
            .iter()
            .position(|e| e.id() == id)
            .ok_or(WorkspaceError::NotInWorkspace(id))
    }

    fn rebuild_form(&mut self) {
        self.form = self.selected.and_then(|id| self.element(id)).map(Form::build);
        self.form_revision += 1;
    }
}
