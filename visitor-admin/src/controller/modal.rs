//! Create/edit modal state

use super::Entity;

/// Form modal: visibility, edit target and current field values
#[derive(Debug, Clone)]
pub struct FormModal<E, I> {
    open: bool,
    editing: Option<E>,
    fields: I,
}

impl<E, I: Default> Default for FormModal<E, I> {
    fn default() -> Self {
        Self {
            open: false,
            editing: None,
            fields: I::default(),
        }
    }
}

impl<E, I> FormModal<E, I>
where
    E: Entity,
    I: Default + for<'a> From<&'a E>,
{
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Entity being edited; `None` in create mode
    pub fn editing(&self) -> Option<&E> {
        self.editing.as_ref()
    }

    pub fn editing_id(&self) -> Option<E::Id> {
        self.editing.as_ref().map(|e| e.id())
    }

    pub fn fields(&self) -> &I {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut I {
        &mut self.fields
    }

    /// Open empty, in create mode
    pub fn open_create(&mut self) {
        self.open = true;
        self.editing = None;
        self.fields = I::default();
    }

    /// Open prefilled from `entity`
    pub fn open_edit(&mut self, entity: E) {
        self.fields = I::from(&entity);
        self.editing = Some(entity);
        self.open = true;
    }

    /// Close, clear the edit target and reset the fields
    pub fn close(&mut self) {
        self.open = false;
        self.editing = None;
        self.fields = I::default();
    }
}
