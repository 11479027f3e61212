use tracing::debug;

use super::{FieldDescriptor, FieldId, FieldKind, FieldPatch, FormError};

/// Ordered fields of the form plus the current selection
///
/// Order of `fields` is the display and submission order. The selection is
/// stored as an id and resolved on every access, so edits and moves never
/// leave it pointing at a stale descriptor.
#[derive(Debug, Clone, Default)]
pub struct FieldCollection {
    fields: Vec<FieldDescriptor>,
    selected: Option<FieldId>,
    next_id: u64,
}

impl FieldCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new, unnamed field of `kind` at the tail
    pub fn append(&mut self, kind: FieldKind) -> &FieldDescriptor {
        self.next_id += 1;
        let id = FieldId(self.next_id);
        debug!(%id, %kind, "field appended");

        let index = self.fields.len();
        self.fields.push(FieldDescriptor::new(id, kind));
        &self.fields[index]
    }

    /// Move the field at `from` so that it ends up at `to`
    ///
    /// Remove-then-insert: the fields between the two positions shift by one
    /// towards `from`.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), FormError> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from == to {
            return Ok(());
        }

        let field = self.fields.remove(from);
        self.fields.insert(to, field);
        debug!(from, to, "field reordered");
        Ok(())
    }

    /// Apply a partial property update to the field with `id`
    pub fn update(&mut self, id: FieldId, patch: FieldPatch) -> Result<&FieldDescriptor, FormError> {
        let index = self.position(id).ok_or(FormError::NotFound(id))?;
        self.fields[index].apply(patch)?;
        Ok(&self.fields[index])
    }

    /// Remove one field, dropping the selection if it pointed at it
    pub fn remove(&mut self, id: FieldId) -> Result<FieldDescriptor, FormError> {
        let index = self.position(id).ok_or(FormError::NotFound(id))?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        debug!(%id, index, "field removed");
        Ok(self.fields.remove(index))
    }

    /// Drop every field and the selection
    pub fn clear(&mut self) {
        self.fields.clear();
        self.selected = None;
    }

    pub fn select(&mut self, id: FieldId) -> Result<(), FormError> {
        if self.position(id).is_none() {
            return Err(FormError::NotFound(id));
        }
        self.selected = Some(id);
        Ok(())
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<FieldId> {
        self.selected
    }

    pub fn selected(&self) -> Option<&FieldDescriptor> {
        self.selected.and_then(|id| self.get(id))
    }

    /// Index of the selected field in display order
    pub fn selected_index(&self) -> Option<usize> {
        self.selected.and_then(|id| self.position(id))
    }

    pub fn get(&self, id: FieldId) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.id() == id)
    }

    pub fn get_at(&self, index: usize) -> Option<&FieldDescriptor> {
        self.fields.get(index)
    }

    pub fn position(&self, id: FieldId) -> Option<usize> {
        self.fields.iter().position(|field| field.id() == id)
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldDescriptor> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn check_index(&self, index: usize) -> Result<(), FormError> {
        if index < self.fields.len() {
            Ok(())
        } else {
            Err(FormError::OutOfRange {
                index,
                len: self.fields.len(),
            })
        }
    }
}

impl<'a> IntoIterator for &'a FieldCollection {
    type Item = &'a FieldDescriptor;
    type IntoIter = std::slice::Iter<'a, FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
