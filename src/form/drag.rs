//! Drag gestures over the canvas
//!
//! A `DragSession` lives from mouse-down to mouse-up. In live mode every hover
//! over a new row moves the dragged field right away and the session follows
//! it to its new index; in on-drop mode the move is applied once at release.

use serde::{Deserialize, Serialize};

use super::{FieldCollection, FieldId, FieldKind, FormError};

/// When a dragged field is moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReorderMode {
    /// Reflow the list on every hover
    #[default]
    Live,
    /// Reorder once, when the drag is released
    OnDrop,
}

/// What is being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPayload {
    /// A palette entry; dropping it on the canvas appends a field
    NewField(FieldKind),
    /// A field already on the canvas, tracked at its current index
    ExistingField { id: FieldId, index: usize },
}

/// Where a drag was released or is hovering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// Over the field row at this index
    Row(usize),
    /// Inside the canvas but not over a row
    Canvas,
    /// Anywhere else on screen
    Outside,
}

/// Result of releasing a drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Appended(FieldId),
    Moved { id: FieldId, from: usize, to: usize },
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    payload: DragPayload,
    mode: ReorderMode,
    origin: Option<usize>,
    pending: Option<usize>,
}

impl DragSession {
    /// Start dragging a palette entry
    pub fn new_field(kind: FieldKind, mode: ReorderMode) -> Self {
        Self {
            payload: DragPayload::NewField(kind),
            mode,
            origin: None,
            pending: None,
        }
    }

    /// Start dragging the field at `index`
    pub fn existing(
        fields: &FieldCollection,
        index: usize,
        mode: ReorderMode,
    ) -> Result<Self, FormError> {
        let field = fields.get_at(index).ok_or(FormError::OutOfRange {
            index,
            len: fields.len(),
        })?;

        Ok(Self {
            payload: DragPayload::ExistingField {
                id: field.id(),
                index,
            },
            mode,
            origin: Some(index),
            pending: None,
        })
    }

    pub fn payload(&self) -> DragPayload {
        self.payload
    }

    pub fn mode(&self) -> ReorderMode {
        self.mode
    }

    /// Id of the dragged field, if it is already on the canvas
    pub fn dragged_id(&self) -> Option<FieldId> {
        match self.payload {
            DragPayload::ExistingField { id, .. } => Some(id),
            DragPayload::NewField(_) => None,
        }
    }

    /// Row the dragged field would land on if released now
    pub fn pending_target(&self) -> Option<usize> {
        self.pending
    }

    /// Feed a hover event; returns whether the collection changed
    ///
    /// The dragged field is looked up by id, so keyboard moves made while the
    /// button is held are respected. A field removed mid-drag is ignored.
    pub fn hover(
        &mut self,
        fields: &mut FieldCollection,
        target: DropTarget,
    ) -> Result<bool, FormError> {
        let DragPayload::ExistingField { id, .. } = self.payload else {
            return Ok(false);
        };
        let Some(index) = fields.position(id) else {
            return Ok(false);
        };
        let DropTarget::Row(hover_index) = target else {
            return Ok(false);
        };
        if hover_index == index {
            return Ok(false);
        }

        match self.mode {
            ReorderMode::Live => {
                fields.reorder(index, hover_index)?;
                self.payload = DragPayload::ExistingField {
                    id,
                    index: hover_index,
                };
                Ok(true)
            }
            ReorderMode::OnDrop => {
                if hover_index >= fields.len() {
                    return Err(FormError::OutOfRange {
                        index: hover_index,
                        len: fields.len(),
                    });
                }
                self.pending = Some(hover_index);
                Ok(false)
            }
        }
    }

    /// Release the drag over `target`
    pub fn finish(
        self,
        fields: &mut FieldCollection,
        target: DropTarget,
    ) -> Result<DropOutcome, FormError> {
        match self.payload {
            DragPayload::NewField(kind) => match target {
                DropTarget::Row(_) | DropTarget::Canvas => {
                    Ok(DropOutcome::Appended(fields.append(kind).id()))
                }
                DropTarget::Outside => Ok(DropOutcome::Cancelled),
            },
            DragPayload::ExistingField { id, .. } => {
                // Removed while the button was held
                let Some(index) = fields.position(id) else {
                    return Ok(DropOutcome::Cancelled);
                };
                let to = match (self.mode, target) {
                    (ReorderMode::OnDrop, DropTarget::Row(row)) => row,
                    (ReorderMode::OnDrop, DropTarget::Canvas) => self.pending.unwrap_or(index),
                    (ReorderMode::OnDrop, DropTarget::Outside) => index,
                    (ReorderMode::Live, DropTarget::Row(row)) => {
                        fields.reorder(index, row)?;
                        row
                    }
                    (ReorderMode::Live, _) => index,
                };

                if self.mode == ReorderMode::OnDrop && to != index {
                    fields.reorder(index, to)?;
                }

                let from = self.origin.unwrap_or(index);
                if from == to {
                    Ok(DropOutcome::Cancelled)
                } else {
                    Ok(DropOutcome::Moved { id, from, to })
                }
            }
        }
    }
}
