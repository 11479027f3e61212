// Screen layout bookkeeping and mouse hit-testing

use ratatui::layout::{Position, Rect};

use crate::form::{DropTarget, FieldKind, FieldProperty};

/// Areas of the last rendered frame
///
/// Filled in by the renderer so that mouse handling works on exactly what the
/// user saw, whatever the terminal size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    pub save_button: Rect,
    pub clear_button: Rect,
    /// Inner area of the palette list, one row per kind
    pub palette: Rect,
    /// Inner area of the canvas list, one row per field
    pub canvas: Rect,
    /// First field drawn in the canvas
    pub canvas_scroll: usize,
    /// Number of fields on the canvas when drawn
    pub canvas_len: usize,
    pub name_input: Option<Rect>,
    pub max_length_input: Option<Rect>,
    /// Close button of the preview modal, when it is open
    pub preview_close: Option<Rect>,
}

/// What sits under a screen cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    SaveButton,
    ClearButton,
    PaletteEntry(FieldKind),
    CanvasRow(usize),
    CanvasEmpty,
    PropertyInput(FieldProperty),
    PreviewClose,
    Nothing,
}

impl HitTarget {
    /// How a drag released here should be interpreted
    pub fn drop_target(self) -> DropTarget {
        match self {
            HitTarget::CanvasRow(index) => DropTarget::Row(index),
            HitTarget::CanvasEmpty => DropTarget::Canvas,
            _ => DropTarget::Outside,
        }
    }
}

/// Resolve a mouse position against the last drawn layout
pub fn hit_test(layout: &ScreenLayout, column: u16, row: u16) -> HitTarget {
    let position = Position::new(column, row);

    if let Some(close) = layout.preview_close {
        // The modal swallows every other click
        return if close.contains(position) {
            HitTarget::PreviewClose
        } else {
            HitTarget::Nothing
        };
    }

    if layout.save_button.contains(position) {
        return HitTarget::SaveButton;
    }
    if layout.clear_button.contains(position) {
        return HitTarget::ClearButton;
    }

    if layout.palette.contains(position) {
        let offset = (row - layout.palette.y) as usize;
        return FieldKind::ALL
            .get(offset)
            .map(|kind| HitTarget::PaletteEntry(*kind))
            .unwrap_or(HitTarget::Nothing);
    }

    if layout.canvas.contains(position) {
        let index = layout.canvas_scroll + (row - layout.canvas.y) as usize;
        return if index < layout.canvas_len {
            HitTarget::CanvasRow(index)
        } else {
            HitTarget::CanvasEmpty
        };
    }

    if layout.name_input.is_some_and(|area| area.contains(position)) {
        return HitTarget::PropertyInput(FieldProperty::Name);
    }
    if layout
        .max_length_input
        .is_some_and(|area| area.contains(position))
    {
        return HitTarget::PropertyInput(FieldProperty::MaxLength);
    }

    HitTarget::Nothing
}
