use ratatui::{
    buffer::Buffer as TuiBuffer,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Paragraph, Widget},
};

use super::{pane_block, pane_inner};
use crate::form::{FieldDescriptor, FieldProperty};

pub const NO_SELECTION: &str = "Select a field to set properties";

/// Editor for the selected field's label and constraints
pub struct PropertiesPanel<'a> {
    pub field: Option<&'a FieldDescriptor>,
    /// Input that receives typing
    pub active: Option<FieldProperty>,
    pub focused: bool,
}

impl<'a> PropertiesPanel<'a> {
    pub fn new(field: Option<&'a FieldDescriptor>) -> Self {
        Self {
            field,
            active: None,
            focused: false,
        }
    }

    pub fn active(mut self, active: Option<FieldProperty>) -> Self {
        self.active = active;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Input rows for the selected field's properties; each takes a caption
    /// line followed by the input line
    pub fn input_areas(&self, area: Rect) -> Vec<(FieldProperty, Rect)> {
        let Some(field) = self.field else {
            return Vec::new();
        };
        let inner = pane_inner(area);

        field
            .kind()
            .properties()
            .iter()
            .enumerate()
            .filter_map(|(i, property)| {
                let y = inner.y + i as u16 * 3 + 1;
                (y < inner.bottom()).then(|| (*property, Rect::new(inner.x, y, inner.width, 1)))
            })
            .collect()
    }

    /// Terminal cell for the caret at the end of the active input
    pub fn caret_position(&self, area: Rect) -> Option<Position> {
        if !self.focused {
            return None;
        }
        let (field, active) = (self.field?, self.active?);
        let (_, input) = self
            .input_areas(area)
            .into_iter()
            .find(|(property, _)| *property == active)?;

        let typed = field.property(active).chars().count() as u16;
        let x = input.x + typed.min(input.width.saturating_sub(1));
        Some(Position::new(x, input.y))
    }
}

/// Tail of `value` that fits in `width` cells, so the caret end stays visible
fn visible_tail(value: &str, width: u16) -> String {
    let len = value.chars().count();
    let room = (width as usize).saturating_sub(1);
    value.chars().skip(len.saturating_sub(room)).collect()
}

impl Widget for PropertiesPanel<'_> {
    fn render(self, area: Rect, buf: &mut TuiBuffer) {
        let block = pane_block("Field Properties", self.focused);
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(field) = self.field else {
            Paragraph::new(Span::styled(NO_SELECTION, Style::default().fg(Color::DarkGray)))
                .render(inner, buf);
            return;
        };

        for (property, input) in self.input_areas(area) {
            let caption = Rect::new(input.x, input.y - 1, input.width, 1);
            Paragraph::new(Span::styled(
                property.caption(),
                Style::default().fg(Color::Gray),
            ))
            .render(caption, buf);

            let is_active = self.active == Some(property);
            let input_style = if is_active && self.focused {
                Style::default().fg(Color::White).bg(Color::Rgb(40, 40, 70))
            } else if is_active {
                Style::default().fg(Color::White).bg(Color::Rgb(35, 35, 35))
            } else {
                Style::default().fg(Color::Gray).bg(Color::Rgb(25, 25, 25))
            };

            buf.set_style(input, input_style);
            Paragraph::new(Span::styled(
                visible_tail(field.property(property), input.width),
                input_style.add_modifier(if is_active { Modifier::BOLD } else { Modifier::empty() }),
            ))
            .render(input, buf);
        }
    }
}
