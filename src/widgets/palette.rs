use ratatui::{
    buffer::Buffer as TuiBuffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::pane_block;
use crate::form::FieldKind;

/// List of field kinds that can be clicked or dragged onto the canvas
pub struct Palette {
    pub cursor: usize,
    pub focused: bool,
    /// Kind currently being dragged out of the palette
    pub dragging: Option<FieldKind>,
}

impl Palette {
    pub fn new(cursor: usize) -> Self {
        Self {
            cursor,
            focused: false,
            dragging: None,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn dragging(mut self, dragging: Option<FieldKind>) -> Self {
        self.dragging = dragging;
        self
    }
}

impl Widget for Palette {
    fn render(self, area: Rect, buf: &mut TuiBuffer) {
        let block = pane_block("Select Field Type", self.focused);
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = FieldKind::ALL
            .iter()
            .enumerate()
            .map(|(i, kind)| {
                let mut style = Style::default().fg(Color::LightBlue);
                if self.focused && i == self.cursor {
                    style = Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD);
                }
                if self.dragging == Some(*kind) {
                    style = style.add_modifier(Modifier::DIM);
                }
                Line::from(Span::styled(format!(" + {:<width$}", kind.label(), width = 10), style))
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
