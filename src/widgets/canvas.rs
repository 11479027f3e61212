use ratatui::{
    buffer::Buffer as TuiBuffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::pane_block;
use crate::form::{FieldCollection, FieldId};

pub const EMPTY_CANVAS: &str = "No fields added yet";

/// The form under construction, one row per field in form order
pub struct Canvas<'a> {
    pub form: &'a FieldCollection,
    pub scroll: usize,
    pub focused: bool,
    /// Field being dragged, drawn dimmed
    pub dragged: Option<FieldId>,
    /// Row a commit-on-drop drag would land on
    pub drop_marker: Option<usize>,
}

impl<'a> Canvas<'a> {
    pub fn new(form: &'a FieldCollection) -> Self {
        Self {
            form,
            scroll: 0,
            focused: false,
            dragged: None,
            drop_marker: None,
        }
    }

    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn dragged(mut self, dragged: Option<FieldId>) -> Self {
        self.dragged = dragged;
        self
    }

    pub fn drop_marker(mut self, drop_marker: Option<usize>) -> Self {
        self.drop_marker = drop_marker;
        self
    }
}

impl Widget for Canvas<'_> {
    fn render(self, area: Rect, buf: &mut TuiBuffer) {
        let block = pane_block("Add / Edit Field", self.focused);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.form.is_empty() {
            Paragraph::new(Span::styled(EMPTY_CANVAS, Style::default().fg(Color::DarkGray)))
                .render(inner, buf);
            return;
        }

        let selected = self.form.selected_id();
        let lines: Vec<Line> = self
            .form
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(inner.height as usize)
            .map(|(index, field)| {
                let mut style = Style::default().fg(Color::White);
                if Some(field.id()) == selected {
                    style = style.bg(Color::Rgb(60, 60, 110)).add_modifier(Modifier::BOLD);
                }
                if Some(field.id()) == self.dragged {
                    style = style.add_modifier(Modifier::DIM);
                }

                let marker = if self.drop_marker == Some(index) { "▶" } else { "⠿" };
                let mut spans = vec![
                    Span::styled(format!("{} ", marker), Style::default().fg(Color::DarkGray)),
                    Span::styled(field.display_label().to_string(), style),
                ];
                if !field.name().is_empty() {
                    spans.push(Span::styled(
                        format!("  {}", field.kind()),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                if !field.has_valid_properties() {
                    spans.push(Span::styled(
                        "  ⚠ max length",
                        Style::default().fg(Color::Yellow),
                    ));
                }
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
