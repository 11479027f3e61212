use ratatui::{
    buffer::Buffer as TuiBuffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::form::{Control, RenderDirective};

pub const CLOSE_LABEL: &str = "[ Close ]";

/// Centered dialog with a title and a close button
pub struct Modal<'a> {
    title: &'a str,
    content: Vec<Line<'a>>,
    width: u16,
    height: u16,
}

impl<'a> Modal<'a> {
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            content: Vec::new(),
            width: 60,
            height: 20,
        }
    }

    pub fn content(mut self, content: Vec<Line<'a>>) -> Self {
        self.content = content;
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: u16) -> Self {
        self.height = height;
        self
    }

    /// Area of the dialog inside `area`, clipped to it
    pub fn area(&self, area: Rect) -> Rect {
        let width = self.width.min(area.width);
        let height = self.height.min(area.height);
        Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        )
    }

    /// Where the close button is drawn, bottom right inside the border
    pub fn close_button(&self, area: Rect) -> Rect {
        let modal = self.area(area);
        let inner = Block::default().borders(Borders::ALL).inner(modal);
        let width = (CLOSE_LABEL.len() as u16).min(inner.width);
        Rect::new(
            inner.right().saturating_sub(width),
            inner.bottom().saturating_sub(1),
            width,
            inner.height.min(1),
        )
    }
}

impl Widget for Modal<'_> {
    fn render(self, area: Rect, buf: &mut TuiBuffer) {
        let modal_area = self.area(area);
        let close_area = self.close_button(area);
        Clear.render(modal_area, buf);

        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(Color::Black));

        let inner = block.inner(modal_area);
        block.render(modal_area, buf);

        let [body, _] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);
        Paragraph::new(self.content)
            .style(Style::default().fg(Color::White))
            .render(body, buf);

        Paragraph::new(Span::styled(
            CLOSE_LABEL,
            Style::default().fg(Color::Black).bg(Color::Gray),
        ))
        .render(close_area, buf);
    }
}

/// Lines drawn for each preview directive
pub fn preview_lines(directives: &[RenderDirective]) -> Vec<Line<'_>> {
    let label_style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    let control_style = Style::default().fg(Color::Gray);
    let mut lines = Vec::with_capacity(directives.len() * 3);
    if directives.is_empty() {
        lines.push(Line::from(Span::styled("This form has no fields.", control_style)));
    }

    for directive in directives {
        match directive.control {
            Control::TextBox { max_length } => {
                lines.push(Line::from(Span::styled(directive.label.as_str(), label_style)));
                let mut control = vec![Span::styled("[______________________]", control_style)];
                if let Some(max) = max_length {
                    control.push(Span::styled(
                        format!(" max {}", max),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                lines.push(Line::from(control));
            }
            Control::Checkbox => {
                lines.push(Line::from(vec![
                    Span::styled("[ ] ", control_style),
                    Span::styled(directive.label.as_str(), label_style),
                ]));
            }
            Control::DatePicker => {
                lines.push(Line::from(Span::styled(directive.label.as_str(), label_style)));
                lines.push(Line::from(Span::styled("[ yyyy-mm-dd ▾ ]", control_style)));
            }
        }
        lines.push(Line::default());
    }

    lines
}

/// The "Form Preview" dialog
pub fn preview_modal(directives: &[RenderDirective], area: Rect) -> Modal<'_> {
    let lines = preview_lines(directives);
    // Borders and the close row
    let height = (lines.len() as u16 + 3).clamp(8, area.height.max(8));
    Modal::new("Form Preview")
        .content(lines)
        .width(56)
        .height(height)
}
