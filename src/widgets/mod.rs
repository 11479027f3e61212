pub mod canvas;
pub mod modal;
pub mod palette;
pub mod properties;
pub mod status_bar;
pub mod toast;

pub use canvas::Canvas;
pub use palette::Palette;
pub use properties::PropertiesPanel;
pub use status_bar::{SlotAlignment, StatusBar, StatusSlot};

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders},
};

/// Bordered block shared by the three panes; focus brightens the border
pub(crate) fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let border_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    Block::default()
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Area inside a pane's border
pub fn pane_inner(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(area)
}
