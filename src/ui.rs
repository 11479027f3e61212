use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{DesignerMode, Pane};
use crate::form::{DragPayload, FieldProperty};
use crate::input::ScreenLayout;
use crate::widgets::modal::preview_modal;
use crate::widgets::toast::ToastWidget;
use crate::widgets::{pane_inner, Canvas, Palette, PropertiesPanel};
use crate::App;

pub const TITLE: &str = "Custom Forms";
pub const SAVE_LABEL: &str = "[ Save ]";
pub const CLEAR_LABEL: &str = "[ Clear ]";

impl App {
    /// Main render function for the application UI
    pub fn render(&mut self, f: &mut Frame) {
        let area = f.area();
        let show_status_bar = self.config.ui.show_status_bar;

        let [header, body, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(if show_status_bar { 1 } else { 0 }),
        ])
        .areas(area);

        let mut layout = ScreenLayout::default();
        self.render_header(f, header, &mut layout);
        self.render_panes(f, body, &mut layout);

        if show_status_bar {
            self.update_status_bar();
            f.render_widget(&self.status_bar, status);
        }

        if self.mode == DesignerMode::Preview {
            let modal = preview_modal(&self.preview, area);
            layout.preview_close = Some(modal.close_button(area));
            f.render_widget(modal, area);
        }

        self.toast_manager.update();
        if self.toast_manager.has_active_toasts() {
            f.render_widget(ToastWidget::new(&self.toast_manager), area);
        }

        self.layout = layout;
    }

    /// Title on the left, Save and Clear buttons on the right
    fn render_header(&self, f: &mut Frame, area: Rect, layout: &mut ScreenLayout) {
        let save_width = SAVE_LABEL.len() as u16;
        let clear_width = CLEAR_LABEL.len() as u16;
        let clear_x = area.right().saturating_sub(clear_width);
        let save_x = clear_x.saturating_sub(save_width + 1);

        layout.save_button = Rect::new(save_x, area.y, save_width, 1).intersection(area);
        layout.clear_button = Rect::new(clear_x, area.y, clear_width, 1).intersection(area);

        f.render_widget(
            Paragraph::new(Span::styled(
                TITLE,
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            area,
        );
        f.render_widget(
            Paragraph::new(Span::styled(
                SAVE_LABEL,
                Style::default().fg(Color::Black).bg(Color::Green),
            )),
            layout.save_button,
        );
        f.render_widget(
            Paragraph::new(Span::styled(
                CLEAR_LABEL,
                Style::default().fg(Color::Black).bg(Color::Red),
            )),
            layout.clear_button,
        );
    }

    /// Palette, canvas and property panel in a 3/6/3 split
    fn render_panes(&mut self, f: &mut Frame, area: Rect, layout: &mut ScreenLayout) {
        let [palette_area, canvas_area, properties_area] = Layout::horizontal([
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 2),
            Constraint::Ratio(1, 4),
        ])
        .areas(area);
        let designing = self.mode == DesignerMode::Design;

        let dragging_kind = match self.drag.as_ref().map(|drag| drag.payload()) {
            Some(DragPayload::NewField(kind)) => Some(kind),
            _ => None,
        };
        f.render_widget(
            Palette::new(self.palette_cursor)
                .focused(designing && self.focus == Pane::Palette)
                .dragging(dragging_kind),
            palette_area,
        );
        layout.palette = pane_inner(palette_area);

        let canvas_inner = pane_inner(canvas_area);
        layout.canvas = canvas_inner;
        self.layout.canvas = canvas_inner;
        self.clamp_canvas_scroll();
        layout.canvas_scroll = self.canvas_scroll;
        layout.canvas_len = self.form.len();

        let dragged = self.drag.as_ref().and_then(|drag| drag.dragged_id());
        let drop_marker = self.drag.as_ref().and_then(|drag| drag.pending_target());
        f.render_widget(
            Canvas::new(&self.form)
                .scroll(self.canvas_scroll)
                .focused(designing && self.focus == Pane::Canvas)
                .dragged(dragged)
                .drop_marker(drop_marker),
            canvas_area,
        );

        let panel = PropertiesPanel::new(self.form.selected())
            .active(self.active_property())
            .focused(designing && self.focus == Pane::Properties);
        for (property, input) in panel.input_areas(properties_area) {
            match property {
                FieldProperty::Name => layout.name_input = Some(input),
                FieldProperty::MaxLength => layout.max_length_input = Some(input),
            }
        }
        let caret = panel.caret_position(properties_area);
        f.render_widget(panel, properties_area);

        if let Some(caret) = caret {
            f.set_cursor_position(caret);
        }
    }
}
