/// Canvas scroll handling
use crate::App;

impl App {
    /// Rows the canvas showed in the last frame, at least one
    fn canvas_rows(&self) -> usize {
        (self.layout.canvas.height as usize).max(1)
    }

    /// Scroll the canvas by `delta` rows, keeping at least one field in view
    pub fn scroll_canvas(&mut self, delta: isize) {
        let max_scroll = self.max_canvas_scroll();
        self.canvas_scroll = self
            .canvas_scroll
            .saturating_add_signed(delta)
            .min(max_scroll);
    }

    /// Bring the selected field into view
    pub fn ensure_selection_visible(&mut self) {
        let Some(index) = self.form.selected_index() else {
            return;
        };
        let rows = self.canvas_rows();

        if index < self.canvas_scroll {
            self.canvas_scroll = index;
        } else if index >= self.canvas_scroll + rows {
            self.canvas_scroll = index + 1 - rows;
        }
    }

    /// Pull the scroll offset back after fields were removed
    pub fn clamp_canvas_scroll(&mut self) {
        self.canvas_scroll = self.canvas_scroll.min(self.max_canvas_scroll());
    }

    pub fn max_canvas_scroll(&self) -> usize {
        self.form.len().saturating_sub(self.canvas_rows())
    }
}
