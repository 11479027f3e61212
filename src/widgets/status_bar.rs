use ratatui::{
    buffer::Buffer as TuiBuffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Which part of the bar a slot is drawn in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotAlignment {
    Left,
    Center,
    Right,
}

/// One named piece of the status bar
#[derive(Debug, Clone)]
pub struct StatusSlot {
    pub id: String,
    pub content: String,
    pub alignment: SlotAlignment,
    /// Higher priority is drawn first within its alignment group
    pub priority: u8,
    pub style: Style,
    pub visible: bool,
}

impl StatusSlot {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            alignment: SlotAlignment::Left,
            priority: 50,
            style: Style::default().fg(Color::White).bg(Color::Blue),
            visible: true,
        }
    }

    pub fn with_alignment(mut self, alignment: SlotAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_visibility(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    fn width(&self) -> u16 {
        // One cell of padding on each side
        let len = self.content.chars().count().min(u16::MAX as usize) as u16;
        len.saturating_add(2)
    }
}

/// Slot based status line
#[derive(Debug, Clone)]
pub struct StatusBar {
    slots: Vec<StatusSlot>,
    background: Style,
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            background: Style::default().bg(Color::Blue).fg(Color::White),
        }
    }

    /// Add a slot, replacing any slot with the same id
    pub fn set_slot(&mut self, slot: StatusSlot) {
        match self.slots.iter_mut().find(|s| s.id == slot.id) {
            Some(existing) => *existing = slot,
            None => self.slots.push(slot),
        }
    }

    pub fn get_slot(&self, id: &str) -> Option<&StatusSlot> {
        self.slots.iter().find(|slot| slot.id == id)
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn update_slot_content(&mut self, id: &str, content: impl Into<String>) {
        if let Some(slot) = self.slots.iter_mut().find(|slot| slot.id == id) {
            slot.content = content.into();
        }
    }

    pub fn show_slot(&mut self, id: &str) {
        self.set_visibility(id, true);
    }

    pub fn hide_slot(&mut self, id: &str) {
        self.set_visibility(id, false);
    }

    fn set_visibility(&mut self, id: &str, visible: bool) {
        if let Some(slot) = self.slots.iter_mut().find(|slot| slot.id == id) {
            slot.visible = visible;
        }
    }

    /// Visible slots of one group, highest priority first
    fn group(&self, alignment: SlotAlignment) -> Vec<&StatusSlot> {
        let mut slots: Vec<&StatusSlot> = self
            .slots
            .iter()
            .filter(|slot| slot.visible && slot.alignment == alignment)
            .collect();
        slots.sort_by(|a, b| b.priority.cmp(&a.priority));
        slots
    }

    fn spans<'a>(slots: &[&'a StatusSlot]) -> Vec<Span<'a>> {
        slots
            .iter()
            .map(|slot| Span::styled(format!(" {} ", slot.content), slot.style))
            .collect()
    }

    fn pad(&self, width: u16) -> Span<'static> {
        Span::styled(" ".repeat(width as usize), self.background)
    }
}

impl Widget for &StatusBar {
    fn render(self, area: Rect, buf: &mut TuiBuffer) {
        buf.set_style(area, self.background);
        if area.width == 0 {
            return;
        }

        let left = self.group(SlotAlignment::Left);
        let mut center = self.group(SlotAlignment::Center);
        let right = self.group(SlotAlignment::Right);

        let width_of = |slots: &[&StatusSlot]| {
            slots.iter().fold(0u16, |total, s| total.saturating_add(s.width()))
        };
        let left_width = width_of(&left);
        let right_width = width_of(&right);

        // Center slots are the first to go when space runs out
        let mut center_width = width_of(&center);
        if left_width
            .saturating_add(center_width)
            .saturating_add(right_width)
            > area.width
        {
            center.clear();
            center_width = 0;
        }

        let free = area
            .width
            .saturating_sub(left_width.saturating_add(center_width).saturating_add(right_width));
        let before_center = if center_width > 0 { free / 2 } else { free };

        let mut spans = StatusBar::spans(&left);
        spans.push(self.pad(before_center));
        spans.extend(StatusBar::spans(&center));
        spans.push(self.pad(free - before_center));
        spans.extend(StatusBar::spans(&right));

        Paragraph::new(Line::from(spans))
            .style(self.background)
            .render(area, buf);
    }
}
