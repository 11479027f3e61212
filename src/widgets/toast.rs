use ratatui::{
    buffer::Buffer as TuiBuffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};
use std::time::{Duration, Instant};

/// Severity of a toast notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastType {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastType {
    fn color(self) -> Color {
        match self {
            ToastType::Info => Color::Cyan,
            ToastType::Success => Color::Green,
            ToastType::Warning => Color::Yellow,
            ToastType::Error => Color::Red,
        }
    }

    fn icon(self) -> &'static str {
        match self {
            ToastType::Info => "ℹ",
            ToastType::Success => "✓",
            ToastType::Warning => "⚠",
            ToastType::Error => "✗",
        }
    }
}

/// A single toast notification
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub toast_type: ToastType,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, toast_type: ToastType, duration: Duration) -> Self {
        Self {
            message: message.into(),
            toast_type,
            created_at: Instant::now(),
            duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.duration
    }

    /// Share of the lifetime already used, from 0.0 to 1.0
    pub fn progress(&self) -> f32 {
        let total = self.duration.as_secs_f32();
        if total == 0.0 {
            return 1.0;
        }
        (self.created_at.elapsed().as_secs_f32() / total).min(1.0)
    }
}

/// Keeps the most recent toasts and draws them in the top-right corner
#[derive(Debug, Clone)]
pub struct ToastManager {
    toasts: Vec<Toast>,
    max_toasts: usize,
    duration: Duration,
}

impl ToastManager {
    pub fn new(duration: Duration, max_toasts: usize) -> Self {
        Self {
            toasts: Vec::new(),
            max_toasts: max_toasts.max(1),
            duration,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, toast_type: ToastType) {
        self.toasts
            .push(Toast::new(message, toast_type, self.duration));

        let overflow = self.toasts.len().saturating_sub(self.max_toasts);
        self.toasts.drain(..overflow);
    }

    /// Drop expired toasts
    pub fn update(&mut self) {
        self.toasts.retain(|toast| !toast.is_expired());
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn has_active_toasts(&self) -> bool {
        !self.toasts.is_empty()
    }

    pub fn render(&self, area: Rect, buf: &mut TuiBuffer) {
        let width = 44u16.min(area.width / 3);
        if width < 8 {
            return;
        }
        let x = area.x + area.width.saturating_sub(width + 2);

        for (i, toast) in self.toasts.iter().enumerate() {
            let y = area.y + 2 + i as u16 * 3;
            if y + 3 > area.y + area.height {
                break;
            }
            render_toast(toast, Rect::new(x, y, width, 3), buf);
        }
    }
}

fn render_toast(toast: &Toast, area: Rect, buf: &mut TuiBuffer) {
    let color = toast.toast_type.color();
    let progress = toast.progress();
    let border = if progress > 0.9 { Color::DarkGray } else { color };

    Clear.render(area, buf);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(Color::Rgb(30, 30, 30)));
    let inner = block.inner(area);
    block.render(area, buf);

    let room = (inner.width as usize).saturating_sub(2);
    let mut message: String = toast.message.chars().take(room).collect();
    if toast.message.chars().count() > room && room > 3 {
        message = message.chars().take(room - 3).collect();
        message.push_str("...");
    }

    let line = Line::from(vec![
        Span::styled(
            format!("{} ", toast.toast_type.icon()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(message, Style::default().fg(Color::White)),
    ]);
    Paragraph::new(line).render(inner, buf);
}

/// Widget wrapper for rendering toasts
pub struct ToastWidget<'a> {
    manager: &'a ToastManager,
}

impl<'a> ToastWidget<'a> {
    pub fn new(manager: &'a ToastManager) -> Self {
        Self { manager }
    }
}

impl Widget for ToastWidget<'_> {
    fn render(self, area: Rect, buf: &mut TuiBuffer) {
        self.manager.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oldest_toasts_are_dropped() {
        let mut manager = ToastManager::new(Duration::from_secs(5), 2);
        manager.push("one", ToastType::Info);
        manager.push("two", ToastType::Warning);
        manager.push("three", ToastType::Error);

        let messages: Vec<&str> = manager.toasts().iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, ["two", "three"]);
    }

    #[test]
    fn test_zero_duration_expires_immediately() {
        let mut manager = ToastManager::new(Duration::ZERO, 5);
        manager.push("gone", ToastType::Success);
        std::thread::sleep(Duration::from_millis(2));
        manager.update();

        assert!(!manager.has_active_toasts());
    }
}
