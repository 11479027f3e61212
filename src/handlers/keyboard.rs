use crate::app::{DesignerMode, Pane};
use crate::events::{AppEvent, EventBus};
use crate::widgets::toast::ToastType;
use crate::App;
use anyhow::Result;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::RwLock;

/// Keyboard handler that processes keyboard events
#[derive(Clone)]
pub struct KeyboardHandler {
    app_state: Arc<RwLock<App>>,
    event_sender: mpsc::UnboundedSender<AppEvent>,
}

impl KeyboardHandler {
    pub fn new(app_state: Arc<RwLock<App>>, event_sender: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            app_state,
            event_sender,
        }
    }

    /// Subscribe to keyboard events
    pub async fn subscribe(&self, event_bus: &EventBus) -> Result<()> {
        let handler = self.clone();

        event_bus
            .subscribe_async("key_input", move |event| {
                let handler = handler.clone();
                async move { handler.handle_key_event(event).await }
            })
            .await;

        Ok(())
    }

    /// Handle keyboard events
    pub async fn handle_key_event(&self, event: AppEvent) -> Result<()> {
        let AppEvent::KeyInput(key) = event else {
            return Ok(());
        };

        // Global shortcuts work in every pane and mode
        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::CONTROL) => {
                self.event_sender.send(AppEvent::Quit)?;
                return Ok(());
            }
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => {
                self.event_sender.send(AppEvent::SaveRequested)?;
                return Ok(());
            }
            _ => {}
        }

        let (mode, focus) = {
            let app = self.app_state.read().await;
            (app.mode, app.focus)
        };

        match mode {
            DesignerMode::Preview => self.handle_preview_key(key).await,
            DesignerMode::Design => {
                if key.code == KeyCode::Char('l') && key.modifiers == KeyModifiers::CONTROL {
                    self.event_sender.send(AppEvent::ClearRequested)?;
                    return Ok(());
                }
                match (key.code, key.modifiers) {
                    (KeyCode::Tab, KeyModifiers::NONE) => {
                        self.app_state.write().await.focus_next_pane();
                        Ok(())
                    }
                    (KeyCode::BackTab, _) | (KeyCode::Tab, KeyModifiers::SHIFT) => {
                        self.app_state.write().await.focus_previous_pane();
                        Ok(())
                    }
                    _ => match focus {
                        Pane::Palette => self.handle_palette_key(key).await,
                        Pane::Canvas => self.handle_canvas_key(key).await,
                        Pane::Properties => self.handle_properties_key(key).await,
                    },
                }
            }
        }
    }

    /// Any of Esc, Enter or q closes the preview
    async fn handle_preview_key(&self, key: KeyEvent) -> Result<()> {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
            self.event_sender.send(AppEvent::PreviewDismissed)?;
        }
        Ok(())
    }

    async fn handle_palette_key(&self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Up => self.app_state.write().await.move_palette_cursor(-1),
            KeyCode::Down => self.app_state.write().await.move_palette_cursor(1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let kind = self.app_state.read().await.palette_kind();
                self.event_sender.send(AppEvent::FieldRequested { kind })?;
            }
            KeyCode::Right => self.app_state.write().await.focus = Pane::Canvas,
            _ => {}
        }
        Ok(())
    }

    async fn handle_canvas_key(&self, key: KeyEvent) -> Result<()> {
        match (key.code, key.modifiers) {
            (KeyCode::Up, KeyModifiers::ALT) => self.move_selected(-1).await?,
            (KeyCode::Down, KeyModifiers::ALT) => self.move_selected(1).await?,
            (KeyCode::Up, _) => self.app_state.write().await.step_selection(-1),
            (KeyCode::Down, _) => self.app_state.write().await.step_selection(1),
            (KeyCode::Home, _) => {
                let mut app = self.app_state.write().await;
                if !app.form.is_empty() {
                    app.select_at(0)?;
                }
            }
            (KeyCode::End, _) => {
                let mut app = self.app_state.write().await;
                if let Some(last) = app.form.len().checked_sub(1) {
                    app.select_at(last)?;
                }
            }
            (KeyCode::PageUp, _) => self.app_state.write().await.scroll_canvas(-8),
            (KeyCode::PageDown, _) => self.app_state.write().await.scroll_canvas(8),
            (KeyCode::Enter, _) | (KeyCode::Right, _) => {
                let mut app = self.app_state.write().await;
                if app.form.selected_id().is_some() {
                    app.focus = Pane::Properties;
                }
            }
            (KeyCode::Left, _) => self.app_state.write().await.focus = Pane::Palette,
            (KeyCode::Delete, _) => {
                let id = self.app_state.read().await.form.selected_id();
                if let Some(id) = id {
                    self.event_sender.send(AppEvent::RemoveRequested { id })?;
                }
            }
            (KeyCode::Esc, _) => self.app_state.write().await.form.deselect(),
            _ => {}
        }
        Ok(())
    }

    async fn handle_properties_key(&self, key: KeyEvent) -> Result<()> {
        let mut app = self.app_state.write().await;
        if app.form.selected_id().is_none() {
            if key.code == KeyCode::Esc || key.code == KeyCode::Left {
                app.focus = Pane::Canvas;
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Up => app.cycle_property(false),
            KeyCode::Down | KeyCode::Enter => app.cycle_property(true),
            KeyCode::Esc => app.focus = Pane::Canvas,
            KeyCode::Backspace => app.delete_property_char()?,
            KeyCode::Char(c)
                if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                app.insert_property_char(c)?;
            }
            _ => {}
        }
        Ok(())
    }

    /// Alt+Up / Alt+Down on the canvas
    async fn move_selected(&self, delta: isize) -> Result<()> {
        let mut app = self.app_state.write().await;
        if app.form.selected_id().is_none() {
            return Ok(());
        }
        let moved = app.move_selected(delta)?;
        drop(app);

        match moved {
            Some((id, from, to)) => {
                self.event_sender.send(AppEvent::FieldMoved { id, from, to })?;
            }
            None => {
                self.event_sender.send(AppEvent::ToastMessage {
                    message: "Field is already at the edge of the form".into(),
                    toast_type: ToastType::Info,
                })?;
            }
        }
        Ok(())
    }
}
