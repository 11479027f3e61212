/// Mouse input: clicks, palette drags and live canvas reordering
use crate::app::{DesignerMode, Pane};
use crate::events::{AppEvent, EventBus};
use crate::form::{DragPayload, DropOutcome, FieldKind};
use crate::input::{hit_test, HitTarget};
use crate::widgets::toast::ToastType;
use crate::App;
use anyhow::Result;
use ratatui::crossterm::event::{MouseButton, MouseEventKind};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::RwLock;
use tracing::debug;

/// Rows scrolled per wheel notch
const WHEEL_ROWS: isize = 3;

/// Mouse handler that processes mouse events
#[derive(Clone)]
pub struct MouseHandler {
    app_state: Arc<RwLock<App>>,
    event_sender: mpsc::UnboundedSender<AppEvent>,
}

impl MouseHandler {
    pub fn new(app_state: Arc<RwLock<App>>, event_sender: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            app_state,
            event_sender,
        }
    }

    /// Subscribe to mouse events
    pub async fn subscribe(&self, event_bus: &EventBus) -> Result<()> {
        let handler = self.clone();

        event_bus
            .subscribe_async("mouse_input", move |event| {
                let handler = handler.clone();
                async move { handler.handle_mouse_event(event).await }
            })
            .await;

        Ok(())
    }

    /// Handle mouse events
    pub async fn handle_mouse_event(&self, event: AppEvent) -> Result<()> {
        let AppEvent::MouseInput(mouse) = event else {
            return Ok(());
        };

        let target = {
            let app = self.app_state.read().await;
            if !app.config.ui.mouse {
                return Ok(());
            }
            hit_test(&app.layout, mouse.column, mouse.row)
        };

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.handle_press(target).await?,
            MouseEventKind::Drag(MouseButton::Left) => self.handle_drag(target).await?,
            MouseEventKind::Up(MouseButton::Left) => self.handle_release(target).await?,
            MouseEventKind::ScrollUp => self.app_state.write().await.scroll_canvas(-WHEEL_ROWS),
            MouseEventKind::ScrollDown => self.app_state.write().await.scroll_canvas(WHEEL_ROWS),
            _ => {}
        }

        Ok(())
    }

    /// Button press: buttons act immediately, palette and canvas rows arm a drag
    async fn handle_press(&self, target: HitTarget) -> Result<()> {
        if self.app_state.read().await.mode == DesignerMode::Preview {
            if target == HitTarget::PreviewClose {
                self.event_sender.send(AppEvent::PreviewDismissed)?;
            }
            return Ok(());
        }

        match target {
            HitTarget::SaveButton => self.event_sender.send(AppEvent::SaveRequested)?,
            HitTarget::ClearButton => self.event_sender.send(AppEvent::ClearRequested)?,
            HitTarget::PaletteEntry(kind) => {
                let mut app = self.app_state.write().await;
                app.focus = Pane::Palette;
                if let Some(index) = FieldKind::ALL.iter().position(|k| *k == kind) {
                    app.palette_cursor = index;
                }
                app.begin_palette_drag(kind);
            }
            HitTarget::CanvasRow(index) => {
                let mut app = self.app_state.write().await;
                app.focus = Pane::Canvas;
                app.select_at(index)?;
                app.begin_field_drag(index)?;
            }
            HitTarget::CanvasEmpty => {
                self.app_state.write().await.focus = Pane::Canvas;
            }
            HitTarget::PropertyInput(property) => {
                self.app_state.write().await.focus_property(property);
            }
            HitTarget::PreviewClose | HitTarget::Nothing => {}
        }

        Ok(())
    }

    /// Drag with the button held: hover feeds the live reflow
    async fn handle_drag(&self, target: HitTarget) -> Result<()> {
        let mut app = self.app_state.write().await;
        if app.drag.is_none() {
            return Ok(());
        }
        if app.drag_hover(target.drop_target())? {
            app.ensure_selection_visible();
        }
        Ok(())
    }

    /// Button release: a palette entry released where it was pressed is a click
    async fn handle_release(&self, target: HitTarget) -> Result<()> {
        let mut app = self.app_state.write().await;
        let Some(session) = app.drag.as_ref() else {
            return Ok(());
        };

        if let (DragPayload::NewField(kind), HitTarget::PaletteEntry(released)) =
            (session.payload(), target)
        {
            app.drag = None;
            drop(app);
            if kind == released {
                self.event_sender.send(AppEvent::FieldRequested { kind })?;
            }
            return Ok(());
        }

        let outcome = app.end_drag(target.drop_target())?;
        drop(app);
        debug!(?outcome, "drag released");

        match outcome {
            DropOutcome::Appended(id) => {
                self.event_sender.send(AppEvent::ToastMessage {
                    message: format!("Added field {}", id).into(),
                    toast_type: ToastType::Success,
                })?;
            }
            DropOutcome::Moved { id, from, to } => {
                self.event_sender.send(AppEvent::FieldMoved { id, from, to })?;
            }
            DropOutcome::Cancelled => {}
        }

        Ok(())
    }
}
