/// Form editing requests: add, remove, save, clear
use crate::events::{AppEvent, EventBus};
use crate::widgets::toast::ToastType;
use crate::App;
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Applies form-level requests to the shared designer state
#[derive(Clone)]
pub struct FormHandler {
    app_state: Arc<RwLock<App>>,
    event_sender: mpsc::UnboundedSender<AppEvent>,
}

impl FormHandler {
    pub fn new(app_state: Arc<RwLock<App>>, event_sender: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            app_state,
            event_sender,
        }
    }

    /// Subscribe to form events
    pub async fn subscribe(&self, event_bus: &EventBus) -> Result<()> {
        for event_type in [
            "field_requested",
            "field_moved",
            "remove_requested",
            "save_requested",
            "preview_dismissed",
            "clear_requested",
        ] {
            let handler = self.clone();
            event_bus
                .subscribe_async(event_type, move |event| {
                    let handler = handler.clone();
                    async move { handler.handle_form_event(event).await }
                })
                .await;
        }

        Ok(())
    }

    /// Handle form events
    pub async fn handle_form_event(&self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::FieldRequested { kind } => {
                let id = self.app_state.write().await.add_field(kind);
                self.toast(format!("Added {} field {}", kind, id), ToastType::Success)?;
            }
            AppEvent::FieldMoved { id, from, to } => {
                info!(%id, from, to, "field moved");
                self.status(format!("Moved field {} to row {}", id, to + 1))?;
            }
            AppEvent::RemoveRequested { id } => {
                let removed = self
                    .app_state
                    .write()
                    .await
                    .remove_field(id)
                    .with_context(|| format!("Could not remove field {}", id))?;
                info!(%id, kind = %removed.kind(), "field removed");
                self.status(format!("Removed {}", removed.display_label()))?;
            }
            AppEvent::SaveRequested => self.save().await?,
            AppEvent::PreviewDismissed => {
                let mut app = self.app_state.write().await;
                app.dismiss_preview();
                app.clear_status_message();
            }
            AppEvent::ClearRequested => {
                self.app_state.write().await.clear_form();
                self.toast("Form cleared", ToastType::Info)?;
            }
            _ => {}
        }

        Ok(())
    }

    /// Validate and open the preview, or report why the form was rejected
    async fn save(&self) -> Result<()> {
        let mut app = self.app_state.write().await;
        if let Err(reason) = app.request_preview() {
            drop(app);
            warn!("save rejected: {}", reason);
            self.toast(reason.to_string(), ToastType::Error)?;
            return Ok(());
        }

        let json = serde_json::to_string(app.form.fields()).context("Failed to serialize form")?;
        info!(fields = app.form.len(), form = %json, "form saved");
        drop(app);

        self.toast("Form is valid", ToastType::Success)
    }

    fn status(&self, message: String) -> Result<()> {
        self.event_sender.send(AppEvent::StatusMessage {
            message: message.into(),
        })?;
        Ok(())
    }

    fn toast(&self, message: impl Into<String>, toast_type: ToastType) -> Result<()> {
        let message: String = message.into();
        self.event_sender.send(AppEvent::ToastMessage {
            message: message.into(),
            toast_type,
        })?;
        Ok(())
    }
}
