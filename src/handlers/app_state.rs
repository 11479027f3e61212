/// Application state handlers that respond to events
use crate::events::{AppEvent, EventBus};
use crate::App;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// App state handler that manages application state in response to events
#[derive(Clone)]
pub struct AppStateHandler {
    app_state: Arc<RwLock<App>>,
}

impl AppStateHandler {
    /// Create a new app state handler
    pub fn new(app_state: Arc<RwLock<App>>) -> Self {
        Self { app_state }
    }

    /// Subscribe to all relevant events
    pub async fn subscribe(&self, event_bus: &EventBus) -> Result<()> {
        for event_type in ["status_message", "toast_message", "quit"] {
            let handler = self.clone();
            event_bus
                .subscribe_async(event_type, move |event| {
                    let handler = handler.clone();
                    async move { handler.handle_event(event).await }
                })
                .await;
        }

        Ok(())
    }

    /// Apply one UI or lifecycle event
    pub async fn handle_event(&self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::StatusMessage { message } => {
                self.app_state.write().await.set_status_message(message.to_string());
            }
            AppEvent::ToastMessage {
                message,
                toast_type,
            } => {
                let mut app = self.app_state.write().await;
                app.toast_manager.push(message.to_string(), toast_type);
                app.set_status_message(message.to_string());
            }
            AppEvent::Quit => {
                info!("quit requested");
                self.app_state.write().await.running = false;
            }
            _ => {}
        }

        Ok(())
    }
}
