use anyhow::Result;
use ratatui::crossterm::event::{KeyEvent, MouseEvent};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::error;

use crate::form::{FieldId, FieldKind};
use crate::widgets::toast::ToastType;

/// All possible events in the application
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Keyboard input events
    KeyInput(KeyEvent),

    /// Mouse input events
    MouseInput(MouseEvent),

    /// The palette asked for a new field
    FieldRequested { kind: FieldKind },

    /// A field was moved within the form
    FieldMoved { id: FieldId, from: usize, to: usize },

    /// Take one field off the canvas
    RemoveRequested { id: FieldId },

    /// Validate the form and open the preview
    SaveRequested,

    /// Close the preview and return to editing
    PreviewDismissed,

    /// Drop every field
    ClearRequested,

    /// UI events
    StatusMessage {
        message: Arc<str>,
    },
    ToastMessage {
        message: Arc<str>,
        toast_type: ToastType,
    },

    /// Application lifecycle
    Quit,
}

impl AppEvent {
    /// Routing key used by the bus
    pub fn event_type(&self) -> &'static str {
        match self {
            AppEvent::KeyInput(_) => "key_input",
            AppEvent::MouseInput(_) => "mouse_input",
            AppEvent::FieldRequested { .. } => "field_requested",
            AppEvent::FieldMoved { .. } => "field_moved",
            AppEvent::RemoveRequested { .. } => "remove_requested",
            AppEvent::SaveRequested => "save_requested",
            AppEvent::PreviewDismissed => "preview_dismissed",
            AppEvent::ClearRequested => "clear_requested",
            AppEvent::StatusMessage { .. } => "status_message",
            AppEvent::ToastMessage { .. } => "toast_message",
            AppEvent::Quit => "quit",
        }
    }
}

/// Event handler function type
pub type EventHandler = Arc<dyn Fn(&AppEvent) -> Result<()> + Send + Sync>;

/// Async event handler function type
pub type AsyncEventHandler = Arc<
    dyn Fn(AppEvent) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<()>> + Send>>
        + Send
        + Sync,
>;

/// Event bus for publishing and subscribing to events
///
/// Events are handled one at a time: every handler of an event finishes
/// before the next event is taken off the channel.
#[derive(Clone)]
pub struct EventBus {
    handlers: Arc<RwLock<HashMap<&'static str, Vec<EventHandler>>>>,
    async_handlers: Arc<RwLock<HashMap<&'static str, Vec<AsyncEventHandler>>>>,
    sender: mpsc::UnboundedSender<AppEvent>,
    receiver: Arc<RwLock<Option<mpsc::UnboundedReceiver<AppEvent>>>>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
            async_handlers: Arc::new(RwLock::new(HashMap::new())),
            sender,
            receiver: Arc::new(RwLock::new(Some(receiver))),
        }
    }

    /// Get a sender for publishing events
    pub fn sender(&self) -> mpsc::UnboundedSender<AppEvent> {
        self.sender.clone()
    }

    /// Subscribe to events with a sync handler
    pub async fn subscribe<F>(&self, event_type: &'static str, handler: F)
    where
        F: Fn(&AppEvent) -> Result<()> + Send + Sync + 'static,
    {
        let mut handlers = self.handlers.write().await;
        handlers
            .entry(event_type)
            .or_default()
            .push(Arc::new(handler));
    }

    /// Subscribe to events with an async handler
    pub async fn subscribe_async<F, Fut>(&self, event_type: &'static str, handler: F)
    where
        F: Fn(AppEvent) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<()>> + Send + 'static,
    {
        let mut async_handlers = self.async_handlers.write().await;
        async_handlers
            .entry(event_type)
            .or_default()
            .push(Arc::new(move |event| Box::pin(handler(event))));
    }

    /// Publish an event
    pub fn publish(&self, event: AppEvent) -> Result<()> {
        self.sender.send(event)?;
        Ok(())
    }

    /// Start processing events (should be called once in a background task)
    pub async fn start_processing(&self) -> Result<()> {
        let mut receiver = {
            let mut receiver_guard = self.receiver.write().await;
            receiver_guard
                .take()
                .ok_or_else(|| anyhow::anyhow!("Event processor already started"))?
        };

        while let Some(event) = receiver.recv().await {
            self.dispatch(event).await;
        }

        Ok(())
    }

    /// Run every handler registered for `event`, in subscription order
    pub async fn dispatch(&self, event: AppEvent) {
        let event_type = event.event_type();

        {
            let handlers = self.handlers.read().await;
            if let Some(event_handlers) = handlers.get(event_type) {
                for handler in event_handlers {
                    if let Err(e) = handler(&event) {
                        error!("Error in sync event handler for {}: {:#}", event_type, e);
                    }
                }
            }
        }

        {
            let async_handlers = self.async_handlers.read().await;
            if let Some(event_handlers) = async_handlers.get(event_type) {
                for handler in event_handlers {
                    if let Err(e) = handler(event.clone()).await {
                        error!("Error in async event handler for {}: {:#}", event_type, e);
                    }
                }
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_dispatch_reaches_only_matching_handlers() {
        let bus = EventBus::new();
        let quits = Arc::new(AtomicUsize::new(0));
        let saves = Arc::new(AtomicUsize::new(0));

        let counter = quits.clone();
        bus.subscribe("quit", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .await;
        let counter = saves.clone();
        bus.subscribe_async("save_requested", move |_| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        })
        .await;

        bus.dispatch(AppEvent::Quit).await;
        bus.dispatch(AppEvent::SaveRequested).await;
        bus.dispatch(AppEvent::SaveRequested).await;
        bus.dispatch(AppEvent::PreviewDismissed).await;

        assert_eq!(quits.load(Ordering::SeqCst), 1);
        assert_eq!(saves.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failing_handler_does_not_stop_others() {
        let bus = EventBus::new();
        let calls = Arc::new(AtomicUsize::new(0));

        bus.subscribe("clear_requested", |_| Err(anyhow::anyhow!("boom")))
            .await;
        let counter = calls.clone();
        bus.subscribe("clear_requested", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .await;

        bus.dispatch(AppEvent::ClearRequested).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_processor_starts_once() {
        let bus = EventBus::new();
        bus.receiver.write().await.take();

        assert!(bus.start_processing().await.is_err());
    }
}
