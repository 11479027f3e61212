use std::io::Stdout;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use ratatui::{
    backend::CrosstermBackend,
    crossterm::event::{self, Event},
    Terminal,
};
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::events::EventBus;
use crate::form::{
    project_all, validate, DragSession, DropOutcome, DropTarget, FieldCollection,
    FieldDescriptor, FieldId, FieldKind, FieldPatch, FieldProperty, RenderDirective,
    ValidationError,
};
use crate::handlers::{AppStateHandler, FormHandler, KeyboardHandler, MouseHandler};
use crate::input::ScreenLayout;
use crate::input_system::InputSystem;
use crate::widgets::toast::ToastManager;
use crate::widgets::{SlotAlignment, StatusBar, StatusSlot};

/// Whole designer state, shared between the render loop and the handlers
pub struct App {
    /// Whether the application is running
    pub running: bool,

    /// The form being designed
    pub form: FieldCollection,

    /// Editing or previewing
    pub mode: DesignerMode,

    /// Directives shown while in preview mode
    pub preview: Vec<RenderDirective>,

    /// Pane receiving keyboard input
    pub focus: Pane,

    /// Property input that last held focus in the property panel
    pub property_focus: FieldProperty,

    /// Highlighted palette entry
    pub palette_cursor: usize,

    /// First visible canvas row
    pub canvas_scroll: usize,

    /// Drag in progress, from mouse-down to mouse-up
    pub drag: Option<DragSession>,

    /// Message to display on status bar
    pub status_message: Option<String>,

    /// Toast notification manager
    pub toast_manager: ToastManager,

    /// Status bar with slot-based system
    pub status_bar: StatusBar,

    /// Loaded configuration
    pub config: Config,

    /// Directory holding config and log files
    pub user_dir: PathBuf,

    /// Areas of the last drawn frame, for mouse hit-testing
    pub layout: ScreenLayout,
}

/// Top level mode of the designer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DesignerMode {
    #[default]
    Design,
    Preview,
}

/// The three panes of the design screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    #[default]
    Palette,
    Canvas,
    Properties,
}

impl Pane {
    pub fn next(self) -> Self {
        match self {
            Pane::Palette => Pane::Canvas,
            Pane::Canvas => Pane::Properties,
            Pane::Properties => Pane::Palette,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Pane::Palette => Pane::Properties,
            Pane::Canvas => Pane::Palette,
            Pane::Properties => Pane::Canvas,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Pane::Palette => "Select Field Type",
            Pane::Canvas => "Add / Edit Field",
            Pane::Properties => "Field Properties",
        }
    }
}

impl App {
    pub fn with_config(config: Config, user_dir: PathBuf) -> Self {
        let toast_manager =
            ToastManager::new(config.ui.toast_duration(), config.ui.max_toasts);

        let mut app = Self {
            running: true,
            form: FieldCollection::new(),
            mode: DesignerMode::Design,
            preview: Vec::new(),
            focus: Pane::Palette,
            property_focus: FieldProperty::Name,
            palette_cursor: 0,
            canvas_scroll: 0,
            drag: None,
            status_message: None,
            toast_manager,
            status_bar: StatusBar::new(),
            config,
            user_dir,
            layout: ScreenLayout::default(),
        };

        app.init_status_bar();
        app
    }

    /// Run the application on the event bus until it quits
    pub async fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let app_state = Arc::new(RwLock::new(std::mem::take(self)));

        let event_bus = EventBus::new();
        let input_system = InputSystem::new(event_bus.clone());

        let keyboard_handler = KeyboardHandler::new(app_state.clone(), input_system.event_sender());
        let mouse_handler = MouseHandler::new(app_state.clone(), input_system.event_sender());
        let form_handler = FormHandler::new(app_state.clone(), input_system.event_sender());
        let app_state_handler = AppStateHandler::new(app_state.clone());

        keyboard_handler.subscribe(&event_bus).await?;
        mouse_handler.subscribe(&event_bus).await?;
        form_handler.subscribe(&event_bus).await?;
        app_state_handler.subscribe(&event_bus).await?;

        let event_bus_clone = event_bus.clone();
        tokio::spawn(async move {
            if let Err(e) = event_bus_clone.start_processing().await {
                error!("Event processing error: {:#}", e);
            }
        });

        let frame_duration = Duration::from_millis(16);
        let mut last_frame = Instant::now();

        loop {
            let frame_start = Instant::now();

            if !app_state.read().await.running {
                break;
            }

            if frame_start.duration_since(last_frame) >= frame_duration {
                let mut app = app_state.write().await;
                terminal
                    .draw(|f| app.render(f))
                    .context("Failed to draw frame")?;
                drop(app);
                last_frame = frame_start;
            }

            if event::poll(Duration::from_millis(1))? {
                match event::read()? {
                    Event::Key(key) => {
                        if let Err(e) = input_system.handle_key_input(key) {
                            warn!("Error handling key input: {:#}", e);
                        }
                    }
                    Event::Mouse(mouse) => {
                        if let Err(e) = input_system.handle_mouse_input(mouse) {
                            warn!("Error handling mouse input: {:#}", e);
                        }
                    }
                    // Layout is recomputed on every draw
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            } else {
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        }

        // Handlers keep their own Arc clones alive on the bus task
        let mut app = app_state.write().await;
        *self = std::mem::take(&mut *app);

        Ok(())
    }

    /// Add a field of `kind` at the end of the form
    pub fn add_field(&mut self, kind: FieldKind) -> FieldId {
        let id = self.form.append(kind).id();
        info!(%id, %kind, "field added");

        if self.config.designer.select_on_add {
            self.select_added(id);
        }
        id
    }

    /// Select a field that was just appended
    fn select_added(&mut self, id: FieldId) {
        match self.form.select(id) {
            Ok(()) => self.ensure_selection_visible(),
            Err(e) => warn!("Could not select new field: {}", e),
        }
    }

    /// Select the field shown at canvas row `index`
    pub fn select_at(&mut self, index: usize) -> Result<FieldId> {
        let id = self
            .form
            .get_at(index)
            .map(FieldDescriptor::id)
            .with_context(|| format!("No field at row {}", index))?;
        self.form.select(id)?;
        self.ensure_selection_visible();
        Ok(id)
    }

    /// Move selection up (`-1`) or down (`1`) the canvas
    pub fn step_selection(&mut self, delta: isize) {
        if self.form.is_empty() {
            return;
        }

        let last = self.form.len() - 1;
        let index = match self.form.selected_index() {
            Some(index) => index.saturating_add_signed(delta).min(last),
            None if delta < 0 => last,
            None => 0,
        };

        if let Err(e) = self.select_at(index) {
            warn!("Could not move selection: {:#}", e);
        }
    }

    /// Move the selected field by `delta` rows; returns the applied move
    pub fn move_selected(&mut self, delta: isize) -> Result<Option<(FieldId, usize, usize)>> {
        let Some(from) = self.form.selected_index() else {
            return Ok(None);
        };
        let to = from
            .saturating_add_signed(delta)
            .min(self.form.len().saturating_sub(1));
        if from == to {
            return Ok(None);
        }

        self.form.reorder(from, to)?;
        self.cancel_drag();
        self.ensure_selection_visible();
        let id = self.form.get_at(to).map(FieldDescriptor::id);
        Ok(id.map(|id| (id, from, to)))
    }

    /// Remove one field from the form
    pub fn remove_field(&mut self, id: FieldId) -> Result<FieldDescriptor> {
        let removed = self.form.remove(id)?;
        self.cancel_drag();
        self.clamp_canvas_scroll();
        Ok(removed)
    }

    /// Remove the selected field, if any
    pub fn remove_selected(&mut self) -> Result<Option<FieldDescriptor>> {
        let Some(id) = self.form.selected_id() else {
            return Ok(None);
        };
        self.remove_field(id).map(Some)
    }

    /// Keyboard edits end a mouse drag in progress
    fn cancel_drag(&mut self) {
        if self.drag.take().is_some() {
            debug!("drag cancelled by a form edit");
        }
    }

    /// Drop every field and the selection
    pub fn clear_form(&mut self) {
        self.form.clear();
        self.drag = None;
        self.canvas_scroll = 0;
        if self.focus == Pane::Properties {
            self.focus = Pane::Canvas;
        }
        info!("form cleared");
    }

    /// Property input the panel should edit for the selected field
    pub fn active_property(&self) -> Option<FieldProperty> {
        let field = self.form.selected()?;
        if field.kind().supports(self.property_focus) {
            Some(self.property_focus)
        } else {
            Some(FieldProperty::Name)
        }
    }

    /// Give keyboard focus to one property input
    pub fn focus_property(&mut self, property: FieldProperty) {
        self.property_focus = property;
        self.focus = Pane::Properties;
    }

    /// Cycle between the inputs the selected field offers
    pub fn cycle_property(&mut self, forward: bool) {
        let Some(field) = self.form.selected() else {
            return;
        };
        let properties = field.kind().properties();
        let current = self.active_property().unwrap_or_default();
        let index = properties.iter().position(|p| *p == current).unwrap_or(0);
        let next = if forward {
            (index + 1) % properties.len()
        } else {
            (index + properties.len() - 1) % properties.len()
        };
        self.property_focus = properties[next];
    }

    /// Replace the focused property of the selected field with `value`
    ///
    /// Focus stays on the same pane and input after the edit.
    pub fn set_active_property(&mut self, value: String) -> Result<()> {
        let (Some(id), Some(property)) = (self.form.selected_id(), self.active_property()) else {
            return Ok(());
        };
        self.form.update(id, FieldPatch::property(property, value))?;
        Ok(())
    }

    /// Type one character into the focused property input
    pub fn insert_property_char(&mut self, c: char) -> Result<()> {
        let Some(mut value) = self.active_property_value() else {
            return Ok(());
        };
        value.push(c);
        self.set_active_property(value)
    }

    /// Delete the last character of the focused property input
    pub fn delete_property_char(&mut self) -> Result<()> {
        let Some(mut value) = self.active_property_value() else {
            return Ok(());
        };
        if value.pop().is_none() {
            return Ok(());
        }
        self.set_active_property(value)
    }

    fn active_property_value(&self) -> Option<String> {
        let property = self.active_property()?;
        self.form
            .selected()
            .map(|field| field.property(property).to_string())
    }

    /// Validate the form and switch to preview when it passes
    ///
    /// A rejected form is left exactly as it was.
    pub fn request_preview(&mut self) -> Result<(), ValidationError> {
        validate(self.form.fields())?;

        self.preview = project_all(&self.form);
        self.mode = DesignerMode::Preview;
        self.drag = None;
        Ok(())
    }

    /// Leave preview and go back to editing
    pub fn dismiss_preview(&mut self) {
        self.mode = DesignerMode::Design;
        self.preview.clear();
    }

    pub fn focus_next_pane(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous_pane(&mut self) {
        self.focus = self.focus.previous();
    }

    pub fn move_palette_cursor(&mut self, delta: isize) {
        let last = FieldKind::ALL.len() - 1;
        self.palette_cursor = self.palette_cursor.saturating_add_signed(delta).min(last);
    }

    pub fn palette_kind(&self) -> FieldKind {
        FieldKind::ALL[self.palette_cursor.min(FieldKind::ALL.len() - 1)]
    }

    /// Start dragging a palette entry
    pub fn begin_palette_drag(&mut self, kind: FieldKind) {
        self.drag = Some(DragSession::new_field(kind, self.config.designer.reorder_mode));
    }

    /// Start dragging the field at canvas row `index`
    pub fn begin_field_drag(&mut self, index: usize) -> Result<()> {
        let session = DragSession::existing(&self.form, index, self.config.designer.reorder_mode)?;
        self.drag = Some(session);
        Ok(())
    }

    /// Forward a hover to the active drag
    pub fn drag_hover(&mut self, target: DropTarget) -> Result<bool> {
        let Some(session) = self.drag.as_mut() else {
            return Ok(false);
        };
        let moved = session.hover(&mut self.form, target)?;
        if moved {
            debug!(?target, "live reflow");
        }
        Ok(moved)
    }

    /// Release the active drag over `target`
    pub fn end_drag(&mut self, target: DropTarget) -> Result<DropOutcome> {
        let Some(session) = self.drag.take() else {
            return Ok(DropOutcome::Cancelled);
        };
        let outcome = session.finish(&mut self.form, target)?;
        if let DropOutcome::Appended(id) = outcome {
            if self.config.designer.select_on_add {
                self.select_added(id);
            }
        }
        Ok(outcome)
    }

    /// Set a status message
    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status_message(&mut self) {
        self.status_message = None;
    }

    /// Initialize the status bar with default slots
    pub fn init_status_bar(&mut self) {
        use ratatui::style::{Color, Style};

        let bar_style = Style::default().fg(Color::White).bg(Color::Blue);

        self.status_bar.set_slot(
            StatusSlot::new("fields", "")
                .with_alignment(SlotAlignment::Left)
                .with_priority(100)
                .with_style(bar_style),
        );
        self.status_bar.set_slot(
            StatusSlot::new("selection", "")
                .with_alignment(SlotAlignment::Left)
                .with_priority(90)
                .with_style(bar_style),
        );
        self.status_bar.set_slot(
            StatusSlot::new("message", "")
                .with_alignment(SlotAlignment::Center)
                .with_priority(70)
                .with_style(Style::default().fg(Color::Black).bg(Color::Yellow))
                .with_visibility(false),
        );
        self.status_bar.set_slot(
            StatusSlot::new("mode", "DESIGN")
                .with_alignment(SlotAlignment::Right)
                .with_priority(100)
                .with_style(Style::default().fg(Color::White).bg(Color::DarkGray)),
        );
        self.status_bar.set_slot(
            StatusSlot::new("pane", "")
                .with_alignment(SlotAlignment::Right)
                .with_priority(60)
                .with_style(bar_style),
        );
    }

    /// Update status bar slots with current application state
    pub fn update_status_bar(&mut self) {
        let count = self.form.len();
        let fields = if count == 1 {
            "1 field".to_string()
        } else {
            format!("{} fields", count)
        };
        self.status_bar.update_slot_content("fields", fields);

        let selection = match self.form.selected() {
            Some(field) => format!("{} {}", field.kind(), field.display_label()),
            None => "No selection".to_string(),
        };
        self.status_bar.update_slot_content("selection", selection);

        match &self.status_message {
            Some(message) => {
                self.status_bar.update_slot_content("message", message.as_str());
                self.status_bar.show_slot("message");
            }
            None => self.status_bar.hide_slot("message"),
        }

        let mode = match self.mode {
            DesignerMode::Design => "DESIGN",
            DesignerMode::Preview => "PREVIEW",
        };
        self.status_bar.update_slot_content("mode", mode);
        self.status_bar.update_slot_content("pane", self.focus.title());
    }
}

impl Default for App {
    fn default() -> Self {
        Self::with_config(Config::default(), PathBuf::from("."))
    }
}
