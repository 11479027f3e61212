//! Terminal form designer: build a form from a palette of field kinds,
//! edit each field's properties, validate and preview the result.

pub mod app;
pub mod config;
pub mod events;
pub mod form;
pub mod handlers;
pub mod input;
pub mod input_system;
pub mod logging;
pub mod ui;
pub mod widgets;

// Re-export main types for convenience
pub use app::{App, DesignerMode, Pane};
pub use form::{
    FieldCollection, FieldDescriptor, FieldId, FieldKind, FieldPatch, FieldProperty, FormError,
};
