//! The form model: field descriptors and the ordered collection that owns them
//!
//! Everything in here is free of terminal concerns so it can be driven by any
//! front end (and by tests) through plain method calls.

pub mod collection;
pub mod drag;
pub mod preview;
pub mod validate;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use collection::FieldCollection;
pub use drag::{DragPayload, DragSession, DropOutcome, DropTarget, ReorderMode};
pub use preview::{project, project_all, Control, RenderDirective};
pub use validate::{validate, ValidationError};

/// The closed set of field kinds offered by the palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Input,
    Checkbox,
    Date,
}

impl FieldKind {
    /// Palette order
    pub const ALL: [FieldKind; 3] = [FieldKind::Input, FieldKind::Checkbox, FieldKind::Date];

    pub fn label(self) -> &'static str {
        match self {
            FieldKind::Input => "Input",
            FieldKind::Checkbox => "Checkbox",
            FieldKind::Date => "Date",
        }
    }

    /// Label shown in preview when the field has no name
    pub fn fallback_label(self) -> &'static str {
        match self {
            FieldKind::Input => "Input Field",
            FieldKind::Checkbox => "Checkbox Field",
            FieldKind::Date => "Date Field",
        }
    }

    /// Editable properties for this kind, in panel order
    pub fn properties(self) -> &'static [FieldProperty] {
        match self {
            FieldKind::Input => &[FieldProperty::Name, FieldProperty::MaxLength],
            FieldKind::Checkbox | FieldKind::Date => &[FieldProperty::Name],
        }
    }

    pub fn supports(self, property: FieldProperty) -> bool {
        self.properties().contains(&property)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An editable property of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FieldProperty {
    #[default]
    Name,
    MaxLength,
}

impl FieldProperty {
    /// Caption used by the property panel
    pub fn caption(self) -> &'static str {
        match self {
            FieldProperty::Name => "Field Label",
            FieldProperty::MaxLength => "Field Max Length",
        }
    }
}

impl fmt::Display for FieldProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldProperty::Name => f.write_str("name"),
            FieldProperty::MaxLength => f.write_str("max length"),
        }
    }
}

/// Identity of a field, unique within one collection for its whole lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(pub u64);

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One field of the designed form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    id: FieldId,
    kind: FieldKind,
    name: String,
    #[serde(rename = "maxLength")]
    max_length: String,
}

impl FieldDescriptor {
    pub(crate) fn new(id: FieldId, kind: FieldKind) -> Self {
        Self {
            id,
            kind,
            name: String::new(),
            max_length: String::new(),
        }
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw max length text as typed; only meaningful for `Input`
    pub fn max_length(&self) -> &str {
        &self.max_length
    }

    /// Current text of a property
    pub fn property(&self, property: FieldProperty) -> &str {
        match property {
            FieldProperty::Name => &self.name,
            FieldProperty::MaxLength => &self.max_length,
        }
    }

    /// What the canvas shows for this field
    pub fn display_label(&self) -> &str {
        if self.name.is_empty() {
            self.kind.label()
        } else {
            &self.name
        }
    }

    /// Parsed max length, `None` when unset or not a positive number
    pub fn max_length_value(&self) -> Option<f64> {
        let raw = self.max_length.trim();
        if raw.is_empty() {
            return None;
        }
        raw.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite() && *value > 0.0)
    }

    /// Whether the type specific properties hold
    pub fn has_valid_properties(&self) -> bool {
        match self.kind {
            FieldKind::Input => {
                self.max_length.trim().is_empty() || self.max_length_value().is_some()
            }
            FieldKind::Checkbox | FieldKind::Date => true,
        }
    }

    fn apply(&mut self, patch: FieldPatch) -> Result<(), FormError> {
        if patch.max_length.is_some() && !self.kind.supports(FieldProperty::MaxLength) {
            return Err(FormError::NotApplicable {
                kind: self.kind,
                property: FieldProperty::MaxLength,
            });
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(max_length) = patch.max_length {
            self.max_length = max_length;
        }
        Ok(())
    }
}

/// Partial update of a field's editable properties
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPatch {
    pub name: Option<String>,
    pub max_length: Option<String>,
}

impl FieldPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            max_length: None,
        }
    }

    pub fn max_length(max_length: impl Into<String>) -> Self {
        Self {
            name: None,
            max_length: Some(max_length.into()),
        }
    }

    /// Patch setting a single property
    pub fn property(property: FieldProperty, value: impl Into<String>) -> Self {
        match property {
            FieldProperty::Name => Self::name(value),
            FieldProperty::MaxLength => Self::max_length(value),
        }
    }

    pub fn with_max_length(mut self, max_length: impl Into<String>) -> Self {
        self.max_length = Some(max_length.into());
        self
    }
}

/// Errors raised by form operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("index {index} is out of range for a form with {len} fields")]
    OutOfRange { index: usize, len: usize },

    #[error("field {0} is not part of the form")]
    NotFound(FieldId),

    #[error("{kind} fields have no {property} property")]
    NotApplicable {
        kind: FieldKind,
        property: FieldProperty,
    },

    #[error(transparent)]
    ValidationFailed(#[from] ValidationError),
}
