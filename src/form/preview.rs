use super::{FieldDescriptor, FieldId, FieldKind};

/// Control drawn for one field in preview
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    TextBox { max_length: Option<usize> },
    Checkbox,
    DatePicker,
}

/// Read-only description of how to show one field in preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderDirective {
    pub field_id: FieldId,
    pub label: String,
    pub control: Control,
}

/// Map one field to its preview directive
pub fn project(field: &FieldDescriptor) -> RenderDirective {
    let label = if field.name().is_empty() {
        field.kind().fallback_label().to_string()
    } else {
        field.name().to_string()
    };

    let control = match field.kind() {
        FieldKind::Input => Control::TextBox {
            // Integer part of the typed cap, like a browser's maxlength attribute
            max_length: field.max_length_value().map(|value| value.trunc() as usize),
        },
        FieldKind::Checkbox => Control::Checkbox,
        FieldKind::Date => Control::DatePicker,
    };

    RenderDirective {
        field_id: field.id(),
        label,
        control,
    }
}

/// Project every field, preserving form order
pub fn project_all<'a, I>(fields: I) -> Vec<RenderDirective>
where
    I: IntoIterator<Item = &'a FieldDescriptor>,
{
    fields.into_iter().map(project).collect()
}
