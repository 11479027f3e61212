use std::collections::HashSet;

use thiserror::Error;

use super::FieldDescriptor;

/// Why a form cannot be previewed yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("All fields must have a name.")]
    MissingName,

    #[error("Field names must be unique.")]
    DuplicateName,

    #[error("Please ensure all fields have valid properties.")]
    InvalidProperties,
}

/// Gate run before entering preview
///
/// Checks run in a fixed order and the first failure is reported: every name
/// present, names unique after trimming, then the per-kind property rules.
pub fn validate(fields: &[FieldDescriptor]) -> Result<(), ValidationError> {
    if fields.iter().any(|field| field.name().trim().is_empty()) {
        return Err(ValidationError::MissingName);
    }

    let mut seen = HashSet::with_capacity(fields.len());
    if !fields.iter().all(|field| seen.insert(field.name().trim())) {
        return Err(ValidationError::DuplicateName);
    }

    if !fields.iter().all(FieldDescriptor::has_valid_properties) {
        return Err(ValidationError::InvalidProperties);
    }

    Ok(())
}
