use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),
}

/// Returns the value when it is present and non-empty.
pub fn require_field(name: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    non_empty(value).ok_or(ValidationError::MissingRequiredField(name))
}

pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
