//! Validation error types

use std::fmt;

/// Validation error for domain models
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Invalid enum variant
    InvalidVariant { field: &'static str, value: String },

    /// Text contains a NUL byte, which PostgreSQL text columns cannot hold
    ContainsNul { field: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::InvalidVariant { field, value } => {
                write!(f, "invalid {} value: '{}'", field, value)
            }
            Self::ContainsNul { field } => write!(f, "{} cannot contain NUL characters", field),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Reject text the store cannot hold.
pub fn storable(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.contains('\0') {
        return Err(ValidationError::ContainsNul { field });
    }
    Ok(())
}

/// Trim a required text field, rejecting blank input.
pub fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    storable(field, trimmed)?;
    Ok(trimmed.to_owned())
}

/// Normalize an optional text field: blank becomes `None`.
///
/// HTML forms submit every input, so an untouched field arrives as `""`.
pub fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
