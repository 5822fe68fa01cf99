//! Client-side validation errors.
//!
//! Validation runs before any request is issued; a failed check never
//! reaches the transport.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Required field was blank after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Named required field is empty or whitespace-only.
    EmptyField(&'static str),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "{field} must not be empty"),
        }
    }
}

impl Error for ValidationError {}

/// Rejects blank values for a named required field.
pub(crate) fn require_non_blank(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}
