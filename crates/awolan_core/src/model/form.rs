//! Form-input validation shared by screen controllers.
//!
//! # Responsibility
//! - Define the single user-facing validation failure: an empty required field.
//! - Keep the "required field non-empty" policy in one place.
//!
//! # Invariants
//! - Validation never partially applies a submission; callers abort on error.
//! - Field names in errors are stable UI-facing labels.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type FormResult<T> = Result<T, FormError>;

/// Rejection of a form submission before any state changes.
///
/// The host surfaces this as a blocking alert; nothing is saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    MissingField(&'static str),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "required field is empty: {field}"),
        }
    }
}

impl Error for FormError {}

/// Returns the trimmed value, or `MissingField` when blank.
pub fn require<'a>(field: &'static str, value: &'a str) -> FormResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormError::MissingField(field));
    }
    Ok(trimmed)
}
