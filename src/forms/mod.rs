//! Request payloads accepted by the HTTP routes.
//!
//! Each form is deserialized from the request body, checked with `validator`
//! and converted into a typed payload whose fields are domain value objects.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod auth;
pub mod expense;
pub mod itinerary;
pub mod profile;
pub mod trip;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid name")]
    InvalidName,

    #[error("invalid url")]
    InvalidUrl,

    #[error("invalid id")]
    InvalidId,

    #[error("amount must be a non-negative number")]
    InvalidAmount,

    #[error("{0}")]
    InvalidValue(String),
}

impl From<TypeConstraintError> for FormError {
    fn from(err: TypeConstraintError) -> Self {
        match err {
            TypeConstraintError::NonPositiveId => FormError::InvalidId,
            TypeConstraintError::InvalidEmail => FormError::InvalidEmail,
            TypeConstraintError::EmptyString => FormError::InvalidName,
            TypeConstraintError::InvalidUrl => FormError::InvalidUrl,
            TypeConstraintError::InvalidAmount => FormError::InvalidAmount,
            other => FormError::InvalidValue(other.to_string()),
        }
    }
}

/// Blank optional strings are treated as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
