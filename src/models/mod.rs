//! Database models shared across the GlobeTrotter repository.

pub mod activity;
#[cfg(feature = "server")]
pub mod auth;
pub mod city;
#[cfg(feature = "server")]
pub mod config;
pub mod expense;
pub mod itinerary;
pub mod trip;
pub mod user;

use crate::domain::types::TypeConstraintError;

/// Converts an optional stored column, dropping values that no longer validate.
pub(crate) fn optional<T>(
    value: Option<String>,
    make: impl FnOnce(String) -> Result<T, TypeConstraintError>,
) -> Option<T> {
    value.and_then(|v| make(v).ok())
}
