/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Registration and login
/// - `tags`: Tag list/detail/create
/// - `tasks`: Task list/detail/create

pub mod auth;
pub mod health;
pub mod tags;
pub mod tasks;

use crate::error::ApiError;

/// Extracts a required string field from a request body
///
/// Surrounding whitespace is trimmed; a missing or blank value is a
/// validation failure.
pub(crate) fn require_field<'a>(
    value: &'a Option<String>,
    name: &str,
) -> Result<&'a str, ApiError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::missing_field(name))
}
