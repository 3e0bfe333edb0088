//! Normalized API errors.

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

/// Field name to validation messages, as returned by the server.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Any failed API call, whether the server answered or not.
///
/// Transport failures (connection refused, timeouts) carry status 500.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub status: u16,
    pub message: String,
    pub errors: Option<FieldErrors>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Option<FieldErrors>,
}

impl ApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            errors: None,
        }
    }

    /// Build from a non-success response. The body's `message` wins when
    /// present; otherwise the status decides.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let parsed: ErrorBody = serde_json::from_slice(body).unwrap_or_default();
        let message = parsed
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| default_message(status).to_string());
        Self {
            status,
            message,
            errors: parsed.errors,
        }
    }

    pub fn transport(err: &reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16()).unwrap_or(500);
        let message = if err.is_timeout() {
            "The request timed out. Please try again later.".to_string()
        } else if err.is_connect() {
            default_message(status).to_string()
        } else {
            err.to_string()
        };
        Self::new(status, message)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// Validation messages for one field, empty when there are none.
    pub fn field_errors(&self, field: &str) -> &[String] {
        self.errors
            .as_ref()
            .and_then(|errors| errors.get(field))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// User-facing fallback message for an HTTP status.
pub fn default_message(status: u16) -> &'static str {
    match status {
        400 => "The request was invalid. Please check your input.",
        401 => "You need to be logged in to perform this action.",
        403 => "You don't have permission to access this resource.",
        404 => "The requested resource was not found.",
        422 => "Validation failed. Please check your input.",
        429 => "Too many requests. Please try again later.",
        500 => "An unexpected server error occurred. Please try again later.",
        _ => "An unexpected error occurred. Please try again later.",
    }
}
