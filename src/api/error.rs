//! Error types for backend calls
//!
//! Every failure a command can hit maps onto one of these variants and
//! is rendered as a single user-visible message at the call site.

use thiserror::Error;

use crate::utils::validate::{FieldError, FieldErrors};

/// Main error type for client operations
#[derive(Debug, Error)]
pub enum ApiError {
    /// Client-side checks failed; no request was issued.
    #[error("{}", field_messages(.0))]
    Validation(FieldErrors),

    /// Terminal authorization failure; the session has been cleared.
    #[error("{0}")]
    Auth(String),

    /// No response received.
    #[error("No response received from server. Please check your connection.")]
    Network(#[source] reqwest::Error),

    /// Non-2xx response from the backend.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Camera permission denied or device unavailable.
    #[error("Could not access webcam: {0}. Please make sure you've granted permission.")]
    MediaAccess(String),
}

impl ApiError {
    /// Single-field validation failure
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        ApiError::Validation(vec![FieldError {
            field,
            message: message.into(),
        }])
    }

    /// Classify a reqwest transport failure (nothing came back)
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        ApiError::Network(err)
    }

    /// Build a ServerError from a non-2xx response, preferring the
    /// body's `message` field when present
    pub(crate) fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                format!(
                    "Error: {} - {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                )
            });

        ApiError::Server {
            status: status.as_u16(),
            message,
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::Validation(errors)
    }
}

fn field_messages(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
