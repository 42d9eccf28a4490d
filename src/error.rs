/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 17/10/26
******************************************************************************/

//! Error types for the PostgREST client

use pretty_simple_display::{DebugPretty, DisplaySimple};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// PostgREST-shaped error body
///
/// Every failed request resolves to this shape. JSON error bodies sent by the
/// server are kept as they came in `raw`; anything else is wrapped with
/// `code = 0` and the raw response text as `message`.
#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, PartialEq)]
pub struct ApiError {
    /// Optional hint from the server
    pub hint: Option<Value>,
    /// Optional details from the server
    pub details: Option<Value>,
    /// Error code, `0` when the body was not JSON
    pub code: Value,
    /// Human readable message
    pub message: Value,
    /// The body exactly as parsed from the response
    #[serde(skip)]
    pub raw: Value,
}

impl ApiError {
    /// Wraps a non-JSON response body into the error envelope
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let message = Value::String(text.to_string());
        let raw = serde_json::json!({
            "hint": null,
            "details": null,
            "code": 0,
            "message": text,
        });
        Self {
            hint: None,
            details: None,
            code: Value::from(0),
            message,
            raw,
        }
    }

    /// Builds the error from a response body, falling back to the envelope
    /// when the body does not parse as JSON
    #[must_use]
    pub fn from_body(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => Self::from_value(value),
            Err(_) => Self::from_text(text),
        }
    }

    /// Builds the error from an already parsed JSON body
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        let field = |name: &str| value.get(name).cloned().filter(|v| !v.is_null());
        Self {
            hint: field("hint"),
            details: field("details"),
            code: value.get("code").cloned().unwrap_or(Value::Null),
            message: value.get("message").cloned().unwrap_or(Value::Null),
            raw: value,
        }
    }

    /// Message as plain text, if the server sent a string
    #[must_use]
    pub fn message_str(&self) -> Option<&str> {
        self.message.as_str()
    }
}

/// Main error type for the library
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The server answered with a non-success status
    #[error("api error ({status}): {error}")]
    Api {
        /// Response status
        status: StatusCode,
        /// Parsed or synthesized error body
        error: ApiError,
    },
    /// Transport level failure
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    /// JSON (de)serialization failure
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// A header name or value is not valid HTTP
    #[error("invalid header: {0}")]
    InvalidHeader(String),
    /// Caller supplied input was rejected before sending
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The login response carried no token
    #[error("missing token in authentication response")]
    MissingToken,
    /// The login attempt this caller was waiting on never settled
    #[error("authentication aborted")]
    AuthenticationAborted,
    /// The shared login attempt failed below the HTTP layer
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),
    /// A loader task went away before reporting its result
    #[error("loader task dropped")]
    LoaderDropped,
}

impl AppError {
    /// Status code of an API error, if this is one
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AppError::Api { status, .. } => Some(*status),
            AppError::Network(e) => e.status(),
            _ => None,
        }
    }

    /// Copy of this error for callers sharing one outcome
    ///
    /// API errors and plain variants are reproduced exactly; errors wrapping
    /// non-cloneable sources become [`AppError::AuthenticationFailed`] with
    /// their message.
    #[must_use]
    pub fn duplicate(&self) -> AppError {
        match self {
            AppError::Api { status, error } => AppError::Api {
                status: *status,
                error: error.clone(),
            },
            AppError::InvalidHeader(s) => AppError::InvalidHeader(s.clone()),
            AppError::InvalidInput(s) => AppError::InvalidInput(s.clone()),
            AppError::MissingToken => AppError::MissingToken,
            AppError::AuthenticationAborted => AppError::AuthenticationAborted,
            AppError::AuthenticationFailed(s) => AppError::AuthenticationFailed(s.clone()),
            AppError::LoaderDropped => AppError::LoaderDropped,
            other => AppError::AuthenticationFailed(other.to_string()),
        }
    }

    /// The PostgREST error body of an API error, if this is one
    #[must_use]
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            AppError::Api { error, .. } => Some(error),
            _ => None,
        }
    }
}
