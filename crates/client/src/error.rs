//! Client error types and user-facing message extraction.

use pasok_shared::AppError;
use serde_json::Value;
use thiserror::Error;

use crate::session::SessionError;

/// Result type alias using `ClientError`.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors raised while talking to the API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response.
    #[error("Could not reach the server: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Api {
        /// HTTP status.
        status: u16,
        /// Extracted message.
        message: String,
    },

    /// The server answered 401; the stored session has been cleared.
    #[error("Session expired: {0}")]
    Unauthorized(String),

    /// The envelope said `success: false`.
    #[error("{0}")]
    Rejected(String),

    /// The body did not match the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// Reading or writing the session file failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Client configuration is unusable.
    #[error("Invalid client configuration: {0}")]
    Config(String),

    /// The request was refused locally (validation, status checks).
    #[error(transparent)]
    Invalid(#[from] AppError),
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Transport(_) | ClientError::Decode(_) => {
                Self::ExternalService(err.to_string())
            }
            ClientError::Api { status, message } => Self::from_status(status, message),
            ClientError::Unauthorized(message) => Self::Unauthorized(message),
            ClientError::Rejected(message) => Self::BusinessRule(message),
            ClientError::Session(_) | ClientError::Config(_) => Self::Internal(err.to_string()),
            ClientError::Invalid(inner) => inner,
        }
    }
}

const MAX_PLAIN_MESSAGE: usize = 200;

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn message_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => non_empty(s),
        Value::Object(map) => map
            .get("message")
            .or_else(|| map.get("msg"))
            .and_then(Value::as_str)
            .and_then(non_empty),
        _ => None,
    }
}

fn first_error(errors: &Value) -> Option<String> {
    match errors {
        Value::Array(items) => items.iter().find_map(message_of),
        Value::Object(fields) => fields.values().find_map(|v| match v {
            Value::Array(items) => items.iter().find_map(message_of),
            other => message_of(other),
        }),
        other => message_of(other),
    }
}

/// Pulls a user-facing message out of an error body.
///
/// Tries JSON `message`, then `error`, then the first entry of `errors`,
/// then a short plain-text body, and finally a generic status message.
#[must_use]
pub fn extract_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => {
            let found = value
                .get("message")
                .and_then(message_of)
                .or_else(|| value.get("error").and_then(message_of))
                .or_else(|| value.get("errors").and_then(first_error));
            if let Some(message) = found {
                return message;
            }
        }
        Err(_) => {
            let trimmed = body.trim();
            if !trimmed.is_empty()
                && trimmed.len() <= MAX_PLAIN_MESSAGE
                && !trimmed.starts_with('<')
            {
                return trimmed.to_string();
            }
        }
    }
    format!("Request failed with status {status}")
}
