use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when using the Gemini API client
#[derive(Debug, Error)]
pub enum GeminiError {
    /// HTTP request error
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Non-success status returned by the API; displays the raw response body
    #[error("{}", .0.body)]
    Api(ApiErrorObject),

    /// Configuration error (e.g., missing credentials)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(String),

    /// The model called a function the client does not know
    #[error("Unknown function called by model: {0}")]
    UnknownFunction(String),
}

/// Error details for a non-success HTTP response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiErrorObject {
    /// HTTP status code
    pub status_code: u16,
    /// Raw response body text, unmodified
    pub body: String,
    /// `error.message` from a Gemini error envelope, when present
    #[serde(default)]
    pub message: Option<String>,
    /// `error.status` from a Gemini error envelope (e.g. `NOT_FOUND`), when present
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

impl GeminiError {
    /// Determines if this error is retryable
    ///
    /// Only an HTTP 500 counts as transient; every other status is fatal.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Api(obj) => crate::retry::is_retryable_status(obj.status_code),
            Self::Reqwest(_) | Self::Config(_) | Self::Serde(_) | Self::UnknownFunction(_) => {
                false
            }
        }
    }

    /// Returns the HTTP status code for API errors
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(obj) => Some(obj.status_code),
            _ => None,
        }
    }
}

/// Maps a serde deserialization error to a `GeminiError` with context
#[must_use]
pub fn map_deser(e: &serde_json::Error, body: &[u8]) -> GeminiError {
    let snippet = String::from_utf8_lossy(&body[..body.len().min(400)]).to_string();
    GeminiError::Serde(format!("{e}: {snippet}"))
}

/// Builds an API error from a non-success response
///
/// The raw body is kept verbatim; the Gemini error envelope is parsed when possible.
#[must_use]
pub fn deserialize_api_error(status: StatusCode, body: &[u8]) -> GeminiError {
    let (message, status_name) = match serde_json::from_slice::<ErrorEnvelope>(body) {
        Ok(env) => (env.error.message, env.error.status),
        Err(_) => (None, None),
    };

    GeminiError::Api(ApiErrorObject {
        status_code: status.as_u16(),
        body: String::from_utf8_lossy(body).into_owned(),
        message,
        status: status_name,
    })
}
