//! Errors raised while talking to the backend.
//!
//! Controllers turn these into error *state*: the `Display` text of each
//! variant is exactly what a list or dialog shows to the user.

use miette::Diagnostic;
use thiserror::Error;

use crate::transport::TransportError;

#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("No access token found")]
    #[diagnostic(
        code(activity_hub::api::missing_token),
        help("Log in first: ahub auth login --email <EMAIL> --password <PASSWORD>")
    )]
    MissingToken,

    /// Non-2xx HTTP status. `message` is the body's message when it has
    /// one, otherwise `HTTP error! status: {status}`.
    #[error("{message}")]
    #[diagnostic(code(activity_hub::api::http_status))]
    Http { status: u16, message: String },

    /// HTTP succeeded but the envelope's `status_code` is not a success code.
    #[error("{message}")]
    #[diagnostic(code(activity_hub::api::application))]
    Application { status_code: u16, message: String },

    #[error("Network error occurred")]
    #[diagnostic(code(activity_hub::api::network))]
    Network {
        #[source]
        source: TransportError,
    },

    #[error("Invalid response from server: {message}")]
    #[diagnostic(
        code(activity_hub::api::invalid_response),
        help("The server returned data in an unexpected format. This might indicate a version mismatch.")
    )]
    InvalidResponse { message: String },
}

impl ApiError {
    /// Builds the HTTP error for a failed status, preferring the body's message.
    pub fn http(status: u16, message: Option<String>) -> Self {
        ApiError::Http {
            status,
            message: message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| format!("HTTP error! status: {}", status)),
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(source: TransportError) -> Self {
        ApiError::Network { source }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::InvalidResponse {
            message: e.to_string(),
        }
    }
}

/// Result type for backend calls.
pub type ApiResult<T> = Result<T, ApiError>;
