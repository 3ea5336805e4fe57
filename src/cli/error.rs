use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::controllers::ApiError;
use crate::session::SessionError;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Session(#[from] SessionError),

    #[error("Failed to load {what}: {message}")]
    #[diagnostic(
        code(activity_hub::cli::fetch_failed),
        help(
            "Is the backend reachable? Pass --api-url or set AHUB_API_URL to point to the correct server."
        )
    )]
    FetchFailed { what: &'static str, message: String },

    #[error("{message}")]
    #[diagnostic(code(activity_hub::cli::action_failed))]
    ActionFailed { message: String },

    #[error("Invalid input: {message}")]
    #[diagnostic(code(activity_hub::cli::invalid_input))]
    InvalidInput { message: String },

    #[error("Failed to read {path}")]
    #[diagnostic(code(activity_hub::cli::read_file))]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid response from API server: {message}")]
    #[diagnostic(
        code(activity_hub::cli::invalid_response),
        help(
            "The server returned data in an unexpected format. This might indicate a version mismatch."
        )
    )]
    InvalidResponse { message: String },
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::InvalidResponse {
            message: e.to_string(),
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
