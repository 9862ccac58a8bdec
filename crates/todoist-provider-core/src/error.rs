//! Error types for the Todoist provider

use thiserror::Error;

/// Result type alias using the provider's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Provider error types with helpful messages and suggestions
#[derive(Error, Debug)]
pub enum Error {
    // Network errors (E100-E199)
    #[error("Network error: {0}. Check your internet connection.")]
    NetworkError(#[from] reqwest::Error),

    #[error("unknown error, status code: {status}, response: {body}")]
    ApiError { status: u16, body: String },

    #[error("Failed to decode response: {source}. Response: {body}")]
    DecodeError {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    #[error("Failed to encode request payload: {0}")]
    EncodeError(#[source] serde_json::Error),

    // Config errors (E600-E699)
    #[error("API token missing. Set `--token` or the TODOIST_TOKEN environment variable.")]
    MissingToken,

    #[error("missing project id")]
    MissingProjectId,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    // Input errors (E800-E899)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Generic errors
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Get error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            Self::NetworkError(_) => "E100",
            Self::ApiError { .. } => "E101",
            Self::DecodeError { .. } => "E102",
            Self::EncodeError(_) => "E103",
            Self::MissingToken => "E600",
            Self::MissingProjectId => "E601",
            Self::ConfigError(_) => "E602",
            Self::InvalidInput(_) => "E800",
            Self::Other(_) | Self::Io(_) => "E9999",
        }
    }

    /// Get suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::NetworkError(_) => Some("Check internet connection".to_string()),
            Self::MissingToken => Some("export TODOIST_TOKEN=<your api token>".to_string()),
            Self::ConfigError(_) => Some("todoist-provider config list".to_string()),
            Self::ApiError { status: 401 | 403, .. } => {
                Some("Verify the API token in the Todoist integrations settings".to_string())
            }
            _ => None,
        }
    }

    /// HTTP status code carried by an API error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body carried by API and decode errors
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::ApiError { body, .. } | Self::DecodeError { body, .. } => Some(body),
            _ => None,
        }
    }
}
