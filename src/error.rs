//! Error types for the Pokedex core.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Message surfaced for every failed list fetch.
pub const GENERIC_LIST_ERROR: &str = "An error occurred";

/// Message surfaced for a failed detail fetch when the fault carries no text.
pub const GENERIC_DETAIL_ERROR: &str = "Unknown error occurred";

/// Errors that can occur when talking to PokeAPI.
#[derive(Error, Debug)]
pub enum PokeApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Tagged failure returned by repositories.
///
/// Each variant renders as the human-readable message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// A page of the list could not be loaded. Transport details are not kept.
    #[error("{}", GENERIC_LIST_ERROR)]
    ListUnavailable,

    /// A detail record could not be loaded.
    #[error("{0}")]
    DetailUnavailable(String),

    /// A sprite image could not be downloaded.
    #[error("{0}")]
    SpriteUnavailable(String),
}

impl RepositoryError {
    /// Build a detail error from an underlying fault, falling back to a
    /// generic message when the fault has no text.
    pub fn detail(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self::DetailUnavailable(GENERIC_DETAIL_ERROR.to_string())
        } else {
            Self::DetailUnavailable(message)
        }
    }

    /// The message to display for this error.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with PokeApiError
pub type PokeApiResult<T> = Result<T, PokeApiError>;

/// Convenience type alias for Results with RepositoryError
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
