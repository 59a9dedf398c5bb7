//! Error types for Playgate
//!
//! This module defines error types using thiserror for ergonomic error handling.
//! Errors are categorized by domain (offer network, metadata API, catalog file,
//! configuration) for better error handling and reporting.

use thiserror::Error;

/// Result type alias using our PlaygateError type
pub type Result<T> = std::result::Result<T, PlaygateError>;

/// Main error type for Playgate
///
/// Each variant includes a descriptive error message and the context needed
/// to decide whether the failure is recoverable.
#[derive(Error, Debug)]
pub enum PlaygateError {
    // ===== Offer network errors =====

    /// The offer feed could not be reached or timed out.
    ///
    /// This is the recoverable error surfaced to the visitor as a retryable
    /// error card; a prior offer list, if any, is left in place.
    #[error("Offer feed unavailable: {message}")]
    FeedUnavailable {
        message: String,
        /// Whether the failure was the fixed request timeout
        timed_out: bool,
    },

    /// Generic API request failure
    #[error("API request failed: {message}")]
    ApiRequestFailed {
        message: String,
        /// HTTP status code if available
        status_code: Option<u16>,
        /// API endpoint that failed
        endpoint: Option<String>,
    },

    /// API returned invalid or unexpected response format
    #[error("Invalid API response: {message}")]
    InvalidApiResponse {
        message: String,
        /// Response body snippet for debugging
        response_body: Option<String>,
    },

    /// Network connectivity error
    #[error("Network error: {message}")]
    NetworkError {
        message: String,
        /// Whether this error might be transient
        is_transient: bool,
    },

    // ===== Catalog file errors =====

    /// Catalog file missing or unreadable
    #[error("Catalog file error: {path}: {message}")]
    CatalogFile {
        path: String,
        message: String,
    },

    // ===== Configuration errors =====

    /// Configuration is invalid or incomplete (missing credentials etc.)
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Required field is missing
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    /// Generic input validation error
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ===== External library errors =====

    /// HTTP client error from reqwest
    #[error("HTTP client error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<std::num::ParseIntError> for PlaygateError {
    fn from(err: std::num::ParseIntError) -> Self {
        PlaygateError::InvalidInput(format!("Failed to parse integer: {}", err))
    }
}

// Helper methods for creating common errors
impl PlaygateError {
    /// Create a FeedUnavailable error for a transport failure
    pub fn feed_unavailable<S: Into<String>>(message: S, timed_out: bool) -> Self {
        PlaygateError::FeedUnavailable {
            message: message.into(),
            timed_out,
        }
    }

    /// Create an ApiRequestFailed error
    pub fn api_failed<S: Into<String>>(
        message: S,
        status_code: Option<u16>,
        endpoint: Option<String>,
    ) -> Self {
        PlaygateError::ApiRequestFailed {
            message: message.into(),
            status_code,
            endpoint,
        }
    }

    /// Create a NetworkError
    pub fn network_error<S: Into<String>>(message: S, is_transient: bool) -> Self {
        PlaygateError::NetworkError {
            message: message.into(),
            is_transient,
        }
    }

    /// Create a ConfigurationError
    pub fn config<S: Into<String>>(message: S) -> Self {
        PlaygateError::ConfigurationError(message.into())
    }

    /// Check if error is recoverable by simply trying again later
    ///
    /// The offer feed and lead-check calls are best-effort: a transport
    /// failure or timeout is expected to clear up on a later attempt.
    /// Configuration and catalog-file errors are not.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PlaygateError::FeedUnavailable { .. }
                | PlaygateError::NetworkError { is_transient: true, .. }
                | PlaygateError::ApiRequestFailed { status_code: Some(500..=599), .. }
        )
    }

    /// Get user-friendly error message suitable for display
    ///
    /// Technical details are omitted; the strings here are what the locker
    /// overlay and the CLI show to end users.
    pub fn user_message(&self) -> String {
        match self {
            PlaygateError::FeedUnavailable { .. } => {
                "Unable to load offers. Please refresh.".to_string()
            }
            PlaygateError::ConfigurationError(message) => {
                format!("Configuration problem: {}. Please check your settings.", message)
            }
            PlaygateError::CatalogFile { path, message } => {
                format!("Could not use catalog file '{}': {}", path, message)
            }
            _ => self.to_string(),
        }
    }
}
