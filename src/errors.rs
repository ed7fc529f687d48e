//! # Error Types Module
//!
//! This module defines the error types used by the recipe provider, the
//! translation adapter and the session state. Adapter errors never abort a
//! search: the aggregator logs them and skips the affected unit of work.

use thiserror::Error;

/// Failures raised by the recipe provider adapter
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// Connection or request errors
    #[error("Transport error: {0}")]
    Transport(String),
    /// Request exceeded the configured timeout
    #[error("Timeout error: {0}")]
    Timeout(String),
    /// Non-success HTTP status
    #[error("Unexpected status {status} for {url}")]
    Status { status: u16, url: String },
    /// Body could not be decoded as the expected JSON shape
    #[error("Decode error: {0}")]
    Decode(String),
    /// A required field was absent or empty in a provider record
    #[error("Missing field: {0}")]
    MissingField(&'static str),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout(err.to_string())
        } else if err.is_decode() {
            ProviderError::Decode(err.to_string())
        } else {
            ProviderError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Decode(err.to_string())
    }
}

/// Failures raised by the translation adapter
#[derive(Debug, Clone, Error)]
pub enum TranslationError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Timeout error: {0}")]
    Timeout(String),
    #[error("Unexpected status {0}")]
    Status(u16),
    #[error("Decode error: {0}")]
    Decode(String),
    /// The service answered with a different number of texts than requested
    #[error("Expected {expected} translations, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

impl From<reqwest::Error> for TranslationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TranslationError::Timeout(err.to_string())
        } else if err.is_decode() {
            TranslationError::Decode(err.to_string())
        } else {
            TranslationError::Transport(err.to_string())
        }
    }
}

/// Invalid operations on the session state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(u8),
    #[error("No saved search at index {0}")]
    SavedSearchIndex(usize),
}
