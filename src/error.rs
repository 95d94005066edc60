//! Error types for rank checking.

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for rank checking operations.
pub type Result<T> = std::result::Result<T, RankError>;

/// Errors that can occur while fetching a results page or ranking it.
#[derive(Error, Debug)]
pub enum RankError {
    /// A required argument or setting is missing or malformed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// HTTP request failed or the provider answered with a non-success status.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The caller cancelled the search before it completed.
    #[error("Search was cancelled")]
    Cancelled,

    /// The extraction pattern does not compile.
    #[error("Invalid lookup pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// URL parsing error.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Settings could not be read or decoded.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RankError {
    /// Returns the HTTP status of a failed provider response, when one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Returns true for errors caused by the caller's input or settings.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}
