//! Error Handling Module
//!
//! This module provides the error taxonomy for the relay: caller input
//! errors, upstream job-API failures, transport/parse failures, and
//! process configuration errors, plus the helpers that decide which
//! message a caller is allowed to see.

use thiserror::Error;

/// Errors that can occur while relaying video generation jobs
#[derive(Error, Debug)]
pub enum RelayError {
    /// Caller input failed validation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Upstream job API answered with a non-success business code
    #[error("Upstream error (code {code}): {message}")]
    UpstreamError {
        /// Business code reported by the upstream envelope
        code: i64,
        /// Upstream-provided message, or the operation's fallback text
        message: String,
    },

    /// Transport-level failure while talking to an HTTP endpoint
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// A required response payload could not be parsed
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Bad process configuration, reported at startup
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl RelayError {
    /// Shorthand for an input validation failure.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// HTTP status this error maps to when surfaced by the API.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::UpstreamError { .. }
            | Self::HttpError(_)
            | Self::ParseError(_)
            | Self::ConfigurationError(_) => 500,
        }
    }

    /// Message that may be shown to a caller.
    ///
    /// Validation and upstream messages pass through verbatim; transport,
    /// parse, and configuration detail stays server-side (it is logged,
    /// not leaked).
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput(message) => message.clone(),
            Self::UpstreamError { message, .. } => message.clone(),
            Self::HttpError(_) | Self::ParseError(_) | Self::ConfigurationError(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(error: reqwest::Error) -> Self {
        Self::HttpError(error.to_string())
    }
}

/// Result type for relay operations
pub type Result<T> = std::result::Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_taxonomy() {
        assert_eq!(RelayError::invalid_input("bad").status_code(), 400);
        assert_eq!(
            RelayError::UpstreamError {
                code: 500,
                message: "boom".to_string()
            }
            .status_code(),
            500
        );
        assert_eq!(RelayError::HttpError("refused".to_string()).status_code(), 500);
    }

    #[test]
    fn internal_detail_is_not_user_visible() {
        let err = RelayError::ParseError("unexpected token at line 3".to_string());
        assert_eq!(err.user_message(), "Internal server error");

        let err = RelayError::UpstreamError {
            code: 402,
            message: "quota exceeded".to_string(),
        };
        assert_eq!(err.user_message(), "quota exceeded");
    }
}
