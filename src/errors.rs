/*!
 * Error types for the resjson-sync application.
 *
 * This module contains custom error types for the different parts of the
 * application, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to the translation provider
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// The request never produced a response (DNS, connect, timeout...)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The provider answered with an unexpected status code
    #[error("Provider rejected request: [{status}]: {body}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Response body returned by the provider
        body: String,
    },

    /// A successful response whose body could not be decoded
    #[error("Failed to parse provider response: {0}")]
    ParseError(String),
}

/// Errors raised while reading a local resource file
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResourceError {
    /// The text is not a key-value structure, even with relaxed syntax
    #[error("Malformed resource {origin}: {message}")]
    Malformed {
        /// File path or other description of where the text came from
        origin: String,
        /// Parser message
        message: String,
    },

    /// An annotation key that is not shaped like `_<name>.comment`
    #[error("Invalid annotation key: {0}")]
    InvalidAnnotationKey(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or inconsistent settings, detected before any network call
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The command was invoked in a way that cannot succeed
    #[error("Usage error: {0}")]
    Usage(String),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from resource parsing
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
