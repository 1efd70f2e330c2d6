/*!
 * Error types for the baobao application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The requested model is not installed on the server
    #[error("Model '{model}' not found (available: {available})")]
    ModelNotFound {
        /// Model that was requested
        model: String,
        /// Comma separated list of models the server reported
        available: String,
    },
}

/// Errors that can occur during subtitle processing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubtitleError {
    /// A timestamp field could not be split or parsed
    #[error("Malformed timestamp: '{0}'")]
    MalformedTimestamp(String),

    /// A subtitle block is missing its index, timestamp or text line
    #[error("Malformed subtitle block: {reason}")]
    MalformedBlock {
        /// What was wrong with the block
        reason: String,
    },

    /// A referenced subtitle file does not exist
    #[error("Subtitle file not found: {0:?}")]
    MissingInput(PathBuf),
}

/// Errors that can occur while talking to the speech recognition backend
#[derive(Error, Debug)]
pub enum TranscriptionError {
    /// The audio file does not exist
    #[error("Audio file not found: {0:?}")]
    MissingInput(PathBuf),

    /// No usable recognizer executable was found
    #[error("Speech recognition backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The recognizer process exited unsuccessfully
    #[error("Speech recognition failed: {0}")]
    CommandFailed(String),

    /// The recognizer did not finish in time
    #[error("Speech recognition timed out after {0} seconds")]
    Timeout(u64),

    /// The recognizer output could not be understood
    #[error("Failed to parse recognizer output: {0}")]
    ParseError(String),

    /// I/O error while preparing or reading recognizer files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from transcription
    #[error("Transcription error: {0}")]
    Transcription(#[from] TranscriptionError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
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
