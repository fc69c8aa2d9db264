//! Error types module
//!
//! All composition failures are unified under the `AnnotateError` enum.
//! Every variant is terminal for the current invocation: no retry, no
//! partial output. Optional text fields are the single exception to the
//! "never swallow" rule and degrade before an error is ever constructed.

use std::io;
use std::path::PathBuf;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like bad caller input
    Debug,
    /// Warning level - for asset/environment problems
    Warn,
    /// Error level - for unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum AnnotateError {
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Overlay asset not found: {0}")]
    AssetNotFound(PathBuf),

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to encode composed image: {0}")]
    Encode(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<image::ImageError> for AnnotateError {
    fn from(err: image::ImageError) -> Self {
        AnnotateError::Decode(err.to_string())
    }
}

impl AnnotateError {
    /// Machine-readable error code (e.g., "DECODE_ERROR")
    pub fn error_code(&self) -> &'static str {
        match self {
            AnnotateError::Decode(_) => "DECODE_ERROR",
            AnnotateError::AssetNotFound(_) => "ASSET_NOT_FOUND",
            AnnotateError::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            AnnotateError::Encode(_) => "ENCODE_ERROR",
            AnnotateError::InvalidInput(_) => "INVALID_INPUT",
            AnnotateError::Io(_) => "IO_ERROR",
        }
    }

    /// Client-facing message (may differ from internal error message)
    pub fn client_message(&self) -> String {
        match self {
            AnnotateError::Decode(_) => {
                "Unable to read the image. Please make sure it is a valid image file.".to_string()
            }
            AnnotateError::AssetNotFound(path) => {
                format!("Overlay asset not found: {}", path.display())
            }
            AnnotateError::UnsupportedFormat(format) => {
                format!("Unsupported image format: {} (expected JPEG or PNG)", format)
            }
            AnnotateError::Encode(_) => "Failed to produce the composed image".to_string(),
            AnnotateError::InvalidInput(msg) => msg.clone(),
            AnnotateError::Io(_) => "Failed to read a required file".to_string(),
        }
    }

    /// Log level for this error
    pub fn log_level(&self) -> LogLevel {
        match self {
            AnnotateError::Decode(_)
            | AnnotateError::UnsupportedFormat(_)
            | AnnotateError::InvalidInput(_) => LogLevel::Debug,
            AnnotateError::AssetNotFound(_) | AnnotateError::Io(_) => LogLevel::Warn,
            AnnotateError::Encode(_) => LogLevel::Error,
        }
    }
}
