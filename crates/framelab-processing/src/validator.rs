//! Input validation
//!
//! Structural checks applied before any decoding work is done.

use framelab_core::AnnotateError;

/// Pre-decode validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Empty file")]
    EmptyFile,
}

impl From<ValidationError> for AnnotateError {
    fn from(err: ValidationError) -> Self {
        AnnotateError::InvalidInput(err.to_string())
    }
}

/// Image input validator
#[derive(Debug)]
pub struct ImageValidator {
    max_file_size: usize,
}

impl ImageValidator {
    pub fn new(max_file_size: usize) -> Self {
        Self { max_file_size }
    }

    /// Validate input size before decoding
    pub fn validate_size(&self, size: usize) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }

        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }
}
