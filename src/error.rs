//! Error types for the hue_sort library

use thiserror::Error;

/// Result type alias for hue_sort operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Error types for color extraction and photo organization
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Image file could not be loaded or decoded
    #[error("Failed to decode image: {message}")]
    DecodeFailure {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Too few pixels left after dark-pixel filtering
    #[error("Insufficient usable pixels: {found} (minimum {minimum})")]
    InsufficientPixels { found: usize, minimum: usize },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidInput { parameter: String, value: String },

    /// Filesystem operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be read or parsed
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl AnalysisError {
    /// Create a decode error with context
    pub fn decode<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::DecodeFailure {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an invalid-input error for a named parameter
    pub fn invalid(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidInput {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    /// Check if this error only means "no result for this item"
    ///
    /// Batch callers skip the item and keep going when this is true.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AnalysisError::DecodeFailure { .. } | AnalysisError::InsufficientPixels { .. }
        )
    }

    /// Get user-friendly error description for CLI display
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::DecodeFailure { .. } => {
                "Could not read the image. Check the file format and try again.".to_string()
            }
            AnalysisError::InsufficientPixels { found, minimum } => {
                format!(
                    "Image is too small or too dark ({} usable pixels, need {}).",
                    found, minimum
                )
            }
            AnalysisError::InvalidInput { parameter, .. } => {
                format!("Invalid value for '{}'.", parameter)
            }
            AnalysisError::Config { .. } => {
                "Could not load the configuration file.".to_string()
            }
            AnalysisError::Io { .. } => "A file operation failed.".to_string(),
        }
    }
}
