//! # Application Error Types
//!
//! This module defines common error types used throughout the order extractor.
//! It provides structured error handling for configuration, input loading and
//! the extraction pipeline.

use std::fmt;

/// General application error type for consistent error handling
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Configuration validation errors
    Config(String),
    /// Extraction pipeline errors
    Extraction(String),
    /// File system errors
    FileSystem(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "[CONFIG] {}", msg),
            AppError::Extraction(msg) => write!(f, "[EXTRACTION] {}", msg),
            AppError::FileSystem(msg) => write!(f, "[FILESYSTEM] {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::FileSystem(err.to_string())
    }
}

impl From<crate::extraction_errors::ExtractionError> for AppError {
    fn from(err: crate::extraction_errors::ExtractionError) -> Self {
        AppError::Extraction(err.to_string())
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Standardized error logging utilities for consistent error reporting
pub mod error_logging {
    use tracing::error;

    /// Log extraction failures with document and catalog context
    pub fn log_extraction_error(
        error: &impl std::fmt::Display,
        operation: &str,
        catalog_size: usize,
        document_chars: usize,
    ) {
        error!(
            error = %error,
            operation = %operation,
            catalog_size = %catalog_size,
            document_chars = %document_chars,
            "Order extraction failed"
        );
    }

    /// Log file system errors with path context
    pub fn log_filesystem_error(error: &impl std::fmt::Display, operation: &str, path: Option<&str>) {
        error!(
            error = %error,
            operation = %operation,
            path = ?path,
            "File system operation failed"
        );
    }
}
