//! Error types for split and merge operations.

use std::io;
use thiserror::Error;

/// Errors that can occur while splitting or merging.
///
/// Both kinds abort the current operation. Parts already written stay on disk.
#[derive(Error, Debug)]
pub enum FileSplitError {
    /// Bad or missing configuration or inputs.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A file could not be opened, created, read, written, or parsed.
    #[error("{context}: {source}")]
    Io {
        /// What was being attempted.
        context: String,
        /// The underlying failure.
        #[source]
        source: io::Error,
    },
}

impl FileSplitError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

/// Result type for split and merge operations.
pub type Result<T> = std::result::Result<T, FileSplitError>;

/// Attaches a human-readable context to an `io::Result`, like `anyhow::Context`.
pub trait IoContext<T> {
    fn io_context<C, F>(self, f: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<T> IoContext<T> for io::Result<T> {
    fn io_context<C, F>(self, f: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|source| FileSplitError::Io {
            context: f().into(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_context_wraps_source() {
        let result: io::Result<()> = Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = result.io_context(|| "Could not open part file 'splitted_1.bin'").unwrap_err();

        assert!(err.is_io());
        assert!(!err.is_validation());
        assert_eq!(err.to_string(), "Could not open part file 'splitted_1.bin': gone");
    }

    #[test]
    fn test_validation_message() {
        let err = FileSplitError::validation("File path is required");
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Validation error: File path is required");
    }
}
