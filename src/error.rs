//! Error types for the kiosk core.
//!
//! The library surfaces one enum so the TUI and the CLI can match on the
//! failures they need to explain to the operator (validation, export state)
//! and bubble everything else up with context.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for kiosk operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Submission ===
    /// A required wizard field is missing or out of range.
    #[error("{field}: {message}")]
    Validation {
        /// Name of the offending field as shown to the participant.
        field: &'static str,
        /// Human-readable explanation.
        message: String,
    },

    // === Persistence ===
    /// A database query failed.
    #[error("database query failed: {0}")]
    Database(#[from] rusqlite::Error),

    /// Failed to open the database file.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Export ===
    /// Another export is still generating.
    #[error("an export is already in progress")]
    ExportInProgress,

    /// The export was requested without any candidate.
    #[error("select at least one badge to print")]
    NothingSelected,

    /// Admin batch exceeded the per-document cap.
    #[error("at most {limit} badges can be printed at once ({requested} selected)")]
    BatchTooLarge {
        /// Configured cap.
        limit: usize,
        /// Number of candidates requested.
        requested: usize,
    },

    /// The referenced record is not in the store.
    #[error("no participant with id {0}")]
    UnknownRecord(String),

    /// Rasterizing a badge failed.
    #[error("failed to rasterize badge for {id}: {message}")]
    Raster {
        /// Record whose badge could not be rasterized.
        id: String,
        /// Description of what went wrong.
        message: String,
    },

    /// Composing the PDF document failed.
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Writing CSV failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // === Configuration ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// A specialized Result type for kiosk operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a validation error for a wizard field.
    #[must_use]
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Create a rasterization error for a record.
    #[must_use]
    pub fn raster(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Raster {
            id: id.into(),
            message: message.into(),
        }
    }

    /// Check if this error came from submission validation.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this error was raised before any export work started.
    #[must_use]
    pub fn is_export_refusal(&self) -> bool {
        matches!(
            self,
            Self::ExportInProgress | Self::NothingSelected | Self::BatchTooLarge { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = Error::validation("Name", "is required");
        assert_eq!(err.to_string(), "Name: is required");
        assert!(err.is_validation());
    }

    #[test]
    fn test_batch_too_large_display() {
        let err = Error::BatchTooLarge {
            limit: 4,
            requested: 6,
        };
        let msg = err.to_string();
        assert!(msg.contains('4'));
        assert!(msg.contains('6'));
        assert!(err.is_export_refusal());
    }

    #[test]
    fn test_raster_error_is_not_refusal() {
        let err = Error::raster("1700000000000", "pixmap alloc failed");
        assert!(!err.is_export_refusal());
        assert!(err.to_string().contains("1700000000000"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }
}
