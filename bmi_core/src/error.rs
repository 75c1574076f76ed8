//! Error types for the bmi_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for bmi_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Weight or height was rejected before any computation happened
    #[error("Invalid measurement: {0}")]
    InvalidMeasurement(String),

    /// The measurement database could not be opened, written or read
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True for input the user can correct and resubmit
    pub fn is_invalid_measurement(&self) -> bool {
        matches!(self, Error::InvalidMeasurement(_))
    }

    /// True when the store rejected the operation; the caller may retry later
    pub fn is_storage_unavailable(&self) -> bool {
        matches!(self, Error::StorageUnavailable(_))
    }
}

impl From<rusqlite::Error> for Error {
    fn from(e: rusqlite::Error) -> Self {
        Error::StorageUnavailable(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_errors_are_storage_unavailable() {
        let err: Error = rusqlite::Error::InvalidQuery.into();
        assert!(err.is_storage_unavailable());
        assert!(!err.is_invalid_measurement());
    }

    #[test]
    fn test_display_includes_kind() {
        let err = Error::InvalidMeasurement("weight must be positive".into());
        assert_eq!(
            err.to_string(),
            "Invalid measurement: weight must be positive"
        );
    }
}
