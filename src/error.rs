//! Error types for the sales query API

use thiserror::Error;

/// Main error type for the service
#[derive(Error, Debug)]
pub enum Error {
    /// Dataset loading error
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Dataset loader errors
///
/// Every variant is fatal at startup: the dataset is loaded exactly once
/// before the server begins serving, and a file that cannot be located or
/// parsed means the process does not start.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// Underlying CSV read/parse failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A date cell did not parse as a calendar date
    #[error("Invalid date in row {row}: {value:?} is not a valid YYYY-MM-DD date")]
    InvalidDate {
        /// 1-based data row number (header excluded)
        row: usize,
        /// The offending cell contents
        value: String,
    },

    /// An amount cell did not parse as a number
    #[error("Invalid amount in row {row}: {value:?} is not a number")]
    InvalidAmount {
        /// 1-based data row number (header excluded)
        row: usize,
        /// The offending cell contents
        value: String,
    },
}

/// Token verification failures
///
/// Each variant maps to a distinct 403 response at the HTTP boundary; the
/// display strings are the reason-specific messages surfaced to clients.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No bearer token present on the request
    #[error("Not authenticated")]
    MissingToken,

    /// Token is unknown or malformed
    #[error("Invalid token")]
    InvalidToken,

    /// Token was valid once but has expired
    #[error("Expired token")]
    ExpiredToken,

    /// Token was explicitly revoked
    #[error("Revoked token")]
    RevokedToken,

    /// Token belongs to a disabled user
    #[error("User is disabled")]
    UserDisabled,
}

impl AuthError {
    /// Stable label for metrics and structured logs
    pub const fn reason(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "missing",
            AuthError::InvalidToken => "invalid",
            AuthError::ExpiredToken => "expired",
            AuthError::RevokedToken => "revoked",
            AuthError::UserDisabled => "disabled",
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_error_carries_row_context() {
        let err = DatasetError::InvalidDate {
            row: 7,
            value: "2023-13-01".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("row 7"));
        assert!(msg.contains("2023-13-01"));
    }

    #[test]
    fn test_auth_error_messages_are_reason_specific() {
        assert_eq!(AuthError::MissingToken.to_string(), "Not authenticated");
        assert_eq!(AuthError::InvalidToken.to_string(), "Invalid token");
        assert_eq!(AuthError::ExpiredToken.to_string(), "Expired token");
        assert_eq!(AuthError::RevokedToken.to_string(), "Revoked token");
        assert_eq!(AuthError::UserDisabled.to_string(), "User is disabled");
    }

    #[test]
    fn test_error_from_dataset_error() {
        let err: Error = DatasetError::MissingColumn("KeyDate".to_string()).into();
        assert!(err.to_string().contains("KeyDate"));
    }
}
