//! Error types for the waymark_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for waymark_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Geolocation denied or the map never initialized
    #[error("location unavailable: map features are disabled for this session")]
    LocationUnavailable,

    /// Form submitted without a preceding map click
    #[error("no location selected: click the map before submitting")]
    NoPendingLocation,

    /// Form validation failure
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Submission validation errors, surfaced to the user as blocking notices.
///
/// Finiteness is checked before sign, so a field that is both missing and
/// negative reports `NonNumeric`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInput {
    #[error("inputs should be numerical: {field}")]
    NonNumeric { field: &'static str },

    #[error("{field} should be positive")]
    Negative { field: &'static str },
}
