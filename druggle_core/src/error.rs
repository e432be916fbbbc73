//! Error types for the druggle_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for druggle_core operations
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

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog validation error
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),

    /// Progress store error
    #[error("Store error: {0}")]
    Store(String),

    /// Rejected guess
    #[error(transparent)]
    Guess(#[from] GuessError),
}

/// User-correctable guess errors.
///
/// Kept separate from [`Error`] so a session can hold the last one as
/// consumer-visible error state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GuessError {
    /// Guess text does not resolve to any catalog record
    #[error("Unknown drug '{name}'. Please pick from suggestions.")]
    UnknownDrug { name: String },
}
