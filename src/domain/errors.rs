//! Domain error types
//!
//! This module defines the error hierarchy for Carta. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Carta error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum CartaError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Catalog API errors (authentication, fetch, pagination)
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Record transformation errors
    #[error("Transform error for asset {asset_id}: {message}")]
    Transform { asset_id: String, message: String },

    /// Output writer errors
    #[error("Output error: {0}")]
    Output(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Catalog-specific errors
///
/// Errors that occur when interacting with the governance catalog's
/// OAuth and GraphQL endpoints. These errors don't expose third-party
/// HTTP client types.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Credential exchange rejected or token refresh failed twice
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Failed to reach the catalog endpoint
    #[error("Failed to connect to catalog: {0}")]
    ConnectionFailed(String),

    /// Server error (5xx), retries exhausted
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// GraphQL query rejected or returned errors
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Response body could not be parsed into the expected shape
    #[error("Invalid response from catalog: {0}")]
    InvalidResponse(String),

    /// The run was interrupted by an external stop signal
    #[error("Operation cancelled by shutdown signal")]
    Cancelled,
}

impl CatalogError {
    /// Whether the error came from the shutdown signal rather than the API
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CatalogError::Cancelled)
    }
}

impl CartaError {
    /// Whether this error was caused by the shutdown signal
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CartaError::Catalog(e) if e.is_cancelled())
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for CartaError {
    fn from(err: std::io::Error) -> Self {
        CartaError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for CartaError {
    fn from(err: serde_json::Error) -> Self {
        CartaError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for CartaError {
    fn from(err: toml::de::Error) -> Self {
        CartaError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from csv writer errors
impl From<csv::Error> for CartaError {
    fn from(err: csv::Error) -> Self {
        CartaError::Output(err.to_string())
    }
}
