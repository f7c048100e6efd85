//! Error types for card_catalog

use thiserror::Error;

/// Unified error type for catalog and price-service operations
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (connection refused, DNS, reset, ...)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Service answered with a non-success status
    #[error("HTTP error {status}: {message}")]
    HttpStatus {
        status: reqwest::StatusCode,
        message: String,
    },
    /// Success response did not match the expected payload
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Price service answered but carried no usable quote
    #[error("Price unavailable: {0}")]
    PriceUnavailable(String),
    /// Record rejected before it was sent
    #[error("Invalid card record: {0}")]
    InvalidRecord(String),
}

impl CatalogError {
    /// Status code for rejections, `None` for every other failure class
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            CatalogError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result alias for card_catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
