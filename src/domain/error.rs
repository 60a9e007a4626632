//! Error types for the zcatalog plugin.
//!
//! This module defines the centralized error type [`ZcatalogError`] and a type alias
//! [`Result`] for convenient error handling throughout the plugin. Filtering, likes and
//! the countdown have no failure modes; errors come from the edges (fetching and
//! decoding the catalog, loading themes, talking to the worker).

use thiserror::Error;

/// The main error type for zcatalog plugin operations.
///
/// # Examples
///
/// ```
/// use zcatalog::ZcatalogError;
///
/// fn check_limit(limit: u32) -> Result<(), ZcatalogError> {
///     if limit == 0 {
///         return Err(ZcatalogError::Config("request_limit must be positive".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(check_limit(0).is_err());
/// ```
#[derive(Debug, Error)]
pub enum ZcatalogError {
    /// A collection request failed before a usable body arrived.
    ///
    /// Covers non-success HTTP statuses and requests the host refused to make.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// A collection payload could not be decoded.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    ///
    /// The string carries the worker's own description of the failure.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for zcatalog operations.
pub type Result<T> = std::result::Result<T, ZcatalogError>;
