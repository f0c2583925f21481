//! Error types for the inbox.
//!
//! This module defines the centralized error type [`InboxError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for inbox operations.
///
/// Consolidates failures reported by the remote notification store, local I/O,
/// and configuration parsing.
///
/// # Examples
///
/// ```
/// use inbox_sync::InboxError;
///
/// let error = InboxError::Remote("RATE_LIMITED: slow down".to_string());
/// assert!(error.is_rate_limited());
/// assert_eq!(error.to_string(), "RATE_LIMITED: slow down");
/// ```
#[derive(Debug, Error)]
pub enum InboxError {
    /// The remote notification store rejected or failed a call.
    ///
    /// The string is the backend's message, kept verbatim so that signals such
    /// as the `RATE_LIMITED:` prefix survive the trip through the worker.
    #[error("{0}")]
    Remote(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    ///
    /// Occurs when a configuration file cannot be parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl InboxError {
    /// Returns `true` if this error carries the backend rate-limit signal.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        super::rate_limit::is_rate_limit_error(Some(self))
    }
}

/// A specialized `Result` type for inbox operations.
///
/// This is a type alias for `std::result::Result<T, InboxError>` that simplifies
/// function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, InboxError>;
