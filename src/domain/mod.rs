//! Domain layer for the inbox.
//!
//! This module contains the core domain types, independent of how the inbox
//! talks to its backend or renders its state.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`notification`]: Notification record mirrored from the remote store
//! - [`rate_limit`]: Classifier for the backend rate-limit signal

pub mod error;
pub mod notification;
pub mod rate_limit;

pub use error::{InboxError, Result};
pub use notification::Notification;
pub use rate_limit::{
    is_rate_limit_error, is_rate_limit_message, rate_limit_message, MessageSource,
    RATE_LIMIT_MESSAGE, RATE_LIMIT_PREFIX,
};
