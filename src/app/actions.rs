//! Actions representing side effects to be executed by the inbox runtime.
//!
//! This module defines the [`Action`] type, which represents imperative commands
//! produced by the event handler. Actions bridge pure state transitions and
//! effectful operations: calling the notification store and showing toasts.
//!
//! # Example
//!
//! ```rust
//! use inbox_sync::app::{Action, Toast};
//! use inbox_sync::worker::WorkerMessage;
//!
//! let actions = vec![
//!     Action::PostToWorker(WorkerMessage::clear_all("user-1".to_string())),
//!     Action::Toast(Toast::error("Something went wrong.")),
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::worker::WorkerMessage;

/// Toast text shown when marking all notifications as read fails.
pub const MARK_ALL_FAILED_MESSAGE: &str = "Unable to mark notifications as read. Please try again.";

/// Toast text shown when clearing all notifications fails.
pub const CLEAR_ALL_FAILED_MESSAGE: &str = "Unable to clear notifications. Please try again.";

/// A transient, user-visible error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Text shown to the user.
    pub message: String,
}

impl Toast {
    /// Creates an error toast.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Commands representing side effects to be executed by the inbox runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Sends a request to the worker that talks to the notification store.
    ///
    /// The worker answers with a response that must be fed back as
    /// [`Event::WorkerResponse`](crate::app::Event::WorkerResponse).
    PostToWorker(WorkerMessage),

    /// Shows a toast to the user.
    Toast(Toast),
}
