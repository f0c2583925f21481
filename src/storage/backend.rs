//! Notification store abstraction.
//!
//! This module defines the [`NotificationStore`] trait: the remote data-access
//! functions the inbox calls out to. The notifications table and its
//! persistence rules live behind this trait, outside this crate.
//!
//! # Design Philosophy
//!
//! The trait is minimal and maps one method to one inbox action. Bulk methods
//! report acceptance as a `bool` because the backend distinguishes "request
//! refused" (`Ok(false)`) from "request failed" (`Err`).

use crate::domain::error::Result;
use crate::domain::Notification;
use serde::{Deserialize, Serialize};

/// Remote data-access functions for a user's notifications.
///
/// # Implementations
///
/// - [`MemoryStore`](crate::storage::MemoryStore): in-process store for tests
///   and previews
///
/// # Examples
///
/// ```
/// use inbox_sync::storage::{MemoryStore, NotificationStore};
///
/// let mut store = MemoryStore::default();
/// let rows = store.fetch_notifications("user-1", 50)?;
/// assert!(rows.is_empty());
/// assert!(store.clear_all_notifications("user-1")?);
/// # Ok::<(), inbox_sync::InboxError>(())
/// ```
pub trait NotificationStore: Send {
    /// Fetches up to `limit` notifications for a user, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    fn fetch_notifications(&self, user_id: &str, limit: usize) -> Result<Vec<Notification>>;

    /// Marks a single notification as read.
    ///
    /// Success is implied by returning `Ok`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    fn mark_notification_as_read(&mut self, notification_id: &str, user_id: &str) -> Result<()>;

    /// Marks every notification of a user as read.
    ///
    /// Returns `Ok(false)` if the backend refused the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    fn mark_all_notifications_as_read(&mut self, user_id: &str) -> Result<bool>;

    /// Deletes every notification of a user.
    ///
    /// Returns `Ok(false)` if the backend refused the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    fn clear_all_notifications(&mut self, user_id: &str) -> Result<bool>;
}

/// Identifies one of the [`NotificationStore`] calls.
///
/// Used to tag worker errors with the call that produced them and to script
/// outcomes on [`MemoryStore`](crate::storage::MemoryStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoreOperation {
    /// [`NotificationStore::fetch_notifications`]
    Fetch,
    /// [`NotificationStore::mark_notification_as_read`]
    MarkAsRead,
    /// [`NotificationStore::mark_all_notifications_as_read`]
    MarkAllAsRead,
    /// [`NotificationStore::clear_all_notifications`]
    ClearAll,
}

impl std::fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Fetch => "fetch notifications",
            Self::MarkAsRead => "mark notification as read",
            Self::MarkAllAsRead => "mark all notifications as read",
            Self::ClearAll => "clear all notifications",
        };
        f.write_str(name)
    }
}
