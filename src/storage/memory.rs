//! In-process notification store.
//!
//! [`MemoryStore`] keeps rows in a shared vector and behaves like the remote
//! backend from the inbox's point of view. Outcomes can be scripted per
//! operation so callers can exercise refusal and failure paths, and every call
//! is counted.
//!
//! The store is a cheap handle: clones share the same rows, scripts, and
//! counters, so one clone can be boxed into a worker while another is kept
//! for inspection.

use crate::domain::error::{InboxError, Result};
use crate::domain::Notification;
use crate::storage::backend::{NotificationStore, StoreOperation};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Scripted outcome for a store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Outcome {
    /// Bulk operations answer `Ok(false)`; other operations are unaffected.
    Refuse,
    /// The operation fails with `InboxError::Remote(message)`.
    Fail(String),
}

#[derive(Debug, Default)]
struct Inner {
    rows: Vec<Notification>,
    outcomes: HashMap<StoreOperation, Outcome>,
    calls: HashMap<StoreOperation, usize>,
}

impl Inner {
    /// Counts the call and returns the scripted outcome, if any.
    fn begin(&mut self, operation: StoreOperation) -> Option<Outcome> {
        *self.calls.entry(operation).or_insert(0) += 1;
        self.outcomes.get(&operation).cloned()
    }
}

/// Shared, in-memory [`NotificationStore`].
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use inbox_sync::domain::Notification;
/// use inbox_sync::storage::{MemoryStore, NotificationStore, StoreOperation};
///
/// let store = MemoryStore::with_rows(vec![Notification::new("n-1", "u-1", Utc::now())]);
/// let handle = store.clone();
///
/// let rows = store.fetch_notifications("u-1", 10)?;
/// assert_eq!(rows.len(), 1);
/// assert_eq!(handle.calls(StoreOperation::Fetch), 1);
/// # Ok::<(), inbox_sync::InboxError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    /// Creates a store holding `rows`.
    #[must_use]
    pub fn with_rows(rows: Vec<Notification>) -> Self {
        let store = Self::default();
        store.lock().rows = rows;
        store
    }

    /// Makes `operation` report refusal (`Ok(false)`) until reset.
    ///
    /// Only the bulk operations can be refused; scripting a refusal for
    /// [`StoreOperation::Fetch`] or [`StoreOperation::MarkAsRead`] has no effect.
    pub fn refuse(&self, operation: StoreOperation) {
        self.lock().outcomes.insert(operation, Outcome::Refuse);
    }

    /// Makes `operation` fail with `message` until reset.
    pub fn fail(&self, operation: StoreOperation, message: impl Into<String>) {
        self.lock()
            .outcomes
            .insert(operation, Outcome::Fail(message.into()));
    }

    /// Restores normal behavior for `operation`.
    pub fn reset(&self, operation: StoreOperation) {
        self.lock().outcomes.remove(&operation);
    }

    /// Returns how many times `operation` has been called.
    #[must_use]
    pub fn calls(&self, operation: StoreOperation) -> usize {
        self.lock().calls.get(&operation).copied().unwrap_or(0)
    }

    /// Returns a snapshot of every stored row, in insertion order.
    #[must_use]
    pub fn rows(&self) -> Vec<Notification> {
        self.lock().rows.clone()
    }

    /// Appends a row.
    pub fn insert(&self, notification: Notification) {
        self.lock().rows.push(notification);
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NotificationStore for MemoryStore {
    fn fetch_notifications(&self, user_id: &str, limit: usize) -> Result<Vec<Notification>> {
        let mut inner = self.lock();
        if let Some(Outcome::Fail(message)) = inner.begin(StoreOperation::Fetch) {
            return Err(InboxError::Remote(message));
        }

        let mut rows: Vec<Notification> = inner
            .rows
            .iter()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(limit);

        tracing::trace!(user_id = %user_id, count = rows.len(), "memory store fetch");
        Ok(rows)
    }

    fn mark_notification_as_read(&mut self, notification_id: &str, user_id: &str) -> Result<()> {
        let mut inner = self.lock();
        if let Some(Outcome::Fail(message)) = inner.begin(StoreOperation::MarkAsRead) {
            return Err(InboxError::Remote(message));
        }

        let now = chrono::Utc::now();
        inner
            .rows
            .iter_mut()
            .filter(|row| row.id == notification_id && row.user_id == user_id)
            .for_each(|row| row.mark_read(now));
        Ok(())
    }

    fn mark_all_notifications_as_read(&mut self, user_id: &str) -> Result<bool> {
        let mut inner = self.lock();
        match inner.begin(StoreOperation::MarkAllAsRead) {
            Some(Outcome::Fail(message)) => return Err(InboxError::Remote(message)),
            Some(Outcome::Refuse) => return Ok(false),
            None => {}
        }

        let now = chrono::Utc::now();
        inner
            .rows
            .iter_mut()
            .filter(|row| row.user_id == user_id)
            .for_each(|row| row.mark_read(now));
        Ok(true)
    }

    fn clear_all_notifications(&mut self, user_id: &str) -> Result<bool> {
        let mut inner = self.lock();
        match inner.begin(StoreOperation::ClearAll) {
            Some(Outcome::Fail(message)) => return Err(InboxError::Remote(message)),
            Some(Outcome::Refuse) => return Ok(false),
            None => {}
        }

        inner.rows.retain(|row| row.user_id != user_id);
        Ok(true)
    }
}
