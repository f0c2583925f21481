//! Inbox controller driving the event handler against a worker.
//!
//! [`InboxController`] is the entry point UI code talks to. Each public action
//! feeds an [`Event`] into [`handle_event`], executes the resulting actions
//! (worker requests run inline, toasts are queued), and feeds every worker
//! response back in until no work is left.
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use inbox_sync::domain::Notification;
//! use inbox_sync::storage::MemoryStore;
//! use inbox_sync::{initialize, Config};
//!
//! let store = MemoryStore::with_rows(vec![Notification::new("n-1", "user-1", Utc::now())]);
//! let mut inbox = initialize(&Config::default(), Box::new(store));
//!
//! inbox.set_user(Some("user-1".to_string()))?;
//! inbox.refresh()?;
//! assert_eq!(inbox.unread_count(), 1);
//!
//! inbox.mark_all()?;
//! assert_eq!(inbox.unread_count(), 0);
//! assert!(inbox.drain_toasts().is_empty());
//! # Ok::<(), inbox_sync::InboxError>(())
//! ```

use crate::app::{handle_event, Action, Event, InboxState, Toast};
use crate::domain::error::Result;
use crate::domain::Notification;
use crate::storage::NotificationStore;
use crate::ui::InboxViewModel;
use crate::worker::InboxWorker;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;

/// Owns the inbox state and the worker, and runs actions to completion.
#[derive(Debug)]
pub struct InboxController {
    state: InboxState,
    worker: InboxWorker,
    toasts: Vec<Toast>,
}

impl InboxController {
    /// Creates a controller with an empty state fetching `limit` rows at a time.
    #[must_use]
    pub fn new(store: Box<dyn NotificationStore>, limit: usize) -> Self {
        Self {
            state: InboxState::new(limit),
            worker: InboxWorker::new(store),
            toasts: Vec::new(),
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &InboxState {
        &self.state
    }

    /// Returns the notification list.
    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.state.notifications
    }

    /// Returns whether a fetch is in flight.
    #[must_use]
    pub const fn loading(&self) -> bool {
        self.state.loading
    }

    /// Returns whether a mark-all-as-read request is in flight.
    #[must_use]
    pub const fn marking_all(&self) -> bool {
        self.state.marking_all
    }

    /// Returns whether a clear-all request is in flight.
    #[must_use]
    pub const fn clearing_all(&self) -> bool {
        self.state.clearing_all
    }

    /// Returns the number of unread notifications.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.state.unread_count()
    }

    /// Computes the view model at `now`.
    #[must_use]
    pub fn view_model(&self, now: DateTime<Utc>) -> InboxViewModel {
        self.state.compute_viewmodel(now)
    }

    /// Returns and clears the queued toasts, oldest first.
    pub fn drain_toasts(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.toasts)
    }

    /// Sets or clears the signed-in user.
    ///
    /// Returns whether the view changed.
    ///
    /// # Errors
    ///
    /// Never fails today; the signature matches the other actions.
    pub fn set_user(&mut self, user_id: Option<String>) -> Result<bool> {
        self.dispatch(Event::SetUser(user_id))
    }

    /// Reloads the notification list.
    ///
    /// Without a user the list is emptied and no request is made.
    ///
    /// # Errors
    ///
    /// Returns the store error if the fetch fails.
    pub fn refresh(&mut self) -> Result<bool> {
        self.dispatch(Event::Refresh)
    }

    /// Marks one notification as read.
    ///
    /// # Errors
    ///
    /// Returns the store error if the call fails; local state is unchanged.
    pub fn mark_one(&mut self, notification_id: &str) -> Result<bool> {
        self.dispatch(Event::MarkOne(notification_id.to_string()))
    }

    /// Marks every notification as read.
    ///
    /// Failures are reported as toasts, never as errors.
    ///
    /// # Errors
    ///
    /// Never fails; the signature matches the other actions.
    pub fn mark_all(&mut self) -> Result<bool> {
        self.dispatch(Event::MarkAll)
    }

    /// Deletes every notification.
    ///
    /// Failures are reported as toasts, never as errors.
    ///
    /// # Errors
    ///
    /// Never fails; the signature matches the other actions.
    pub fn clear_all(&mut self) -> Result<bool> {
        self.dispatch(Event::ClearAll)
    }

    /// Replaces the notification list without calling the store.
    pub fn set_notifications(&mut self, notifications: Vec<Notification>) {
        self.state.notifications = notifications;
    }

    /// Handles `event` and every event it causes.
    ///
    /// Returns whether any handled event changed the view.
    fn dispatch(&mut self, event: Event) -> Result<bool> {
        let mut pending = VecDeque::from([event]);
        let mut changed = false;

        while let Some(event) = pending.pop_front() {
            let (event_changed, actions) = handle_event(&mut self.state, &event)?;
            changed |= event_changed;

            for action in actions {
                match action {
                    Action::PostToWorker(message) => {
                        let response = self.worker.handle_message(message);
                        pending.push_back(Event::WorkerResponse(response));
                    }
                    Action::Toast(toast) => {
                        tracing::debug!(message = %toast.message, "toast queued");
                        self.toasts.push(toast);
                    }
                }
            }
        }

        Ok(changed)
    }
}
