//! Inbox view state and view model computation.
//!
//! This module defines [`InboxState`], the in-memory copy of a user's
//! notification list that the UI renders, together with the busy flags that
//! guard the bulk actions. It is the single source of truth for the UI and is
//! only mutated by the event handler.
//!
//! # State Components
//!
//! - **Notifications**: list in the order the last fetch returned it
//! - **Busy flags**: `loading`, `marking_all`, `clearing_all`
//! - **User**: identity the list belongs to; absent means signed out
//! - **Limit**: maximum number of notifications requested per fetch
//!
//! # Example
//!
//! ```rust
//! use inbox_sync::app::InboxState;
//!
//! let mut state = InboxState::new(50);
//! assert!(state.active_user().is_none());
//!
//! state.set_user(Some("user-1".to_string()));
//! assert_eq!(state.active_user(), Some("user-1"));
//! ```

use crate::domain::Notification;
use crate::ui::viewmodel::{DisplayItem, EmptyState, FooterInfo, HeaderInfo, InboxViewModel};
use chrono::{DateTime, Utc};

/// Default number of notifications requested per fetch.
pub const DEFAULT_LIMIT: usize = 50;

/// In-memory view state of the notification inbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboxState {
    /// Notifications in the order returned by the last fetch.
    ///
    /// Never re-sorted locally. Emptied when the user signs out or changes.
    pub notifications: Vec<Notification>,

    /// Whether a fetch is in flight.
    pub loading: bool,

    /// Whether a mark-all-as-read request is in flight.
    pub marking_all: bool,

    /// Whether a clear-all request is in flight.
    pub clearing_all: bool,

    /// Identity of the signed-in user.
    ///
    /// `None` and the empty string both mean "no user"; see [`Self::active_user`].
    pub user_id: Option<String>,

    /// Maximum number of notifications requested per fetch.
    pub limit: usize,
}

impl Default for InboxState {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

impl InboxState {
    /// Creates an empty state with no user.
    #[must_use]
    pub const fn new(limit: usize) -> Self {
        Self {
            notifications: Vec::new(),
            loading: false,
            marking_all: false,
            clearing_all: false,
            user_id: None,
            limit,
        }
    }

    /// Returns the signed-in user, treating an empty id as absent.
    #[must_use]
    pub fn active_user(&self) -> Option<&str> {
        self.user_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Updates the user identity.
    ///
    /// The list is emptied when the user becomes absent or changes to a
    /// different user, and `loading` is reset because a pending fetch for the
    /// old user no longer applies. The bulk flags are left alone: in-flight
    /// requests still answer and clear them. Returns `true` if anything
    /// changed.
    pub fn set_user(&mut self, user_id: Option<String>) -> bool {
        if self.user_id == user_id {
            return false;
        }

        let previous = self.active_user().map(str::to_owned);
        self.user_id = user_id;

        if self.active_user() != previous.as_deref() {
            tracing::debug!(
                previous_user = ?previous,
                user_id = ?self.active_user(),
                discarded = self.notifications.len(),
                "user changed, discarding notifications"
            );
            self.notifications.clear();
            self.loading = false;
        }
        true
    }

    /// Returns the number of unread notifications.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.is_read).count()
    }

    /// Marks the notification with `id` as read.
    ///
    /// Returns `true` if a matching notification was found.
    pub fn mark_read(&mut self, id: &str, now: DateTime<Utc>) -> bool {
        let mut found = false;
        for notification in self.notifications.iter_mut().filter(|n| n.id == id) {
            notification.mark_read(now);
            found = true;
        }
        found
    }

    /// Marks every notification as read.
    pub fn mark_all_read(&mut self, now: DateTime<Utc>) {
        for notification in &mut self.notifications {
            notification.mark_read(now);
        }
    }

    /// Computes a renderable view model from the current state.
    ///
    /// `now` is used to render relative ages ("5m ago").
    #[must_use]
    pub fn compute_viewmodel(&self, now: DateTime<Utc>) -> InboxViewModel {
        let unread_count = self.unread_count();

        let items = self
            .notifications
            .iter()
            .map(|notification| DisplayItem {
                id: notification.id.clone(),
                title: notification
                    .title()
                    .unwrap_or("Notification")
                    .to_string(),
                body: notification.body().map(str::to_string),
                age: format_age(notification.created_at, now),
                is_unread: !notification.is_read,
            })
            .collect();

        let empty_state = if self.notifications.is_empty() && !self.loading {
            Some(self.compute_empty_state())
        } else {
            None
        };

        InboxViewModel {
            items,
            header: HeaderInfo {
                title: if unread_count == 0 {
                    "Notifications".to_string()
                } else {
                    format!("Notifications ({unread_count} unread)")
                },
                unread_count,
                loading: self.loading,
            },
            footer: self.compute_footer(unread_count),
            empty_state,
        }
    }

    fn compute_empty_state(&self) -> EmptyState {
        if self.active_user().is_none() {
            EmptyState {
                message: "Not signed in".to_string(),
                subtitle: "Sign in to see your notifications.".to_string(),
            }
        } else {
            EmptyState {
                message: "No notifications".to_string(),
                subtitle: "You\u{2019}re all caught up.".to_string(),
            }
        }
    }

    /// Computes footer button labels and availability.
    ///
    /// Buttons are disabled while their own request is in flight and when
    /// there is nothing for them to act on.
    fn compute_footer(&self, unread_count: usize) -> FooterInfo {
        let has_user = self.active_user().is_some();

        FooterInfo {
            mark_all_label: if self.marking_all {
                "Marking\u{2026}".to_string()
            } else {
                "Mark all as read".to_string()
            },
            mark_all_enabled: has_user && !self.marking_all && unread_count > 0,
            clear_all_label: if self.clearing_all {
                "Clearing\u{2026}".to_string()
            } else {
                "Clear all".to_string()
            },
            clear_all_enabled: has_user && !self.clearing_all && !self.notifications.is_empty(),
        }
    }
}

/// Formats the age of a notification relative to `now`.
///
/// Timestamps in the future (clock skew) render as "just now".
fn format_age(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(created_at);

    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes}m ago");
    }

    let hours = elapsed.num_hours();
    if hours < 24 {
        return format!("{hours}h ago");
    }

    format!("{}d ago", elapsed.num_days())
}
