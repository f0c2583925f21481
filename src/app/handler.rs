//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes inbox commands and
//! worker responses, translating them into state changes and action sequences.
//!
//! # Architecture
//!
//! 1. A command event arrives (`Refresh`, `MarkOne`, `MarkAll`, `ClearAll`, ...)
//! 2. [`handle_event`] checks the user and busy flags, sets the flag, and emits
//!    [`Action::PostToWorker`]
//! 3. The worker answers; the answer comes back as [`Event::WorkerResponse`]
//! 4. The response clears the flag, applies the result to local state, or
//!    emits [`Action::Toast`] on failure
//!
//! Local read state only changes once the matching response reports success.
//!
//! # Example
//!
//! ```rust
//! use inbox_sync::app::{handle_event, Action, Event, InboxState};
//!
//! let mut state = InboxState::default();
//! state.set_user(Some("user-1".to_string()));
//!
//! let (_, actions) = handle_event(&mut state, &Event::MarkAll)?;
//! assert!(matches!(actions.as_slice(), [Action::PostToWorker(_)]));
//! assert!(state.marking_all);
//!
//! // A second request while the first is in flight is ignored.
//! let (_, actions) = handle_event(&mut state, &Event::MarkAll)?;
//! assert!(actions.is_empty());
//! # Ok::<(), inbox_sync::InboxError>(())
//! ```

use crate::app::actions::{CLEAR_ALL_FAILED_MESSAGE, MARK_ALL_FAILED_MESSAGE};
use crate::app::{Action, InboxState, Toast};
use crate::domain::error::{InboxError, Result};
use crate::domain::rate_limit::is_rate_limit_message;
use crate::domain::Notification;
use crate::storage::StoreOperation;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Commands issued by the UI and responses delivered by the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Sets or clears the signed-in user.
    SetUser(Option<String>),

    /// Reloads the notification list from the store.
    Refresh,

    /// Marks a single notification as read.
    MarkOne(String),

    /// Marks every notification as read.
    MarkAll,

    /// Deletes every notification.
    ClearAll,

    /// Replaces the notification list verbatim, without calling the store.
    SetNotifications(Vec<Notification>),

    /// Wraps a response from the worker.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates inbox state, and returns actions to execute.
///
/// The returned `bool` reports whether the state changed in a way that needs
/// re-rendering.
///
/// # Errors
///
/// Failures of `Refresh` and `MarkOne` are not turned into toasts: their
/// [`WorkerResponse::Error`] is returned as [`InboxError::Remote`] so the
/// caller decides how to surface it. The `loading` flag is cleared first.
pub fn handle_event(state: &mut InboxState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::SetUser(user_id) => Ok((state.set_user(user_id.clone()), vec![])),
        Event::Refresh => {
            let Some(user_id) = state.active_user() else {
                state.notifications.clear();
                return Ok((true, vec![]));
            };

            let message = WorkerMessage::fetch_notifications(user_id.to_string(), state.limit);
            state.loading = true;
            Ok((true, vec![Action::PostToWorker(message)]))
        }
        Event::MarkOne(notification_id) => {
            let Some(user_id) = state.active_user() else {
                tracing::debug!("no user, ignoring mark one");
                return Ok((false, vec![]));
            };

            let message = WorkerMessage::mark_as_read(notification_id.clone(), user_id.to_string());
            Ok((false, vec![Action::PostToWorker(message)]))
        }
        Event::MarkAll => {
            let Some(user_id) = state.active_user() else {
                tracing::debug!("no user, ignoring mark all");
                return Ok((false, vec![]));
            };
            if state.marking_all {
                tracing::debug!("mark all already in progress");
                return Ok((false, vec![]));
            }

            let message = WorkerMessage::mark_all_as_read(user_id.to_string());
            state.marking_all = true;
            Ok((true, vec![Action::PostToWorker(message)]))
        }
        Event::ClearAll => {
            let Some(user_id) = state.active_user() else {
                tracing::debug!("no user, ignoring clear all");
                return Ok((false, vec![]));
            };
            if state.clearing_all {
                tracing::debug!("clear all already in progress");
                return Ok((false, vec![]));
            }

            let message = WorkerMessage::clear_all(user_id.to_string());
            state.clearing_all = true;
            Ok((true, vec![Action::PostToWorker(message)]))
        }
        Event::SetNotifications(notifications) => {
            state.notifications.clone_from(notifications);
            Ok((true, vec![]))
        }
        Event::WorkerResponse(response) => handle_worker_response(state, response),
    }
}

/// Applies a worker response to the state.
///
/// Responses for a user other than the current one never touch the list.
/// Their bulk flags are still cleared; `loading` is left to the current
/// user's fetch, since switching users already reset it.
fn handle_worker_response(
    state: &mut InboxState,
    response: &WorkerResponse,
) -> Result<(bool, Vec<Action>)> {
    let is_current_user = state.active_user() == Some(response.user_id());
    if !is_current_user {
        tracing::debug!(response_user = %response.user_id(), "response for a previous user");
    }

    match response {
        WorkerResponse::NotificationsFetched { notifications, .. } => {
            if !is_current_user {
                return Ok((false, vec![]));
            }
            tracing::debug!(count = notifications.len(), "notifications replaced");
            state.loading = false;
            state.notifications.clone_from(notifications);
            Ok((true, vec![]))
        }
        WorkerResponse::MarkedAsRead {
            notification_id, ..
        } => {
            let changed = is_current_user && state.mark_read(notification_id, chrono::Utc::now());
            Ok((changed, vec![]))
        }
        WorkerResponse::AllMarkedAsRead { success, .. } => {
            state.marking_all = false;
            if !*success {
                return Ok((true, vec![Action::Toast(Toast::error(MARK_ALL_FAILED_MESSAGE))]));
            }
            if is_current_user {
                state.mark_all_read(chrono::Utc::now());
            }
            Ok((true, vec![]))
        }
        WorkerResponse::AllCleared { success, .. } => {
            state.clearing_all = false;
            if !*success {
                return Ok((true, vec![Action::Toast(Toast::error(CLEAR_ALL_FAILED_MESSAGE))]));
            }
            if is_current_user {
                state.notifications.clear();
            }
            Ok((true, vec![]))
        }
        WorkerResponse::Error {
            operation, message, ..
        } => handle_worker_error(state, *operation, message, is_current_user),
    }
}

/// Routes a failed store call.
///
/// Bulk actions report failures through a toast; single-item calls propagate
/// them to the caller as [`InboxError::Remote`] carrying the worker's text,
/// whatever variant the store originally returned.
fn handle_worker_error(
    state: &mut InboxState,
    operation: StoreOperation,
    message: &str,
    is_current_user: bool,
) -> Result<(bool, Vec<Action>)> {
    let rate_limited = is_rate_limit_message(message);

    match operation {
        StoreOperation::Fetch => {
            if is_current_user {
                state.loading = false;
            }
            tracing::debug!(error = %message, rate_limited, "fetch failed");
            Err(InboxError::Remote(message.to_string()))
        }
        StoreOperation::MarkAsRead => {
            tracing::debug!(error = %message, rate_limited, "mark as read failed");
            Err(InboxError::Remote(message.to_string()))
        }
        StoreOperation::MarkAllAsRead => {
            state.marking_all = false;
            tracing::error!(error = %message, rate_limited, "Failed to mark notifications as read");
            Ok((true, vec![Action::Toast(Toast::error(MARK_ALL_FAILED_MESSAGE))]))
        }
        StoreOperation::ClearAll => {
            state.clearing_all = false;
            tracing::error!(error = %message, rate_limited, "Failed to clear notifications");
            Ok((true, vec![Action::Toast(Toast::error(CLEAR_ALL_FAILED_MESSAGE))]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn signed_in() -> InboxState {
        let mut state = InboxState::new(20);
        state.set_user(Some("u-1".to_string()));
        state
    }

    fn notification(id: &str) -> Notification {
        Notification::new(id, "u-1", Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap())
    }

    fn posted(actions: &[Action]) -> Vec<&WorkerMessage> {
        actions
            .iter()
            .filter_map(|action| match action {
                Action::PostToWorker(message) => Some(message),
                Action::Toast(_) => None,
            })
            .collect()
    }

    fn toasts(actions: &[Action]) -> Vec<&str> {
        actions
            .iter()
            .filter_map(|action| match action {
                Action::Toast(toast) => Some(toast.message.as_str()),
                Action::PostToWorker(_) => None,
            })
            .collect()
    }

    #[test]
    fn commands_without_user_make_no_requests() {
        for user_id in [None, Some(String::new())] {
            let mut state = InboxState::default();
            state.user_id = user_id;
            state.notifications = vec![notification("a")];
            let before = state.clone();

            for event in [Event::MarkOne("a".to_string()), Event::MarkAll, Event::ClearAll] {
                let (_, actions) = handle_event(&mut state, &event).unwrap();
                assert!(actions.is_empty(), "{event:?}");
            }
            assert_eq!(state, before);

            let (_, actions) = handle_event(&mut state, &Event::Refresh).unwrap();
            assert!(actions.is_empty());
            assert!(state.notifications.is_empty());
            assert!(!state.loading);
        }
    }

    #[test]
    fn refresh_requests_configured_limit_and_sets_loading() {
        let mut state = signed_in();

        let (_, actions) = handle_event(&mut state, &Event::Refresh).unwrap();

        assert!(state.loading);
        match posted(&actions).as_slice() {
            [WorkerMessage::FetchNotifications { user_id, limit, .. }] => {
                assert_eq!(user_id, "u-1");
                assert_eq!(*limit, 20);
            }
            other => panic!("unexpected requests: {other:?}"),
        }
    }

    #[test]
    fn fetched_notifications_replace_list_in_order() {
        let mut state = signed_in();
        state.notifications = vec![notification("stale")];
        state.loading = true;
        let fetched = vec![notification("c"), notification("a"), notification("b")];

        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::NotificationsFetched {
                user_id: "u-1".to_string(),
                notifications: fetched.clone(),
            }),
        )
        .unwrap();

        assert_eq!(state.notifications, fetched);
        assert!(!state.loading);
    }

    #[test]
    fn fetch_failure_propagates_and_clears_loading() {
        let mut state = signed_in();
        state.loading = true;
        state.notifications = vec![notification("a")];

        let error = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::Error {
                operation: StoreOperation::Fetch,
                user_id: "u-1".to_string(),
                message: "connection reset".to_string(),
            }),
        )
        .unwrap_err();

        assert_eq!(error.to_string(), "connection reset");
        assert!(!state.loading);
        assert_eq!(state.notifications.len(), 1);
    }

    #[test]
    fn mark_one_waits_for_confirmation() {
        let mut state = signed_in();
        let mut read_earlier = notification("b");
        let earlier = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
        read_earlier.read_at = Some(earlier);
        state.notifications = vec![notification("a"), read_earlier, notification("c")];

        let (_, actions) = handle_event(&mut state, &Event::MarkOne("a".to_string())).unwrap();
        assert_eq!(posted(&actions).len(), 1);
        assert!(!state.notifications[0].is_read);

        let (changed, _) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::MarkedAsRead {
                user_id: "u-1".to_string(),
                notification_id: "a".to_string(),
            }),
        )
        .unwrap();
        assert!(changed);
        assert!(state.notifications[0].is_read);
        assert!(state.notifications[0].read_at.is_some());
        assert!(!state.notifications[2].is_read);

        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::MarkedAsRead {
                user_id: "u-1".to_string(),
                notification_id: "b".to_string(),
            }),
        )
        .unwrap();
        assert!(state.notifications[1].is_read);
        assert_eq!(state.notifications[1].read_at, Some(earlier));
    }

    #[test]
    fn mark_one_failure_propagates_without_touching_state() {
        let mut state = signed_in();
        state.notifications = vec![notification("a")];
        let before = state.clone();

        let result = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::Error {
                operation: StoreOperation::MarkAsRead,
                user_id: "u-1".to_string(),
                message: "RATE_LIMITED: slow down".to_string(),
            }),
        );

        assert!(result.unwrap_err().is_rate_limited());
        assert_eq!(state, before);
    }

    #[test]
    fn mark_all_is_not_reentrant() {
        let mut state = signed_in();
        state.notifications = vec![notification("a")];

        let (_, first) = handle_event(&mut state, &Event::MarkAll).unwrap();
        let (changed, second) = handle_event(&mut state, &Event::MarkAll).unwrap();

        assert_eq!(posted(&first).len(), 1);
        assert!(second.is_empty());
        assert!(!changed);
        assert!(state.marking_all);
        assert!(!state.notifications[0].is_read);
    }

    #[test]
    fn mark_all_success_marks_every_notification() {
        let mut state = signed_in();
        let earlier = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
        let mut read_earlier = notification("c");
        read_earlier.is_read = true;
        read_earlier.read_at = Some(earlier);
        state.notifications = vec![notification("a"), notification("b"), read_earlier];
        handle_event(&mut state, &Event::MarkAll).unwrap();

        let (_, actions) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::AllMarkedAsRead {
                user_id: "u-1".to_string(),
                success: true,
            }),
        )
        .unwrap();

        assert!(actions.is_empty());
        assert!(!state.marking_all);
        assert_eq!(state.unread_count(), 0);
        assert!(state.notifications.iter().all(|n| n.read_at.is_some()));
        assert_eq!(state.notifications[2].read_at, Some(earlier));
        assert_ne!(state.notifications[0].read_at, Some(earlier));
    }

    #[test]
    fn mark_all_refusal_toasts_once_and_keeps_list() {
        let mut state = signed_in();
        state.notifications = vec![notification("a")];
        handle_event(&mut state, &Event::MarkAll).unwrap();

        let (_, actions) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::AllMarkedAsRead {
                user_id: "u-1".to_string(),
                success: false,
            }),
        )
        .unwrap();

        assert_eq!(toasts(&actions), vec![MARK_ALL_FAILED_MESSAGE]);
        assert!(!state.marking_all);
        assert!(!state.notifications[0].is_read);
    }

    #[test]
    fn mark_all_error_is_caught_and_toasted() {
        let mut state = signed_in();
        handle_event(&mut state, &Event::MarkAll).unwrap();

        let (_, actions) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::Error {
                operation: StoreOperation::MarkAllAsRead,
                user_id: "u-1".to_string(),
                message: "RATE_LIMITED: slow down".to_string(),
            }),
        )
        .unwrap();

        assert_eq!(toasts(&actions), vec![MARK_ALL_FAILED_MESSAGE]);
        assert!(!state.marking_all);
    }

    #[test]
    fn clear_all_success_empties_list() {
        let mut state = signed_in();
        state.notifications = vec![notification("a"), notification("b")];
        handle_event(&mut state, &Event::ClearAll).unwrap();
        assert!(state.clearing_all);

        let (_, second) = handle_event(&mut state, &Event::ClearAll).unwrap();
        assert!(second.is_empty());

        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::AllCleared {
                user_id: "u-1".to_string(),
                success: true,
            }),
        )
        .unwrap();

        assert!(state.notifications.is_empty());
        assert!(!state.clearing_all);
    }

    #[test]
    fn clear_all_failures_toast_and_keep_list() {
        for response in [
            WorkerResponse::AllCleared {
                user_id: "u-1".to_string(),
                success: false,
            },
            WorkerResponse::Error {
                operation: StoreOperation::ClearAll,
                user_id: "u-1".to_string(),
                message: "boom".to_string(),
            },
        ] {
            let mut state = signed_in();
            state.notifications = vec![notification("a")];
            handle_event(&mut state, &Event::ClearAll).unwrap();

            let (_, actions) = handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();

            assert_eq!(toasts(&actions), vec![CLEAR_ALL_FAILED_MESSAGE]);
            assert_eq!(state.notifications.len(), 1);
            assert!(!state.clearing_all);
        }
    }

    #[test]
    fn responses_for_previous_user_only_clear_flags() {
        let mut state = signed_in();
        handle_event(&mut state, &Event::ClearAll).unwrap();
        handle_event(&mut state, &Event::Refresh).unwrap();
        handle_event(&mut state, &Event::SetUser(Some("u-2".to_string()))).unwrap();
        state.notifications = vec![notification("kept")];

        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::AllCleared {
                user_id: "u-1".to_string(),
                success: true,
            }),
        )
        .unwrap();
        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::NotificationsFetched {
                user_id: "u-1".to_string(),
                notifications: vec![notification("old")],
            }),
        )
        .unwrap();

        assert!(!state.clearing_all);
        assert!(!state.loading);
        assert_eq!(state.notifications.len(), 1);
        assert_eq!(state.notifications[0].id, "kept");
    }

    #[test]
    fn previous_users_fetch_does_not_end_current_fetch() {
        let mut state = signed_in();
        handle_event(&mut state, &Event::Refresh).unwrap();
        handle_event(&mut state, &Event::SetUser(Some("u-2".to_string()))).unwrap();
        handle_event(&mut state, &Event::Refresh).unwrap();
        assert!(state.loading);

        let (changed, _) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::NotificationsFetched {
                user_id: "u-1".to_string(),
                notifications: vec![notification("old")],
            }),
        )
        .unwrap();
        assert!(!changed);
        assert!(state.loading);
        assert!(state.notifications.is_empty());

        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::Error {
                operation: StoreOperation::Fetch,
                user_id: "u-1".to_string(),
                message: "timeout".to_string(),
            }),
        )
        .unwrap_err();
        assert!(state.loading);

        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::NotificationsFetched {
                user_id: "u-2".to_string(),
                notifications: vec![notification("fresh")],
            }),
        )
        .unwrap();
        assert!(!state.loading);
        assert_eq!(state.notifications[0].id, "fresh");
    }

    #[test]
    fn set_notifications_replaces_list_verbatim() {
        let mut state = InboxState::default();
        let list = vec![notification("z"), notification("y")];

        let (changed, actions) =
            handle_event(&mut state, &Event::SetNotifications(list.clone())).unwrap();

        assert!(changed);
        assert!(actions.is_empty());
        assert_eq!(state.notifications, list);
    }
}
