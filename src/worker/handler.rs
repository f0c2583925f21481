//! Worker implementation executing requests against the notification store.
//!
//! The worker owns the [`NotificationStore`] and turns each [`WorkerMessage`]
//! into exactly one store call and one [`WorkerResponse`]. Store errors never
//! escape as `Err`: they are reported as [`WorkerResponse::Error`] so the inbox
//! state machine decides how each failure surfaces.
//!
//! Responses must survive serialization, so an error crosses as its `Display`
//! text only. The variant is lost; the text (including any `RATE_LIMITED:`
//! prefix) is kept.

use crate::domain::error::Result;
use crate::storage::{NotificationStore, StoreOperation};
use crate::worker::{WorkerMessage, WorkerResponse};

/// Executes inbox requests against a notification store.
pub struct InboxWorker {
    store: Box<dyn NotificationStore>,
}

impl InboxWorker {
    /// Creates a worker around `store`.
    #[must_use]
    pub fn new(store: Box<dyn NotificationStore>) -> Self {
        Self { store }
    }

    /// Converts a store result into a response with consistent logging.
    ///
    /// Errors are flattened to their display text.
    fn handle_store_result<T, F>(
        operation: StoreOperation,
        user_id: &str,
        result: Result<T>,
        on_success: F,
    ) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(%operation, user_id = %user_id, "store call succeeded");
                on_success(value)
            }
            Err(e) => {
                tracing::debug!(%operation, user_id = %user_id, error = %e, "store call failed");
                WorkerResponse::Error {
                    operation,
                    user_id: user_id.to_string(),
                    message: e.to_string(),
                }
            }
        }
    }

    fn handle_fetch(&self, user_id: String, limit: usize) -> WorkerResponse {
        let result = self.store.fetch_notifications(&user_id, limit);
        Self::handle_store_result(StoreOperation::Fetch, &user_id, result, |notifications| {
            tracing::debug!(count = notifications.len(), limit, "notifications fetched");
            WorkerResponse::NotificationsFetched {
                user_id: user_id.clone(),
                notifications,
            }
        })
    }

    fn handle_mark_as_read(&mut self, notification_id: String, user_id: String) -> WorkerResponse {
        let result = self
            .store
            .mark_notification_as_read(&notification_id, &user_id);
        Self::handle_store_result(StoreOperation::MarkAsRead, &user_id, result, |()| {
            WorkerResponse::MarkedAsRead {
                user_id: user_id.clone(),
                notification_id,
            }
        })
    }

    fn handle_mark_all_as_read(&mut self, user_id: String) -> WorkerResponse {
        let result = self.store.mark_all_notifications_as_read(&user_id);
        Self::handle_store_result(StoreOperation::MarkAllAsRead, &user_id, result, |success| {
            WorkerResponse::AllMarkedAsRead {
                user_id: user_id.clone(),
                success,
            }
        })
    }

    fn handle_clear_all(&mut self, user_id: String) -> WorkerResponse {
        let result = self.store.clear_all_notifications(&user_id);
        Self::handle_store_result(StoreOperation::ClearAll, &user_id, result, |success| {
            WorkerResponse::AllCleared {
                user_id: user_id.clone(),
                success,
            }
        })
    }

    /// Attaches the parent trace context carried by `message` to this thread.
    ///
    /// Returns a guard that must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }

    /// Processes a worker message and returns the matching response.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let _span = tracing::debug_span!(
            "worker_handle_message",
            operation = %message.operation(),
            user_id = %message.user_id()
        )
        .entered();

        match message {
            WorkerMessage::FetchNotifications { user_id, limit, .. } => {
                self.handle_fetch(user_id, limit)
            }
            WorkerMessage::MarkAsRead {
                notification_id,
                user_id,
                ..
            } => self.handle_mark_as_read(notification_id, user_id),
            WorkerMessage::MarkAllAsRead { user_id, .. } => self.handle_mark_all_as_read(user_id),
            WorkerMessage::ClearAll { user_id, .. } => self.handle_clear_all(user_id),
        }
    }
}

impl std::fmt::Debug for InboxWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InboxWorker").finish_non_exhaustive()
    }
}
