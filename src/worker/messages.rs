//! Worker message types for requests against the notification store.
//!
//! This module defines the request and response protocol between the inbox
//! state machine and the worker that performs the remote calls. Every request
//! carries the user id it was issued for, and every response echoes it back so
//! that late responses for a previous user can be recognized. Requests also
//! carry a tracing context so worker spans link to the span that issued them.

use crate::domain::Notification;
use crate::storage::StoreOperation;
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry to maintain
/// trace continuity when passing messages to the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if no OpenTelemetry layer is installed or the current
    /// span context is otherwise invalid.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates constructors for `WorkerMessage` variants.
///
/// Each constructor attaches the current trace context to the message.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    fetch_notifications(FetchNotifications { user_id: String, limit: usize }),
    mark_as_read(MarkAsRead { notification_id: String, user_id: String }),
    mark_all_as_read(MarkAllAsRead { user_id: String }),
    clear_all(ClearAll { user_id: String }),
}

/// Requests sent to the worker.
///
/// Each variant corresponds to one [`NotificationStore`](crate::storage::NotificationStore) call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Fetch the most recent notifications of a user.
    FetchNotifications {
        /// User whose notifications are fetched.
        user_id: String,

        /// Maximum number of notifications to return.
        limit: usize,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Mark one notification as read.
    MarkAsRead {
        /// Notification to mark.
        notification_id: String,

        /// Owner of the notification.
        user_id: String,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Mark every notification of a user as read.
    MarkAllAsRead {
        /// User whose notifications are marked.
        user_id: String,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Delete every notification of a user.
    ClearAll {
        /// User whose notifications are deleted.
        user_id: String,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Returns the store call this message requests.
    #[must_use]
    pub const fn operation(&self) -> StoreOperation {
        match self {
            Self::FetchNotifications { .. } => StoreOperation::Fetch,
            Self::MarkAsRead { .. } => StoreOperation::MarkAsRead,
            Self::MarkAllAsRead { .. } => StoreOperation::MarkAllAsRead,
            Self::ClearAll { .. } => StoreOperation::ClearAll,
        }
    }

    /// Returns the user the request was issued for.
    #[must_use]
    pub fn user_id(&self) -> &str {
        match self {
            Self::FetchNotifications { user_id, .. }
            | Self::MarkAsRead { user_id, .. }
            | Self::MarkAllAsRead { user_id, .. }
            | Self::ClearAll { user_id, .. } => user_id,
        }
    }

    /// Returns the trace context attached to the message, if any.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::FetchNotifications { trace_context, .. }
            | Self::MarkAsRead { trace_context, .. }
            | Self::MarkAllAsRead { trace_context, .. }
            | Self::ClearAll { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Responses sent from the worker back to the inbox.
///
/// Every variant echoes the user id of the request it answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// Notifications were fetched.
    NotificationsFetched {
        /// User the notifications belong to.
        user_id: String,

        /// Fetched notifications in backend order.
        notifications: Vec<Notification>,
    },

    /// A single notification was marked as read.
    MarkedAsRead {
        /// Owner of the notification.
        user_id: String,

        /// Notification that was marked.
        notification_id: String,
    },

    /// The bulk mark-as-read call returned.
    AllMarkedAsRead {
        /// User whose notifications were targeted.
        user_id: String,

        /// Whether the backend accepted the request.
        success: bool,
    },

    /// The clear-all call returned.
    AllCleared {
        /// User whose notifications were targeted.
        user_id: String,

        /// Whether the backend accepted the request.
        success: bool,
    },

    /// A store call failed.
    Error {
        /// Store call that failed.
        operation: StoreOperation,

        /// User the failed request was issued for.
        user_id: String,

        /// Backend error message, verbatim.
        message: String,
    },
}

impl WorkerResponse {
    /// Returns the user the answered request was issued for.
    #[must_use]
    pub fn user_id(&self) -> &str {
        match self {
            Self::NotificationsFetched { user_id, .. }
            | Self::MarkedAsRead { user_id, .. }
            | Self::AllMarkedAsRead { user_id, .. }
            | Self::AllCleared { user_id, .. }
            | Self::Error { user_id, .. } => user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_skip_trace_context_without_otel_layer() {
        let message = WorkerMessage::mark_all_as_read("u-1".to_string());

        assert_eq!(message.trace_context(), None);
        assert_eq!(message.user_id(), "u-1");
        assert_eq!(message.operation(), StoreOperation::MarkAllAsRead);

        let json = serde_json::to_string(&message).unwrap();
        assert!(!json.contains("trace_context"));
    }

    #[test]
    fn messages_survive_serialization_for_cross_thread_delivery() {
        let message = WorkerMessage::MarkAsRead {
            notification_id: "n-1".to_string(),
            user_id: "u-1".to_string(),
            trace_context: Some(TraceContext {
                trace_id: "0af7651916cd43dd8448eb211c80319c".to_string(),
                parent_span_id: "b7ad6b7169203331".to_string(),
            }),
        };

        let json = serde_json::to_string(&message).unwrap();
        let decoded: WorkerMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, message);
    }

    #[test]
    fn error_response_reports_operation_and_user() {
        let response = WorkerResponse::Error {
            operation: StoreOperation::ClearAll,
            user_id: "u-9".to_string(),
            message: "boom".to_string(),
        };

        assert_eq!(response.user_id(), "u-9");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["Error"]["operation"], "ClearAll");
    }
}
