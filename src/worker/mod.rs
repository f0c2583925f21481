//! Worker layer performing the remote notification store calls.
//!
//! The inbox state machine never calls the store directly. It emits
//! [`WorkerMessage`] requests, and the worker answers each with a
//! [`WorkerResponse`]. Messages are serializable and carry trace context, so
//! the worker may run inline, on another thread, or behind a process boundary.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation and message processing logic

pub mod handler;
pub mod messages;

pub use handler::InboxWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
