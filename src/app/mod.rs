//! Application layer coordinating inbox state, events, and actions.
//!
//! This module sits between UI code and the worker/storage layers. It
//! implements the event-driven flow that keeps the local notification list in
//! step with the remote store.
//!
//! # Architecture
//!
//! ```text
//! UI command → Event → handle_event → State mutation → Actions → Side effects
//!                           ↑                                        ↓
//!                           └──────────── Worker responses ──────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`controller`]: Runs events to completion against an inline worker
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`state`]: Inbox view state and view model computation

pub mod actions;
pub mod controller;
pub mod handler;
pub mod state;

pub use actions::{Action, Toast, CLEAR_ALL_FAILED_MESSAGE, MARK_ALL_FAILED_MESSAGE};
pub use controller::InboxController;
pub use handler::{handle_event, Event};
pub use state::{InboxState, DEFAULT_LIMIT};
