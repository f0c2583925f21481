//! Storage layer: the remote notification store seen from the inbox.
//!
//! The notifications table and its persistence rules are owned by a backend
//! outside this crate. This module defines the calls the inbox makes against
//! it and an in-process implementation of those calls.
//!
//! # Modules
//!
//! - `backend`: [`NotificationStore`] trait and [`StoreOperation`] tags
//! - `memory`: shared in-memory store with scripted outcomes

pub mod backend;
pub mod memory;

pub use backend::{NotificationStore, StoreOperation};
pub use memory::MemoryStore;
