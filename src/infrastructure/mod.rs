//! Infrastructure layer for filesystem and environment interactions.
//!
//! This module provides path handling for files the inbox writes on the host,
//! currently the trace export file.

pub mod paths;

pub use paths::{expand_tilde, expand_tilde_with, get_data_dir, resolve_data_path};
