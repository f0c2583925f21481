//! Inbox Sync: view-state controller for a per-user notification inbox.
//!
//! The crate keeps a local copy of a user's notifications in step with a remote
//! store and provides:
//! - Fetching the most recent notifications for the signed-in user
//! - Marking one or all notifications as read, with optimistic local updates
//! - Clearing every notification for the user
//! - Busy flags guarding against concurrent bulk actions
//! - Recognition of the backend's `RATE_LIMITED:` error signal

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Controller (app/controller)                        │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Worker Layer  │
//! │ (ui/)         │   │ (storage/)    │   │ (worker/)     │
//! │ - View models │   │ - Store API   │   │ - Store calls │
//! │               │   │ - In-memory   │   │ - IPC protocol│
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error types (domain/error)                       │
//! │  - Notification model (domain/notification)         │
//! │  - Rate-limit classifier (domain/rate_limit)        │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - Structured logging to stderr                     │
//! │  - File-based OTLP export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Inbox state machine with event/action model
//! - [`domain`]: Core domain types (Notification, errors, rate limiting)
//! - [`infrastructure`]: Platform-specific utilities (paths)
//! - [`storage`]: Remote store contract and in-memory implementation
//! - [`worker`]: Worker performing store calls for the state machine
//! - [`ui`]: View models for rendering the inbox
//! - [`observability`]: Tracing subscriber and OTLP file export
//!
//! # Configuration
//!
//! ```toml
//! # inbox.toml
//! limit = 50
//! trace_level = "debug"
//! trace_file = "~/.local/state/inbox-sync/traces.json"
//! ```
//!
//! # Examples
//!
//! ## Controller
//!
//! ```rust
//! use chrono::Utc;
//! use inbox_sync::{initialize, Config, MemoryStore, Notification};
//!
//! let store = MemoryStore::with_rows(vec![
//!     Notification::new("n-1", "user-1", Utc::now()),
//!     Notification::new("n-2", "user-1", Utc::now()),
//! ]);
//! let mut inbox = initialize(&Config::default(), Box::new(store));
//!
//! inbox.set_user(Some("user-1".to_string()))?;
//! inbox.refresh()?;
//! inbox.mark_one("n-1")?;
//! assert_eq!(inbox.unread_count(), 1);
//! # Ok::<(), inbox_sync::InboxError>(())
//! ```
//!
//! ## State machine
//!
//! ```rust
//! use inbox_sync::{handle_event, Action, Event, InboxState};
//!
//! let mut state = InboxState::default();
//! handle_event(&mut state, &Event::SetUser(Some("user-1".to_string())))?;
//!
//! let (_, actions) = handle_event(&mut state, &Event::MarkAll)?;
//! assert!(state.marking_all);
//! assert!(matches!(actions.as_slice(), [Action::PostToWorker(_)]));
//! # Ok::<(), inbox_sync::InboxError>(())
//! ```
//!
//! ## Rate limiting
//!
//! ```rust
//! use inbox_sync::{is_rate_limit_error, rate_limit_message, InboxError};
//!
//! let error = InboxError::Remote("RATE_LIMITED: too fast".to_string());
//! assert!(is_rate_limit_error(Some(&error)));
//! assert_eq!(
//!     rate_limit_message(Some(&error)),
//!     "You\u{2019}re doing that too quickly. Please try again later."
//! );
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, Event, InboxController, InboxState, Toast};
pub use domain::{
    is_rate_limit_error, is_rate_limit_message, rate_limit_message, InboxError, Notification,
    Result,
};
pub use storage::{MemoryStore, NotificationStore};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Inbox configuration.
///
/// Built from a string map with [`Config::from_map`] or from a TOML file with
/// [`Config::from_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of notifications fetched per refresh. Default: 50
    pub limit: usize,

    /// Tracing filter directive used when `RUST_LOG` is unset.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`, or any `EnvFilter`
    /// directive. Default: `"info"`
    pub trace_level: Option<String>,

    /// File receiving OTLP JSON span exports. Export is off when unset.
    ///
    /// Relative paths resolve under [`infrastructure::get_data_dir`].
    pub trace_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            limit: app::DEFAULT_LIMIT,
            trace_level: None,
            trace_file: None,
        }
    }
}

/// On-disk shape of the configuration file; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    limit: Option<usize>,
    trace_level: Option<String>,
    trace_file: Option<String>,
}

impl Config {
    /// Parses configuration from a string map.
    ///
    /// # Parsing Rules
    ///
    /// - `limit`: String → `usize` (falls back to 50 on parse error or zero)
    /// - `trace_level`: String → `Option<String>`
    /// - `trace_file`: String → `Option<String>` with `~` expanded
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use inbox_sync::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("limit".to_string(), "20".to_string());
    /// map.insert("trace_level".to_string(), "debug".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.limit, 20);
    /// assert_eq!(config.trace_level.as_deref(), Some("debug"));
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let limit = config
            .get("limit")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|limit| *limit > 0)
            .unwrap_or(app::DEFAULT_LIMIT);

        Self {
            limit,
            trace_level: config.get("trace_level").cloned(),
            trace_file: config.get("trace_file").map(|path| expand_path(path)),
        }
    }

    /// Loads configuration from a TOML file.
    ///
    /// Missing keys take their defaults; a `limit` of zero falls back to 50.
    ///
    /// # Errors
    ///
    /// Returns [`InboxError::Io`] if the file cannot be read and
    /// [`InboxError::Config`] if it is not valid configuration TOML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let file: ConfigFile = toml::from_str(&contents)
            .map_err(|e| InboxError::Config(format!("{}: {e}", path.display())))?;

        Ok(Self {
            limit: file
                .limit
                .filter(|limit| *limit > 0)
                .unwrap_or(app::DEFAULT_LIMIT),
            trace_level: file.trace_level,
            trace_file: file.trace_file.as_deref().map(expand_path),
        })
    }
}

fn expand_path(path: &str) -> String {
    infrastructure::expand_tilde(path)
        .to_string_lossy()
        .into_owned()
}

/// Creates an inbox controller backed by `store`.
///
/// The controller starts signed out with an empty list; call
/// [`InboxController::set_user`] and then [`InboxController::refresh`].
/// Tracing is not installed here; call [`observability::init_tracing`] once
/// at startup if log output is wanted.
///
/// # Example
///
/// ```rust
/// use inbox_sync::{initialize, Config, MemoryStore};
///
/// let inbox = initialize(&Config::default(), Box::new(MemoryStore::default()));
/// assert!(inbox.notifications().is_empty());
/// assert!(!inbox.loading());
/// ```
#[must_use]
pub fn initialize(config: &Config, store: Box<dyn NotificationStore>) -> InboxController {
    tracing::debug!(limit = config.limit, "initializing inbox controller");
    InboxController::new(store, config.limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn from_map_falls_back_on_bad_limit() {
        assert_eq!(Config::from_map(&map(&[("limit", "abc")])).limit, 50);
        assert_eq!(Config::from_map(&map(&[("limit", "0")])).limit, 50);
        assert_eq!(Config::from_map(&map(&[("limit", " 7 ")])).limit, 7);
        assert_eq!(Config::from_map(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn from_map_keeps_absolute_trace_file() {
        let config = Config::from_map(&map(&[("trace_file", "/tmp/inbox/traces.json")]));
        assert_eq!(config.trace_file.as_deref(), Some("/tmp/inbox/traces.json"));
    }

    #[test]
    fn from_file_reads_all_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "limit = 25\ntrace_level = \"debug\"\ntrace_file = \"/var/tmp/traces.json\""
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();

        assert_eq!(
            config,
            Config {
                limit: 25,
                trace_level: Some("debug".to_string()),
                trace_file: Some("/var/tmp/traces.json".to_string()),
            }
        );
    }

    #[test]
    fn from_file_defaults_missing_keys() {
        let file = tempfile::NamedTempFile::new().unwrap();

        assert_eq!(Config::from_file(file.path()).unwrap(), Config::default());
    }

    #[test]
    fn from_file_rejects_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "limit = \"many\"").unwrap();

        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, InboxError::Config(_)));
    }

    #[test]
    fn from_file_reports_missing_file_as_io() {
        let dir = tempfile::tempdir().unwrap();

        let err = Config::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, InboxError::Io(_)));
    }

    #[test]
    fn initialize_uses_configured_limit() {
        let config = Config {
            limit: 3,
            ..Default::default()
        };

        let inbox = initialize(&config, Box::new(MemoryStore::default()));

        assert_eq!(inbox.state().limit, 3);
        assert!(inbox.notifications().is_empty());
    }
}
