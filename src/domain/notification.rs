//! Notification domain model.
//!
//! A [`Notification`] mirrors one row of the remote notifications table. The
//! inbox only ever touches the read-state fields; everything else the backend
//! sends is carried through untouched in [`Notification::payload`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single notification as returned by the remote store.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use inbox_sync::domain::Notification;
///
/// let mut notification = Notification::new("n-1", "user-1", Utc::now());
/// assert!(!notification.is_read);
///
/// notification.mark_read(Utc::now());
/// assert!(notification.is_read);
/// assert!(notification.read_at.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Backend identifier of the notification.
    pub id: String,

    /// Identifier of the user the notification belongs to.
    pub user_id: String,

    /// Whether the user has read the notification.
    #[serde(default)]
    pub is_read: bool,

    /// When the notification was first marked as read, if ever.
    #[serde(default)]
    pub read_at: Option<DateTime<Utc>>,

    /// When the backend created the notification.
    pub created_at: DateTime<Utc>,

    /// Remaining columns of the row (title, body, links, ...), kept verbatim.
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Notification {
    /// Creates an unread notification with an empty payload.
    pub fn new(id: impl Into<String>, user_id: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            is_read: false,
            read_at: None,
            created_at,
            payload: Map::new(),
        }
    }

    /// Adds a payload field, returning the updated notification.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    /// Marks the notification as read.
    ///
    /// An existing `read_at` is preserved; `now` is only used when the
    /// notification has never been read before.
    pub fn mark_read(&mut self, now: DateTime<Utc>) {
        self.is_read = true;
        self.read_at.get_or_insert(now);
    }

    /// Returns the `title` payload field, if it is a string.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.payload.get("title").and_then(Value::as_str)
    }

    /// Returns the body text from the `message` or `body` payload field.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.payload
            .get("message")
            .or_else(|| self.payload.get("body"))
            .and_then(Value::as_str)
    }
}
