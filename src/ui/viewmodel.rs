//! View model types representing renderable inbox state.
//!
//! View models are computed from [`InboxState`](crate::app::InboxState) via
//! `compute_viewmodel` and consumed by whatever renders the inbox. They contain
//! no business logic, only display-ready data.
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use inbox_sync::app::InboxState;
//!
//! let vm = InboxState::default().compute_viewmodel(Utc::now());
//! assert!(vm.items.is_empty());
//! assert!(vm.empty_state.is_some());
//! ```

/// Complete inbox view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboxViewModel {
    /// Notifications to display, in list order.
    pub items: Vec<DisplayItem>,

    /// Header information (title, unread badge, spinner).
    pub header: HeaderInfo,

    /// Footer information (bulk action buttons).
    pub footer: FooterInfo,

    /// Optional empty state message (when there is nothing to show).
    pub empty_state: Option<EmptyState>,
}

/// Display information for a single notification row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Notification identifier, passed back to `mark_one` on click.
    pub id: String,

    /// Title text, or a generic fallback when the row has none.
    pub title: String,

    /// Optional body text.
    pub body: Option<String>,

    /// Relative age (e.g. "5m ago").
    pub age: String,

    /// Whether the row should be highlighted as unread.
    pub is_unread: bool,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text, including the unread count when non-zero.
    pub title: String,

    /// Number of unread notifications.
    pub unread_count: usize,

    /// Whether a fetch is in flight.
    pub loading: bool,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Label of the mark-all-as-read button.
    pub mark_all_label: String,

    /// Whether the mark-all-as-read button accepts clicks.
    pub mark_all_enabled: bool,

    /// Label of the clear-all button.
    pub clear_all_label: String,

    /// Whether the clear-all button accepts clicks.
    pub clear_all_enabled: bool,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No notifications").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}
