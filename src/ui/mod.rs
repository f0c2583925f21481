//! UI layer: display-ready projections of the inbox state.
//!
//! - [`viewmodel`]: immutable view model types computed from `InboxState`

pub mod viewmodel;

pub use viewmodel::{DisplayItem, EmptyState, FooterInfo, HeaderInfo, InboxViewModel};
