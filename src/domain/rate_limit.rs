//! Detection of the backend rate-limit signal.
//!
//! The backend reports throttling by prefixing an error message with
//! [`RATE_LIMIT_PREFIX`]. Errors reach the client in several shapes (JSON error
//! bodies, [`InboxError`] values, arbitrary `std::error::Error` trait objects),
//! so the classifier works over anything implementing [`MessageSource`].

use super::error::InboxError;
use std::borrow::Cow;

/// Prefix the backend puts on messages of rate-limited requests.
pub const RATE_LIMIT_PREFIX: &str = "RATE_LIMITED:";

/// User-facing text shown when a request was rate limited.
pub const RATE_LIMIT_MESSAGE: &str = "You\u{2019}re doing that too quickly. Please try again later.";

/// A value that may carry a human-readable error message.
///
/// Returning `None` means the value has no string-typed message at all, which
/// is never classified as a rate-limit error.
pub trait MessageSource {
    /// Returns the message carried by this value, if any.
    fn message(&self) -> Option<Cow<'_, str>>;
}

impl MessageSource for serde_json::Value {
    /// Only objects with a string `message` field carry a message.
    fn message(&self) -> Option<Cow<'_, str>> {
        self.as_object()?
            .get("message")?
            .as_str()
            .map(Cow::Borrowed)
    }
}

/// A bare string is not an error object and carries no message. Use
/// [`is_rate_limit_message`] to test raw message text.
impl MessageSource for str {
    fn message(&self) -> Option<Cow<'_, str>> {
        None
    }
}

impl MessageSource for InboxError {
    fn message(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Remote(message) => Some(Cow::Borrowed(message.as_str())),
            other => Some(Cow::Owned(other.to_string())),
        }
    }
}

impl MessageSource for dyn std::error::Error + '_ {
    fn message(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Owned(self.to_string()))
    }
}

impl MessageSource for dyn std::error::Error + Send + Sync + '_ {
    fn message(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Owned(self.to_string()))
    }
}

/// Returns `true` if the message starts with [`RATE_LIMIT_PREFIX`].
#[must_use]
pub fn is_rate_limit_message(message: &str) -> bool {
    message.starts_with(RATE_LIMIT_PREFIX)
}

/// Returns `true` if `error` is present and its message starts with
/// [`RATE_LIMIT_PREFIX`].
///
/// # Examples
///
/// ```
/// use inbox_sync::domain::rate_limit::is_rate_limit_error;
/// use serde_json::json;
///
/// assert!(is_rate_limit_error(Some(&json!({ "message": "RATE_LIMITED: too fast" }))));
/// assert!(!is_rate_limit_error(Some(&json!({ "message": "other" }))));
/// assert!(!is_rate_limit_error(None::<&serde_json::Value>));
/// ```
#[must_use]
pub fn is_rate_limit_error<T>(error: Option<&T>) -> bool
where
    T: MessageSource + ?Sized,
{
    error
        .and_then(|value| value.message())
        .is_some_and(|message| is_rate_limit_message(&message))
}

/// Returns the user-facing message for a failed, possibly rate-limited request.
///
/// The same text is returned whether or not `error` matches the rate-limit
/// signal; callers needing to branch should use [`is_rate_limit_error`].
#[must_use]
pub fn rate_limit_message<T>(error: Option<&T>) -> &'static str
where
    T: MessageSource + ?Sized,
{
    if is_rate_limit_error(error) {
        return RATE_LIMIT_MESSAGE;
    }
    RATE_LIMIT_MESSAGE
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detects_prefixed_message_on_json_object() {
        assert!(is_rate_limit_error(Some(&json!({ "message": "RATE_LIMITED: too fast" }))));
    }

    #[test]
    fn rejects_other_messages() {
        assert!(!is_rate_limit_error(Some(&json!({ "message": "other" }))));
        assert!(!is_rate_limit_error(Some(&json!({ "message": "rate_limited: lowercase" }))));
        assert!(!is_rate_limit_error(Some(&json!({ "message": " RATE_LIMITED: leading space" }))));
    }

    #[test]
    fn rejects_null_and_missing_values() {
        assert!(!is_rate_limit_error(None::<&serde_json::Value>));
        assert!(!is_rate_limit_error(Some(&serde_json::Value::Null)));
        assert!(!is_rate_limit_error(Some(&json!("RATE_LIMITED: bare string"))));
        assert!(!is_rate_limit_error(Some(&json!({ "error": "RATE_LIMITED: x" }))));
    }

    #[test]
    fn rejects_non_string_message_fields() {
        assert!(!is_rate_limit_error(Some(&json!({ "message": 429 }))));
        assert!(!is_rate_limit_error(Some(&json!({ "message": null }))));
        assert!(!is_rate_limit_error(Some(&json!({ "message": ["RATE_LIMITED:"] }))));
    }

    #[test]
    fn detects_error_values() {
        let remote = InboxError::Remote("RATE_LIMITED: x".to_string());
        assert!(is_rate_limit_error(Some(&remote)));
        assert!(remote.is_rate_limited());

        let boxed: Box<dyn std::error::Error + Send + Sync> = "RATE_LIMITED: x".into();
        assert!(is_rate_limit_error(Some(&*boxed)));

        let config = InboxError::Config("RATE_LIMITED: x".to_string());
        assert!(!config.is_rate_limited());
    }

    #[test]
    fn bare_strings_are_not_error_objects() {
        assert!(!is_rate_limit_error(Some("RATE_LIMITED: x")));
        assert_eq!(
            is_rate_limit_error(Some("RATE_LIMITED: x")),
            is_rate_limit_error(Some(&json!("RATE_LIMITED: x")))
        );
        assert!(is_rate_limit_message("RATE_LIMITED: x"));
    }

    #[test]
    fn message_is_identical_for_matching_and_non_matching_input() {
        let matching = json!({ "message": "RATE_LIMITED: too fast" });
        let other = json!({ "message": "other" });

        assert_eq!(rate_limit_message(Some(&matching)), RATE_LIMIT_MESSAGE);
        assert_eq!(rate_limit_message(Some(&other)), RATE_LIMIT_MESSAGE);
        assert_eq!(rate_limit_message(None::<&serde_json::Value>), RATE_LIMIT_MESSAGE);
    }
}
