//! Path utilities for locating inbox files on the host.
//!
//! This module resolves the data directory used for trace output and expands
//! `~` in user-supplied paths.

use std::path::{Path, PathBuf};

/// Directory name used under the platform state directory.
const APP_DIR_NAME: &str = "inbox-sync";

/// Returns the home directory from `HOME` (or `USERPROFILE` on Windows).
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Returns the data directory for inbox files.
///
/// Resolution order: `$XDG_STATE_HOME/inbox-sync`, `~/.local/state/inbox-sync`,
/// then `inbox-sync` under the system temp directory when no home is known.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    if let Some(state_home) = std::env::var_os("XDG_STATE_HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(state_home).join(APP_DIR_NAME);
    }

    home_dir().map_or_else(
        || std::env::temp_dir().join(APP_DIR_NAME),
        |home| home.join(".local").join("state").join(APP_DIR_NAME),
    )
}

/// Expands a leading `~` to `home`.
///
/// # Examples
///
/// ```
/// use inbox_sync::infrastructure::expand_tilde_with;
/// use std::path::{Path, PathBuf};
///
/// let home = Path::new("/home/ada");
/// assert_eq!(expand_tilde_with("~/traces.json", home), PathBuf::from("/home/ada/traces.json"));
/// assert_eq!(expand_tilde_with("~", home), PathBuf::from("/home/ada"));
/// assert_eq!(expand_tilde_with("/var/log/x.json", home), PathBuf::from("/var/log/x.json"));
/// ```
#[must_use]
pub fn expand_tilde_with(path: &str, home: &Path) -> PathBuf {
    if path == "~" {
        home.to_path_buf()
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}

/// Expands a leading `~` to the current user's home directory.
///
/// Paths are returned unchanged when no home directory is known.
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    home_dir().map_or_else(|| PathBuf::from(path), |home| expand_tilde_with(path, &home))
}

/// Resolves a configured file path.
///
/// `~` is expanded; relative paths are placed under [`get_data_dir`].
#[must_use]
pub fn resolve_data_path(path: &str) -> PathBuf {
    let expanded = expand_tilde(path);
    if expanded.is_absolute() {
        expanded
    } else {
        get_data_dir().join(expanded)
    }
}
