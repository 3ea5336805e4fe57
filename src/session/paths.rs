//! Path resolution for activity-hub directories.
//!
//! Provides XDG-compliant path resolution.

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "activity-hub";

/// Get XDG-compliant data directory for activity-hub.
///
/// # Returns
/// Path to data directory: `$XDG_DATA_HOME/activity-hub/`, falling back to
/// `~/.local/share/activity-hub/` and to `./.local/share/activity-hub/`
/// when `HOME` is not set either.
pub fn get_data_dir() -> PathBuf {
    let data_home = env::var("XDG_DATA_HOME")
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            env::var("HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(".local/share")
        });

    data_home.join(APP_DIR)
}

/// Get session file path (data_dir/session.json).
pub fn get_session_path() -> PathBuf {
    get_data_dir().join("session.json")
}
