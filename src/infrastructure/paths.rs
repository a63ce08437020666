//! Path helpers for the Zellij sandbox.
//!
//! Inside the sandbox the host filesystem is mounted under `/host`, which is
//! normally the user's home directory.

use std::path::PathBuf;

/// Sandbox mount point of the host filesystem.
pub const HOST_ROOT: &str = "/host";

/// File name of the OTLP trace log inside [`get_data_dir`].
pub const TRACE_FILE_NAME: &str = "zbookfinder-otlp.json";

/// Returns the plugin's data directory, `/host/.local/share/zellij/zbookfinder`.
///
/// # Examples
///
/// ```
/// use zbookfinder::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/zbookfinder"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT).join(".local/share/zellij/zbookfinder")
}

/// Path of the trace log file.
#[must_use]
pub fn trace_file_path() -> PathBuf {
    get_data_dir().join(TRACE_FILE_NAME)
}

/// Maps a leading `~` onto the sandbox host mount.
///
/// # Examples
///
/// ```
/// use zbookfinder::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// assert_eq!(expand_tilde("~user/x"), "~user/x");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => HOST_ROOT.to_string(),
        Some(rest) if rest.starts_with('/') => format!("{HOST_ROOT}{rest}"),
        _ => path.to_string(),
    }
}
