//! Filesystem-safe names.
//!
//! Only the last segment of a path is treated as the name being written to disk.
//! Directory segments are assumed valid and kept as they are.
//!
//! The last segment is rewritten with one `_` for each match of:
//! - invalid characters followed by trailing dots at the end of the name
//!   (or just before a final `\n`, which then becomes a second `_`)
//! - a run of invalid characters
//! - a run of whitespace

use std::sync::LazyLock;

use log::trace;
use regex::{Captures, Regex};

use super::route::normalize_slashes;
use crate::utils::platform::Platform;

static UNIX_PATTERN: LazyLock<Regex> = LazyLock::new(|| build_pattern(Platform::Unix));
static WINDOWS_PATTERN: LazyLock<Regex> = LazyLock::new(|| build_pattern(Platform::Windows));

/// Build `([INV]*\.+(\n?)$)|([INV]+)|\s+` for the platform's invalid set
///
/// Group 2 captures a final newline after the dots: `$` only matches at the very end.
fn build_pattern(platform: Platform) -> Regex {
    let class: String = platform
        .invalid_file_name_chars()
        .iter()
        .map(|c| format!("\\x{{{:X}}}", u32::from(*c)))
        .collect();
    Regex::new(&format!(r"([{class}]*\.+(\n?)$)|([{class}]+)|\s+")).unwrap()
}

/// One `_` for the trailing dots, plus one for a final newline after them.
fn replacement(caps: &Captures<'_>) -> &'static str {
    match caps.get(2) {
        Some(newline) if !newline.is_empty() => "__",
        _ => "_",
    }
}

fn pattern(platform: Platform) -> &'static Regex {
    match platform {
        Platform::Unix => &*UNIX_PATTERN,
        Platform::Windows => &*WINDOWS_PATTERN,
    }
}

/// Sanitize the last segment of `path` for the host platform.
///
/// See [`sanitize_name_for`].
#[inline]
pub fn sanitize_name(path: &str) -> String {
    sanitize_name_for(path, Platform::current())
}

/// Sanitize the last segment of `path` for `platform`.
///
/// Backslashes count as separators, empty segments are dropped, and the result is
/// joined with the platform separator. A path without segments yields `""`.
///
/// # Examples
/// ```
/// use cross_url::{Platform, sanitize_name_for};
///
/// assert_eq!(sanitize_name_for("dir/name?.txt", Platform::Windows), "dir\\name_.txt");
/// assert_eq!(sanitize_name_for("/dir/my file", Platform::Unix), "dir/my_file");
/// ```
pub fn sanitize_name_for(path: &str, platform: Platform) -> String {
    let normalized = normalize_slashes(path);
    let segments: Vec<&str> = normalized.split('/').filter(|s| !s.is_empty()).collect();

    let Some((name, dirs)) = segments.split_last() else {
        return String::new();
    };

    let sanitized = pattern(platform).replace_all(name, replacement);
    if sanitized != *name {
        trace!("[sanitize] {name:?} -> {sanitized:?} ({platform})");
    }

    let separator = platform.separator();
    let mut out = dirs.join(separator);
    if !out.is_empty() {
        out.push_str(separator);
    }
    out.push_str(&sanitized);
    out
}
