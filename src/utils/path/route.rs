//! Slash handling utilities.
//!
//! Provides consistent slash handling for URI paths and segments:
//! - Separator normalization (backslash to forward slash)
//! - Leading/trailing slash removal (a single slash only)

use std::borrow::Cow;

/// Strip a single trailing slash from a path
///
/// # Examples
/// ```
/// use cross_url::remove_trailing_slash;
/// assert_eq!(remove_trailing_slash("/blog/post/"), "/blog/post");
/// assert_eq!(remove_trailing_slash("/blog/post"), "/blog/post");
/// assert_eq!(remove_trailing_slash("a//"), "a/");
/// ```
#[inline]
pub fn remove_trailing_slash(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}

/// Strip a single leading slash from a path
///
/// # Examples
/// ```
/// use cross_url::remove_leading_slash;
/// assert_eq!(remove_leading_slash("/blog/post"), "blog/post");
/// assert_eq!(remove_leading_slash("blog/post"), "blog/post");
/// assert_eq!(remove_leading_slash("/"), "");
/// ```
#[inline]
pub fn remove_leading_slash(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

/// Convert every backslash to a forward slash
///
/// Borrows the input when there is nothing to replace.
#[inline]
pub fn normalize_slashes(path: &str) -> Cow<'_, str> {
    if path.contains('\\') {
        Cow::Owned(path.replace('\\', "/"))
    } else {
        Cow::Borrowed(path)
    }
}

/// Normalize slashes, then strip a single leading slash.
///
/// The trailing slash is left untouched.
///
/// # Examples
/// ```
/// use cross_url::normalize_path;
/// assert_eq!(normalize_path("\\a\\b/"), "a/b/");
/// ```
pub fn normalize_path(path: &str) -> String {
    remove_leading_slash(&normalize_slashes(path)).to_string()
}
