//! Joining path segments onto a base URI.
//!
//! Segments are appended in order with a single `/` between them:
//!
//! ```text
//! http://host/a/  +  ["b\\", "/c", "d?x=1"]  ->  http://host/a/b/c/d?x=1
//! ```
//!
//! - Backslashes in segments become forward slashes
//! - One trailing slash is dropped from the base path and from every segment
//! - Empty segments contribute nothing
//! - A segment that already starts with `/` is not re-prefixed
//! - Everything from the first `?` of the joined path becomes the query,
//!   replacing any query the base had
//!
//! No percent-encoding is applied to segments here.

use log::{debug, trace};

use super::route::{normalize_slashes, remove_trailing_slash};
use crate::core::uri::Uri;
use crate::error::{Error, Result};

/// Join path segments onto `base`.
///
/// Scheme, authority and fragment of `base` are kept.
///
/// # Examples
/// ```
/// use cross_url::{Uri, join};
///
/// let base = Uri::parse("http://host/a").unwrap();
/// assert_eq!(join(&base, ["b", "c"]).path(), "/a/b/c");
/// assert_eq!(join(&base, ["b?x=1"]).query(), Some("x=1"));
/// ```
pub fn join<I, S>(base: &Uri, segments: I) -> Uri
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut joined = remove_trailing_slash(base.path()).to_string();

    for segment in segments {
        let segment = normalize_slashes(segment.as_ref());
        let segment = remove_trailing_slash(&segment);
        if segment.is_empty() {
            continue;
        }

        if !segment.starts_with('/') {
            joined.push('/');
        }
        joined.push_str(segment);
    }

    // First `?` wins, the rest is taken verbatim
    let (path, query) = match joined.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (joined.as_str(), None),
    };
    trace!("[join] {base} -> path={path:?} query={query:?}");

    base.with_path_and_query(path, query)
}

/// Join a single segment onto `base`.
#[inline]
pub fn join_segment(base: &Uri, segment: &str) -> Uri {
    join(base, [segment])
}

/// Join the decoded paths of other URIs onto `base`.
///
/// Only each URI's path is used; their scheme, authority and query are ignored.
pub fn join_uris<'a, I>(base: &Uri, others: I) -> Uri
where
    I: IntoIterator<Item = &'a Uri>,
{
    join(base, others.into_iter().map(Uri::local_path))
}

/// Join the decoded path of `other` onto `base`.
#[inline]
pub fn join_uri(base: &Uri, other: &Uri) -> Uri {
    join_segment(base, &other.local_path())
}

/// Join with an optional base.
///
/// - No base and empty `segment`: [`Error::InvalidArgument`]
/// - No base and `segment` starts with `http`: `segment` is parsed as an absolute URI
/// - No base otherwise: `Ok(None)`
/// - With a base: same as [`join_segment`]
///
/// # Examples
/// ```
/// use cross_url::join_optional;
///
/// let uri = join_optional(None, "http://host/path").unwrap().unwrap();
/// assert_eq!(uri.as_str(), "http://host/path");
/// assert!(join_optional(None, "").is_err());
/// assert!(join_optional(None, "relative").unwrap().is_none());
/// ```
pub fn join_optional(base: Option<&Uri>, segment: &str) -> Result<Option<Uri>> {
    match base {
        None if segment.is_empty() => Err(Error::InvalidArgument(
            "Not possible to create Uri with provided params!",
        )),
        None if segment.starts_with("http") => {
            debug!("[join] no base, parsing {segment:?} as absolute URI");
            Uri::parse_absolute(segment).map(Some)
        }
        None => {
            debug!("[join] no base for relative segment {segment:?}");
            Ok(None)
        }
        Some(base) => Ok(Some(join_segment(base, segment))),
    }
}

/// Parse `base` as an absolute URI, then join `segment` onto it.
pub fn join_str(base: &str, segment: &str) -> Result<Uri> {
    let base = Uri::parse_absolute(base)?;
    Ok(join_segment(&base, segment))
}
