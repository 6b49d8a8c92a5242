//! URI value type for relative-or-absolute resource locators.
//!
//! - Absolute URIs (with a scheme) are backed by [`url::Url`]
//! - Relative references keep their path, query and fragment as written
//!
//! Values are immutable: deriving a new path or query always produces a new [`Uri`].

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Characters escaped in a derived relative path (`?` and `#` would start a new component).
const RELATIVE_PATH: &AsciiSet = &CONTROLS.add(b'?').add(b'#');

/// Characters escaped in a derived relative query.
const RELATIVE_QUERY: &AsciiSet = &CONTROLS.add(b'#');

/// Dummy base used to validate relative references.
static RELATIVE_BASE: LazyLock<Url> = LazyLock::new(|| Url::parse("http://x").unwrap());

/// Parsed URI, either absolute or a relative reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Uri(Repr);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Repr {
    Absolute(Url),
    Relative(RelativeRef),
}

/// Relative reference (no scheme).
///
/// Invariant: `serialized` is `path[?query][#fragment]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RelativeRef {
    path: String,
    query: Option<String>,
    fragment: Option<String>,
    serialized: String,
}

impl RelativeRef {
    fn new(path: &str, query: Option<&str>, fragment: Option<&str>) -> Self {
        let mut serialized = path.to_string();
        if let Some(query) = query {
            serialized.push('?');
            serialized.push_str(query);
        }
        if let Some(fragment) = fragment {
            serialized.push('#');
            serialized.push_str(fragment);
        }

        Self {
            path: path.to_string(),
            query: query.map(str::to_string),
            fragment: fragment.map(str::to_string),
            serialized,
        }
    }

    fn split(text: &str) -> Self {
        let (rest, fragment) = match text.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment)),
            None => (text, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (rest, None),
        };
        Self::new(path, query, fragment)
    }
}

impl Uri {
    /// Parse an absolute URI or a relative reference.
    ///
    /// Text starting with a scheme (`http:`, `mailto:`, ...) must be a valid absolute URI.
    /// Anything else is accepted as a relative reference if it resolves against a base.
    ///
    /// A Windows drive path such as `c:\x` has a one-letter scheme and is parsed as an
    /// absolute URI with scheme `c`, not as a file path.
    pub fn parse(text: &str) -> Result<Self> {
        if has_scheme(text) {
            return Self::parse_absolute(text);
        }

        RELATIVE_BASE
            .join(text)
            .map_err(|source| Error::invalid_uri(text, source))?;

        Ok(Self(Repr::Relative(RelativeRef::split(text))))
    }

    /// Parse an absolute URI only.
    pub fn parse_absolute(text: &str) -> Result<Self> {
        Url::parse(text)
            .map(|url| Self(Repr::Absolute(url)))
            .map_err(|source| Error::invalid_uri(text, source))
    }

    #[inline]
    pub fn is_absolute(&self) -> bool {
        matches!(self.0, Repr::Absolute(_))
    }

    /// Scheme without the trailing `:`; `None` for relative references.
    pub fn scheme(&self) -> Option<&str> {
        match &self.0 {
            Repr::Absolute(url) => Some(url.scheme()),
            Repr::Relative(_) => None,
        }
    }

    /// Authority (`userinfo@host:port`); `None` when the URI has none.
    pub fn authority(&self) -> Option<&str> {
        match &self.0 {
            Repr::Absolute(url) if url.has_authority() => Some(url.authority()),
            _ => None,
        }
    }

    /// Path component as stored (percent-encoded for absolute URIs).
    pub fn path(&self) -> &str {
        match &self.0 {
            Repr::Absolute(url) => url.path(),
            Repr::Relative(rel) => &rel.path,
        }
    }

    /// Query component without the leading `?`.
    pub fn query(&self) -> Option<&str> {
        match &self.0 {
            Repr::Absolute(url) => url.query(),
            Repr::Relative(rel) => rel.query.as_deref(),
        }
    }

    /// Fragment component without the leading `#`.
    pub fn fragment(&self) -> Option<&str> {
        match &self.0 {
            Repr::Absolute(url) => url.fragment(),
            Repr::Relative(rel) => rel.fragment.as_deref(),
        }
    }

    /// Decoded path (percent-encoding removed).
    ///
    /// Falls back to the raw path when the decoded bytes are not valid UTF-8.
    pub fn local_path(&self) -> Cow<'_, str> {
        let path = self.path();
        percent_decode_str(path)
            .decode_utf8()
            .unwrap_or(Cow::Borrowed(path))
    }

    /// Get the serialized URI as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        match &self.0 {
            Repr::Absolute(url) => url.as_str(),
            Repr::Relative(rel) => &rel.serialized,
        }
    }

    /// Underlying [`Url`] for absolute URIs.
    pub fn as_url(&self) -> Option<&Url> {
        match &self.0 {
            Repr::Absolute(url) => Some(url),
            Repr::Relative(_) => None,
        }
    }

    /// Derive a new URI with `path` and, if given, `query` replaced.
    ///
    /// Scheme, authority and fragment are kept. Without a `query` the existing one is kept.
    /// Relative results escape `#` (and `?` in the path) so that `as_str` parses back
    /// into the same components, as `url` does for absolute ones.
    pub fn with_path_and_query(&self, path: &str, query: Option<&str>) -> Self {
        match &self.0 {
            Repr::Absolute(url) => {
                let mut url = url.clone();
                url.set_path(path);
                if query.is_some() {
                    url.set_query(query);
                }
                Self(Repr::Absolute(url))
            }
            Repr::Relative(rel) => {
                let path = utf8_percent_encode(path, RELATIVE_PATH).to_string();
                let query = query.map(|q| utf8_percent_encode(q, RELATIVE_QUERY).to_string());
                Self(Repr::Relative(RelativeRef::new(
                    &path,
                    query.as_deref().or(rel.query.as_deref()),
                    rel.fragment.as_deref(),
                )))
            }
        }
    }
}

/// Create a URI from optional text.
///
/// Returns `Ok(None)` for absent or empty input, otherwise parses relative-or-absolute.
pub fn create_uri(text: Option<&str>) -> Result<Option<Uri>> {
    match text {
        None | Some("") => Ok(None),
        Some(text) => Uri::parse(text).map(Some),
    }
}

/// Check if text starts with a URI scheme (`alpha *( alpha / digit / "+" / "-" / "." ) ":"`).
fn has_scheme(text: &str) -> bool {
    text.find(':').is_some_and(|pos| {
        let scheme = &text[..pos];
        scheme.starts_with(|c: char| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Uri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Uri {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Uri {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<Url> for Uri {
    fn from(url: Url) -> Self {
        Self(Repr::Absolute(url))
    }
}

impl AsRef<str> for Uri {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for Uri {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Uri {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl Serialize for Uri {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.as_str().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Uri {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_absolute_components() {
        let uri = Uri::parse("http://user@host:8080/a/b?x=1#top").unwrap();
        assert!(uri.is_absolute());
        assert_eq!(uri.scheme(), Some("http"));
        assert_eq!(uri.authority(), Some("user@host:8080"));
        assert_eq!(uri.path(), "/a/b");
        assert_eq!(uri.query(), Some("x=1"));
        assert_eq!(uri.fragment(), Some("top"));
    }

    #[test]
    fn test_parse_relative_components() {
        let uri = Uri::parse("docs/guide?v=2#intro").unwrap();
        assert!(!uri.is_absolute());
        assert_eq!(uri.scheme(), None);
        assert_eq!(uri.authority(), None);
        assert_eq!(uri.path(), "docs/guide");
        assert_eq!(uri.query(), Some("v=2"));
        assert_eq!(uri.fragment(), Some("intro"));
        assert_eq!(uri.as_str(), "docs/guide?v=2#intro");
    }

    #[test]
    fn test_parse_relative_with_colon_in_path() {
        // `:` after a `/` is not a scheme delimiter
        let uri = Uri::parse("a/b:c").unwrap();
        assert!(!uri.is_absolute());
        assert_eq!(uri.path(), "a/b:c");
    }

    #[test]
    fn test_parse_invalid_absolute() {
        let err = Uri::parse("http://").unwrap_err();
        assert!(matches!(err, Error::InvalidUri { .. }));
    }

    #[test]
    fn test_parse_invalid_relative() {
        // Network-path reference with a broken IPv6 host
        let err = Uri::parse("//[::1").unwrap_err();
        assert!(matches!(err, Error::InvalidUri { .. }));
    }

    #[test]
    fn test_parse_absolute_rejects_relative() {
        assert!(Uri::parse_absolute("a/b").is_err());
        assert!(Uri::parse_absolute("http://host/a").is_ok());
    }

    #[test]
    fn test_local_path_decodes() {
        let uri = Uri::parse("http://host/a%20b/%E4%B8%AD").unwrap();
        assert_eq!(uri.path(), "/a%20b/%E4%B8%AD");
        assert_eq!(uri.local_path(), "/a b/中");
    }

    #[test]
    fn test_local_path_invalid_utf8() {
        let uri = Uri::parse("http://host/%FF").unwrap();
        assert_eq!(uri.local_path(), "/%FF");
    }

    #[test]
    fn test_with_path_and_query_absolute() {
        let uri = Uri::parse("http://host/a?old=1#frag").unwrap();

        let kept = uri.with_path_and_query("/b", None);
        assert_eq!(kept.as_str(), "http://host/b?old=1#frag");

        let replaced = uri.with_path_and_query("/c", Some("new=2"));
        assert_eq!(replaced.as_str(), "http://host/c?new=2#frag");

        // Source value is untouched
        assert_eq!(uri.as_str(), "http://host/a?old=1#frag");
    }

    #[test]
    fn test_with_path_and_query_relative() {
        let uri = Uri::parse("a?old=1#frag").unwrap();
        assert_eq!(uri.with_path_and_query("a/b", None).as_str(), "a/b?old=1#frag");
        assert_eq!(
            uri.with_path_and_query("a/c", Some("new=2")).as_str(),
            "a/c?new=2#frag"
        );
    }

    #[test]
    fn test_with_path_and_query_relative_escapes_delimiters() {
        let uri = Uri::parse("a#top").unwrap();
        let derived = uri.with_path_and_query("a/b#c?d", Some("x#y"));
        assert_eq!(derived.path(), "a/b%23c%3Fd");
        assert_eq!(derived.query(), Some("x%23y"));
        assert_eq!(derived.fragment(), Some("top"));
        assert_eq!(derived.as_str(), "a/b%23c%3Fd?x%23y#top");
        assert_eq!(Uri::parse(derived.as_str()).unwrap(), derived);
    }

    #[test]
    fn test_parse_windows_drive_path() {
        let uri = create_uri(Some("c:\\x")).unwrap().unwrap();
        assert!(uri.is_absolute());
        assert_eq!(uri.scheme(), Some("c"));
        assert_eq!(uri.path(), "\\x");
    }

    #[test]
    fn test_create_uri() {
        assert_eq!(create_uri(None).unwrap(), None);
        assert_eq!(create_uri(Some("")).unwrap(), None);

        let absolute = create_uri(Some("http://host/")).unwrap().unwrap();
        assert!(absolute.is_absolute());

        let relative = create_uri(Some("a/b")).unwrap().unwrap();
        assert!(!relative.is_absolute());

        assert!(create_uri(Some("http://")).is_err());
    }

    #[test]
    fn test_has_scheme() {
        assert!(has_scheme("https://example.com"));
        assert!(has_scheme("mailto:user@example.com"));
        assert!(has_scheme("svn+ssh://host/repo"));
        assert!(!has_scheme("/about"));
        assert!(!has_scheme("./file.txt"));
        assert!(!has_scheme(":nothing"));
        assert!(!has_scheme("1abc:x"));
    }

    #[test]
    fn test_display_and_eq() {
        let uri = Uri::parse("http://host/a").unwrap();
        assert_eq!(format!("{uri}"), "http://host/a");
        assert_eq!(uri, "http://host/a");
        assert_eq!(uri, Uri::from(Url::parse("http://host/a").unwrap()));
    }

    #[test]
    fn test_from_str() {
        let uri: Uri = "http://host/a".parse().unwrap();
        assert_eq!(uri.path(), "/a");
        assert!("http://".parse::<Uri>().is_err());
        assert!(Uri::try_from(String::from("rel/path")).is_ok());
    }

    #[test]
    fn test_serialize_deserialize() {
        let uri = Uri::parse("http://host/a?x=1").unwrap();
        let json = serde_json::to_string(&uri).unwrap();
        assert_eq!(json, r#""http://host/a?x=1""#);

        let parsed: Uri = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, uri);

        assert!(serde_json::from_str::<Uri>(r#""http://""#).is_err());
    }
}
