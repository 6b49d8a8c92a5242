//! URI and path helpers.
//!
//! - [`join`] and friends: append path segments (and an optional query) to a base [`Uri`]
//! - [`normalize_path`], [`remove_leading_slash`], [`remove_trailing_slash`]: slash predicates
//! - [`sanitize_name`]: make the last segment of a path safe to use as a file name
//!
//! ```
//! use cross_url::{Uri, join};
//!
//! let base = Uri::parse("http://host/api/").unwrap();
//! let uri = join(&base, ["v1", "items?page=2"]);
//! assert_eq!(uri.as_str(), "http://host/api/v1/items?page=2");
//! ```

pub mod core;
pub mod error;
pub mod utils;

pub use crate::core::uri::{Uri, create_uri};
pub use error::{Error, Result};
pub use utils::path::{
    join, join_optional, join_segment, join_str, join_uri, join_uris, normalize_path,
    normalize_slashes, remove_leading_slash, remove_trailing_slash, sanitize_name,
    sanitize_name_for,
};
pub use utils::platform::Platform;
