//! Path and URI utilities.
//!
//! Pure functions for path manipulation. No side effects.
//!
//! - [`route`]: Slash handling (`normalize_slashes`, `remove_leading_slash`, `normalize_path`)
//! - [`join`]: Joining segments onto a base URI (`join`, `join_optional`, `join_str`)
//! - [`sanitize`]: Filesystem-safe names (`sanitize_name`, `sanitize_name_for`)

pub mod join;
pub mod route;
pub mod sanitize;

pub use join::{join, join_optional, join_segment, join_str, join_uri, join_uris};
pub use route::{normalize_path, normalize_slashes, remove_leading_slash, remove_trailing_slash};
pub use sanitize::{sanitize_name, sanitize_name_for};
