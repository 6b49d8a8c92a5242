//! Error types.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid URI `{input}`")]
    InvalidUri {
        input: String,
        #[source]
        source: url::ParseError,
    },

    #[error("{0}")]
    InvalidArgument(&'static str),

    #[error("unknown platform `{0}`, expected `unix` or `windows`")]
    UnknownPlatform(String),
}

impl Error {
    pub(crate) fn invalid_uri(input: &str, source: url::ParseError) -> Self {
        Self::InvalidUri {
            input: input.to_string(),
            source,
        }
    }
}
