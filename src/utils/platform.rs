//! Platform filename rules
//!
//! File name restrictions differ between hosts, so they are modeled as an explicit
//! [`Platform`] value. [`Platform::current`] resolves the host at compile time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Characters that may not appear in a Unix file name
const UNIX_INVALID: &[char] = &['\0', '/'];

/// Characters that may not appear in a Windows file name
///
/// `" < > |`, NUL, control characters U+0001..=U+001F, then `: * ? \ /`
const WINDOWS_INVALID: &[char] = &[
    '"', '<', '>', '|', '\0', '\u{1}', '\u{2}', '\u{3}', '\u{4}', '\u{5}', '\u{6}', '\u{7}',
    '\u{8}', '\u{9}', '\u{A}', '\u{B}', '\u{C}', '\u{D}', '\u{E}', '\u{F}', '\u{10}', '\u{11}',
    '\u{12}', '\u{13}', '\u{14}', '\u{15}', '\u{16}', '\u{17}', '\u{18}', '\u{19}', '\u{1A}',
    '\u{1B}', '\u{1C}', '\u{1D}', '\u{1E}', '\u{1F}', ':', '*', '?', '\\', '/',
];

/// Target platform for filename rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Unix,
    Windows,
}

impl Platform {
    /// Host platform (zero runtime overhead)
    pub const fn current() -> Self {
        #[cfg(windows)]
        {
            Self::Windows
        }

        #[cfg(not(windows))]
        {
            Self::Unix
        }
    }

    /// Characters not allowed in a file or directory name
    pub const fn invalid_file_name_chars(self) -> &'static [char] {
        match self {
            Self::Unix => UNIX_INVALID,
            Self::Windows => WINDOWS_INVALID,
        }
    }

    /// Native path separator
    pub const fn separator(self) -> &'static str {
        match self {
            Self::Unix => "/",
            Self::Windows => "\\",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unix => "unix",
            Self::Windows => "windows",
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unix" => Ok(Self::Unix),
            "windows" => Ok(Self::Windows),
            _ => Err(Error::UnknownPlatform(s.to_string())),
        }
    }
}
