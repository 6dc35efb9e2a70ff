//! Reasons a resolution ends without a target

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Why nothing was opened.
///
/// Every variant is handled the same way by callers: do nothing. The distinction exists
/// for logs and machine-readable output.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Unresolved {
    #[error("source is not a local file: {locator}")]
    UnsupportedScheme { locator: String },

    #[error("caret at column {column} is not inside a string")]
    CaretOutsideString { column: usize },

    #[error("string does not look like a relative path: {text:?}")]
    NotRelative { text: String },

    #[error("neither {target:?} nor its parent directory exists")]
    NotFound { target: PathBuf },

    #[error("no entry in {dir:?} starts with {prefix:?}")]
    NoMatchingEntry { dir: PathBuf, prefix: String },
}

impl Unresolved {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Unresolved::UnsupportedScheme { .. } => "unsupported_scheme",
            Unresolved::CaretOutsideString { .. } => "caret_outside_string",
            Unresolved::NotRelative { .. } => "not_relative",
            Unresolved::NotFound { .. } => "not_found",
            Unresolved::NoMatchingEntry { .. } => "no_matching_entry",
        }
    }
}
