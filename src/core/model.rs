//! Unified Result Model
//!
//! Every command maps its outcome to this model before rendering output.

use serde::{Deserialize, Serialize};

use crate::core::paths::display_path;
use crate::core::tokenizer::QuotedSpan;
use crate::resolve::error::Unresolved;
use crate::resolve::resolver::{Resolved, Strategy};

/// The kind of result item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// A quoted span of the input line
    Span,
    /// A file to open
    Target,
    /// Resolution ended without a target
    Unresolved,
    /// Environment report (doctor)
    Status,
    Error,
}

/// How much to trust a target.
///
/// Exact hits are certain; index and prefix lookups depend on directory listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl From<Strategy> for Confidence {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Exact => Confidence::High,
            Strategy::DirectoryIndex => Confidence::Medium,
            Strategy::Prefix => Confidence::Low,
        }
    }
}

/// Inclusive character-column range within the input line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRange {
    pub start: usize,
    pub end: usize,
}

impl From<&QuotedSpan> for ColumnRange {
    fn from(span: &QuotedSpan) -> Self {
        Self {
            start: span.start_column,
            end: span.end_column,
        }
    }
}

/// Error information for a result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemError {
    pub code: String,
    pub message: String,
}

impl ItemError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// The unified result item that all commands produce
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultItem {
    /// The kind of this result
    pub kind: Kind,

    /// Absolute path of the target, using '/' as separator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Columns of the quoted span this item concerns
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<ColumnRange>,

    /// Span contents, or a human-readable message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// How a target was found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<Strategy>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,

    /// Machine-readable reason for an unresolved item
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Structured payload (doctor details, unresolved context)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    /// Errors (if any)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ItemError>,
}

impl ResultItem {
    fn empty(kind: Kind) -> Self {
        Self {
            kind,
            path: None,
            range: None,
            text: None,
            strategy: None,
            confidence: None,
            reason: None,
            data: None,
            errors: Vec::new(),
        }
    }

    /// Create a span result
    pub fn span(span: &QuotedSpan) -> Self {
        Self {
            range: Some(span.into()),
            text: Some(span.text.clone()),
            ..Self::empty(Kind::Span)
        }
    }

    /// Create a target result
    pub fn target(resolved: &Resolved) -> Self {
        Self {
            path: Some(display_path(&resolved.path)),
            range: Some((&resolved.span).into()),
            text: Some(resolved.span.text.clone()),
            strategy: Some(resolved.strategy),
            confidence: Some(resolved.strategy.into()),
            ..Self::empty(Kind::Target)
        }
    }

    /// Create an unresolved result
    pub fn unresolved(reason: &Unresolved) -> Self {
        Self {
            text: Some(reason.to_string()),
            reason: Some(reason.code().to_string()),
            data: serde_json::to_value(reason).ok(),
            ..Self::empty(Kind::Unresolved)
        }
    }

    /// Create a status result
    pub fn status(message: impl Into<String>) -> Self {
        Self {
            text: Some(message.into()),
            ..Self::empty(Kind::Status)
        }
    }

    /// Create a new error result
    pub fn error(error: ItemError) -> Self {
        Self {
            errors: vec![error],
            ..Self::empty(Kind::Error)
        }
    }

    /// Set structured data payload
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Add an error
    pub fn with_error(mut self, error: ItemError) -> Self {
        self.errors.push(error);
        self
    }
}

/// Result set containing multiple result items
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultSet {
    pub items: Vec<ResultItem>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, item: ResultItem) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl IntoIterator for ResultSet {
    type Item = ResultItem;
    type IntoIter = std::vec::IntoIter<ResultItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl FromIterator<ResultItem> for ResultSet {
    fn from_iter<T: IntoIterator<Item = ResultItem>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
