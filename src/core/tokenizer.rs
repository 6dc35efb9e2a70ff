//! Line tokenizer - Splits one line of text into quoted-string spans
//!
//! Single and double quotes both delimit strings. A quote of the other kind inside an
//! open string is ordinary content, so `"it's"` yields `it's`. Text outside strings is
//! discarded and a string left open at end of line produces nothing.
//!
//! Usage:
//! ```rust
//! use reljump::core::tokenizer::tokenize;
//!
//! let spans = tokenize(r#"import x from "./x.js""#);
//! assert_eq!(spans.len(), 1);
//! assert_eq!(spans[0].text, "./x.js");
//! assert_eq!(spans[0].start_column, 15);
//! ```

use serde::{Deserialize, Serialize};

/// A closed quoted region of a line.
///
/// Columns are 0-based character offsets. `start_column` is the first character after
/// the opening quote and `end_column` the last character before the closing quote, both
/// inclusive. For an empty literal `end_column + 1 == start_column`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotedSpan {
    /// Contents with the delimiters stripped
    pub text: String,
    pub start_column: usize,
    pub end_column: usize,
}

impl QuotedSpan {
    /// Whether the literal has no content
    pub fn is_empty(&self) -> bool {
        self.end_column + 1 == self.start_column
    }

    /// Whether a caret at `column` sits inside this span.
    ///
    /// Both endpoints count as inside. An empty span only contains its insertion point.
    pub fn contains(&self, column: usize) -> bool {
        if self.is_empty() {
            column == self.start_column
        } else {
            column >= self.start_column && column <= self.end_column
        }
    }
}

/// Which delimiter, if any, is currently open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    NoContext,
    InSingleQuote,
    InDoubleQuote,
}

impl QuoteState {
    fn opened_by(ch: char) -> Option<Self> {
        match ch {
            '\'' => Some(QuoteState::InSingleQuote),
            '"' => Some(QuoteState::InDoubleQuote),
            _ => None,
        }
    }

    fn closed_by(self, ch: char) -> bool {
        matches!(
            (self, ch),
            (QuoteState::InSingleQuote, '\'') | (QuoteState::InDoubleQuote, '"')
        )
    }
}

/// Tokenize a line into its closed quoted spans, left to right.
pub fn tokenize(line: &str) -> Vec<QuotedSpan> {
    let mut spans = Vec::new();
    let mut state = QuoteState::NoContext;
    let mut current = String::new();
    let mut start = 0usize;

    for (column, ch) in line.chars().enumerate() {
        match state {
            QuoteState::NoContext => {
                if let Some(opened) = QuoteState::opened_by(ch) {
                    state = opened;
                    start = column + 1;
                    current.clear();
                }
            }
            open if open.closed_by(ch) => {
                spans.push(QuotedSpan {
                    text: std::mem::take(&mut current),
                    start_column: start,
                    // `column` is the closing quote, so this is start - 1 when empty
                    end_column: column - 1,
                });
                state = QuoteState::NoContext;
            }
            _ => current.push(ch),
        }
    }

    spans
}

/// Find the first span containing the caret column
pub fn span_at(spans: &[QuotedSpan], column: usize) -> Option<&QuotedSpan> {
    spans.iter().find(|span| span.contains(column))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(spans: &[QuotedSpan]) -> Vec<&str> {
        spans.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_no_quotes() {
        assert!(tokenize("let x = 1;").is_empty());
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_single_and_double() {
        let line = r#"foo 'a' bar "b" baz"#;
        let spans = tokenize(line);
        assert_eq!(texts(&spans), vec!["a", "b"]);

        assert_eq!(spans[0].start_column, 5);
        assert_eq!(spans[0].end_column, 5);
        assert_eq!(spans[1].start_column, 13);
        assert_eq!(spans[1].end_column, 13);
        assert!(spans[0].end_column < spans[1].start_column);
    }

    #[test]
    fn test_columns_match_line_positions() {
        let line = r#"require('./lib/util')"#;
        let spans = tokenize(line);
        assert_eq!(spans.len(), 1);

        let chars: Vec<char> = line.chars().collect();
        let slice: String = chars[spans[0].start_column..=spans[0].end_column]
            .iter()
            .collect();
        assert_eq!(slice, "./lib/util");
    }

    #[test]
    fn test_mixed_nesting_is_literal() {
        let spans = tokenize(r#""it's here""#);
        assert_eq!(texts(&spans), vec!["it's here"]);

        let spans = tokenize(r#"'say "hi"'"#);
        assert_eq!(texts(&spans), vec![r#"say "hi""#]);
    }

    #[test]
    fn test_unterminated_dropped() {
        assert!(tokenize(r#"foo "bar"#).is_empty());

        let spans = tokenize(r#"'ok' then "never closed"#);
        assert_eq!(texts(&spans), vec!["ok"]);
    }

    #[test]
    fn test_empty_literal() {
        let spans = tokenize(r#"x = "" + 'y'"#);
        assert_eq!(texts(&spans), vec!["", "y"]);

        let empty = &spans[0];
        assert!(empty.is_empty());
        assert_eq!(empty.start_column, 5);
        assert_eq!(empty.end_column + 1, empty.start_column);
        assert!(empty.contains(5));
        assert!(!empty.contains(4));
        assert!(!empty.contains(6));
    }

    #[test]
    fn test_adjacent_literals() {
        let spans = tokenize(r#""a""b""#);
        assert_eq!(texts(&spans), vec!["a", "b"]);
        assert_eq!(spans[0].start_column, 1);
        assert_eq!(spans[1].start_column, 4);
    }

    #[test]
    fn test_multibyte_columns_are_characters() {
        let spans = tokenize("é './ü.txt'");
        assert_eq!(spans[0].start_column, 3);
        assert_eq!(spans[0].end_column, 9);
    }

    #[test]
    fn test_contains_inclusive() {
        let span = QuotedSpan {
            text: "abc".to_string(),
            start_column: 5,
            end_column: 7,
        };
        assert!(!span.contains(4));
        assert!(span.contains(5));
        assert!(span.contains(6));
        assert!(span.contains(7));
        assert!(!span.contains(8));
    }

    #[test]
    fn test_span_at() {
        let spans = tokenize(r#"a("./x", "./y")"#);
        assert_eq!(span_at(&spans, 4).map(|s| s.text.as_str()), Some("./x"));
        assert_eq!(span_at(&spans, 11).map(|s| s.text.as_str()), Some("./y"));
        assert!(span_at(&spans, 0).is_none());
        assert!(span_at(&spans, 7).is_none());
    }
}
