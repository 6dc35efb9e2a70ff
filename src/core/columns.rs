//! Caret column encodings
//!
//! Editors disagree on what a column counts. LSP hosts report UTF-16 code units,
//! terminals tend to report bytes. Everything downstream of the tokenizer works in
//! characters, so callers convert first.

use std::str::FromStr;

/// Unit a caret column is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnEncoding {
    /// Unicode scalar values
    Char,
    /// UTF-16 code units
    #[default]
    Utf16,
    /// UTF-8 bytes
    Byte,
}

impl FromStr for ColumnEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "char" | "chars" | "utf32" => Ok(ColumnEncoding::Char),
            "utf16" | "utf-16" => Ok(ColumnEncoding::Utf16),
            "byte" | "bytes" | "utf8" | "utf-8" => Ok(ColumnEncoding::Byte),
            _ => Err(format!(
                "Unknown column encoding: {}. Available: char, utf16, byte",
                s
            )),
        }
    }
}

/// Convert a column in the given encoding to a character offset within `line`.
///
/// Columns past the end clamp to the line length. A column that lands in the middle of
/// a character (a surrogate pair or a multi-byte sequence) maps to that character.
pub fn to_char_column(line: &str, column: usize, encoding: ColumnEncoding) -> usize {
    let unit_len = |ch: char| match encoding {
        ColumnEncoding::Char => 1,
        ColumnEncoding::Utf16 => ch.len_utf16(),
        ColumnEncoding::Byte => ch.len_utf8(),
    };

    let mut units = 0usize;
    for (index, ch) in line.chars().enumerate() {
        let next = units + unit_len(ch);
        if column < next {
            return index;
        }
        units = next;
    }
    line.chars().count()
}
