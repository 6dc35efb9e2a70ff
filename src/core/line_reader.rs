//! Reading a single line from the source file
//!
//! Used when the editor passes a row number instead of the line text. Non-UTF-8 bytes
//! are replaced rather than rejected, and oversized files are refused.

use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Maximum source file size we will scan for a line (64 MB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// Read the 1-based `row` of `path`.
///
/// Returns `Ok(None)` when the file has fewer rows. Line terminators (`\n` or `\r\n`)
/// are stripped.
pub fn read_line_at(path: &Path, row: usize) -> Result<Option<String>> {
    if row == 0 {
        bail!("Line numbers are 1-indexed, row cannot be 0");
    }

    let metadata =
        std::fs::metadata(path).with_context(|| format!("Cannot read metadata: {:?}", path))?;
    if metadata.len() > DEFAULT_MAX_FILE_SIZE {
        bail!(
            "File too large ({} bytes > {} bytes): {:?}",
            metadata.len(),
            DEFAULT_MAX_FILE_SIZE,
            path
        );
    }

    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let mut reader = BufReader::new(file);
    let mut buffer = Vec::new();

    for _ in 0..row {
        buffer.clear();
        let read = reader
            .read_until(b'\n', &mut buffer)
            .with_context(|| format!("Failed to read file: {:?}", path))?;
        if read == 0 {
            return Ok(None);
        }
    }

    if buffer.ends_with(b"\n") {
        buffer.pop();
    }
    if buffer.ends_with(b"\r") {
        buffer.pop();
    }

    Ok(Some(String::from_utf8_lossy(&buffer).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_read_line_at() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("a.js");
        fs::write(&path, "line 1\nimport './b'\nline 3").unwrap();

        assert_eq!(read_line_at(&path, 1).unwrap(), Some("line 1".to_string()));
        assert_eq!(
            read_line_at(&path, 2).unwrap(),
            Some("import './b'".to_string())
        );
        assert_eq!(read_line_at(&path, 3).unwrap(), Some("line 3".to_string()));
        assert_eq!(read_line_at(&path, 4).unwrap(), None);
    }

    #[test]
    fn test_strips_crlf() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("a.js");
        fs::write(&path, "first\r\nsecond\r\n").unwrap();

        assert_eq!(read_line_at(&path, 1).unwrap(), Some("first".to_string()));
        assert_eq!(read_line_at(&path, 2).unwrap(), Some("second".to_string()));
        assert_eq!(read_line_at(&path, 3).unwrap(), None);
    }

    #[test]
    fn test_lossy_decoding() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("bin.txt");
        fs::write(&path, b"ok '\xff./x'\n").unwrap();

        let line = read_line_at(&path, 1).unwrap().unwrap();
        assert!(line.starts_with("ok '"));
        assert!(line.contains('\u{FFFD}'));
    }

    #[test]
    fn test_row_zero_rejected() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("a.js");
        fs::write(&path, "x").unwrap();
        assert!(read_line_at(&path, 0).is_err());
    }

    #[test]
    fn test_missing_file_is_error() {
        let temp = tempdir().unwrap();
        assert!(read_line_at(&temp.path().join("nope.js"), 1).is_err());
    }
}
