//! Path utilities
//!
//! Lexical joining (no filesystem access) and parsing of the source locator an editor
//! hands us, which may be a plain path or a URI.

use std::path::{Component, Path, PathBuf};
use url::Url;

/// Where the current document lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    /// Absolute path on the local filesystem
    Local(PathBuf),
    /// Anything else: unsaved buffers, remote schemes, relative paths
    Unsupported(String),
}

/// Parse an editor-supplied source locator.
///
/// `file://` URIs become local paths. Other URI schemes are unsupported. Strings that do
/// not parse as a URI with a scheme are treated as filesystem paths and must be absolute.
pub fn parse_source(locator: &str) -> SourceLocation {
    let as_path = Path::new(locator);
    if as_path.is_absolute() {
        return SourceLocation::Local(as_path.to_path_buf());
    }

    match Url::parse(locator) {
        Ok(url) if url.scheme() == "file" => match url.to_file_path() {
            Ok(path) => SourceLocation::Local(path),
            Err(()) => SourceLocation::Unsupported(locator.to_string()),
        },
        _ => SourceLocation::Unsupported(locator.to_string()),
    }
}

/// Collapse `.` and `..` segments without touching the filesystem.
///
/// `..` only pops a normal segment, so it never climbs above the root. Leading `..`
/// segments of a relative path are all kept.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut components: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            Component::CurDir => {}
            c => components.push(c),
        }
    }

    components.iter().collect()
}

/// Join `relative` onto `base` and normalize the result lexically
pub fn join_lexically(base: &Path, relative: &str) -> PathBuf {
    normalize_lexically(&base.join(relative))
}

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
