//! Filesystem collaborator
//!
//! The resolver only ever asks two questions: what is at this path, and what names does
//! this directory hold. Any failure to answer collapses to "nothing there".

use std::collections::{HashMap, HashSet};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// What a path points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stat {
    File,
    Directory,
    /// Exists but is neither (sockets, devices, ...)
    Other,
    /// Absent, or could not be inspected
    Missing,
}

/// Read-only view of a filesystem
pub trait Filesystem {
    /// Inspect `path`, following symlinks
    fn stat(&self, path: &Path) -> Stat;

    /// Entry names of `dir` in the order the filesystem reports them.
    ///
    /// Returns `None` if the directory cannot be listed.
    fn list_dir(&self, dir: &Path) -> Option<Vec<OsString>>;
}

/// The real filesystem, via `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl Filesystem for LocalFs {
    fn stat(&self, path: &Path) -> Stat {
        match std::fs::metadata(path) {
            Ok(meta) if meta.is_file() => Stat::File,
            Ok(meta) if meta.is_dir() => Stat::Directory,
            Ok(_) => Stat::Other,
            Err(e) => {
                log::trace!("stat {:?} failed: {}", path, e);
                Stat::Missing
            }
        }
    }

    fn list_dir(&self, dir: &Path) -> Option<Vec<OsString>> {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::trace!("read_dir {:?} failed: {}", dir, e);
                return None;
            }
        };

        Some(
            entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.file_name())
                .collect(),
        )
    }
}

/// In-memory filesystem with a controllable listing order.
///
/// Directories list their children in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    files: HashSet<PathBuf>,
    dirs: HashMap<PathBuf, Vec<OsString>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, creating its parent directories
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.link_parent(path);
        self.files.insert(path.to_path_buf());
        self
    }

    /// Add an (empty) directory, creating its parents
    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.link_parent(path);
        self.dirs.entry(path.to_path_buf()).or_default();
        self
    }

    fn link_parent(&mut self, path: &Path) {
        let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
            return;
        };
        if !self.dirs.contains_key(parent) {
            self.link_parent(parent);
        }
        let children = self.dirs.entry(parent.to_path_buf()).or_default();
        if !children.iter().any(|child| child == name) {
            children.push(name.to_os_string());
        }
    }
}

impl Filesystem for MemoryFs {
    fn stat(&self, path: &Path) -> Stat {
        if self.files.contains(path) {
            Stat::File
        } else if self.dirs.contains_key(path) {
            Stat::Directory
        } else {
            Stat::Missing
        }
    }

    fn list_dir(&self, dir: &Path) -> Option<Vec<OsString>> {
        self.dirs.get(dir).cloned()
    }
}
