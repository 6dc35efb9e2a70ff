//! Path resolver
//!
//! Picks the string under the caret, checks it looks relative, and maps it onto the
//! filesystem next to the source file:
//!
//! 1. the joined path is a file: open it
//! 2. the joined path is a directory: open its first `index*` entry
//! 3. the joined path is missing but its parent is a directory: open the first entry
//!    whose name starts with the last segment (`./comp` finds `comp.tsx`)
//!
//! In 2 and 3 the first matching entry must be a regular file.
//!
//! Every dead end is an [`Unresolved`] value, never an error.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::paths::join_lexically;
use crate::core::tokenizer::{span_at, tokenize, QuotedSpan};
use crate::resolve::error::Unresolved;
use crate::resolve::fs::{Filesystem, Stat};

/// Name prefix looked up when the string names a directory
pub const INDEX_PREFIX: &str = "index";

/// Where a relative string points before any directory listing happens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// An existing regular file
    File(PathBuf),
    /// An existing directory; look for its index entry
    DirectoryIndex(PathBuf),
    /// A missing path whose parent exists; look for siblings starting with `prefix`
    Prefix { dir: PathBuf, prefix: String },
}

impl Target {
    pub fn strategy(&self) -> Strategy {
        match self {
            Target::File(_) => Strategy::Exact,
            Target::DirectoryIndex(_) => Strategy::DirectoryIndex,
            Target::Prefix { .. } => Strategy::Prefix,
        }
    }
}

/// How a path was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Exact,
    DirectoryIndex,
    Prefix,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Exact => "exact",
            Strategy::DirectoryIndex => "directory_index",
            Strategy::Prefix => "prefix",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file to open, and the string it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub path: PathBuf,
    pub strategy: Strategy,
    pub span: QuotedSpan,
}

/// Outcome of a resolution attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(Resolved),
    NotFound(Unresolved),
}

impl Resolution {
    pub fn found(&self) -> Option<&Resolved> {
        match self {
            Resolution::Found(resolved) => Some(resolved),
            Resolution::NotFound(_) => None,
        }
    }
}

impl From<Result<Resolved, Unresolved>> for Resolution {
    fn from(result: Result<Resolved, Unresolved>) -> Self {
        match result {
            Ok(resolved) => Resolution::Found(resolved),
            Err(reason) => {
                log::debug!("no action: {}", reason);
                Resolution::NotFound(reason)
            }
        }
    }
}

/// Whether a string is worth treating as a path: it must start with `.`
pub fn is_relative_candidate(text: &str) -> bool {
    text.starts_with('.')
}

/// Map a relative string onto the filesystem next to `source_file`
pub fn resolve_target<F: Filesystem + ?Sized>(
    text: &str,
    source_file: &Path,
    fs: &F,
) -> Result<Target, Unresolved> {
    if !is_relative_candidate(text) {
        return Err(Unresolved::NotRelative {
            text: text.to_string(),
        });
    }

    let base = source_file.parent().unwrap_or(source_file);
    let target = join_lexically(base, text);
    log::debug!("resolving {:?} from {:?} to {:?}", text, base, target);

    match fs.stat(&target) {
        Stat::File => return Ok(Target::File(target)),
        Stat::Directory => return Ok(Target::DirectoryIndex(target)),
        Stat::Other => {
            log::debug!("{:?} is neither a file nor a directory", target);
            return Err(Unresolved::NotFound { target });
        }
        Stat::Missing => {}
    }

    let (Some(parent), Some(name)) = (target.parent(), target.file_name()) else {
        return Err(Unresolved::NotFound { target });
    };

    if fs.stat(parent) != Stat::Directory {
        return Err(Unresolved::NotFound { target });
    }

    Ok(Target::Prefix {
        dir: parent.to_path_buf(),
        prefix: name.to_string_lossy().into_owned(),
    })
}

/// First entry of `dir`, in listing order, whose name starts with `prefix`.
///
/// Only the first match is considered. If it is not a regular file there is no target.
pub fn lookup_index<F: Filesystem + ?Sized>(
    dir: &Path,
    prefix: &str,
    fs: &F,
) -> Result<PathBuf, Unresolved> {
    let not_found = || Unresolved::NoMatchingEntry {
        dir: dir.to_path_buf(),
        prefix: prefix.to_string(),
    };

    let entries = fs.list_dir(dir).ok_or_else(not_found)?;
    let path = entries
        .iter()
        .find(|name| name.to_string_lossy().starts_with(prefix))
        .map(|name| dir.join(name))
        .ok_or_else(not_found)?;

    match fs.stat(&path) {
        Stat::File => Ok(path),
        stat => {
            log::debug!("first match {:?} is not a file ({:?})", path, stat);
            Err(not_found())
        }
    }
}

/// Resolve the span under the caret, if any, to a file
pub fn resolve<F: Filesystem + ?Sized>(
    spans: &[QuotedSpan],
    caret_column: usize,
    source_file: &Path,
    fs: &F,
) -> Resolution {
    resolve_inner(spans, caret_column, source_file, fs).into()
}

fn resolve_inner<F: Filesystem + ?Sized>(
    spans: &[QuotedSpan],
    caret_column: usize,
    source_file: &Path,
    fs: &F,
) -> Result<Resolved, Unresolved> {
    let span = span_at(spans, caret_column).ok_or(Unresolved::CaretOutsideString {
        column: caret_column,
    })?;

    let target = resolve_target(&span.text, source_file, fs)?;
    let strategy = target.strategy();
    let path = match target {
        Target::File(path) => path,
        Target::DirectoryIndex(dir) => lookup_index(&dir, INDEX_PREFIX, fs)?,
        Target::Prefix { dir, prefix } => lookup_index(&dir, &prefix, fs)?,
    };

    log::debug!("resolved {:?} to {:?} ({:?})", span.text, path, strategy);
    Ok(Resolved {
        path,
        strategy,
        span: span.clone(),
    })
}

/// Tokenize `line` and resolve the string under the caret
pub fn resolve_line<F: Filesystem + ?Sized>(
    line: &str,
    caret_column: usize,
    source_file: &Path,
    fs: &F,
) -> Resolution {
    resolve(&tokenize(line), caret_column, source_file, fs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::fs::{LocalFs, MemoryFs};
    use std::fs;
    use tempfile::tempdir;

    const SOURCE: &str = "/proj/src/a.js";

    fn found_path(resolution: &Resolution) -> Option<PathBuf> {
        resolution.found().map(|r| r.path.clone())
    }

    fn reason(resolution: Resolution) -> Unresolved {
        match resolution {
            Resolution::NotFound(reason) => reason,
            Resolution::Found(r) => panic!("expected no action, got {:?}", r.path),
        }
    }

    #[test]
    fn test_exact_file() {
        let mem = MemoryFs::new()
            .with_file("/proj/src/a.js")
            .with_file("/proj/src/b.js");

        let res = resolve_line("import b from './b.js'", 16, Path::new(SOURCE), &mem);
        let resolved = res.found().unwrap();
        assert_eq!(resolved.path, PathBuf::from("/proj/src/b.js"));
        assert_eq!(resolved.strategy, Strategy::Exact);
        assert_eq!(resolved.span.text, "./b.js");
    }

    #[test]
    fn test_directory_index() {
        let mem = MemoryFs::new()
            .with_file("/proj/src/sub/README.md")
            .with_file("/proj/src/sub/index.ts");

        let res = resolve_line("require('./sub')", 10, Path::new(SOURCE), &mem);
        let resolved = res.found().unwrap();
        assert_eq!(resolved.path, PathBuf::from("/proj/src/sub/index.ts"));
        assert_eq!(resolved.strategy, Strategy::DirectoryIndex);
    }

    #[test]
    fn test_prefix_fallback() {
        let mem = MemoryFs::new()
            .with_file("/proj/src/button.tsx")
            .with_file("/proj/src/comp.tsx");

        let res = resolve_line("import C from \"./comp\"", 17, Path::new(SOURCE), &mem);
        let resolved = res.found().unwrap();
        assert_eq!(resolved.path, PathBuf::from("/proj/src/comp.tsx"));
        assert_eq!(resolved.strategy, Strategy::Prefix);
    }

    #[test]
    fn test_prefix_uses_listing_order() {
        let mem = MemoryFs::new()
            .with_file("/proj/src/foo.test.ts")
            .with_file("/proj/src/foo.ts");

        let res = resolve_line("'./foo'", 2, Path::new(SOURCE), &mem);
        assert_eq!(
            found_path(&res),
            Some(PathBuf::from("/proj/src/foo.test.ts"))
        );
    }

    #[test]
    fn test_parent_relative() {
        let mem = MemoryFs::new().with_file("/proj/lib/util.js");

        let res = resolve_line("'../lib/util.js'", 1, Path::new(SOURCE), &mem);
        assert_eq!(found_path(&res), Some(PathBuf::from("/proj/lib/util.js")));
    }

    #[test]
    fn test_caret_boundaries() {
        // span "./b.js" covers columns 1..=6
        let mem = MemoryFs::new().with_file("/proj/src/b.js");
        let line = "'./b.js'";
        let source = Path::new(SOURCE);

        for column in 1..=6 {
            assert!(
                resolve_line(line, column, source, &mem).found().is_some(),
                "column {} should resolve",
                column
            );
        }
        for column in [0, 7, 8] {
            assert_eq!(
                reason(resolve_line(line, column, source, &mem)),
                Unresolved::CaretOutsideString { column }
            );
        }
    }

    #[test]
    fn test_not_relative() {
        let mem = MemoryFs::new().with_file("/proj/src/notarelativepath");

        for column in 0..20 {
            let res = resolve_line("'notarelativepath'", column, Path::new(SOURCE), &mem);
            assert!(res.found().is_none());
        }
        assert_eq!(
            reason(resolve_line(
                "'notarelativepath'",
                3,
                Path::new(SOURCE),
                &mem
            )),
            Unresolved::NotRelative {
                text: "notarelativepath".to_string()
            }
        );
    }

    #[test]
    fn test_absolute_and_url_strings_ignored() {
        let mem = MemoryFs::new().with_file("/etc/hosts");
        let source = Path::new(SOURCE);

        assert!(resolve_line("'/etc/hosts'", 3, source, &mem)
            .found()
            .is_none());
        assert!(resolve_line("'https://x.io'", 3, source, &mem)
            .found()
            .is_none());
    }

    #[test]
    fn test_missing_without_sibling() {
        let mem = MemoryFs::new().with_file("/proj/src/other.js");

        assert_eq!(
            reason(resolve_line("'./missing'", 3, Path::new(SOURCE), &mem)),
            Unresolved::NoMatchingEntry {
                dir: PathBuf::from("/proj/src"),
                prefix: "missing".to_string()
            }
        );
    }

    #[test]
    fn test_missing_parent() {
        let mem = MemoryFs::new().with_file("/proj/src/a.js");

        assert_eq!(
            reason(resolve_line("'./nope/x'", 3, Path::new(SOURCE), &mem)),
            Unresolved::NotFound {
                target: PathBuf::from("/proj/src/nope/x")
            }
        );
    }

    #[test]
    fn test_parent_is_file() {
        let mem = MemoryFs::new().with_file("/proj/src/b.js");

        let res = resolve_line("'./b.js/inner'", 3, Path::new(SOURCE), &mem);
        assert!(matches!(reason(res), Unresolved::NotFound { .. }));
    }

    #[test]
    fn test_directory_without_index() {
        let mem = MemoryFs::new().with_file("/proj/src/sub/main.ts");

        assert_eq!(
            reason(resolve_line("'./sub'", 3, Path::new(SOURCE), &mem)),
            Unresolved::NoMatchingEntry {
                dir: PathBuf::from("/proj/src/sub"),
                prefix: INDEX_PREFIX.to_string()
            }
        );
    }

    #[test]
    fn test_dot_is_source_directory() {
        let mem = MemoryFs::new()
            .with_file("/proj/src/a.js")
            .with_file("/proj/src/index.js");

        let res = resolve_line("'.'", 1, Path::new(SOURCE), &mem);
        assert_eq!(found_path(&res), Some(PathBuf::from("/proj/src/index.js")));
    }

    #[test]
    fn test_empty_string_is_not_relative() {
        let mem = MemoryFs::new().with_file("/proj/src/a.js");

        let res = resolve_line("x = ''", 5, Path::new(SOURCE), &mem);
        assert!(matches!(reason(res), Unresolved::NotRelative { .. }));
    }

    #[test]
    fn test_first_enclosing_span_wins() {
        let mem = MemoryFs::new()
            .with_file("/proj/src/x.js")
            .with_file("/proj/src/y.js");

        let line = "f('./x.js', './y.js')";
        assert_eq!(
            found_path(&resolve_line(line, 5, Path::new(SOURCE), &mem)),
            Some(PathBuf::from("/proj/src/x.js"))
        );
        assert_eq!(
            found_path(&resolve_line(line, 14, Path::new(SOURCE), &mem)),
            Some(PathBuf::from("/proj/src/y.js"))
        );
    }

    #[test]
    fn test_idempotent() {
        let mem = MemoryFs::new().with_file("/proj/src/comp.tsx");
        let line = "'./comp'";

        let first = resolve_line(line, 3, Path::new(SOURCE), &mem);
        let second = resolve_line(line, 3, Path::new(SOURCE), &mem);
        assert_eq!(first, second);
    }

    #[test]
    fn test_prefix_match_on_directory_is_no_action() {
        let mem = MemoryFs::new()
            .with_file("/proj/src/components/Button.jsx")
            .with_file("/proj/src/comp.tsx");

        let res = resolve_line("'./comp'", 2, Path::new(SOURCE), &mem);
        assert_eq!(
            reason(res),
            Unresolved::NoMatchingEntry {
                dir: PathBuf::from("/proj/src"),
                prefix: "comp".to_string()
            }
        );
    }

    #[test]
    fn test_index_entry_must_be_a_file() {
        let mem = MemoryFs::new()
            .with_file("/proj/src/sub/index/a.ts")
            .with_file("/proj/src/sub/index.ts");

        let res = resolve_line("'./sub'", 3, Path::new(SOURCE), &mem);
        assert!(matches!(reason(res), Unresolved::NoMatchingEntry { .. }));
    }

    #[test]
    fn test_relative_source_climbs_every_parent() {
        let mem = MemoryFs::new()
            .with_file("../lib/u.js")
            .with_file("../../lib/u.js");

        let res = resolve_line("'../../lib/u.js'", 3, Path::new("a.js"), &mem);
        assert_eq!(found_path(&res), Some(PathBuf::from("../../lib/u.js")));
    }

    #[test]
    fn test_resolve_target_variants() {
        let mem = MemoryFs::new()
            .with_file("/proj/src/b.js")
            .with_dir("/proj/src/sub");
        let source = Path::new(SOURCE);

        let target = resolve_target("./b.js", source, &mem).unwrap();
        assert_eq!(target, Target::File(PathBuf::from("/proj/src/b.js")));
        assert_eq!(target.strategy(), Strategy::Exact);

        let target = resolve_target("./sub/", source, &mem).unwrap();
        assert_eq!(target, Target::DirectoryIndex(PathBuf::from("/proj/src/sub")));

        let target = resolve_target("./sub/mod", source, &mem).unwrap();
        assert_eq!(
            target,
            Target::Prefix {
                dir: PathBuf::from("/proj/src/sub"),
                prefix: "mod".to_string()
            }
        );
        assert_eq!(target.strategy(), Strategy::Prefix);
    }

    #[test]
    fn test_local_fs_end_to_end() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(src.join("sub")).unwrap();
        fs::write(src.join("a.js"), "").unwrap();
        fs::write(src.join("b.js"), "").unwrap();
        fs::write(src.join("sub").join("index.ts"), "").unwrap();
        fs::write(src.join("comp.tsx"), "").unwrap();

        let source = src.join("a.js");
        let cases = [
            ("'./b.js'", src.join("b.js")),
            ("'./sub'", src.join("sub").join("index.ts")),
            ("'./comp'", src.join("comp.tsx")),
        ];
        for (line, expected) in cases {
            let res = resolve_line(line, 2, &source, &LocalFs);
            assert_eq!(found_path(&res), Some(expected), "line {}", line);
        }

        let res = resolve_line("'./missing'", 2, &source, &LocalFs);
        assert!(res.found().is_none());
    }
}
