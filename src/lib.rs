//! reljump - Resolve the quoted relative path under an editor caret
//!
//! The library is host-agnostic: [`crate::core::tokenizer`] splits a line into quoted
//! spans and [`crate::resolve`] maps the span under the caret onto a
//! [`crate::resolve::Filesystem`]. Editors (or the bundled CLI) supply the line, caret
//! column and source path, and decide how to open the result.
//!
//! ```rust
//! use std::path::{Path, PathBuf};
//! use reljump::resolve::{resolve_line, MemoryFs};
//!
//! let fs = MemoryFs::new().with_file("/proj/src/comp.tsx");
//! let resolution = resolve_line("import C from './comp'", 17, Path::new("/proj/src/a.js"), &fs);
//! assert_eq!(
//!     resolution.found().map(|r| r.path.clone()),
//!     Some(PathBuf::from("/proj/src/comp.tsx"))
//! );
//! ```

pub mod backends;
pub mod cli;
pub mod core;
pub mod flows;
pub mod resolve;
