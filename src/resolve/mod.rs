//! Resolve module - Maps the quoted string under the caret to a file
//!
//! Provides:
//! - fs: Filesystem collaborator (real and in-memory)
//! - resolver: span selection, relative filter, primary and fallback resolution
//! - error: reasons a resolution ends without a target

pub mod error;
pub mod fs;
pub mod resolver;

pub use error::Unresolved;
pub use fs::{Filesystem, LocalFs, MemoryFs, Stat};
pub use resolver::{resolve, resolve_line, Resolution, Resolved, Strategy};
