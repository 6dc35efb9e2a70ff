//! Flows module - Operations combining multiple steps
//!
//! Provides:
//! - goto: line + caret + source path to a resolved (and optionally opened) file

pub mod goto;
