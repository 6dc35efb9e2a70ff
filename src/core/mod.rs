//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Line tokenizer (quoted spans with column offsets)
//! - Caret column encodings
//! - Unified result model (ResultItem)
//! - Rendering functions for different output formats
//! - Path utilities (lexical joins, source locators)
//! - Reading a single line from a file
//! - Common utilities

pub mod columns;
pub mod line_reader;
pub mod model;
pub mod paths;
pub mod render;
pub mod tokenizer;
pub mod util;
