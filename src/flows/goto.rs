//! Goto flow - From caret position to opened file
//!
//! Steps:
//! 1) locate the source document (local path or file:// URI)
//! 2) obtain the current line (given literally, or read from the source by row)
//! 3) convert the caret column to characters and resolve the string under it
//! 4) render the outcome and, for `open`, hand the target to the opener

use anyhow::Result;

use crate::backends::opener::{configured_opener, CommandOpener, Opener};
use crate::core::columns::{to_char_column, ColumnEncoding};
use crate::core::line_reader::read_line_at;
use crate::core::model::{ItemError, ResultItem, ResultSet};
use crate::core::paths::{parse_source, SourceLocation};
use crate::core::render::{RenderConfig, Renderer};
use crate::core::tokenizer::tokenize;
use crate::resolve::error::Unresolved;
use crate::resolve::fs::{Filesystem, LocalFs};
use crate::resolve::resolver::{resolve_line, Resolution};

/// Where the current line comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineInput {
    /// The line text itself
    Text(String),
    /// 1-based row of the source file
    Row(usize),
}

/// Everything an editor knows at the moment the command fires
#[derive(Debug, Clone)]
pub struct GotoRequest {
    /// Source document, as a path or URI
    pub source: String,
    pub line: LineInput,
    /// Caret column in `encoding` units
    pub column: usize,
    pub encoding: ColumnEncoding,
}

/// Resolve a request against a filesystem.
///
/// Only reading the line from the source file can fail; every resolution dead end is a
/// `Resolution::NotFound`.
pub fn resolve_request<F: Filesystem + ?Sized>(
    request: &GotoRequest,
    fs: &F,
) -> Result<Resolution> {
    let source_file = match parse_source(&request.source) {
        SourceLocation::Local(path) => path,
        SourceLocation::Unsupported(locator) => {
            log::debug!("no action: unsupported source {}", locator);
            return Ok(Resolution::NotFound(Unresolved::UnsupportedScheme {
                locator,
            }));
        }
    };

    let line = match &request.line {
        LineInput::Text(text) => Some(text.clone()),
        LineInput::Row(row) => read_line_at(&source_file, *row)?,
    };
    let Some(line) = line else {
        log::debug!("no action: source has no such row");
        return Ok(Resolution::NotFound(Unresolved::CaretOutsideString {
            column: request.column,
        }));
    };

    let caret = to_char_column(&line, request.column, request.encoding);
    Ok(resolve_line(&line, caret, &source_file, fs))
}

/// Map a resolution to the unified result model
pub fn resolution_items(resolution: &Resolution) -> ResultSet {
    let mut result_set = ResultSet::new();
    match resolution {
        Resolution::Found(resolved) => result_set.push(ResultItem::target(resolved)),
        Resolution::NotFound(reason) => result_set.push(ResultItem::unresolved(reason)),
    }
    result_set
}

/// Open the target of a resolution, if it has one. Returns whether anything was opened.
pub fn open_resolution(resolution: &Resolution, opener: &dyn Opener) -> Result<bool> {
    match resolution {
        Resolution::Found(resolved) => {
            opener.open(&resolved.path)?;
            Ok(true)
        }
        Resolution::NotFound(_) => Ok(false),
    }
}

fn print(result_set: &ResultSet, config: RenderConfig) -> Result<()> {
    let renderer = Renderer::with_config(config);
    renderer.render_to(result_set, std::io::stdout().lock())?;
    Ok(())
}

/// Run the tokenize command
pub fn run_tokenize(line: &str, config: RenderConfig) -> Result<()> {
    let result_set: ResultSet = tokenize(line).iter().map(ResultItem::span).collect();
    print(&result_set, config)
}

/// Run the resolve command
pub fn run_resolve(request: &GotoRequest, config: RenderConfig) -> Result<()> {
    let resolution = resolve_request(request, &LocalFs)?;
    print(&resolution_items(&resolution), config)
}

/// Run the open command
pub fn run_open(request: &GotoRequest, opener: Option<&str>, config: RenderConfig) -> Result<()> {
    let resolution = resolve_request(request, &LocalFs)?;
    print(&resolution_items(&resolution), config)?;

    if resolution.found().is_none() {
        return Ok(());
    }

    match configured_opener(opener) {
        Some(command) => {
            let opener = CommandOpener::parse(&command)?;
            if let Err(err) = open_resolution(&resolution, &opener) {
                let mut result_set = ResultSet::new();
                result_set.push(ResultItem::error(ItemError::new(
                    "OPEN_FAILED",
                    format!("{:#}", err),
                )));
                print(&result_set, config)?;
                return Err(err);
            }
        }
        None => log::info!("no opener configured; printed the target only"),
    }
    Ok(())
}
