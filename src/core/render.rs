//! Renderer module
//!
//! Renders ResultSet to different output formats: jsonl, json, md, raw

use crate::core::model::{Kind, ResultItem, ResultSet};
use std::io::Write;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jsonl,
    Json,
    Markdown,
    Raw,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            "raw" => Ok(OutputFormat::Raw),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    /// Create a new render config with default options
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
        }
    }

    /// Create a new render config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// Renderer for result sets
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a result set to a string
    pub fn render(&self, result_set: &ResultSet) -> String {
        match self.config.format {
            OutputFormat::Jsonl => self.render_jsonl(result_set),
            OutputFormat::Json => self.render_json(result_set),
            OutputFormat::Markdown => self.render_markdown(result_set),
            OutputFormat::Raw => self.render_raw(result_set),
        }
    }

    /// Render to a writer, followed by a newline unless the output is empty
    pub fn render_to<W: Write>(
        &self,
        result_set: &ResultSet,
        mut writer: W,
    ) -> std::io::Result<()> {
        let output = self.render(result_set);
        if output.is_empty() {
            return Ok(());
        }
        writer.write_all(output.as_bytes())?;
        writer.write_all(b"\n")
    }

    /// Render as JSON Lines (one JSON object per line)
    fn render_jsonl(&self, result_set: &ResultSet) -> String {
        result_set
            .items
            .iter()
            .filter_map(|item| {
                if self.config.pretty {
                    serde_json::to_string_pretty(item).ok()
                } else {
                    serde_json::to_string(item).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// Render as a single JSON array
    fn render_json(&self, result_set: &ResultSet) -> String {
        if self.config.pretty {
            serde_json::to_string_pretty(&result_set.items).unwrap_or_else(|_| "[]".to_string())
        } else {
            serde_json::to_string(&result_set.items).unwrap_or_else(|_| "[]".to_string())
        }
    }

    /// Render as Markdown
    fn render_markdown(&self, result_set: &ResultSet) -> String {
        let mut output = String::new();

        let section = |kind: Kind| -> Vec<&ResultItem> {
            result_set
                .items
                .iter()
                .filter(|item| item.kind == kind)
                .collect()
        };

        let errors = section(Kind::Error);
        if !errors.is_empty() {
            output.push_str("## Errors\n\n");
            for item in errors {
                for error in &item.errors {
                    output.push_str(&format!("- **{}**: {}\n", error.code, error.message));
                }
            }
            output.push('\n');
        }

        let targets = section(Kind::Target);
        if !targets.is_empty() {
            output.push_str("## Target\n\n");
            for item in targets {
                if let Some(path) = &item.path {
                    output.push_str(&format!("- `{}`", path));
                    if let Some(strategy) = &item.strategy {
                        output.push_str(&format!(" ({})", strategy));
                    }
                    output.push('\n');
                }
                self.render_span_md(&mut output, item);
            }
            output.push('\n');
        }

        let unresolved = section(Kind::Unresolved);
        if !unresolved.is_empty() {
            output.push_str("## No Target\n\n");
            for item in unresolved {
                output.push_str(&format!(
                    "- **{}**: {}\n",
                    item.reason.as_deref().unwrap_or("unresolved"),
                    item.text.as_deref().unwrap_or_default()
                ));
            }
            output.push('\n');
        }

        let spans = section(Kind::Span);
        if !spans.is_empty() {
            output.push_str("## Spans\n\n");
            for item in spans {
                output.push_str(&format!("- `{}`", item.text.as_deref().unwrap_or_default()));
                if let Some(range) = &item.range {
                    output.push_str(&format!(" (columns {}-{})", range.start, range.end));
                }
                output.push('\n');
            }
            output.push('\n');
        }

        let statuses = section(Kind::Status);
        if !statuses.is_empty() {
            output.push_str("## Status\n\n");
            for item in statuses {
                output.push_str(&format!("- {}\n", item.text.as_deref().unwrap_or_default()));
                for error in &item.errors {
                    output.push_str(&format!("  - **{}**: {}\n", error.code, error.message));
                }
            }
            output.push('\n');
        }

        output
    }

    fn render_span_md(&self, output: &mut String, item: &ResultItem) {
        if let (Some(text), Some(range)) = (&item.text, &item.range) {
            output.push_str(&format!(
                "  - from `{}` (columns {}-{})\n",
                text, range.start, range.end
            ));
        }
    }

    /// Render as raw output: target paths, span texts and status lines, one per line
    fn render_raw(&self, result_set: &ResultSet) -> String {
        result_set
            .items
            .iter()
            .filter_map(|item| match item.kind {
                Kind::Target => item.path.clone(),
                Kind::Span | Kind::Status => item.text.clone(),
                Kind::Unresolved | Kind::Error => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
