//! Doctor - Opener checking

use anyhow::Result;

use crate::backends::opener::{configured_opener, CommandOpener, OPENER_ENV};
use crate::core::model::{ItemError, ResultItem, ResultSet};
use crate::core::render::{RenderConfig, Renderer};

/// Opener status
#[derive(Debug, Clone)]
pub struct OpenerStatus {
    /// Full command line, if one is configured
    pub command: Option<String>,
    pub program: Option<String>,
    pub available: bool,
}

impl OpenerStatus {
    pub fn to_result_item(&self) -> ResultItem {
        let status = if self.available { "✓" } else { "✗" };

        let message = match &self.command {
            Some(command) => format!("{} opener: {}", status, command),
            None => format!(
                "{} opener: not configured (set --opener, {}, VISUAL or EDITOR)",
                status, OPENER_ENV
            ),
        };

        let mut item = ResultItem::status(message).with_data(serde_json::json!({
            "command": self.command,
            "program": self.program,
            "available": self.available,
        }));

        match (&self.program, self.available) {
            (Some(program), false) => {
                item = item.with_error(ItemError::new(
                    "MISSING_OPENER",
                    format!("{} is configured but not found", program),
                ));
            }
            (None, _) => {
                item = item.with_error(ItemError::new(
                    "NO_OPENER",
                    "resolved paths will be printed but not opened",
                ));
            }
            _ => {}
        }

        item
    }
}

/// Inspect the opener that `open` would use
pub fn check_opener(explicit: Option<&str>) -> OpenerStatus {
    let command = configured_opener(explicit);
    let opener = command
        .as_deref()
        .and_then(|command| CommandOpener::parse(command).ok());

    OpenerStatus {
        program: opener.as_ref().map(|o| o.program().to_string()),
        available: opener.as_ref().map(|o| o.is_available()).unwrap_or(false),
        command,
    }
}

/// Run the doctor command
pub fn run_doctor(explicit: Option<&str>, config: RenderConfig) -> Result<()> {
    let status = check_opener(explicit);

    let mut result_set = ResultSet::new();
    result_set.push(status.to_result_item());

    let renderer = Renderer::with_config(config);
    renderer.render_to(&result_set, std::io::stdout().lock())?;

    if !status.available {
        log::warn!("no usable opener; `open` will only print resolved paths");
    }

    Ok(())
}
