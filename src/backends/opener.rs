//! Opener - Hands a resolved file to the editor
//!
//! The opener is an external command such as `code -g`, `subl` or `nvim`. The path is
//! appended as the last argument, or substituted for a `{path}` placeholder when the
//! command contains one. The command string is split on whitespace; no shell is involved.

use anyhow::{bail, Context, Result};
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use crate::core::util::command_exists;

/// Environment variable naming the opener command
pub const OPENER_ENV: &str = "RELJUMP_OPENER";

/// Placeholder replaced by the target path
pub const PATH_PLACEHOLDER: &str = "{path}";

/// Editor collaborator: open and focus a document
pub trait Opener {
    fn open(&self, path: &Path) -> Result<()>;
}

/// Opens files by running an external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOpener {
    program: String,
    args: Vec<String>,
}

impl CommandOpener {
    /// Parse a command line such as `code -g` or `emacsclient -n {path}`
    pub fn parse(command: &str) -> Result<Self> {
        let mut words = command.split_whitespace().map(str::to_string);
        let Some(program) = words.next() else {
            bail!("Opener command is empty");
        };

        Ok(Self {
            program,
            args: words.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Whether the program can be found
    pub fn is_available(&self) -> bool {
        command_exists(&self.program)
    }

    /// Arguments passed to the program for `path`.
    ///
    /// Every `{path}` in an argument is replaced. An argument that is exactly `{path}`
    /// receives the path unchanged; inside a longer argument it is converted lossily.
    pub fn args_for(&self, path: &Path) -> Vec<OsString> {
        let mut substituted = false;

        let mut args: Vec<OsString> = self
            .args
            .iter()
            .map(|arg| {
                if arg == PATH_PLACEHOLDER {
                    substituted = true;
                    path.as_os_str().to_os_string()
                } else if arg.contains(PATH_PLACEHOLDER) {
                    substituted = true;
                    OsString::from(arg.replace(PATH_PLACEHOLDER, &path.to_string_lossy()))
                } else {
                    OsString::from(arg)
                }
            })
            .collect();

        if !substituted {
            args.push(path.as_os_str().to_os_string());
        }
        args
    }
}

impl Opener for CommandOpener {
    fn open(&self, path: &Path) -> Result<()> {
        let args = self.args_for(path);
        log::debug!("running opener {} {:?}", self.program, args);

        let status = Command::new(&self.program)
            .args(&args)
            .status()
            .with_context(|| format!("Failed to run opener `{}`", self.program))?;

        if !status.success() {
            bail!("Opener `{}` exited with {}", self.program, status);
        }
        Ok(())
    }
}

/// Pick the opener command: explicit value (flag or `RELJUMP_OPENER`), then `VISUAL`,
/// then `EDITOR`. Blank values are skipped.
pub fn configured_opener(explicit: Option<&str>) -> Option<String> {
    let from_env = |name: &str| std::env::var(name).ok();

    explicit
        .map(str::to_string)
        .into_iter()
        .chain(from_env("VISUAL"))
        .chain(from_env("EDITOR"))
        .find(|command| !command.trim().is_empty())
}
