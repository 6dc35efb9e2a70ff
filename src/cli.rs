//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::core::columns::ColumnEncoding;
use crate::core::render::{OutputFormat, RenderConfig};
use crate::flows::goto::{GotoRequest, LineInput};

/// reljump - open the file named by the relative path under the caret.
#[derive(Parser, Debug)]
#[command(name = "reljump")]
#[command(
    author,
    version,
    about,
    long_about = r#"reljump is the backend of a "go to relative path" editor command.

Given the current line, the caret column and the path of the file being edited, it finds
the quoted string under the caret. If that string starts with '.', it is resolved against
the file's directory:

- an existing file is the target
- an existing directory targets its first entry starting with "index"
- a missing path targets the first sibling starting with its last segment
  (./comp finds comp.tsx)

Anything else quietly resolves to nothing.

Output formats:
- jsonl: one JSON object per line (default)
- json: a single JSON array
- md: human-friendly Markdown
- raw: just the target path (empty when nothing was found)

Examples:
    reljump tokenize "import a from './a'"
    reljump resolve --source src/app.js --line "import a from './a'" --column 16
    reljump open --source file:///proj/src/app.js --row 3 --column 20 --opener "code -g"
"#
)]
pub struct Cli {
    /// Output format (jsonl/json/md/raw).
    #[arg(
        long,
        global = true,
        default_value = "jsonl",
        value_name = "FORMAT",
        long_help = "Select the output format.\n\n\
Supported values:\n\
- jsonl (default)\n\
- json\n\
- md (markdown)\n\
- raw\n\n\
Tip: raw prints only the resolved path, which is handy in editor scripts."
    )]
    pub format: String,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Quiet mode (errors only on stderr).
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (explain each resolution step on stderr).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Log each resolution decision to stderr, including why nothing was found.\n\n\
RUST_LOG overrides this when set."
    )]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Caret position and document, as reported by the editor
#[derive(Args, Debug)]
pub struct PositionArgs {
    /// Path or file:// URI of the document being edited.
    #[arg(
        long,
        value_name = "SOURCE",
        long_help = "Absolute path or file:// URI of the document being edited.\n\n\
Any other scheme (e.g. untitled:) resolves to nothing."
    )]
    pub source: String,

    /// Text of the line under the caret.
    #[arg(
        long,
        value_name = "TEXT",
        allow_hyphen_values = true,
        conflicts_with = "row",
        required_unless_present = "row"
    )]
    pub line: Option<String>,

    /// 1-based line number to read from SOURCE instead of --line.
    #[arg(long, value_name = "N")]
    pub row: Option<usize>,

    /// 0-based caret column within the line.
    #[arg(long, value_name = "N")]
    pub column: usize,

    /// Unit of --column (char/utf16/byte).
    #[arg(
        long,
        env = "RELJUMP_ENCODING",
        default_value = "utf16",
        value_parser = ["char", "utf16", "byte"],
        value_name = "ENC",
        long_help = "Unit the caret column is counted in.\n\n\
Supported values:\n\
- utf16 (default): LSP and VS Code positions\n\
- char: Unicode characters\n\
- byte: UTF-8 bytes"
    )]
    pub encoding: String,
}

impl PositionArgs {
    fn into_request(self) -> Result<GotoRequest> {
        let encoding: ColumnEncoding = self.encoding.parse().map_err(anyhow::Error::msg)?;
        let line = match (self.line, self.row) {
            (Some(text), _) => LineInput::Text(text),
            (None, Some(row)) => LineInput::Row(row),
            (None, None) => anyhow::bail!("Either --line or --row is required"),
        };

        Ok(GotoRequest {
            source: self.source,
            line,
            column: self.column,
            encoding,
        })
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the quoted strings of a line with their columns.
    #[command(long_about = "Split LINE into its closed quoted strings and emit one span per\n\
string, with 0-based inclusive character columns of its contents.\n\n\
Examples:\n\
  reljump tokenize \"foo 'a' bar \\\"b\\\" baz\"\n")]
    Tokenize {
        /// Line of text to tokenize.
        #[arg(value_name = "LINE", allow_hyphen_values = true)]
        line: String,
    },

    /// Resolve the relative path under the caret without opening it.
    #[command(long_about = "Resolve the quoted relative path under the caret and emit either a\n\
target (with the strategy used) or an unresolved item with a reason code.\n\n\
Examples:\n\
  reljump resolve --source /proj/src/a.js --line \"import b from './b'\" --column 16\n\
  reljump --format raw resolve --source /proj/src/a.js --row 1 --column 16\n")]
    Resolve {
        #[command(flatten)]
        position: PositionArgs,
    },

    /// Resolve the relative path under the caret and open it.
    #[command(long_about = "Like resolve, then run the opener with the target path.\n\n\
The opener is taken from --opener, RELJUMP_OPENER, VISUAL or EDITOR, in that order.\n\
The path is appended to the command, or replaces a {path} placeholder.\n\
Without an opener the target is only printed.\n\n\
Examples:\n\
  reljump open --source /proj/src/a.js --line \"require('./lib')\" --column 10 --opener \"code -g\"\n")]
    Open {
        #[command(flatten)]
        position: PositionArgs,

        /// Command used to open the target.
        #[arg(long, env = "RELJUMP_OPENER", value_name = "COMMAND")]
        opener: Option<String>,
    },

    /// Check which opener would be used.
    #[command(long_about = "Report the opener command `open` would use and whether its program\n\
is installed.\n\n\
Example:\n\
  reljump doctor\n")]
    Doctor {
        /// Command used to open the target.
        #[arg(long, env = "RELJUMP_OPENER", value_name = "COMMAND")]
        opener: Option<String>,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    // Parse output format
    let format: OutputFormat = cli.format.parse().unwrap_or_default();
    let render_config = RenderConfig::with_pretty(format, cli.pretty);

    match cli.command {
        Commands::Tokenize { line } => crate::flows::goto::run_tokenize(&line, render_config),

        Commands::Resolve { position } => {
            crate::flows::goto::run_resolve(&position.into_request()?, render_config)
        }

        Commands::Open { position, opener } => crate::flows::goto::run_open(
            &position.into_request()?,
            opener.as_deref(),
            render_config,
        ),

        Commands::Doctor { opener } => {
            crate::backends::doctor::run_doctor(opener.as_deref(), render_config)
        }
    }
}
