//! reljump - Open the file a quoted relative path points at
//!
//! reljump provides:
//! - Quote-aware tokenizing of the current line
//! - Resolution of `./` and `../` strings against the edited file's directory
//! - Directory index and name-prefix fallbacks
//! - Unified output format (jsonl/json/md/raw) and an external opener

use anyhow::Result;
use clap::Parser;

use reljump::cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    cli::run(cli)
}
