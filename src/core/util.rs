//! Common utilities

use std::path::Path;

/// Check if a command is available.
///
/// Names containing a path separator are checked directly, bare names via `which`.
pub fn command_exists(cmd: &str) -> bool {
    if cmd.contains(std::path::MAIN_SEPARATOR) || cmd.contains('/') {
        return Path::new(cmd).is_file();
    }

    std::process::Command::new("which")
        .arg(cmd)
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_exists_missing() {
        assert!(!command_exists("reljump-no-such-command-xyz"));
    }

    #[test]
    fn test_command_exists_by_path() {
        let temp = tempfile::tempdir().unwrap();
        let program = temp.path().join("editor");
        std::fs::write(&program, "").unwrap();

        assert!(command_exists(&program.to_string_lossy()));
        assert!(!command_exists(&temp.path().join("nope").to_string_lossy()));
    }
}
