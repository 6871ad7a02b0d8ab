//! Shared helpers for command handlers.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Read and parse a JSON file for `--from-file` flags.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("invalid JSON: {e}"),
    })
}

/// Print a status line to stderr unless `--quiet`.
pub fn note(global: &GlobalOpts, message: &str) {
    if !global.quiet {
        eprintln!("{message}");
    }
}

/// Reminder printed after a staged (not yet applied) change.
pub fn staged(global: &GlobalOpts, applied: bool, apply_command: &str) {
    if !applied {
        note(
            global,
            &format!("Change staged. Run `pfsense {apply_command}` to activate it."),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_json_file_reports_bad_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("req.json");
        std::fs::write(&path, "{ nope").expect("write");

        let result: Result<serde_json::Value, _> = read_json_file(&path);
        assert!(matches!(result, Err(CliError::Validation { ref field, .. }) if field == "from-file"));
    }

    #[test]
    fn read_json_file_parses_request() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("req.json");
        std::fs::write(&path, r#"{"if": "igb2", "enable": true, "descr": "DMZ"}"#).expect("write");

        let req: pfsense_api::InterfaceRequest = read_json_file(&path).expect("parse");
        assert_eq!(req.interface, "igb2");
        assert!(req.enable);
        assert_eq!(req.descr.as_deref(), Some("DMZ"));
    }

    #[test]
    fn confirm_with_yes_skips_prompt() {
        assert!(confirm("really?", true).expect("confirm"));
    }
}
