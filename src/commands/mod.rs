//! Command implementations for xrdconfig.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the one canonicalization pipeline shared by
//! `display` and `diff`: materialize the config into a private workspace,
//! run the canonicalizer against the copy, parse its diagnostic output.

mod diff;
mod display;

use crate::cli::{Cli, Command};
use crate::error::{Result, XrdconfigError};
use crate::mapping::{CanonicalMapping, parse_diagnostics};
use crate::settings::{DEFAULT_SETTINGS_PATH, Settings};
use crate::tool::{Canonicalizer, CconfigTool};
use crate::workspace::Workspace;
use std::path::Path;

/// Dispatch a command to its implementation.
///
/// Resolves the canonicalizer command first (flag > settings file > default)
/// so every command fails fast on a malformed override.
pub fn dispatch(cli: Cli) -> Result<()> {
    let settings = Settings::load_or_default(DEFAULT_SETTINGS_PATH)?;
    let command = cli.tool.unwrap_or(settings.tool);
    let tool = CconfigTool::from_command(&command)?;

    match cli.command {
        Command::Display(args) => display::cmd_display(args, &tool),
        Command::Diff(args) => diff::cmd_diff(args, &tool),
        Command::RemoteDiff => cmd_remote_diff(),
    }
}

fn cmd_remote_diff() -> Result<()> {
    Err(XrdconfigError::NotImplemented(
        "xrdconfig remote-diff".to_string(),
    ))
}

/// Run one config through the full pipeline and return its canonical mapping.
///
/// Creates a unique temporary workspace root (removed when this function
/// returns), materializes the config and its fragments into it, invokes the
/// canonicalizer on the workspace copy, and parses the diagnostic text.
/// Parser warnings are printed to stderr; they never fail the run.
pub(crate) fn canonical_mapping(
    tool: &dyn Canonicalizer,
    config: &Path,
) -> Result<CanonicalMapping> {
    let staging = tempfile::Builder::new()
        .prefix("xrdconfig-")
        .tempdir()
        .map_err(|e| {
            XrdconfigError::UserError(format!("failed to create temporary directory: {}", e))
        })?;

    let workspace = Workspace::materialize(config, staging.path().join("workspace"))?;
    let diagnostics = tool.canonicalize(workspace.config_file())?;

    let parsed = parse_diagnostics(&diagnostics);
    for warning in &parsed.warnings {
        eprintln!("{}", warning);
    }

    Ok(parsed.mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::{DiffOutcome, unified_diff};
    use crate::exit_codes;
    use crate::test_support::{ReplayTool, write_fragment_dir, write_main_config};
    use tempfile::TempDir;

    #[test]
    fn remote_diff_returns_not_implemented() {
        let result = cmd_remote_diff();
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
        assert!(err.to_string().contains("not yet implemented"));
    }

    #[test]
    fn dispatch_rejects_malformed_tool_override() {
        use clap::Parser;

        let cli = Cli::try_parse_from(["xrdconfig", "display", "--tool", "'broken"]).unwrap();
        let result = dispatch(cli);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn canonical_mapping_runs_against_workspace_copy() {
        let temp_dir = TempDir::new().unwrap();
        let config = write_main_config(
            temp_dir.path(),
            "xrootd.cfg",
            "all.role server\ncontinue /etc/xrootd/config.d\n",
        );

        let mapping = canonical_mapping(&ReplayTool, &config).unwrap();

        // The directive was rewritten before invocation, so its replayed
        // trace line was skipped as noise and never became a variable.
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.get("all.role"), Some("server"));
        assert_eq!(mapping.get("continue"), None);
    }

    #[test]
    fn canonical_mapping_missing_config_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let result = canonical_mapping(&ReplayTool, &temp_dir.path().join("missing.cfg"));
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn end_to_end_diff_reports_exactly_one_changed_line() {
        // Two configs differing only in one directive value, each with an
        // empty fragment directory, through materialize -> invoke -> parse
        // -> compare.
        let side1 = TempDir::new().unwrap();
        let side2 = TempDir::new().unwrap();

        let config1 = write_main_config(
            side1.path(),
            "xrootd.cfg",
            "all.export /data\nall.role manager\ncontinue /etc/xrootd/config.d\n",
        );
        write_fragment_dir(side1.path(), &[]);

        let config2 = write_main_config(
            side2.path(),
            "xrootd.cfg",
            "all.export /data\nall.role server\ncontinue /etc/xrootd/config.d\n",
        );
        write_fragment_dir(side2.path(), &[]);

        let mapping1 = canonical_mapping(&ReplayTool, &config1).unwrap();
        let mapping2 = canonical_mapping(&ReplayTool, &config2).unwrap();

        let outcome = unified_diff(
            &mapping1,
            &mapping2,
            &config1.display().to_string(),
            &config2.display().to_string(),
        );

        let DiffOutcome::Differences(lines) = outcome else {
            panic!("expected differences");
        };
        let removed: Vec<&String> = lines.iter().filter(|l| l.starts_with('-') && !l.starts_with("---")).collect();
        let added: Vec<&String> = lines.iter().filter(|l| l.starts_with('+') && !l.starts_with("+++")).collect();
        assert_eq!(removed, vec!["-manager"]);
        assert_eq!(added, vec!["+server"]);
    }

    #[test]
    fn end_to_end_identical_configs_report_no_differences() {
        let side1 = TempDir::new().unwrap();
        let side2 = TempDir::new().unwrap();

        let content = "all.export /data\ncontinue /etc/xrootd/config.d\n";
        let config1 = write_main_config(side1.path(), "xrootd.cfg", content);
        let config2 = write_main_config(side2.path(), "xrootd.cfg", content);

        let mapping1 = canonical_mapping(&ReplayTool, &config1).unwrap();
        let mapping2 = canonical_mapping(&ReplayTool, &config2).unwrap();

        assert_eq!(
            unified_diff(&mapping1, &mapping2, "a", "b"),
            DiffOutcome::NoDifferences
        );
    }
}
