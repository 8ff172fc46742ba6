//! External canonicalizer invocation.
//!
//! The canonicalizer (`cconfig`, from the xrootd distribution) is a black
//! box: it reads a configuration file, resolves all includes, and reports the
//! flattened effective configuration on its *error* stream. That stderr text
//! is the sole data channel this tool consumes; the contract is fixed by the
//! external program.
//!
//! The [`Canonicalizer`] trait is the seam that keeps the pipeline testable
//! without the real binary.

use crate::error::{Result, XrdconfigError};
use std::path::Path;
use std::process::Command;

/// Default canonicalizer command, shipped with xrootd.
pub const DEFAULT_TOOL: &str = "cconfig";

/// A capability that resolves a configuration file's includes and returns the
/// diagnostic text describing the flattened result.
pub trait Canonicalizer {
    /// Canonicalize the given (already materialized) configuration file and
    /// return the raw diagnostic text.
    fn canonicalize(&self, config_file: &Path) -> Result<String>;
}

/// Invoker for the real external canonicalizer.
///
/// Runs `<tool> -c <config-file>` synchronously and captures the diagnostic
/// stream. No timeout is imposed; the tool performs local file resolution
/// only and is assumed to terminate.
#[derive(Debug, Clone)]
pub struct CconfigTool {
    program: String,
    args: Vec<String>,
}

impl CconfigTool {
    /// Build an invoker from a command string, e.g. `"cconfig"` or
    /// `"cconfig -v"`.
    ///
    /// The string is split with shell-words, so quoting works the way it
    /// does in a shell.
    ///
    /// # Returns
    ///
    /// * `Ok(CconfigTool)` - On a non-empty, well-formed command
    /// * `Err(XrdconfigError::UserError)` - On unbalanced quotes or an empty
    ///   command
    pub fn from_command(command: &str) -> Result<Self> {
        let words = shell_words::split(command).map_err(|e| {
            XrdconfigError::UserError(format!(
                "failed to parse canonicalizer command '{}': {}\n\
                 Fix: check for unmatched quotes or invalid escape sequences.",
                command, e
            ))
        })?;

        let mut words = words.into_iter();
        let program = words.next().ok_or_else(|| {
            XrdconfigError::UserError(format!(
                "canonicalizer command is empty after parsing: '{}'",
                command
            ))
        })?;

        Ok(Self {
            program,
            args: words.collect(),
        })
    }

    /// The program name the invoker will execute.
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Canonicalizer for CconfigTool {
    fn canonicalize(&self, config_file: &Path) -> Result<String> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg("-c")
            .arg(config_file)
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    XrdconfigError::ToolMissing(self.program.clone())
                } else {
                    XrdconfigError::ToolFailed(format!(
                        "failed to execute {}: {}",
                        self.program, e
                    ))
                }
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if output.status.success() {
            // The resolved-configuration report lives on stderr.
            Ok(stderr)
        } else {
            let exit_code = output.status.code().unwrap_or(-1);
            let detail = if stderr.trim().is_empty() {
                String::from_utf8_lossy(&output.stdout).trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            Err(XrdconfigError::ToolFailed(format!(
                "{} -c {} failed (exit code {}): {}",
                self.program,
                config_file.display(),
                exit_code,
                detail
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit_codes;

    #[test]
    fn from_command_single_word() {
        let tool = CconfigTool::from_command("cconfig").unwrap();
        assert_eq!(tool.program(), "cconfig");
        assert!(tool.args.is_empty());
    }

    #[test]
    fn from_command_with_extra_args() {
        let tool = CconfigTool::from_command("cconfig -v --lang en").unwrap();
        assert_eq!(tool.program(), "cconfig");
        assert_eq!(tool.args, vec!["-v", "--lang", "en"]);
    }

    #[test]
    fn from_command_respects_quoting() {
        let tool = CconfigTool::from_command("'/opt/x r/cconfig' -v").unwrap();
        assert_eq!(tool.program(), "/opt/x r/cconfig");
        assert_eq!(tool.args, vec!["-v"]);
    }

    #[test]
    fn from_command_empty_fails() {
        let result = CconfigTool::from_command("   ");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("empty"));
    }

    #[test]
    fn from_command_unbalanced_quote_fails() {
        let result = CconfigTool::from_command("cconfig 'oops");
        assert!(result.is_err());
    }

    #[test]
    fn missing_binary_maps_to_tool_missing() {
        let tool = CconfigTool::from_command("xrdconfig-no-such-binary-on-any-path").unwrap();
        let result = tool.canonicalize(Path::new("/dev/null"));

        let err = result.unwrap_err();
        assert!(matches!(err, XrdconfigError::ToolMissing(_)));
        assert_eq!(err.exit_code(), exit_codes::TOOL_MISSING);
        assert!(err.to_string().contains("make sure xrootd is installed"));
    }

    #[cfg(unix)]
    mod unix {
        use super::*;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        use tempfile::TempDir;

        fn stub_tool(dir: &TempDir, script: &str) -> CconfigTool {
            let path = dir.path().join("fake-cconfig");
            fs::write(&path, script).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            CconfigTool::from_command(&shell_words::quote(&path.to_string_lossy()).into_owned())
                .unwrap()
        }

        #[test]
        fn captures_diagnostic_stream_not_stdout() {
            let dir = TempDir::new().unwrap();
            let tool = stub_tool(
                &dir,
                "#!/bin/sh\necho 'stdout noise'\necho 'FOO bar' >&2\n",
            );

            let text = tool.canonicalize(Path::new("/dev/null")).unwrap();
            assert_eq!(text, "FOO bar\n");
        }

        #[test]
        fn nonzero_exit_maps_to_tool_failed() {
            let dir = TempDir::new().unwrap();
            let tool = stub_tool(&dir, "#!/bin/sh\necho 'boom' >&2\nexit 2\n");

            let err = tool.canonicalize(Path::new("/dev/null")).unwrap_err();
            assert!(matches!(err, XrdconfigError::ToolFailed(_)));
            assert_eq!(err.exit_code(), exit_codes::TOOL_FAILURE);
            assert!(err.to_string().contains("exit code 2"));
            assert!(err.to_string().contains("boom"));
        }

        #[test]
        fn passes_config_path_after_check_flag() {
            let dir = TempDir::new().unwrap();
            // Echo the arguments back on stderr so the test can see them.
            let tool = stub_tool(&dir, "#!/bin/sh\necho \"args $*\" >&2\n");

            let text = tool.canonicalize(Path::new("/etc/xrootd/a.cfg")).unwrap();
            assert_eq!(text, "args -c /etc/xrootd/a.cfg\n");
        }
    }
}
