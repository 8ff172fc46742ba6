//! Workspace materialization for xrdconfig.
//!
//! A workspace is an isolated, disposable copy of a main configuration file
//! plus its `config.d` fragment directory. The canonicalizer runs against the
//! copy, never the originals. Materializing rewrites the copy's `continue`
//! directive to point at the relocated fragment directory, making the
//! workspace self-contained.
//!
//! Materialization destroys and recreates its target root, so re-running
//! against the same location is idempotent: nothing from an earlier run
//! survives. Concurrent runs against the same root are not safe; callers use
//! one freshly created temporary root per run.

use crate::error::{Result, XrdconfigError};
use crate::fs::{atomic_write_file, copy_dir_recursive};
use std::fs;
use std::path::{Path, PathBuf};

/// Conventional name of the fragment directory, sibling to the main file.
pub const FRAGMENT_DIR_NAME: &str = "config.d";

/// First token of the include directive.
const CONTINUE_TOKEN: &str = "continue";

/// An isolated copy of a configuration file and its fragments.
#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
    config_file: PathBuf,
}

impl Workspace {
    /// Materialize `config_path` (and its sibling `config.d`, if present)
    /// into the directory `root`.
    ///
    /// Any existing file or directory at `root` is removed first; the
    /// workspace never accumulates stale fragments across runs. The copied
    /// main file's `continue` directive is rewritten to the workspace's own
    /// fragment path, whether or not that directory exists on disk (the
    /// canonicalizer treats a missing include target as "no fragments").
    ///
    /// # Arguments
    ///
    /// * `config_path` - The main configuration file to isolate
    /// * `root` - Target directory for the workspace
    ///
    /// # Returns
    ///
    /// * `Ok(Workspace)` - The materialized workspace
    /// * `Err(XrdconfigError::UserError)` - When the main file does not
    ///   exist, or any copy/rewrite step fails (e.g. permissions)
    pub fn materialize<P: AsRef<Path>, Q: AsRef<Path>>(config_path: P, root: Q) -> Result<Self> {
        let config_path = config_path.as_ref();
        let root = root.as_ref();

        if !config_path.is_file() {
            return Err(XrdconfigError::UserError(format!(
                "configuration file not found: {}",
                config_path.display()
            )));
        }

        let file_name = config_path.file_name().ok_or_else(|| {
            XrdconfigError::UserError(format!(
                "configuration path has no file name: {}",
                config_path.display()
            ))
        })?;

        // The rewritten directive must carry the workspace fragment path in
        // absolute form, so the copy stays self-contained wherever the
        // canonicalizer is run from.
        let root = std::path::absolute(root).map_err(|e| {
            XrdconfigError::UserError(format!(
                "failed to resolve workspace path '{}': {}",
                root.display(),
                e
            ))
        })?;
        let root = root.as_path();

        // Clean slate: destroy any previous workspace at this location,
        // whether it is a directory or a plain file.
        if root.exists() {
            let removal = if root.is_dir() {
                fs::remove_dir_all(root)
            } else {
                fs::remove_file(root)
            };
            removal.map_err(|e| {
                XrdconfigError::UserError(format!(
                    "failed to remove existing workspace '{}': {}",
                    root.display(),
                    e
                ))
            })?;
        }
        fs::create_dir_all(root).map_err(|e| {
            XrdconfigError::UserError(format!(
                "failed to create workspace '{}': {}",
                root.display(),
                e
            ))
        })?;

        let config_copy = root.join(file_name);
        fs::copy(config_path, &config_copy).map_err(|e| {
            XrdconfigError::UserError(format!(
                "failed to copy '{}' to '{}': {}",
                config_path.display(),
                config_copy.display(),
                e
            ))
        })?;

        let workspace = Self {
            root: root.to_path_buf(),
            config_file: config_copy,
        };

        // Fragment directory is optional; absence is not an error.
        let source_fragments = config_path
            .parent()
            .unwrap_or(Path::new("."))
            .join(FRAGMENT_DIR_NAME);
        if source_fragments.is_dir() {
            copy_dir_recursive(&source_fragments, workspace.fragment_dir())?;
        }

        workspace.rewrite_continue_directive()?;

        Ok(workspace)
    }

    /// The workspace root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The workspace copy of the main configuration file.
    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Path of the fragment directory inside the workspace.
    ///
    /// Computed unconditionally; the directory only exists on disk when the
    /// source had fragments.
    pub fn fragment_dir(&self) -> PathBuf {
        self.root.join(FRAGMENT_DIR_NAME)
    }

    /// Rewrite every continue directive in the copied main file to point at
    /// the workspace fragment directory.
    ///
    /// The rewrite goes through an atomic write, so an interrupted run never
    /// leaves a half-rewritten copy.
    fn rewrite_continue_directive(&self) -> Result<()> {
        let content = fs::read_to_string(&self.config_file).map_err(|e| {
            XrdconfigError::UserError(format!(
                "failed to read '{}': {}",
                self.config_file.display(),
                e
            ))
        })?;

        let rewritten = rewrite_continue_lines(&content, &self.fragment_dir());
        if rewritten != content {
            atomic_write_file(&self.config_file, &rewritten)?;
        }
        Ok(())
    }
}

/// Replace every continue directive line in `content` with
/// `continue <fragment_dir>`, leaving all other lines byte-identical.
///
/// Line endings are preserved exactly as read, including the presence or
/// absence of a final newline.
fn rewrite_continue_lines(content: &str, fragment_dir: &Path) -> String {
    let mut out = String::with_capacity(content.len());

    for line in content.split_inclusive('\n') {
        let (body, terminator) = match line.strip_suffix('\n') {
            Some(body) => (body, "\n"),
            None => (line, ""),
        };
        if is_continue_directive(body) {
            out.push_str(CONTINUE_TOKEN);
            out.push(' ');
            out.push_str(&fragment_dir.display().to_string());
            out.push_str(terminator);
        } else {
            out.push_str(line);
        }
    }

    out
}

/// True when the line's first token is exactly `continue`.
///
/// The token must be followed by whitespace or end-of-line; a line starting
/// with `continuefoo` is not a directive.
fn is_continue_directive(line: &str) -> bool {
    match line.strip_prefix(CONTINUE_TOKEN) {
        Some(rest) => rest.is_empty() || rest.starts_with([' ', '\t']),
        None => false,
    }
}
