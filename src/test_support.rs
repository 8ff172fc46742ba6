//! Shared test fixtures for xrdconfig.

use crate::error::{Result, XrdconfigError};
use crate::tool::Canonicalizer;
use crate::workspace::FRAGMENT_DIR_NAME;
use std::path::{Path, PathBuf};

/// Write a main configuration file under `dir` and return its path.
pub(crate) fn write_main_config(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Create a `config.d` fragment directory under `dir` with the given
/// (filename, content) entries. An empty slice creates an empty directory.
pub(crate) fn write_fragment_dir(dir: &Path, fragments: &[(&str, &str)]) -> PathBuf {
    let fragment_dir = dir.join(FRAGMENT_DIR_NAME);
    std::fs::create_dir(&fragment_dir).unwrap();
    for (name, content) in fragments {
        std::fs::write(fragment_dir.join(name), content).unwrap();
    }
    fragment_dir
}

/// Stub canonicalizer that replays the materialized file's own lines as
/// diagnostic text, the way the real tool reports a config with no includes
/// left to resolve: continue directives become `Config continuing with ...`
/// trace lines, everything else is echoed verbatim.
pub(crate) struct ReplayTool;

impl Canonicalizer for ReplayTool {
    fn canonicalize(&self, config_file: &Path) -> Result<String> {
        let content = std::fs::read_to_string(config_file).map_err(|e| {
            XrdconfigError::UserError(format!(
                "failed to read '{}': {}",
                config_file.display(),
                e
            ))
        })?;

        let mut out = String::new();
        for line in content.lines() {
            if let Some(target) = line.strip_prefix("continue ") {
                out.push_str("Config continuing with ");
                out.push_str(target);
            } else {
                out.push_str(line);
            }
            out.push('\n');
        }
        Ok(out)
    }
}
