//! Tool settings for xrdconfig.
//!
//! An optional YAML file (`/etc/xrootd/xrdconfig.yaml`) can override how the
//! external canonicalizer is invoked. Unknown fields are ignored for forward
//! compatibility and every field has a default, so a missing file simply
//! means defaults. Named `Settings` rather than `Config` because in this
//! tool "configuration" is the xrootd state under inspection.

use crate::error::{Result, XrdconfigError};
use crate::tool::DEFAULT_TOOL;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default location of the settings file.
pub const DEFAULT_SETTINGS_PATH: &str = "/etc/xrootd/xrdconfig.yaml";

/// Settings controlling canonicalizer invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Canonicalizer command (default: `cconfig`). May carry extra
    /// arguments, e.g. `cconfig -v`; parsed with shell quoting rules.
    #[serde(default = "default_tool")]
    pub tool: String,
}

fn default_tool() -> String {
    DEFAULT_TOOL.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tool: default_tool(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults when the file
    /// does not exist.
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - Parsed (or default) settings
    /// * `Err(XrdconfigError::UserError)` - The file exists but cannot be
    ///   read or parsed
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            XrdconfigError::UserError(format!(
                "failed to read settings file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse settings from a YAML string.
    ///
    /// Unknown fields are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(yaml)
            .map_err(|e| XrdconfigError::UserError(format!("failed to parse settings YAML: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Validate settings values.
    pub fn validate(&self) -> Result<()> {
        if self.tool.trim().is_empty() {
            return Err(XrdconfigError::UserError(
                "settings validation failed: tool must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
