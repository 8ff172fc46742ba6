//! Canonical mapping of resolved configuration variables.
//!
//! The canonicalizer reports the fully flattened effective configuration as
//! line-oriented diagnostic text. This module parses that text into a
//! [`CanonicalMapping`]: variable name to resolved value, unique keys, last
//! write wins. Malformed lines are reported as warnings and skipped; a single
//! bad line never aborts the run.

use serde::Serialize;
use std::collections::BTreeMap;

/// Trace line emitted by the canonicalizer when it descends into a fragment
/// directory. Not configuration state.
pub const CONTINUATION_TRACE_PREFIX: &str = "Config continuing with";

/// Echo of the continue directive itself. Not configuration state.
pub const CONTINUE_ECHO_PREFIX: &str = "continue ";

/// Ordered mapping of variable name to resolved value.
///
/// Keys are unique; inserting an existing key overwrites its value, matching
/// how configuration overrides layer. Iteration is in ascending key order,
/// which is the order every consumer (display, json, diff) needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CanonicalMapping {
    entries: BTreeMap<String, String>,
}

impl CanonicalMapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable, overwriting any previous value (last write wins).
    pub fn insert(&mut self, variable: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(variable.into(), value.into());
    }

    /// Look up a variable's resolved value.
    pub fn get(&self, variable: &str) -> Option<&str> {
        self.entries.get(variable).map(String::as_str)
    }

    /// Number of variables in the mapping.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the mapping holds no variables.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over (variable, value) pairs in ascending variable order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The value sequence ordered by ascending variable name.
    ///
    /// This is the comparator's input: keyed order makes diffs stable no
    /// matter how the canonicalizer happened to emit its lines.
    pub fn values_by_variable(&self) -> Vec<&str> {
        self.entries.values().map(String::as_str).collect()
    }
}

/// Result of parsing canonicalizer diagnostic text.
#[derive(Debug, Clone, Default)]
pub struct ParsedDiagnostics {
    /// The resolved variable mapping.
    pub mapping: CanonicalMapping,
    /// One warning per line that did not parse. Recoverable; the command
    /// layer prints these to stderr and continues.
    pub warnings: Vec<String>,
}

/// Parse the canonicalizer's diagnostic text into a mapping.
///
/// Known non-data lines are skipped: the tool's own trace of include
/// resolution (`Config continuing with ...`) and echoes of the continue
/// directive (`continue ...`). Every other line splits at the first space
/// into (variable, value); the value keeps trailing spaces but loses leading
/// ones. Lines with no space produce a warning and are skipped.
pub fn parse_diagnostics(text: &str) -> ParsedDiagnostics {
    let mut parsed = ParsedDiagnostics::default();

    for line in text.lines() {
        if line.starts_with(CONTINUATION_TRACE_PREFIX) || line.starts_with(CONTINUE_ECHO_PREFIX) {
            continue;
        }

        match line.split_once(' ') {
            Some((variable, value)) => {
                parsed
                    .mapping
                    .insert(variable, value.trim_start_matches(' '));
            }
            None => {
                parsed
                    .warnings
                    .push(format!("Unexpected output from canonicalizer: {}", line));
            }
        }
    }

    parsed
}
