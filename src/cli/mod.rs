//! CLI argument parsing for xrdconfig.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Default main configuration file of a clustered xrootd deployment.
pub const DEFAULT_CONFIG_FILE: &str = "/etc/xrootd/xrootd-clustered.cfg";

/// xrdconfig: normalize and diff xrootd clustered-configuration files.
///
/// A deployment's configuration is split across a main file and a `config.d`
/// fragment directory linked by a `continue` directive. xrdconfig resolves
/// all includes through the xrootd canonicalizer and shows the flattened
/// configuration the service would actually see, so two configurations can
/// be compared meaningfully.
#[derive(Parser, Debug)]
#[command(name = "xrdconfig")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Override the canonicalizer command (default: cconfig, or the value
    /// from /etc/xrootd/xrdconfig.yaml).
    #[arg(long, global = true)]
    pub tool: Option<String>,
}

/// Available commands for xrdconfig.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Display the flattened effective configuration.
    ///
    /// Resolves all includes and prints the resulting variables, either as
    /// `variable value` lines sorted by variable name or as JSON.
    Display(DisplayArgs),

    /// Diff the flattened views of two configuration files.
    ///
    /// Canonicalizes both configs in isolated workspaces and prints a
    /// zero-context unified diff of their resolved values, or
    /// "No differences found".
    Diff(DiffArgs),

    /// Diff a local configuration against a remote host's.
    ///
    /// Reserved; not yet implemented.
    RemoteDiff,
}

/// Output format selector for `display`.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `variable value` lines sorted by variable name.
    #[default]
    Plain,
    /// A JSON object mapping variable names to values.
    Json,
}

/// Arguments for the `display` command.
#[derive(Parser, Debug)]
pub struct DisplayArgs {
    /// Main configuration file to display.
    #[arg(default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Output format.
    #[arg(short, long, value_enum, default_value = "plain")]
    pub output: OutputFormat,
}

/// Arguments for the `diff` command.
#[derive(Parser, Debug)]
pub struct DiffArgs {
    /// First configuration file ("from" side).
    #[arg(default_value = DEFAULT_CONFIG_FILE)]
    pub config1: PathBuf,

    /// Second configuration file ("to" side).
    #[arg(default_value = DEFAULT_CONFIG_FILE)]
    pub config2: PathBuf,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
