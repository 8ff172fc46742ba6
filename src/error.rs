//! Error types for the xrdconfig CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for xrdconfig operations.
///
/// Each variant maps to a specific exit code. All variants are fatal to the
/// current command; recoverable conditions (malformed canonicalizer output
/// lines) are reported as warnings instead and never reach this type.
#[derive(Error, Debug)]
pub enum XrdconfigError {
    /// Command is not yet implemented.
    #[error("{0} is not yet implemented")]
    NotImplemented(String),

    /// User provided invalid arguments or the input files are unusable.
    #[error("{0}")]
    UserError(String),

    /// The external canonicalizer binary could not be located.
    #[error("{0} not found - please make sure xrootd is installed")]
    ToolMissing(String),

    /// The external canonicalizer ran but exited with a failure status.
    #[error("{0}")]
    ToolFailed(String),
}

impl XrdconfigError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            XrdconfigError::NotImplemented(_) => exit_codes::USER_ERROR,
            XrdconfigError::UserError(_) => exit_codes::USER_ERROR,
            XrdconfigError::ToolMissing(_) => exit_codes::TOOL_MISSING,
            XrdconfigError::ToolFailed(_) => exit_codes::TOOL_FAILURE,
        }
    }
}

/// Result type alias for xrdconfig operations.
pub type Result<T> = std::result::Result<T, XrdconfigError>;
