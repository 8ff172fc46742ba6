//! Exit code constants for the xrdconfig CLI.
//!
//! - 0: Success (including the "No differences found" outcome)
//! - 1: Canonicalizer binary not found on the execution path
//! - 2: User error (bad args, missing config file, workspace failure)
//! - 3: Canonicalizer ran but exited with a failure status

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// The external canonicalizer could not be located.
///
/// This code is fixed by the external contract: callers probe for a missing
/// xrootd installation by checking for exit status 1.
pub const TOOL_MISSING: i32 = 1;

/// User error: bad arguments, missing configuration file, or a workspace
/// operation that could not complete.
pub const USER_ERROR: i32 = 2;

/// The canonicalizer was found but exited with a failure status.
pub const TOOL_FAILURE: i32 = 3;
