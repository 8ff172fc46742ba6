//! The `diff` command: compare the flattened views of two configs.

use super::canonical_mapping;
use crate::cli::DiffArgs;
use crate::compare::{DiffOutcome, unified_diff};
use crate::error::Result;
use crate::tool::Canonicalizer;

/// Canonicalize both configs (each in its own workspace) and print a
/// zero-context unified diff of their resolved values.
///
/// Identical configurations print `No differences found`; that is a normal
/// success outcome, not an error.
pub fn cmd_diff(args: DiffArgs, tool: &dyn Canonicalizer) -> Result<()> {
    let mapping1 = canonical_mapping(tool, &args.config1)?;
    let mapping2 = canonical_mapping(tool, &args.config2)?;

    let outcome = unified_diff(
        &mapping1,
        &mapping2,
        &args.config1.display().to_string(),
        &args.config2.display().to_string(),
    );

    match outcome {
        DiffOutcome::NoDifferences => println!("No differences found"),
        DiffOutcome::Differences(lines) => {
            for line in lines {
                println!("{}", line);
            }
        }
    }

    Ok(())
}
