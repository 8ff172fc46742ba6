//! The `display` command: print one config's flattened effective view.

use super::canonical_mapping;
use crate::cli::{DisplayArgs, OutputFormat};
use crate::error::{Result, XrdconfigError};
use crate::tool::Canonicalizer;

/// Canonicalize `args.config` and print the resolved variables.
pub fn cmd_display(args: DisplayArgs, tool: &dyn Canonicalizer) -> Result<()> {
    let mapping = canonical_mapping(tool, &args.config)?;

    match args.output {
        OutputFormat::Plain => {
            for (variable, value) in mapping.iter() {
                println!("{} {}", variable, value);
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&mapping).map_err(|e| {
                XrdconfigError::UserError(format!("failed to serialize mapping to JSON: {}", e))
            })?;
            println!("{}", json);
        }
    }

    Ok(())
}
