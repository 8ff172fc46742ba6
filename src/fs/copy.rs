//! Recursive directory copy.

use crate::error::{Result, XrdconfigError};
use std::fs;
use std::path::Path;

/// Recursively copy a directory tree from `src` to `dst`.
///
/// `dst` and any missing parents are created. Files are copied with their
/// contents; subdirectories are descended into. Symlinks are followed (the
/// copy holds the target's content), which matches how the canonicalizer
/// reads fragment files.
///
/// # Returns
///
/// * `Ok(())` - On success
/// * `Err(XrdconfigError::UserError)` - On any read, create, or copy failure
///   (including insufficient permissions)
pub fn copy_dir_recursive<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Result<()> {
    let src = src.as_ref();
    let dst = dst.as_ref();

    fs::create_dir_all(dst).map_err(|e| {
        XrdconfigError::UserError(format!(
            "failed to create directory '{}': {}",
            dst.display(),
            e
        ))
    })?;

    let entries = fs::read_dir(src).map_err(|e| {
        XrdconfigError::UserError(format!(
            "failed to read directory '{}': {}",
            src.display(),
            e
        ))
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| {
            XrdconfigError::UserError(format!(
                "failed to read directory entry in '{}': {}",
                src.display(),
                e
            ))
        })?;
        let from = entry.path();
        let to = dst.join(entry.file_name());

        let file_type = entry.file_type().map_err(|e| {
            XrdconfigError::UserError(format!(
                "failed to stat '{}': {}",
                from.display(),
                e
            ))
        })?;

        if file_type.is_dir() {
            copy_dir_recursive(&from, &to)?;
        } else {
            fs::copy(&from, &to).map_err(|e| {
                XrdconfigError::UserError(format!(
                    "failed to copy '{}' to '{}': {}",
                    from.display(),
                    to.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}
