//! Atomic file write for xrdconfig.
//!
//! The workspace materializer rewrites the copied configuration file after
//! relocating it. That rewrite must never leave a partially written file
//! behind, so all writes follow this pattern:
//!
//! 1. Write content to a temporary file in the same directory
//! 2. Sync the file to disk (fsync)
//! 3. Atomically replace the target with `rename()`
//!
//! Source and destination live in the same directory, so the rename stays on
//! one filesystem. On crash, a temporary file named `.{filename}.tmp` may
//! remain; the materializer's remove-and-recreate of the workspace clears it
//! on the next run.

use crate::error::{Result, XrdconfigError};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Atomically write a string to a file.
///
/// Writes the content to a temporary file, syncs it to disk, and then
/// atomically replaces the target file, so the target is never observed in a
/// partial state.
///
/// # Arguments
///
/// * `path` - The target file path
/// * `content` - The text to write
///
/// # Returns
///
/// * `Ok(())` - On successful atomic write
/// * `Err(XrdconfigError::UserError)` - On write or rename failure
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();

    let temp_path = generate_temp_path(path)?;

    write_and_sync(&temp_path, content.as_bytes())?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        XrdconfigError::UserError(format!(
            "failed to atomically replace '{}': {}",
            path.display(),
            e
        ))
    })?;

    // Sync the parent directory so the rename itself is durable.
    if let Some(parent) = path.parent()
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }

    Ok(())
}

/// Generate a temporary file path in the same directory as the target.
fn generate_temp_path(target: &Path) -> Result<std::path::PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| XrdconfigError::UserError("invalid file path".to_string()))?;

    let temp_name = format!(".{}.tmp", filename);
    Ok(parent.join(temp_name))
}

/// Write content to a file and sync to disk.
fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| {
        XrdconfigError::UserError(format!(
            "failed to create temporary file '{}': {}",
            path.display(),
            e
        ))
    })?;

    file.write_all(content).map_err(|e| {
        let _ = fs::remove_file(path);
        XrdconfigError::UserError(format!("failed to write to temporary file: {}", e))
    })?;

    file.sync_all().map_err(|e| {
        let _ = fs::remove_file(path);
        XrdconfigError::UserError(format!("failed to sync temporary file to disk: {}", e))
    })?;

    Ok(())
}
