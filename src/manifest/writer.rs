//! Manifest output: single fixed location, atomic overwrite

use crate::error::ArchiveError;
use crate::manifest::Manifest;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Resolve the manifest output location against the archive root.
pub fn resolve_output_path(root: &Path, configured: &Path) -> PathBuf {
    if configured.is_absolute() {
        configured.to_path_buf()
    } else {
        root.join(configured)
    }
}

/// Write the manifest to its output location, replacing any prior manifest.
///
/// The bytes go to a temporary sibling first, then rename over the target,
/// so a prior manifest is never left half-overwritten.
pub fn write_manifest(manifest: &Manifest, output: &Path) -> Result<(), ArchiveError> {
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }

    let file_name = output
        .file_name()
        .ok_or_else(|| ArchiveError::ConfigError(format!(
            "Manifest output path has no file name: {}",
            output.display()
        )))?
        .to_os_string();

    let mut tmp_name = file_name;
    tmp_name.push(".tmp");
    let tmp_path = output.with_file_name(tmp_name);

    fs::write(&tmp_path, manifest.to_bytes())?;
    fs::rename(&tmp_path, output)?;

    info!(path = %output.display(), documents = manifest.len(), "manifest written");
    Ok(())
}
