//! Path canonicalization and normalization utilities

use crate::error::ScanError;
use std::path::{Component, Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Canonicalize the archive root for scanning.
///
/// Fails with `RootNotFound` if the path does not exist and
/// `RootNotADirectory` if it exists but is not a directory. Uses dunce for
/// cross-platform canonicalization (no UNC paths on Windows).
pub fn canonicalize_root(root: &Path) -> Result<PathBuf, ScanError> {
    if !root.exists() {
        return Err(ScanError::RootNotFound(root.to_path_buf()));
    }

    let canonical = dunce::canonicalize(root).map_err(|e| {
        ScanError::InvalidPath(format!("Failed to canonicalize root {}: {}", root.display(), e))
    })?;

    if !canonical.is_dir() {
        return Err(ScanError::RootNotADirectory(canonical));
    }

    Ok(canonical)
}

/// Compute the manifest key for a file under the archive root.
///
/// The key is the root-relative path with `/` as separator on every
/// platform, Unicode-normalized to NFC so that byte-wise ordering and
/// equality are stable across filesystems that store names in different
/// normalization forms.
pub fn relative_key(root: &Path, path: &Path) -> Result<String, ScanError> {
    let relative = path.strip_prefix(root).map_err(|_| {
        ScanError::InvalidPath(format!(
            "Path {} is outside archive root {}",
            path.display(),
            root.display()
        ))
    })?;

    let mut parts: Vec<String> = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(name) => parts.push(name.to_string_lossy().into_owned()),
            other => {
                return Err(ScanError::InvalidPath(format!(
                    "Unexpected path component {:?} in {}",
                    other,
                    relative.display()
                )))
            }
        }
    }

    if parts.is_empty() {
        return Err(ScanError::InvalidPath(format!(
            "Path {} is the archive root itself",
            path.display()
        )));
    }

    Ok(parts.join("/").nfc().collect())
}

/// Resolve a manifest key back to an on-disk path under the root.
pub fn key_to_path(root: &Path, key: &str) -> PathBuf {
    let mut path = root.to_path_buf();
    for part in key.split('/') {
        path.push(part);
    }
    path
}
