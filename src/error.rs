//! Error types for the archive manifest tool.

use std::path::PathBuf;
use thiserror::Error;

/// Scan-layer errors. These are fatal: a run that hits one aborts without
/// writing a manifest. Per-entry conditions (unreadable file, failed hash)
/// are not errors; they become [`crate::scan::ScanDiagnostic`] values and
/// the scan continues.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Archive root not found: {0}")]
    RootNotFound(PathBuf),

    #[error("Archive root is not a directory: {0}")]
    RootNotADirectory(PathBuf),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Scan I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Service/CLI-layer errors
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Scan failed: {0}")]
    Scan(#[from] ScanError),

    #[error("Manifest not found: {0}. Run `folio scan` to create one.")]
    ManifestNotFound(PathBuf),

    #[error("Manifest parse error at line {line}: {reason}")]
    ManifestParse { line: usize, reason: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for ArchiveError {
    fn from(err: config::ConfigError) -> Self {
        ArchiveError::ConfigError(err.to_string())
    }
}
