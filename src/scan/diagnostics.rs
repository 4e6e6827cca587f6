//! Recovered per-entry scan conditions.
//!
//! A diagnostic records a file that was skipped during a scan. Diagnostics
//! are collected and surfaced in the run summary; they never abort the run
//! and nothing is retried.

use serde::{Deserialize, Serialize};

/// Why an entry was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The entry or its subtree could not be read.
    PermissionDenied,
    /// The file could not be read while hashing its content.
    HashFailure,
    /// The relative path cannot be represented in the manifest line format
    /// (contains a tab or newline) or escapes the root.
    UnrepresentablePath,
    /// Another file already produced the same normalized relative path.
    DuplicatePath,
}

impl SkipReason {
    /// Short label for text output.
    pub fn label(&self) -> &'static str {
        match self {
            SkipReason::PermissionDenied => "permission denied",
            SkipReason::HashFailure => "hash failure",
            SkipReason::UnrepresentablePath => "unrepresentable path",
            SkipReason::DuplicatePath => "duplicate path",
        }
    }
}

/// A skipped entry: path, reason, and the underlying detail message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanDiagnostic {
    /// Path as encountered (display form; may be absolute for walk errors).
    pub path: String,
    pub reason: SkipReason,
    pub detail: String,
}

impl ScanDiagnostic {
    pub fn new(path: impl Into<String>, reason: SkipReason, detail: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason,
            detail: detail.into(),
        }
    }
}
