//! Drift detection: compare a stored manifest against the tree on disk

use crate::manifest::builder::ScanOutcome;
use crate::manifest::Manifest;
use crate::scan::diagnostics::ScanDiagnostic;
use serde::Serialize;
use std::cmp::Ordering;
use tracing::info;

/// Result of verifying a tree against its manifest.
///
/// Drift is a report, not a fault: the exit status stays zero. Only fatal
/// errors (missing root, unreadable manifest) abort a verify run.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyReport {
    /// On disk but absent from the manifest.
    pub added: Vec<String>,
    /// In the manifest but no longer on disk.
    pub removed: Vec<String>,
    /// Present in both with a differing size or content hash.
    pub modified: Vec<String>,
    /// Entries skipped during the fresh scan.
    pub diagnostics: Vec<ScanDiagnostic>,
}

impl VerifyReport {
    /// True when the tree matches the manifest exactly and nothing was
    /// skipped.
    pub fn is_clean(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.modified.is_empty()
            && self.diagnostics.is_empty()
    }

    pub fn drift_count(&self) -> usize {
        self.added.len() + self.removed.len() + self.modified.len()
    }
}

/// Compare a stored manifest against a fresh scan of the tree.
///
/// Both entry lists are sorted by path, so a single merge pass classifies
/// every document.
pub fn verify_archive(stored: &Manifest, current: &ScanOutcome) -> VerifyReport {
    let mut added = Vec::new();
    let mut removed = Vec::new();
    let mut modified = Vec::new();

    let stored_entries = stored.entries();
    let current_entries = current.manifest.entries();
    let mut i = 0;
    let mut j = 0;

    while i < stored_entries.len() && j < current_entries.len() {
        let old = &stored_entries[i];
        let new = &current_entries[j];
        match old.relative_path.as_bytes().cmp(new.relative_path.as_bytes()) {
            Ordering::Less => {
                removed.push(old.relative_path.clone());
                i += 1;
            }
            Ordering::Greater => {
                added.push(new.relative_path.clone());
                j += 1;
            }
            Ordering::Equal => {
                if old.size_bytes != new.size_bytes || old.content_hash != new.content_hash {
                    modified.push(new.relative_path.clone());
                }
                i += 1;
                j += 1;
            }
        }
    }
    for old in &stored_entries[i..] {
        removed.push(old.relative_path.clone());
    }
    for new in &current_entries[j..] {
        added.push(new.relative_path.clone());
    }

    let report = VerifyReport {
        added,
        removed,
        modified,
        diagnostics: current.diagnostics.clone(),
    };

    info!(
        added = report.added.len(),
        removed = report.removed.len(),
        modified = report.modified.len(),
        "verify complete"
    );

    report
}
