//! Manifest builder: drives the walker and hasher into a sorted manifest

use crate::error::ScanError;
use crate::manifest::{hasher, DocumentEntry, Manifest};
use crate::scan::diagnostics::{ScanDiagnostic, SkipReason};
use crate::scan::path;
use crate::scan::walker::{Walker, WalkerConfig, WalkItem};
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Result of a scan: the manifest plus every recovered condition.
#[derive(Debug)]
pub struct ScanOutcome {
    pub manifest: Manifest,
    pub diagnostics: Vec<ScanDiagnostic>,
    pub elapsed: Duration,
}

/// Builds a manifest from the filesystem.
///
/// Single-threaded and sequential: the archive workload is a modest set of
/// documents and hashing is I/O-bound, so no coordination is warranted.
#[derive(Debug)]
pub struct ManifestBuilder {
    walker: Walker,
}

impl ManifestBuilder {
    /// Create a builder for the given root with default walker configuration.
    pub fn new(root: PathBuf) -> Result<Self, ScanError> {
        Ok(Self {
            walker: Walker::new(root)?,
        })
    }

    /// Create a builder with custom walker configuration.
    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Result<Self, ScanError> {
        Ok(Self {
            walker: Walker::with_config(root, config)?,
        })
    }

    pub fn root(&self) -> &std::path::Path {
        self.walker.root()
    }

    /// Scan the tree and build the manifest.
    ///
    /// Per-entry failures (unreadable entries, read errors mid-hash,
    /// unrepresentable or duplicate paths) become diagnostics; the scan
    /// continues past them and nothing is retried.
    pub fn build(&self) -> ScanOutcome {
        let started = Instant::now();
        let root = self.walker.root().to_path_buf();

        let mut entries: Vec<DocumentEntry> = Vec::new();
        let mut diagnostics: Vec<ScanDiagnostic> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for item in self.walker.files() {
            let file = match item {
                WalkItem::File(file) => file,
                WalkItem::Skipped(diag) => {
                    warn!(path = %diag.path, reason = diag.reason.label(), "skipping entry");
                    diagnostics.push(diag);
                    continue;
                }
            };

            let key = match path::relative_key(&root, &file.path) {
                Ok(key) => key,
                Err(e) => {
                    let diag = ScanDiagnostic::new(
                        file.path.display().to_string(),
                        SkipReason::UnrepresentablePath,
                        e.to_string(),
                    );
                    warn!(path = %diag.path, "skipping entry with unusable path");
                    diagnostics.push(diag);
                    continue;
                }
            };

            // Tabs and newlines cannot appear in the line format.
            if key.contains('\t') || key.contains('\n') {
                let diag = ScanDiagnostic::new(
                    key,
                    SkipReason::UnrepresentablePath,
                    "path contains a tab or newline",
                );
                warn!(path = %diag.path, "skipping entry with unusable path");
                diagnostics.push(diag);
                continue;
            }

            if !seen.insert(key.clone()) {
                let diag = ScanDiagnostic::new(
                    key,
                    SkipReason::DuplicatePath,
                    "normalizes to the same path as an earlier entry; first occurrence kept",
                );
                warn!(path = %diag.path, "skipping duplicate path");
                diagnostics.push(diag);
                continue;
            }

            match hasher::hash_file(&file.path) {
                Ok(content_hash) => {
                    debug!(path = %key, size = file.size, "hashed document");
                    entries.push(DocumentEntry {
                        relative_path: key,
                        size_bytes: file.size,
                        content_hash,
                    });
                }
                Err(e) => {
                    // The key was consumed by the dedup set; a later retry of
                    // the same path in this walk would be a real duplicate.
                    let diag = ScanDiagnostic::new(key, SkipReason::HashFailure, e.to_string());
                    warn!(path = %diag.path, "failed to hash document");
                    diagnostics.push(diag);
                }
            }
        }

        let manifest = Manifest::from_entries(entries);
        let elapsed = started.elapsed();

        info!(
            documents = manifest.len(),
            skipped = diagnostics.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "scan complete"
        );

        ScanOutcome {
            manifest,
            diagnostics,
            elapsed,
        }
    }
}
