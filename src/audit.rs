//! Archive hygiene audit
//!
//! Flags documents whose names or content would degrade the archive over
//! time: uppercase or unsafe characters in file names, zero-byte files, and
//! duplicated content. The only automated fix is lowercasing file names;
//! everything else is report-only.

use crate::error::ArchiveError;
use crate::manifest::builder::ScanOutcome;
use crate::scan::diagnostics::ScanDiagnostic;
use crate::scan::path::key_to_path;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Finding categories, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// File name contains an uppercase letter. Fixable with `--fix`.
    UppercaseName,
    /// File name contains characters outside `a-z0-9._-` after lowercasing.
    UnsafeName,
    /// Zero-byte document.
    EmptyFile,
    /// Two or more documents share a content hash.
    DuplicateContent,
}

impl FindingKind {
    pub fn label(&self) -> &'static str {
        match self {
            FindingKind::UppercaseName => "uppercase name",
            FindingKind::UnsafeName => "unsafe name",
            FindingKind::EmptyFile => "empty file",
            FindingKind::DuplicateContent => "duplicate content",
        }
    }
}

/// One hygiene finding against a document.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub kind: FindingKind,
    /// Relative path of the offending document (first of the group for
    /// duplicate-content findings).
    pub path: String,
    pub detail: String,
}

/// Full audit output for a tree.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub findings: Vec<Finding>,
    pub diagnostics: Vec<ScanDiagnostic>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty() && self.diagnostics.is_empty()
    }

    /// Findings that `apply_fixes` would act on.
    pub fn fixable(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.kind == FindingKind::UppercaseName)
    }
}

fn file_name(relative_path: &str) -> &str {
    relative_path.rsplit('/').next().unwrap_or(relative_path)
}

fn has_unsafe_chars(name: &str) -> bool {
    name.to_lowercase()
        .chars()
        .any(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '_' || c == '-'))
}

/// Audit a scanned tree for hygiene findings.
pub fn audit_archive(outcome: &ScanOutcome) -> AuditReport {
    let mut findings = Vec::new();
    let mut by_hash: BTreeMap<String, Vec<&str>> = BTreeMap::new();

    for entry in outcome.manifest.entries() {
        let name = file_name(&entry.relative_path);

        if name.chars().any(|c| c.is_uppercase()) {
            findings.push(Finding {
                kind: FindingKind::UppercaseName,
                path: entry.relative_path.clone(),
                detail: format!("rename to {}", name.to_lowercase()),
            });
        }

        if has_unsafe_chars(name) {
            findings.push(Finding {
                kind: FindingKind::UnsafeName,
                path: entry.relative_path.clone(),
                detail: "name contains characters outside a-z0-9._-".to_string(),
            });
        }

        if entry.size_bytes == 0 {
            findings.push(Finding {
                kind: FindingKind::EmptyFile,
                path: entry.relative_path.clone(),
                detail: "document is empty".to_string(),
            });
        }

        by_hash
            .entry(entry.hash_hex())
            .or_default()
            .push(&entry.relative_path);
    }

    for (hash, paths) in &by_hash {
        if paths.len() > 1 {
            findings.push(Finding {
                kind: FindingKind::DuplicateContent,
                path: paths[0].to_string(),
                detail: format!(
                    "{} documents share content {}: {}",
                    paths.len(),
                    &hash[..12],
                    paths.join(", ")
                ),
            });
        }
    }

    info!(findings = findings.len(), "audit complete");

    AuditReport {
        findings,
        diagnostics: outcome.diagnostics.clone(),
    }
}

/// Result of applying fixes: renames performed and renames skipped because
/// the lowercase target already exists.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FixOutcome {
    /// (old relative path, new relative path)
    pub renamed: Vec<(String, String)>,
    /// (old relative path, reason)
    pub skipped: Vec<(String, String)>,
}

/// Rename uppercase file names to their lowercase form on disk.
///
/// Only the final path component changes. A rename whose target already
/// exists is skipped and reported instead of clobbering the other document.
pub fn apply_fixes(root: &Path, report: &AuditReport) -> Result<FixOutcome, ArchiveError> {
    let mut outcome = FixOutcome::default();

    for finding in report.fixable() {
        let old_rel = finding.path.as_str();
        let name = file_name(old_rel);
        let lowered = name.to_lowercase();

        let new_rel = match old_rel.rfind('/') {
            Some(idx) => format!("{}/{}", &old_rel[..idx], lowered),
            None => lowered.clone(),
        };

        let old_path = key_to_path(root, old_rel);
        let new_path = key_to_path(root, &new_rel);

        if new_path.exists() {
            warn!(from = old_rel, to = %new_rel, "rename target exists, skipping");
            outcome
                .skipped
                .push((old_rel.to_string(), format!("target {} already exists", new_rel)));
            continue;
        }

        fs::rename(&old_path, &new_path)?;
        info!(from = old_rel, to = %new_rel, "renamed document");
        outcome.renamed.push((old_rel.to_string(), new_rel));
    }

    Ok(outcome)
}
