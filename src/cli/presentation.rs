//! CLI presentation: text and JSON rendering for command results.

use crate::audit::{AuditReport, FixOutcome};
use crate::error::ArchiveError;
use crate::init::InitOutcome;
use crate::manifest::builder::ScanOutcome;
use crate::scan::diagnostics::ScanDiagnostic;
use crate::verify::VerifyReport;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

/// Manifest summary for `folio status`.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub indexed: bool,
    pub manifest_path: String,
    pub documents: u64,
    pub total_bytes: u64,
    /// BLAKE3 digest of the manifest bytes, hex.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    /// When the manifest file was last written, RFC 3339 UTC.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated: Option<String>,
}

fn json_string<T: Serialize>(value: &T) -> Result<String, ArchiveError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ArchiveError::ConfigError(format!("Failed to render JSON: {}", e)))
}

fn push_diagnostics(out: &mut String, diagnostics: &[ScanDiagnostic]) {
    if diagnostics.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{} ({})", "Skipped".yellow(), diagnostics.len());
    for diag in diagnostics {
        let _ = writeln!(out, "  {} [{}] {}", diag.path, diag.reason.label(), diag.detail);
    }
}

pub fn format_init_summary(outcome: &InitOutcome) -> String {
    if outcome.config_written {
        format!(
            "Initialized archive state in {}\nWrote {}",
            outcome.state_dir.display(),
            outcome.config_path.display()
        )
    } else {
        format!(
            "Archive state already present in {}\nKept existing {} (use --force to overwrite)",
            outcome.state_dir.display(),
            outcome.config_path.display()
        )
    }
}

pub fn format_scan_summary(outcome: &ScanOutcome, manifest_path: &Path) -> String {
    let mut out = String::new();
    let noun = if outcome.manifest.len() == 1 {
        "document"
    } else {
        "documents"
    };
    let _ = writeln!(
        out,
        "Indexed {} {} ({} bytes) in {} ms",
        outcome.manifest.len(),
        noun,
        outcome.manifest.total_bytes(),
        outcome.elapsed.as_millis()
    );
    let _ = write!(out, "Manifest written to {}", manifest_path.display());
    push_diagnostics(&mut out, &outcome.diagnostics);
    out
}

pub fn format_verify_text(report: &VerifyReport, manifest_path: &Path) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Verifying against {}", manifest_path.display());

    if report.is_clean() {
        let _ = write!(out, "{}: archive matches its manifest", "Clean".green());
        return out;
    }

    if report.drift_count() > 0 {
        let _ = writeln!(out, "{} ({} entries)", "Drift detected".yellow(), report.drift_count());
        for path in &report.added {
            let _ = writeln!(out, "  {} {}", "added".green(), path);
        }
        for path in &report.removed {
            let _ = writeln!(out, "  {} {}", "removed".red(), path);
        }
        for path in &report.modified {
            let _ = writeln!(out, "  {} {}", "modified".yellow(), path);
        }
        let _ = write!(out, "Run `folio scan` to rewrite the manifest.");
    } else {
        let _ = write!(out, "No drift, but some entries were skipped.");
    }
    push_diagnostics(&mut out, &report.diagnostics);
    out
}

pub fn format_verify_json(report: &VerifyReport) -> Result<String, ArchiveError> {
    json_string(report)
}

pub fn format_audit_text(report: &AuditReport, fixes: Option<&FixOutcome>) -> String {
    let mut out = String::new();

    if report.findings.is_empty() {
        let _ = write!(out, "{}: no hygiene findings", "Clean".green());
        push_diagnostics(&mut out, &report.diagnostics);
        return out;
    }

    let _ = writeln!(out, "{} ({})", "Findings".yellow(), report.findings.len());
    for finding in &report.findings {
        let _ = writeln!(
            out,
            "  [{}] {}: {}",
            finding.kind.label(),
            finding.path,
            finding.detail
        );
    }

    if let Some(fixes) = fixes {
        let _ = writeln!(out, "\nRenamed {} document(s)", fixes.renamed.len());
        for (from, to) in &fixes.renamed {
            let _ = writeln!(out, "  {} -> {}", from, to);
        }
        for (from, reason) in &fixes.skipped {
            let _ = writeln!(out, "  {} {}: {}", "skipped".yellow(), from, reason);
        }
    }

    push_diagnostics(&mut out, &report.diagnostics);
    // Trailing newline is noise for single-block output.
    while out.ends_with('\n') {
        out.pop();
    }
    out
}

#[derive(Serialize)]
struct AuditJson<'a> {
    #[serde(flatten)]
    report: &'a AuditReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    fixes: Option<&'a FixOutcome>,
}

pub fn format_audit_json(
    report: &AuditReport,
    fixes: Option<&FixOutcome>,
) -> Result<String, ArchiveError> {
    json_string(&AuditJson { report, fixes })
}

pub fn format_status_text(report: &StatusReport) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Archive", ""]);
    table.add_row(vec![
        "indexed".to_string(),
        if report.indexed { "yes".to_string() } else { "no".to_string() },
    ]);
    table.add_row(vec!["manifest".to_string(), report.manifest_path.clone()]);
    table.add_row(vec!["documents".to_string(), report.documents.to_string()]);
    table.add_row(vec!["total bytes".to_string(), report.total_bytes.to_string()]);
    if let Some(ref digest) = report.digest {
        table.add_row(vec!["digest".to_string(), digest.clone()]);
    }
    if let Some(ref generated) = report.generated {
        table.add_row(vec!["generated".to_string(), generated.clone()]);
    }

    if report.indexed {
        format!("{table}")
    } else {
        format!("{table}\nRun `folio scan` to index the archive.")
    }
}

pub fn format_status_json(report: &StatusReport) -> Result<String, ArchiveError> {
    json_string(report)
}
