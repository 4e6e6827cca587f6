//! CLI route: single route table and run context. Dispatches to domain
//! services and presentation.

use crate::audit::{apply_fixes, audit_archive};
use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_audit_json, format_audit_text, format_init_summary, format_scan_summary,
    format_status_json, format_status_text, format_verify_json, format_verify_text, StatusReport,
};
use crate::config::{ConfigLoader, FolioConfig};
use crate::error::ArchiveError;
use crate::init::init_archive;
use crate::manifest::builder::{ManifestBuilder, ScanOutcome};
use crate::manifest::writer::{resolve_output_path, write_manifest};
use crate::manifest::Manifest;
use crate::scan::path::canonicalize_root;
use crate::scan::walker::WalkerConfig;
use crate::verify::verify_archive;
use std::path::PathBuf;
use tracing::info;

/// Runtime context for CLI execution: archive root and merged configuration.
pub struct RunContext {
    root: PathBuf,
    config: FolioConfig,
}

impl RunContext {
    /// Create run context from archive root and optional config path.
    /// Uses ConfigLoader only; the root is validated lazily by each command
    /// so that config errors surface first.
    pub fn new(root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ArchiveError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&root)?
        };

        Ok(Self { root, config })
    }

    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    /// Execute a parsed command and return its stdout payload.
    pub fn execute(&self, command: &Commands) -> Result<String, ArchiveError> {
        match command {
            Commands::Init { force } => self.handle_init(*force),
            Commands::Scan { output } => self.handle_scan(output.as_deref()),
            Commands::Verify { format } => self.handle_verify(format),
            Commands::Audit { fix, yes, format } => self.handle_audit(*fix, *yes, format),
            Commands::Status { format } => self.handle_status(format),
        }
    }

    fn walker_config(&self, manifest_path: &std::path::Path) -> WalkerConfig {
        let mut config = WalkerConfig {
            follow_symlinks: self.config.scan.follow_symlinks,
            extensions: self.config.archive.extensions.clone(),
            max_depth: self.config.scan.max_depth,
            ..WalkerConfig::default()
        };
        config
            .ignore_patterns
            .extend(self.config.scan.ignore.iter().cloned());
        // The manifest itself must never appear in the manifest, wherever
        // the configured output points.
        config.exclude_paths.push(manifest_path.to_path_buf());
        config
    }

    fn manifest_path(&self, override_path: Option<&std::path::Path>) -> Result<PathBuf, ArchiveError> {
        let root = canonicalize_root(&self.root)?;
        let configured = override_path.unwrap_or(&self.config.manifest.output);
        Ok(resolve_output_path(&root, configured))
    }

    fn scan_tree(&self, manifest_path: &std::path::Path) -> Result<ScanOutcome, ArchiveError> {
        let builder =
            ManifestBuilder::with_config(self.root.clone(), self.walker_config(manifest_path))?;
        Ok(builder.build())
    }

    fn handle_init(&self, force: bool) -> Result<String, ArchiveError> {
        let outcome = init_archive(&self.root, force)?;
        Ok(format_init_summary(&outcome))
    }

    fn handle_scan(&self, output: Option<&std::path::Path>) -> Result<String, ArchiveError> {
        let manifest_path = self.manifest_path(output)?;
        let outcome = self.scan_tree(&manifest_path)?;
        write_manifest(&outcome.manifest, &manifest_path)?;
        Ok(format_scan_summary(&outcome, &manifest_path))
    }

    fn handle_verify(&self, format: &str) -> Result<String, ArchiveError> {
        let manifest_path = self.manifest_path(None)?;
        let stored = Manifest::load(&manifest_path)?;
        let current = self.scan_tree(&manifest_path)?;
        let report = verify_archive(&stored, &current);

        match format {
            "json" => format_verify_json(&report),
            _ => Ok(format_verify_text(&report, &manifest_path)),
        }
    }

    fn handle_audit(&self, fix: bool, yes: bool, format: &str) -> Result<String, ArchiveError> {
        let manifest_path = self.manifest_path(None)?;
        let outcome = self.scan_tree(&manifest_path)?;
        let report = audit_archive(&outcome);

        if !fix {
            return match format {
                "json" => format_audit_json(&report, None),
                _ => Ok(format_audit_text(&report, None)),
            };
        }

        let fixable = report.fixable().count();
        if fixable == 0 {
            return match format {
                "json" => format_audit_json(&report, None),
                _ => Ok(format_audit_text(&report, None)),
            };
        }

        if !yes {
            use dialoguer::Confirm;
            let confirmed = Confirm::new()
                .with_prompt(format!("Rename {} document(s) to lowercase?", fixable))
                .interact()
                .map_err(|e| {
                    ArchiveError::ConfigError(format!("Failed to get user input: {}", e))
                })?;

            if !confirmed {
                return Ok("Fix cancelled".to_string());
            }
        }

        let root = canonicalize_root(&self.root)?;
        let fixes = apply_fixes(&root, &report)?;
        info!(renamed = fixes.renamed.len(), skipped = fixes.skipped.len(), "fixes applied");

        match format {
            "json" => format_audit_json(&report, Some(&fixes)),
            _ => Ok(format_audit_text(&report, Some(&fixes))),
        }
    }

    fn handle_status(&self, format: &str) -> Result<String, ArchiveError> {
        let manifest_path = self.manifest_path(None)?;

        let report = if manifest_path.is_file() {
            let manifest = Manifest::load(&manifest_path)?;
            let generated = std::fs::metadata(&manifest_path)
                .and_then(|m| m.modified())
                .ok()
                .map(|t| chrono::DateTime::<chrono::Utc>::from(t).to_rfc3339());
            StatusReport {
                indexed: true,
                manifest_path: manifest_path.display().to_string(),
                documents: manifest.len() as u64,
                total_bytes: manifest.total_bytes(),
                digest: Some(hex::encode(manifest.digest())),
                generated,
            }
        } else {
            StatusReport {
                indexed: false,
                manifest_path: manifest_path.display().to_string(),
                documents: 0,
                total_bytes: 0,
                digest: None,
                generated: None,
            }
        };

        match format {
            "json" => format_status_json(&report),
            _ => Ok(format_status_text(&report)),
        }
    }
}
