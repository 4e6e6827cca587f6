//! Configuration System
//!
//! Layered configuration for the archive tool. Sources are merged in
//! ascending precedence: built-in defaults, the global config file
//! (`~/.config/folio/config.toml`), the archive config file
//! (`<root>/.folio/config.toml`), then `FOLIO_`-prefixed environment
//! variables. An explicit `--config <path>` replaces the file sources.

use crate::error::ArchiveError;
use crate::logging::LoggingConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the state directory kept at the archive root. Holds the default
/// manifest location and the archive config file. Always excluded from scans.
pub const STATE_DIR: &str = ".folio";

/// Default manifest location, relative to the archive root.
pub const DEFAULT_MANIFEST_PATH: &str = ".folio/manifest";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolioConfig {
    /// Archive content settings
    #[serde(default)]
    pub archive: ArchiveConfig,

    /// Manifest output settings
    #[serde(default)]
    pub manifest: ManifestConfig,

    /// Scanner behavior
    #[serde(default)]
    pub scan: ScanConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Archive content settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// File extensions to index (e.g. ["pdf"]). Empty means every file.
    /// Matching is ASCII case-insensitive.
    #[serde(default)]
    pub extensions: Vec<String>,
}

/// Manifest output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestConfig {
    /// Manifest output path, resolved against the archive root when relative.
    #[serde(default = "default_manifest_output")]
    pub output: PathBuf,
}

fn default_manifest_output() -> PathBuf {
    PathBuf::from(DEFAULT_MANIFEST_PATH)
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            output: default_manifest_output(),
        }
    }
}

/// Scanner behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Whether to follow symbolic links (default: false for determinism)
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Names to ignore, matched against any path component. Merged after the
    /// built-in defaults (state directory, ".git").
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Maximum depth to traverse (None = unlimited)
    #[serde(default)]
    pub max_depth: Option<usize>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            ignore: Vec::new(),
            max_depth: None,
        }
    }
}

/// Configuration loader. Stateless; all methods are associated functions.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for an archive rooted at `root`, merging defaults,
    /// the global file, the archive file, and environment overrides.
    pub fn load(root: &Path) -> Result<FolioConfig, ArchiveError> {
        let mut builder = builder_with_defaults()?;
        builder = add_global_source(builder);
        builder = add_archive_source(builder, root);
        builder = builder.add_source(Environment::with_prefix("FOLIO").separator("__"));

        let merged = builder.build()?;
        Ok(merged.try_deserialize::<FolioConfig>()?)
    }

    /// Load configuration from an explicit file, skipping the global and
    /// archive sources. Environment overrides still apply.
    pub fn load_from_file(path: &Path) -> Result<FolioConfig, ArchiveError> {
        let path_str = path.to_str().ok_or_else(|| {
            ArchiveError::ConfigError(format!("Config path is not valid UTF-8: {}", path.display()))
        })?;

        let builder = builder_with_defaults()?
            .add_source(File::with_name(path_str))
            .add_source(Environment::with_prefix("FOLIO").separator("__"));

        let merged = builder.build()?;
        Ok(merged.try_deserialize::<FolioConfig>()?)
    }
}

/// Create a Config builder with merge policy defaults applied.
fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ArchiveError> {
    Ok(Config::builder()
        .set_default("manifest.output", DEFAULT_MANIFEST_PATH)?
        .set_default("scan.follow_symlinks", false)?)
}

/// Path to the global config file: `$XDG_CONFIG_HOME/folio/config.toml` or
/// the platform equivalent.
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "folio").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Path to the archive config file: `<root>/.folio/config.toml`.
pub fn archive_config_path(root: &Path) -> PathBuf {
    root.join(STATE_DIR).join("config.toml")
}

fn add_global_source(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    match global_config_path() {
        Some(path) if path.exists() => match path.to_str() {
            Some(s) => builder.add_source(File::with_name(s).required(false)),
            None => builder,
        },
        _ => builder,
    }
}

fn add_archive_source(
    builder: ConfigBuilder<DefaultState>,
    root: &Path,
) -> ConfigBuilder<DefaultState> {
    let path = archive_config_path(root);
    if path.exists() {
        if let Some(s) = path.to_str() {
            return builder.add_source(File::with_name(s).required(false));
        }
    }
    builder
}
