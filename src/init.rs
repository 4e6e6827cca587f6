//! Archive initialization: create the state directory and default config

use crate::config::{archive_config_path, FolioConfig, STATE_DIR};
use crate::error::ArchiveError;
use crate::scan::path::canonicalize_root;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// What `folio init` did.
#[derive(Debug, Clone)]
pub struct InitOutcome {
    pub state_dir: PathBuf,
    pub config_path: PathBuf,
    /// False when a config already existed and `--force` was not given.
    pub config_written: bool,
}

/// Create `<root>/.folio` and seed a default `config.toml`.
///
/// An existing config is left untouched unless `force` is set.
pub fn init_archive(root: &Path, force: bool) -> Result<InitOutcome, ArchiveError> {
    let root = canonicalize_root(root)?;
    let state_dir = root.join(STATE_DIR);
    fs::create_dir_all(&state_dir)?;

    let config_path = archive_config_path(&root);
    if config_path.exists() && !force {
        return Ok(InitOutcome {
            state_dir,
            config_path,
            config_written: false,
        });
    }

    let defaults = FolioConfig::default();
    let rendered = toml::to_string_pretty(&defaults)
        .map_err(|e| ArchiveError::ConfigError(format!("Failed to render default config: {}", e)))?;
    fs::write(&config_path, rendered)?;

    info!(path = %config_path.display(), "wrote default config");

    Ok(InitOutcome {
        state_dir,
        config_path,
        config_written: true,
    })
}
