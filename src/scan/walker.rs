//! Filesystem walker for traversing the archive tree

use crate::config::STATE_DIR;
use crate::error::ScanError;
use crate::scan::diagnostics::{ScanDiagnostic, SkipReason};
use crate::scan::path;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Filesystem walker configuration
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Whether to follow symbolic links (default: false for determinism)
    pub follow_symlinks: bool,
    /// Names to ignore, matched against any path component
    pub ignore_patterns: Vec<String>,
    /// File extensions to include (empty = all files), ASCII case-insensitive
    pub extensions: Vec<String>,
    /// Exact paths to exclude (e.g. a manifest written inside the tree)
    pub exclude_paths: Vec<PathBuf>,
    /// Maximum depth to traverse (None = unlimited)
    pub max_depth: Option<usize>,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            ignore_patterns: vec![STATE_DIR.to_string(), ".git".to_string()],
            extensions: Vec::new(),
            exclude_paths: Vec::new(),
            max_depth: None,
        }
    }
}

/// A regular file found during a walk, with its size from metadata.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub path: PathBuf,
    pub size: u64,
}

/// One step of a walk: a file to index, or an entry that was skipped.
#[derive(Debug)]
pub enum WalkItem {
    File(FileEntry),
    Skipped(ScanDiagnostic),
}

/// Filesystem walker rooted at a canonicalized archive root.
///
/// `files()` returns a lazy iterator over the tree; calling it again
/// restarts the walk from the root. Traversal order is deterministic
/// (entries sorted by file name at each level).
#[derive(Debug)]
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    /// Create a walker for the given root path with default configuration.
    ///
    /// Fails with `RootNotFound` / `RootNotADirectory` up front, so a run
    /// against a missing root aborts before anything is written.
    pub fn new(root: PathBuf) -> Result<Self, ScanError> {
        Self::with_config(root, WalkerConfig::default())
    }

    /// Create a walker with custom configuration
    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Result<Self, ScanError> {
        let root = path::canonicalize_root(&root)?;
        Ok(Self { root, config })
    }

    /// Canonicalized archive root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    /// Start (or restart) a lazy walk over the files under the root.
    pub fn files(&self) -> FileWalk<'_> {
        let mut walk = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name();
        if let Some(depth) = self.config.max_depth {
            walk = walk.max_depth(depth);
        }
        FileWalk {
            inner: walk.into_iter(),
            walker: self,
        }
    }

    fn is_ignored(&self, entry: &DirEntry) -> bool {
        entry
            .file_name()
            .to_str()
            .map(|name| self.config.ignore_patterns.iter().any(|p| p == name))
            .unwrap_or(false)
    }

    fn is_excluded(&self, entry_path: &Path) -> bool {
        self.config.exclude_paths.iter().any(|p| p == entry_path)
    }

    fn extension_matches(&self, entry_path: &Path) -> bool {
        if self.config.extensions.is_empty() {
            return true;
        }
        match entry_path.extension().and_then(|e| e.to_str()) {
            Some(ext) => self
                .config
                .extensions
                .iter()
                .any(|wanted| wanted.eq_ignore_ascii_case(ext)),
            None => false,
        }
    }
}

/// Lazy file iterator over a walker's tree.
///
/// Yields `WalkItem::File` for each regular file that passes the ignore and
/// extension filters, and `WalkItem::Skipped` for entries the walk could not
/// read. Directories and symlinks are never yielded.
pub struct FileWalk<'a> {
    inner: walkdir::IntoIter,
    walker: &'a Walker,
}

impl<'a> Iterator for FileWalk<'a> {
    type Item = WalkItem;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    // Unreadable subtree: report and continue. Only a
                    // missing root is fatal.
                    let display = e
                        .path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| self.walker.root.display().to_string());
                    return Some(WalkItem::Skipped(ScanDiagnostic::new(
                        display,
                        SkipReason::PermissionDenied,
                        e.to_string(),
                    )));
                }
            };

            // The root itself is never an entry of its own manifest.
            if entry.path() == self.walker.root {
                continue;
            }

            if entry.file_type().is_dir() {
                if self.walker.is_ignored(&entry) {
                    self.inner.skip_current_dir();
                }
                continue;
            }

            if !entry.file_type().is_file() {
                // Symlink with follow_symlinks disabled: skip silently.
                continue;
            }

            if self.walker.is_ignored(&entry) || self.walker.is_excluded(entry.path()) {
                continue;
            }

            if !self.walker.extension_matches(entry.path()) {
                continue;
            }

            match entry.metadata() {
                Ok(metadata) => {
                    return Some(WalkItem::File(FileEntry {
                        path: entry.path().to_path_buf(),
                        size: metadata.len(),
                    }))
                }
                Err(e) => {
                    return Some(WalkItem::Skipped(ScanDiagnostic::new(
                        entry.path().display().to_string(),
                        SkipReason::PermissionDenied,
                        e.to_string(),
                    )))
                }
            }
        }
    }
}
