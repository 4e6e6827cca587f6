//! Shared test utilities for integration tests

use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

/// Serializes environment variable mutation across tests. Cargo runs tests
/// in parallel within one binary and the process environment is shared.
pub static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Create an empty scratch archive.
pub fn temp_archive() -> TempDir {
    TempDir::new().expect("failed to create temp archive")
}

/// Write a document under the archive root, creating parent directories.
/// `rel` uses `/` separators.
pub fn write_doc(root: &Path, rel: &str, contents: &[u8]) {
    let mut path = root.to_path_buf();
    for part in rel.split('/') {
        path.push(part);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("failed to create parent dirs");
    }
    fs::write(&path, contents).expect("failed to write document");
}

/// True when the test process is running as root and permission-based
/// fixtures cannot deny access.
#[cfg(unix)]
pub fn running_as_root() -> bool {
    std::process::Command::new("id")
        .arg("-u")
        .output()
        .map(|out| String::from_utf8_lossy(&out.stdout).trim() == "0")
        .unwrap_or(false)
}
