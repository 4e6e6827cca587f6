//! Filesystem scanning
//!
//! Walks the archive tree and produces the file sequence the manifest is
//! built from. Unreadable entries are skipped and reported, never fatal;
//! only a missing or invalid root aborts the run.

pub mod diagnostics;
pub mod path;
pub mod walker;

pub use diagnostics::{ScanDiagnostic, SkipReason};
pub use walker::{FileEntry, WalkItem, Walker, WalkerConfig};
