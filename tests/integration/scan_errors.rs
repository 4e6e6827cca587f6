//! Integration tests for scan error handling: fatal root errors versus
//! recovered per-entry diagnostics.

use super::test_utils::{temp_archive, write_doc};
use folio::error::ScanError;
use folio::manifest::builder::ManifestBuilder;
use folio::scan::SkipReason;
use std::path::PathBuf;

#[test]
fn test_missing_root_is_fatal() {
    let err = ManifestBuilder::new(PathBuf::from("/nonexistent/archive/root")).unwrap_err();
    assert!(matches!(err, ScanError::RootNotFound(_)));
}

#[test]
fn test_missing_root_writes_nothing() {
    // The builder fails at construction, before any output exists to write.
    let temp = temp_archive();
    let bogus = temp.path().join("gone");
    assert!(ManifestBuilder::new(bogus.clone()).is_err());
    assert!(!bogus.exists());
}

#[test]
fn test_file_root_is_fatal() {
    let temp = temp_archive();
    write_doc(temp.path(), "a.pdf", b"alpha");

    let err = ManifestBuilder::new(temp.path().join("a.pdf")).unwrap_err();
    assert!(matches!(err, ScanError::RootNotADirectory(_)));
}

#[cfg(unix)]
mod unix {
    use super::super::test_utils::{running_as_root, temp_archive, write_doc};
    use folio::manifest::builder::ManifestBuilder;
    use folio::scan::SkipReason;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    fn set_mode(path: &Path, mode: u32) {
        let mut perms = fs::metadata(path).unwrap().permissions();
        perms.set_mode(mode);
        fs::set_permissions(path, perms).unwrap();
    }

    /// An unreadable subtree is skipped and reported; the rest of the scan
    /// continues.
    #[test]
    fn test_unreadable_subtree_is_skipped_not_fatal() {
        if running_as_root() {
            return;
        }

        let temp = temp_archive();
        write_doc(temp.path(), "open.pdf", b"readable");
        write_doc(temp.path(), "locked/secret.pdf", b"hidden");
        let locked = temp.path().join("locked");
        set_mode(&locked, 0o000);

        let builder = ManifestBuilder::new(temp.path().to_path_buf()).unwrap();
        let outcome = builder.build();

        set_mode(&locked, 0o755);

        assert_eq!(outcome.manifest.len(), 1);
        assert_eq!(outcome.manifest.entries()[0].relative_path, "open.pdf");
        assert!(outcome
            .diagnostics
            .iter()
            .any(|d| d.reason == SkipReason::PermissionDenied));
    }

    /// A file that cannot be opened for hashing is recorded as a hash
    /// failure and skipped.
    #[test]
    fn test_unreadable_file_is_hash_failure() {
        if running_as_root() {
            return;
        }

        let temp = temp_archive();
        write_doc(temp.path(), "open.pdf", b"readable");
        write_doc(temp.path(), "sealed.pdf", b"no access");
        let sealed = temp.path().join("sealed.pdf");
        set_mode(&sealed, 0o000);

        let builder = ManifestBuilder::new(temp.path().to_path_buf()).unwrap();
        let outcome = builder.build();

        set_mode(&sealed, 0o644);

        assert_eq!(outcome.manifest.len(), 1);
        let diag = outcome
            .diagnostics
            .iter()
            .find(|d| d.reason == SkipReason::HashFailure)
            .expect("expected a hash failure diagnostic");
        assert_eq!(diag.path, "sealed.pdf");
    }
}

/// A file name containing a newline cannot be represented in the line
/// format; it is skipped with a diagnostic instead of corrupting output.
#[cfg(unix)]
#[test]
fn test_unrepresentable_name_is_skipped() {
    let temp = temp_archive();
    write_doc(temp.path(), "good.pdf", b"fine");
    std::fs::write(temp.path().join("bad\nname.pdf"), b"newline").unwrap();

    let builder = ManifestBuilder::new(temp.path().to_path_buf()).unwrap();
    let outcome = builder.build();

    assert_eq!(outcome.manifest.len(), 1);
    assert!(outcome
        .diagnostics
        .iter()
        .any(|d| d.reason == SkipReason::UnrepresentablePath));
}
