//! Integration tests for manifest building determinism

use super::test_utils::{temp_archive, write_doc};
use folio::cli::{Commands, RunContext};
use folio::manifest::builder::ManifestBuilder;
use folio::manifest::hasher;
use std::fs;

/// The same tree always produces byte-identical manifests.
#[test]
fn test_same_tree_same_manifest_bytes() {
    let temp = temp_archive();
    write_doc(temp.path(), "a.pdf", b"alpha");
    write_doc(temp.path(), "sheets/b.pdf", b"beta");
    write_doc(temp.path(), "sheets/nested/c.pdf", b"gamma");

    let builder = ManifestBuilder::new(temp.path().to_path_buf()).unwrap();
    let first = builder.build().manifest.to_bytes();
    let second = builder.build().manifest.to_bytes();

    assert_eq!(first, second);
}

/// An empty directory yields a manifest with zero entries.
#[test]
fn test_empty_directory_zero_entries() {
    let temp = temp_archive();

    let ctx = RunContext::new(temp.path().to_path_buf(), None).unwrap();
    ctx.execute(&Commands::Scan { output: None }).unwrap();

    let manifest_path = temp.path().join(".folio").join("manifest");
    let bytes = fs::read(&manifest_path).unwrap();
    assert!(bytes.is_empty());
}

/// A single 10-byte file produces exactly one line in the documented format.
#[test]
fn test_single_file_line_format() {
    let temp = temp_archive();
    write_doc(temp.path(), "a.pdf", b"0123456789");

    let builder = ManifestBuilder::new(temp.path().to_path_buf()).unwrap();
    let text = String::from_utf8(builder.build().manifest.to_bytes()).unwrap();

    let expected_hash = hex::encode(hasher::hash_bytes(b"0123456789"));
    assert_eq!(text, format!("a.pdf\t10\t{}\n", expected_hash));
}

/// Entries are strictly sorted by path bytes regardless of creation order.
#[test]
fn test_entries_strictly_sorted() {
    let temp = temp_archive();
    write_doc(temp.path(), "z.pdf", b"z");
    write_doc(temp.path(), "a/deep/x.pdf", b"x");
    write_doc(temp.path(), "a.pdf", b"a");
    write_doc(temp.path(), "a/b.pdf", b"b");

    let builder = ManifestBuilder::new(temp.path().to_path_buf()).unwrap();
    let outcome = builder.build();

    let paths: Vec<&str> = outcome
        .manifest
        .entries()
        .iter()
        .map(|e| e.relative_path.as_str())
        .collect();
    let mut sorted = paths.clone();
    sorted.sort_by(|a, b| a.as_bytes().cmp(b.as_bytes()));
    assert_eq!(paths, sorted);
    assert_eq!(paths.len(), 4);
}

/// Rescanning after a scan is unchanged: the tool's own state directory
/// never perturbs the manifest.
#[test]
fn test_rescan_after_scan_is_stable() {
    let temp = temp_archive();
    write_doc(temp.path(), "a.pdf", b"alpha");

    let ctx = RunContext::new(temp.path().to_path_buf(), None).unwrap();
    ctx.execute(&Commands::Scan { output: None }).unwrap();
    let first = fs::read(temp.path().join(".folio").join("manifest")).unwrap();

    ctx.execute(&Commands::Scan { output: None }).unwrap();
    let second = fs::read(temp.path().join(".folio").join("manifest")).unwrap();

    assert_eq!(first, second);
    let text = String::from_utf8(second).unwrap();
    assert_eq!(text.lines().count(), 1);
}

/// A manifest written inside the tree is excluded from its own listing.
#[test]
fn test_manifest_inside_tree_excluded() {
    let temp = temp_archive();
    write_doc(temp.path(), "a.pdf", b"alpha");

    let ctx = RunContext::new(temp.path().to_path_buf(), None).unwrap();
    let output = dunce::canonicalize(temp.path()).unwrap().join("MANIFEST.tsv");
    ctx.execute(&Commands::Scan {
        output: Some(output.clone()),
    })
    .unwrap();
    let first = fs::read(&output).unwrap();

    ctx.execute(&Commands::Scan {
        output: Some(output.clone()),
    })
    .unwrap();
    let second = fs::read(&output).unwrap();

    assert_eq!(first, second);
    let text = String::from_utf8(second).unwrap();
    assert!(!text.contains("MANIFEST.tsv"));
}

/// Scan overwrites any prior manifest at the output location.
#[test]
fn test_scan_overwrites_prior_manifest() {
    let temp = temp_archive();
    write_doc(temp.path(), "a.pdf", b"alpha");
    write_doc(temp.path(), "b.pdf", b"beta");

    let ctx = RunContext::new(temp.path().to_path_buf(), None).unwrap();
    ctx.execute(&Commands::Scan { output: None }).unwrap();

    fs::remove_file(temp.path().join("b.pdf")).unwrap();
    ctx.execute(&Commands::Scan { output: None }).unwrap();

    let text =
        fs::read_to_string(temp.path().join(".folio").join("manifest")).unwrap();
    assert_eq!(text.lines().count(), 1);
    assert!(text.starts_with("a.pdf\t"));
}
