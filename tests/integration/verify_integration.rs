//! Integration tests for verifying an archive against its manifest

use super::test_utils::{temp_archive, write_doc};
use folio::cli::{Commands, RunContext};
use folio::error::ArchiveError;
use std::fs;

fn scan(ctx: &RunContext) {
    ctx.execute(&Commands::Scan { output: None }).unwrap();
}

fn verify_json(ctx: &RunContext) -> serde_json::Value {
    let output = ctx
        .execute(&Commands::Verify {
            format: "json".to_string(),
        })
        .unwrap();
    serde_json::from_str(&output).unwrap()
}

fn names(value: &serde_json::Value, field: &str) -> Vec<String> {
    value[field]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_unchanged_tree_verifies_clean() {
    let temp = temp_archive();
    write_doc(temp.path(), "a.pdf", b"alpha");

    let ctx = RunContext::new(temp.path().to_path_buf(), None).unwrap();
    scan(&ctx);

    let output = ctx
        .execute(&Commands::Verify {
            format: "text".to_string(),
        })
        .unwrap();
    assert!(output.contains("matches its manifest"));
}

#[test]
fn test_verify_reports_added_removed_modified() {
    let temp = temp_archive();
    write_doc(temp.path(), "keep.pdf", b"same");
    write_doc(temp.path(), "gone.pdf", b"bye");
    write_doc(temp.path(), "touched.pdf", b"before");

    let ctx = RunContext::new(temp.path().to_path_buf(), None).unwrap();
    scan(&ctx);

    fs::remove_file(temp.path().join("gone.pdf")).unwrap();
    write_doc(temp.path(), "touched.pdf", b"after!");
    write_doc(temp.path(), "new.pdf", b"hello");

    let report = verify_json(&ctx);
    assert_eq!(names(&report, "added"), vec!["new.pdf"]);
    assert_eq!(names(&report, "removed"), vec!["gone.pdf"]);
    assert_eq!(names(&report, "modified"), vec!["touched.pdf"]);
}

#[test]
fn test_verify_detects_same_size_content_change() {
    let temp = temp_archive();
    write_doc(temp.path(), "a.pdf", b"aaaa");

    let ctx = RunContext::new(temp.path().to_path_buf(), None).unwrap();
    scan(&ctx);

    write_doc(temp.path(), "a.pdf", b"bbbb");

    let report = verify_json(&ctx);
    assert_eq!(names(&report, "modified"), vec!["a.pdf"]);
}

#[test]
fn test_verify_without_manifest_is_fatal() {
    let temp = temp_archive();
    write_doc(temp.path(), "a.pdf", b"alpha");

    let ctx = RunContext::new(temp.path().to_path_buf(), None).unwrap();
    let err = ctx
        .execute(&Commands::Verify {
            format: "text".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, ArchiveError::ManifestNotFound(_)));
}
