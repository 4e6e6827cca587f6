//! Integration tests for archive hygiene auditing and fixes

use super::test_utils::{temp_archive, write_doc};
use folio::audit::{apply_fixes, audit_archive, FindingKind};
use folio::cli::{Commands, RunContext};
use folio::manifest::builder::ManifestBuilder;

fn audit(root: &std::path::Path) -> folio::audit::AuditReport {
    let builder = ManifestBuilder::new(root.to_path_buf()).unwrap();
    audit_archive(&builder.build())
}

#[test]
fn test_audit_flags_all_finding_kinds() {
    let temp = temp_archive();
    write_doc(temp.path(), "Upper.PDF", b"shouty");
    write_doc(temp.path(), "bad name.pdf", b"spaced");
    write_doc(temp.path(), "empty.pdf", b"");
    write_doc(temp.path(), "dup1.pdf", b"same bytes");
    write_doc(temp.path(), "dup2.pdf", b"same bytes");
    write_doc(temp.path(), "fine.pdf", b"ok");

    let report = audit(temp.path());

    let kinds: Vec<FindingKind> = report.findings.iter().map(|f| f.kind).collect();
    assert!(kinds.contains(&FindingKind::UppercaseName));
    assert!(kinds.contains(&FindingKind::UnsafeName));
    assert!(kinds.contains(&FindingKind::EmptyFile));
    assert!(kinds.contains(&FindingKind::DuplicateContent));
    assert!(!report.findings.iter().any(|f| f.path == "fine.pdf"));
}

#[test]
fn test_apply_fixes_lowercases_names() {
    let temp = temp_archive();
    write_doc(temp.path(), "sheets/Acme-SDS.PDF", b"doc");

    let report = audit(temp.path());
    let root = dunce::canonicalize(temp.path()).unwrap();
    let outcome = apply_fixes(&root, &report).unwrap();

    assert_eq!(
        outcome.renamed,
        vec![(
            "sheets/Acme-SDS.PDF".to_string(),
            "sheets/acme-sds.pdf".to_string()
        )]
    );
    assert!(temp.path().join("sheets").join("acme-sds.pdf").is_file());
    assert!(!temp.path().join("sheets").join("Acme-SDS.PDF").exists());
}

#[test]
fn test_apply_fixes_skips_collisions() {
    let temp = temp_archive();
    write_doc(temp.path(), "Report.pdf", b"upper");
    write_doc(temp.path(), "report.pdf", b"lower");

    let report = audit(temp.path());
    let root = dunce::canonicalize(temp.path()).unwrap();
    let outcome = apply_fixes(&root, &report).unwrap();

    assert!(outcome.renamed.is_empty());
    assert_eq!(outcome.skipped.len(), 1);
    // Both documents survive untouched.
    assert!(temp.path().join("Report.pdf").is_file());
    assert!(temp.path().join("report.pdf").is_file());
}

#[test]
fn test_audit_fix_through_cli_with_yes() {
    let temp = temp_archive();
    write_doc(temp.path(), "Loud.pdf", b"doc");

    let ctx = RunContext::new(temp.path().to_path_buf(), None).unwrap();
    let output = ctx
        .execute(&Commands::Audit {
            fix: true,
            yes: true,
            format: "text".to_string(),
        })
        .unwrap();

    assert!(output.contains("Loud.pdf -> loud.pdf"));
    assert!(temp.path().join("loud.pdf").is_file());
}

#[test]
fn test_clean_archive_audits_clean() {
    let temp = temp_archive();
    write_doc(temp.path(), "a.pdf", b"one");
    write_doc(temp.path(), "b.pdf", b"two");

    let ctx = RunContext::new(temp.path().to_path_buf(), None).unwrap();
    let output = ctx
        .execute(&Commands::Audit {
            fix: false,
            yes: false,
            format: "text".to_string(),
        })
        .unwrap();
    assert!(output.contains("no hygiene findings"));
}
