//! Generated file naming and cleaning of stale artifacts

use std::path::{Path, PathBuf};

use guardsmith::{
    core::{generated_header, GuardPathRule, GuardSession},
    models::DiagnosticKind,
};
use tempfile::tempdir;

use super::support::{settings_for, write_file};

#[test]
fn test_custom_tag_is_used_for_outputs_and_cleaning() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(
        root,
        "src/user.ts",
        "/** @see {isUser} ts-auto-guard:type-guard */\nexport interface User { id: string }\n",
    );
    write_file(
        root,
        "src/user.check.ts",
        &format!("{}\nexport function isUser(obj: unknown) {{ return false }}\n", generated_header("user.ts")),
    );
    // Generated under another tag: not ours to delete, not reported either
    write_file(
        root,
        "src/user.guard.ts",
        &format!("{}\nexport {{}}\n", generated_header("user.ts")),
    );

    let mut settings = settings_for(root);
    settings.process.guard_file_name = "check".to_string();
    settings.clean = true;
    let plan = GuardSession::new(settings).run().unwrap();

    assert_eq!(plan.deleted, vec![root.join("src/user.check.ts")]);
    assert!(!root.join("src/user.check.ts").exists());
    assert!(root.join("src/user.guard.ts").exists());
    assert!(plan.diagnostics.is_empty());

    assert_eq!(plan.files.len(), 1);
    assert_eq!(plan.files[0].output, root.join("src/user.check.ts"));
}

#[test]
fn test_hand_written_lookalikes_survive_cleaning() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(root, "src/user.ts", "export interface User { id: string }\n");
    write_file(root, "src/user.guard.ts", "export const isUser = () => true;\n");

    let mut settings = settings_for(root);
    settings.clean = true;
    let plan = GuardSession::new(settings).run().unwrap();

    assert!(plan.deleted.is_empty());
    assert!(root.join("src/user.guard.ts").exists());
    assert_eq!(plan.diagnostics.len(), 1);
    assert_eq!(plan.diagnostics[0].kind, DiagnosticKind::StaleArtifact);
}

#[test]
fn test_without_clean_nothing_is_deleted() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(root, "src/user.guard.ts", &format!("{}\n", generated_header("user.ts")));

    let plan = GuardSession::new(settings_for(root)).run().unwrap();

    assert!(plan.deleted.is_empty());
    assert!(root.join("src/user.guard.ts").exists());
}

#[test]
fn test_dry_run_reports_but_keeps_files() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(root, "a.guard.ts", &format!("{}\n", generated_header("a.ts")));
    write_file(root, "nested/b.guard.tsx", &format!("{}\n", generated_header("b.tsx")));

    let mut settings = settings_for(root);
    settings.clean = true;
    settings.dry_run = true;
    let plan = GuardSession::new(settings).run().unwrap();

    assert_eq!(plan.deleted, vec![root.join("a.guard.ts"), root.join("nested/b.guard.tsx")]);
    assert!(root.join("a.guard.ts").exists());
    assert!(root.join("nested/b.guard.tsx").exists());
}

#[test]
fn test_derived_paths() {
    let rule = GuardPathRule::default();
    let cases = [
        ("src/user.ts", "src/user.guard.ts"),
        ("src/view.tsx", "src/view.guard.tsx"),
        ("src/types.d.ts", "src/types.guard.ts"),
    ];
    for (source, expected) in cases {
        assert_eq!(rule.derive_path(Path::new(source)).unwrap(), PathBuf::from(expected));
    }

    let checks = GuardPathRule::new("check", ["ts"]);
    assert_eq!(
        checks.derive_path(Path::new("lib/api.ts")).unwrap(),
        PathBuf::from("lib/api.check.ts")
    );
    assert!(checks.is_guard_file(Path::new("lib/api.check.ts")));
    assert!(!checks.is_guard_file(Path::new("lib/api.guard.ts")));
}
