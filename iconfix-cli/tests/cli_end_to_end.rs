//! End-to-end CLI tests over temp repositories.

#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn iconfix() -> Command {
    Command::cargo_bin("iconfix").expect("iconfix binary")
}

const WILDCARD_FILE: &str = "import * as Icons from 'lucide-react';\n\
                             export const App = () => <Icons.Home/>;\n";
const NAMED_FILE: &str = "import { Home } from 'lucide-react';\n\
                          export const App = () => <Home/>;\n";
const NON_CANONICAL_FILE: &str = "import * as Icons from \"lucide-react\";\n\
                                  export const App = () => <Icons.Home/>;\n";

fn create_temp_repo(files: &[(&str, &str)]) -> TempDir {
    let td = tempfile::tempdir().expect("tempdir");
    for (rel, contents) in files {
        let path = td.path().join(rel);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(path, contents).expect("write");
    }
    td
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).expect("read")
}

#[test]
fn scan_reports_without_writing() {
    let temp = create_temp_repo(&[("src/App.tsx", WILDCARD_FILE)]);

    iconfix()
        .current_dir(temp.path())
        .arg("scan")
        .assert()
        .success()
        .stdout(predicate::str::contains("fixed: 1"));

    // Source untouched, artifacts written.
    assert_eq!(read(temp.path(), "src/App.tsx"), WILDCARD_FILE);
    assert!(temp.path().join("artifacts/iconfix/report.json").exists());
    assert!(temp.path().join("artifacts/iconfix/outcomes.json").exists());
    assert!(temp.path().join("artifacts/iconfix/fix.md").exists());
    assert!(temp.path().join("artifacts/iconfix/patch.diff").exists());
}

#[test]
fn fix_rewrites_in_place() {
    let temp = create_temp_repo(&[
        ("src/App.tsx", WILDCARD_FILE),
        ("src/Other.tsx", NAMED_FILE),
    ]);

    iconfix()
        .current_dir(temp.path())
        .args(["fix", "--no-verify"])
        .assert()
        .success()
        .stdout(predicate::str::contains("symbols rewired: 1"));

    let fixed = read(temp.path(), "src/App.tsx");
    assert!(fixed.starts_with("import { Home } from 'lucide-react';"));
    assert!(!fixed.contains("Icons."));
    // Untouched files stay byte-identical.
    assert_eq!(read(temp.path(), "src/Other.tsx"), NAMED_FILE);
}

#[test]
fn fix_dry_run_leaves_sources_alone() {
    let temp = create_temp_repo(&[("src/App.tsx", WILDCARD_FILE)]);

    iconfix()
        .current_dir(temp.path())
        .args(["fix", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(dry-run)"));

    assert_eq!(read(temp.path(), "src/App.tsx"), WILDCARD_FILE);
    let patch = read(temp.path(), "artifacts/iconfix/patch.diff");
    assert!(patch.contains("diff --git a/src/App.tsx b/src/App.tsx"));
}

#[test]
fn non_canonical_import_exits_two() {
    let temp = create_temp_repo(&[("src/App.tsx", NON_CANONICAL_FILE)]);

    iconfix()
        .current_dir(temp.path())
        .args(["fix", "--no-verify"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("failed: 1"));

    // Failures never write.
    assert_eq!(read(temp.path(), "src/App.tsx"), NON_CANONICAL_FILE);
}

#[test]
fn skipped_files_do_not_affect_exit_status() {
    let unused = "import * as Icons from 'lucide-react';\nconst x = 1;\n";
    let temp = create_temp_repo(&[("src/App.tsx", unused)]);

    iconfix()
        .current_dir(temp.path())
        .args(["fix", "--no-verify"])
        .assert()
        .success()
        .stdout(predicate::str::contains("skipped: 1"));
}

#[test]
fn config_file_drives_alias_and_priority() {
    let custom = "import * as Lucide from 'lucide-react';\n\
                  export const App = () => <Lucide.Menu/>;\n";
    let temp = create_temp_repo(&[
        ("src/App.tsx", custom),
        ("src/Later.tsx", custom),
        (
            "iconfix.toml",
            r#"
[imports]
alias = "Lucide"

[files]
priority = ["src/App.tsx"]
"#,
        ),
    ]);

    iconfix()
        .current_dir(temp.path())
        .args(["fix", "--no-verify"])
        .assert()
        .success()
        .stdout(predicate::str::contains("files: 1"));

    // Only the priority file was processed without --all.
    assert!(read(temp.path(), "src/App.tsx").starts_with("import { Menu }"));
    assert_eq!(read(temp.path(), "src/Later.tsx"), custom);
}

#[test]
fn all_flag_processes_beyond_priority() {
    let custom = "import * as Icons from 'lucide-react';\n\
                  export const App = () => <Icons.Menu/>;\n";
    let temp = create_temp_repo(&[
        ("src/App.tsx", custom),
        ("src/Later.tsx", custom),
        (
            "iconfix.toml",
            r#"
[files]
priority = ["src/App.tsx"]
"#,
        ),
    ]);

    iconfix()
        .current_dir(temp.path())
        .args(["fix", "--no-verify", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("files: 2"));

    assert!(read(temp.path(), "src/Later.tsx").starts_with("import { Menu }"));
}

#[test]
fn cli_alias_overrides_config() {
    let custom = "import * as Glyphs from 'lucide-react';\n\
                  export const App = () => <Glyphs.Bell/>;\n";
    let temp = create_temp_repo(&[("src/App.tsx", custom)]);

    iconfix()
        .current_dir(temp.path())
        .args(["fix", "--no-verify", "--alias", "Glyphs"])
        .assert()
        .success();

    assert!(read(temp.path(), "src/App.tsx").starts_with("import { Bell }"));
}

#[cfg(unix)]
#[test]
fn verify_failure_is_reported_but_not_fatal() {
    let temp = create_temp_repo(&[
        ("src/App.tsx", WILDCARD_FILE),
        (
            "iconfix.toml",
            r#"
[verify]
enabled = true
command = ["sh", "-c", "echo boom >&2; exit 1"]
timeout_secs = 5
"#,
        ),
    ]);

    iconfix()
        .current_dir(temp.path())
        .arg("fix")
        .assert()
        .success()
        .stdout(predicate::str::contains("verification: failed"));

    // The rewrite stays in place; verification never rolls back.
    assert!(read(temp.path(), "src/App.tsx").starts_with("import { Home }"));
}
