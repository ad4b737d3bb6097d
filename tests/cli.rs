//! End-to-end tests for the `tlog` binary.
//!
//! Every test points `--db` at a fresh temporary directory so runs never touch
//! the user's real log database.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tlog(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tlog").expect("Failed to find tlog binary");
    cmd.arg("--db").arg(dir.path().join("tlog.db"));
    cmd.env_remove("TLOG_DB");
    cmd.env("NO_COLOR", "1");
    cmd
}

fn add(dir: &TempDir, title: &str) {
    tlog(dir).args(["new", title]).assert().success();
}

// ============================================================================
// new / list
// ============================================================================

#[test]
fn test_new_with_text_reports_id() {
    let dir = TempDir::new().unwrap();

    tlog(&dir)
        .args(["new", "Buy milk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Log created successfully"))
        .stdout(predicate::str::contains("(ID: 1)"));
}

#[test]
fn test_new_with_blank_text_fails() {
    let dir = TempDir::new().unwrap();

    tlog(&dir)
        .args(["new", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Log is required!"));
}

#[test]
fn test_empty_list() {
    let dir = TempDir::new().unwrap();

    tlog(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No logs found."));
}

#[test]
fn test_list_shows_entries_in_creation_order() {
    let dir = TempDir::new().unwrap();
    add(&dir, "first");
    add(&dir, "second");

    let output = tlog(&dir).arg("list").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let first = stdout.find("#1 first").expect("first entry listed");
    let second = stdout.find("#2 second").expect("second entry listed");
    assert!(first < second);
    assert!(stdout.contains("Found 2 log(s)"));
}

#[test]
fn test_list_search_and_limit() {
    let dir = TempDir::new().unwrap();
    add(&dir, "fix parser");
    add(&dir, "write docs");
    add(&dir, "fix lexer");

    tlog(&dir)
        .args(["list", "--search", "fix"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#1 fix parser"))
        .stdout(predicate::str::contains("#3 fix lexer"))
        .stdout(predicate::str::contains("write docs").not());

    tlog(&dir)
        .args(["list", "--limit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#1 fix parser"))
        .stdout(predicate::str::contains("#2").not());
}

#[test]
fn test_new_with_content_and_tags() {
    let dir = TempDir::new().unwrap();
    tlog(&dir)
        .args(["new", "Retro", "--content", "went well", "--tags", "team, q2"])
        .assert()
        .success();

    tlog(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("went well"))
        .stdout(predicate::str::contains("Tags: team, q2"));
}

// ============================================================================
// view / edit / delete
// ============================================================================

#[test]
fn test_view_then_quit() {
    let dir = TempDir::new().unwrap();
    add(&dir, "look at me");

    tlog(&dir)
        .arg("1")
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Log #1: look at me"))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn test_view_unknown_id_fails() {
    let dir = TempDir::new().unwrap();

    tlog(&dir)
        .arg("42")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Log not found"));
}

#[test]
fn test_edit_keeps_blank_fields() {
    let dir = TempDir::new().unwrap();
    tlog(&dir)
        .args(["new", "draft", "--content", "body text"])
        .assert()
        .success();

    tlog(&dir)
        .args(["edit", "1"])
        .write_stdin("final\n\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Log #1 updated successfully"));

    tlog(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("#1 final"))
        .stdout(predicate::str::contains("body text"));
}

#[test]
fn test_delete_requires_confirmation() {
    let dir = TempDir::new().unwrap();
    add(&dir, "short lived");

    tlog(&dir)
        .args(["delete", "1"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deletion cancelled"));

    tlog(&dir)
        .args(["delete", "1"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Log #1 deleted successfully"));

    tlog(&dir)
        .args(["delete", "1"])
        .write_stdin("y\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Log not found"));
}

#[test]
fn test_ids_are_not_reused_after_delete() {
    let dir = TempDir::new().unwrap();
    add(&dir, "one");
    add(&dir, "two");
    tlog(&dir).args(["delete", "2"]).write_stdin("y\n").assert().success();

    tlog(&dir)
        .args(["new", "three"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(ID: 3)"));
}

// ============================================================================
// export
// ============================================================================

#[test]
fn test_export_nothing() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("logs.md");

    tlog(&dir)
        .arg("export")
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("No logs found to export."));
    assert!(!out.exists());
}

#[test]
fn test_export_writes_document() {
    let dir = TempDir::new().unwrap();
    add(&dir, "alpha");
    add(&dir, "beta");
    let out = dir.path().join("report.md");

    tlog(&dir)
        .arg("export")
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully exported 2 logs"));

    let doc = std::fs::read_to_string(&out).unwrap();
    assert!(doc.contains("Total logs: 2"));
    assert!(doc.find("## #1 alpha").unwrap() < doc.find("## #2 beta").unwrap());
}

#[test]
fn test_export_to_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    add(&dir, "alpha");

    tlog(&dir)
        .arg("export")
        .arg("--output")
        .arg(dir.path().join("nope/report.md"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

// ============================================================================
// configuration
// ============================================================================

#[test]
fn test_db_path_from_environment() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("env.db");

    let mut cmd = Command::cargo_bin("tlog").unwrap();
    cmd.env("TLOG_DB", &db)
        .args(["new", "from env"])
        .assert()
        .success();
    assert!(db.exists());
}

#[test]
fn test_verbose_flag_before_subcommand() {
    let dir = TempDir::new().unwrap();
    add(&dir, "noisy");

    tlog(&dir)
        .args(["-v", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#1 noisy"));
}
