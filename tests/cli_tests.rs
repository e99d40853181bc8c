//! CLI interface tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn gomu() -> Command {
    Command::cargo_bin("gomu").unwrap()
}

fn module_workspace() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("mod-common")).unwrap();
    fs::create_dir_all(root.join("parg")).unwrap();
    fs::write(
        root.join("mod-common/go.mod"),
        "module github.com/hatchify/mod-common\n\ngo 1.14\n",
    )
    .unwrap();
    fs::write(root.join("parg/go.mod"), "module github.com/hatchify/parg\n").unwrap();
    temp_dir
}

#[test]
fn test_version_action() {
    gomu()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("gomu "));
}

#[test]
fn test_version_ignores_other_flags() {
    gomu()
        .args(["-c", "-pr", "version"])
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_action() {
    gomu()
        .arg("help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: gomu"))
        .stdout(predicate::str::contains("-pull-request"));
}

#[test]
fn test_help_for_single_action() {
    gomu()
        .args(["help", "sync"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updates modfiles"))
        .stdout(predicate::str::contains("Reverts go.mod").not());
}

#[test]
fn test_no_arguments_is_parse_error() {
    gomu()
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Usage: gomu"))
        .stderr(predicate::str::contains("unable to parse action"));
}

#[test]
fn test_value_flag_without_value() {
    gomu()
        .args(["sync", "-branch"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unable to parse action"));
}

#[test]
fn test_invalid_log_level() {
    gomu()
        .args(["list", "-log", "loud"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid log level 'loud'"));
}

#[test]
fn test_unsupported_action() {
    gomu()
        .arg("frobnicate")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Usage: gomu"))
        .stderr(predicate::str::contains("unsupported action: frobnicate"));
}

#[test]
fn test_errors_are_prefixed_on_stderr() {
    gomu()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("\nerror: unsupported action"));
}

#[cfg(unix)]
#[test]
fn test_non_utf8_argument_is_parse_error() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt as _;

    gomu()
        .arg("list")
        .arg("-i")
        .arg(OsStr::from_bytes(b"\xff"))
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Usage: gomu"))
        .stderr(predicate::str::contains("argument is not valid UTF-8"));
}

#[test]
fn test_list_name_only_output() {
    let workspace = module_workspace();

    gomu()
        .current_dir(workspace.path())
        .args(["list", "-name"])
        .assert()
        .success()
        .stdout("github.com/hatchify/mod-common\ngithub.com/hatchify/parg\n");
}

#[test]
fn test_list_with_include_and_filter() {
    let workspace = module_workspace();
    let target = workspace.path().to_str().unwrap();

    gomu()
        .args(["LIST", "parg", "-i", target])
        .assert()
        .success()
        .stdout(predicate::str::contains("github.com/hatchify/parg"))
        .stdout(predicate::str::contains("mod-common").not())
        .stdout(predicate::str::contains("All clean!"))
        .stdout(predicate::str::contains("list: 1 processed"));
}

#[test]
fn test_sync_without_vcs_engine_fails_with_summary() {
    let workspace = module_workspace();

    gomu()
        .current_dir(workspace.path())
        .arg("sync")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("sync: 0 processed, 0 updated, 2 skipped"))
        .stderr(predicate::str::contains("Quitting with errors"));
}

#[test]
fn test_run_twice_in_one_process() {
    gomu::run(&["version"]).unwrap();
    gomu::run(&["help", "-log", "debug"]).unwrap();
    assert!(gomu::run(&["frobnicate"]).is_err());
}
