use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

struct Fixture {
    _tmp: TempDir,
    home: PathBuf,
    tree: PathBuf,
    bin: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        let tree = tmp.path().join("tree");
        let bin = tmp.path().join("bin");
        for dir in [&home, &tree, &bin] {
            fs::create_dir_all(dir).expect("create fixture dir");
        }
        Self {
            _tmp: tmp,
            home,
            tree,
            bin,
        }
    }

    fn module(&self, rel: &str) -> PathBuf {
        let dir = self.tree.join(rel);
        fs::create_dir_all(&dir).expect("create module dir");
        fs::write(dir.join("go.mod"), "module example.com/m\n").expect("write go.mod");
        dir
    }

    #[cfg(unix)]
    fn scanner(&self, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.bin.join("go-licenses");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write fake scanner");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod fake scanner");
        path
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("license-sweep").unwrap();
        cmd.env("HOME", &self.home).env_remove("LICENSE_SWEEP_SCANNER").env_remove("RUST_LOG");
        cmd
    }
}

fn tree_arg(path: &Path) -> &str {
    path.to_str().expect("utf-8 temp path")
}

#[test]
fn help_lists_both_subcommands() {
    Fixture::new()
        .cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("check").and(contains("report")));
}

#[test]
fn check_requires_root() {
    Fixture::new().cmd().arg("check").assert().failure();
}

#[test]
fn check_rejects_unknown_license_type() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["check", tree_arg(&fx.tree), "--disallowed_types=evil"])
        .assert()
        .failure()
        .stderr(contains("evil"));
}

#[test]
fn check_without_modules_fails() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["check", tree_arg(&fx.tree)])
        .assert()
        .failure()
        .stderr(contains("no directories with go.mod found"));
}

#[test]
fn report_without_modules_fails() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["report", tree_arg(&fx.tree)])
        .assert()
        .failure()
        .stderr(contains("no directories with go.mod found"));
}

#[cfg(unix)]
#[test]
fn check_clean_tree_succeeds() {
    let fx = Fixture::new();
    fx.module("a");
    fx.module("b/c");
    let scanner = fx.scanner("exit 0");

    fx.cmd()
        .args(["-q", "--scanner", tree_arg(&scanner), "check", tree_arg(&fx.tree)])
        .assert()
        .success();
}

#[cfg(unix)]
#[test]
fn check_with_violations_names_count_and_directory() {
    let fx = Fixture::new();
    fx.module("svc");
    let scanner = fx.scanner(
        "echo 'E0101 Forbidden license type WTFPL for library example.com/x' >&2\n\
         echo 'E0101 Restricted license type GPL-3.0 for library example.com/y' >&2\n\
         exit 1",
    );

    fx.cmd()
        .args(["--scanner", tree_arg(&scanner), "check", tree_arg(&fx.tree)])
        .assert()
        .failure()
        .stdout(contains("Forbidden license type WTFPL"))
        .stderr(contains("found 2 violations in").and(contains("svc")));
}

#[cfg(unix)]
#[test]
fn check_json_lists_violations() {
    let fx = Fixture::new();
    fx.module("svc");
    let scanner = fx.scanner("echo 'Notice license type: MIT' >&2\nexit 1");

    let out = fx
        .cmd()
        .args([
            "--scanner",
            tree_arg(&scanner),
            "check",
            tree_arg(&fx.tree),
            "--json",
            "--disallowed_types",
            "notice",
        ])
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&out).expect("valid json output");
    assert_eq!(parsed[0]["violations"][0], "Notice license type: MIT");
}

#[cfg(unix)]
#[test]
fn check_reads_scanner_from_project_config() {
    let fx = Fixture::new();
    fx.module("svc");
    let scanner = fx.scanner("echo \"$3\" > seen.txt");
    let config_dir = fx.tree.join(".license-sweep");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        format!(
            "scanner = \"{}\"\ndisallowed_types = [\"reciprocal\"]\n",
            scanner.display()
        ),
    )
    .unwrap();

    fx.cmd().args(["-q", "check", tree_arg(&fx.tree)]).assert().success();

    let seen = fs::read_to_string(fx.tree.join("svc/seen.txt")).unwrap();
    assert_eq!(seen.trim(), "--disallowed_types=reciprocal");
}

#[cfg(unix)]
#[test]
fn report_writes_markdown_in_every_module() {
    let fx = Fixture::new();
    let modules = [fx.module("a"), fx.module("b/nested")];
    let scanner = fx.scanner("echo '| example.com/dep | Apache-2.0 |'");

    fx.cmd()
        .args(["--scanner", tree_arg(&scanner), "report", tree_arg(&fx.tree)])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    for dir in modules {
        let body = fs::read_to_string(dir.join("docs/_licenses.md")).unwrap();
        assert_eq!(body, "| example.com/dep | Apache-2.0 |\n");
    }
}

#[cfg(unix)]
#[test]
fn report_scanner_failure_is_reported() {
    let fx = Fixture::new();
    fx.module("a");
    let scanner = fx.scanner("echo 'no Go files' >&2\nexit 1");

    let out = fx
        .cmd()
        .args(["--scanner", tree_arg(&scanner), "report", tree_arg(&fx.tree)])
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();

    let stderr = String::from_utf8(out).expect("utf-8 stderr");
    assert_eq!(stderr.matches("no Go files").count(), 1, "stderr was: {stderr}");
}
