mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use common::*;

fn sample_dir() -> TempDir {
    let dir = TempDir::new().unwrap();

    let mut foo = ClassBytes::new("app/core/Foo");
    let dep = foo.method_ref("app/util/Dep");
    foo.add_method("()V", &[], Some([invoke_virtual(dep), vreturn()].concat()), &[]);
    std::fs::write(dir.path().join("Foo.class"), foo.build(ACC_PUBLIC | ACC_SUPER)).unwrap();

    let util = ClassBytes::new("app/util/Dep");
    std::fs::write(dir.path().join("Dep.class"), util.build(ACC_PUBLIC | ACC_SUPER)).unwrap();

    dir
}

#[test]
fn test_analyze_json_output() {
    let dir = sample_dir();
    Command::cargo_bin("classdep-rs")
        .unwrap()
        .args(["analyze"])
        .arg(dir.path())
        .args(["--packages", "app.core,app.util"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"app.core\""))
        .stdout(predicate::str::contains("\"instability\""));
}

#[test]
fn test_analyze_discovers_packages_when_omitted() {
    let dir = sample_dir();
    Command::cargo_bin("classdep-rs")
        .unwrap()
        .args(["analyze"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"app.util\""));
}

#[test]
fn test_analyze_table_output() {
    let dir = sample_dir();
    Command::cargo_bin("classdep-rs")
        .unwrap()
        .args(["analyze"])
        .arg(dir.path())
        .args(["--packages", "app.core", "--format", "table", "--sequential"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Package"))
        .stdout(predicate::str::contains("app.core"));
}

#[test]
fn test_inspect_outputs_descriptor() {
    let dir = sample_dir();
    Command::cargo_bin("classdep-rs")
        .unwrap()
        .args(["inspect"])
        .arg(dir.path().join("Foo.class"))
        .assert()
        .success()
        .stdout(predicate::str::contains("app.core.Foo"));
}

#[test]
fn test_inspect_rejects_non_class_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("garbage.class");
    std::fs::write(&path, b"not a class file").unwrap();

    Command::cargo_bin("classdep-rs")
        .unwrap()
        .args(["inspect"])
        .arg(&path)
        .assert()
        .failure();
}
