//! Smoke tests for the cork binary.

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_version_flag() {
    let env = TestEnv::new();
    env.cork()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cork"));
}

#[test]
fn test_help_lists_subcommands() {
    let env = TestEnv::new();
    env.cork()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("board"))
        .stdout(predicate::str::contains("card"))
        .stdout(predicate::str::contains("label"));
}

#[test]
fn test_board_list_on_fresh_dir() {
    let env = TestEnv::new();
    env.cork()
        .args(["board", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No boards"));
}

#[test]
fn test_board_create_and_list() {
    let env = TestEnv::new();
    env.cork()
        .args(["board", "create", "Sprint 1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sprint 1"));

    env.cork()
        .args(["board", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sprint 1"));
}

#[test]
fn test_board_create_default_name() {
    let env = TestEnv::new();
    env.cork()
        .args(["board", "create"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Board 1"));
    env.cork()
        .args(["board", "create"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Board 2"));
}

#[test]
fn test_path_points_into_data_dir() {
    let env = TestEnv::new();
    env.cork()
        .arg("path")
        .assert()
        .success()
        .stdout(predicate::str::contains("data.json"));
}

#[test]
fn test_unknown_board_is_an_error() {
    let env = TestEnv::new();
    env.cork()
        .args(["board", "show", "board-nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found").or(predicate::str::contains("Error")));
}

#[test]
fn test_corrupt_data_file_degrades_to_empty() {
    let env = TestEnv::new();
    std::fs::write(env.data_path().join("data.json"), "{definitely not json").unwrap();
    env.cork()
        .args(["board", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No boards"));
}
