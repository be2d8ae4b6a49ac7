//! Integration tests for `ccdeploy run`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::PathBuf;

use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

use crate::fake_server::{FakeServer, Reply, Script, ccdeploy, temp_home};

fn program(home: &TempDir, name: &str, code: &str) -> PathBuf {
    let path = home.path().join(name);
    std::fs::write(&path, code).expect("write program");
    path
}

#[test]
fn test_run_lists_then_deploys_expected_request() {
    let server = FakeServer::start(Script::default());
    let home = temp_home();
    let file = program(&home, "prog.lua", "print(1)\n");

    ccdeploy(&server, &home)
        .args(["run", "2", "--name", "prog", "--file"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Program prog.lua sent to computer 2."));

    assert_eq!(
        server.paths(),
        vec!["/api/get_computer_ids", "/api/run_program"]
    );
    assert_eq!(
        server.body_of("/api/run_program"),
        Some(json!({
            "computer_id": "2",
            "code": "print(1)",
            "filename": "prog.lua",
        }))
    );
}

#[test]
fn test_run_reads_program_from_stdin() {
    let server = FakeServer::start(Script::default());
    let home = temp_home();

    ccdeploy(&server, &home)
        .args(["run", "1", "--name", "My Program!1", "--file", "-"])
        .write_stdin("  print('hi')  \n")
        .assert()
        .success();

    let body = server.body_of("/api/run_program").expect("run request");
    assert_eq!(body["code"], "print('hi')");
    assert_eq!(body["filename"], "My_Program_1.lua");
}

#[test]
fn test_run_unknown_computer_is_rejected_before_deploying() {
    let server = FakeServer::start(Script::default());
    let home = temp_home();
    let file = program(&home, "prog.lua", "print(1)");

    ccdeploy(&server, &home)
        .args(["run", "9", "--name", "prog", "--file"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Computer ID \"9\""));

    assert_eq!(server.paths(), vec!["/api/get_computer_ids"]);
}

#[test]
fn test_run_empty_program_sends_nothing() {
    let server = FakeServer::start(Script::default());
    let home = temp_home();
    let file = program(&home, "empty.lua", "  \n\n");

    ccdeploy(&server, &home)
        .args(["run", "2", "--name", "prog", "--file"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No Lua code generated to run."));

    assert!(server.paths().is_empty());
}

#[test]
fn test_run_blank_name_sends_nothing() {
    let server = FakeServer::start(Script::default());
    let home = temp_home();
    let file = program(&home, "prog.lua", "print(1)");

    ccdeploy(&server, &home)
        .args(["run", "2", "--name", "  ", "--file"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter a program name."));

    assert!(server.paths().is_empty());
}

#[test]
fn test_run_blank_computer_sends_nothing() {
    let server = FakeServer::start(Script::default());
    let home = temp_home();
    let file = program(&home, "prog.lua", "print(1)");

    ccdeploy(&server, &home)
        .args(["run", " ", "--name", "prog", "--file"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please select a Computer ID."));

    assert!(server.paths().is_empty());
}

#[test]
fn test_run_blank_computer_is_reported_before_the_file_is_read() {
    let server = FakeServer::start(Script::default());
    let home = temp_home();
    let image = program(&home, "a.png", "not lua");

    ccdeploy(&server, &home)
        .args(["run", " ", "--name", "x", "--file"])
        .arg(&image)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please select a Computer ID."))
        .stderr(predicate::str::contains(".lua").not());

    assert!(server.paths().is_empty());
}

#[test]
fn test_run_rejects_unsupported_file_type() {
    let server = FakeServer::start(Script::default());
    let home = temp_home();
    let file = program(&home, "prog.py", "print(1)");

    ccdeploy(&server, &home)
        .args(["run", "2", "--name", "prog", "--file"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Only .lua and .txt files"));

    assert!(server.paths().is_empty());
}

#[test]
fn test_run_server_failure_shows_its_message() {
    let server = FakeServer::start(Script {
        run: Reply::fail(500, "Computer 2 is offline."),
        ..Script::default()
    });
    let home = temp_home();
    let file = program(&home, "prog.lua", "print(1)");

    ccdeploy(&server, &home)
        .args(["run", "2", "--name", "prog", "--file"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Computer 2 is offline."));
}

#[test]
fn test_run_without_file_and_no_prompt_has_no_code() {
    let server = FakeServer::start(Script::default());
    let home = temp_home();

    ccdeploy(&server, &home)
        .args(["run", "2", "--name", "prog"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No Lua code generated to run."));

    assert!(server.paths().is_empty());
}
