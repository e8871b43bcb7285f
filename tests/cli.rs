//! End-to-end tests for the ast2json binary: exit codes, stream discipline
//! (JSON on stdout, diagnostics on stderr), and output determinism.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn ast2json() -> Command {
    Command::cargo_bin("ast2json").unwrap()
}

fn source_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_success_emits_document_and_newline() {
    let file = source_file("let x = 1;");
    ast2json()
        .arg(file.path())
        .assert()
        .success()
        .stdout(
            "{\"kind\":\"Program\",\"body\":[{\"kind\":\"LetDeclaration\",\"name\":\"x\",\
             \"init\":{\"kind\":\"NumberLiteral\",\"value\":1}}]}\n",
        )
        .stderr("");
}

#[test]
fn test_empty_file_is_an_empty_program() {
    let file = source_file("");
    ast2json()
        .arg(file.path())
        .assert()
        .success()
        .stdout("{\"kind\":\"Program\",\"body\":[]}\n");
}

#[test]
fn test_syntax_error_exits_1_with_clean_stdout() {
    let file = source_file("let x = ;");
    ast2json()
        .arg(file.path())
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("line 1"));
}

#[test]
fn test_missing_file_exits_2_and_names_the_path() {
    ast2json()
        .arg("does/not/exist.mini")
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains("does/not/exist.mini"));
}

#[test]
fn test_pretty_output_is_indented() {
    let file = source_file("let x = 1;");
    ast2json()
        .arg(file.path())
        .arg("--pretty")
        .assert()
        .success()
        .stdout(predicate::str::contains("{\n  \"kind\": \"Program\""));
}

#[test]
fn test_out_flag_writes_file_and_leaves_stdout_empty() {
    let file = source_file("let x = 1;");
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("ast.json");

    ast2json()
        .arg(file.path())
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout("");

    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.starts_with("{\"kind\":\"Program\""));
    assert!(written.ends_with('\n'));
}

#[test]
fn test_identical_input_gives_identical_output() {
    let file = source_file("let a = 1;\nprint(a + 2, \"done\");\n");
    let first = ast2json().arg(file.path()).assert().success();
    let second = ast2json().arg(file.path()).assert().success();
    assert_eq!(
        first.get_output().stdout,
        second.get_output().stdout
    );
}
