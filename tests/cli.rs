use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn token_count_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("token-count"));
    cmd.env_remove("TOKEN_COUNT_MODEL")
        .env_remove("TOKEN_COUNT_FORMAT")
        .env_remove("RUST_LOG");
    cmd
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn parse_jsonl(stdout: &[u8]) -> Vec<Value> {
    let s = String::from_utf8_lossy(stdout);
    s.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str::<Value>(l).expect("valid jsonl line"))
        .collect()
}

#[test]
fn text_prints_token_count() {
    token_count_cmd()
        .arg("--text")
        .arg("hello world")
        .assert()
        .success()
        .stdout("2\n");
}

#[test]
fn file_prints_token_count() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.txt"), "hello world");

    token_count_cmd()
        .arg("-f")
        .arg(temp.path().join("a.txt"))
        .assert()
        .success()
        .stdout("2\n");
}

#[test]
fn directory_skips_hidden_and_default_ignored() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.txt"), "hello world");
    write_file(&temp.path().join(".secret"), "a hidden file with many tokens");
    write_file(&temp.path().join("node_modules/x.txt"), "dependency text");

    token_count_cmd()
        .arg("-d")
        .arg(temp.path())
        .assert()
        .success()
        .stdout("2\n");
}

#[test]
fn modes_print_in_order_directory_file_text() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("dir/a.txt"), "hello world");
    write_file(&temp.path().join("single.txt"), "one two three four");

    let assert = token_count_cmd()
        .arg("-t")
        .arg("hello")
        .arg("-f")
        .arg(temp.path().join("single.txt"))
        .arg("-d")
        .arg(temp.path().join("dir"))
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["2", "4", "1"]);
}

#[test]
fn no_input_prints_help() {
    token_count_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("--directory"));
}

#[test]
fn unknown_model_exits_with_config_error() {
    token_count_cmd()
        .arg("-m")
        .arg("no-such-model")
        .arg("-t")
        .arg("hello")
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unknown model 'no-such-model'"));
}

#[test]
fn model_name_read_from_environment() {
    token_count_cmd()
        .env("TOKEN_COUNT_MODEL", "no-such-model")
        .arg("-t")
        .arg("hello")
        .assert()
        .code(2);
}

#[test]
fn missing_file_exits_with_input_error() {
    let temp = tempdir().unwrap();

    token_count_cmd()
        .arg("-f")
        .arg(temp.path().join("absent.txt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("absent.txt"));
}

#[test]
fn binary_file_direct_count_fails() {
    let temp = tempdir().unwrap();
    let blob = temp.path().join("blob.bin");
    fs::write(&blob, [0xff, 0xfe, 0xfd]).unwrap();

    token_count_cmd()
        .arg("-f")
        .arg(&blob)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("UTF-8"));
}

#[test]
fn special_token_text_exits_with_input_error() {
    token_count_cmd()
        .arg("--text")
        .arg("<|endoftext|>")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("<|endoftext|>"));
}

#[test]
fn special_token_file_in_directory_is_skipped_with_warning() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.txt"), "hello world");
    write_file(&temp.path().join("prompt.txt"), "<|endoftext|>");

    token_count_cmd()
        .arg("-d")
        .arg(temp.path())
        .arg("--no-color")
        .assert()
        .success()
        .stdout("2\n")
        .stderr(predicate::str::contains("prompt.txt"))
        .stderr(predicate::str::contains("special token"));
}

#[test]
fn directory_below_dist_parent_is_counted() {
    let temp = tempdir().unwrap();
    let root = temp.path().join("dist").join("proj");
    write_file(&root.join("a.txt"), "hello world");

    token_count_cmd()
        .arg("-d")
        .arg(&root)
        .assert()
        .success()
        .stdout("2\n");
}

#[test]
fn binary_file_in_directory_is_skipped_with_warning() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.txt"), "hello world");
    fs::write(temp.path().join("blob.bin"), [0xff, 0xfe, 0xfd]).unwrap();

    token_count_cmd()
        .arg("-d")
        .arg(temp.path())
        .arg("--no-color")
        .assert()
        .success()
        .stdout("2\n")
        .stderr(predicate::str::contains("warning: could not read"))
        .stderr(predicate::str::contains("blob.bin"));
}

#[test]
fn quiet_suppresses_skip_warnings() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("blob.bin"), [0xff, 0xfe, 0xfd]).unwrap();

    token_count_cmd()
        .arg("-d")
        .arg(temp.path())
        .arg("--quiet")
        .assert()
        .success()
        .stdout("0\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn directory_that_is_a_file_fails() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.txt"), "hello");

    token_count_cmd()
        .arg("-d")
        .arg(temp.path().join("a.txt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is not a directory"));
}

#[test]
fn gptignore_wins_over_gitignore() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join(".gptignore"), "*.log\n");
    write_file(&temp.path().join(".gitignore"), "*.txt\n");
    write_file(&temp.path().join("app.log"), "lots of log lines here");
    write_file(&temp.path().join("a.txt"), "hello world");

    token_count_cmd()
        .arg("-d")
        .arg(temp.path())
        .assert()
        .success()
        .stdout("2\n");
}

#[test]
fn json_format_reports_each_mode() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.txt"), "hello world");

    let assert = token_count_cmd()
        .arg("--format")
        .arg("json")
        .arg("-f")
        .arg(temp.path().join("a.txt"))
        .arg("-t")
        .arg("hello world")
        .assert()
        .success();

    let records = parse_jsonl(&assert.get_output().stdout);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["mode"], "file");
    assert_eq!(records[0]["tokens"], 2);
    assert_eq!(records[0]["model"], "gpt-3.5-turbo");
    assert_eq!(records[1]["mode"], "text");
    assert_eq!(records[1]["tokens"], 2);
    assert!(records[1].get("path").is_none());
}

#[test]
fn invalid_format_is_usage_error() {
    token_count_cmd()
        .arg("--format")
        .arg("yaml")
        .arg("-t")
        .arg("x")
        .assert()
        .code(2);
}
