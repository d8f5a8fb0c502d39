//! Integration tests for the htmlmd CLI.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_htmlmd"))
}

#[test]
fn test_dash_reads_stdin() {
    cli()
        .arg("-")
        .write_stdin("<h1>Title</h1><p>Content</p>")
        .assert()
        .success()
        .stdout("# Title\n\nContent\n");
}

#[test]
fn test_stdin_to_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("nested").join("page.md");

    cli()
        .arg("-")
        .arg("-o")
        .arg(&output_path)
        .write_stdin("<p>Output test</p>")
        .assert()
        .success()
        .stdout("");

    assert_eq!(fs::read_to_string(&output_path).unwrap(), "Output test");
}

#[test]
fn test_blank_stdin_fails() {
    cli()
        .arg("-")
        .write_stdin("  \n ")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input"));
}

#[test]
fn test_file_written_alongside_input() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("guide.html");
    fs::write(&input_path, "<ul><li>one</li><li>two</li></ul>").unwrap();

    cli().arg(&input_path).assert().success();

    let output = fs::read_to_string(temp_dir.path().join("guide.md")).unwrap();
    assert_eq!(output, "* one\n* two");
}

#[test]
fn test_single_file_to_named_output() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("in.html");
    let output_path = temp_dir.path().join("result.md");
    fs::write(&input_path, "<h2>Named</h2>").unwrap();

    cli()
        .arg(&input_path)
        .arg("-o")
        .arg(&output_path)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&output_path).unwrap(), "## Named");
}

#[test]
fn test_glob_into_output_directory() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.html"), "<p>alpha</p>").unwrap();
    fs::write(temp_dir.path().join("b.html"), "<p>beta</p>").unwrap();
    fs::write(temp_dir.path().join("notes.txt"), "not html").unwrap();
    let out_dir = temp_dir.path().join("out");

    let pattern = format!("{}/*.html", temp_dir.path().display());
    cli()
        .arg(&pattern)
        .arg("-o")
        .arg(&out_dir)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(out_dir.join("a.md")).unwrap(), "alpha");
    assert_eq!(fs::read_to_string(out_dir.join("b.md")).unwrap(), "beta");
    assert!(!out_dir.join("notes.md").exists());
}

#[test]
fn test_no_matching_files_fails() {
    let temp_dir = TempDir::new().unwrap();
    let pattern = format!("{}/*.html", temp_dir.path().display());

    cli()
        .arg(&pattern)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No files found matching pattern"));
}

#[test]
fn test_failed_file_does_not_stop_batch() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("blank.html"), "   ").unwrap();
    fs::write(temp_dir.path().join("good.html"), "<p>fine</p>").unwrap();

    let pattern = format!("{}/*.html", temp_dir.path().display());
    cli().arg(&pattern).assert().failure();

    assert_eq!(
        fs::read_to_string(temp_dir.path().join("good.md")).unwrap(),
        "fine"
    );
    assert!(!temp_dir.path().join("blank.md").exists());
}

#[test]
fn test_ignore_tag_option() {
    cli()
        .arg("-")
        .arg("--ignore-tag")
        .arg("nav")
        .write_stdin("<nav><a href=\"/\">Home</a></nav><p>Body</p>")
        .assert()
        .success()
        .stdout("Body\n");
}

#[test]
fn test_max_depth_option() {
    let html = format!("{}deep{}", "<div>".repeat(20), "</div>".repeat(20));
    cli()
        .arg("-")
        .arg("--max-depth")
        .arg("8")
        .write_stdin(html)
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds the maximum of 8"));
}

#[test]
fn test_very_deep_stdin_reports_error() {
    let html = format!("{}x", "<span>".repeat(100_000));
    cli()
        .arg("-")
        .write_stdin(html)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("exceeds the maximum of 512"));
}

#[test]
fn test_interactive_paste_session() {
    cli()
        .arg("--interactive")
        .write_stdin("2\n<p><em>hi</em></p>\n---ENDHTML---\n1\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("--- Markdown Output ---\n*hi*\n"));
}

#[test]
fn test_interactive_conflicts_with_input() {
    cli().arg("--interactive").arg("page.html").assert().failure();
}

#[test]
fn test_missing_input_is_usage_error() {
    cli().assert().failure();
}
