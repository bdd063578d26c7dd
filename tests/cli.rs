//! Command-line workflows: in-place formatting, output files, --check,
//! settings discovery and selections.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const UNFORMATTED: &str =
    "class C {\n    /// <summary>Words and words and words.</summary>\n    void M() { }\n}\n";

fn reformadoc(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("reformadoc").unwrap();
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

/// A directory holding `files`, fenced off from editorconfig files above it.
fn setup(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".editorconfig"), "root = true\n").unwrap();
    for (name, text) in files {
        fs::write(dir.path().join(name), text).unwrap();
    }
    dir
}

fn read(dir: &TempDir, name: &str) -> String {
    fs::read_to_string(dir.path().join(name)).unwrap()
}

#[test]
fn formats_file_in_place() {
    let dir = setup(&[("C.cs", UNFORMATTED)]);
    reformadoc(dir.path()).arg("C.cs").assert().success();
    assert_eq!(
        read(&dir, "C.cs"),
        "class C {\n    /// <summary>\n    /// Words and words and words.\n    /// </summary>\n    void M() { }\n}\n"
    );
}

#[test]
fn writes_to_output_file() {
    let dir = setup(&[("C.cs", UNFORMATTED)]);
    reformadoc(dir.path())
        .args(["--wrap-column", "30", "C.cs", "out.cs"])
        .assert()
        .success();
    assert_eq!(read(&dir, "C.cs"), UNFORMATTED);
    assert_eq!(
        read(&dir, "out.cs"),
        "class C {\n    /// <summary>\n    /// Words and words and\n    /// words.\n    /// </summary>\n    void M() { }\n}\n"
    );
}

#[test]
fn check_reports_without_writing() {
    let dir = setup(&[("C.cs", UNFORMATTED)]);
    reformadoc(dir.path())
        .args(["--check", "C.cs"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("C.cs would be reformatted"));
    assert_eq!(read(&dir, "C.cs"), UNFORMATTED);

    reformadoc(dir.path()).arg("C.cs").assert().success();
    reformadoc(dir.path()).args(["--check", "C.cs"]).assert().success();
}

#[test]
fn settings_file_beats_editorconfig() {
    let dir = setup(&[("C.cs", UNFORMATTED), ("reformadoc.toml", "wrap_column = 30\n")]);
    fs::write(
        dir.path().join(".editorconfig"),
        "root = true\n[*.cs]\nmax_line_length = 100\nindent_style = tab\n",
    )
    .unwrap();
    reformadoc(dir.path()).arg("C.cs").assert().success();
    assert_eq!(
        read(&dir, "C.cs"),
        "class C {\n    /// <summary>\n\t/// Words and words and\n\t/// words.\n\t/// </summary>\n    void M() { }\n}\n"
    );
}

#[test]
fn span_limits_the_formatted_comments() {
    let text = "/// <summary>A.</summary>\nclass A { }\n/// <summary>B.</summary>\nclass B { }\n";
    let dir = setup(&[("C.cs", text)]);
    reformadoc(dir.path())
        .args(["--span", "45..46", "C.cs"])
        .assert()
        .success();
    assert_eq!(
        read(&dir, "C.cs"),
        "/// <summary>A.</summary>\nclass A { }\n/// <summary>\n/// B.\n/// </summary>\nclass B { }\n"
    );
}

#[test]
fn errors_exit_with_two() {
    let dir = setup(&[("bad.toml", "wrap_column = \"x\"\n"), ("C.cs", UNFORMATTED)]);
    reformadoc(dir.path())
        .arg("missing.cs")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("missing.cs"));
    reformadoc(dir.path())
        .args(["--config", "bad.toml", "C.cs"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("bad.toml"));
}

#[test]
fn rejects_bad_flag_values() {
    let dir = setup(&[("C.cs", UNFORMATTED)]);
    reformadoc(dir.path())
        .args(["--newline", "cr", "C.cs"])
        .assert()
        .failure();
    reformadoc(dir.path())
        .args(["--span", "9..3", "C.cs"])
        .assert()
        .failure();
}
