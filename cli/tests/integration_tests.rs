use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn getopts(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_getopts"))
        .args(args)
        .output()
        .expect("failed to run getopts")
}

fn write_defs(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("failed to write definitions");
    path
}

const DEFS_YAML: &str = "
verbose: C v verbose
output: [V, o, output]
define:
  kind: A
  names: [D, define]
color: Os c color
";

// ---------------------------------------------------------------------------
// parse
// ---------------------------------------------------------------------------

#[test]
fn parse_prints_json_result() {
    let dir = tempfile::tempdir().unwrap();
    let defs = write_defs(dir.path(), "defs.yaml", DEFS_YAML);

    let out = getopts(&[
        "parse",
        "--defs",
        defs.to_str().unwrap(),
        "--",
        "-vvo",
        "out.txt",
        "-DNAME=x",
        "--color",
        "main.c",
    ]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["errors"], serde_json::json!([]));
    assert_eq!(json["values"]["verbose"], 2);
    assert_eq!(json["values"]["output"], "out.txt");
    assert_eq!(json["values"]["define"]["NAME"], "x");
    assert_eq!(json["values"]["color"], true);
    assert_eq!(json["positionals"], serde_json::json!(["main.c"]));
}

#[test]
fn parse_reads_json_definitions() {
    let dir = tempfile::tempdir().unwrap();
    let defs = write_defs(
        dir.path(),
        "defs.json",
        r#"{"include": {"kind": "Vm", "names": ["I", "include"]}}"#,
    );

    let out = getopts(&[
        "parse",
        "--defs",
        defs.to_str().unwrap(),
        "--",
        "-Ia",
        "--include",
        "b",
    ]);
    assert!(out.status.success());

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["values"]["include"], serde_json::json!(["a", "b"]));
}

#[test]
fn parse_errors_exit_with_status_two() {
    let out = getopts(&[
        "parse",
        "--define",
        "output=V o output",
        "--",
        "--bogus",
        "-o",
    ]);
    assert_eq!(out.status.code(), Some(2));

    let stderr = String::from_utf8_lossy(&out.stderr);
    let lines: Vec<&str> = stderr.lines().collect();
    assert_eq!(
        lines,
        vec![
            r#"Unknown option "--bogus""#,
            r#"Missing argument to option "-o""#,
        ]
    );

    // The result is still printed.
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["values"]["output"], false);
    assert_eq!(json["errors"].as_array().unwrap().len(), 2);
}

#[test]
fn inline_definitions_override_file() {
    let dir = tempfile::tempdir().unwrap();
    let defs = write_defs(dir.path(), "defs.yaml", DEFS_YAML);

    let out = getopts(&[
        "parse",
        "--defs",
        defs.to_str().unwrap(),
        "--define",
        "verbose=T v verbose",
        "--",
        "-vvv",
    ]);
    assert!(out.status.success());

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["values"]["verbose"], true);
}

#[test]
fn parse_table_format() {
    let out = getopts(&[
        "parse",
        "--define",
        "all=S a all",
        "--define",
        "name=V n",
        "--format",
        "table",
        "--",
        "-a",
        "-n",
        "x",
        "file",
    ]);
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout, "all   true\nname  x\n--  file\n");
}

#[test]
fn parse_without_definitions_fails() {
    let out = getopts(&["parse", "--", "-v"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).starts_with("error: no option definitions"));
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_lists_spellings() {
    let dir = tempfile::tempdir().unwrap();
    let defs = write_defs(dir.path(), "defs.yaml", DEFS_YAML);

    let out = getopts(&["check", "--defs", defs.to_str().unwrap()]);
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("4 option(s)\n"));
    assert!(stdout.contains("-v, --verbose"));
    assert!(stdout.contains("-D, --define"));
}

#[test]
fn check_reports_duplicate_spelling() {
    let out = getopts(&[
        "check",
        "--define",
        "verbose=C v",
        "--define",
        "version=S v version",
    ]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&out.stderr).trim_end(),
        r#"error: Duplicate option name "v""#
    );
}

#[test]
fn check_reports_unreadable_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.yaml");

    let out = getopts(&["check", "--defs", missing.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Failed to read"));
}

#[test]
fn check_reports_bad_kind_in_file() {
    let dir = tempfile::tempdir().unwrap();
    let defs = write_defs(dir.path(), "defs.json", r#"{"x": "Zz x"}"#);

    let out = getopts(&["check", "--defs", defs.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains(r#"Invalid kind "Zz" to option "x""#));
}
