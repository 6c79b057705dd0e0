// CLI behaviour: output formats, miette diagnostics and exit codes.
// Requires: assert_cmd, predicates crates in [dev-dependencies]

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

fn quill() -> Command {
    Command::cargo_bin("quill").unwrap()
}

/// A fresh scratch directory per test.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("quill-cli-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn cli_parse_prints_sexpr() {
    quill()
        .args(["parse", "-e", "a * b + c"])
        .assert()
        .success()
        .stdout("(+ (* a b) c)\n");
}

#[test]
fn cli_parse_reads_stdin() {
    quill()
        .arg("parse")
        .write_stdin("f(x, -y)\n")
        .assert()
        .success()
        .stdout("(call f x (- y))\n");
}

#[test]
fn cli_parse_json_format() {
    quill()
        .args(["parse", "-e", "x", "--format", "json"])
        .assert()
        .success()
        .stdout(contains("\"kind\": \"identifier\"").and(contains("\"name\": \"x\"")));
}

#[test]
fn cli_reports_miette_diagnostics_on_error() {
    quill()
        .args(["parse", "-e", "f(a, b"])
        .assert()
        .failure()
        .stderr(contains("quill::parse::unclosed_call").and(contains("help:")));
}

#[test]
fn cli_max_depth_flag() {
    quill()
        .args(["--max-depth", "2", "parse", "-e", "a + b + c"])
        .assert()
        .failure()
        .stderr(contains("quill::parse::nesting_limit"));
}

#[test]
fn cli_check_walks_source_files() {
    let dir = scratch_dir("check");
    fs::create_dir_all(dir.join("nested")).unwrap();
    fs::write(dir.join("good.qx"), "# comment\na + b\n\nf(x)\n").unwrap();
    fs::write(dir.join("nested/more.qx"), "-x * y\n").unwrap();
    fs::write(dir.join("ignored.txt"), "((( not an expression").unwrap();

    quill()
        .arg("check")
        .arg(&dir)
        .assert()
        .success()
        .stdout(contains("Files:       2").and(contains("Parsed:      3 expressions")));

    fs::write(dir.join("nested/bad.qx"), "a +\n").unwrap();
    quill()
        .arg("check")
        .arg(&dir)
        .assert()
        .failure()
        .stdout(contains("Failed:      1 expressions"))
        .stderr(contains("quill::parse::missing_operand"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn cli_grammar_prints_tables() {
    quill()
        .args(["grammar", "--format", "json"])
        .assert()
        .success()
        .stdout(contains("\"unary_binding\": 7").and(contains("\"reserved\"")));
}

#[test]
fn cli_validate_grammar_reports_findings() {
    let dir = scratch_dir("validate");
    let good = dir.join("good.yaml");
    fs::write(&good, "max_depth: 64\n").unwrap();
    quill()
        .arg("validate-grammar")
        .arg(&good)
        .assert()
        .success()
        .stdout(contains("Grammar validation passed"));

    let bad = dir.join("bad.yaml");
    fs::write(
        &bad,
        "precedence:\n  - symbols: ['+']\ninfix: ['+', '*']\nunary: []\nreserved: []\nunary_binding: 1\n",
    )
    .unwrap();
    quill()
        .arg("validate-grammar")
        .arg(&bad)
        .assert()
        .failure()
        .stdout(contains("'*'").and(contains("Grammar validation failed")));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn cli_config_file_changes_grammar() {
    let dir = scratch_dir("config");
    let config = dir.join("right.yaml");
    fs::write(
        &config,
        "grammar:\n  precedence:\n    - symbols: ['-']\n      associativity: right\n  infix: ['-']\n  unary: []\n  reserved: []\n  unary_binding: 1\n",
    )
    .unwrap();

    quill()
        .arg("--config")
        .arg(&config)
        .args(["parse", "-e", "a - b - c"])
        .assert()
        .success()
        .stdout("(- a (- b c))\n");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn cli_repl_session() {
    quill()
        .arg("repl")
        .write_stdin("a + b * c\nf(1,\n2)\n:grammar\n:quit\n")
        .assert()
        .success()
        .stdout(
            contains("(+ a (* b c))")
                .and(contains("(call f 1 2)"))
                .and(contains("unary_binding"))
                .and(contains("Goodbye!")),
        );
}
