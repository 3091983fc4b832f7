//! End-to-end runs of the `freebuilder` binary.

use std::{fs, path::Path, process::Command};

const PERSON: &str = r#"
[features]
source = "java8"

[[type]]
name = "com.example.Person"
annotations = ["FreeBuilder"]

[[type.method]]
name = "getName"
returns = "String"

[[type.method]]
name = "getAge"
returns = "int"

[[type]]
name = "com.example.Person.Builder"
kind = "class"
static = true
extends = "Person_Builder"
"#;

const BROKEN: &str = r#"
[[type]]
name = "com.example.Broken"
annotations = ["FreeBuilder"]

[[type.method]]
name = "getName"
returns = "String"

[[type.method]]
name = "age"
returns = "int"
"#;

fn freebuilder(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_freebuilder"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run freebuilder")
}

fn write_types(dir: &Path, content: &str) -> String {
    let path = dir.join("types.toml");
    fs::write(&path, content).unwrap();
    path.display().to_string()
}

#[test]
fn test_generate_writes_builder() {
    let dir = tempfile::tempdir().unwrap();
    let types = write_types(dir.path(), PERSON);
    let out = dir.path().join("src");

    let output = freebuilder(&["generate", &types, "-o", &out.display().to_string()]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let source = fs::read_to_string(out.join("com/example/Person_Builder.java")).unwrap();
    assert!(source.contains("abstract class Person_Builder {"));
    assert!(source.contains("public Person.Builder setAge(int age) {"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("+ com/example/Person_Builder.java"), "{}", stdout);
}

#[test]
fn test_generate_dry_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let types = write_types(dir.path(), PERSON);
    let out = dir.path().join("src");

    let output = freebuilder(&[
        "generate",
        &types,
        "-o",
        &out.display().to_string(),
        "--dry-run",
    ]);
    assert!(output.status.success());
    assert!(!out.exists());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("abstract class Person_Builder {"));
    assert!(stdout.contains("Would generate: 1"));
}

#[test]
fn test_check_json_lists_types() {
    let dir = tempfile::tempdir().unwrap();
    let types = write_types(dir.path(), PERSON);

    let output = freebuilder(&["check", &types, "--json", "--guava", "true"]);
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["types"][0], "com.example.Person");
    assert_eq!(report["features"]["guava"], true);
}

#[test]
fn test_check_reports_analysis_errors() {
    let dir = tempfile::tempdir().unwrap();
    let types = write_types(dir.path(), BROKEN);

    let output = freebuilder(&["check", &types]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error:"), "{}", stderr);
    assert!(stderr.contains("com.example.Broken"), "{}", stderr);
}

#[test]
fn test_invalid_declarations_fail() {
    let dir = tempfile::tempdir().unwrap();
    let types = write_types(dir.path(), "[[type]]\nname = \"Person\"\n");

    let output = freebuilder(&["check", &types]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("must be fully qualified"), "{}", stderr);
}
