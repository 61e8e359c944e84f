//! Integration tests for batch directory conversion

use serde_json::{json, Value};
use std::fs;
use std::process::{Command, Output};
use tempfile::tempdir;

fn run_normconv(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_normconv"))
        .args(args)
        .output()
        .expect("failed to run normconv")
}

fn read_json(path: &std::path::Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_batch_directory_conversion() {
    let input_dir = tempdir().unwrap();
    let nested = input_dir.path().join("sub");
    fs::create_dir_all(&nested).unwrap();

    fs::write(
        input_dir.path().join("a.json"),
        r#"{"total": {"@type": "Money", "toFloat": 3.5}}"#,
    )
    .unwrap();
    fs::write(nested.join("b.json"), r#"[1, 2, 3]"#).unwrap();
    fs::write(nested.join("notes.txt"), "not json").unwrap();

    let mapping = input_dir.path().join("classes.toml");
    fs::write(&mapping, "[classes.Money]\nkey = \"amount\"\nmethod = \"toFloat\"\n").unwrap();

    let output_dir = tempdir().unwrap();
    let output = run_normconv(&[
        input_dir.path().to_str().unwrap(),
        "--mapping",
        mapping.to_str().unwrap(),
        "--output",
        output_dir.path().to_str().unwrap(),
        "--recursive",
    ]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("Found 2 JSON files"), "{}", stdout);

    assert_eq!(
        read_json(&output_dir.path().join("a.json")),
        json!({"total": 3.5})
    );
    assert_eq!(
        read_json(&output_dir.path().join("sub/b.json")),
        json!([1, 2, 3])
    );
    assert!(!output_dir.path().join("sub/notes.txt").exists());
}

#[test]
fn test_continue_on_error() {
    let input_dir = tempdir().unwrap();
    fs::write(input_dir.path().join("bad.json"), r#"{"x": {"@type": "Invoice"}}"#).unwrap();
    fs::write(input_dir.path().join("good.json"), r#"{"ok": true}"#).unwrap();

    let output_dir = tempdir().unwrap();
    let base = [
        input_dir.path().to_str().unwrap(),
        "--output",
        output_dir.path().to_str().unwrap(),
    ];

    // "bad.json" sorts first, so without the flag nothing else is written
    let stopped = run_normconv(&base);
    assert!(!stopped.status.success());
    assert!(!output_dir.path().join("good.json").exists());

    let mut args = base.to_vec();
    args.push("--continue-on-error");
    let continued = run_normconv(&args);

    assert!(!continued.status.success());
    assert!(String::from_utf8_lossy(&continued.stderr).contains("1 of 2 files failed"));
    assert_eq!(
        read_json(&output_dir.path().join("good.json")),
        json!({"ok": true})
    );
}
