//! End-to-end checks: definition file → interface → parsed bindings.

use std::fs;
use std::process::Command;

use usage_pattern_cli::{Interface, InterfaceSpec};
use usage_pattern_core::{ArgValue, TypeRegistry};

const SAMPLE_YAML: &str = "\
name: copytool
short_description: copies things
commands:
  push: \"[-v|-q] [-n <INT>|-f] <source>\"
  status: \"[-s|-l]\"
parameters:
  - flag: v
    long_name: verbose
    description: say more
  - flag: n
    long_name: count
    default: \"1\"
    value_type: INT
";

fn tokens(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_yaml_definition_end_to_end() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("copytool.yaml");
    fs::write(&path, SAMPLE_YAML).expect("write definition");

    let spec = InterfaceSpec::from_path(&path).expect("definition should load");
    let interface = Interface::new(spec, TypeRegistry::new()).expect("definition should compile");

    let bindings = interface
        .parse(&tokens(&["copytool", "push", "-v", "a.txt"]))
        .unwrap();
    assert!(bindings.is_present("verbose"));
    assert_eq!(bindings.value_of("count"), Some(&ArgValue::Int(1)));
    assert_eq!(
        bindings.positional(),
        Some(&ArgValue::Str("a.txt".to_string()))
    );
}

#[test]
fn test_json_definition_end_to_end() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("copytool.json");
    fs::write(
        &path,
        r#"{
            "name": "copytool",
            "commands": {"status": "[-s|-l]"}
        }"#,
    )
    .expect("write definition");

    let spec = InterfaceSpec::from_path(&path).expect("definition should load");
    let interface = Interface::new(spec, TypeRegistry::new()).expect("definition should compile");
    assert!(interface.parse(&tokens(&["copytool", "status", "-s"])).is_ok());
    assert!(
        interface
            .parse(&tokens(&["copytool", "status", "-s", "-l"]))
            .is_err()
    );
}

#[test]
fn test_unsupported_extension_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("copytool.toml");
    fs::write(&path, "name = \"copytool\"").expect("write definition");
    assert!(InterfaceSpec::from_path(&path).is_err());
}

#[test]
fn test_binary_accepts_and_rejects() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("copytool.yaml");
    fs::write(&path, SAMPLE_YAML).expect("write definition");
    let definition = path.to_str().expect("utf-8 temp path");

    let ok = Command::new(env!("CARGO_BIN_EXE_usage-check"))
        .args([definition, "push", "-v", "a.txt"])
        .output()
        .expect("binary should run");
    assert!(ok.status.success(), "stderr: {}", String::from_utf8_lossy(&ok.stderr));
    let stdout = String::from_utf8_lossy(&ok.stdout);
    assert!(stdout.contains("\"verbose\": true"));
    assert!(stdout.contains("\"<positional>\": \"a.txt\""));

    let bad = Command::new(env!("CARGO_BIN_EXE_usage-check"))
        .args([definition, "push", "-v", "-q", "a.txt"])
        .output()
        .expect("binary should run");
    assert_eq!(bad.status.code(), Some(1));

    let unknown = Command::new(env!("CARGO_BIN_EXE_usage-check"))
        .args([definition, "clone"])
        .output()
        .expect("binary should run");
    assert_eq!(unknown.status.code(), Some(1));

    let help = Command::new(env!("CARGO_BIN_EXE_usage-check"))
        .args([definition, "--help"])
        .output()
        .expect("binary should run");
    assert!(help.status.success());
    assert!(String::from_utf8_lossy(&help.stdout).contains("copies things"));
}
