//! Integration tests for the frameconf binary

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const TOPOLOGY: &str = r#"
client = "sidebar"

[[frames]]
name = "lms"
origin = "https://lms.example"
config = { services = [{ apiUrl = "https://lms.example/api/", grantToken = "secret" }] }

[[frames]]
name = "reader"
parent = "lms"
origin = "https://via.example"

[[frames]]
name = "sidebar"
parent = "reader"
origin = "https://client.example"
"#;

fn run(dir: &Path, args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_frameconf");
    Command::new(bin)
        .env("FRAMECONF_LOG", "off")
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .arg("--dir")
        .arg(dir)
        .args(args)
        .output()
        .unwrap()
}

fn setup() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("topology.toml"), TOPOLOGY).unwrap();
    fs::write(
        temp_dir.path().join("frameconf.toml"),
        "api_url = \"https://dev.hypothes.is/api/\"\n",
    )
    .unwrap();
    temp_dir
}

#[test]
fn test_resolve_prints_merged_config() {
    let temp_dir = setup();
    let topology = temp_dir.path().join("topology.toml");
    let output = run(
        temp_dir.path(),
        &[
            "resolve",
            "--topology",
            topology.to_str().unwrap(),
            "--host-config",
            r#"{"requestConfigFromFrame": {"origin": "https://lms.example", "ancestorLevel": 0}}"#,
            "--app-config",
            r#"{"appType": "via"}"#,
        ],
    );
    assert!(
        output.status.success(),
        "resolve should succeed: stderr={:?}",
        String::from_utf8_lossy(&output.stderr)
    );

    let merged: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(merged["appType"], "via");
    assert_eq!(merged["apiUrl"], "https://dev.hypothes.is/api/");
    assert_eq!(merged["services"][0]["grantToken"], "secret");
}

#[test]
fn test_resolve_reports_out_of_range_level() {
    let temp_dir = setup();
    let topology = temp_dir.path().join("topology.toml");
    let output = run(
        temp_dir.path(),
        &[
            "resolve",
            "--topology",
            topology.to_str().unwrap(),
            "--host-config",
            r#"{"requestConfigFromFrame": {"origin": "https://lms.example", "ancestorLevel": 10}}"#,
        ],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("The target parent frame has exceeded the ancestor tree"),
        "stderr={stderr}"
    );
}

#[test]
fn test_ancestry_lists_lineage() {
    let temp_dir = setup();
    let topology = temp_dir.path().join("topology.toml");
    let output = run(
        temp_dir.path(),
        &["ancestry", "--topology", topology.to_str().unwrap()],
    );
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("lms"));
    assert!(lines[1].contains("reader"));
    assert!(lines[2].contains("sidebar") && lines[2].contains("(client)"));
}
