//! CLI integration tests
//!
//! Run the built `modrecon` binary against manifests in a scratch folder.

use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn entry(hash: &str, homepage: &str, name: &str) -> Value {
    json!({
        "state": "installed",
        "attributes": {
            "modName": name,
            "fileName": format!("{name}.zip"),
            "fileMD5": hash,
            "modVersion": "1.0",
            "homepage": homepage,
            "customFileName": format!("{name} Custom"),
            "version": "1.0.0"
        }
    })
}

fn write(dir: &Path, participant: &str, mods: Value) {
    fs::create_dir_all(dir).unwrap();
    let doc = json!({ "mods": [{}, { "baldursgate3": mods }] });
    fs::write(dir.join(format!("{participant}.json")), doc.to_string()).unwrap();
}

fn modrecon(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_modrecon"))
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

#[test]
fn test_cli_writes_csv_report_with_default_folders() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().join("data/settings_json");
    write(&data_dir, "alice", json!({"a": entry("ha", "a", "A")}));
    write(
        &data_dir,
        "bob",
        json!({"a": entry("ha", "a", "A"), "d": entry("hd", "d", "D")}),
    );

    let output = modrecon(
        temp_dir.path(),
        &["--hosts-file", "alice.json", "--format", "csv"],
    );

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let report = temp_dir
        .path()
        .join("data/conflict_analysis/conflicts_bob.csv");
    let text = fs::read_to_string(report).unwrap();
    assert!(text.contains("1,bob,D.zip,hd,D Custom,D,1.0,1.0.0,d"));
}

#[test]
fn test_cli_summary_goes_to_stdout() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().join("manifests");
    write(&data_dir, "alice", json!({"a": entry("ha", "a", "A")}));
    write(&data_dir, "bob", json!({"b": entry("ha", "a", "A")}));

    let output = modrecon(
        temp_dir.path(),
        &[
            "--hosts-file",
            "alice",
            "--data-dir",
            data_dir.to_str().unwrap(),
            "--output-dir",
            "out",
            "--summary",
        ],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("## Mod Reconciliation"));
    assert!(stdout.contains("_No conflicts detected._"));
    assert!(!temp_dir.path().join("out/conflicts_bob.xlsx").exists());
}

#[test]
fn test_cli_missing_host_prints_error_and_hint() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().join("data/settings_json");
    write(&data_dir, "alice", json!({"a": entry("ha", "a", "A")}));
    write(&data_dir, "bob", json!({"d": entry("hd", "d", "D")}));

    let output = modrecon(temp_dir.path(), &["--hosts-file", "zed"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: [ERR_MISSING_HOST]"));
    assert!(stderr.contains("Hint: Host's file not found"));
    assert!(stderr.contains("alice, bob"));
}

#[test]
fn test_cli_empty_data_folder_is_created() {
    let temp_dir = TempDir::new().unwrap();

    let output = modrecon(temp_dir.path(), &["--hosts-file", "alice"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(temp_dir.path().join("data/settings_json").is_dir());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERR_INSUFFICIENT_INPUT"));
    assert!(stderr.contains("Hint: Is the data folder empty?"));
}

#[test]
fn test_cli_config_file_and_log_dir() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().join("players");
    write(&data_dir, "alice", json!({"a": entry("ha", "a", "A")}));
    write(
        &data_dir,
        "bob",
        json!({"a": entry("ha", "a", "A"), "d": entry("hd", "d", "D")}),
    );
    fs::write(
        temp_dir.path().join("modrecon.toml"),
        "data_dir = \"players\"\noutput_dir = \"reports\"\nformat = \"html\"\n\n[logging]\nprofile = \"production\"\ndir = \"logs\"\n",
    )
    .unwrap();

    let output = modrecon(
        temp_dir.path(),
        &["--hosts-file", "alice", "--config", "modrecon.toml"],
    );

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(temp_dir.path().join("reports/conflicts_bob.html").exists());

    let logs: Vec<_> = fs::read_dir(temp_dir.path().join("logs"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(logs.len(), 1);
    assert!(logs[0].starts_with("modrecon_") && logs[0].ends_with(".log"));
}

#[test]
fn test_cli_rejects_unknown_format() {
    let temp_dir = TempDir::new().unwrap();

    let output = modrecon(
        temp_dir.path(),
        &["--hosts-file", "alice", "--format", "pdf"],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown report format"));
}
