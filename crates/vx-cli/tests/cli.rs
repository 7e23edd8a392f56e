//! CLI command integration tests.
//! Each test uses a temp directory via VX_DATA_DIR for full isolation.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn vx_cmd(data_dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("vx").unwrap();
    cmd.env("VX_DATA_DIR", data_dir.path());
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn relation_unity() {
    let dir = TempDir::new().unwrap();
    vx_cmd(&dir)
        .args(["relation", "1", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("relation:      Unity-Unity"))
        .stdout(predicate::str::contains("consciousness: 9"))
        .stdout(predicate::str::contains("frequency_hz:  3888"))
        .stdout(predicate::str::contains("vortex_flow:   2 4 8 7 5 1"));
}

#[test]
fn relation_json_uses_wire_names() {
    let dir = TempDir::new().unwrap();
    let output = vx_cmd(&dir)
        .args(["relation", "2", "8", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["relationLabel"], "Duality-Infinity");
    assert_eq!(json["consciousness"], 6);
    assert_eq!(json["frequencyHz"].as_u64().unwrap() % 432, 0);
}

#[test]
fn convention_flag_changes_result() {
    let dir = TempDir::new().unwrap();
    let output = vx_cmd(&dir)
        .args(["relation", "2", "8", "--json", "--convention", "main"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["consciousness"], 2);
}

#[test]
fn out_of_range_digit_fails() {
    let dir = TempDir::new().unwrap();
    vx_cmd(&dir)
        .args(["relation", "1", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));

    vx_cmd(&dir)
        .args(["flow", "-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn matrix_rows() {
    let dir = TempDir::new().unwrap();
    let output = vx_cmd(&dir).args(["matrix", "2"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let rows: Vec<Vec<u8>> = stdout
        .lines()
        .map(|l| l.split_whitespace().map(|v| v.parse().unwrap()).collect())
        .collect();
    assert_eq!(rows.len(), 10);
    assert_eq!(rows[0][0], 9);
    assert_eq!(rows[3][4], 5);
    assert!(rows.iter().flatten().all(|&v| (1..=9).contains(&v)));
}

#[test]
fn flow_color_sound() {
    let dir = TempDir::new().unwrap();
    vx_cmd(&dir)
        .args(["flow", "3"])
        .assert()
        .success()
        .stdout("6 9\n");

    vx_cmd(&dir)
        .args(["color", "1", "1"])
        .assert()
        .success()
        .stdout("hsl(36, 124%, 95%)\n");

    vx_cmd(&dir)
        .args(["color", "1", "1", "--clamp-color"])
        .assert()
        .success()
        .stdout("hsl(36, 100%, 95%)\n");

    vx_cmd(&dir)
        .args(["sound", "1", "1"])
        .assert()
        .success()
        .stdout("6998.40\n");
}

#[test]
fn table_reports_discrepancy() {
    let dir = TempDir::new().unwrap();
    vx_cmd(&dir)
        .arg("table")
        .assert()
        .success()
        .stdout(predicate::str::contains("convention: relation"))
        .stdout(predicate::str::contains("discrepancy: digit 8 multiplier 3/1 (relation) vs 1/1 (main)"));
}

#[test]
fn config_file_selects_convention() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), "convention = \"main\"\n").unwrap();
    vx_cmd(&dir)
        .arg("table")
        .assert()
        .success()
        .stdout(predicate::str::contains("convention: main"));
}

#[test]
fn bad_config_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), "convention = \"nope\"\n").unwrap();
    vx_cmd(&dir)
        .args(["flow", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown convention"));
}

#[test]
fn catalog_writes_database() {
    let dir = TempDir::new().unwrap();
    vx_cmd(&dir)
        .arg("catalog")
        .assert()
        .success()
        .stdout(predicate::str::contains("saved 100 relations, 10 matrices"));
    assert!(dir.path().join("catalog.db").exists());
}

#[test]
fn export_import_roundtrip() {
    let dir = TempDir::new().unwrap();
    let export_path = dir.path().join("export.json");

    vx_cmd(&dir)
        .args(["export", "--convention", "main"])
        .arg(&export_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("exported to"));

    let content = std::fs::read_to_string(&export_path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json["relations"].as_array().unwrap().len(), 100);
    assert_eq!(json["table"]["convention"], "main");

    vx_cmd(&dir)
        .arg("import")
        .arg(&export_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("relations=100, convention=main"));
}

#[test]
fn import_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    vx_cmd(&dir)
        .args(["import", "/nonexistent/path/catalog.json"])
        .assert()
        .failure();
}

#[test]
fn table_on_custom_config_keeps_builtin_disagreement() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "convention = \"main\"\n\n[[multiplier_overrides]]\ndigit = 5\nnumerator = 1\nsource = \"audit\"\n",
    )
    .unwrap();
    vx_cmd(&dir)
        .arg("table")
        .assert()
        .success()
        .stdout(predicate::str::contains("convention: main+audit"))
        .stdout(predicate::str::contains("discrepancy: digit 8 multiplier 1/1 (main) vs 3/1 (relation)"))
        .stdout(predicate::str::contains("discrepancy: digit 5 multiplier 1/1 (audit) vs 5/1 (main)"));
}

#[test]
fn import_rejects_edited_export() {
    let dir = TempDir::new().unwrap();
    let export_path = dir.path().join("export.json");
    vx_cmd(&dir).arg("export").arg(&export_path).assert().success();

    let mut json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&export_path).unwrap()).unwrap();
    json["relations"][11]["frequencyHz"] = serde_json::json!(1000);
    std::fs::write(&export_path, json.to_string()).unwrap();

    vx_cmd(&dir)
        .arg("import")
        .arg(&export_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not match"));
}
