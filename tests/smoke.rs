use assert_cmd::Command;

#[test]
fn cli_help_runs() {
    let mut cmd = Command::cargo_bin("icd-assistant").expect("binary exists");
    cmd.arg("--help").assert().success();
}

#[test]
fn extract_defaults_to_records_csv_under_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("icd-assistant").expect("binary exists");
    let output = cmd
        .arg("extract")
        .current_dir(dir.path())
        .env("DATA_DIR", dir.path().join("data"))
        .env("OUTPUTS_DIR", dir.path().join("outputs"))
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("records.csv"), "stderr: {stderr}");
}
