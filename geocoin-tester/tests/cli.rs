use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "geocoin-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_writes_json_report() {
    let exe = env!("CARGO_BIN_EXE_geocoin-tester");
    let output_path = temp_path("json");
    let status = Command::new(exe)
        .args([
            "--seeds",
            "1,2",
            "--iterations",
            "2",
            "--steps",
            "60",
            "--report",
            "json",
            "--output",
        ])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(&output_path).expect("read output");
    let reports: serde_json::Value = serde_json::from_str(&content).expect("json report");
    let reports = reports.as_array().expect("array");
    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(|r| r["passed"] == true));
    let _ = std::fs::remove_file(output_path);
}

#[test]
fn cli_console_report_summarises_walks() {
    let exe = env!("CARGO_BIN_EXE_geocoin-tester");
    let output = Command::new(exe)
        .args(["--seeds", "0x2a", "--iterations", "1", "--steps", "40"])
        .env("NO_COLOR", "1")
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Geocoin Simulation Tester"));
    assert!(stdout.contains("Walks passed: 1/1"));
}

#[test]
fn cli_rejects_bad_probability() {
    let exe = env!("CARGO_BIN_EXE_geocoin-tester");
    let output = Command::new(exe)
        .args(["--probability", "2.0", "--iterations", "1"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid simulation settings"));
}

#[test]
fn cli_rejects_oversized_range() {
    let exe = env!("CARGO_BIN_EXE_geocoin-tester");
    let output = Command::new(exe)
        .args(["--range", "100000", "--iterations", "1"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid simulation settings"));
    assert!(stderr.contains("neighborhood range must be at most 64 cells"));
}
