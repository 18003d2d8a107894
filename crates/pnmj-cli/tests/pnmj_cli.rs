use pnmj_core::table::{PnmjTable, TableExport};
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

#[test]
fn build_command_exports_table_json() {
    let temp = TempDir::new().expect("tempdir should be created");
    let output_path = temp.path().join("out/table.json");

    let output = run_cli(&[
        "build",
        "--max-degree",
        "8",
        "--ordering",
        "mjn",
        "--output",
        output_path.to_str().expect("utf-8 path"),
    ]);

    assert!(
        output.status.success(),
        "command should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ordering=MJN"), "stdout: {stdout}");
    assert!(stdout.contains("Coefficients written: 155 of 155"), "stdout: {stdout}");

    let export: TableExport = serde_json::from_str(
        &fs::read_to_string(&output_path).expect("table JSON should be readable"),
    )
    .expect("table JSON should parse");
    assert_eq!(export.max_degree, 8);
    assert_eq!(export.built_degree, Some(8));
    assert_eq!(export.length, 155);

    let table = PnmjTable::from_export(export).expect("export should restore");
    assert_eq!(table.get(0, 0, 0), Ok(1.0));
    let p100 = table.get(0, 1, 0).expect("valid triple");
    assert!((p100 - 3.0_f64.sqrt()).abs() < 1.0e-15);
}

#[test]
fn build_command_reads_json_config() {
    let temp = TempDir::new().expect("tempdir should be created");
    let config_path = temp.path().join("pnmj.json");
    write_file(
        &config_path,
        r#"
        {
          "maxDegree": 10,
          "ordering": "mnj",
          "orders": { "min": 2, "max": 4 },
          "capacity": 12
        }
        "#,
    );

    let output = run_cli(&["build", "--config", config_path.to_str().expect("utf-8 path")]);

    assert!(
        output.status.success(),
        "command should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("maxDegree=10 capacity=12"), "stdout: {stdout}");
    assert!(stdout.contains("orders=2..=4"), "stdout: {stdout}");
}

#[test]
fn build_command_rejects_degree_above_capacity() {
    let output = run_cli(&["build", "--max-degree", "9", "--capacity", "6"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: [INPUT.PNMJ_CONFIG]"), "stderr: {stderr}");
}

#[test]
fn build_command_requires_degree_or_config() {
    let output = run_cli(&["build"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("[INPUT.CLI_USAGE]"));
}

#[test]
fn coeff_command_prints_json_series() {
    let output = run_cli(&["coeff", "-n", "2", "-m", "0", "--json"]);

    assert!(
        output.status.success(),
        "command should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let parsed: Value = serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(parsed["basis"], Value::from("cos"));
    let coefficients = parsed["coefficients"]
        .as_array()
        .expect("coefficients array");
    assert_eq!(coefficients.len(), 2);
    assert_eq!(coefficients[1]["k"], Value::from(2));

    // Pbar_20 = sqrt(5) (3 cos 2theta + 1) / 4
    let p200 = coefficients[0]["value"].as_f64().expect("numeric value");
    let p201 = coefficients[1]["value"].as_f64().expect("numeric value");
    assert!((p200 - 5.0_f64.sqrt() / 4.0).abs() < 1.0e-15);
    assert!((p201 - 3.0 * 5.0_f64.sqrt() / 4.0).abs() < 1.0e-15);
}

#[test]
fn coeff_command_rejects_order_above_degree() {
    let output = run_cli(&["coeff", "-n", "3", "-m", "4"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("[INPUT.PNMJ_ORDER]"));
}

#[test]
fn coeff_command_rejects_index_beyond_series() {
    let output = run_cli(&["coeff", "-n", "5", "-m", "1", "-j", "3"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("[INPUT.PNMJ_INDEX]"));
}

#[test]
fn coeff_command_handles_degree_beyond_practical_table_size() {
    // A full table of this degree would need several gigabytes.
    let output = run_cli(&["coeff", "-n", "1500", "-m", "3", "-j", "1", "--json"]);

    assert!(
        output.status.success(),
        "command should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let parsed: Value = serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(parsed["basis"], Value::from("sin"));
    let coefficients = parsed["coefficients"]
        .as_array()
        .expect("coefficients array");
    assert_eq!(coefficients.len(), 1);
    assert_eq!(coefficients[0]["j"], Value::from(1));
    assert_eq!(coefficients[0]["k"], Value::from(2));
    let value = coefficients[0]["value"].as_f64().expect("numeric value");
    assert!(value.is_finite());
}

#[test]
fn eval_command_reports_series_and_direct_values() {
    let output = run_cli(&[
        "eval",
        "-n",
        "12",
        "-m",
        "5",
        "--colatitude",
        "0.8",
        "--longitude",
        "-1.2",
    ]);

    assert!(
        output.status.success(),
        "command should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Pbar(n=12, m=5, theta=0.8)"), "stdout: {stdout}");
    assert!(stdout.contains("Y(lambda=-1.2)"), "stdout: {stdout}");
}

#[test]
fn verify_command_passes_and_writes_report() {
    let temp = TempDir::new().expect("tempdir should be created");
    let report_path = temp.path().join("verify.json");

    let output = run_cli(&[
        "verify",
        "--max-degree",
        "30",
        "--samples",
        "5",
        "--ordering",
        "mjn",
        "--report",
        report_path.to_str().expect("utf-8 path"),
    ]);

    assert!(
        output.status.success(),
        "command should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("Verification status: PASS"));

    let parsed: Value = serde_json::from_str(
        &fs::read_to_string(&report_path).expect("report should be readable"),
    )
    .expect("report JSON should parse");
    assert_eq!(parsed["failures"], Value::from(0));
    assert_eq!(parsed["checked"], Value::from(5 * 31 * 32 / 2));
}

#[test]
fn verify_command_exits_one_when_tolerance_is_impossible() {
    let output = run_cli(&[
        "verify",
        "--max-degree",
        "20",
        "--samples",
        "3",
        "--abs-tol",
        "0",
        "--rel-tol",
        "0",
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Verification status: FAIL"));
}

#[test]
fn unknown_ordering_is_a_usage_error() {
    let output = run_cli(&["build", "--max-degree", "4", "--ordering", "nmj"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("[INPUT.CLI_USAGE]"));
}

fn run_cli(args: &[&str]) -> Output {
    let binary_path = env!("CARGO_BIN_EXE_pnmj-rs");
    Command::new(binary_path)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("pnmj-rs should run")
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("parent directory should be created");
    }
    fs::write(path, content).expect("file should be written");
}
