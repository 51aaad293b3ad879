use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn home_path(home: &TempDir) -> &Path {
    home.path()
}

fn bin_path() -> &'static str {
    env!("CARGO_BIN_EXE_usage-chart")
}

fn run_cmd(home: &TempDir, args: &[&str]) -> Output {
    Command::new(bin_path())
        .args(args)
        .env("USAGE_CHART_HOME", home_path(home))
        .output()
        .expect("run usage-chart command")
}

fn config_file(home: &TempDir) -> std::path::PathBuf {
    home.path().join("config").join("config.toml")
}

#[test]
fn init_creates_config_and_log_paths() {
    let home = TempDir::new().expect("temp home");
    let output = run_cmd(&home, &["init"]);
    assert!(output.status.success());

    assert!(home.path().join("config").exists());
    assert!(home.path().join("logs").exists());
    assert!(config_file(&home).exists());
}

#[test]
fn init_is_idempotent() {
    let home = TempDir::new().expect("temp home");

    assert!(run_cmd(&home, &["init"]).status.success());
    let first = fs::read_to_string(config_file(&home)).expect("read config after first init");

    assert!(run_cmd(&home, &["init"]).status.success());
    let second = fs::read_to_string(config_file(&home)).expect("read config after second init");

    assert_eq!(first, second);
}

#[test]
fn render_monthly_json_lists_three_months() {
    let home = TempDir::new().expect("temp home");
    let output = run_cmd(&home, &["render", "--mode", "monthly"]);
    assert!(output.status.success());

    let parsed: Value = serde_json::from_slice(&output.stdout).expect("valid json output");
    assert_eq!(parsed["data"]["label"], "Monthly Data Usage");
    assert_eq!(
        parsed["data"]["labels"],
        serde_json::json!(["January", "February", "March"])
    );
    assert_eq!(parsed["data"]["values"], serde_json::json!([20.0, 18.0, 25.0]));
    assert_eq!(parsed["data"]["fill"]["kind"], "solid");
    assert_eq!(parsed["options"]["x"]["title"], "Month");
    assert_eq!(parsed["options"]["x"]["max"], 2.0);
    assert_eq!(parsed["options"]["annotations"], serde_json::json!([]));
}

#[test]
fn render_daily_json_carries_billing_day_box() {
    let home = TempDir::new().expect("temp home");
    let output = run_cmd(&home, &["render", "--mode", "daily", "--month", "2"]);
    assert!(output.status.success());

    let parsed: Value = serde_json::from_slice(&output.stdout).expect("valid json output");
    assert_eq!(parsed["view"]["drilldown"], true);
    assert_eq!(parsed["view"]["selected_month"], 2);
    assert_eq!(parsed["data"]["labels"].as_array().expect("labels").len(), 25);
    assert_eq!(parsed["data"]["fill"]["kind"], "hatch");
    assert_eq!(parsed["options"]["x"]["max"], 10.0);
    assert_eq!(parsed["options"]["zoom"]["limits"]["min"], 5.0);

    let annotations = parsed["options"]["annotations"]
        .as_array()
        .expect("annotations");
    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0]["type"], "box");
    assert_eq!(annotations[0]["x_min"], "Jan 1");
    assert_eq!(annotations[0]["border_color"], "#F27173");
}

#[test]
fn render_uses_configured_billing_day() {
    let home = TempDir::new().expect("temp home");
    assert!(run_cmd(&home, &["init"]).status.success());
    fs::write(config_file(&home), "billing_day = 31\n").expect("write config");

    let output = run_cmd(&home, &["render", "--mode", "daily"]);
    assert!(output.status.success());
    let parsed: Value = serde_json::from_slice(&output.stdout).expect("valid json output");
    assert_eq!(parsed["options"]["annotations"][0]["x_min"], "Mar 31");
}

#[test]
fn render_rejects_invalid_config() {
    let home = TempDir::new().expect("temp home");
    assert!(run_cmd(&home, &["init"]).status.success());
    fs::write(config_file(&home), "billing_day = 40\n").expect("write config");

    let output = run_cmd(&home, &["render"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("billing_day must be between 1 and 31"));
}

#[test]
fn render_rejects_unknown_mode() {
    let home = TempDir::new().expect("temp home");
    let output = run_cmd(&home, &["render", "--mode", "weekly"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unsupported mode. Use monthly or daily."));
}

#[test]
fn render_text_formats_usage_units() {
    let home = TempDir::new().expect("temp home");
    let output = run_cmd(&home, &["render", "--mode", "daily", "--format", "text"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Daily Data Usage (Day / Usage (GB))"));
    assert!(stdout.contains("512.00 MB *"));
    assert!(stdout.contains("1.20 GB"));
    assert!(stdout.contains("0.00 MB"));
}

#[test]
fn export_csv_outputs_header_and_rows() {
    let home = TempDir::new().expect("temp home");
    let output = run_cmd(&home, &["export", "--series", "daily", "--format", "csv"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "label,usage_gb");
    assert_eq!(lines[1], "Jan 1,0.5");
    assert_eq!(lines.len(), 26);
}

#[test]
fn export_json_outputs_valid_array() {
    let home = TempDir::new().expect("temp home");
    let output = run_cmd(&home, &["export", "--series", "monthly"]);
    assert!(output.status.success());

    let parsed: Value = serde_json::from_slice(&output.stdout).expect("valid json output");
    let arr = parsed.as_array().expect("json array");
    assert_eq!(arr.len(), 3);
    assert_eq!(arr[0]["month"], "January");
    assert_eq!(arr[2]["usage"], 25.0);
}

#[test]
fn export_rejects_unknown_format() {
    let home = TempDir::new().expect("temp home");
    let output = run_cmd(&home, &["export", "--format", "xml"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unsupported export format"));
}
