use assert_fs::prelude::*;
use predicates::prelude::*;

const TICKETS_YAML: &str = r#"- id: ABC-1
  project: ABC
  assignee: alice
  status: Done
  created_at: 2024-01-01T00:00:00Z
  started_at: 2024-01-01T00:00:00Z
  resolved_at: 2024-01-03T00:00:00Z
  story_points: 3
  labels: [bug]
- id: ABC-2
  project: ABC
  assignee: bob
  status: Done
  created_at: 2024-01-02T00:00:00Z
  resolved_at: 2024-01-10T00:00:00Z
  story_points: 5
  labels: ",feature,"
- id: XYZ-1
  project: XYZ
  status: In Progress
  created_at: 2024-01-05T12:00:00Z
  started_at: 2024-01-06T08:00:00Z
"#;

#[test]
fn metrics_command_writes_json_report() {
    let temp = assert_fs::TempDir::new().unwrap();
    let tickets = temp.child("tickets.yaml");
    tickets.write_str(TICKETS_YAML).unwrap();
    let output = temp.child("metrics.json");
    let output_arg = output.path().to_str().unwrap();

    let mut cmd = assert_cmd::cargo_bin_cmd!("flowmetrics");
    cmd.args([
        "metrics",
        "-t",
        tickets.path().to_str().unwrap(),
        "-o",
        output_arg,
        "-s",
        "2024-01-01",
        "-e",
        "2024-01-10",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Metrics Report"))
        .stdout(predicate::str::contains(format!("Metrics written to {output_arg}")));

    output.assert(predicate::path::exists());
    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(output.path()).unwrap()).unwrap();
    assert_eq!(report["summary"]["total_tickets"], 3);
    assert_eq!(report["summary"]["tickets_in_progress"], 1);
    assert_eq!(report["throughput"].as_array().unwrap().len(), 10);
    assert_eq!(report["cumulative_flow"].as_array().unwrap().len(), 10);
    assert_eq!(report["sla"]["sla_compliance"], 50.0);
    assert_eq!(report["sla"]["average_resolution_time"], 120.0);
    assert_eq!(report["cycle_time"]["points"].as_array().unwrap().len(), 2);
    assert_eq!(report["productivity_per_project"].as_array().unwrap().len(), 2);
}

#[test]
fn metrics_command_filters_and_writes_yaml() {
    let temp = assert_fs::TempDir::new().unwrap();
    let tickets = temp.child("tickets.yaml");
    tickets.write_str(TICKETS_YAML).unwrap();
    let output = temp.child("metrics.yaml");

    let mut cmd = assert_cmd::cargo_bin_cmd!("flowmetrics");
    cmd.args([
        "metrics",
        "-t",
        tickets.path().to_str().unwrap(),
        "-o",
        output.path().to_str().unwrap(),
        "-s",
        "2024-01-01",
        "-e",
        "2024-01-31",
        "-g",
        "week",
        "--label",
        "bug",
    ]);

    cmd.assert().success();

    output.assert(predicate::str::contains("granularity: week"));
    output.assert(predicate::str::contains("total_tickets: 1"));
    output.assert(predicate::str::contains("2024-01-01"));
    output.assert(predicate::str::contains("2024-01-29"));
}

#[test]
fn metrics_command_applies_config_smoothing() {
    let temp = assert_fs::TempDir::new().unwrap();
    let tickets = temp.child("tickets.yaml");
    tickets.write_str(TICKETS_YAML).unwrap();
    let config = temp.child("config.yaml");
    config
        .write_str("sla_window_days: 10\nsmoothing:\n  type: sma\n  period: 3\n")
        .unwrap();
    let output = temp.child("metrics.json");

    let mut cmd = assert_cmd::cargo_bin_cmd!("flowmetrics");
    cmd.args([
        "metrics",
        "-t",
        tickets.path().to_str().unwrap(),
        "-o",
        output.path().to_str().unwrap(),
        "-c",
        config.path().to_str().unwrap(),
        "-s",
        "2024-01-01",
        "-e",
        "2024-01-10",
    ]);

    cmd.assert().success();

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(output.path()).unwrap()).unwrap();
    assert_eq!(report["sla"]["sla_compliance"], 100.0);
    assert_eq!(report["throughput_overlay"].as_array().unwrap().len(), 10);
}

#[test]
fn metrics_command_rejects_inverted_range() {
    let temp = assert_fs::TempDir::new().unwrap();
    let tickets = temp.child("tickets.yaml");
    tickets.write_str(TICKETS_YAML).unwrap();
    let output = temp.child("metrics.json");

    let mut cmd = assert_cmd::cargo_bin_cmd!("flowmetrics");
    cmd.args([
        "metrics",
        "-t",
        tickets.path().to_str().unwrap(),
        "-o",
        output.path().to_str().unwrap(),
        "-s",
        "2024-02-01",
        "-e",
        "2024-01-01",
    ]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid range"));
    output.assert(predicate::path::missing());
}

#[test]
fn metrics_command_reports_missing_ticket_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    let output = temp.child("metrics.json");

    let mut cmd = assert_cmd::cargo_bin_cmd!("flowmetrics");
    cmd.args([
        "metrics",
        "-t",
        temp.child("missing.yaml").path().to_str().unwrap(),
        "-o",
        output.path().to_str().unwrap(),
    ]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to read ticket file"));
}
