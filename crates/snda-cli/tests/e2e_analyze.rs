//! E2E tests for `snda analyze` and `snda weekly`.
//!
//! Covers: JSON report schema, multi-dataset comparison, the eigenvector
//! notice, config overrides, weekly segmentation output, and graceful
//! handling of malformed edge lists.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test harness helpers
// ---------------------------------------------------------------------------

// 2024-01-01 00:00:00 UTC, a Monday.
const MON: i64 = 1_704_067_200;
const DAY: i64 = 86_400;

fn snda_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("snda"));
    cmd.current_dir(dir);
    cmd.env("SNDA_LOG", "error");
    cmd.env_remove("FORMAT");
    cmd
}

fn write_csv(dir: &Path, name: &str, rows: &[(&str, &str, i64)]) -> PathBuf {
    let mut text = String::from("Node1,Node2,Timestamp\n");
    for (a, b, ts) in rows {
        text.push_str(&format!("{a},{b},{ts}\n"));
    }
    let path = dir.join(name);
    std::fs::write(&path, text).expect("write csv");
    path
}

/// A hub with four fans, one of whom knows a fifth person.
fn fans_csv(dir: &Path) -> PathBuf {
    write_csv(
        dir,
        "fans.csv",
        &[
            ("idol", "f1", MON),
            ("idol", "f2", MON + DAY),
            ("idol", "f3", MON + 2 * DAY),
            ("idol", "f4", MON + 8 * DAY),
            ("f4", "friend", MON + 9 * DAY),
            ("f1", "idol", MON + 10 * DAY),
        ],
    )
}

fn path_csv(dir: &Path) -> PathBuf {
    write_csv(
        dir,
        "path.csv",
        &[("A", "B", MON), ("B", "C", MON), ("C", "D", MON), ("D", "E", MON)],
    )
}

fn run_json(dir: &Path, args: &[&str]) -> Value {
    let output = snda_cmd(dir)
        .args(args)
        .args(["--format", "json"])
        .output()
        .expect("snda should not crash");
    assert!(
        output.status.success(),
        "snda {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON output")
}

fn metric<'a>(dataset: &'a Value, kind: &str) -> &'a Value {
    dataset["metrics"]
        .as_array()
        .expect("metrics array")
        .iter()
        .find(|m| m["kind"] == kind)
        .unwrap_or_else(|| panic!("metric {kind} missing"))
}

// ---------------------------------------------------------------------------
// snda analyze
// ---------------------------------------------------------------------------

#[test]
fn analyze_json_has_totals_and_four_rankings() {
    let dir = TempDir::new().expect("tempdir");
    let csv = fans_csv(dir.path());

    let report = run_json(
        dir.path(),
        &["analyze", "--dataset", &format!("Fans={}", csv.display())],
    );

    assert_eq!(report["top_k"], 10);
    let dataset = &report["datasets"][0];
    assert_eq!(dataset["name"], "Fans");
    assert_eq!(dataset["summary"]["node_count"], 6);
    // The repeated idol/f1 interaction collapses into one edge.
    assert_eq!(dataset["summary"]["edge_count"], 5);

    let kinds: Vec<&str> = dataset["metrics"]
        .as_array()
        .expect("metrics")
        .iter()
        .map(|m| m["kind"].as_str().expect("kind"))
        .collect();
    assert_eq!(kinds, ["degree", "closeness", "betweenness", "eigenvector"]);

    for kind in kinds {
        let section = metric(dataset, kind);
        assert_eq!(section["status"], "ranked", "{kind}");
        assert_eq!(section["entries"][0]["node"], "idol", "{kind} leader");
    }

    let degree = &metric(dataset, "degree")["entries"][0]["score"];
    assert!((degree.as_f64().expect("score") - 0.8).abs() < 1e-12);
}

#[test]
fn analyze_compares_multiple_datasets_in_order() {
    let dir = TempDir::new().expect("tempdir");
    let fans = fans_csv(dir.path());
    let path = path_csv(dir.path());

    let report = run_json(
        dir.path(),
        &[
            "analyze",
            "--dataset",
            &format!("Fans={}", fans.display()),
            "--dataset",
            &format!("Path={}", path.display()),
        ],
    );

    let datasets = report["datasets"].as_array().expect("datasets");
    assert_eq!(datasets.len(), 2);
    assert_eq!(datasets[0]["name"], "Fans");
    assert_eq!(datasets[1]["name"], "Path");
    assert_eq!(datasets[1]["summary"]["node_count"], 5);
    assert_eq!(
        metric(&datasets[1], "betweenness")["entries"][0]["node"],
        "C"
    );
}

#[test]
fn analyze_top_k_flag_limits_rankings() {
    let dir = TempDir::new().expect("tempdir");
    let csv = path_csv(dir.path());

    let report = run_json(
        dir.path(),
        &["analyze", "--dataset", &csv.display().to_string(), "--top-k", "2"],
    );

    assert_eq!(report["top_k"], 2);
    let dataset = &report["datasets"][0];
    assert_eq!(dataset["name"], "path");
    for kind in ["degree", "closeness", "betweenness", "eigenvector"] {
        let entries = metric(dataset, kind)["entries"].as_array().expect("entries");
        assert_eq!(entries.len(), 2, "{kind}");
    }
}

#[test]
fn analyze_reports_eigenvector_notice_when_iteration_budget_is_exhausted() {
    let dir = TempDir::new().expect("tempdir");
    let csv = path_csv(dir.path());
    std::fs::write(
        dir.path().join("snda.toml"),
        "[eigenvector]\nmax_iterations = 1\ntolerance = 1e-15\n",
    )
    .expect("write config");

    let report = run_json(dir.path(), &["analyze", "--dataset", &csv.display().to_string()]);
    let eigen = metric(&report["datasets"][0], "eigenvector");
    assert_eq!(eigen["status"], "not_computable");
    assert_eq!(
        eigen["notice"],
        "Could not compute eigenvector centrality for this network."
    );
    assert_eq!(eigen["code"], "E2001");
    assert_eq!(metric(&report["datasets"][0], "degree")["status"], "ranked");

    snda_cmd(dir.path())
        .args(["analyze", "--dataset", &csv.display().to_string(), "--format", "pretty"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Eigenvector Centrality: Could not compute eigenvector centrality for this network.",
        ));
}

#[test]
fn analyze_text_output_is_tab_separated() {
    let dir = TempDir::new().expect("tempdir");
    let csv = path_csv(dir.path());

    snda_cmd(dir.path())
        .args(["analyze", "--dataset", &format!("P={}", csv.display()), "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("dataset\tP\nnodes\t5\nedges\t4\n"))
        .stdout(predicate::str::contains("closeness\t1\tC\t0.666667"));
}

#[test]
fn analyze_empty_dataset_succeeds() {
    let dir = TempDir::new().expect("tempdir");
    let csv = write_csv(dir.path(), "empty.csv", &[]);

    let report = run_json(dir.path(), &["analyze", "--dataset", &csv.display().to_string()]);
    let dataset = &report["datasets"][0];
    assert_eq!(dataset["summary"]["node_count"], 0);
    assert_eq!(metric(dataset, "degree")["entries"], Value::Array(Vec::new()));
}

// ---------------------------------------------------------------------------
// Malformed input and config
// ---------------------------------------------------------------------------

#[test]
fn missing_columns_fail_with_code_and_hint() {
    let dir = TempDir::new().expect("tempdir");
    let csv = dir.path().join("bad.csv");
    std::fs::write(&csv, "Source,Target,Timestamp\na,b,1\n").expect("write csv");

    snda_cmd(dir.path())
        .args(["analyze", "--dataset", &csv.display().to_string(), "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E1001"))
        .stderr(predicate::str::contains("Node1, Node2"))
        .stderr(predicate::str::contains("suggestion:"));
}

#[test]
fn bad_timestamp_names_the_record() {
    let dir = TempDir::new().expect("tempdir");
    let csv = dir.path().join("bad.csv");
    std::fs::write(&csv, "Node1,Node2,Timestamp\na,b,1\nb,c,soon\n").expect("write csv");

    let output = snda_cmd(dir.path())
        .args(["weekly", "--dataset", &csv.display().to_string(), "--format", "json"])
        .output()
        .expect("snda should not crash");
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    let json_end = stderr.find("\n}").map_or(stderr.len(), |i| i + 2);
    let err: Value = serde_json::from_str(&stderr[..json_end]).expect("JSON error on stderr");
    assert_eq!(err["error"]["error_code"], "E1001");
    assert!(
        err["error"]["message"]
            .as_str()
            .expect("message")
            .contains("record 2")
    );
}

#[test]
fn invalid_config_fails_with_config_code() {
    let dir = TempDir::new().expect("tempdir");
    let csv = path_csv(dir.path());
    let config = dir.path().join("custom.toml");
    std::fs::write(&config, "top_k = \"many\"\n").expect("write config");

    snda_cmd(dir.path())
        .args([
            "--config",
            &config.display().to_string(),
            "analyze",
            "--dataset",
            &csv.display().to_string(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E1002"));
}

#[test]
fn weekly_ignores_a_broken_config_file() {
    let dir = TempDir::new().expect("tempdir");
    let csv = fans_csv(dir.path());
    std::fs::write(dir.path().join("snda.toml"), "top_k = [\n").expect("write config");

    let out = run_json(dir.path(), &["weekly", "--dataset", &csv.display().to_string()]);
    assert_eq!(out["weeks"].as_array().expect("weeks").len(), 2);

    snda_cmd(dir.path())
        .args(["analyze", "--dataset", &csv.display().to_string()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E1002"));
}

#[test]
fn missing_file_fails_cleanly() {
    let dir = TempDir::new().expect("tempdir");
    snda_cmd(dir.path())
        .args(["analyze", "--dataset", "ghost=nope.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.csv"));
}

// ---------------------------------------------------------------------------
// snda weekly
// ---------------------------------------------------------------------------

#[test]
fn weekly_json_lists_observed_weeks_with_positions() {
    let dir = TempDir::new().expect("tempdir");
    let csv = fans_csv(dir.path());

    let out = run_json(
        dir.path(),
        &["weekly", "--dataset", &format!("Fans={}", csv.display())],
    );

    assert_eq!(out["dataset"], "Fans");
    let weeks = out["weeks"].as_array().expect("weeks");
    assert_eq!(weeks.len(), 2);

    assert_eq!(weeks[0]["label"], "2024-01-01/2024-01-07");
    assert_eq!(weeks[0]["iso_week"], "2024-W01");
    assert_eq!(weeks[0]["interactions"], 3);
    assert_eq!(weeks[0]["nodes"], 4);
    assert_eq!(weeks[0]["edges"], 3);

    assert_eq!(weeks[1]["label"], "2024-01-08/2024-01-14");
    assert_eq!(weeks[1]["interactions"], 3);
    assert_eq!(weeks[1]["nodes"], 4);
    assert_eq!(weeks[1]["edges"], 3);

    let positions = weeks[1]["positions"].as_object().expect("positions");
    assert_eq!(positions.len(), 4);
    assert!(positions.contains_key("friend"));
}

#[test]
fn weekly_spring_layout_is_stable_across_runs() {
    let dir = TempDir::new().expect("tempdir");
    let csv = fans_csv(dir.path()).display().to_string();
    let args = ["weekly", "--dataset", &csv, "--layout", "spring"];

    let first = run_json(dir.path(), &args);
    let second = run_json(dir.path(), &args);
    assert_eq!(first, second);
}

#[test]
fn weekly_text_has_header_and_rows() {
    let dir = TempDir::new().expect("tempdir");
    let csv = fans_csv(dir.path());

    snda_cmd(dir.path())
        .args(["weekly", "--dataset", &csv.display().to_string(), "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("WEEK\tISO\tINTERACTIONS\tNODES\tEDGES\n"))
        .stdout(predicate::str::contains("2024-01-08/2024-01-14\t2024-W02\t3\t4\t3"));
}
