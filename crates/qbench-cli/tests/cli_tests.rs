// Dweve QBench - Query Engine Benchmark Reports
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! End-to-end tests for the qbench binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn qbench() -> Command {
    Command::cargo_bin("qbench").expect("binary builds")
}

/// A small but complete results file: all three metrics, three requests.
fn write_results(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("benchmark_results.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "question;method;metric;mean_ms;stdev_ms").unwrap();
    for (request, web10, rdfa, sparql) in
        [("R1", 12.5, 15.2, 2.0), ("R2", 8.1, 9.4, 1.5), ("R9", 210.0, 180.0, 30.0)]
    {
        for metric in ["server_ms", "client_ms", "render_ms"] {
            writeln!(file, "{request};Web 1.0;{metric};{web10};1.2").unwrap();
            writeln!(file, "{request};RDFa;{metric};{rdfa};1.4").unwrap();
            writeln!(file, "{request};SPARQL Endpoint;{metric};{sparql};0.3").unwrap();
        }
    }
    path
}

#[test]
fn test_help_lists_reports() {
    qbench()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("benchmarks"))
        .stdout(predicate::str::contains("robustness"))
        .stdout(predicate::str::contains("tradeoff"));
}

#[test]
fn test_loc_report_renders_charts_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    qbench()
        .args(["loc", "--out-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Most compact"))
        .stdout(predicate::str::contains("Web 1.0"));
    assert!(dir.path().join("loc_per_request_comparison.png").exists());
    assert!(dir.path().join("average_loc_per_engine.png").exists());
    assert!(dir.path().join("stacked_loc_comparison.png").exists());
}

#[test]
fn test_loc_report_json_mode() {
    let dir = tempfile::tempdir().unwrap();
    let output = qbench()
        .args(["loc", "--json", "--no-charts", "--out-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let summary: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(summary["report"], "loc");
    assert_eq!(summary["most_compact"], "Web 1.0");
    // --no-charts leaves the directory untouched.
    assert!(!dir.path().join("loc_per_request_comparison.png").exists());
}

#[test]
fn test_benchmarks_report_from_results_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_results(dir.path());
    qbench()
        .args(["benchmarks", "--input"])
        .arg(&input)
        .arg("--out-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Fastest: SPARQL Endpoint"))
        .stdout(predicate::str::contains("Slowest requests"));
    assert!(dir.path().join("benchmark_server_time.png").exists());
    assert!(dir.path().join("benchmark_heatmap.png").exists());
    assert!(dir.path().join("benchmark_speedup.png").exists());
}

#[test]
fn test_missing_results_file_fails_with_context() {
    qbench()
        .args(["benchmarks", "--input", "/no/such/file.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open"));
}

#[test]
fn test_malformed_rows_are_reported_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "question;method;metric;mean_ms;stdev_ms").unwrap();
    writeln!(file, "R1;Web 1.0;server_ms;12.5;1.2").unwrap();
    writeln!(file, "R1;Web 1.0;client_ms;40.0;2.0").unwrap();
    writeln!(file, "R1;Web 1.0;render_ms;3.0;0.2").unwrap();
    writeln!(file, "R2;Web 1.0;server_ms;oops;1.0").unwrap();
    file.sync_all().unwrap();

    qbench()
        .args(["benchmarks", "--no-charts", "--input"])
        .arg(&path)
        .arg("--out-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1 malformed row(s) skipped"));
}

#[test]
fn test_tradeoff_reports_join_coverage() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_results(dir.path());
    qbench()
        .args(["tradeoff", "--input"])
        .arg(&input)
        .arg("--out-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Join coverage: 100%"))
        .stdout(predicate::str::contains("ms/LOC"));
    assert!(dir.path().join("loc_vs_performance_tradeoff.png").exists());
    assert!(dir.path().join("code_efficiency_metric.png").exists());
}

#[test]
fn test_complexity_report_embedded_data() {
    let dir = tempfile::tempdir().unwrap();
    qbench()
        .args(["complexity", "--out-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Ranking"))
        .stdout(predicate::str::contains("SPARQL"));
    assert!(dir.path().join("complexity_heatmap.png").exists());
    assert!(dir.path().join("complexity_distribution.png").exists());
    assert!(dir.path().join("complexity_reduction.png").exists());
}

#[test]
fn test_robustness_report_embedded_data() {
    let dir = tempfile::tempdir().unwrap();
    qbench()
        .args(["robustness", "--out-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("breaks if"))
        .stdout(predicate::str::contains("CRITICAL"));
    assert!(dir.path().join("robustness_scores.png").exists());
    assert!(dir.path().join("robustness_severity.png").exists());
}

#[test]
fn test_completion_generates_script() {
    qbench()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("qbench"));
}
