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

//! Integration tests for qbench-csv.

use qbench_core::{GroupedTable, Metric, Method, RequestId};
use qbench_csv::{read_results_path, read_results_str, LoadError};
use std::io::Write;

/// A results file covering all ten requests for one metric.
fn full_server_results() -> String {
    let mut data = String::from("question;method;metric;mean_ms;stdev_ms\n");
    for (i, request) in RequestId::ALL.iter().enumerate() {
        let base = (i + 1) as f64;
        data.push_str(&format!("{request};Web 1.0;server_ms;{:.2};0.50\n", base * 10.0));
        data.push_str(&format!("{request};RDFa;server_ms;{:.2};0.60\n", base * 12.0));
        data.push_str(&format!(
            "{request};SPARQL Endpoint;server_ms;{:.2};0.10\n",
            base * 1.5
        ));
    }
    data
}

#[test]
fn test_load_and_aggregate_full_file() {
    let report = read_results_str(&full_server_results()).unwrap();
    assert_eq!(report.row_count(), 30);
    assert_eq!(report.skipped_count(), 0);

    let server = report.observations.pivot(Metric::ServerMs).unwrap();
    assert_eq!(server.requests().len(), 10);

    // SPARQL is uniformly fastest, so it ranks first.
    let ranked = server.rank_methods(GroupedTable::average).unwrap();
    assert_eq!(ranked[0].0, Method::Sparql);
    assert_eq!(ranked[2].0, Method::Rdfa);

    // Speedup is constant by construction: 10.0 / 1.5.
    let speedup = server.relative_ratio(Method::Web10, Method::Sparql);
    for (_, ratio) in speedup.iter() {
        assert!((ratio - 10.0 / 1.5).abs() < 1e-9);
    }
}

#[test]
fn test_stdev_pivot_from_file() {
    let report = read_results_str(&full_server_results()).unwrap();
    let spread = report.observations.pivot_stdev(Metric::ServerMs).unwrap();
    assert_eq!(spread.get(RequestId::R4, Method::Sparql), Some(0.10));
}

#[test]
fn test_read_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(full_server_results().as_bytes()).unwrap();

    let report = read_results_path(file.path()).unwrap();
    assert_eq!(report.row_count(), 30);
}

#[test]
fn test_missing_path_reports_open_error() {
    match read_results_path("/definitely/not/here.csv") {
        Err(LoadError::Open { path, .. }) => {
            assert!(path.to_string_lossy().contains("not"));
        }
        other => panic!("expected Open error, got {other:?}"),
    }
}

#[test]
fn test_comma_file_with_semicolon_config_fails_loudly() {
    // A comma-delimited file parsed as semicolon yields single-field rows,
    // all skipped: a hard Empty failure rather than a quiet zero-row chart.
    let data = "question,method,metric,mean_ms,stdev_ms\nR1,Web 1.0,server_ms,1.0,0.1\n";
    assert!(matches!(
        read_results_str(data),
        Err(LoadError::Empty { skipped: 1 })
    ));
}
