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

//! Whole-pipeline tests through the umbrella crate: load, aggregate, join,
//! render.

use qbench::chart::{render_grouped_bar, GroupedBarChart};
use qbench::{
    builtin, join_on_request_method, read_results_str, GroupedTable, Method, Metric, RequestId,
};

fn results_for_all_requests() -> String {
    let mut data = String::from("question;method;metric;mean_ms;stdev_ms\n");
    for (i, request) in RequestId::ALL.iter().enumerate() {
        let scale = (i + 1) as f64;
        data.push_str(&format!("{request};Web 1.0;server_ms;{};2.0\n", scale * 11.0));
        data.push_str(&format!("{request};RDFa;server_ms;{};2.4\n", scale * 13.0));
        data.push_str(&format!(
            "{request};SPARQL Endpoint;server_ms;{};0.5\n",
            scale * 1.7
        ));
    }
    data
}

#[test]
fn test_results_file_to_speedup_chart() {
    let report = read_results_str(&results_for_all_requests()).unwrap();
    let server = report.observations.pivot(Metric::ServerMs).unwrap();

    let speedup = server.relative_ratio(Method::Web10, Method::Sparql);
    assert_eq!(speedup.len(), 10);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("server.png");
    let mut chart = GroupedBarChart::from_table("Server time", "ms", &server);
    chart.log_y = true;
    render_grouped_bar(&path, &chart).unwrap();
    assert!(path.exists());
}

#[test]
fn test_timing_joined_with_embedded_loc() {
    let report = read_results_str(&results_for_all_requests()).unwrap();
    let server = report.observations.pivot(Metric::ServerMs).unwrap();
    let loc = builtin::code_metrics().pivot(Metric::Loc).unwrap();

    let join = join_on_request_method(&server, &loc);
    // Every timing cell finds its LOC partner.
    assert_eq!(join.rows.len(), 30);
    assert_eq!(join.coverage().unwrap(), 1.0);

    let rates = join.unit_rates();
    assert_eq!(rates.rates.len(), 30);
    assert!(rates.excluded.is_empty());

    // R1 Web 1.0: 11.0 ms over 14 lines.
    let rate = rates.get(RequestId::R1, Method::Web10).unwrap();
    assert!((rate - 11.0 / 14.0).abs() < 1e-9);
}

#[test]
fn test_embedded_dataset_rankings_are_stable() {
    let code = builtin::code_metrics();
    let branches = code.pivot(Metric::Branches).unwrap();
    let first = branches.rank_methods(GroupedTable::average).unwrap();
    let second = branches.rank_methods(GroupedTable::average).unwrap();
    assert_eq!(first, second);
    assert_eq!(first[0].0, Method::Sparql);
}
