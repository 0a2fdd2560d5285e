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

//! # QBench - Query Engine Benchmark Reports
//!
//! QBench compares three query-engine implementations (Web 1.0 scraping,
//! RDFa extraction, SPARQL endpoint) over ten fixed benchmark requests
//! (R1-R10): execution timings from a results file, plus an embedded
//! code-metric dataset (lines of code, branching statements, DOM
//! robustness).
//!
//! ## Quick Start
//!
//! ```
//! use qbench::{read_results_str, GroupedTable, Method, Metric};
//!
//! let data = "\
//! question;method;metric;mean_ms;stdev_ms
//! R1;Web 1.0;server_ms;12.53;1.80
//! R1;RDFa;server_ms;15.20;2.10
//! R1;SPARQL Endpoint;server_ms;2.05;0.40
//! ";
//!
//! let report = read_results_str(data).expect("results parse");
//! let server = report.observations.pivot(Metric::ServerMs).expect("pivot");
//!
//! // Rank engines by mean server time, ascending.
//! let ranked = server.rank_methods(GroupedTable::average).expect("rank");
//! assert_eq!(ranked[0].0, Method::Sparql);
//!
//! // Per-request speedup against the Web 1.0 baseline.
//! let speedup = server.relative_ratio(Method::Web10, Method::Sparql);
//! assert!(speedup.get(qbench::RequestId::R1).unwrap() > 6.0);
//! ```
//!
//! ## Crates
//!
//! - [`qbench_core`] (re-exported here): observation model, aggregation
//!   engine, embedded dataset
//! - [`qbench_csv`] (re-exported here): semicolon results-file ingest
//! - [`chart`]: PNG renderers for the report charts
//!
//! ## Feature flags
//!
//! - `serde`: serde derives on the core model types

pub use qbench_core::{
    builtin, join_on_request_method, linear_fit, reduction_percent, stats, GroupedTable, Join,
    JoinedRow, LinearFit, Method, Metric, MetricError, MetricResult, Observation,
    ObservationSet, RateSeries, RatioTable, RequestId, RobustnessRecord, Severity, Summary,
};

pub use qbench_csv::{
    read_results, read_results_path, read_results_str, read_results_with_config, LoadError,
    LoadReport, LoadResult, ReadConfig, SkippedRow,
};

/// Chart rendering, re-exported whole.
pub mod chart {
    pub use qbench_chart::*;
}
