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

//! Benchmark results ingest for QBench.
//!
//! Reads the semicolon-delimited `benchmark_results.csv` convention into a
//! [`qbench_core::ObservationSet`]. Loading is tolerant of individual bad
//! rows — each one is skipped and accounted for in the [`LoadReport`] — but
//! a file that yields no usable row at all is a hard error.
//!
//! # Quick Start
//!
//! ```
//! use qbench_core::{Metric, Method, RequestId};
//! use qbench_csv::read_results_str;
//!
//! let data = "\
//! question;method;metric;mean_ms;stdev_ms
//! R1;Web 1.0;server_ms;12.53;1.80
//! R1;SPARQL Endpoint;server_ms;2.05;0.40
//! ";
//!
//! let report = read_results_str(data).unwrap();
//! assert_eq!(report.row_count(), 2);
//!
//! let server = report.observations.pivot(Metric::ServerMs).unwrap();
//! assert_eq!(server.get(RequestId::R1, Method::Web10), Some(12.53));
//! ```

mod error;
mod read;

pub use error::{LoadError, LoadResult};
pub use read::{
    read_results, read_results_path, read_results_str, read_results_with_config, LoadReport,
    ReadConfig, SkippedRow, DEFAULT_MAX_ROWS,
};
