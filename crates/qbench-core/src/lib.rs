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

//! Observation model and aggregation engine for QBench reports.
//!
//! This crate turns raw benchmark and code-metric observations into the
//! derived values the reports display: per-group averages, baseline-relative
//! ratios and reductions, rankings, and cross-metric joins. It renders
//! nothing — charts and summaries live downstream, which keeps every
//! computation here unit-testable without a plotting dependency.
//!
//! # Quick Start
//!
//! ```
//! use qbench_core::{builtin, join_on_request_method, GroupedTable, Metric, Method};
//!
//! let code = builtin::code_metrics();
//! let loc = code.pivot(Metric::Loc).unwrap();
//! let branches = code.pivot(Metric::Branches).unwrap();
//!
//! // Which engine needs the least code on average?
//! let ranked = loc.rank_methods(GroupedTable::average).unwrap();
//! assert_eq!(ranked[0].0, Method::Web10);
//!
//! // Join two differently-shaped tables on (request, method).
//! let join = join_on_request_method(&loc, &branches);
//! assert_eq!(join.coverage().unwrap(), 1.0);
//! ```
//!
//! # Failure semantics
//!
//! Aggregates are computed fresh from immutable observations; there is
//! nothing to retry. Divisions check their divisor and report a named
//! [`MetricError`] condition; degenerate rows are excluded and recorded
//! rather than aborting the batch, and NaN never reaches a caller.

pub mod builtin;
mod error;
mod join;
mod method;
mod metric;
mod observation;
mod request;
pub mod stats;
mod table;

pub use builtin::{RobustnessRecord, Severity};
pub use error::{MetricError, MetricResult};
pub use join::{join_on_request_method, Join, JoinedRow, RateSeries};
pub use method::Method;
pub use metric::Metric;
pub use observation::{Observation, ObservationSet};
pub use request::RequestId;
pub use stats::{linear_fit, reduction_percent, LinearFit, Summary};
pub use table::{GroupedTable, RatioTable};
