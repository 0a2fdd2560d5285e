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

//! Error types for the aggregation engine.
//!
//! Every division performed by the engine checks its divisor and reports a
//! named condition instead of letting infinity or NaN reach a chart or a
//! summary. The conditions form a closed taxonomy:
//!
//! - [`MetricError::UnknownMetric`] — a pivot filtered to zero observations
//! - [`MetricError::NoData`] — an aggregate over an empty slice
//! - [`MetricError::DivisionByZero`] — a ratio or per-unit metric with a
//!   zero divisor
//! - [`MetricError::UndefinedBaseline`] — a reduction percentage against a
//!   zero baseline
//! - [`MetricError::MalformedRow`] — a source row that cannot be used,
//!   including duplicate `(request, method, metric)` keys

use crate::Metric;
use thiserror::Error;

fn metric_names(metrics: &[Metric]) -> String {
    metrics
        .iter()
        .map(|m| m.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// An error produced by the aggregation engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricError {
    /// A metric filter matched zero observations.
    ///
    /// Carries the metrics that *are* present so the caller can report a
    /// diagnosable failure; a dataset with zero usable rows for a requested
    /// metric cannot proceed.
    #[error("no observations for metric '{metric}' (available: {})", metric_names(.available))]
    UnknownMetric {
        /// The metric that was requested.
        metric: Metric,
        /// Metrics actually present in the observation set.
        available: Vec<Metric>,
    },

    /// An aggregate was requested over zero data points.
    #[error("no data: {context}")]
    NoData {
        /// What was being aggregated when the slice turned out empty.
        context: String,
    },

    /// A divisor was zero.
    ///
    /// Ratio computations record this per request and continue with the
    /// remaining requests; scalar computations return it directly.
    #[error("division by zero: {context}")]
    DivisionByZero {
        /// What was being divided.
        context: String,
    },

    /// A reduction percentage was requested against a zero baseline.
    ///
    /// The fallback (commonly 0%) is a caller policy, never applied here.
    #[error("reduction percent undefined: baseline value is zero")]
    UndefinedBaseline,

    /// A source row is unusable: missing field, failed numeric parse, an
    /// unknown request/method/metric spelling, or a duplicate key.
    #[error("malformed row{}: {message}", .line.map(|l| format!(" at line {l}")).unwrap_or_default())]
    MalformedRow {
        /// Source line number (1-based), when the row came from a file.
        line: Option<usize>,
        /// What made the row unusable.
        message: String,
    },
}

impl MetricError {
    /// A [`MetricError::NoData`] with context.
    pub fn no_data(context: impl Into<String>) -> Self {
        Self::NoData {
            context: context.into(),
        }
    }

    /// A [`MetricError::DivisionByZero`] with context.
    pub fn division_by_zero(context: impl Into<String>) -> Self {
        Self::DivisionByZero {
            context: context.into(),
        }
    }

    /// A [`MetricError::MalformedRow`] without a source line.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedRow {
            line: None,
            message: message.into(),
        }
    }

    /// A [`MetricError::MalformedRow`] anchored to a source line.
    pub fn malformed_at(message: impl Into<String>, line: usize) -> Self {
        Self::MalformedRow {
            line: Some(line),
            message: message.into(),
        }
    }
}

/// Result type for engine operations.
pub type MetricResult<T> = Result<T, MetricError>;
