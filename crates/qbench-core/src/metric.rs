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

//! The recorded metric series.

use crate::{MetricError, MetricResult};
use std::fmt;
use std::str::FromStr;

/// A metric series recorded per `(request, method)` pair.
///
/// The wire names (`server_ms`, `client_ms`, ...) match the `metric` column
/// of the benchmark results file; the code metrics come from the embedded
/// dataset ([`crate::builtin`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Metric {
    /// Server-side processing time, milliseconds.
    ServerMs,
    /// Client round-trip time, milliseconds.
    ClientMs,
    /// Browser rendering time, milliseconds.
    RenderMs,
    /// Lines of code of the request implementation.
    Loc,
    /// Branching statements in the request implementation.
    Branches,
    /// DOM robustness score, 0 (fragile) to 10 (robust). Recorded in the
    /// source data, treated as an opaque numeric here.
    Robustness,
    /// Count of structural DOM dependencies.
    StructuralDeps,
    /// Count of hardcoded-text dependencies.
    TextDeps,
}

impl Metric {
    /// Every known metric, in display order.
    pub const ALL: [Metric; 8] = [
        Self::ServerMs,
        Self::ClientMs,
        Self::RenderMs,
        Self::Loc,
        Self::Branches,
        Self::Robustness,
        Self::StructuralDeps,
        Self::TextDeps,
    ];

    /// The wire name used in source files.
    pub fn name(self) -> &'static str {
        match self {
            Self::ServerMs => "server_ms",
            Self::ClientMs => "client_ms",
            Self::RenderMs => "render_ms",
            Self::Loc => "loc",
            Self::Branches => "branches",
            Self::Robustness => "robustness",
            Self::StructuralDeps => "structural_deps",
            Self::TextDeps => "text_deps",
        }
    }

    /// A human-readable description for chart axes and summaries.
    pub fn description(self) -> &'static str {
        match self {
            Self::ServerMs => "Server processing time (ms)",
            Self::ClientMs => "Client round-trip time (ms)",
            Self::RenderMs => "Browser rendering time (ms)",
            Self::Loc => "Lines of code",
            Self::Branches => "Branching statements",
            Self::Robustness => "Robustness score (0-10)",
            Self::StructuralDeps => "Structural dependencies",
            Self::TextDeps => "Text dependencies",
        }
    }

    /// Whether the series is a timing in milliseconds.
    pub fn is_timing(self) -> bool {
        matches!(self, Self::ServerMs | Self::ClientMs | Self::RenderMs)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = MetricError;

    fn from_str(s: &str) -> MetricResult<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.name() == s.trim())
            .ok_or_else(|| MetricError::malformed(format!("unknown metric name '{s}'")))
    }
}
