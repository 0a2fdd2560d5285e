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

//! The compared query-engine implementations.

use crate::{MetricError, MetricResult};
use std::fmt;
use std::str::FromStr;

/// One of the three engines under comparison.
///
/// Declaration order is the comparison order: it fixes column order in
/// pivoted tables, bar order in charts, and tie-breaking in rankings, so
/// every run renders identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Method {
    /// Screen-scraping over plain HTML pages.
    Web10,
    /// RDFa annotations extracted from the same pages.
    Rdfa,
    /// A SPARQL endpoint queried directly.
    Sparql,
}

impl Method {
    /// All engines, in comparison order.
    pub const ALL: [Method; 3] = [Self::Web10, Self::Rdfa, Self::Sparql];

    /// The full display label, as recorded in the results file.
    pub fn label(self) -> &'static str {
        match self {
            Self::Web10 => "Web 1.0",
            Self::Rdfa => "RDFa",
            Self::Sparql => "SPARQL Endpoint",
        }
    }

    /// A compact label for dense chart legends.
    pub fn short_label(self) -> &'static str {
        match self {
            Self::Web10 => "Web 1.0",
            Self::Rdfa => "RDFa",
            Self::Sparql => "SPARQL",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Method {
    type Err = MetricError;

    /// Parses either the full or the compact spelling; the code-metric
    /// sources abbreviate "SPARQL Endpoint" to "SPARQL".
    fn from_str(s: &str) -> MetricResult<Self> {
        match s.trim() {
            "Web 1.0" => Ok(Self::Web10),
            "RDFa" => Ok(Self::Rdfa),
            "SPARQL Endpoint" | "SPARQL" => Ok(Self::Sparql),
            other => Err(MetricError::malformed(format!(
                "unknown method '{other}' (expected Web 1.0, RDFa, or SPARQL Endpoint)"
            ))),
        }
    }
}
