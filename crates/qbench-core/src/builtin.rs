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

//! The embedded code-metric dataset.
//!
//! Lines-of-code counts, branching-statement counts, and the DOM robustness
//! analysis were collected once from the three engine implementations and
//! ship with the crate; every report reads them from this single store
//! instead of carrying its own copy. Timing data is not embedded — it comes
//! from a benchmark results file at run time.

use crate::{Method, Metric, Observation, ObservationSet, RequestId};
use std::fmt;

/// How badly a request implementation breaks when the page it scrapes
/// changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    /// Unlikely to break.
    Low,
    /// Breaks on minor format drift.
    Medium,
    /// Breaks on realistic page edits.
    High,
    /// Breaks on almost any page edit.
    Critical,
}

impl Severity {
    /// The uppercase label used in the source analysis.
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the DOM robustness analysis.
///
/// The score is 0 (extremely fragile) to 10 (fully semantic, no structural
/// coupling). The dependency lists name the exact couplings found in the
/// implementation; `breaks_if` describes the page change that defeats it.
/// Only the two scraping engines were analyzed — the SPARQL endpoint reads
/// no DOM at all.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RobustnessRecord {
    /// The benchmark request.
    pub request: RequestId,
    /// The engine analyzed.
    pub method: Method,
    /// Robustness score, 0-10.
    pub score: f64,
    /// Risk classification.
    pub severity: Severity,
    /// DOM-structure couplings (element positions, column indices, order).
    pub structural_deps: &'static [&'static str],
    /// Hardcoded-text couplings (labels, date and score formats).
    pub text_deps: &'static [&'static str],
    /// The page change that breaks the implementation.
    pub breaks_if: &'static str,
}

const LOC: [(RequestId, [f64; 3]); 10] = [
    (RequestId::R1, [14.0, 22.0, 23.0]),
    (RequestId::R2, [17.0, 17.0, 18.0]),
    (RequestId::R3, [17.0, 17.0, 20.0]),
    (RequestId::R4, [19.0, 28.0, 22.0]),
    (RequestId::R5, [31.0, 30.0, 25.0]),
    (RequestId::R6, [23.0, 28.0, 33.0]),
    (RequestId::R7, [12.0, 13.0, 26.0]),
    (RequestId::R8, [19.0, 24.0, 30.0]),
    (RequestId::R9, [58.0, 55.0, 72.0]),
    (RequestId::R10, [63.0, 69.0, 61.0]),
];

const BRANCHES: [(RequestId, [f64; 3]); 10] = [
    (RequestId::R1, [1.0, 3.0, 1.0]),
    (RequestId::R2, [1.0, 2.0, 1.0]),
    (RequestId::R3, [1.0, 2.0, 1.0]),
    (RequestId::R4, [5.0, 3.0, 1.0]),
    (RequestId::R5, [4.0, 4.0, 1.0]),
    (RequestId::R6, [3.0, 3.0, 1.0]),
    (RequestId::R7, [2.0, 2.0, 1.0]),
    (RequestId::R8, [3.0, 2.0, 1.0]),
    (RequestId::R9, [5.0, 4.0, 3.0]),
    (RequestId::R10, [9.0, 8.0, 5.0]),
];

const ROBUSTNESS: [RobustnessRecord; 20] = [
    RobustnessRecord {
        request: RequestId::R1,
        method: Method::Web10,
        score: 2.0,
        severity: Severity::High,
        structural_deps: &["td[1]", "first row position", "table structure"],
        text_deps: &[],
        breaks_if: "Add/remove table column, reorder rows",
    },
    RobustnessRecord {
        request: RequestId::R1,
        method: Method::Rdfa,
        score: 8.0,
        severity: Severity::Low,
        structural_deps: &[],
        text_deps: &[],
        breaks_if: "Remove RDFa properties (unlikely)",
    },
    RobustnessRecord {
        request: RequestId::R2,
        method: Method::Web10,
        score: 1.0,
        severity: Severity::Critical,
        structural_deps: &["stat-box div", "div[0]", "p[0]", "strong tag"],
        text_deps: &["Specific text format with strong tag"],
        breaks_if: "Change div order, modify text format",
    },
    RobustnessRecord {
        request: RequestId::R2,
        method: Method::Rdfa,
        score: 3.0,
        severity: Severity::High,
        structural_deps: &["stat-box class", "first box"],
        text_deps: &["\"Nombre total de matchs\" string"],
        breaks_if: "Change French text, modify class structure",
    },
    RobustnessRecord {
        request: RequestId::R3,
        method: Method::Web10,
        score: 1.0,
        severity: Severity::Critical,
        structural_deps: &["stat-box div", "div[0]", "p[1]", "strong tag"],
        text_deps: &["Specific text format with strong tag"],
        breaks_if: "Change paragraph order, modify text format",
    },
    RobustnessRecord {
        request: RequestId::R3,
        method: Method::Rdfa,
        score: 3.0,
        severity: Severity::High,
        structural_deps: &["stat-box class", "first box"],
        text_deps: &["\"Nombre total de buts\" string"],
        breaks_if: "Change French text, modify class structure",
    },
    RobustnessRecord {
        request: RequestId::R4,
        method: Method::Web10,
        score: 1.0,
        severity: Severity::Critical,
        structural_deps: &["stat-box div", "div[1]", "p[0] and p[1]", "strong tags"],
        text_deps: &["Colon separator", "specific paragraph structure"],
        breaks_if: "Reorder divs, change paragraph indices",
    },
    RobustnessRecord {
        request: RequestId::R4,
        method: Method::Rdfa,
        score: 8.0,
        severity: Severity::Low,
        structural_deps: &[],
        text_deps: &[],
        breaks_if: "Remove RDFa properties",
    },
    RobustnessRecord {
        request: RequestId::R5,
        method: Method::Web10,
        score: 2.0,
        severity: Severity::High,
        structural_deps: &["table", "td[1] for name", "td[7] for goals", "rows[1:]"],
        text_deps: &[],
        breaks_if: "Add/remove columns, reorder columns",
    },
    RobustnessRecord {
        request: RequestId::R5,
        method: Method::Rdfa,
        score: 8.0,
        severity: Severity::Low,
        structural_deps: &[],
        text_deps: &[],
        breaks_if: "Remove RDFa properties",
    },
    RobustnessRecord {
        request: RequestId::R6,
        method: Method::Web10,
        score: 2.0,
        severity: Severity::High,
        structural_deps: &["table rows", "td[0,1,2,3]", "score class"],
        text_deps: &["\"/11/2008\" date format"],
        breaks_if: "Change column order, modify date format",
    },
    RobustnessRecord {
        request: RequestId::R6,
        method: Method::Rdfa,
        score: 7.0,
        severity: Severity::Medium,
        structural_deps: &[],
        text_deps: &["\"/11/2008\" date format"],
        breaks_if: "Change date format (minor risk)",
    },
    RobustnessRecord {
        request: RequestId::R7,
        method: Method::Web10,
        score: 3.0,
        severity: Severity::High,
        structural_deps: &["specific filename", "div structure"],
        text_deps: &["\"Domicile\" and \"Victoire\" strings"],
        breaks_if: "Change French text, modify div structure",
    },
    RobustnessRecord {
        request: RequestId::R7,
        method: Method::Rdfa,
        score: 3.0,
        severity: Severity::High,
        structural_deps: &["div structure"],
        text_deps: &["\"Domicile\" and \"Victoire\" strings"],
        breaks_if: "Change French text (same as Web 1.0)",
    },
    RobustnessRecord {
        request: RequestId::R8,
        method: Method::Web10,
        score: 3.0,
        severity: Severity::High,
        structural_deps: &["h1 tag", "specific filenames", "div structure"],
        text_deps: &["\"Extérieur\" and \"Victoire\" strings"],
        breaks_if: "Change h1 location, modify text",
    },
    RobustnessRecord {
        request: RequestId::R8,
        method: Method::Rdfa,
        score: 5.0,
        severity: Severity::Medium,
        structural_deps: &["div structure"],
        text_deps: &["\"Extérieur\" and \"Victoire\" strings"],
        breaks_if: "Change French text (but has semantic name)",
    },
    RobustnessRecord {
        request: RequestId::R9,
        method: Method::Web10,
        score: 2.0,
        severity: Severity::High,
        structural_deps: &["rows[:6] slice", "td[1]", "td[2] and td[3]", "score class"],
        text_deps: &["Score format \"x-y\""],
        breaks_if: "Reorder rows, change column indices",
    },
    RobustnessRecord {
        request: RequestId::R9,
        method: Method::Rdfa,
        score: 7.0,
        severity: Severity::Medium,
        structural_deps: &["rows[:6] slice order"],
        text_deps: &["Score format \"x-y\""],
        breaks_if: "Change row order (minor), score format",
    },
    RobustnessRecord {
        request: RequestId::R10,
        method: Method::Web10,
        score: 2.0,
        severity: Severity::High,
        structural_deps: &["rows[0] and rows[2]", "td[1]", "td[0,1,2,3]", "score class"],
        text_deps: &["Score format \"x-y\""],
        breaks_if: "Reorder ranking, change columns",
    },
    RobustnessRecord {
        request: RequestId::R10,
        method: Method::Rdfa,
        score: 7.0,
        severity: Severity::Medium,
        structural_deps: &["rows[0] and rows[2] order"],
        text_deps: &["Score format \"x-y\""],
        breaks_if: "Change ranking order (minor risk)",
    },
];

/// The DOM robustness analysis rows.
pub fn robustness_records() -> &'static [RobustnessRecord] {
    &ROBUSTNESS
}

/// The embedded code metrics as one observation store: lines of code and
/// branching statements for all three engines, plus robustness scores and
/// dependency counts for the two scraping engines.
///
/// # Examples
///
/// ```
/// use qbench_core::{builtin, Metric, Method, RequestId};
///
/// let set = builtin::code_metrics();
/// let loc = set.pivot(Metric::Loc).unwrap();
/// assert_eq!(loc.get(RequestId::R1, Method::Web10), Some(14.0));
/// assert_eq!(loc.get(RequestId::R9, Method::Sparql), Some(72.0));
/// ```
pub fn code_metrics() -> ObservationSet {
    let mut set = ObservationSet::new();
    for (rows, metric) in [(&LOC, Metric::Loc), (&BRANCHES, Metric::Branches)] {
        for &(request, values) in rows.iter() {
            for (method, value) in Method::ALL.into_iter().zip(values) {
                // Keys are unique by construction: one cell per
                // (request, method) in each source table.
                set.insert_unchecked(Observation::new(request, method, metric, value));
            }
        }
    }
    for record in &ROBUSTNESS {
        set.insert_unchecked(Observation::new(
            record.request,
            record.method,
            Metric::Robustness,
            record.score,
        ));
        set.insert_unchecked(Observation::new(
            record.request,
            record.method,
            Metric::StructuralDeps,
            record.structural_deps.len() as f64,
        ));
        set.insert_unchecked(Observation::new(
            record.request,
            record.method,
            Metric::TextDeps,
            record.text_deps.len() as f64,
        ));
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_is_duplicate_free() {
        // Rebuild through the checked path to prove key uniqueness.
        let mut checked = ObservationSet::new();
        for observation in code_metrics().iter() {
            checked.insert(observation.clone()).unwrap();
        }
    }

    #[test]
    fn test_every_request_has_loc_for_every_method() {
        let set = code_metrics();
        let loc = set.pivot(Metric::Loc).unwrap();
        for request in RequestId::ALL {
            for method in Method::ALL {
                assert!(loc.get(request, method).is_some(), "{request}/{method}");
            }
        }
    }

    #[test]
    fn test_robustness_covers_scraping_engines_only() {
        let set = code_metrics();
        let robustness = set.pivot(Metric::Robustness).unwrap();
        assert_eq!(robustness.methods(), &[Method::Web10, Method::Rdfa]);
        assert_eq!(robustness.cell_count(), 20);
    }

    #[test]
    fn test_known_values() {
        let set = code_metrics();
        let branches = set.pivot(Metric::Branches).unwrap();
        assert_eq!(branches.get(RequestId::R10, Method::Web10), Some(9.0));
        assert_eq!(branches.get(RequestId::R10, Method::Sparql), Some(5.0));

        let robustness = set.pivot(Metric::Robustness).unwrap();
        assert_eq!(robustness.get(RequestId::R2, Method::Web10), Some(1.0));
        assert_eq!(robustness.get(RequestId::R1, Method::Rdfa), Some(8.0));
    }

    #[test]
    fn test_dependency_counts_match_lists() {
        let set = code_metrics();
        let structural = set.pivot(Metric::StructuralDeps).unwrap();
        // R2 Web 1.0 lists four structural couplings.
        assert_eq!(structural.get(RequestId::R2, Method::Web10), Some(4.0));
        // RDFa R1 has none.
        assert_eq!(structural.get(RequestId::R1, Method::Rdfa), Some(0.0));
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::High < Severity::Critical);
        assert_eq!(Severity::Critical.to_string(), "CRITICAL");
    }
}
