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

//! Joining two differently-shaped metric tables on `(request, method)`.
//!
//! The trade-off report joins the timing table against the lines-of-code
//! table to derive a time-per-line efficiency series; the join itself is
//! metric-agnostic.

use crate::{GroupedTable, Method, Metric, MetricError, MetricResult, RequestId};

/// One matched `(request, method)` pair with both metric values.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JoinedRow {
    /// The benchmark request.
    pub request: RequestId,
    /// The engine.
    pub method: Method,
    /// Value from the left table.
    pub left: f64,
    /// Value from the right table.
    pub right: f64,
}

/// The result of an inner join of two grouped tables.
///
/// Rows are emitted in canonical request order, then left-table column
/// order. Cells present in only one table are dropped from `rows` but
/// counted, so callers can report completeness.
#[derive(Debug, Clone)]
pub struct Join {
    /// Metric of the left table.
    pub left_metric: Metric,
    /// Metric of the right table.
    pub right_metric: Metric,
    /// The matched rows.
    pub rows: Vec<JoinedRow>,
    left_cells: usize,
    right_cells: usize,
}

/// Inner-join two pivoted tables on their `(request, method)` keys.
///
/// # Examples
///
/// ```
/// use qbench_core::{join_on_request_method, GroupedTable, Method, Metric, RequestId};
///
/// let mut time = GroupedTable::new(Metric::ServerMs);
/// time.insert(RequestId::R1, Method::Web10, 5.0).unwrap();
/// let mut loc = GroupedTable::new(Metric::Loc);
/// loc.insert(RequestId::R1, Method::Web10, 14.0).unwrap();
/// loc.insert(RequestId::R2, Method::Web10, 17.0).unwrap();
///
/// let join = join_on_request_method(&time, &loc);
/// assert_eq!(join.rows.len(), 1);
/// assert_eq!(join.coverage().unwrap(), 1.0);
/// assert_eq!(join.dropped_right(), 1);
/// ```
pub fn join_on_request_method(left: &GroupedTable, right: &GroupedTable) -> Join {
    let mut rows = Vec::new();
    for request in left.requests() {
        for &method in left.methods() {
            let Some(l) = left.get(request, method) else {
                continue;
            };
            let Some(r) = right.get(request, method) else {
                continue;
            };
            rows.push(JoinedRow {
                request,
                method,
                left: l,
                right: r,
            });
        }
    }
    Join {
        left_metric: left.metric(),
        right_metric: right.metric(),
        rows,
        left_cells: left.cell_count(),
        right_cells: right.cell_count(),
    }
}

impl Join {
    /// Fraction of left-table cells that found a match in the right table.
    ///
    /// # Errors
    ///
    /// [`MetricError::NoData`] when the left table had zero cells (an empty
    /// denominator is signalled, never divided through).
    pub fn coverage(&self) -> MetricResult<f64> {
        if self.left_cells == 0 {
            return Err(MetricError::no_data(format!(
                "join coverage of an empty {} table",
                self.left_metric
            )));
        }
        Ok(self.rows.len() as f64 / self.left_cells as f64)
    }

    /// Left-table cells that found no partner.
    pub fn dropped_left(&self) -> usize {
        self.left_cells - self.rows.len()
    }

    /// Right-table cells that found no partner.
    pub fn dropped_right(&self) -> usize {
        self.right_cells - self.rows.len()
    }

    /// The per-row `left / right` rate, e.g. milliseconds per line of code.
    ///
    /// Rows with a zero right value are excluded and recorded, mirroring
    /// [`GroupedTable::relative_ratio`]; one degenerate row never aborts
    /// the series.
    pub fn unit_rates(&self) -> RateSeries {
        let mut rates = Vec::new();
        let mut excluded = Vec::new();
        for row in &self.rows {
            if row.right == 0.0 {
                excluded.push((
                    row.request,
                    row.method,
                    MetricError::division_by_zero(format!(
                        "{} per {} at ({}, {}): {} value is zero",
                        self.left_metric,
                        self.right_metric,
                        row.request,
                        row.method,
                        self.right_metric
                    )),
                ));
                continue;
            }
            rates.push((row.request, row.method, row.left / row.right));
        }
        RateSeries { rates, excluded }
    }
}

/// A derived per-unit series with its division exclusions.
#[derive(Debug, Clone)]
pub struct RateSeries {
    /// `(request, method, left/right)` in join order.
    pub rates: Vec<(RequestId, Method, f64)>,
    /// Rows dropped for a zero divisor.
    pub excluded: Vec<(RequestId, Method, MetricError)>,
}

impl RateSeries {
    /// The rate for one `(request, method)` pair.
    pub fn get(&self, request: RequestId, method: Method) -> Option<f64> {
        self.rates
            .iter()
            .find(|(r, m, _)| *r == request && *m == method)
            .map(|&(_, _, v)| v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing() -> GroupedTable {
        let mut table = GroupedTable::new(Metric::ServerMs);
        table.insert(RequestId::R1, Method::Web10, 5.0).unwrap();
        table.insert(RequestId::R1, Method::Rdfa, 3.0).unwrap();
        table.insert(RequestId::R2, Method::Web10, 8.0).unwrap();
        table
    }

    fn loc() -> GroupedTable {
        let mut table = GroupedTable::new(Metric::Loc);
        table.insert(RequestId::R1, Method::Web10, 14.0).unwrap();
        table.insert(RequestId::R1, Method::Rdfa, 22.0).unwrap();
        table.insert(RequestId::R3, Method::Web10, 17.0).unwrap();
        table
    }

    #[test]
    fn test_inner_join_only_shared_pairs() {
        let join = join_on_request_method(&timing(), &loc());
        assert_eq!(join.rows.len(), 2);
        assert_eq!(join.rows[0].request, RequestId::R1);
        assert_eq!(join.rows[0].method, Method::Web10);
        assert_eq!(join.rows[1].method, Method::Rdfa);
        assert_eq!(join.dropped_left(), 1); // (R2, Web10)
        assert_eq!(join.dropped_right(), 1); // (R3, Web10)
    }

    #[test]
    fn test_coverage_fraction() {
        let join = join_on_request_method(&timing(), &loc());
        let coverage = join.coverage().unwrap();
        assert!((coverage - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_coverage_of_empty_left_signals() {
        let empty = GroupedTable::new(Metric::ServerMs);
        let join = join_on_request_method(&empty, &loc());
        assert!(matches!(join.coverage(), Err(MetricError::NoData { .. })));
    }

    #[test]
    fn test_single_shared_pair() {
        let mut left = GroupedTable::new(Metric::ServerMs);
        left.insert(RequestId::R1, Method::Web10, 5.0).unwrap();
        let mut right = GroupedTable::new(Metric::Loc);
        right.insert(RequestId::R1, Method::Web10, 14.0).unwrap();
        right.insert(RequestId::R2, Method::Web10, 17.0).unwrap();
        right.insert(RequestId::R4, Method::Rdfa, 20.0).unwrap();

        let join = join_on_request_method(&left, &right);
        assert_eq!(join.rows.len(), 1);
        // The smaller (left) table is fully covered.
        assert_eq!(join.coverage().unwrap(), 1.0);
    }

    #[test]
    fn test_unit_rates_time_per_line() {
        let join = join_on_request_method(&timing(), &loc());
        let series = join.unit_rates();
        let web10 = series.get(RequestId::R1, Method::Web10).unwrap();
        let rdfa = series.get(RequestId::R1, Method::Rdfa).unwrap();
        assert!((web10 - 5.0 / 14.0).abs() < 1e-9);
        assert!((rdfa - 3.0 / 22.0).abs() < 1e-9);
        // RDFa spends fewer milliseconds per line here.
        assert!(rdfa < web10);
    }

    #[test]
    fn test_unit_rates_zero_divisor_excluded() {
        let mut left = GroupedTable::new(Metric::ServerMs);
        left.insert(RequestId::R1, Method::Web10, 5.0).unwrap();
        let mut right = GroupedTable::new(Metric::Loc);
        right.insert(RequestId::R1, Method::Web10, 0.0).unwrap();

        let series = join_on_request_method(&left, &right).unit_rates();
        assert!(series.rates.is_empty());
        assert_eq!(series.excluded.len(), 1);
    }
}
