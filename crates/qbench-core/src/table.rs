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

//! Pivoted metric tables and the comparison operations over them.

use crate::stats::{self, Summary};
use crate::{Method, Metric, MetricError, MetricResult, RequestId};
use std::collections::BTreeMap;

/// One metric pivoted into request rows and method columns.
///
/// Rows iterate in canonical request order, columns in first-seen method
/// order. A cell is `Option<f64>`: absent data stays distinct from a zero
/// value all the way to rendering.
///
/// # Examples
///
/// ```
/// use qbench_core::{GroupedTable, Method, Metric, RequestId};
///
/// let mut table = GroupedTable::new(Metric::ServerMs);
/// table.insert(RequestId::R1, Method::Web10, 10.0).unwrap();
/// table.insert(RequestId::R1, Method::Sparql, 5.0).unwrap();
/// table.insert(RequestId::R2, Method::Web10, 30.0).unwrap();
///
/// assert_eq!(table.average(Method::Web10).unwrap(), 20.0);
///
/// let speedup = table.relative_ratio(Method::Web10, Method::Sparql);
/// assert_eq!(speedup.get(RequestId::R1), Some(2.0));
/// ```
#[derive(Debug, Clone)]
pub struct GroupedTable {
    metric: Metric,
    methods: Vec<Method>,
    cells: BTreeMap<RequestId, BTreeMap<Method, f64>>,
}

impl GroupedTable {
    /// Create an empty table for one metric.
    pub fn new(metric: Metric) -> Self {
        Self {
            metric,
            methods: Vec::new(),
            cells: BTreeMap::new(),
        }
    }

    /// The metric this table holds.
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Set a cell, rejecting duplicates.
    ///
    /// # Errors
    ///
    /// [`MetricError::MalformedRow`] when the `(request, method)` cell is
    /// already filled.
    pub fn insert(
        &mut self,
        request: RequestId,
        method: Method,
        value: f64,
    ) -> MetricResult<()> {
        let row = self.cells.entry(request).or_default();
        if row.contains_key(&method) {
            return Err(MetricError::malformed(format!(
                "duplicate cell ({request}, {method}) in {} table",
                self.metric
            )));
        }
        row.insert(method, value);
        if !self.methods.contains(&method) {
            self.methods.push(method);
        }
        Ok(())
    }

    /// The cell for a `(request, method)` pair, `None` when no data was
    /// recorded.
    pub fn get(&self, request: RequestId, method: Method) -> Option<f64> {
        self.cells.get(&request)?.get(&method).copied()
    }

    /// Columns in first-seen order.
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// Requests with at least one cell, in canonical order.
    pub fn requests(&self) -> Vec<RequestId> {
        self.cells.keys().copied().collect()
    }

    /// Number of filled cells.
    pub fn cell_count(&self) -> usize {
        self.cells.values().map(BTreeMap::len).sum()
    }

    /// One column over the full canonical axis; gaps are the "no data"
    /// markers charts must render distinctly from zero.
    pub fn column(&self, method: Method) -> Vec<(RequestId, Option<f64>)> {
        RequestId::ALL
            .into_iter()
            .map(|request| (request, self.get(request, method)))
            .collect()
    }

    /// The values present for one method, in canonical request order.
    pub fn method_values(&self, method: Method) -> Vec<f64> {
        self.cells
            .values()
            .filter_map(|row| row.get(&method).copied())
            .collect()
    }

    /// Arithmetic mean over the cells present for one method.
    ///
    /// # Errors
    ///
    /// [`MetricError::NoData`] when the method has zero cells; a NaN is
    /// never returned.
    pub fn average(&self, method: Method) -> MetricResult<f64> {
        stats::mean(&self.method_values(method)).map_err(|_| {
            MetricError::no_data(format!("method '{method}' has no {} cells", self.metric))
        })
    }

    /// Sum over the cells present for one method.
    pub fn total(&self, method: Method) -> f64 {
        self.method_values(method).iter().sum()
    }

    /// Descriptive statistics over the cells present for one method.
    pub fn summary(&self, method: Method) -> MetricResult<Summary> {
        stats::summarize(&self.method_values(method)).map_err(|_| {
            MetricError::no_data(format!("method '{method}' has no {} cells", self.metric))
        })
    }

    /// Per-request `baseline / target` ratios.
    ///
    /// Only requests with cells for both methods contribute. A zero target
    /// value is recorded as a [`MetricError::DivisionByZero`] exclusion and
    /// the request is dropped from the ratios; the rest of the batch still
    /// computes.
    pub fn relative_ratio(&self, baseline: Method, target: Method) -> RatioTable {
        let mut ratios = BTreeMap::new();
        let mut excluded = Vec::new();
        for (&request, row) in &self.cells {
            let (Some(&b), Some(&t)) = (row.get(&baseline), row.get(&target)) else {
                continue;
            };
            if t == 0.0 {
                excluded.push((
                    request,
                    MetricError::division_by_zero(format!(
                        "ratio {baseline} / {target} at {request}: {target} value is zero"
                    )),
                ));
                continue;
            }
            ratios.insert(request, b / t);
        }
        RatioTable {
            baseline,
            target,
            ratios,
            excluded,
        }
    }

    /// Rank the methods present by an aggregate, ascending.
    ///
    /// Ties keep first-seen method order, so repeated runs over the same
    /// data produce the same sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use qbench_core::{GroupedTable, Method, Metric, RequestId};
    ///
    /// let mut table = GroupedTable::new(Metric::Loc);
    /// table.insert(RequestId::R1, Method::Web10, 14.0).unwrap();
    /// table.insert(RequestId::R1, Method::Rdfa, 22.0).unwrap();
    ///
    /// let ranked = table.rank_methods(GroupedTable::average).unwrap();
    /// assert_eq!(ranked[0], (Method::Web10, 14.0));
    /// ```
    pub fn rank_methods<F>(&self, aggregator: F) -> MetricResult<Vec<(Method, f64)>>
    where
        F: Fn(&GroupedTable, Method) -> MetricResult<f64>,
    {
        let mut ranked = Vec::with_capacity(self.methods.len());
        for &method in &self.methods {
            ranked.push((method, aggregator(self, method)?));
        }
        // Stable sort: equal aggregates keep first-seen order.
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
        Ok(ranked)
    }
}

/// Per-request ratios of a baseline method against a target method.
///
/// Requests whose target value was zero are listed in [`RatioTable::excluded`]
/// with the division failure recorded for the caller to report.
#[derive(Debug, Clone)]
pub struct RatioTable {
    /// The reference method (numerator).
    pub baseline: Method,
    /// The compared method (denominator).
    pub target: Method,
    ratios: BTreeMap<RequestId, f64>,
    /// Requests dropped because of a zero target value.
    pub excluded: Vec<(RequestId, MetricError)>,
}

impl RatioTable {
    /// The ratio for one request, when it could be computed.
    pub fn get(&self, request: RequestId) -> Option<f64> {
        self.ratios.get(&request).copied()
    }

    /// Iterate the computed ratios in canonical request order.
    pub fn iter(&self) -> impl Iterator<Item = (RequestId, f64)> + '_ {
        self.ratios.iter().map(|(&r, &v)| (r, v))
    }

    /// Number of computed ratios.
    pub fn len(&self) -> usize {
        self.ratios.len()
    }

    /// Whether no ratio could be computed.
    pub fn is_empty(&self) -> bool {
        self.ratios.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server_table() -> GroupedTable {
        let mut table = GroupedTable::new(Metric::ServerMs);
        table.insert(RequestId::R1, Method::Web10, 10.0).unwrap();
        table.insert(RequestId::R1, Method::Sparql, 5.0).unwrap();
        table.insert(RequestId::R2, Method::Web10, 20.0).unwrap();
        table.insert(RequestId::R2, Method::Sparql, 4.0).unwrap();
        table.insert(RequestId::R3, Method::Web10, 30.0).unwrap();
        table
    }

    #[test]
    fn test_average_is_arithmetic_mean() {
        let mut table = GroupedTable::new(Metric::Loc);
        table.insert(RequestId::R1, Method::Web10, 1.0).unwrap();
        table.insert(RequestId::R2, Method::Web10, 2.0).unwrap();
        table.insert(RequestId::R3, Method::Web10, 3.0).unwrap();
        assert_eq!(table.average(Method::Web10).unwrap(), 2.0);
    }

    #[test]
    fn test_average_no_data() {
        let table = GroupedTable::new(Metric::Loc);
        assert!(matches!(
            table.average(Method::Rdfa),
            Err(MetricError::NoData { .. })
        ));
    }

    #[test]
    fn test_missing_cell_is_none_not_zero() {
        let table = server_table();
        assert_eq!(table.get(RequestId::R3, Method::Sparql), None);
        let column = table.column(Method::Sparql);
        assert_eq!(column[2], (RequestId::R3, None));
    }

    #[test]
    fn test_relative_ratio() {
        let table = server_table();
        let ratio = table.relative_ratio(Method::Web10, Method::Sparql);
        assert_eq!(ratio.get(RequestId::R1), Some(2.0));
        assert_eq!(ratio.get(RequestId::R2), Some(5.0));
        // R3 has no SPARQL cell at all, so it is simply not joined.
        assert_eq!(ratio.get(RequestId::R3), None);
        assert!(ratio.excluded.is_empty());
    }

    #[test]
    fn test_relative_ratio_zero_target_excluded() {
        let mut table = server_table();
        table.insert(RequestId::R4, Method::Web10, 10.0).unwrap();
        table.insert(RequestId::R4, Method::Sparql, 0.0).unwrap();

        let ratio = table.relative_ratio(Method::Web10, Method::Sparql);
        // One fewer result than joinable inputs.
        assert_eq!(ratio.len(), 2);
        assert_eq!(ratio.excluded.len(), 1);
        let (request, error) = &ratio.excluded[0];
        assert_eq!(*request, RequestId::R4);
        assert!(matches!(error, MetricError::DivisionByZero { .. }));
    }

    #[test]
    fn test_rank_methods_ascending_with_stable_ties() {
        let mut table = GroupedTable::new(Metric::Branches);
        table.insert(RequestId::R1, Method::Web10, 3.0).unwrap();
        table.insert(RequestId::R1, Method::Rdfa, 3.0).unwrap();
        table.insert(RequestId::R1, Method::Sparql, 1.0).unwrap();

        let ranked = table.rank_methods(GroupedTable::average).unwrap();
        assert_eq!(
            ranked,
            vec![
                (Method::Sparql, 1.0),
                (Method::Web10, 3.0),
                (Method::Rdfa, 3.0),
            ]
        );

        // Determinism: a second run yields the identical sequence.
        assert_eq!(ranked, table.rank_methods(GroupedTable::average).unwrap());
    }

    #[test]
    fn test_insert_duplicate_cell_rejected() {
        let mut table = GroupedTable::new(Metric::Loc);
        table.insert(RequestId::R1, Method::Web10, 14.0).unwrap();
        assert!(table.insert(RequestId::R1, Method::Web10, 15.0).is_err());
        assert_eq!(table.get(RequestId::R1, Method::Web10), Some(14.0));
    }

    #[test]
    fn test_requests_canonical_order() {
        let mut table = GroupedTable::new(Metric::Loc);
        table.insert(RequestId::R10, Method::Web10, 63.0).unwrap();
        table.insert(RequestId::R2, Method::Web10, 17.0).unwrap();
        assert_eq!(table.requests(), vec![RequestId::R2, RequestId::R10]);
    }
}
