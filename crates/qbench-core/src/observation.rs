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

//! Observations and the consolidated observation store.

use crate::{GroupedTable, Method, Metric, MetricError, MetricResult, RequestId};
use std::collections::BTreeSet;

/// One recorded fact: a value for a `(request, method, metric)` key.
///
/// Observations are immutable once loaded. Timing observations read from the
/// results file carry the measured standard deviation alongside the mean;
/// code-metric observations do not.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Observation {
    /// The benchmark request.
    pub request: RequestId,
    /// The engine that produced the value.
    pub method: Method,
    /// Which series the value belongs to.
    pub metric: Metric,
    /// The recorded value (a mean, for timing series).
    pub value: f64,
    /// Standard deviation across benchmark runs, when recorded.
    pub stdev: Option<f64>,
}

impl Observation {
    /// Create an observation without a recorded standard deviation.
    pub fn new(request: RequestId, method: Method, metric: Metric, value: f64) -> Self {
        Self {
            request,
            method,
            metric,
            value,
            stdev: None,
        }
    }

    /// Attach the recorded standard deviation.
    pub fn with_stdev(mut self, stdev: f64) -> Self {
        self.stdev = Some(stdev);
        self
    }
}

/// The consolidated observation store.
///
/// All reports pull from one `ObservationSet` instead of re-declaring their
/// datasets. The store enforces key uniqueness: a second observation for the
/// same `(request, method, metric)` is rejected as a malformed row, never
/// silently overwritten.
///
/// # Examples
///
/// ```
/// use qbench_core::{Metric, Method, Observation, ObservationSet, RequestId};
///
/// let mut set = ObservationSet::new();
/// set.insert(Observation::new(RequestId::R1, Method::Web10, Metric::Loc, 14.0))
///     .unwrap();
/// set.insert(Observation::new(RequestId::R1, Method::Rdfa, Metric::Loc, 22.0))
///     .unwrap();
///
/// // Duplicate keys are rejected.
/// let dup = Observation::new(RequestId::R1, Method::Web10, Metric::Loc, 99.0);
/// assert!(set.insert(dup).is_err());
///
/// let table = set.pivot(Metric::Loc).unwrap();
/// assert_eq!(table.get(RequestId::R1, Method::Web10), Some(14.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ObservationSet {
    rows: Vec<Observation>,
    keys: BTreeSet<(RequestId, Method, Metric)>,
}

impl ObservationSet {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an observation, rejecting duplicate keys.
    ///
    /// # Errors
    ///
    /// [`MetricError::MalformedRow`] when the `(request, method, metric)`
    /// key is already present.
    pub fn insert(&mut self, observation: Observation) -> MetricResult<()> {
        let key = (
            observation.request,
            observation.method,
            observation.metric,
        );
        if !self.keys.insert(key) {
            return Err(MetricError::malformed(format!(
                "duplicate observation for ({}, {}, {})",
                observation.request, observation.method, observation.metric
            )));
        }
        self.rows.push(observation);
        Ok(())
    }

    /// Insert an observation whose key the caller has already proven unique,
    /// e.g. rows of a compile-time dataset.
    pub(crate) fn insert_unchecked(&mut self, observation: Observation) {
        self.keys.insert((
            observation.request,
            observation.method,
            observation.metric,
        ));
        self.rows.push(observation);
    }

    /// Insert every observation from an iterator, stopping at the first
    /// duplicate key.
    pub fn extend(
        &mut self,
        observations: impl IntoIterator<Item = Observation>,
    ) -> MetricResult<()> {
        for observation in observations {
            self.insert(observation)?;
        }
        Ok(())
    }

    /// Number of observations held.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the store holds no observations.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate the observations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.rows.iter()
    }

    /// The distinct metrics present, in display order.
    pub fn metrics(&self) -> Vec<Metric> {
        let present: BTreeSet<Metric> = self.rows.iter().map(|o| o.metric).collect();
        Metric::ALL
            .into_iter()
            .filter(|m| present.contains(m))
            .collect()
    }

    /// The distinct methods present, in comparison order.
    pub fn methods(&self) -> Vec<Method> {
        let present: BTreeSet<Method> = self.rows.iter().map(|o| o.method).collect();
        Method::ALL
            .into_iter()
            .filter(|m| present.contains(m))
            .collect()
    }

    /// Group-and-pivot one metric into a table of mean values.
    ///
    /// # Errors
    ///
    /// [`MetricError::UnknownMetric`] when the filter matches zero
    /// observations; the error names the metrics that are available.
    pub fn pivot(&self, metric: Metric) -> MetricResult<GroupedTable> {
        self.pivot_by(metric, |o| Some(o.value))
    }

    /// Group-and-pivot the recorded standard deviations of one metric.
    ///
    /// Observations without a recorded deviation contribute no cell; the
    /// resulting gaps render as "no data", distinct from a zero deviation.
    pub fn pivot_stdev(&self, metric: Metric) -> MetricResult<GroupedTable> {
        self.pivot_by(metric, |o| o.stdev)
    }

    fn pivot_by(
        &self,
        metric: Metric,
        select: impl Fn(&Observation) -> Option<f64>,
    ) -> MetricResult<GroupedTable> {
        let mut matched = false;
        let mut table = GroupedTable::new(metric);
        for observation in self.rows.iter().filter(|o| o.metric == metric) {
            matched = true;
            if let Some(value) = select(observation) {
                // Key uniqueness is enforced at insert, so this cannot
                // collide.
                table.insert(observation.request, observation.method, value)?;
            }
        }
        if !matched {
            return Err(MetricError::UnknownMetric {
                metric,
                available: self.metrics(),
            });
        }
        Ok(table)
    }
}

impl<'a> IntoIterator for &'a ObservationSet {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(request: RequestId, method: Method, metric: Metric, value: f64) -> Observation {
        Observation::new(request, method, metric, value)
    }

    #[test]
    fn test_insert_rejects_duplicate_key() {
        let mut set = ObservationSet::new();
        set.insert(obs(RequestId::R1, Method::Web10, Metric::Loc, 14.0))
            .unwrap();
        let err = set
            .insert(obs(RequestId::R1, Method::Web10, Metric::Loc, 15.0))
            .unwrap_err();
        assert!(matches!(err, MetricError::MalformedRow { .. }));
        // The first write stands.
        let table = set.pivot(Metric::Loc).unwrap();
        assert_eq!(table.get(RequestId::R1, Method::Web10), Some(14.0));
    }

    #[test]
    fn test_same_pair_different_metric_is_fine() {
        let mut set = ObservationSet::new();
        set.insert(obs(RequestId::R1, Method::Web10, Metric::Loc, 14.0))
            .unwrap();
        set.insert(obs(RequestId::R1, Method::Web10, Metric::Branches, 1.0))
            .unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_pivot_unknown_metric_reports_available() {
        let mut set = ObservationSet::new();
        set.insert(obs(RequestId::R1, Method::Web10, Metric::Loc, 14.0))
            .unwrap();
        let err = set.pivot(Metric::ServerMs).unwrap_err();
        match err {
            MetricError::UnknownMetric { metric, available } => {
                assert_eq!(metric, Metric::ServerMs);
                assert_eq!(available, vec![Metric::Loc]);
            }
            other => panic!("expected UnknownMetric, got {other:?}"),
        }
    }

    #[test]
    fn test_pivot_stdev_skips_missing_deviations() {
        let mut set = ObservationSet::new();
        set.insert(
            obs(RequestId::R1, Method::Web10, Metric::ServerMs, 10.0).with_stdev(1.5),
        )
        .unwrap();
        set.insert(obs(RequestId::R2, Method::Web10, Metric::ServerMs, 20.0))
            .unwrap();

        let table = set.pivot_stdev(Metric::ServerMs).unwrap();
        assert_eq!(table.get(RequestId::R1, Method::Web10), Some(1.5));
        assert_eq!(table.get(RequestId::R2, Method::Web10), None);
    }

    #[test]
    fn test_metrics_in_display_order() {
        let mut set = ObservationSet::new();
        set.insert(obs(RequestId::R1, Method::Web10, Metric::Branches, 1.0))
            .unwrap();
        set.insert(obs(RequestId::R1, Method::Web10, Metric::ServerMs, 2.0))
            .unwrap();
        assert_eq!(set.metrics(), vec![Metric::ServerMs, Metric::Branches]);
    }
}
