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

//! Descriptive statistics and the trend-line fit.
//!
//! Everything here is an unweighted computation over the data points given;
//! missing values are never imputed. Empty or degenerate inputs report
//! [`MetricError`] conditions instead of producing NaN.

use crate::{MetricError, MetricResult};

/// Arithmetic mean.
///
/// # Errors
///
/// [`MetricError::NoData`] on an empty slice.
pub fn mean(values: &[f64]) -> MetricResult<f64> {
    if values.is_empty() {
        return Err(MetricError::no_data("mean of zero values"));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median (midpoint of the two central values for even counts).
pub fn median(values: &[f64]) -> MetricResult<f64> {
    if values.is_empty() {
        return Err(MetricError::no_data("median of zero values"));
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Ok(sorted[mid])
    }
}

/// Population standard deviation (divisor N, matching the source reports).
pub fn population_stdev(values: &[f64]) -> MetricResult<f64> {
    let mu = mean(values)?;
    let variance =
        values.iter().map(|v| (v - mu).powi(2)).sum::<f64>() / values.len() as f64;
    Ok(variance.sqrt())
}

/// Descriptive statistics over one series.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Summary {
    /// Arithmetic mean.
    pub mean: f64,
    /// Median.
    pub median: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
    /// Population standard deviation.
    pub stdev: f64,
    /// Number of data points.
    pub count: usize,
}

/// Compute a [`Summary`] over one series.
///
/// # Errors
///
/// [`MetricError::NoData`] on an empty slice.
pub fn summarize(values: &[f64]) -> MetricResult<Summary> {
    let mean = mean(values)?;
    let median = median(values)?;
    let stdev = population_stdev(values)?;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Ok(Summary {
        mean,
        median,
        min,
        max,
        stdev,
        count: values.len(),
    })
}

/// Percentage reduction of `new` against `baseline`:
/// `(baseline - new) / baseline * 100`.
///
/// Positive means `new` is smaller. The zero-baseline case is a named
/// condition; whether to substitute 0% is the caller's policy.
///
/// # Examples
///
/// ```
/// use qbench_core::stats::reduction_percent;
///
/// assert_eq!(reduction_percent(10.0, 5.0).unwrap(), 50.0);
/// assert!(reduction_percent(0.0, 5.0).is_err());
/// ```
///
/// # Errors
///
/// [`MetricError::UndefinedBaseline`] when `baseline` is zero.
pub fn reduction_percent(baseline: f64, new: f64) -> MetricResult<f64> {
    if baseline == 0.0 {
        return Err(MetricError::UndefinedBaseline);
    }
    Ok((baseline - new) / baseline * 100.0)
}

/// A fitted degree-1 polynomial, used only to decorate scatter plots with a
/// trend line.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearFit {
    /// Slope of the fitted line.
    pub slope: f64,
    /// Intercept of the fitted line.
    pub intercept: f64,
}

impl LinearFit {
    /// Evaluate the fitted line at `x`.
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Least-squares fit of a line through `points`.
///
/// # Errors
///
/// - [`MetricError::NoData`] with fewer than two points.
/// - [`MetricError::DivisionByZero`] when all x values coincide (a vertical
///   set has no finite slope).
pub fn linear_fit(points: &[(f64, f64)]) -> MetricResult<LinearFit> {
    if points.len() < 2 {
        return Err(MetricError::no_data(format!(
            "linear fit needs at least 2 points, got {}",
            points.len()
        )));
    }
    let n = points.len() as f64;
    let sum_x: f64 = points.iter().map(|(x, _)| x).sum();
    let sum_y: f64 = points.iter().map(|(_, y)| y).sum();
    let sum_xx: f64 = points.iter().map(|(x, _)| x * x).sum();
    let sum_xy: f64 = points.iter().map(|(x, y)| x * y).sum();

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator == 0.0 {
        return Err(MetricError::division_by_zero(
            "linear fit over points with zero x variance",
        ));
    }
    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;
    Ok(LinearFit { slope, intercept })
}
