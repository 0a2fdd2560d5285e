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

//! Property-based tests for the engine's numeric laws.

use proptest::prelude::*;
use qbench_core::stats::{mean, median, population_stdev, reduction_percent};
use qbench_core::{GroupedTable, Method, Metric, RequestId};

fn table_from_values(values: &[f64]) -> GroupedTable {
    let mut table = GroupedTable::new(Metric::ServerMs);
    for (request, &value) in RequestId::ALL.iter().zip(values) {
        table.insert(*request, Method::Web10, value).unwrap();
        // A second column so rankings always have something to compare.
        table.insert(*request, Method::Rdfa, value + 1.0).unwrap();
    }
    table
}

proptest! {
    #[test]
    fn prop_mean_lies_between_min_and_max(
        values in prop::collection::vec(0.0f64..1e6, 1..10)
    ) {
        let mu = mean(&values).unwrap();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(mu >= min - 1e-9);
        prop_assert!(mu <= max + 1e-9);
        prop_assert!(mu.is_finite());
    }

    #[test]
    fn prop_median_lies_between_min_and_max(
        values in prop::collection::vec(-1e6f64..1e6, 1..10)
    ) {
        let m = median(&values).unwrap();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(m >= min && m <= max);
    }

    #[test]
    fn prop_stdev_is_nonnegative_and_finite(
        values in prop::collection::vec(-1e6f64..1e6, 1..10)
    ) {
        let sd = population_stdev(&values).unwrap();
        prop_assert!(sd >= 0.0);
        prop_assert!(sd.is_finite());
    }

    #[test]
    fn prop_rank_methods_is_deterministic(
        values in prop::collection::vec(0.0f64..1e6, 10)
    ) {
        let table = table_from_values(&values);
        let first = table.rank_methods(GroupedTable::average).unwrap();
        let second = table.rank_methods(GroupedTable::average).unwrap();
        prop_assert_eq!(&first, &second);
        // Ascending order holds.
        for pair in first.windows(2) {
            prop_assert!(pair[0].1 <= pair[1].1);
        }
    }

    #[test]
    fn prop_ratio_times_target_recovers_baseline(
        baseline in 0.001f64..1e5,
        target in 0.001f64..1e5,
    ) {
        let mut table = GroupedTable::new(Metric::ServerMs);
        table.insert(RequestId::R1, Method::Web10, baseline).unwrap();
        table.insert(RequestId::R1, Method::Sparql, target).unwrap();

        let ratio = table.relative_ratio(Method::Web10, Method::Sparql);
        let r = ratio.get(RequestId::R1).unwrap();
        prop_assert!((r * target - baseline).abs() <= baseline * 1e-9);
    }

    #[test]
    fn prop_reduction_percent_sign_matches_direction(
        baseline in 0.001f64..1e5,
        new in 0.0f64..1e5,
    ) {
        let pct = reduction_percent(baseline, new).unwrap();
        prop_assert!(pct.is_finite());
        if new < baseline {
            prop_assert!(pct > 0.0);
        } else if new > baseline {
            prop_assert!(pct < 0.0);
        } else {
            prop_assert_eq!(pct, 0.0);
        }
        // Bounded above by 100% (new cannot be negative).
        prop_assert!(pct <= 100.0);
    }
}
