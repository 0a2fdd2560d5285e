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

//! Aggregation engine benchmarks over the embedded dataset.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use qbench_core::{builtin, join_on_request_method, GroupedTable, Method, Metric};

fn bench_pivot(c: &mut Criterion) {
    let code = builtin::code_metrics();
    c.bench_function("pivot_loc", |b| {
        b.iter(|| black_box(&code).pivot(Metric::Loc).unwrap())
    });
}

fn bench_rank(c: &mut Criterion) {
    let loc = builtin::code_metrics().pivot(Metric::Loc).unwrap();
    c.bench_function("rank_methods_by_average", |b| {
        b.iter(|| black_box(&loc).rank_methods(GroupedTable::average).unwrap())
    });
}

fn bench_join_and_rates(c: &mut Criterion) {
    let code = builtin::code_metrics();
    let loc = code.pivot(Metric::Loc).unwrap();
    let branches = code.pivot(Metric::Branches).unwrap();
    c.bench_function("join_and_unit_rates", |b| {
        b.iter(|| {
            let join = join_on_request_method(black_box(&branches), black_box(&loc));
            join.unit_rates()
        })
    });
}

fn bench_ratio(c: &mut Criterion) {
    let branches = builtin::code_metrics().pivot(Metric::Branches).unwrap();
    c.bench_function("relative_ratio", |b| {
        b.iter(|| black_box(&branches).relative_ratio(Method::Web10, Method::Sparql))
    });
}

criterion_group!(benches, bench_pivot, bench_rank, bench_join_and_rates, bench_ratio);
criterion_main!(benches);
