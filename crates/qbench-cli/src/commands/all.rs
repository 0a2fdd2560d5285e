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

//! Every report in sequence.

use super::{benchmarks, complexity, dependencies, loc, robustness, tradeoff};
use crate::cli::ResultArgs;
use crate::error::CliResult;
use serde_json::{json, Value};

/// Run every report with shared arguments. The code-metric reports take
/// only the output options; the timing reports also read the results file.
pub fn run(args: &ResultArgs) -> CliResult<Value> {
    let summaries = json!({
        "benchmarks": benchmarks::run(args)?,
        "loc": loc::run(&args.output)?,
        "complexity": complexity::run(&args.output)?,
        "robustness": robustness::run(&args.output)?,
        "dependencies": dependencies::run(&args.output)?,
        "tradeoff": tradeoff::run(args)?,
    });
    Ok(summaries)
}
