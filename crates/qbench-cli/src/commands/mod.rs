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

//! Report command implementations.
//!
//! Each report follows the same shape: load or select observations, derive
//! aggregates with `qbench-core`, render one chart per aggregate with
//! `qbench-chart`, print a console summary, and return a JSON summary for
//! `--json` mode.

pub mod all;
pub mod benchmarks;
pub mod complexity;
pub mod dependencies;
pub mod loc;
pub mod robustness;
pub mod tradeoff;

use crate::cli::{OutputArgs, ResultArgs};
use crate::error::{CliError, CliResult};
use colored::Colorize;
use qbench_chart::Series;
use qbench_core::{RatioTable, RequestId};
use qbench_csv::{read_results_path, LoadReport};
use std::path::{Path, PathBuf};

/// Load the results file, echoing skipped-row diagnostics in text mode.
pub(crate) fn load_results(args: &ResultArgs) -> CliResult<LoadReport> {
    let report = read_results_path(&args.input)?;
    if !args.output.json && report.skipped_count() > 0 {
        println!(
            "{} {} malformed row(s) skipped in '{}'",
            "warning:".yellow().bold(),
            report.skipped_count(),
            args.input.display()
        );
        for row in &report.skipped {
            match row.line {
                Some(line) => println!("  line {}: {}", line, row.reason),
                None => println!("  {}", row.reason),
            }
        }
    }
    Ok(report)
}

/// Create the output directory if needed.
pub(crate) fn ensure_out_dir(output: &OutputArgs) -> CliResult<()> {
    std::fs::create_dir_all(&output.out_dir)
        .map_err(|e| CliError::io(output.out_dir.clone(), &e))
}

/// Path of a chart file inside the output directory.
pub(crate) fn out_file(output: &OutputArgs, name: &str) -> PathBuf {
    output.out_dir.join(name)
}

/// Print a section banner, text mode only.
pub(crate) fn section(output: &OutputArgs, title: &str) {
    if output.json {
        return;
    }
    let bar = "=".repeat(78);
    println!("{bar}");
    println!("{}", title.bold());
    println!("{bar}");
}

/// Print one summary line, text mode only.
pub(crate) fn echo(output: &OutputArgs, line: impl AsRef<str>) {
    if !output.json {
        println!("{}", line.as_ref());
    }
}

/// Acknowledge a rendered chart, text mode only.
pub(crate) fn chart_done(output: &OutputArgs, path: &Path) {
    if !output.json {
        println!("{} {}", "[OK]".green().bold(), path.display());
    }
}

/// A bar series over the canonical request axis from a ratio table, in the
/// target method's color.
pub(crate) fn ratio_series(ratio: &RatioTable) -> Series {
    Series {
        label: format!("{} vs {}", ratio.target.short_label(), ratio.baseline.short_label()),
        color: qbench_chart::style::method_color(ratio.target),
        values: RequestId::ALL
            .into_iter()
            .map(|request| ratio.get(request))
            .collect(),
    }
}
