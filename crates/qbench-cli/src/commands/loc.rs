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

//! Lines-of-code comparison report over the embedded dataset.

use super::{chart_done, echo, ensure_out_dir, out_file, section};
use crate::cli::OutputArgs;
use crate::error::CliResult;
use qbench_chart::{
    render_grouped_bar, render_stacked_bar, render_value_bars, style, Baseline,
    GroupedBarChart, StackSegment, StackedBarChart, StackedGroup, ValueBar, ValueBarChart,
};
use qbench_core::{builtin, stats, GroupedTable, Metric, RequestId};
use serde_json::{json, Value};

/// Run the lines-of-code report.
pub fn run(output: &OutputArgs) -> CliResult<Value> {
    ensure_out_dir(output)?;
    let loc = builtin::code_metrics().pivot(Metric::Loc)?;

    section(output, "LINES OF CODE COMPARISON");

    let mut charts: Vec<String> = Vec::new();

    if !output.no_charts {
        let mut chart = GroupedBarChart::from_table(
            "Lines of code per request across the three engines",
            "Lines of code",
            &loc,
        );
        chart.value_labels = true;
        let path = out_file(output, "loc_per_request_comparison.png");
        render_grouped_bar(&path, &chart)?;
        chart_done(output, &path);
        charts.push("loc_per_request_comparison.png".to_string());
    }

    // Per-engine averages with the overall mean as a reference rule.
    let ranked = loc.rank_methods(GroupedTable::average)?;
    let overall = stats::mean(&ranked.iter().map(|(_, avg)| *avg).collect::<Vec<_>>())?;
    if !output.no_charts {
        let bars = ranked
            .iter()
            .map(|&(method, average)| ValueBar {
                label: method.short_label().to_string(),
                color: style::method_color(method),
                value: average,
            })
            .collect();
        let mut chart =
            ValueBarChart::new("Average lines of code per engine", "Lines of code", bars);
        chart.reference = Some(Baseline {
            value: overall,
            label: format!("Overall average: {overall:.1}"),
            color: style::NO_DATA,
        });
        let path = out_file(output, "average_loc_per_engine.png");
        render_value_bars(&path, &chart)?;
        chart_done(output, &path);
        charts.push("average_loc_per_engine.png".to_string());
    }

    // Total code per request, stacked and sorted so the heaviest requests
    // end up on the right.
    let mut totals: Vec<(RequestId, f64)> = RequestId::ALL
        .into_iter()
        .map(|request| {
            let total: f64 = loc
                .methods()
                .iter()
                .filter_map(|&method| loc.get(request, method))
                .sum();
            (request, total)
        })
        .collect();
    totals.sort_by(|a, b| a.1.total_cmp(&b.1));
    if !output.no_charts {
        let categories: Vec<String> =
            totals.iter().map(|(request, _)| request.to_string()).collect();
        let segments = loc
            .methods()
            .iter()
            .map(|&method| StackSegment {
                label: method.short_label().to_string(),
                color: style::method_color(method),
                values: totals
                    .iter()
                    .map(|&(request, _)| loc.get(request, method).unwrap_or(0.0))
                    .collect(),
            })
            .collect();
        let chart = StackedBarChart {
            title: "Total code required per request (all engines stacked)".to_string(),
            x_desc: "Request (sorted by total)".to_string(),
            y_desc: "Total lines of code".to_string(),
            categories,
            groups: vec![StackedGroup {
                label: String::new(),
                segments,
            }],
            total_labels: true,
            size: (1280, 640),
        };
        let path = out_file(output, "stacked_loc_comparison.png");
        render_stacked_bar(&path, &chart)?;
        chart_done(output, &path);
        charts.push("stacked_loc_comparison.png".to_string());
    }

    section(output, "SUMMARY STATISTICS");
    let mut per_method = serde_json::Map::new();
    for &method in loc.methods() {
        let summary = loc.summary(method)?;
        echo(
            output,
            format!(
                "{:<10} average: {:5.1} LOC, min: {:.0}, max: {:.0}",
                method.short_label(),
                summary.mean,
                summary.min,
                summary.max
            ),
        );
        per_method.insert(
            method.short_label().to_string(),
            json!({
                "average": summary.mean,
                "min": summary.min,
                "max": summary.max,
            }),
        );
    }

    let mut spread_pct = None;
    if let (Some((compact, compact_avg)), Some((verbose, verbose_avg))) =
        (ranked.first(), ranked.last())
    {
        echo(output, "");
        echo(
            output,
            format!("Most compact: {} ({compact_avg:.1} LOC avg)", compact.label()),
        );
        echo(
            output,
            format!("Most verbose: {} ({verbose_avg:.1} LOC avg)", verbose.label()),
        );
        if *compact_avg == 0.0 {
            echo(output, "Difference: n/a (compact average is zero)");
        } else {
            let pct = (verbose_avg - compact_avg) / compact_avg * 100.0;
            spread_pct = Some(pct);
            echo(
                output,
                format!(
                    "Difference: {:.1} LOC (+{pct:.1}%)",
                    verbose_avg - compact_avg
                ),
            );
        }
    }

    Ok(json!({
        "report": "loc",
        "per_method": per_method,
        "overall_average": overall,
        "most_compact": ranked.first().map(|(m, _)| m.short_label()),
        "most_verbose": ranked.last().map(|(m, _)| m.short_label()),
        "verbose_vs_compact_pct": spread_pct,
        "charts": charts,
    }))
}
