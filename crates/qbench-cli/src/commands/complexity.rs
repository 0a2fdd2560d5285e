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

//! Branching-complexity report over the embedded dataset.
//!
//! Complexity is the count of branching statements per request
//! implementation. The reduction chart compares against the Web 1.0
//! baseline; a zero baseline is substituted with 0% and the substitution is
//! reported, never applied silently.

use super::{chart_done, echo, ensure_out_dir, out_file, section};
use crate::cli::OutputArgs;
use crate::error::CliResult;
use colored::Colorize;
use qbench_chart::{
    render_box_plot, render_grouped_bar, render_heatmap, render_stacked_bar,
    render_value_bars, style, Baseline, BoxGroup, BoxPlotChart, GroupedBarChart, HeatmapChart,
    Series, StackSegment, StackedBarChart, StackedGroup, ValueBar, ValueBarChart,
};
use qbench_core::{
    builtin, reduction_percent, stats, GroupedTable, Method, Metric, MetricError, RequestId,
};
use serde_json::{json, Value};

/// Request difficulty buckets used by the per-category chart.
const CATEGORIES: [(&str, &[RequestId]); 3] = [
    ("Simple (R1-R3)", &[RequestId::R1, RequestId::R2, RequestId::R3]),
    (
        "Medium (R4-R8)",
        &[
            RequestId::R4,
            RequestId::R5,
            RequestId::R6,
            RequestId::R7,
            RequestId::R8,
        ],
    ),
    ("Complex (R9-R10)", &[RequestId::R9, RequestId::R10]),
];

/// Run the complexity report.
pub fn run(output: &OutputArgs) -> CliResult<Value> {
    ensure_out_dir(output)?;
    let branches = builtin::code_metrics().pivot(Metric::Branches)?;

    section(output, "ALGORITHMIC COMPLEXITY REPORT");

    let mut charts: Vec<String> = Vec::new();
    let mut render = |name: &str,
                      action: &mut dyn FnMut(&std::path::Path) -> CliResult<()>|
     -> CliResult<()> {
        if output.no_charts {
            return Ok(());
        }
        let path = out_file(output, name);
        action(&path)?;
        chart_done(output, &path);
        charts.push(name.to_string());
        Ok(())
    };

    render("complexity_by_request.png", &mut |path| {
        let mut chart = GroupedBarChart::from_table(
            "Branching statements per request",
            "Branching statements",
            &branches,
        );
        chart.value_labels = true;
        Ok(render_grouped_bar(path, &chart)?)
    })?;

    let ranked = branches.rank_methods(GroupedTable::average)?;
    let overall = stats::mean(&ranked.iter().map(|(_, avg)| *avg).collect::<Vec<_>>())?;
    render("complexity_average.png", &mut |path| {
        let bars = ranked
            .iter()
            .map(|&(method, average)| ValueBar {
                label: method.short_label().to_string(),
                color: style::method_color(method),
                value: average,
            })
            .collect();
        let mut chart = ValueBarChart::new(
            "Average branching statements per engine",
            "Branching statements",
            bars,
        );
        chart.reference = Some(Baseline {
            value: overall,
            label: format!("Overall average: {overall:.1}"),
            color: style::NO_DATA,
        });
        Ok(render_value_bars(path, &chart)?)
    })?;

    render("complexity_heatmap.png", &mut |path| {
        let mut heatmap =
            HeatmapChart::from_table("Branching complexity heatmap", &branches);
        heatmap.scale_max = Some(10.0);
        Ok(render_heatmap(path, &heatmap)?)
    })?;

    render("complexity_cumulative.png", &mut |path| {
        let segments = RequestId::ALL
            .iter()
            .enumerate()
            .map(|(i, &request)| StackSegment {
                label: request.to_string(),
                color: style::segment_color(i),
                values: branches
                    .methods()
                    .iter()
                    .map(|&method| branches.get(request, method).unwrap_or(0.0))
                    .collect(),
            })
            .collect();
        let chart = StackedBarChart {
            title: "Total branching statements per engine".to_string(),
            x_desc: "Engine".to_string(),
            y_desc: "Branching statements".to_string(),
            categories: branches
                .methods()
                .iter()
                .map(|m| m.short_label().to_string())
                .collect(),
            groups: vec![StackedGroup {
                label: String::new(),
                segments,
            }],
            total_labels: true,
            size: (1100, 640),
        };
        Ok(render_stacked_bar(path, &chart)?)
    })?;

    render("complexity_distribution.png", &mut |path| {
        let groups = branches
            .methods()
            .iter()
            .map(|&method| BoxGroup {
                label: method.short_label().to_string(),
                color: style::method_color(method),
                values: branches.method_values(method),
            })
            .collect();
        let chart = BoxPlotChart {
            title: "Complexity distribution per engine".to_string(),
            y_desc: "Branching statements".to_string(),
            groups,
            size: (900, 640),
        };
        Ok(render_box_plot(path, &chart)?)
    })?;

    render("complexity_by_category.png", &mut |path| {
        let series = branches
            .methods()
            .iter()
            .map(|&method| {
                let values = CATEGORIES
                    .iter()
                    .map(|(_, requests)| {
                        let cells: Vec<f64> = requests
                            .iter()
                            .filter_map(|&request| branches.get(request, method))
                            .collect();
                        stats::mean(&cells).ok()
                    })
                    .collect();
                Series {
                    label: method.short_label().to_string(),
                    color: style::method_color(method),
                    values,
                }
            })
            .collect();
        let chart = GroupedBarChart {
            title: "Average complexity by request category".to_string(),
            x_desc: "Category".to_string(),
            y_desc: "Average branching statements".to_string(),
            categories: CATEGORIES.iter().map(|(name, _)| name.to_string()).collect(),
            series,
            log_y: false,
            value_labels: true,
            baseline: None,
            bands: Vec::new(),
            y_max: None,
            size: (1100, 640),
        };
        Ok(render_grouped_bar(path, &chart)?)
    })?;

    // Reduction against the Web 1.0 baseline. A zero baseline would make
    // the percentage undefined; such requests fall back to 0% and the
    // substitution count is reported.
    let mut substituted = 0usize;
    let mut reduction_series = Vec::new();
    let mut reduction_json = serde_json::Map::new();
    for target in [Method::Rdfa, Method::Sparql] {
        let mut values = Vec::new();
        let mut per_request = serde_json::Map::new();
        for request in RequestId::ALL {
            let cell = match (
                branches.get(request, Method::Web10),
                branches.get(request, target),
            ) {
                (Some(baseline), Some(new)) => match reduction_percent(baseline, new) {
                    Ok(pct) => Some(pct),
                    Err(MetricError::UndefinedBaseline) => {
                        substituted += 1;
                        Some(0.0)
                    }
                    Err(error) => return Err(error.into()),
                },
                _ => None,
            };
            if let Some(pct) = cell {
                per_request.insert(request.to_string(), json!(pct));
            }
            values.push(cell);
        }
        reduction_series.push(Series {
            label: format!("{} vs Web 1.0", target.short_label()),
            color: style::method_color(target),
            values,
        });
        reduction_json.insert(target.short_label().to_string(), Value::Object(per_request));
    }
    render("complexity_reduction.png", &mut |path| {
        let chart = GroupedBarChart {
            title: "Complexity reduction vs Web 1.0 (positive = simpler)".to_string(),
            x_desc: "Request".to_string(),
            y_desc: "Reduction (%)".to_string(),
            categories: qbench_chart::request_labels(),
            series: reduction_series.clone(),
            log_y: false,
            value_labels: true,
            baseline: Some(Baseline {
                value: 0.0,
                label: "Web 1.0 baseline".to_string(),
                color: style::NO_DATA,
            }),
            bands: Vec::new(),
            y_max: None,
            size: (1280, 640),
        };
        Ok(render_grouped_bar(path, &chart)?)
    })?;
    if substituted > 0 {
        echo(
            output,
            format!(
                "{} {substituted} reduction value(s) had a zero baseline; 0% substituted",
                "note:".yellow()
            ),
        );
    }

    section(output, "COMPLEXITY STATISTICS");
    let mut per_method = serde_json::Map::new();
    for &method in branches.methods() {
        let summary = branches.summary(method)?;
        let total = branches.total(method);
        echo(
            output,
            format!(
                "{:<10} {:.2} avg, {total:.0} total, range [{:.0}-{:.0}], median {:.1}, stdev {:.2}",
                method.short_label(),
                summary.mean,
                summary.min,
                summary.max,
                summary.median,
                summary.stdev
            ),
        );
        per_method.insert(
            method.short_label().to_string(),
            json!({
                "average": summary.mean,
                "total": total,
                "min": summary.min,
                "max": summary.max,
                "median": summary.median,
                "stdev": summary.stdev,
            }),
        );
    }

    echo(output, "");
    echo(output, "Ranking (fewer branches is simpler):");
    for (rank, (method, average)) in ranked.iter().enumerate() {
        echo(
            output,
            format!("  {}. {:<16} {average:.2} avg branches", rank + 1, method.label()),
        );
    }

    Ok(json!({
        "report": "complexity",
        "per_method": per_method,
        "ranking": ranked
            .iter()
            .map(|(method, avg)| json!([method.short_label(), avg]))
            .collect::<Vec<_>>(),
        "reduction_vs_web10": reduction_json,
        "zero_baseline_substitutions": substituted,
        "charts": charts,
    }))
}
