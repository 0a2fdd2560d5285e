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

//! DOM robustness report over the embedded analysis.
//!
//! Covers the two scraping engines only; the SPARQL endpoint reads no DOM
//! and has no fragility to score.

use super::{chart_done, echo, ensure_out_dir, out_file, section};
use crate::cli::OutputArgs;
use crate::error::CliResult;
use qbench_chart::{
    render_grouped_bar, render_heatmap, render_pie_panel, render_value_bars, style, Band,
    GroupedBarChart, HeatPalette, HeatmapChart, PieChart, Slice, ValueBar, ValueBarChart,
};
use qbench_core::{builtin, GroupedTable, Metric, Severity};
use serde_json::{json, Value};

/// The score zones drawn behind the bar charts.
fn score_zones() -> Vec<Band> {
    vec![
        Band {
            from: 0.0,
            to: 3.0,
            color: style::severity_color(Severity::Critical),
        },
        Band {
            from: 3.0,
            to: 6.0,
            color: style::severity_color(Severity::High),
        },
        Band {
            from: 6.0,
            to: 10.0,
            color: style::severity_color(Severity::Low),
        },
    ]
}

/// Run the robustness report.
pub fn run(output: &OutputArgs) -> CliResult<Value> {
    ensure_out_dir(output)?;
    let code = builtin::code_metrics();
    let scores = code.pivot(Metric::Robustness)?;
    let records = builtin::robustness_records();

    section(output, "DOM ROBUSTNESS REPORT");

    let mut charts: Vec<String> = Vec::new();

    if !output.no_charts {
        let mut chart = GroupedBarChart::from_table(
            "DOM robustness score per request (higher is better)",
            "Robustness score (0-10)",
            &scores,
        );
        chart.value_labels = true;
        chart.bands = score_zones();
        chart.y_max = Some(10.0);
        let path = out_file(output, "robustness_scores.png");
        render_grouped_bar(&path, &chart)?;
        chart_done(output, &path);
        charts.push("robustness_scores.png".to_string());
    }

    let ranked = scores.rank_methods(GroupedTable::average)?;
    if !output.no_charts {
        let bars = ranked
            .iter()
            .map(|&(method, average)| ValueBar {
                label: method.short_label().to_string(),
                color: style::method_color(method),
                value: average,
            })
            .collect();
        let mut chart = ValueBarChart::new(
            "Average DOM robustness per engine",
            "Robustness score (0-10)",
            bars,
        );
        chart.y_max = Some(10.0);
        chart.bands = score_zones();
        let path = out_file(output, "robustness_average.png");
        render_value_bars(&path, &chart)?;
        chart_done(output, &path);
        charts.push("robustness_average.png".to_string());
    }

    if !output.no_charts {
        let mut heatmap = HeatmapChart::from_table("DOM robustness heatmap", &scores);
        heatmap.palette = HeatPalette::RedGreen;
        heatmap.scale_max = Some(10.0);
        let path = out_file(output, "robustness_heatmap.png");
        render_heatmap(&path, &heatmap)?;
        chart_done(output, &path);
        charts.push("robustness_heatmap.png".to_string());
    }

    // Dependency counts behind the scores.
    for (metric, file, title) in [
        (
            Metric::StructuralDeps,
            "robustness_structural_deps.png",
            "Structural dependencies per request (positions, indices, order)",
        ),
        (
            Metric::TextDeps,
            "robustness_text_deps.png",
            "Text dependencies per request (hardcoded labels and formats)",
        ),
    ] {
        if output.no_charts {
            continue;
        }
        let table = code.pivot(metric)?;
        let mut chart = GroupedBarChart::from_table(title, "Dependency count", &table);
        chart.value_labels = true;
        let path = out_file(output, file);
        render_grouped_bar(&path, &chart)?;
        chart_done(output, &path);
        charts.push(file.to_string());
    }

    // Severity distribution, one pie per engine.
    let mut severity_json = serde_json::Map::new();
    let mut pies = Vec::new();
    for &method in scores.methods() {
        let mut counts: Vec<(Severity, usize)> = [
            Severity::Critical,
            Severity::High,
            Severity::Medium,
            Severity::Low,
        ]
        .into_iter()
        .map(|severity| {
            let count = records
                .iter()
                .filter(|r| r.method == method && r.severity == severity)
                .count();
            (severity, count)
        })
        .collect();
        counts.retain(|(_, count)| *count > 0);

        severity_json.insert(
            method.short_label().to_string(),
            json!(counts
                .iter()
                .map(|(severity, count)| (severity.label().to_string(), json!(count)))
                .collect::<serde_json::Map<_, _>>()),
        );
        pies.push(PieChart {
            title: format!("{} risk severity", method.short_label()),
            slices: counts
                .iter()
                .map(|&(severity, count)| Slice {
                    label: severity.label().to_string(),
                    size: count as f64,
                    color: style::severity_color(severity),
                })
                .collect(),
        });
    }
    if !output.no_charts && !pies.is_empty() {
        let path = out_file(output, "robustness_severity.png");
        render_pie_panel(&path, &pies, (1280, 640))?;
        chart_done(output, &path);
        charts.push("robustness_severity.png".to_string());
    }

    section(output, "ROBUSTNESS STATISTICS");
    let mut averages = serde_json::Map::new();
    for &(method, average) in ranked.iter().rev() {
        echo(
            output,
            format!(
                "{:<10} {average:.1}/10 average ({:.0}% robust)",
                method.short_label(),
                average / 10.0 * 100.0
            ),
        );
        averages.insert(method.short_label().to_string(), json!(average));
    }

    echo(output, "");
    echo(output, "Break conditions:");
    for record in records {
        echo(
            output,
            format!(
                "  {:<4} {:<10} [{:^8}] breaks if: {}",
                record.request.label(),
                record.method.short_label(),
                record.severity.label(),
                record.breaks_if
            ),
        );
    }

    Ok(json!({
        "report": "robustness",
        "averages": averages,
        "severity_counts": severity_json,
        "records": records
            .iter()
            .map(|r| json!({
                "request": r.request.to_string(),
                "method": r.method.short_label(),
                "score": r.score,
                "severity": r.severity.label(),
                "structural_deps": r.structural_deps,
                "text_deps": r.text_deps,
                "breaks_if": r.breaks_if,
            }))
            .collect::<Vec<_>>(),
        "charts": charts,
    }))
}
