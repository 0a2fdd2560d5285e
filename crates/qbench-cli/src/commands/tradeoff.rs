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

//! Code-size versus performance trade-off report.
//!
//! Joins the timing table (results file) against the embedded
//! lines-of-code table on `(request, method)` and derives the
//! milliseconds-per-line efficiency series. Join completeness is reported
//! so silently dropped pairs cannot masquerade as full coverage.

use super::{chart_done, echo, ensure_out_dir, load_results, out_file, section};
use crate::cli::ResultArgs;
use crate::error::CliResult;
use colored::Colorize;
use qbench_chart::{
    render_grouped_bar, render_scatter, style, GroupedBarChart, Marker, ScatterChart,
    ScatterPoint, ScatterSeries, Series,
};
use qbench_core::{
    builtin, join_on_request_method, linear_fit, Method, Metric, RequestId,
};
use serde_json::{json, Value};

fn marker_for(method: Method) -> Marker {
    match method {
        Method::Web10 => Marker::Circle,
        Method::Rdfa => Marker::Square,
        Method::Sparql => Marker::Triangle,
    }
}

/// Run the trade-off report.
pub fn run(args: &ResultArgs) -> CliResult<Value> {
    let output = &args.output;
    ensure_out_dir(output)?;
    let report = load_results(args)?;
    let server = report.observations.pivot(Metric::ServerMs)?;
    let loc = builtin::code_metrics().pivot(Metric::Loc)?;

    section(output, "CODE SIZE VS PERFORMANCE TRADE-OFF");

    let join = join_on_request_method(&server, &loc);
    let coverage = join.coverage()?;
    let rates = join.unit_rates();

    let mut charts: Vec<String> = Vec::new();

    // Scatter of LOC against server time, one trend line per engine.
    if !output.no_charts {
        let mut series = Vec::new();
        for &method in server.methods() {
            let points: Vec<ScatterPoint> = join
                .rows
                .iter()
                .filter(|row| row.method == method)
                .map(|row| ScatterPoint {
                    x: row.right,
                    y: row.left,
                    annotation: Some(row.request.to_string()),
                })
                .collect();
            if points.is_empty() {
                continue;
            }
            let trend = linear_fit(
                &points.iter().map(|p| (p.x, p.y)).collect::<Vec<_>>(),
            )
            .ok();
            if trend.is_none() {
                echo(
                    output,
                    format!(
                        "{} no trend line for {} (too few or degenerate points)",
                        "note:".yellow(),
                        method.label()
                    ),
                );
            }
            series.push(ScatterSeries {
                label: method.short_label().to_string(),
                color: style::method_color(method),
                marker: marker_for(method),
                points,
                trend,
            });
        }
        let chart = ScatterChart {
            title: "Code complexity vs performance trade-off".to_string(),
            x_desc: "Lines of code".to_string(),
            y_desc: "Server processing time (ms) - log scale".to_string(),
            log_y: true,
            series,
            size: (1200, 800),
        };
        let path = out_file(output, "loc_vs_performance_tradeoff.png");
        render_scatter(&path, &chart)?;
        chart_done(output, &path);
        charts.push("loc_vs_performance_tradeoff.png".to_string());
    }

    // Milliseconds per line of code, per request and engine.
    for (request, method, error) in &rates.excluded {
        echo(
            output,
            format!("{} efficiency at ({request}, {method}) dropped: {error}", "note:".yellow()),
        );
    }
    if !output.no_charts && !rates.rates.is_empty() {
        let series: Vec<Series> = server
            .methods()
            .iter()
            .map(|&method| Series {
                label: method.short_label().to_string(),
                color: style::method_color(method),
                values: RequestId::ALL
                    .into_iter()
                    .map(|request| rates.get(request, method))
                    .collect(),
            })
            .collect();
        let chart = GroupedBarChart {
            title: "Processing time per line of code (lower is better)".to_string(),
            x_desc: "Request".to_string(),
            y_desc: "Efficiency (ms per LOC) - log scale".to_string(),
            categories: qbench_chart::request_labels(),
            series,
            log_y: true,
            value_labels: false,
            baseline: None,
            bands: Vec::new(),
            y_max: None,
            size: (1280, 640),
        };
        let path = out_file(output, "code_efficiency_metric.png");
        render_grouped_bar(&path, &chart)?;
        chart_done(output, &path);
        charts.push("code_efficiency_metric.png".to_string());
    }

    // Average LOC against average time, per-request points dimmed behind
    // one highlighted average marker per engine.
    let mut method_stats = serde_json::Map::new();
    let mut averages = Vec::new();
    for &method in server.methods() {
        let avg_time = server.average(method)?;
        let avg_loc = loc.average(method)?;
        averages.push((method, avg_loc, avg_time));

        let efficiency = if avg_loc == 0.0 {
            None
        } else {
            Some(avg_time / avg_loc)
        };
        method_stats.insert(
            method.short_label().to_string(),
            json!({
                "avg_loc": avg_loc,
                "avg_time_ms": avg_time,
                "ms_per_loc": efficiency,
            }),
        );
    }
    if !output.no_charts {
        let mut series = Vec::new();
        for &(method, avg_loc, avg_time) in &averages {
            let cloud: Vec<ScatterPoint> = join
                .rows
                .iter()
                .filter(|row| row.method == method)
                .map(|row| ScatterPoint {
                    x: row.right,
                    y: row.left,
                    annotation: None,
                })
                .collect();
            if !cloud.is_empty() {
                series.push(ScatterSeries {
                    label: method.short_label().to_string(),
                    color: style::method_color(method),
                    marker: marker_for(method),
                    points: cloud,
                    trend: None,
                });
            }
            series.push(ScatterSeries {
                label: format!(
                    "{} avg ({avg_loc:.1} LOC, {avg_time:.2} ms)",
                    method.short_label()
                ),
                color: style::method_color_dark(method),
                marker: marker_for(method),
                points: vec![ScatterPoint {
                    x: avg_loc,
                    y: avg_time,
                    annotation: Some(method.short_label().to_string()),
                }],
                trend: None,
            });
        }
        let chart = ScatterChart {
            title: "Performance vs complexity, averages highlighted".to_string(),
            x_desc: "Average lines of code".to_string(),
            y_desc: "Average processing time (ms) - log scale".to_string(),
            log_y: true,
            series,
            size: (1200, 800),
        };
        let path = out_file(output, "pareto_frontier_analysis.png");
        render_scatter(&path, &chart)?;
        chart_done(output, &path);
        charts.push("pareto_frontier_analysis.png".to_string());
    }

    section(output, "TRADE-OFF STATISTICS");
    echo(
        output,
        format!(
            "Join coverage: {:.0}% of timing cells matched a LOC cell ({} unmatched timing, {} unmatched LOC)",
            coverage * 100.0,
            join.dropped_left(),
            join.dropped_right()
        ),
    );
    echo(output, "");
    for &(method, avg_loc, avg_time) in &averages {
        echo(
            output,
            format!("{:<10} {avg_loc:5.1} LOC avg, {avg_time:8.2} ms avg", method.short_label()),
        );
        if avg_loc == 0.0 {
            echo(output, "           efficiency: n/a (zero LOC average)");
        } else {
            echo(
                output,
                format!("           efficiency: {:.4} ms/LOC", avg_time / avg_loc),
            );
        }
    }

    // Web 1.0 is the reference point for the verdict lines.
    let web10 = averages.iter().find(|(m, _, _)| *m == Method::Web10);
    let mut verdict = serde_json::Map::new();
    if let Some(&(_, web_loc, web_time)) = web10 {
        echo(output, "");
        for &(method, avg_loc, avg_time) in &averages {
            if method == Method::Web10 {
                continue;
            }
            if web_loc == 0.0 || avg_time == 0.0 {
                echo(
                    output,
                    format!("{}: comparison n/a (zero baseline)", method.short_label()),
                );
                continue;
            }
            let more_code = (avg_loc / web_loc - 1.0) * 100.0;
            let speedup = web_time / avg_time;
            echo(
                output,
                format!(
                    "{:<10} writes {more_code:+.1}% code vs Web 1.0 and runs {speedup:.1}x its speed",
                    method.short_label()
                ),
            );
            verdict.insert(
                method.short_label().to_string(),
                json!({ "loc_vs_web10_pct": more_code, "speedup_vs_web10": speedup }),
            );
        }
    }

    Ok(json!({
        "report": "tradeoff",
        "input": args.input.display().to_string(),
        "join_coverage": coverage,
        "unmatched_timing_cells": join.dropped_left(),
        "unmatched_loc_cells": join.dropped_right(),
        "efficiency_excluded": rates
            .excluded
            .iter()
            .map(|(request, method, _)| json!([request.to_string(), method.short_label()]))
            .collect::<Vec<_>>(),
        "per_method": method_stats,
        "vs_web10": verdict,
        "charts": charts,
    }))
}
