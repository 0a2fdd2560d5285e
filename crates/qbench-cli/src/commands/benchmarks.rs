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

//! Execution-time comparison report.
//!
//! Renders the per-request timing charts (log scale where one slow request
//! would flatten the rest), the per-metric averages, the server-time
//! heatmap and variability chart, and the speedup-versus-baseline chart,
//! then prints the timing summary.

use super::{chart_done, echo, ensure_out_dir, load_results, out_file, ratio_series, section};
use crate::cli::ResultArgs;
use crate::error::CliResult;
use colored::Colorize;
use qbench_chart::{
    render_grouped_bar, render_heatmap, render_value_bar_panel, style, Baseline,
    GroupedBarChart, HeatmapChart, ValueBar, ValueBarChart,
};
use qbench_core::{GroupedTable, Method, Metric, RequestId};
use serde_json::{json, Value};

const TIMING_CHARTS: [(Metric, &str, bool); 3] = [
    (Metric::ServerMs, "benchmark_server_time.png", true),
    (Metric::ClientMs, "benchmark_client_time.png", true),
    (Metric::RenderMs, "benchmark_render_time.png", false),
];

/// Run the benchmarks report.
pub fn run(args: &ResultArgs) -> CliResult<Value> {
    let output = &args.output;
    ensure_out_dir(output)?;
    let report = load_results(args)?;
    let observations = &report.observations;

    section(output, "BENCHMARK TIMING COMPARISON");

    let mut charts: Vec<String> = Vec::new();
    let mut metrics_json = serde_json::Map::new();

    for (metric, file, log_y) in TIMING_CHARTS {
        let table = observations.pivot(metric)?;

        if !output.no_charts {
            let mut chart = GroupedBarChart::from_table(
                format!("{} by request", metric.description()),
                if log_y {
                    format!("{} - log scale", metric.description())
                } else {
                    metric.description().to_string()
                },
                &table,
            );
            chart.log_y = log_y;
            let path = out_file(output, file);
            render_grouped_bar(&path, &chart)?;
            chart_done(output, &path);
            charts.push(file.to_string());
        }

        metrics_json.insert(metric.name().to_string(), summarize_metric(output, &table)?);
    }

    // Cross-request averages, one panel per metric.
    let average_panels = TIMING_CHARTS
        .iter()
        .map(|(metric, _, _)| {
            let table = observations.pivot(*metric)?;
            let mut bars = Vec::new();
            for &method in table.methods() {
                bars.push(ValueBar {
                    label: method.short_label().to_string(),
                    color: style::method_color(method),
                    value: table.average(method)?,
                });
            }
            Ok(ValueBarChart::new(
                metric.description().to_string(),
                "Mean over requests".to_string(),
                bars,
            ))
        })
        .collect::<CliResult<Vec<_>>>()?;
    if !output.no_charts {
        let path = out_file(output, "benchmark_averages.png");
        render_value_bar_panel(&path, &average_panels, (1680, 560))?;
        chart_done(output, &path);
        charts.push("benchmark_averages.png".to_string());
    }

    // Server-time heatmap, log colored so R9 does not wash out the map.
    let server = observations.pivot(Metric::ServerMs)?;
    if !output.no_charts {
        let mut heatmap = HeatmapChart::from_table(
            "Server processing time heatmap (ms, log color scale)",
            &server,
        );
        heatmap.log_color = true;
        let path = out_file(output, "benchmark_heatmap.png");
        render_heatmap(&path, &heatmap)?;
        chart_done(output, &path);
        charts.push("benchmark_heatmap.png".to_string());
    }

    // Run-to-run variability of the server timings.
    let spread = observations.pivot_stdev(Metric::ServerMs)?;
    if !output.no_charts && spread.cell_count() > 0 {
        let chart = GroupedBarChart::from_table(
            "Server time consistency (standard deviation per request)",
            "Standard deviation (ms)",
            &spread,
        );
        let path = out_file(output, "benchmark_variability.png");
        render_grouped_bar(&path, &chart)?;
        chart_done(output, &path);
        charts.push("benchmark_variability.png".to_string());
    }

    // Speedup relative to the Web 1.0 baseline.
    let speedups: Vec<_> = [Method::Rdfa, Method::Sparql]
        .into_iter()
        .map(|target| server.relative_ratio(Method::Web10, target))
        .collect();
    let mut speedup_json = serde_json::Map::new();
    for ratio in &speedups {
        let per_request: serde_json::Map<String, Value> = ratio
            .iter()
            .map(|(request, value)| (request.to_string(), json!(value)))
            .collect();
        speedup_json.insert(ratio.target.short_label().to_string(), Value::Object(per_request));
        for (request, error) in &ratio.excluded {
            echo(
                output,
                format!("{} speedup at {request} dropped: {error}", "note:".yellow()),
            );
        }
    }
    let excluded: Vec<String> = speedups
        .iter()
        .flat_map(|r| r.excluded.iter().map(|(req, _)| req.to_string()))
        .collect();
    if !output.no_charts && speedups.iter().any(|r| !r.is_empty()) {
        let chart = GroupedBarChart {
            title: "Speedup relative to Web 1.0 (>1 = faster)".to_string(),
            x_desc: "Request".to_string(),
            y_desc: "Speedup factor - log scale".to_string(),
            categories: qbench_chart::request_labels(),
            series: speedups.iter().map(ratio_series).collect(),
            log_y: true,
            value_labels: true,
            baseline: Some(Baseline {
                value: 1.0,
                label: "Web 1.0 reference".to_string(),
                color: style::method_color(Method::Web10),
            }),
            bands: Vec::new(),
            y_max: None,
            size: (1280, 640),
        };
        let path = out_file(output, "benchmark_speedup.png");
        render_grouped_bar(&path, &chart)?;
        chart_done(output, &path);
        charts.push("benchmark_speedup.png".to_string());
    }

    echo(output, "");
    echo(output, "All benchmark charts generated.".green().to_string());

    Ok(json!({
        "report": "benchmarks",
        "input": args.input.display().to_string(),
        "rows": report.row_count(),
        "skipped_rows": report.skipped_count(),
        "metrics": metrics_json,
        "speedup_vs_web10": speedup_json,
        "speedup_excluded": excluded,
        "charts": charts,
    }))
}

/// Per-metric averages, ranking, and slowest requests.
fn summarize_metric(
    output: &crate::cli::OutputArgs,
    table: &GroupedTable,
) -> CliResult<Value> {
    section(output, &format!("{} summary", table.metric().description()));

    let ranked = table.rank_methods(GroupedTable::average)?;
    for (method, average) in &ranked {
        echo(output, format!("  {:<16} {average:>9.2} ms (mean)", method.label()));
    }

    let mut slowdown = None;
    if let (Some((fastest, fast_avg)), Some((slowest, slow_avg))) =
        (ranked.first(), ranked.last())
    {
        echo(output, "");
        echo(output, format!("  Fastest: {} ({fast_avg:.2} ms)", fastest.label()));
        echo(output, format!("  Slowest: {} ({slow_avg:.2} ms)", slowest.label()));
        if *fast_avg == 0.0 {
            // An all-zero baseline makes the ratio meaningless; say so
            // instead of printing infinity.
            echo(output, "  Spread: n/a (fastest mean is zero)");
        } else {
            let ratio = slow_avg / fast_avg;
            slowdown = Some(ratio);
            echo(output, format!("  Spread: {ratio:.2}x slower"));
        }
    }

    let mut slowest_requests = serde_json::Map::new();
    for &method in table.methods() {
        let mut cells: Vec<(RequestId, f64)> = RequestId::ALL
            .into_iter()
            .filter_map(|request| table.get(request, method).map(|v| (request, v)))
            .collect();
        cells.sort_by(|a, b| b.1.total_cmp(&a.1));
        cells.truncate(3);
        echo(output, "");
        echo(output, format!("  Slowest requests for {}:", method.label()));
        for (request, value) in &cells {
            echo(output, format!("    {request}: {value:.2} ms"));
        }
        slowest_requests.insert(
            method.short_label().to_string(),
            json!(cells
                .iter()
                .map(|(request, value)| json!([request.to_string(), value]))
                .collect::<Vec<_>>()),
        );
    }
    echo(output, "");

    Ok(json!({
        "averages": ranked
            .iter()
            .map(|(method, avg)| (method.short_label().to_string(), json!(avg)))
            .collect::<serde_json::Map<_, _>>(),
        "fastest": ranked.first().map(|(m, _)| m.short_label()),
        "slowest": ranked.last().map(|(m, _)| m.short_label()),
        "slowdown_ratio": slowdown,
        "slowest_requests": slowest_requests,
    }))
}
