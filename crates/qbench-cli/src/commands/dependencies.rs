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

//! Combined dependency report: structural and text couplings in one
//! stacked chart, one bar group per scraping engine.

use super::{chart_done, echo, ensure_out_dir, out_file, section};
use crate::cli::OutputArgs;
use crate::error::CliResult;
use qbench_chart::{
    render_stacked_bar, style, StackSegment, StackedBarChart, StackedGroup,
};
use qbench_core::{builtin, Metric, RequestId};
use serde_json::{json, Value};

/// Run the combined dependencies report.
pub fn run(output: &OutputArgs) -> CliResult<Value> {
    ensure_out_dir(output)?;
    let code = builtin::code_metrics();
    let structural = code.pivot(Metric::StructuralDeps)?;
    let text = code.pivot(Metric::TextDeps)?;

    section(output, "COMBINED DEPENDENCY ANALYSIS");

    let groups: Vec<StackedGroup> = structural
        .methods()
        .iter()
        .map(|&method| StackedGroup {
            label: method.short_label().to_string(),
            segments: vec![
                StackSegment {
                    label: "structural".to_string(),
                    color: style::method_color(method),
                    values: RequestId::ALL
                        .into_iter()
                        .map(|request| structural.get(request, method).unwrap_or(0.0))
                        .collect(),
                },
                StackSegment {
                    label: "text".to_string(),
                    color: style::method_color_dark(method),
                    values: RequestId::ALL
                        .into_iter()
                        .map(|request| text.get(request, method).unwrap_or(0.0))
                        .collect(),
                },
            ],
        })
        .collect();

    let mut charts: Vec<String> = Vec::new();
    if !output.no_charts {
        let chart = StackedBarChart {
            title: "Structural + text dependencies per request".to_string(),
            x_desc: "Request".to_string(),
            y_desc: "Dependency count".to_string(),
            categories: qbench_chart::request_labels(),
            groups,
            total_labels: true,
            size: (1400, 680),
        };
        let path = out_file(output, "combined_dependencies.png");
        render_stacked_bar(&path, &chart)?;
        chart_done(output, &path);
        charts.push("combined_dependencies.png".to_string());
    }

    let mut totals = serde_json::Map::new();
    for &method in structural.methods() {
        let structural_total = structural.total(method);
        let text_total = text.total(method);
        echo(
            output,
            format!(
                "{:<10} {structural_total:.0} structural + {text_total:.0} text = {:.0} total couplings",
                method.short_label(),
                structural_total + text_total
            ),
        );
        totals.insert(
            method.short_label().to_string(),
            json!({
                "structural": structural_total,
                "text": text_total,
                "total": structural_total + text_total,
            }),
        );
    }

    Ok(json!({
        "report": "dependencies",
        "totals": totals,
        "charts": charts,
    }))
}
