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

//! Stacked bar charts, with optional side-by-side groups per category.

use crate::error::{ChartError, ChartResult};
use plotters::prelude::*;
use std::path::Path;

/// One stack segment: a label, a color, one value per category.
#[derive(Debug, Clone)]
pub struct StackSegment {
    /// Legend label.
    pub label: String,
    /// Segment color.
    pub color: RGBColor,
    /// One value per category; zero draws nothing.
    pub values: Vec<f64>,
}

/// A stack of segments drawn as one bar per category. Several groups render
/// side by side within each category (the combined dependency chart puts
/// one group per engine).
#[derive(Debug, Clone)]
pub struct StackedGroup {
    /// Name shown in segment legends, empty for a single-group chart.
    pub label: String,
    /// The segments, bottom to top.
    pub segments: Vec<StackSegment>,
}

/// A stacked bar chart.
#[derive(Debug, Clone)]
pub struct StackedBarChart {
    /// Chart caption.
    pub title: String,
    /// x axis description.
    pub x_desc: String,
    /// y axis description.
    pub y_desc: String,
    /// Category labels along the x axis.
    pub categories: Vec<String>,
    /// The bar groups rendered side by side per category.
    pub groups: Vec<StackedGroup>,
    /// Print each bar's total above it.
    pub total_labels: bool,
    /// Image size in pixels.
    pub size: (u32, u32),
}

/// Render a [`StackedBarChart`] to a PNG file.
///
/// # Errors
///
/// [`ChartError::EmptyChart`] when the chart has no categories or groups,
/// or [`ChartError::Draw`] on a backend failure.
pub fn render_stacked_bar(path: impl AsRef<Path>, chart: &StackedBarChart) -> ChartResult<()> {
    if chart.categories.is_empty() || chart.groups.is_empty() {
        return Err(ChartError::empty(&chart.title, "no categories or groups"));
    }

    // Tallest stack across all categories and groups sets the y range.
    let mut max_total = 0.0f64;
    let mut totals = vec![vec![0.0f64; chart.categories.len()]; chart.groups.len()];
    for (g, group) in chart.groups.iter().enumerate() {
        for segment in &group.segments {
            for (i, value) in segment.values.iter().enumerate() {
                totals[g][i] += value.max(0.0);
            }
        }
        for &total in &totals[g] {
            max_total = max_total.max(total);
        }
    }
    if max_total == 0.0 {
        return Err(ChartError::empty(&chart.title, "all stacks are empty"));
    }

    let root = BitMapBackend::new(path.as_ref(), chart.size).into_drawing_area();
    root.fill(&WHITE).map_err(ChartError::draw)?;

    let x_lo = -0.6;
    let x_hi = chart.categories.len() as f64 - 0.4;
    let categories = chart.categories.clone();
    let formatter = move |x: &f64| {
        let nearest = x.round();
        if (x - nearest).abs() < 1e-6 && nearest >= 0.0 && (nearest as usize) < categories.len()
        {
            categories[nearest as usize].clone()
        } else {
            String::new()
        }
    };

    let mut ctx = ChartBuilder::on(&root)
        .caption(&chart.title, ("sans-serif", 24))
        .margin(12)
        .x_label_area_size(42)
        .y_label_area_size(56)
        .build_cartesian_2d(x_lo..x_hi, 0.0..max_total * 1.18)
        .map_err(ChartError::draw)?;
    ctx.configure_mesh()
        .disable_x_mesh()
        .x_labels(chart.categories.len())
        .x_label_formatter(&formatter)
        .x_desc(&chart.x_desc)
        .y_desc(&chart.y_desc)
        .draw()
        .map_err(ChartError::draw)?;

    let cluster = 0.8;
    let bar_width = cluster / chart.groups.len() as f64;
    for (g, group) in chart.groups.iter().enumerate() {
        let offset = -cluster / 2.0 + g as f64 * bar_width;
        let mut bottoms = vec![0.0f64; chart.categories.len()];
        for segment in &group.segments {
            let spans: Vec<(usize, f64, f64)> = segment
                .values
                .iter()
                .enumerate()
                .filter(|(_, v)| **v > 0.0)
                .map(|(i, &value)| (i, bottoms[i], value))
                .collect();
            let color = segment.color;
            let label = if group.label.is_empty() {
                segment.label.clone()
            } else {
                format!("{} - {}", group.label, segment.label)
            };
            ctx.draw_series(spans.iter().map(|&(i, bottom, value)| {
                let x0 = i as f64 + offset;
                Rectangle::new(
                    [(x0, bottom), (x0 + bar_width * 0.92, bottom + value)],
                    color.mix(0.85).filled(),
                )
            }))
            .map_err(ChartError::draw)?
            .label(label)
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
            });
            for (i, _, value) in spans {
                bottoms[i] += value;
            }
        }

        if chart.total_labels {
            ctx.draw_series(totals[g].iter().enumerate().filter_map(|(i, &total)| {
                if total == 0.0 {
                    return None;
                }
                let x = i as f64 + offset + bar_width / 2.0;
                Some(
                    EmptyElement::at((x, total))
                        + Text::new(format!("{total:.0}"), (-8, -14), ("sans-serif", 13)),
                )
            }))
            .map_err(ChartError::draw)?;
        }
    }

    ctx.configure_series_labels()
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .draw()
        .map_err(ChartError::draw)?;

    root.present().map_err(ChartError::draw)
}
