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

//! Distribution box plots.

use crate::error::{ChartError, ChartResult};
use plotters::prelude::*;
use std::path::Path;

/// One distribution to draw: a label, a color, and the raw values.
#[derive(Debug, Clone)]
pub struct BoxGroup {
    /// x axis label.
    pub label: String,
    /// Box color.
    pub color: RGBColor,
    /// The raw data points (quartiles are computed here).
    pub values: Vec<f64>,
}

/// A box plot: one box-and-whiskers per group.
#[derive(Debug, Clone)]
pub struct BoxPlotChart {
    /// Chart caption.
    pub title: String,
    /// y axis description.
    pub y_desc: String,
    /// The distributions, left to right.
    pub groups: Vec<BoxGroup>,
    /// Image size in pixels.
    pub size: (u32, u32),
}

/// Render a [`BoxPlotChart`] to a PNG file.
///
/// # Errors
///
/// [`ChartError::EmptyChart`] when a group holds no values, or
/// [`ChartError::Draw`] on a backend failure.
pub fn render_box_plot(path: impl AsRef<Path>, chart: &BoxPlotChart) -> ChartResult<()> {
    if chart.groups.is_empty() {
        return Err(ChartError::empty(&chart.title, "no groups to draw"));
    }
    for group in &chart.groups {
        if group.values.is_empty() {
            return Err(ChartError::empty(
                &chart.title,
                format!("group '{}' holds no values", group.label),
            ));
        }
    }
    let max = chart
        .groups
        .iter()
        .flat_map(|g| g.values.iter())
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let min = chart
        .groups
        .iter()
        .flat_map(|g| g.values.iter())
        .copied()
        .fold(f64::INFINITY, f64::min);
    let pad = ((max - min) * 0.15).max(1.0);

    let root = BitMapBackend::new(path.as_ref(), chart.size).into_drawing_area();
    root.fill(&WHITE).map_err(ChartError::draw)?;

    let labels: Vec<&str> = chart.groups.iter().map(|g| g.label.as_str()).collect();
    let mut ctx = ChartBuilder::on(&root)
        .caption(&chart.title, ("sans-serif", 24))
        .margin(12)
        .x_label_area_size(42)
        .y_label_area_size(56)
        .build_cartesian_2d(
            labels[..].into_segmented(),
            (min - pad).min(0.0) as f32..(max + pad) as f32,
        )
        .map_err(ChartError::draw)?;
    ctx.configure_mesh()
        .disable_x_mesh()
        .y_desc(&chart.y_desc)
        .draw()
        .map_err(ChartError::draw)?;

    for (group, label) in chart.groups.iter().zip(&labels) {
        let quartiles = Quartiles::new(&group.values);
        ctx.draw_series(std::iter::once(
            Boxplot::new_vertical(SegmentValue::CenterOf(label), &quartiles)
                .width(28)
                .style(group.color),
        ))
        .map_err(ChartError::draw)?;
    }

    root.present().map_err(ChartError::draw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style;
    use qbench_core::Method;

    #[test]
    fn test_render_box_plot_writes_png() {
        let chart = BoxPlotChart {
            title: "Complexity distribution".into(),
            y_desc: "Branching statements".into(),
            groups: vec![
                BoxGroup {
                    label: "Web 1.0".into(),
                    color: style::method_color(Method::Web10),
                    values: vec![1.0, 1.0, 1.0, 5.0, 4.0, 3.0, 2.0, 3.0, 5.0, 9.0],
                },
                BoxGroup {
                    label: "SPARQL".into(),
                    color: style::method_color(Method::Sparql),
                    values: vec![1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 3.0, 5.0],
                },
            ],
            size: (800, 560),
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("box.png");
        render_box_plot(&path, &chart).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_empty_group_rejected() {
        let chart = BoxPlotChart {
            title: "empty".into(),
            y_desc: "y".into(),
            groups: vec![BoxGroup {
                label: "none".into(),
                color: style::NO_DATA,
                values: Vec::new(),
            }],
            size: (300, 300),
        };
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            render_box_plot(dir.path().join("b.png"), &chart),
            Err(ChartError::EmptyChart { .. })
        ));
    }
}
