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

//! Share-of-total pie charts.

use crate::error::{ChartError, ChartResult};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/// One pie slice.
#[derive(Debug, Clone)]
pub struct Slice {
    /// Slice label.
    pub label: String,
    /// Slice size (any non-negative weight; shares are computed from the
    /// total).
    pub size: f64,
    /// Slice color.
    pub color: RGBColor,
}

/// A pie chart of labeled slices.
#[derive(Debug, Clone)]
pub struct PieChart {
    /// Title above the pie.
    pub title: String,
    /// The slices; zero-sized ones are dropped before drawing.
    pub slices: Vec<Slice>,
}

/// Render one [`PieChart`] to a PNG file.
pub fn render_pie(path: impl AsRef<Path>, chart: &PieChart, size: (u32, u32)) -> ChartResult<()> {
    let root = BitMapBackend::new(path.as_ref(), size).into_drawing_area();
    root.fill(&WHITE).map_err(ChartError::draw)?;
    draw_pie(&root, chart)?;
    root.present().map_err(ChartError::draw)
}

/// Render several pies side by side in one image (one per engine in the
/// severity report).
pub fn render_pie_panel(
    path: impl AsRef<Path>,
    charts: &[PieChart],
    size: (u32, u32),
) -> ChartResult<()> {
    if charts.is_empty() {
        return Err(ChartError::empty("pie panel", "no pies given"));
    }
    let root = BitMapBackend::new(path.as_ref(), size).into_drawing_area();
    root.fill(&WHITE).map_err(ChartError::draw)?;
    let areas = root.split_evenly((1, charts.len()));
    for (area, chart) in areas.iter().zip(charts) {
        draw_pie(area, chart)?;
    }
    root.present().map_err(ChartError::draw)
}

fn draw_pie<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    chart: &PieChart,
) -> ChartResult<()> {
    let drawable: Vec<&Slice> = chart.slices.iter().filter(|s| s.size > 0.0).collect();
    if drawable.is_empty() {
        return Err(ChartError::empty(&chart.title, "every slice is zero"));
    }

    let area = area
        .titled(&chart.title, ("sans-serif", 20))
        .map_err(ChartError::draw)?;
    let (width, height) = area.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = (width.min(height) as f64) * 0.34;

    let sizes: Vec<f64> = drawable.iter().map(|s| s.size).collect();
    let colors: Vec<RGBColor> = drawable.iter().map(|s| s.color).collect();
    let labels: Vec<String> = drawable.iter().map(|s| s.label.clone()).collect();

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(-90.0);
    pie.label_style(("sans-serif", 16).into_font());
    pie.percentages(("sans-serif", 14).into_font().color(&BLACK));
    area.draw(&pie).map_err(ChartError::draw)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style;
    use qbench_core::Severity;

    fn severity_chart() -> PieChart {
        PieChart {
            title: "Web 1.0 risk".into(),
            slices: vec![
                Slice {
                    label: "CRITICAL".into(),
                    size: 3.0,
                    color: style::severity_color(Severity::Critical),
                },
                Slice {
                    label: "HIGH".into(),
                    size: 7.0,
                    color: style::severity_color(Severity::High),
                },
                Slice {
                    label: "LOW".into(),
                    size: 0.0,
                    color: style::severity_color(Severity::Low),
                },
            ],
        }
    }

    #[test]
    fn test_render_pie_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pie.png");
        render_pie(&path, &severity_chart(), (600, 600)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_render_pie_panel() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pies.png");
        render_pie_panel(&path, &[severity_chart(), severity_chart()], (1200, 620)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_all_zero_slices_rejected() {
        let chart = PieChart {
            title: "empty".into(),
            slices: vec![Slice {
                label: "none".into(),
                size: 0.0,
                color: style::NO_DATA,
            }],
        };
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            render_pie(dir.path().join("p.png"), &chart, (300, 300)),
            Err(ChartError::EmptyChart { .. })
        ));
    }
}
