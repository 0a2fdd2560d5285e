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

//! Annotated heatmaps.

use crate::error::{ChartError, ChartResult};
use crate::style;
use plotters::prelude::*;
use qbench_core::GroupedTable;
use std::path::Path;

/// The color ramp of a heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatPalette {
    /// Pale yellow to deep red; high values run hot. Used for timings and
    /// complexity, where high is bad.
    YellowRed,
    /// Red through yellow to green; high values turn green. Used for
    /// robustness, where high is good.
    RedGreen,
}

impl HeatPalette {
    fn color(self, t: f64) -> RGBColor {
        match self {
            Self::YellowRed => style::heat_yellow_red(t),
            Self::RedGreen => style::heat_red_green(t),
        }
    }
}

/// An annotated grid of values: one row per y label, one column per x label.
///
/// Cells hold `Option<f64>`; a `None` renders as a grey "n/a" cell so a
/// missing measurement can never be mistaken for a low value.
#[derive(Debug, Clone)]
pub struct HeatmapChart {
    /// Chart caption.
    pub title: String,
    /// Column labels (engines).
    pub x_labels: Vec<String>,
    /// Row labels (requests), top to bottom.
    pub y_labels: Vec<String>,
    /// `cells[row][column]`, aligned with the labels.
    pub cells: Vec<Vec<Option<f64>>>,
    /// Color ramp.
    pub palette: HeatPalette,
    /// Color by `log10(value + 1)` instead of the raw value; annotations
    /// still print the real value. Keeps one slow outlier from washing out
    /// the rest of the map.
    pub log_color: bool,
    /// Fixed color-scale maximum; defaults to the data maximum.
    pub scale_max: Option<f64>,
    /// Image size in pixels.
    pub size: (u32, u32),
}

impl HeatmapChart {
    /// A heatmap over the canonical axes of a pivoted table: engines as
    /// columns, requests as rows.
    pub fn from_table(title: impl Into<String>, table: &GroupedTable) -> Self {
        let methods = table.methods().to_vec();
        let x_labels = methods.iter().map(|m| m.short_label().to_string()).collect();
        let mut y_labels = Vec::new();
        let mut cells = Vec::new();
        for request in qbench_core::RequestId::ALL {
            y_labels.push(request.label().to_string());
            cells.push(
                methods
                    .iter()
                    .map(|&method| table.get(request, method))
                    .collect(),
            );
        }
        Self {
            title: title.into(),
            x_labels,
            y_labels,
            cells,
            palette: HeatPalette::YellowRed,
            log_color: false,
            scale_max: None,
            size: (900, 760),
        }
    }
}

/// Render a [`HeatmapChart`] to a PNG file.
///
/// # Errors
///
/// [`ChartError::EmptyChart`] when every cell is a gap, or
/// [`ChartError::Draw`] on a backend failure.
pub fn render_heatmap(path: impl AsRef<Path>, chart: &HeatmapChart) -> ChartResult<()> {
    let scale = |v: f64| if chart.log_color { (v + 1.0).log10() } else { v };
    let present: Vec<f64> = chart
        .cells
        .iter()
        .flatten()
        .flatten()
        .copied()
        .collect();
    if present.is_empty() {
        return Err(ChartError::empty(&chart.title, "every cell is a no-data gap"));
    }
    let raw_max = chart
        .scale_max
        .unwrap_or(present.iter().copied().fold(f64::NEG_INFINITY, f64::max));
    let scale_max = scale(raw_max).max(f64::MIN_POSITIVE);

    let root = BitMapBackend::new(path.as_ref(), chart.size).into_drawing_area();
    root.fill(&WHITE).map_err(ChartError::draw)?;

    let columns = chart.x_labels.len();
    let rows = chart.y_labels.len();
    let x_labels = chart.x_labels.clone();
    let y_labels = chart.y_labels.clone();
    let x_formatter = move |x: &f64| {
        let nearest = x.round();
        if (x - nearest).abs() < 1e-6 && nearest >= 0.0 && (nearest as usize) < x_labels.len() {
            x_labels[nearest as usize].clone()
        } else {
            String::new()
        }
    };
    // Row 0 renders at the top, as in a table.
    let y_formatter = move |y: &f64| {
        let nearest = y.round();
        if (y - nearest).abs() < 1e-6 && nearest >= 0.0 && (nearest as usize) < y_labels.len() {
            y_labels[y_labels.len() - 1 - nearest as usize].clone()
        } else {
            String::new()
        }
    };

    let mut ctx = ChartBuilder::on(&root)
        .caption(&chart.title, ("sans-serif", 24))
        .margin(12)
        .x_label_area_size(42)
        .y_label_area_size(52)
        .build_cartesian_2d(-0.5..columns as f64 - 0.5, -0.5..rows as f64 - 0.5)
        .map_err(ChartError::draw)?;
    ctx.configure_mesh()
        .disable_mesh()
        .x_labels(columns)
        .y_labels(rows)
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter)
        .draw()
        .map_err(ChartError::draw)?;

    for (row, row_cells) in chart.cells.iter().enumerate() {
        // Flip so the first row label sits at the top of the map.
        let y = (rows - 1 - row) as f64;
        for (column, cell) in row_cells.iter().enumerate() {
            let x = column as f64;
            let (color, annotation) = match cell {
                Some(value) => (
                    chart.palette.color(scale(*value) / scale_max),
                    if value.fract() == 0.0 {
                        format!("{value:.0}")
                    } else {
                        format!("{value:.1}")
                    },
                ),
                None => (style::NO_DATA, "n/a".to_string()),
            };
            ctx.draw_series(std::iter::once(Rectangle::new(
                [(x - 0.48, y - 0.48), (x + 0.48, y + 0.48)],
                color.filled(),
            )))
            .map_err(ChartError::draw)?;
            ctx.draw_series(std::iter::once(
                EmptyElement::at((x, y))
                    + Text::new(annotation, (-10, -7), ("sans-serif", 15)),
            ))
            .map_err(ChartError::draw)?;
        }
    }

    root.present().map_err(ChartError::draw)
}
