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

//! Grouped and single-value bar charts.

use crate::error::{ChartError, ChartResult};
use crate::style;
use plotters::coord::{CoordTranslate, Shift};
use plotters::prelude::*;
use qbench_core::{GroupedTable, RequestId};
use std::path::Path;

/// One bar series: a label, a color, and one optional value per category.
///
/// `None` is the "no data" marker — the bar is simply absent, which keeps a
/// missing measurement visually distinct from a zero-height bar.
#[derive(Debug, Clone)]
pub struct Series {
    /// Legend label.
    pub label: String,
    /// Bar color.
    pub color: RGBColor,
    /// One entry per category, `None` where no data was recorded.
    pub values: Vec<Option<f64>>,
}

/// A horizontal reference line with a legend entry.
#[derive(Debug, Clone)]
pub struct Baseline {
    /// The y value of the line.
    pub value: f64,
    /// Legend label.
    pub label: String,
    /// Line color.
    pub color: RGBColor,
}

/// A shaded horizontal band (e.g. a risk zone).
#[derive(Debug, Clone)]
pub struct Band {
    /// Lower edge.
    pub from: f64,
    /// Upper edge.
    pub to: f64,
    /// Fill color (drawn at low opacity).
    pub color: RGBColor,
}

/// A clustered bar chart: one cluster per category, one bar per series.
#[derive(Debug, Clone)]
pub struct GroupedBarChart {
    /// Chart caption.
    pub title: String,
    /// x axis description.
    pub x_desc: String,
    /// y axis description.
    pub y_desc: String,
    /// Cluster labels along the x axis.
    pub categories: Vec<String>,
    /// The bar series.
    pub series: Vec<Series>,
    /// Render the y axis logarithmically (positive values only).
    pub log_y: bool,
    /// Print each bar's value above it.
    pub value_labels: bool,
    /// Optional horizontal reference line.
    pub baseline: Option<Baseline>,
    /// Optional shaded zones behind the bars.
    pub bands: Vec<Band>,
    /// Optional fixed y maximum for linear axes (e.g. 10 for scores).
    pub y_max: Option<f64>,
    /// Image size in pixels.
    pub size: (u32, u32),
}

impl GroupedBarChart {
    /// A chart over the canonical request axis with one series per method
    /// column of `table`, in the shared palette.
    pub fn from_table(
        title: impl Into<String>,
        y_desc: impl Into<String>,
        table: &GroupedTable,
    ) -> Self {
        let series = table
            .methods()
            .iter()
            .map(|&method| Series {
                label: method.label().to_string(),
                color: style::method_color(method),
                values: table
                    .column(method)
                    .into_iter()
                    .map(|(_, value)| value)
                    .collect(),
            })
            .collect();
        Self {
            title: title.into(),
            x_desc: "Request".to_string(),
            y_desc: y_desc.into(),
            categories: request_labels(),
            series,
            log_y: false,
            value_labels: false,
            baseline: None,
            bands: Vec::new(),
            y_max: None,
            size: (1280, 640),
        }
    }
}

/// The canonical request axis as category labels.
pub fn request_labels() -> Vec<String> {
    RequestId::ALL.iter().map(|r| r.label().to_string()).collect()
}

/// Render a [`GroupedBarChart`] to a PNG file.
///
/// # Errors
///
/// [`ChartError::EmptyChart`] when no series holds a drawable value, or
/// [`ChartError::Draw`] on a backend failure.
pub fn render_grouped_bar(path: impl AsRef<Path>, chart: &GroupedBarChart) -> ChartResult<()> {
    let drawable: Vec<f64> = chart
        .series
        .iter()
        .flat_map(|s| s.values.iter().flatten().copied())
        .filter(|v| !chart.log_y || *v > 0.0)
        .collect();
    if drawable.is_empty() {
        return Err(ChartError::empty(&chart.title, "every cell is a no-data gap"));
    }
    let max = drawable.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = drawable.iter().copied().fold(f64::INFINITY, f64::min);

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

    if chart.log_y {
        let y_lo = (min * 0.5).max(1e-3);
        let y_hi = max * 1.6;
        let mut ctx = ChartBuilder::on(&root)
            .caption(&chart.title, ("sans-serif", 24))
            .margin(12)
            .x_label_area_size(42)
            .y_label_area_size(64)
            .build_cartesian_2d(x_lo..x_hi, (y_lo..y_hi).log_scale())
            .map_err(ChartError::draw)?;
        ctx.configure_mesh()
            .disable_x_mesh()
            .x_labels(chart.categories.len())
            .x_label_formatter(&formatter)
            .x_desc(&chart.x_desc)
            .y_desc(&chart.y_desc)
            .draw()
            .map_err(ChartError::draw)?;
        draw_grouped(&mut ctx, chart, y_lo, x_lo, x_hi)?;
        finish_legend(&mut ctx)?;
    } else {
        let y_lo = if min < 0.0 { min * 1.15 } else { 0.0 };
        let y_hi = chart
            .y_max
            .unwrap_or(if max > 0.0 { max * 1.15 } else { 1.0 });
        let mut ctx = ChartBuilder::on(&root)
            .caption(&chart.title, ("sans-serif", 24))
            .margin(12)
            .x_label_area_size(42)
            .y_label_area_size(64)
            .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
            .map_err(ChartError::draw)?;
        ctx.configure_mesh()
            .disable_x_mesh()
            .x_labels(chart.categories.len())
            .x_label_formatter(&formatter)
            .x_desc(&chart.x_desc)
            .y_desc(&chart.y_desc)
            .draw()
            .map_err(ChartError::draw)?;
        draw_grouped(&mut ctx, chart, 0.0, x_lo, x_hi)?;
        finish_legend(&mut ctx)?;
    }

    root.present().map_err(ChartError::draw)
}

fn draw_grouped<'a, DB, CT>(
    ctx: &mut ChartContext<'a, DB, CT>,
    chart: &GroupedBarChart,
    base: f64,
    x_lo: f64,
    x_hi: f64,
) -> ChartResult<()>
where
    DB: DrawingBackend + 'a,
    CT: CoordTranslate<From = (f64, f64)>,
{
    for band in &chart.bands {
        // On a log axis the band edges must stay above the range floor.
        let from = if chart.log_y { band.from.max(base) } else { band.from };
        let to = if chart.log_y { band.to.max(base) } else { band.to };
        ctx.draw_series(std::iter::once(Rectangle::new(
            [(x_lo, from), (x_hi, to)],
            band.color.mix(0.15).filled(),
        )))
        .map_err(ChartError::draw)?;
    }

    let cluster = 0.8;
    let bar_width = cluster / chart.series.len() as f64;
    for (series_index, series) in chart.series.iter().enumerate() {
        let offset = -cluster / 2.0 + series_index as f64 * bar_width;
        let bars = series.values.iter().enumerate().filter_map(|(i, value)| {
            let value = (*value)?;
            if chart.log_y && value <= 0.0 {
                return None;
            }
            let x0 = i as f64 + offset;
            Some(Rectangle::new(
                [(x0, base), (x0 + bar_width * 0.92, value)],
                series.color.mix(0.85).filled(),
            ))
        });
        let color = series.color;
        ctx.draw_series(bars)
            .map_err(ChartError::draw)?
            .label(series.label.as_str())
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
            });

        if chart.value_labels {
            let labels = series.values.iter().enumerate().filter_map(|(i, value)| {
                let value = (*value)?;
                if chart.log_y && value <= 0.0 {
                    return None;
                }
                let x = i as f64 + offset + bar_width / 2.0;
                let shift = if value < 0.0 { 4 } else { -12 };
                Some(
                    EmptyElement::at((x, value))
                        + Text::new(format_value(value), (-8, shift), ("sans-serif", 11)),
                )
            });
            ctx.draw_series(labels).map_err(ChartError::draw)?;
        }
    }

    if let Some(baseline) = &chart.baseline {
        ctx.draw_series(LineSeries::new(
            vec![(x_lo, baseline.value), (x_hi, baseline.value)],
            baseline.color.stroke_width(2),
        ))
        .map_err(ChartError::draw)?
        .label(baseline.label.as_str())
        .legend({
            let color = baseline.color;
            move |(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], color.stroke_width(2))
        });
    }
    Ok(())
}

fn finish_legend<'a, DB, CT>(ctx: &mut ChartContext<'a, DB, CT>) -> ChartResult<()>
where
    DB: DrawingBackend + 'a,
    CT: CoordTranslate<From = (f64, f64)>,
{
    ctx.configure_series_labels()
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()
        .map_err(ChartError::draw)
}

fn format_value(value: f64) -> String {
    if value.abs() >= 100.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

/// One labeled bar with its own color.
#[derive(Debug, Clone)]
pub struct ValueBar {
    /// x axis label.
    pub label: String,
    /// Bar color.
    pub color: RGBColor,
    /// Bar height.
    pub value: f64,
}

/// A single-series bar chart: one colored bar per labeled entry, used for
/// per-method averages and totals.
#[derive(Debug, Clone)]
pub struct ValueBarChart {
    /// Chart caption.
    pub title: String,
    /// y axis description.
    pub y_desc: String,
    /// The bars, left to right.
    pub bars: Vec<ValueBar>,
    /// Optional horizontal reference line (e.g. overall average).
    pub reference: Option<Baseline>,
    /// Optional fixed y maximum (e.g. 10 for robustness scores).
    pub y_max: Option<f64>,
    /// Optional shaded zones behind the bars.
    pub bands: Vec<Band>,
    /// Image size in pixels.
    pub size: (u32, u32),
}

impl ValueBarChart {
    /// A chart with the usual defaults.
    pub fn new(title: impl Into<String>, y_desc: impl Into<String>, bars: Vec<ValueBar>) -> Self {
        Self {
            title: title.into(),
            y_desc: y_desc.into(),
            bars,
            reference: None,
            y_max: None,
            bands: Vec::new(),
            size: (900, 640),
        }
    }
}

/// Render a [`ValueBarChart`] to a PNG file.
pub fn render_value_bars(path: impl AsRef<Path>, chart: &ValueBarChart) -> ChartResult<()> {
    let root = BitMapBackend::new(path.as_ref(), chart.size).into_drawing_area();
    root.fill(&WHITE).map_err(ChartError::draw)?;
    draw_value_bars(&root, chart)?;
    root.present().map_err(ChartError::draw)
}

/// Render several [`ValueBarChart`]s side by side in one image, the layout
/// the averages overview uses.
pub fn render_value_bar_panel(
    path: impl AsRef<Path>,
    panels: &[ValueBarChart],
    size: (u32, u32),
) -> ChartResult<()> {
    if panels.is_empty() {
        return Err(ChartError::empty("panel", "no panels given"));
    }
    let root = BitMapBackend::new(path.as_ref(), size).into_drawing_area();
    root.fill(&WHITE).map_err(ChartError::draw)?;
    let areas = root.split_evenly((1, panels.len()));
    for (area, panel) in areas.iter().zip(panels) {
        draw_value_bars(area, panel)?;
    }
    root.present().map_err(ChartError::draw)
}

fn draw_value_bars<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    chart: &ValueBarChart,
) -> ChartResult<()> {
    if chart.bars.is_empty() {
        return Err(ChartError::empty(&chart.title, "no bars to draw"));
    }
    let data_max = chart
        .bars
        .iter()
        .map(|b| b.value)
        .fold(f64::NEG_INFINITY, f64::max);
    let y_hi = chart.y_max.unwrap_or(if data_max > 0.0 {
        data_max * 1.2
    } else {
        1.0
    });

    let x_lo = -0.6;
    let x_hi = chart.bars.len() as f64 - 0.4;
    let labels: Vec<String> = chart.bars.iter().map(|b| b.label.clone()).collect();
    let formatter = move |x: &f64| {
        let nearest = x.round();
        if (x - nearest).abs() < 1e-6 && nearest >= 0.0 && (nearest as usize) < labels.len() {
            labels[nearest as usize].clone()
        } else {
            String::new()
        }
    };

    let mut ctx = ChartBuilder::on(area)
        .caption(&chart.title, ("sans-serif", 20))
        .margin(12)
        .x_label_area_size(42)
        .y_label_area_size(56)
        .build_cartesian_2d(x_lo..x_hi, 0.0..y_hi)
        .map_err(ChartError::draw)?;
    ctx.configure_mesh()
        .disable_x_mesh()
        .x_labels(chart.bars.len())
        .x_label_formatter(&formatter)
        .y_desc(&chart.y_desc)
        .draw()
        .map_err(ChartError::draw)?;

    for band in &chart.bands {
        ctx.draw_series(std::iter::once(Rectangle::new(
            [(x_lo, band.from), (x_hi, band.to.min(y_hi))],
            band.color.mix(0.12).filled(),
        )))
        .map_err(ChartError::draw)?;
    }

    ctx.draw_series(chart.bars.iter().enumerate().map(|(i, bar)| {
        Rectangle::new(
            [(i as f64 - 0.3, 0.0), (i as f64 + 0.3, bar.value)],
            bar.color.mix(0.85).filled(),
        )
    }))
    .map_err(ChartError::draw)?;

    ctx.draw_series(chart.bars.iter().enumerate().map(|(i, bar)| {
        EmptyElement::at((i as f64, bar.value))
            + Text::new(format!("{:.1}", bar.value), (-10, -16), ("sans-serif", 14))
    }))
    .map_err(ChartError::draw)?;

    if let Some(reference) = &chart.reference {
        let color = reference.color;
        ctx.draw_series(LineSeries::new(
            vec![(x_lo, reference.value), (x_hi, reference.value)],
            color.stroke_width(2),
        ))
        .map_err(ChartError::draw)?
        .label(reference.label.as_str())
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 10, y)], color.stroke_width(2))
        });
        ctx.configure_series_labels()
            .background_style(WHITE.mix(0.85))
            .border_style(BLACK)
            .draw()
            .map_err(ChartError::draw)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qbench_core::{Method, Metric};

    fn sample_table() -> GroupedTable {
        let mut table = GroupedTable::new(Metric::Loc);
        table.insert(RequestId::R1, Method::Web10, 14.0).unwrap();
        table.insert(RequestId::R1, Method::Rdfa, 22.0).unwrap();
        table.insert(RequestId::R2, Method::Web10, 17.0).unwrap();
        table
    }

    #[test]
    fn test_from_table_keeps_gaps() {
        let chart = GroupedBarChart::from_table("LOC", "Lines", &sample_table());
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.categories.len(), 10);
        // RDFa has no R2 cell: a gap, not a zero.
        assert_eq!(chart.series[1].values[1], None);
        assert_eq!(chart.series[0].values[1], Some(17.0));
    }

    #[test]
    fn test_render_grouped_bar_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loc.png");
        let chart = GroupedBarChart::from_table("LOC", "Lines", &sample_table());
        render_grouped_bar(&path, &chart).unwrap();
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_render_all_gaps_is_empty_chart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        let chart = GroupedBarChart {
            title: "empty".into(),
            x_desc: "x".into(),
            y_desc: "y".into(),
            categories: request_labels(),
            series: vec![Series {
                label: "none".into(),
                color: style::NO_DATA,
                values: vec![None; 10],
            }],
            log_y: false,
            value_labels: false,
            baseline: None,
            bands: Vec::new(),
            y_max: None,
            size: (400, 300),
        };
        assert!(matches!(
            render_grouped_bar(&path, &chart),
            Err(ChartError::EmptyChart { .. })
        ));
    }

    #[test]
    fn test_render_log_scale_and_baseline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("speedup.png");
        let mut chart = GroupedBarChart::from_table("Speedup", "x faster", &sample_table());
        chart.log_y = true;
        chart.value_labels = true;
        chart.baseline = Some(Baseline {
            value: 1.0,
            label: "Web 1.0 reference".into(),
            color: RGBColor(200, 30, 30),
        });
        render_grouped_bar(&path, &chart).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_render_value_bar_panel() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("averages.png");
        let panel = ValueBarChart::new(
            "Average",
            "ms",
            vec![
                ValueBar {
                    label: "Web 1.0".into(),
                    color: style::method_color(Method::Web10),
                    value: 27.3,
                },
                ValueBar {
                    label: "SPARQL".into(),
                    color: style::method_color(Method::Sparql),
                    value: 4.1,
                },
            ],
        );
        render_value_bar_panel(&path, &[panel.clone(), panel], (1500, 560)).unwrap();
        assert!(path.exists());
    }
}
