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

//! Scatter plots with optional linear trend lines.

use crate::error::{ChartError, ChartResult};
use plotters::coord::CoordTranslate;
use plotters::prelude::*;
use qbench_core::LinearFit;
use std::path::Path;

/// Point marker shape, one per engine so overlapping clusters stay
/// readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// A filled circle.
    Circle,
    /// A filled square.
    Square,
    /// A filled triangle.
    Triangle,
}

/// One scatter point, optionally annotated (the trade-off chart tags each
/// point with its request id).
#[derive(Debug, Clone)]
pub struct ScatterPoint {
    /// x coordinate.
    pub x: f64,
    /// y coordinate.
    pub y: f64,
    /// Annotation drawn beside the point.
    pub annotation: Option<String>,
}

/// One scatter series with an optional fitted trend line.
#[derive(Debug, Clone)]
pub struct ScatterSeries {
    /// Legend label.
    pub label: String,
    /// Marker and trend color.
    pub color: RGBColor,
    /// Marker shape.
    pub marker: Marker,
    /// The data points.
    pub points: Vec<ScatterPoint>,
    /// A degree-1 fit drawn as a dashed decoration; it never alters the
    /// points.
    pub trend: Option<LinearFit>,
}

/// A scatter chart.
#[derive(Debug, Clone)]
pub struct ScatterChart {
    /// Chart caption.
    pub title: String,
    /// x axis description.
    pub x_desc: String,
    /// y axis description.
    pub y_desc: String,
    /// Render the y axis logarithmically (positive values only).
    pub log_y: bool,
    /// The series.
    pub series: Vec<ScatterSeries>,
    /// Image size in pixels.
    pub size: (u32, u32),
}

/// Render a [`ScatterChart`] to a PNG file.
///
/// # Errors
///
/// [`ChartError::EmptyChart`] when no series holds a drawable point, or
/// [`ChartError::Draw`] on a backend failure.
pub fn render_scatter(path: impl AsRef<Path>, chart: &ScatterChart) -> ChartResult<()> {
    let points: Vec<(f64, f64)> = chart
        .series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| (p.x, p.y)))
        .filter(|(_, y)| !chart.log_y || *y > 0.0)
        .collect();
    if points.is_empty() {
        return Err(ChartError::empty(&chart.title, "no points to draw"));
    }
    let x_min = points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
    let x_max = points.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
    let y_min = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let y_max = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
    let x_pad = ((x_max - x_min) * 0.08).max(1.0);

    let root = BitMapBackend::new(path.as_ref(), chart.size).into_drawing_area();
    root.fill(&WHITE).map_err(ChartError::draw)?;

    let x_range = (x_min - x_pad)..(x_max + x_pad);
    if chart.log_y {
        let y_lo = (y_min * 0.5).max(1e-3);
        let y_hi = y_max * 1.6;
        let mut ctx = ChartBuilder::on(&root)
            .caption(&chart.title, ("sans-serif", 24))
            .margin(12)
            .x_label_area_size(46)
            .y_label_area_size(64)
            .build_cartesian_2d(x_range, (y_lo..y_hi).log_scale())
            .map_err(ChartError::draw)?;
        ctx.configure_mesh()
            .x_desc(&chart.x_desc)
            .y_desc(&chart.y_desc)
            .draw()
            .map_err(ChartError::draw)?;
        draw_scatter(&mut ctx, chart, x_min, x_max, Some(y_lo))?;
    } else {
        let y_pad = ((y_max - y_min) * 0.1).max(0.5);
        let mut ctx = ChartBuilder::on(&root)
            .caption(&chart.title, ("sans-serif", 24))
            .margin(12)
            .x_label_area_size(46)
            .y_label_area_size(64)
            .build_cartesian_2d(x_range, (y_min - y_pad).min(0.0)..y_max + y_pad)
            .map_err(ChartError::draw)?;
        ctx.configure_mesh()
            .x_desc(&chart.x_desc)
            .y_desc(&chart.y_desc)
            .draw()
            .map_err(ChartError::draw)?;
        draw_scatter(&mut ctx, chart, x_min, x_max, None)?;
    }

    root.present().map_err(ChartError::draw)
}

fn draw_scatter<'a, DB, CT>(
    ctx: &mut ChartContext<'a, DB, CT>,
    chart: &ScatterChart,
    x_min: f64,
    x_max: f64,
    log_floor: Option<f64>,
) -> ChartResult<()>
where
    DB: DrawingBackend + 'a,
    CT: CoordTranslate<From = (f64, f64)>,
{
    let visible = |y: f64| log_floor.map_or(true, |floor| y > floor / 2.0);

    for series in &chart.series {
        let color = series.color;
        let coords: Vec<(f64, f64)> = series
            .points
            .iter()
            .map(|p| (p.x, p.y))
            .filter(|&(_, y)| visible(y))
            .collect();

        let anno = match series.marker {
            Marker::Circle => ctx
                .draw_series(
                    coords
                        .iter()
                        .map(|&(x, y)| Circle::new((x, y), 5, color.filled())),
                )
                .map_err(ChartError::draw)?,
            Marker::Triangle => ctx
                .draw_series(
                    coords
                        .iter()
                        .map(|&(x, y)| TriangleMarker::new((x, y), 6, color.filled())),
                )
                .map_err(ChartError::draw)?,
            Marker::Square => ctx
                .draw_series(coords.iter().map(|&(x, y)| {
                    EmptyElement::at((x, y))
                        + Rectangle::new([(-4, -4), (4, 4)], color.filled())
                }))
                .map_err(ChartError::draw)?,
        };
        anno.label(series.label.as_str())
            .legend(move |(x, y)| Circle::new((x + 5, y), 5, color.filled()));

        ctx.draw_series(series.points.iter().filter_map(|p| {
            if !visible(p.y) {
                return None;
            }
            let text = p.annotation.clone()?;
            Some(
                EmptyElement::at((p.x, p.y))
                    + Text::new(text, (7, -4), ("sans-serif", 11).into_font().color(&color)),
            )
        }))
        .map_err(ChartError::draw)?;

        if let Some(trend) = series.trend {
            let steps = 60;
            let span = x_max - x_min;
            let line = (0..=steps).filter_map(|i| {
                let x = x_min + span * i as f64 / steps as f64;
                let y = trend.at(x);
                match log_floor {
                    Some(floor) if y <= floor => None,
                    _ => Some((x, y)),
                }
            });
            ctx.draw_series(DashedLineSeries::new(
                line,
                6,
                4,
                color.mix(0.6).stroke_width(2),
            ))
            .map_err(ChartError::draw)?;
        }
    }

    ctx.configure_series_labels()
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()
        .map_err(ChartError::draw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style;
    use qbench_core::{linear_fit, Method};

    fn sample_series() -> ScatterSeries {
        let points: Vec<ScatterPoint> = [(14.0, 12.0), (17.0, 9.0), (31.0, 45.0), (58.0, 120.0)]
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| ScatterPoint {
                x,
                y,
                annotation: Some(format!("R{}", i + 1)),
            })
            .collect();
        let fit = linear_fit(&points.iter().map(|p| (p.x, p.y)).collect::<Vec<_>>()).unwrap();
        ScatterSeries {
            label: "Web 1.0".into(),
            color: style::method_color(Method::Web10),
            marker: Marker::Circle,
            points,
            trend: Some(fit),
        }
    }

    #[test]
    fn test_render_scatter_with_trend() {
        let chart = ScatterChart {
            title: "LOC vs time".into(),
            x_desc: "Lines of code".into(),
            y_desc: "Server time (ms)".into(),
            log_y: true,
            series: vec![sample_series()],
            size: (900, 700),
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scatter.png");
        render_scatter(&path, &chart).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_empty_scatter_rejected() {
        let chart = ScatterChart {
            title: "empty".into(),
            x_desc: "x".into(),
            y_desc: "y".into(),
            log_y: false,
            series: Vec::new(),
            size: (300, 300),
        };
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            render_scatter(dir.path().join("s.png"), &chart),
            Err(ChartError::EmptyChart { .. })
        ));
    }
}
