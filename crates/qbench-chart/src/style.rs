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

//! The shared palette.
//!
//! Every chart uses one color per engine and one per risk severity so the
//! whole report set reads consistently.

use plotters::style::RGBColor;
use qbench_core::{Method, Severity};

/// Engine colors, shared across every chart.
pub fn method_color(method: Method) -> RGBColor {
    match method {
        Method::Web10 => RGBColor(255, 107, 107),
        Method::Rdfa => RGBColor(78, 205, 196),
        Method::Sparql => RGBColor(69, 183, 209),
    }
}

/// A darker companion shade, used for the text-dependency segments of the
/// combined dependency chart.
pub fn method_color_dark(method: Method) -> RGBColor {
    match method {
        Method::Web10 => RGBColor(196, 69, 105),
        Method::Rdfa => RGBColor(44, 122, 123),
        Method::Sparql => RGBColor(41, 128, 161),
    }
}

/// Severity colors for the risk distribution pies.
pub fn severity_color(severity: Severity) -> RGBColor {
    match severity {
        Severity::Critical => RGBColor(211, 47, 47),
        Severity::High => RGBColor(255, 111, 0),
        Severity::Medium => RGBColor(255, 167, 38),
        Severity::Low => RGBColor(102, 187, 106),
    }
}

/// A rotating palette for per-request stack segments.
pub fn segment_color(index: usize) -> RGBColor {
    const PALETTE: [RGBColor; 10] = [
        RGBColor(31, 119, 180),
        RGBColor(255, 127, 14),
        RGBColor(44, 160, 44),
        RGBColor(214, 39, 40),
        RGBColor(148, 103, 189),
        RGBColor(140, 86, 75),
        RGBColor(227, 119, 194),
        RGBColor(127, 127, 127),
        RGBColor(188, 189, 34),
        RGBColor(23, 190, 207),
    ];
    PALETTE[index % PALETTE.len()]
}

/// Grey for "no data" cells, visibly distinct from any value color.
pub const NO_DATA: RGBColor = RGBColor(189, 189, 189);

/// Heat gradient from pale yellow to deep red (low to high).
pub fn heat_yellow_red(t: f64) -> RGBColor {
    gradient(
        &[
            RGBColor(255, 255, 204),
            RGBColor(254, 217, 118),
            RGBColor(253, 141, 60),
            RGBColor(189, 0, 38),
        ],
        t,
    )
}

/// Diverging gradient from red through yellow to green (low to high), used
/// for robustness where high is good.
pub fn heat_red_green(t: f64) -> RGBColor {
    gradient(
        &[
            RGBColor(215, 48, 39),
            RGBColor(254, 224, 139),
            RGBColor(26, 152, 80),
        ],
        t,
    )
}

fn gradient(stops: &[RGBColor], t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);
    let scaled = t * (stops.len() - 1) as f64;
    let low = scaled.floor() as usize;
    let high = (low + 1).min(stops.len() - 1);
    let frac = scaled - low as f64;
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    RGBColor(
        lerp(stops[low].0, stops[high].0),
        lerp(stops[low].1, stops[high].1),
        lerp(stops[low].2, stops[high].2),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_endpoints() {
        assert_eq!(heat_yellow_red(0.0), RGBColor(255, 255, 204));
        assert_eq!(heat_yellow_red(1.0), RGBColor(189, 0, 38));
        // Out-of-range input clamps instead of panicking.
        assert_eq!(heat_yellow_red(2.0), RGBColor(189, 0, 38));
    }

    #[test]
    fn test_each_method_has_distinct_color() {
        let colors: Vec<_> = Method::ALL.into_iter().map(method_color).collect();
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_ne!(colors[0], colors[2]);
    }
}
