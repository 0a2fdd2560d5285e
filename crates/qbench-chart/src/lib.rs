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

//! PNG chart rendering for QBench reports.
//!
//! Renderers here are pure consumers: every number they draw was computed
//! upstream by `qbench-core`, so the aggregation logic stays testable
//! without this crate. Each chart kind takes a small specification struct
//! and a target path.
//!
//! Missing data stays missing: a `None` cell renders as an absent bar or a
//! grey "n/a" heatmap cell, never as zero. Logarithmic axes and log color
//! scales are display choices only; the aggregates are untouched.
//!
//! # Quick Start
//!
//! ```no_run
//! use qbench_chart::{render_grouped_bar, GroupedBarChart};
//! use qbench_core::{builtin, Metric};
//!
//! let loc = builtin::code_metrics().pivot(Metric::Loc).unwrap();
//! let chart = GroupedBarChart::from_table(
//!     "Lines of Code by Request",
//!     "Lines of code",
//!     &loc,
//! );
//! render_grouped_bar("loc_per_request.png", &chart).unwrap();
//! ```

mod bar;
mod boxplot;
mod error;
mod heatmap;
mod pie;
mod scatter;
mod stacked;
pub mod style;

pub use bar::{
    render_grouped_bar, render_value_bar_panel, render_value_bars, request_labels, Band,
    Baseline, GroupedBarChart, Series, ValueBar, ValueBarChart,
};
pub use boxplot::{render_box_plot, BoxGroup, BoxPlotChart};
pub use error::{ChartError, ChartResult};
pub use heatmap::{render_heatmap, HeatPalette, HeatmapChart};
pub use pie::{render_pie, render_pie_panel, PieChart, Slice};
pub use scatter::{render_scatter, Marker, ScatterChart, ScatterPoint, ScatterSeries};
pub use stacked::{render_stacked_bar, StackSegment, StackedBarChart, StackedGroup};
