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

//! Error types for chart rendering.

use thiserror::Error;

/// A failure while rendering a chart file.
#[derive(Debug, Error)]
pub enum ChartError {
    /// The drawing backend failed (file write, font, layout).
    #[error("drawing error: {message}")]
    Draw {
        /// The backend's message.
        message: String,
    },

    /// The chart specification has nothing drawable.
    ///
    /// An all-gaps series is reported instead of emitting an empty image
    /// that would read as "everything was zero".
    #[error("chart '{title}' has nothing to draw: {reason}")]
    EmptyChart {
        /// The chart title.
        title: String,
        /// Why there was nothing to draw.
        reason: String,
    },
}

impl ChartError {
    /// Wrap a backend error.
    pub fn draw(error: impl std::fmt::Display) -> Self {
        Self::Draw {
            message: error.to_string(),
        }
    }

    /// An [`ChartError::EmptyChart`] for a titled chart.
    pub fn empty(title: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::EmptyChart {
            title: title.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for rendering operations.
pub type ChartResult<T> = Result<T, ChartError>;
