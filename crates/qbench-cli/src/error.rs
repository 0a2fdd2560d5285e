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

//! Structured error types for the QBench CLI.
//!
//! All command execution returns `Result<_, CliError>` so every failure
//! reaches the user through one formatting path and a nonzero exit code.

use qbench_chart::ChartError;
use qbench_core::MetricError;
use qbench_csv::LoadError;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for QBench CLI operations.
#[derive(Debug, Error)]
pub enum CliError {
    /// I/O failure outside the loaders (creating the output directory,
    /// writing a summary file).
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The path involved.
        path: PathBuf,
        /// The underlying message.
        message: String,
    },

    /// The results file could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// An aggregation failed (unknown metric, no data, undefined division).
    #[error(transparent)]
    Metric(#[from] MetricError),

    /// A chart could not be rendered.
    #[error(transparent)]
    Chart(#[from] ChartError),

    /// A JSON summary could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// An [`CliError::Io`] for a path.
    pub fn io(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: error.to_string(),
        }
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
