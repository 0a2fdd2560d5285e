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

//! Error types for results-file loading.
//!
//! Individual malformed rows are not errors — they are skipped and counted
//! in the [`crate::LoadReport`]. A `LoadError` means the load as a whole
//! cannot proceed.

use std::path::PathBuf;
use thiserror::Error;

/// A hard failure while loading a results file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened.
    #[error("failed to open '{path}': {message}")]
    Open {
        /// The path that failed to open.
        path: PathBuf,
        /// The underlying I/O message.
        message: String,
    },

    /// The underlying stream failed mid-read.
    #[error("read error: {message}")]
    Read {
        /// The underlying I/O message.
        message: String,
    },

    /// Every row was skipped; there is nothing to aggregate.
    #[error("no usable rows in results data ({skipped} rows skipped)")]
    Empty {
        /// How many rows were skipped as malformed.
        skipped: usize,
    },

    /// The file exceeds the configured row limit.
    #[error("results data exceeds the {max}-row limit")]
    RowLimit {
        /// The configured maximum.
        max: usize,
    },
}

/// Result type for load operations.
pub type LoadResult<T> = Result<T, LoadError>;
