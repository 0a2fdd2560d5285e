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

//! Reading benchmark results into an observation store.

use crate::error::{LoadError, LoadResult};
use qbench_core::{Observation, ObservationSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Default maximum number of rows, a guard against runaway input files.
/// Real results files hold a few dozen rows.
pub const DEFAULT_MAX_ROWS: usize = 100_000;

/// Configuration for results-file parsing.
///
/// The observed convention is semicolon-delimited with a header row:
///
/// ```text
/// question;method;metric;mean_ms;stdev_ms
/// R1;Web 1.0;server_ms;12.53;1.80
/// ```
///
/// # Examples
///
/// ```
/// use qbench_csv::ReadConfig;
///
/// let config = ReadConfig::default();
/// assert_eq!(config.delimiter, b';');
/// assert!(config.has_headers);
///
/// // Tab-delimited export without a header row.
/// let config = ReadConfig {
///     delimiter: b'\t',
///     has_headers: false,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ReadConfig {
    /// Field delimiter (default: `;`).
    pub delimiter: u8,
    /// Whether the first row is a header (default: `true`).
    pub has_headers: bool,
    /// Whether to trim surrounding whitespace from fields (default: `true`).
    pub trim: bool,
    /// Maximum number of data rows accepted (default:
    /// [`DEFAULT_MAX_ROWS`]).
    pub max_rows: usize,
}

impl Default for ReadConfig {
    fn default() -> Self {
        Self {
            delimiter: b';',
            has_headers: true,
            trim: true,
            max_rows: DEFAULT_MAX_ROWS,
        }
    }
}

/// A row that could not be used, with its source location and the reason.
#[derive(Debug, Clone)]
pub struct SkippedRow {
    /// 1-based line number, when the parser could attribute one.
    pub line: Option<usize>,
    /// Why the row was skipped.
    pub reason: String,
}

/// The outcome of a load: the usable observations plus an account of every
/// row that was skipped.
///
/// Skipped rows are surfaced, never silently dropped — the summaries print
/// the count so a truncated dataset is visible.
#[derive(Debug)]
pub struct LoadReport {
    /// The observations that parsed cleanly.
    pub observations: ObservationSet,
    /// Rows skipped as malformed (missing fields, bad numbers, unknown
    /// names, duplicate keys).
    pub skipped: Vec<SkippedRow>,
}

impl LoadReport {
    /// Number of usable observations.
    pub fn row_count(&self) -> usize {
        self.observations.len()
    }

    /// Number of rows skipped.
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Read results from any reader with the default configuration.
///
/// # Errors
///
/// See [`read_results_with_config`].
pub fn read_results<R: Read>(reader: R) -> LoadResult<LoadReport> {
    read_results_with_config(reader, &ReadConfig::default())
}

/// Read results from a string slice.
pub fn read_results_str(data: &str) -> LoadResult<LoadReport> {
    read_results(data.as_bytes())
}

/// Read results from a file path.
///
/// # Errors
///
/// [`LoadError::Open`] when the file cannot be opened, otherwise as
/// [`read_results_with_config`].
pub fn read_results_path(path: impl AsRef<Path>) -> LoadResult<LoadReport> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| LoadError::Open {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    read_results(file)
}

/// Read results with explicit configuration.
///
/// Malformed rows are skipped and recorded in the returned
/// [`LoadReport::skipped`]; one bad row never aborts the load.
///
/// # Errors
///
/// - [`LoadError::Read`] on an underlying I/O failure.
/// - [`LoadError::RowLimit`] when the data exceeds `config.max_rows`.
/// - [`LoadError::Empty`] when no row was usable at all.
pub fn read_results_with_config<R: Read>(
    reader: R,
    config: &ReadConfig,
) -> LoadResult<LoadReport> {
    let trim = if config.trim {
        csv::Trim::All
    } else {
        csv::Trim::None
    };
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(config.has_headers)
        .flexible(true)
        .trim(trim)
        .from_reader(reader);

    let mut observations = ObservationSet::new();
    let mut skipped = Vec::new();
    let mut rows_seen = 0usize;

    for record in csv_reader.records() {
        rows_seen += 1;
        if rows_seen > config.max_rows {
            return Err(LoadError::RowLimit {
                max: config.max_rows,
            });
        }
        let record = match record {
            Ok(record) => record,
            Err(error) => {
                // A broken stream is fatal; a broken record is a skip.
                if let csv::ErrorKind::Io(io_error) = error.kind() {
                    return Err(LoadError::Read {
                        message: io_error.to_string(),
                    });
                }
                skipped.push(SkippedRow {
                    line: error.position().map(|p| p.line() as usize),
                    reason: error.to_string(),
                });
                continue;
            }
        };
        let line = record.position().map(|p| p.line() as usize);
        match parse_record(&record) {
            Ok(observation) => {
                if let Err(error) = observations.insert(observation) {
                    skipped.push(SkippedRow {
                        line,
                        reason: error.to_string(),
                    });
                }
            }
            Err(reason) => skipped.push(SkippedRow { line, reason }),
        }
    }

    if observations.is_empty() {
        return Err(LoadError::Empty {
            skipped: skipped.len(),
        });
    }
    Ok(LoadReport {
        observations,
        skipped,
    })
}

fn parse_record(record: &csv::StringRecord) -> Result<Observation, String> {
    if record.len() < 4 {
        return Err(format!(
            "expected at least 4 fields (question;method;metric;mean), got {}",
            record.len()
        ));
    }
    let request = record[0].parse().map_err(|e| field_error("question", e))?;
    let method = record[1].parse().map_err(|e| field_error("method", e))?;
    let metric = record[2].parse().map_err(|e| field_error("metric", e))?;
    let mean: f64 = record[3]
        .parse()
        .map_err(|_| format!("field 'mean': '{}' is not a number", &record[3]))?;
    if !mean.is_finite() {
        return Err(format!("field 'mean': '{}' is not finite", &record[3]));
    }

    let mut observation = Observation::new(request, method, metric, mean);
    if let Some(raw) = record.get(4).filter(|s| !s.is_empty()) {
        let stdev: f64 = raw
            .parse()
            .map_err(|_| format!("field 'stdev': '{raw}' is not a number"))?;
        if !stdev.is_finite() {
            return Err(format!("field 'stdev': '{raw}' is not finite"));
        }
        observation = observation.with_stdev(stdev);
    }
    Ok(observation)
}

/// A field-level parse failure, without the row-level prefix the parse
/// errors carry.
fn field_error(field: &str, error: qbench_core::MetricError) -> String {
    match error {
        qbench_core::MetricError::MalformedRow { message, .. } => {
            format!("field '{field}': {message}")
        }
        other => format!("field '{field}': {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qbench_core::{Method, Metric, RequestId};

    const SAMPLE: &str = "\
question;method;metric;mean_ms;stdev_ms
R1;Web 1.0;server_ms;12.53;1.80
R1;RDFa;server_ms;15.20;2.10
R1;SPARQL Endpoint;server_ms;2.05;0.40
R2;Web 1.0;client_ms;40.00;5.00
";

    #[test]
    fn test_reads_semicolon_results() {
        let report = read_results_str(SAMPLE).unwrap();
        assert_eq!(report.row_count(), 4);
        assert_eq!(report.skipped_count(), 0);

        let server = report.observations.pivot(Metric::ServerMs).unwrap();
        assert_eq!(server.get(RequestId::R1, Method::Sparql), Some(2.05));
        let obs = report.observations.iter().next().unwrap();
        assert_eq!(obs.stdev, Some(1.80));
    }

    #[test]
    fn test_malformed_rows_skipped_and_counted() {
        let data = "\
question;method;metric;mean_ms;stdev_ms
R1;Web 1.0;server_ms;12.53;1.80
R99;Web 1.0;server_ms;1.0;0.1
R2;Web 1.0;server_ms;not-a-number;0.1
R3;Web 1.0
R4;Web 1.0;server_ms;4.0;0.2
";
        let report = read_results_str(data).unwrap();
        assert_eq!(report.row_count(), 2);
        assert_eq!(report.skipped_count(), 3);
        // Line numbers point at the offending rows.
        assert_eq!(report.skipped[0].line, Some(3));
        assert!(report.skipped[1].reason.contains("not a number"));
    }

    #[test]
    fn test_duplicate_key_skipped_not_overwritten() {
        let data = "\
question;method;metric;mean_ms;stdev_ms
R1;Web 1.0;server_ms;12.53;1.80
R1;Web 1.0;server_ms;99.00;9.90
";
        let report = read_results_str(data).unwrap();
        assert_eq!(report.row_count(), 1);
        assert_eq!(report.skipped_count(), 1);
        assert!(report.skipped[0].reason.contains("duplicate"));

        let server = report.observations.pivot(Metric::ServerMs).unwrap();
        assert_eq!(server.get(RequestId::R1, Method::Web10), Some(12.53));
    }

    #[test]
    fn test_empty_data_is_hard_failure() {
        let data = "question;method;metric;mean_ms;stdev_ms\n";
        match read_results_str(data) {
            Err(LoadError::Empty { skipped }) => assert_eq!(skipped, 0),
            other => panic!("expected Empty, got {other:?}"),
        }
    }

    #[test]
    fn test_all_rows_malformed_is_hard_failure() {
        let data = "\
question;method;metric;mean_ms;stdev_ms
bogus;row;here;x;y
";
        match read_results_str(data) {
            Err(LoadError::Empty { skipped }) => assert_eq!(skipped, 1),
            other => panic!("expected Empty, got {other:?}"),
        }
    }

    #[test]
    fn test_row_limit_guard() {
        let mut data = String::from("question;method;metric;mean_ms;stdev_ms\n");
        data.push_str("R1;Web 1.0;server_ms;1.0;0.1\n");
        data.push_str("R2;Web 1.0;server_ms;2.0;0.1\n");
        let config = ReadConfig {
            max_rows: 1,
            ..Default::default()
        };
        match read_results_with_config(data.as_bytes(), &config) {
            Err(LoadError::RowLimit { max }) => assert_eq!(max, 1),
            other => panic!("expected RowLimit, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_stdev_is_none() {
        let data = "\
question;method;metric;mean_ms;stdev_ms
R1;Web 1.0;render_ms;3.5;
";
        let report = read_results_str(data).unwrap();
        let obs = report.observations.iter().next().unwrap();
        assert_eq!(obs.stdev, None);
    }
}
