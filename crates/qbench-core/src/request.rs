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

//! The canonical benchmark request axis.

use crate::{MetricError, MetricResult};
use std::fmt;
use std::str::FromStr;

/// One of the ten fixed benchmark requests.
///
/// Requests order numerically: `R10` comes after `R9`, never after `R1` as a
/// lexical sort would put it. All grouped tables, joins, and charts iterate
/// the axis through [`RequestId::ALL`] so display order is reproducible.
///
/// # Examples
///
/// ```
/// use qbench_core::RequestId;
///
/// let r10: RequestId = "R10".parse().unwrap();
/// assert!(RequestId::R2 < r10);
/// assert_eq!(r10.to_string(), "R10");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RequestId {
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
    R8,
    R9,
    R10,
}

impl RequestId {
    /// The canonical axis, in display order.
    pub const ALL: [RequestId; 10] = [
        Self::R1,
        Self::R2,
        Self::R3,
        Self::R4,
        Self::R5,
        Self::R6,
        Self::R7,
        Self::R8,
        Self::R9,
        Self::R10,
    ];

    /// Zero-based position on the canonical axis.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The request number (1-based).
    pub fn number(self) -> usize {
        self as usize + 1
    }

    /// The `"R1"`..`"R10"` spelling.
    pub fn label(self) -> &'static str {
        match self {
            Self::R1 => "R1",
            Self::R2 => "R2",
            Self::R3 => "R3",
            Self::R4 => "R4",
            Self::R5 => "R5",
            Self::R6 => "R6",
            Self::R7 => "R7",
            Self::R8 => "R8",
            Self::R9 => "R9",
            Self::R10 => "R10",
        }
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RequestId {
    type Err = MetricError;

    fn from_str(s: &str) -> MetricResult<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.label() == s.trim())
            .ok_or_else(|| {
                MetricError::malformed(format!("unknown request id '{s}' (expected R1..R10)"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_order_not_lexical() {
        // "R10" < "R2" lexically; the axis must not agree.
        assert!(RequestId::R2 < RequestId::R10);
        assert!(RequestId::R9 < RequestId::R10);
    }

    #[test]
    fn test_all_is_display_order() {
        let labels: Vec<_> = RequestId::ALL.iter().map(|r| r.label()).collect();
        assert_eq!(labels[0], "R1");
        assert_eq!(labels[9], "R10");
        assert_eq!(labels.len(), 10);
    }

    #[test]
    fn test_parse_round_trip() {
        for request in RequestId::ALL {
            let parsed: RequestId = request.label().parse().unwrap();
            assert_eq!(parsed, request);
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("R11".parse::<RequestId>().is_err());
        assert!("Q1".parse::<RequestId>().is_err());
        assert!("".parse::<RequestId>().is_err());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let parsed: RequestId = " R7 ".parse().unwrap();
        assert_eq!(parsed, RequestId::R7);
    }
}
