// ABOUTME: Data-sufficiency marker attached to derived analytics results
// ABOUTME: Lets callers tell "no signal" apart from "bad signal" without the call failing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

use serde::{Deserialize, Serialize};

/// How much history backed a derived metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSufficiency {
    /// No qualifying data points at all; the result is a neutral default
    NoData,
    /// Some data, but fewer points than the metric needs; neutral default used
    Insufficient,
    /// Enough data for the metric to be computed
    Sufficient,
}

impl DataSufficiency {
    /// Classify a data-point count against a metric's minimum
    #[must_use]
    pub const fn from_count(count: usize, minimum: usize) -> Self {
        if count == 0 {
            Self::NoData
        } else if count < minimum {
            Self::Insufficient
        } else {
            Self::Sufficient
        }
    }

    /// Whether the metric was computed from real data
    #[must_use]
    pub const fn is_sufficient(&self) -> bool {
        matches!(self, Self::Sufficient)
    }
}
