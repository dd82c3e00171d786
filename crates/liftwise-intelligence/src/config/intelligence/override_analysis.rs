// ABOUTME: Override pattern analysis configuration for bias and neglect detection
// ABOUTME: Windows, detection ratios, priority multipliers, and the progress callout threshold
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

use serde::{Deserialize, Serialize};

/// Override pattern analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverrideAnalysisConfig {
    /// Window (days) for distribution and progression analysis
    pub window_days: u32,
    /// Shorter window used when re-ranking recommendations
    pub adjustment_window_days: u32,
    /// A group is biased above `average * bias_ratio`
    pub bias_ratio: f64,
    /// A present group is neglected below `average * neglect_ratio`
    pub neglect_ratio: f64,
    /// Priority multiplier for biased groups
    pub bias_priority_multiplier: f64,
    /// Priority multiplier for neglected groups
    pub neglect_priority_multiplier: f64,
    /// Average weekly increase (kg) above which progress is called out
    pub progress_callout_kg_per_week: f64,
}

impl Default for OverrideAnalysisConfig {
    fn default() -> Self {
        Self {
            window_days: 90,
            adjustment_window_days: 30,
            bias_ratio: 1.2,
            neglect_ratio: 0.5,
            bias_priority_multiplier: 0.7,
            neglect_priority_multiplier: 1.3,
            progress_callout_kg_per_week: 0.5,
        }
    }
}
