// ABOUTME: Recommendation engine configuration for daily exercise suggestions
// ABOUTME: Configures overtraining threshold, result limits, and suggested set/rep scheme
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

//! Recommendation Engine Configuration
//!
//! Limits on how many exercises are suggested, the fatigue level that
//! triggers an overtraining warning, and the default prescription attached
//! to each suggested exercise.

use serde::{Deserialize, Serialize};

/// Recommendation Engine Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Fatigue score above which a group triggers an overtraining warning
    pub overtraining_fatigue_threshold: f64,
    /// Maximum alternates drawn from the primary group
    pub max_alternates: usize,
    /// Maximum additional groups contributing one balancing exercise
    pub max_balancing_groups: usize,
    /// Suggested number of sets per exercise
    pub suggested_sets: u32,
    /// Suggested repetition range per set
    pub suggested_reps: String,
    /// Maximum group names listed in neglect and rest warnings
    pub max_groups_in_warning: usize,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            overtraining_fatigue_threshold: 0.8,
            max_alternates: 3,
            max_balancing_groups: 2,
            suggested_sets: 3,
            suggested_reps: "8-12".into(),
            max_groups_in_warning: 3,
        }
    }
}
