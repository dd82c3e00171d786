// ABOUTME: Knowledge-level assessment configuration
// ABOUTME: Consistency window and the targets used when suggesting next-level goals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

use serde::{Deserialize, Serialize};

/// Knowledge-level assessment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// Window (days) over which training consistency is measured
    pub consistency_window_days: u32,
    /// Consistency below this suggests a consistency goal
    pub consistency_goal_target: f64,
    /// Progression quality below this suggests a progression goal
    pub progression_goal_target: f64,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            consistency_window_days: 90,
            consistency_goal_target: 0.7,
            progression_goal_target: 0.6,
        }
    }
}
