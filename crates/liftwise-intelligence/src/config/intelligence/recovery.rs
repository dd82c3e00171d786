// ABOUTME: Recovery analysis configuration for the fatigue and recovery engine
// ABOUTME: Lookback window, default recovery preference, and neglect threshold
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

use crate::fatigue::RecoveryPreference;
use serde::{Deserialize, Serialize};

/// Fatigue and recovery analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryConfig {
    /// Days of history considered for fatigue
    pub lookback_days: u32,
    /// Preference used when the caller does not supply one
    pub default_preference: RecoveryPreference,
    /// Days without training after which a group counts as neglected
    pub neglect_threshold_days: u32,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            lookback_days: 7,
            default_preference: RecoveryPreference::Moderate,
            neglect_threshold_days: 7,
        }
    }
}
