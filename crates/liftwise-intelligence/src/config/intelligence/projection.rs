// ABOUTME: Progress projection configuration for strength and consistency trajectories
// ABOUTME: Lookback window, streak gap tolerance, unlock callout, and optional quote seed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

use serde::{Deserialize, Serialize};

/// Progress projection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Days of history projected against
    pub window_days: u32,
    /// Largest gap (days) between training dates that keeps a streak alive
    pub streak_gap_days: i64,
    /// Total missed kg above which the "potential unlock" message is shown
    pub unlock_callout_kg: f64,
    /// Seed for quote selection; `None` draws a fresh seed per report
    pub quote_seed: Option<u64>,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            window_days: 90,
            streak_gap_days: 3,
            unlock_callout_kg: 20.0,
            quote_seed: None,
        }
    }
}
