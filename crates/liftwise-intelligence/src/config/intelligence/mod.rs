// ABOUTME: Intelligence configuration for training analytics and recommendations
// ABOUTME: Orchestrates domain-specific configs and provides unified validation and loading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

//! Intelligence Configuration Module
//!
//! Tunable knobs for every analytics engine. Engines never read the global
//! instance themselves: callers pass the relevant section explicitly, so the
//! same engine can be run under different settings side by side.
//!
//! # Module Structure
//!
//! - `recovery` - Fatigue lookback and recovery preference
//! - `recommendation` - Recommendation limits and overtraining threshold
//! - `knowledge` - Knowledge-level consistency window and goal targets
//! - `override_analysis` - Bias/neglect detection and re-ranking
//! - `projection` - Strength and consistency projections
//!
//! Per-level tables (safety thresholds, progression rates, descriptions) are
//! not configuration; they live as constant lookups on `KnowledgeLevel`.

pub mod error;
pub mod knowledge;
pub mod override_analysis;
pub mod projection;
pub mod recommendation;
pub mod recovery;

pub use error::ConfigError;
pub use knowledge::KnowledgeConfig;
pub use override_analysis::OverrideAnalysisConfig;
pub use projection::ProjectionConfig;
pub use recommendation::RecommendationConfig;
pub use recovery::RecoveryConfig;

use serde::{Deserialize, Serialize};
use std::env::{self, VarError};
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

/// Global configuration singleton
static INTELLIGENCE_CONFIG: OnceLock<IntelligenceConfig> = OnceLock::new();

/// Main intelligence configuration container
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntelligenceConfig {
    /// Fatigue and recovery analysis
    pub recovery: RecoveryConfig,
    /// Daily exercise recommendations
    pub recommendation: RecommendationConfig,
    /// Knowledge-level assessment
    pub knowledge: KnowledgeConfig,
    /// Override pattern analysis
    pub override_analysis: OverrideAnalysisConfig,
    /// Progress projections
    pub projection: ProjectionConfig,
}

impl IntelligenceConfig {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        INTELLIGENCE_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load intelligence config: {}, using defaults", e);
                Self::default()
            })
        })
    }

    /// Load configuration from environment
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid value found
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.recovery.lookback_days == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "recovery lookback_days must be positive",
            ));
        }

        let rec = &self.recommendation;
        if !(0.0..=1.0).contains(&rec.overtraining_fatigue_threshold) {
            return Err(ConfigError::ValueOutOfRange(
                "overtraining_fatigue_threshold must be between 0 and 1",
            ));
        }
        if rec.suggested_sets == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "suggested_sets must be positive",
            ));
        }

        let knowledge = &self.knowledge;
        if knowledge.consistency_window_days == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "consistency_window_days must be positive",
            ));
        }
        if !(0.0..=1.0).contains(&knowledge.consistency_goal_target)
            || !(0.0..=1.0).contains(&knowledge.progression_goal_target)
        {
            return Err(ConfigError::ValueOutOfRange(
                "knowledge goal targets must be between 0 and 1",
            ));
        }

        self.validate_override_analysis()?;

        let projection = &self.projection;
        if projection.window_days == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "projection window_days must be positive",
            ));
        }
        if projection.streak_gap_days < 1 {
            return Err(ConfigError::ValueOutOfRange(
                "streak_gap_days must be at least 1",
            ));
        }

        Ok(())
    }

    fn validate_override_analysis(&self) -> Result<(), ConfigError> {
        let ovr = &self.override_analysis;
        if ovr.window_days == 0 || ovr.adjustment_window_days == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "override analysis windows must be positive",
            ));
        }
        // Disjoint bias/neglect sets rely on neglect_ratio < 1 < bias_ratio
        if ovr.neglect_ratio <= 0.0 || ovr.neglect_ratio >= 1.0 {
            return Err(ConfigError::ValueOutOfRange(
                "neglect_ratio must be between 0 and 1 exclusive",
            ));
        }
        if ovr.bias_ratio <= 1.0 {
            return Err(ConfigError::InvalidRange("bias_ratio must be > 1.0"));
        }
        if ovr.bias_priority_multiplier <= 0.0 || ovr.neglect_priority_multiplier <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "priority multipliers must be positive",
            ));
        }
        Ok(())
    }

    /// Value of an environment variable; unset is `None`, non-UTF-8 is an error
    fn read_env_var(env_var_name: &str) -> Result<Option<String>, ConfigError> {
        match env::var(env_var_name) {
            Ok(val) => Ok(Some(val)),
            Err(VarError::NotPresent) => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Some(val) = Self::read_env_var(env_var_name)? {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        Self::apply_env_var(
            "LIFTWISE_RECOVERY_LOOKBACK_DAYS",
            &mut self.recovery.lookback_days,
        )?;
        Self::apply_env_var(
            "LIFTWISE_RECOVERY_PREFERENCE",
            &mut self.recovery.default_preference,
        )?;
        Self::apply_env_var(
            "LIFTWISE_RECOVERY_NEGLECT_THRESHOLD_DAYS",
            &mut self.recovery.neglect_threshold_days,
        )?;

        Self::apply_env_var(
            "LIFTWISE_RECOMMENDATION_OVERTRAINING_THRESHOLD",
            &mut self.recommendation.overtraining_fatigue_threshold,
        )?;
        Self::apply_env_var(
            "LIFTWISE_RECOMMENDATION_MAX_ALTERNATES",
            &mut self.recommendation.max_alternates,
        )?;
        Self::apply_env_var(
            "LIFTWISE_RECOMMENDATION_SETS",
            &mut self.recommendation.suggested_sets,
        )?;
        Self::apply_env_var(
            "LIFTWISE_RECOMMENDATION_REPS",
            &mut self.recommendation.suggested_reps,
        )?;

        Self::apply_env_var(
            "LIFTWISE_KNOWLEDGE_CONSISTENCY_WINDOW_DAYS",
            &mut self.knowledge.consistency_window_days,
        )?;

        Self::apply_env_var(
            "LIFTWISE_OVERRIDE_WINDOW_DAYS",
            &mut self.override_analysis.window_days,
        )?;
        Self::apply_env_var(
            "LIFTWISE_OVERRIDE_ADJUSTMENT_WINDOW_DAYS",
            &mut self.override_analysis.adjustment_window_days,
        )?;
        Self::apply_env_var(
            "LIFTWISE_OVERRIDE_BIAS_RATIO",
            &mut self.override_analysis.bias_ratio,
        )?;
        Self::apply_env_var(
            "LIFTWISE_OVERRIDE_NEGLECT_RATIO",
            &mut self.override_analysis.neglect_ratio,
        )?;

        Self::apply_env_var(
            "LIFTWISE_PROJECTION_WINDOW_DAYS",
            &mut self.projection.window_days,
        )?;
        Self::apply_env_var(
            "LIFTWISE_PROJECTION_STREAK_GAP_DAYS",
            &mut self.projection.streak_gap_days,
        )?;
        if let Some(seed) = Self::read_env_var("LIFTWISE_PROJECTION_QUOTE_SEED")? {
            self.projection.quote_seed = Some(seed.parse().map_err(|_| {
                ConfigError::Parse("Invalid LIFTWISE_PROJECTION_QUOTE_SEED".into())
            })?);
        }

        Ok(self)
    }
}
