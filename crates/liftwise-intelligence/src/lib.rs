// ABOUTME: Training intelligence engines computed over an immutable history snapshot
// ABOUTME: Muscle classification, fatigue, recommendations, knowledge level, override bias, projections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

#![deny(unsafe_code)]

//! # Liftwise Intelligence
//!
//! Every engine is a pure function of a [`HistorySnapshot`](liftwise_core::models::HistorySnapshot),
//! a reference instant, and its configuration section. Engines never read the
//! clock or any store themselves, so results are reproducible for a fixed `now`.
//!
//! ## Modules
//!
//! - **`muscle_classifier`**: free-text muscle labels to canonical groups
//! - **`fatigue`**: per-group fatigue, priority, and recovery state
//! - **`recommendation_engine`**: daily exercise picks from fatigue and the catalog
//! - **`knowledge_level`**: training-experience level and plan safety checks
//! - **`override_analysis`**: muscle bias, neglect, and progression patterns
//! - **`progress_projection`**: actual versus idealized strength and consistency
//! - **`quotes`**: motivational quote selection
//! - **config**: tunables with environment overrides

/// Engine configuration with environment overrides
pub mod config;

/// Per-group fatigue and recovery
pub mod fatigue;

/// Training-experience level assessment and plan safety checks
pub mod knowledge_level;

/// Keyword classification of muscle labels
pub mod muscle_classifier;

/// Muscle bias, neglect, and progression patterns in self-chosen training
pub mod override_analysis;

/// Strength and consistency projections
pub mod progress_projection;

/// Motivational quote bank
pub mod quotes;

/// Daily exercise recommendations
pub mod recommendation_engine;

/// Look-back window arithmetic
pub mod window;

pub use config::IntelligenceConfig;
pub use fatigue::{FatigueAnalysis, FatigueRecoveryEngine, RecoveryPreference};
pub use knowledge_level::{KnowledgeLevel, KnowledgeLevelAssessor};
pub use muscle_classifier::MuscleGroupClassifier;
pub use override_analysis::OverridePatternAnalyzer;
pub use progress_projection::ProgressProjectionEngine;
pub use recommendation_engine::RecommendationEngine;
