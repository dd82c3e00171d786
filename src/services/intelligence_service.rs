// ABOUTME: Orchestrates the training intelligence engines over one history snapshot per call
// ABOUTME: Loads history through a provider, stamps calls with a clock, and combines engine outputs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

//! # Intelligence Service
//!
//! Each operation loads exactly one [`HistorySnapshot`] and one reference
//! instant, then runs every engine it needs on that pair. Two operations may
//! see different history if the provider changes in between; a single
//! operation never does.

use crate::providers::core::HistoryProvider;
use chrono::{DateTime, Utc};
use liftwise_core::errors::AppResult;
use liftwise_core::models::{CanonicalMuscleGroup, HistorySnapshot};
use liftwise_intelligence::config::IntelligenceConfig;
use liftwise_intelligence::fatigue::{FatigueAnalysis, FatigueRecoveryEngine, RecoveryPreference};
use liftwise_intelligence::knowledge_level::{
    KnowledgeAssessment, KnowledgeLevel, KnowledgeLevelAssessor, LevelGuidance, PlannedWorkout,
    SafetyCheckResult,
};
use liftwise_intelligence::override_analysis::{
    AdjustedRecommendation, AdjustmentCandidate, MuscleBias, MuscleNeglect, OverrideAnalysis,
    OverridePatternAnalyzer, OverrideReport,
};
use liftwise_intelligence::progress_projection::{
    ComprehensiveReport, ConsistencyProjection, ProgressProjectionEngine, StrengthProjectionReport,
};
use liftwise_intelligence::quotes::SeededQuoteSelector;
use liftwise_intelligence::recommendation_engine::{
    ExerciseRecommendation, RecommendationEngine, RecommendationResult,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Groups listed in the muscle-analysis priority order
const PRIORITY_ORDER_LIMIT: usize = 5;

/// Biases and neglected areas listed in training insights
const INSIGHT_PATTERN_LIMIT: usize = 3;

/// Key insights listed in training insights
const KEY_INSIGHT_LIMIT: usize = 5;

/// Source of the reference instant for engine calls
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    /// Clock that always reports `instant`
    #[must_use]
    pub const fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}

/// Fatigue analysis plus derived views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MuscleAnalysisReport {
    /// User analyzed
    pub user_id: Uuid,
    /// Per-group fatigue state
    pub analysis: FatigueAnalysis,
    /// Top groups by priority
    pub priority_order: Vec<CanonicalMuscleGroup>,
    /// Groups untrained for longer than the neglect threshold
    pub neglected_groups: Vec<CanonicalMuscleGroup>,
    /// Recovered flag per group
    pub recovery_status: BTreeMap<CanonicalMuscleGroup, bool>,
}

/// Recommendation enriched with knowledge level and override adjustment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmartRecommendation {
    /// Plain recommendation
    #[serde(flatten)]
    pub base: RecommendationResult,
    /// Assessed level
    pub knowledge_level: KnowledgeLevel,
    /// Guidance for that level
    pub level_based_advice: LevelGuidance,
    /// Recommendations before adjustment, primary first
    pub original_recommendations: Vec<ExerciseRecommendation>,
    /// Recommendations after bias/neglect adjustment
    pub adjusted_recommendations: Vec<AdjustedRecommendation>,
    /// Top adjusted recommendation
    pub primary_adjusted: Option<AdjustedRecommendation>,
}

/// Combined view across knowledge level, override analysis, and recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingInsights {
    /// User analyzed
    pub user_id: Uuid,
    /// Assessed level
    pub knowledge_level: KnowledgeLevel,
    /// Full assessment
    pub level_assessment: KnowledgeAssessment,
    /// Strongest biases
    pub override_patterns: Vec<MuscleBias>,
    /// Strongest neglect
    pub neglected_areas: Vec<MuscleNeglect>,
    /// Today's primary pick
    pub primary_recommendation: Option<ExerciseRecommendation>,
    /// Most relevant insight lines
    pub key_insights: Vec<String>,
    /// Fixed follow-up actions
    pub action_items: Vec<String>,
}

/// Stateless orchestration over a history provider
#[derive(Clone)]
pub struct IntelligenceService {
    provider: Arc<dyn HistoryProvider>,
    clock: Arc<dyn Clock>,
    config: IntelligenceConfig,
}

impl IntelligenceService {
    /// Service reading from `provider` on the wall clock
    #[must_use]
    pub fn new(provider: Arc<dyn HistoryProvider>, config: IntelligenceConfig) -> Self {
        Self {
            provider,
            clock: Arc::new(SystemClock),
            config,
        }
    }

    /// Replace the clock
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &IntelligenceConfig {
        &self.config
    }

    async fn load(&self, user_id: Uuid) -> AppResult<(HistorySnapshot, DateTime<Utc>)> {
        let snapshot = self.provider.snapshot(user_id).await?;
        Ok((snapshot, self.clock.now()))
    }

    fn fatigue(
        &self,
        snapshot: &HistorySnapshot,
        now: DateTime<Utc>,
        lookback_days: Option<u32>,
        preference: Option<RecoveryPreference>,
    ) -> FatigueAnalysis {
        let recovery = &self.config.recovery;
        FatigueRecoveryEngine::analyze(
            snapshot,
            now,
            lookback_days.unwrap_or(recovery.lookback_days),
            preference.unwrap_or(recovery.default_preference),
        )
    }

    fn recommendation(
        &self,
        snapshot: &HistorySnapshot,
        now: DateTime<Utc>,
        lookback_days: Option<u32>,
        preference: Option<RecoveryPreference>,
    ) -> RecommendationResult {
        let analysis = self.fatigue(snapshot, now, lookback_days, preference);
        RecommendationEngine::recommend(
            &analysis,
            snapshot,
            self.config.recovery.neglect_threshold_days,
            &self.config.recommendation,
        )
    }

    fn assessment(&self, snapshot: &HistorySnapshot, now: DateTime<Utc>) -> KnowledgeAssessment {
        KnowledgeLevelAssessor::assess(snapshot, now, &self.config.knowledge)
    }

    /// Per-group fatigue, priority order, neglect, and recovery
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails to load history
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn muscle_analysis(
        &self,
        user_id: Uuid,
        lookback_days: Option<u32>,
        preference: Option<RecoveryPreference>,
    ) -> AppResult<MuscleAnalysisReport> {
        let (snapshot, now) = self.load(user_id).await?;
        let analysis = self.fatigue(&snapshot, now, lookback_days, preference);

        Ok(MuscleAnalysisReport {
            user_id,
            priority_order: analysis.priority_order(PRIORITY_ORDER_LIMIT),
            neglected_groups: analysis
                .neglected_groups(self.config.recovery.neglect_threshold_days),
            recovery_status: analysis.recovery_status(),
            analysis,
        })
    }

    /// Today's exercise recommendation
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails to load history
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn recommend(
        &self,
        user_id: Uuid,
        lookback_days: Option<u32>,
        preference: Option<RecoveryPreference>,
    ) -> AppResult<RecommendationResult> {
        let (snapshot, now) = self.load(user_id).await?;
        let result = self.recommendation(&snapshot, now, lookback_days, preference);
        info!(availability = ?result.availability, "Recommendation generated");
        Ok(result)
    }

    /// Knowledge-level assessment
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails to load history
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn knowledge_level(&self, user_id: Uuid) -> AppResult<KnowledgeAssessment> {
        let (snapshot, now) = self.load(user_id).await?;
        let assessment = self.assessment(&snapshot, now);
        info!(level = %assessment.level, score = assessment.score, "Knowledge level assessed");
        Ok(assessment)
    }

    /// Guidance for the user's current level
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails to load history
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn level_guidance(&self, user_id: Uuid) -> AppResult<LevelGuidance> {
        let (snapshot, now) = self.load(user_id).await?;
        let assessment = self.assessment(&snapshot, now);
        Ok(KnowledgeLevelAssessor::guidance(
            &assessment,
            &self.config.knowledge,
        ))
    }

    /// Vet a planned workout against the user's level
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails to load history
    #[instrument(skip(self, plan), fields(user_id = %user_id, planned = plan.exercises.len()))]
    pub async fn safety_check(
        &self,
        user_id: Uuid,
        plan: &PlannedWorkout,
    ) -> AppResult<SafetyCheckResult> {
        let (snapshot, now) = self.load(user_id).await?;
        let result =
            KnowledgeLevelAssessor::safety_check(&snapshot, now, plan, &self.config.knowledge);
        info!(
            is_safe = result.is_safe,
            warnings = result.warnings.len(),
            "Safety check completed"
        );
        Ok(result)
    }

    /// Muscle bias, neglect, and progression patterns
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails to load history
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn override_analysis(
        &self,
        user_id: Uuid,
        window_days: Option<u32>,
    ) -> AppResult<OverrideAnalysis> {
        let (snapshot, now) = self.load(user_id).await?;
        let config = &self.config.override_analysis;
        Ok(OverridePatternAnalyzer::analyze(
            &snapshot,
            now,
            window_days.unwrap_or(config.window_days),
            config,
        ))
    }

    /// Narrative report over the override analysis
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails to load history
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn override_report(
        &self,
        user_id: Uuid,
        window_days: Option<u32>,
    ) -> AppResult<OverrideReport> {
        let analysis = self.override_analysis(user_id, window_days).await?;
        Ok(OverridePatternAnalyzer::report(analysis))
    }

    /// Recommendation re-ranked by recent bias and neglect, with level guidance
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails to load history
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn smart_recommendations(
        &self,
        user_id: Uuid,
        lookback_days: Option<u32>,
        preference: Option<RecoveryPreference>,
    ) -> AppResult<SmartRecommendation> {
        let (snapshot, now) = self.load(user_id).await?;
        let base = self.recommendation(&snapshot, now, lookback_days, preference);
        let assessment = self.assessment(&snapshot, now);
        let advice = KnowledgeLevelAssessor::guidance(&assessment, &self.config.knowledge);

        let override_config = &self.config.override_analysis;
        let overrides = OverridePatternAnalyzer::analyze(
            &snapshot,
            now,
            override_config.adjustment_window_days,
            override_config,
        );

        let original: Vec<ExerciseRecommendation> =
            base.all_recommendations().into_iter().cloned().collect();
        let candidates = original
            .iter()
            .map(|recommendation| AdjustmentCandidate {
                exercise_id: Some(recommendation.exercise_id),
                exercise_name: Some(recommendation.exercise_name.clone()),
                muscle_group: recommendation.muscle_group,
                priority: base
                    .muscle_analysis
                    .get(&recommendation.muscle_group)
                    .map_or(0.0, |status| status.priority_score),
            })
            .collect();
        let adjusted =
            OverridePatternAnalyzer::adjust_recommendations(candidates, &overrides, override_config);

        info!(
            level = %assessment.level,
            candidates = adjusted.len(),
            "Smart recommendation generated"
        );

        Ok(SmartRecommendation {
            knowledge_level: assessment.level,
            level_based_advice: advice,
            original_recommendations: original,
            primary_adjusted: adjusted.first().cloned(),
            adjusted_recommendations: adjusted,
            base,
        })
    }

    /// Knowledge level, override patterns, and today's pick in one view
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails to load history
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn training_insights(&self, user_id: Uuid) -> AppResult<TrainingInsights> {
        let (snapshot, now) = self.load(user_id).await?;
        let assessment = self.assessment(&snapshot, now);
        let guidance = KnowledgeLevelAssessor::guidance(&assessment, &self.config.knowledge);
        let overrides = OverridePatternAnalyzer::analyze(
            &snapshot,
            now,
            self.config.override_analysis.window_days,
            &self.config.override_analysis,
        );
        let recommendation = self.recommendation(&snapshot, now, None, None);

        let mut key_insights = vec![format!(
            "You're at {} level with score {:.1}/100",
            assessment.level, assessment.score
        )];
        key_insights.extend(guidance.next_level_goals);
        key_insights.extend(overrides.insights.iter().cloned());
        if let Some(primary) = &recommendation.primary {
            key_insights.push(format!(
                "Today's focus: {} - {}",
                primary.muscle_group, primary.exercise_name
            ));
        }
        key_insights.extend(recommendation.warnings.iter().cloned());
        key_insights.truncate(KEY_INSIGHT_LIMIT);

        Ok(TrainingInsights {
            user_id,
            knowledge_level: assessment.level,
            override_patterns: overrides
                .biases
                .iter()
                .take(INSIGHT_PATTERN_LIMIT)
                .cloned()
                .collect(),
            neglected_areas: overrides
                .neglected_muscles
                .iter()
                .take(INSIGHT_PATTERN_LIMIT)
                .cloned()
                .collect(),
            primary_recommendation: recommendation.primary,
            key_insights,
            action_items: vec![
                format!("Follow {} safety guidelines", assessment.level),
                "Balance your exercise selection".to_owned(),
                "Track progress consistently".to_owned(),
                "Adjust based on recovery".to_owned(),
            ],
            level_assessment: assessment,
        })
    }

    /// Actual versus idealized strength per exercise
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails to load history
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn strength_projections(
        &self,
        user_id: Uuid,
        window_days: Option<u32>,
    ) -> AppResult<StrengthProjectionReport> {
        let (snapshot, now) = self.load(user_id).await?;
        let level = self.assessment(&snapshot, now).level;
        let config = &self.config.projection;
        Ok(ProgressProjectionEngine::strength_projections(
            &snapshot,
            now,
            window_days.unwrap_or(config.window_days),
            level,
            config,
        ))
    }

    /// Actual versus target training frequency
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails to load history
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn consistency_projections(
        &self,
        user_id: Uuid,
        window_days: Option<u32>,
    ) -> AppResult<ConsistencyProjection> {
        let (snapshot, now) = self.load(user_id).await?;
        let level = self.assessment(&snapshot, now).level;
        let config = &self.config.projection;
        Ok(ProgressProjectionEngine::consistency_projection(
            &snapshot,
            now,
            window_days.unwrap_or(config.window_days),
            level,
            config,
        ))
    }

    /// Strength, consistency, score, and narrative in one report
    ///
    /// `quote_seed` overrides the configured seed; with neither set the
    /// quote is drawn from a fresh random seed.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails to load history
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn comprehensive_report(
        &self,
        user_id: Uuid,
        window_days: Option<u32>,
        quote_seed: Option<u64>,
    ) -> AppResult<ComprehensiveReport> {
        let (snapshot, now) = self.load(user_id).await?;
        let level = self.assessment(&snapshot, now).level;
        let config = &self.config.projection;
        let mut quotes = SeededQuoteSelector::from_optional_seed(quote_seed.or(config.quote_seed));

        let report = ProgressProjectionEngine::comprehensive_report(
            &snapshot,
            now,
            window_days.unwrap_or(config.window_days),
            level,
            config,
            &mut quotes,
        );
        info!(
            score = report.overall_progress_score,
            mood = ?report.emotional_summary.mood,
            "Comprehensive progress report generated"
        );
        Ok(report)
    }
}
