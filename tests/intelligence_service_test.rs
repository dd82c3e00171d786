// ABOUTME: End-to-end tests for the intelligence service over an in-memory provider and a frozen clock
// ABOUTME: Covers the zero-history neutral state, smart re-ranking, insights, projections, and error propagation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{
    reference_now, standard_catalog, BARBELL_ROW, BENCH_PRESS, BICEP_CURL, DEADLIFT,
    OVERHEAD_PRESS, SQUAT,
};
use helpers::history_builder::{lift, touch, HistoryBuilder};
use liftwise::providers::{HistoryProvider, InMemoryHistoryProvider};
use liftwise::services::{Clock, FixedClock, IntelligenceService, SystemClock};
use liftwise::{AppError, ErrorCode};
use liftwise_core::errors::AppResult;
use liftwise_core::models::{CanonicalMuscleGroup, ExerciseDefinition, ExerciseId, WorkoutSession};
use liftwise_intelligence::config::IntelligenceConfig;
use liftwise_intelligence::fatigue::RecoveryPreference;
use liftwise_intelligence::knowledge_level::{
    KnowledgeLevel, PlannedExercise, PlannedWorkout, SafetyWarningKind,
};
use liftwise_intelligence::quotes::QuoteBand;
use liftwise_intelligence::recommendation_engine::RecommendationAvailability;
use std::sync::Arc;
use uuid::Uuid;

fn service_for(history: &HistoryBuilder) -> IntelligenceService {
    common::init_test_logging();
    let provider = InMemoryHistoryProvider::with_data(history.catalog(), history.sessions()).unwrap();
    IntelligenceService::new(Arc::new(provider), IntelligenceConfig::default())
        .with_clock(Arc::new(FixedClock::new(reference_now())))
}

/// Shoulder-heavy block two to three weeks ago; nothing in the last seven days
fn shoulder_block() -> HistoryBuilder {
    HistoryBuilder::new(reference_now())
        .with_catalog(standard_catalog())
        .session_days_ago(20, vec![touch(OVERHEAD_PRESS), touch(OVERHEAD_PRESS)])
        .session_days_ago(18, vec![touch(OVERHEAD_PRESS), touch(OVERHEAD_PRESS)])
        .session_days_ago(
            16,
            vec![touch(OVERHEAD_PRESS), touch(OVERHEAD_PRESS), touch(BICEP_CURL)],
        )
        .session_days_ago(14, vec![touch(DEADLIFT), touch(BARBELL_ROW), touch(SQUAT)])
}

struct UnavailableProvider;

#[async_trait]
impl HistoryProvider for UnavailableProvider {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    async fn completed_sessions(
        &self,
        _user_id: Uuid,
        _since: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<WorkoutSession>> {
        Err(AppError::storage("history store offline"))
    }

    async fn exercise(&self, _id: ExerciseId) -> AppResult<Option<ExerciseDefinition>> {
        Ok(None)
    }

    async fn exercises(&self, _active_only: bool) -> AppResult<Vec<ExerciseDefinition>> {
        Ok(Vec::new())
    }

    async fn exercises_by_muscle_label(&self, _label: &str) -> AppResult<Vec<ExerciseDefinition>> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn test_zero_history_user_gets_neutral_state() {
    let history = HistoryBuilder::new(reference_now()).with_catalog(standard_catalog());
    let service = service_for(&history);
    let user_id = history.user_id();

    let assessment = service.knowledge_level(user_id).await.unwrap();
    assert_eq!(assessment.training_age_days, 0);
    assert_eq!(assessment.level, KnowledgeLevel::Novice);
    assert!(assessment.consistency_score.abs() < f64::EPSILON);
    assert!((assessment.progression_quality - 0.5).abs() < f64::EPSILON);

    let muscles = service.muscle_analysis(user_id, None, None).await.unwrap();
    assert_eq!(muscles.analysis.groups.len(), 7);
    assert!(muscles.recovery_status.values().all(|recovered| *recovered));
    assert!(muscles
        .analysis
        .groups
        .values()
        .all(|status| (status.priority_score - 0.9).abs() < f64::EPSILON));
    assert_eq!(muscles.priority_order.len(), 5);
    assert_eq!(muscles.neglected_groups.len(), 7);

    let recommendation = service.recommend(user_id, None, None).await.unwrap();
    assert_eq!(
        recommendation.availability,
        RecommendationAvailability::Available
    );
    assert_eq!(recommendation.primary.unwrap().exercise_id, BENCH_PRESS);
    assert_eq!(
        recommendation.recovery_preference,
        RecoveryPreference::Moderate
    );
}

#[tokio::test]
async fn test_request_parameters_override_config_defaults() {
    let history = HistoryBuilder::new(reference_now())
        .with_catalog(standard_catalog())
        .session_hours_ago(30, vec![touch(DEADLIFT)])
        .session_days_ago(10, vec![touch(SQUAT)]);
    let service = service_for(&history);

    let default_view = service
        .muscle_analysis(history.user_id(), None, None)
        .await
        .unwrap();
    assert!(!default_view.recovery_status[&CanonicalMuscleGroup::Back]);
    assert_eq!(default_view.analysis.lookback_days, 7);
    assert_eq!(
        default_view.analysis.status(CanonicalMuscleGroup::Legs).unwrap().session_count,
        0
    );

    let custom = service
        .muscle_analysis(
            history.user_id(),
            Some(14),
            Some(RecoveryPreference::Aggressive),
        )
        .await
        .unwrap();
    assert!(custom.recovery_status[&CanonicalMuscleGroup::Back]);
    assert_eq!(
        custom.analysis.status(CanonicalMuscleGroup::Legs).unwrap().session_count,
        1
    );
}

#[tokio::test]
async fn test_smart_recommendations_promote_neglected_groups() {
    let history = shoulder_block();
    let service = service_for(&history);

    let smart = service
        .smart_recommendations(history.user_id(), None, None)
        .await
        .unwrap();

    assert_eq!(smart.knowledge_level, KnowledgeLevel::Novice);
    assert_eq!(smart.base.primary.as_ref().unwrap().exercise_id, BENCH_PRESS);
    assert_eq!(smart.original_recommendations.len(), 6);
    assert_eq!(smart.adjusted_recommendations.len(), 6);

    let top = smart.primary_adjusted.as_ref().unwrap();
    assert_eq!(top.candidate.exercise_id, Some(SQUAT));
    assert_eq!(top.candidate.muscle_group, CanonicalMuscleGroup::Legs);
    assert!((top.adjusted_priority - 0.9 * 1.3).abs() < 1e-9);
    assert_eq!(top.adjustment_reason, "Needs attention (10.0% of workouts)");

    let rest: Vec<Option<ExerciseId>> = smart.adjusted_recommendations[1..]
        .iter()
        .map(|entry| entry.candidate.exercise_id)
        .collect();
    assert_eq!(
        rest,
        vec![
            Some(BENCH_PRESS),
            Some(2),
            Some(3),
            Some(4),
            Some(DEADLIFT)
        ]
    );

    let json = serde_json::to_value(&smart).unwrap();
    assert!(json.get("primary").is_some(), "base result is flattened");
    assert_eq!(json["knowledge_level"], "novice");
}

#[tokio::test]
async fn test_training_insights_combine_every_engine() {
    let history = shoulder_block();
    let service = service_for(&history);

    let insights = service.training_insights(history.user_id()).await.unwrap();
    assert_eq!(insights.knowledge_level, KnowledgeLevel::Novice);
    assert_eq!(insights.level_assessment.training_age_days, 20);
    assert_eq!(
        insights.key_insights,
        vec![
            "You're at novice level with score 16.2/100".to_owned(),
            "Increase consistency from 4% to 70%".to_owned(),
            "Improve progression quality from 50% to 60%".to_owned(),
            "Continue training for 10 more days".to_owned(),
            "You train Shoulders 35.0% more than average".to_owned(),
        ]
    );

    let biased: Vec<CanonicalMuscleGroup> = insights
        .override_patterns
        .iter()
        .map(|bias| bias.muscle_group)
        .collect();
    assert_eq!(biased, vec![CanonicalMuscleGroup::Shoulders]);
    let neglected: Vec<CanonicalMuscleGroup> = insights
        .neglected_areas
        .iter()
        .map(|neglect| neglect.muscle_group)
        .collect();
    assert_eq!(
        neglected,
        vec![CanonicalMuscleGroup::Legs, CanonicalMuscleGroup::Arms]
    );
    assert_eq!(
        insights.primary_recommendation.unwrap().exercise_name,
        "Bench Press"
    );
    assert_eq!(insights.action_items[0], "Follow novice safety guidelines");
    assert_eq!(insights.action_items.len(), 4);
}

#[tokio::test]
async fn test_safety_check_and_guidance() {
    let history = HistoryBuilder::new(reference_now())
        .with_catalog(standard_catalog())
        .session_days_ago(3, vec![lift(BENCH_PRESS, 3, 8, 60.0)]);
    let service = service_for(&history);

    let plan = PlannedWorkout {
        exercises: vec![PlannedExercise {
            exercise_id: BENCH_PRESS,
            sets: 4,
            reps: Some(6),
            weight_kg: Some(70.0),
        }],
    };
    let result = service.safety_check(history.user_id(), &plan).await.unwrap();
    assert!(!result.is_safe);
    assert!(result
        .warnings
        .iter()
        .any(|warning| warning.kind == SafetyWarningKind::LargeWeightJump));

    let guidance = service.level_guidance(history.user_id()).await.unwrap();
    assert_eq!(guidance.level, KnowledgeLevel::Novice);
    assert!(!guidance.next_level_goals.is_empty());
}

#[tokio::test]
async fn test_override_report_uses_configured_window() {
    let history = shoulder_block();
    let service = service_for(&history);

    let report = service
        .override_report(history.user_id(), None)
        .await
        .unwrap();
    assert_eq!(report.period_analyzed_days, 90);
    assert_eq!(
        report.summary,
        "Mixed training patterns with clear favorites and some neglect"
    );

    let narrow = service
        .override_analysis(history.user_id(), Some(7))
        .await
        .unwrap();
    assert_eq!(narrow.total_workouts, 0);
}

#[tokio::test]
async fn test_projections_through_the_service() {
    let history = HistoryBuilder::new(reference_now())
        .with_catalog(standard_catalog())
        .weighted_series(BENCH_PRESS, 5, &[60.0, 65.0, 70.0], 7, 1)
        .weighted_series(SQUAT, 5, &[100.0, 90.0], 7, 2);
    let service = service_for(&history);
    let user_id = history.user_id();

    let strength = service.strength_projections(user_id, None).await.unwrap();
    assert_eq!(strength.period_days, 90);
    assert_eq!(strength.projections.len(), 2);

    let consistency = service.consistency_projections(user_id, Some(30)).await.unwrap();
    assert_eq!(consistency.period_days, 30);
    assert_eq!(consistency.actual_workouts, 5);

    let first = service
        .comprehensive_report(user_id, None, Some(11))
        .await
        .unwrap();
    let second = service
        .comprehensive_report(user_id, None, Some(11))
        .await
        .unwrap();
    assert_eq!(
        first.emotional_summary.motivational_quote,
        second.emotional_summary.motivational_quote
    );
    let band = QuoteBand::for_score(first.overall_progress_score);
    assert!(band
        .quotes()
        .iter()
        .any(|quote| *quote == first.emotional_summary.motivational_quote));
    assert_eq!(first.generated_at, reference_now());
}

#[tokio::test]
async fn test_provider_errors_propagate() {
    let service = IntelligenceService::new(
        Arc::new(UnavailableProvider),
        IntelligenceConfig::default(),
    );

    let error = service.knowledge_level(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::StorageError);
    assert!(service
        .comprehensive_report(Uuid::new_v4(), None, None)
        .await
        .is_err());
}

#[test]
fn test_clocks() {
    let fixed = FixedClock::new(reference_now());
    assert_eq!(fixed.now(), reference_now());

    let before = Utc::now();
    let now = SystemClock.now();
    assert!(now >= before);
}
