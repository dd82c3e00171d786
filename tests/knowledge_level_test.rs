// ABOUTME: Integration tests for knowledge-level scoring, level guidance, and planned-workout safety checks
// ABOUTME: Exercises neutral defaults for sparse history and each safety warning threshold
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use common::{reference_now, standard_catalog, BENCH_PRESS, INCLINE_PRESS, RUNNING, SQUAT};
use helpers::history_builder::{lift, touch, HistoryBuilder};
use liftwise_core::models::DataSufficiency;
use liftwise_intelligence::config::intelligence::KnowledgeConfig;
use liftwise_intelligence::knowledge_level::{
    KnowledgeLevel, KnowledgeLevelAssessor, PlannedExercise, PlannedWorkout, SafetyWarningKind,
};

fn builder() -> HistoryBuilder {
    HistoryBuilder::new(reference_now()).with_catalog(standard_catalog())
}

fn plan(exercises: &[(i64, u32, Option<f64>)]) -> PlannedWorkout {
    PlannedWorkout {
        exercises: exercises
            .iter()
            .map(|(exercise_id, sets, weight_kg)| PlannedExercise {
                exercise_id: *exercise_id,
                sets: *sets,
                reps: Some(8),
                weight_kg: *weight_kg,
            })
            .collect(),
    }
}

/// Five weekly bench sessions, all older than the consistency window, each heavier than the last
fn seasoned_history() -> HistoryBuilder {
    builder().weighted_series(BENCH_PRESS, 5, &[50.0, 52.5, 55.0, 57.5, 60.0], 7, 200)
}

#[test]
fn test_empty_history_is_novice_with_neutral_progression() {
    common::init_test_logging();
    let snapshot = builder().build();
    let assessment =
        KnowledgeLevelAssessor::assess(&snapshot, reference_now(), &KnowledgeConfig::default());

    assert_eq!(assessment.level, KnowledgeLevel::Novice);
    assert_eq!(assessment.training_age_days, 0);
    assert!(assessment.consistency_score.abs() < f64::EPSILON);
    assert!((assessment.progression_quality - 0.5).abs() < f64::EPSILON);
    assert!((assessment.score - 10.0).abs() < 1e-9);
    assert_eq!(assessment.data_sufficiency, DataSufficiency::NoData);
    assert_eq!(assessment.progression_data_points, 0);
}

#[test]
fn test_level_boundaries() {
    assert_eq!(KnowledgeLevel::from_score(0.0), KnowledgeLevel::Novice);
    assert_eq!(KnowledgeLevel::from_score(29.99), KnowledgeLevel::Novice);
    assert_eq!(KnowledgeLevel::from_score(30.0), KnowledgeLevel::Learner);
    assert_eq!(KnowledgeLevel::from_score(59.99), KnowledgeLevel::Learner);
    assert_eq!(KnowledgeLevel::from_score(60.0), KnowledgeLevel::Practitioner);
    assert_eq!(KnowledgeLevel::from_score(80.0), KnowledgeLevel::Expert);
    assert_eq!(KnowledgeLevel::from_score(100.0), KnowledgeLevel::Expert);
}

#[test]
fn test_level_score_is_bounded_and_monotonic() {
    let ages = [0_i64, 15, 45, 90, 179, 180, 365, 5000];
    let fractions = [0.0, 0.1, 0.25, 0.5, 0.75, 1.0];

    for age in ages {
        for consistency in fractions {
            for progression in fractions {
                let score = KnowledgeLevelAssessor::level_score(age, consistency, progression);
                assert!((0.0..=100.0).contains(&score));
            }
        }
    }

    for window in ages.windows(2) {
        assert!(
            KnowledgeLevelAssessor::level_score(window[1], 0.3, 0.4)
                >= KnowledgeLevelAssessor::level_score(window[0], 0.3, 0.4)
        );
    }
    for window in fractions.windows(2) {
        assert!(
            KnowledgeLevelAssessor::level_score(60, window[1], 0.4)
                >= KnowledgeLevelAssessor::level_score(60, window[0], 0.4)
        );
        assert!(
            KnowledgeLevelAssessor::level_score(60, 0.3, window[1])
                >= KnowledgeLevelAssessor::level_score(60, 0.3, window[0])
        );
    }

    assert!((KnowledgeLevelAssessor::level_score(365, 1.0, 1.0) - 100.0).abs() < 1e-9);
}

#[test]
fn test_consistency_counts_distinct_days_in_window() {
    let mut history = builder();
    for days_ago in 1..=9 {
        history = history.session_days_ago(days_ago, vec![touch(SQUAT)]);
    }
    // Second session on an already-counted day, and one outside the window
    let snapshot = history
        .session_hours_ago(25, vec![touch(BENCH_PRESS)])
        .session_days_ago(120, vec![touch(SQUAT)])
        .build();

    let score = KnowledgeLevelAssessor::consistency_score(&snapshot, reference_now(), 90);
    assert!((score - 0.1).abs() < 1e-12);
    assert!(KnowledgeLevelAssessor::consistency_score(&snapshot, reference_now(), 0).abs() < f64::EPSILON);
    assert_eq!(
        KnowledgeLevelAssessor::training_age_days(&snapshot, reference_now()),
        120
    );
}

#[test]
fn test_progression_quality_averages_per_exercise_ratios() {
    let snapshot = builder()
        .weighted_series(BENCH_PRESS, 5, &[60.0, 62.5, 65.0, 65.0], 7, 1)
        .weighted_series(SQUAT, 5, &[100.0, 95.0, 100.0], 7, 2)
        .session_days_ago(3, vec![lift(RUNNING, 1, 1, 20.0)])
        .build();

    let (quality, points) = KnowledgeLevelAssessor::progression_quality(&snapshot);
    assert_eq!(points, 7, "cardio records are not strength data");
    let expected = (2.0 / 3.0 + 0.5) / 2.0;
    assert!((quality - expected).abs() < 1e-12);
}

#[test]
fn test_progression_quality_neutral_when_sparse() {
    let snapshot = builder()
        .weighted_series(BENCH_PRESS, 5, &[60.0, 65.0, 70.0], 7, 1)
        .build();
    let (quality, points) = KnowledgeLevelAssessor::progression_quality(&snapshot);
    assert_eq!(points, 3);
    assert!((quality - 0.5).abs() < f64::EPSILON);

    let assessment =
        KnowledgeLevelAssessor::assess(&snapshot, reference_now(), &KnowledgeConfig::default());
    assert_eq!(assessment.data_sufficiency, DataSufficiency::Insufficient);

    // Enough records overall, but no single exercise has three
    let spread = builder()
        .weighted_series(BENCH_PRESS, 5, &[60.0, 65.0], 7, 1)
        .weighted_series(SQUAT, 5, &[100.0, 105.0], 7, 2)
        .build();
    let (quality, points) = KnowledgeLevelAssessor::progression_quality(&spread);
    assert_eq!(points, 4);
    assert!((quality - 0.5).abs() < f64::EPSILON);
}

#[test]
fn test_long_steady_progress_reaches_practitioner() {
    let snapshot = seasoned_history().build();
    let assessment =
        KnowledgeLevelAssessor::assess(&snapshot, reference_now(), &KnowledgeConfig::default());

    assert_eq!(assessment.level, KnowledgeLevel::Practitioner);
    assert!((assessment.breakdown.age_points - 40.0).abs() < f64::EPSILON);
    assert!(assessment.breakdown.consistency_points.abs() < f64::EPSILON);
    assert!((assessment.breakdown.progression_points - 20.0).abs() < f64::EPSILON);
    assert_eq!(assessment.data_sufficiency, DataSufficiency::Sufficient);
}

#[test]
fn test_guidance_goals_for_novice_and_expert() {
    let config = KnowledgeConfig::default();
    let snapshot = builder().build();
    let assessment = KnowledgeLevelAssessor::assess(&snapshot, reference_now(), &config);
    let guidance = KnowledgeLevelAssessor::guidance(&assessment, &config);

    assert_eq!(guidance.level, KnowledgeLevel::Novice);
    assert_eq!(guidance.focus_areas.len(), 4);
    assert_eq!(
        guidance.next_level_goals,
        vec![
            "Increase consistency from 0% to 70%".to_owned(),
            "Improve progression quality from 50% to 60%".to_owned(),
            "Continue training for 30 more days".to_owned(),
        ]
    );

    let mut expert = assessment;
    expert.level = KnowledgeLevel::Expert;
    let guidance = KnowledgeLevelAssessor::guidance(&expert, &config);
    assert_eq!(guidance.next_level_goals[0], "Maintain expert status");
    assert_eq!(guidance.next_level_goals.len(), 3);
}

#[test]
fn test_novice_frequency_warning_fires_at_the_weekly_limit() {
    let config = KnowledgeConfig::default();
    let mut history = builder();
    for days_ago in 1..=3 {
        history = history.session_days_ago(days_ago, vec![touch(SQUAT)]);
    }
    let three = history.clone().build();
    let result = KnowledgeLevelAssessor::safety_check(
        &three,
        reference_now(),
        &PlannedWorkout::default(),
        &config,
    );
    assert_eq!(result.level, KnowledgeLevel::Novice);
    assert!(result.is_safe);
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].kind, SafetyWarningKind::CoachingTip);
    assert!(result.guidance.is_some());

    let four = history
        .session_days_ago(4, vec![touch(SQUAT)])
        .build();
    let result = KnowledgeLevelAssessor::safety_check(
        &four,
        reference_now(),
        &PlannedWorkout::default(),
        &config,
    );
    assert!(!result.is_safe);
    assert_eq!(result.warnings[0].kind, SafetyWarningKind::HighFrequency);
    assert_eq!(
        result.warnings[0].message,
        "High frequency: 4 sessions this week (max: 4)"
    );
}

#[test]
fn test_volume_warning_sums_sets_per_group() {
    let config = KnowledgeConfig::default();
    let snapshot = builder().build();

    let heavy = plan(&[
        (BENCH_PRESS, 8, None),
        (INCLINE_PRESS, 6, None),
        (SQUAT, 4, None),
    ]);
    let result = KnowledgeLevelAssessor::safety_check(&snapshot, reference_now(), &heavy, &config);
    let volume: Vec<&str> = result
        .warnings
        .iter()
        .filter(|warning| warning.kind == SafetyWarningKind::HighVolume)
        .map(|warning| warning.message.as_str())
        .collect();
    assert_eq!(volume, vec!["High volume for Chest: 14 sets (max: 12)"]);

    let at_limit = plan(&[(BENCH_PRESS, 6, None), (INCLINE_PRESS, 6, None)]);
    let result =
        KnowledgeLevelAssessor::safety_check(&snapshot, reference_now(), &at_limit, &config);
    assert!(result.is_safe);
}

#[test]
fn test_volume_total_saturates_instead_of_wrapping() {
    let config = KnowledgeConfig::default();
    let snapshot = builder().build();

    let absurd = plan(&[(BENCH_PRESS, u32::MAX, None), (INCLINE_PRESS, 2, None)]);
    let result = KnowledgeLevelAssessor::safety_check(&snapshot, reference_now(), &absurd, &config);

    assert!(!result.is_safe);
    let volume: Vec<&str> = result
        .warnings
        .iter()
        .filter(|warning| warning.kind == SafetyWarningKind::HighVolume)
        .map(|warning| warning.message.as_str())
        .collect();
    assert_eq!(
        volume,
        vec![format!("High volume for Chest: {} sets (max: 12)", u32::MAX).as_str()]
    );
}

#[test]
fn test_consistency_tolerates_unrepresentable_window() {
    let snapshot = builder()
        .session_days_ago(400, vec![touch(SQUAT)])
        .session_days_ago(2, vec![touch(SQUAT)])
        .build();

    let score = KnowledgeLevelAssessor::consistency_score(&snapshot, reference_now(), u32::MAX);
    assert!(score > 0.0);
    assert!(score < 1e-6);
}

#[test]
fn test_weight_jump_compares_against_last_recorded_weight() {
    let config = KnowledgeConfig::default();
    let snapshot = builder()
        .session_days_ago(3, vec![lift(BENCH_PRESS, 3, 8, 60.0)])
        .build();

    let jump = plan(&[(BENCH_PRESS, 3, Some(65.0))]);
    let result = KnowledgeLevelAssessor::safety_check(&snapshot, reference_now(), &jump, &config);
    let warning = result
        .warnings
        .iter()
        .find(|warning| warning.kind == SafetyWarningKind::LargeWeightJump)
        .unwrap();
    assert_eq!(warning.message, "Large weight jump: +5.0kg (max: 2.5kg)");

    let small = plan(&[(BENCH_PRESS, 3, Some(62.5))]);
    let result = KnowledgeLevelAssessor::safety_check(&snapshot, reference_now(), &small, &config);
    assert!(result.is_safe);

    // No prior record, or a zero planned weight, is never a jump
    let unknown = plan(&[(SQUAT, 3, Some(200.0)), (BENCH_PRESS, 3, Some(0.0))]);
    let result = KnowledgeLevelAssessor::safety_check(&snapshot, reference_now(), &unknown, &config);
    assert!(result.is_safe);
}

#[test]
fn test_zero_last_weight_skips_jump_check() {
    let config = KnowledgeConfig::default();
    let snapshot = builder()
        .session_days_ago(5, vec![lift(BENCH_PRESS, 3, 8, 60.0)])
        .session_days_ago(2, vec![lift(BENCH_PRESS, 3, 8, 0.0)])
        .build();
    let jump = plan(&[(BENCH_PRESS, 3, Some(90.0))]);
    let result = KnowledgeLevelAssessor::safety_check(&snapshot, reference_now(), &jump, &config);
    assert!(result.is_safe);
}

#[test]
fn test_practitioner_without_warnings_gets_no_guidance() {
    let snapshot = seasoned_history().build();
    let result = KnowledgeLevelAssessor::safety_check(
        &snapshot,
        reference_now(),
        &PlannedWorkout::default(),
        &KnowledgeConfig::default(),
    );
    assert_eq!(result.level, KnowledgeLevel::Practitioner);
    assert!(result.warnings.is_empty());
    assert!(result.is_safe);
    assert!(result.guidance.is_none());
}
