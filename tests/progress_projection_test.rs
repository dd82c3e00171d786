// ABOUTME: Integration tests for strength/consistency projections, streaks, and the comprehensive report
// ABOUTME: Uses hand-computed expectations over small histories and a fixed quote selector
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use chrono::{Duration, NaiveDate};
use common::{reference_now, standard_catalog, BENCH_PRESS, DEADLIFT, RUNNING, SQUAT};
use helpers::history_builder::{lift, touch, HistoryBuilder};
use liftwise_core::models::{DataSufficiency, HistorySnapshot};
use liftwise_intelligence::config::intelligence::ProjectionConfig;
use liftwise_intelligence::knowledge_level::KnowledgeLevel;
use liftwise_intelligence::progress_projection::{
    InsightKind, ProgressMood, ProgressProjectionEngine,
};
use liftwise_intelligence::quotes::{
    FixedQuoteSelector, QuoteBand, QuoteSelector, SeededQuoteSelector,
};

const TOLERANCE: f64 = 1e-9;

/// Bench climbing 60 -> 70 over two weeks, squat sliding 100 -> 90 over one
fn mixed_history() -> HistorySnapshot {
    HistoryBuilder::new(reference_now())
        .with_catalog(standard_catalog())
        .weighted_series(BENCH_PRESS, 5, &[60.0, 65.0, 70.0], 7, 1)
        .weighted_series(SQUAT, 5, &[100.0, 90.0], 7, 2)
        .build()
}

fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, 1).unwrap() + Duration::days(offset)
}

#[test]
fn test_one_rep_max_estimate() {
    assert!((ProgressProjectionEngine::estimated_one_rep_max(100.0, Some(1)) - 100.0).abs() < TOLERANCE);
    assert!((ProgressProjectionEngine::estimated_one_rep_max(100.0, None) - 100.0).abs() < TOLERANCE);
    assert!((ProgressProjectionEngine::estimated_one_rep_max(100.0, Some(0)) - 100.0).abs() < TOLERANCE);
    let ten = ProgressProjectionEngine::estimated_one_rep_max(100.0, Some(10));
    assert!((ten - 133.33).abs() < 0.01);
}

#[test]
fn test_streak_tolerates_three_day_gaps() {
    let dates = [day(1), day(2), day(5), day(6)];
    let streaks = ProgressProjectionEngine::streaks(&dates, day(6), 3);
    assert_eq!(streaks.best_streak, 4);
    assert_eq!(streaks.current_streak, 4);

    let stale = ProgressProjectionEngine::streaks(&dates, day(10), 3);
    assert_eq!(stale.best_streak, 4);
    assert_eq!(stale.current_streak, 0);

    let broken = ProgressProjectionEngine::streaks(&[day(1), day(2), day(6), day(7)], day(7), 3);
    assert_eq!(broken.best_streak, 2);
    assert_eq!(broken.current_streak, 2);
}

#[test]
fn test_streak_edge_cases() {
    let empty = ProgressProjectionEngine::streaks(&[], day(0), 3);
    assert_eq!(empty.best_streak, 0);
    assert_eq!(empty.current_streak, 0);

    let unsorted_with_duplicates = [day(4), day(1), day(4), day(2)];
    let streaks = ProgressProjectionEngine::streaks(&unsorted_with_duplicates, day(5), 3);
    assert_eq!(streaks.best_streak, 3);
    assert_eq!(streaks.current_streak, 3);
}

#[test]
fn test_strength_projection_per_exercise() {
    common::init_test_logging();
    let report = ProgressProjectionEngine::strength_projections(
        &mixed_history(),
        reference_now(),
        90,
        KnowledgeLevel::Novice,
        &ProjectionConfig::default(),
    );

    assert_eq!(report.data_sufficiency, DataSufficiency::Sufficient);
    assert!((report.base_progression_rate_kg_week - 1.0).abs() < TOLERANCE);
    let names: Vec<&str> = report
        .projections
        .iter()
        .map(|projection| projection.exercise_name.as_str())
        .collect();
    assert_eq!(names, vec!["Bench Press", "Back Squat"]);

    let bench = &report.projections[0];
    assert!((bench.actual_start_1rm_kg - 70.0).abs() < TOLERANCE);
    assert!((bench.actual_current_1rm_kg - 70.0 * 7.0 / 6.0).abs() < TOLERANCE);
    assert!((bench.weeks - 2.0).abs() < TOLERANCE);
    assert!((bench.actual_consistency - 3.0 / 90.0).abs() < TOLERANCE);
    let weekly = 1.0 + 3.0 / 90.0;
    assert!((bench.projected_weekly_gain_kg - weekly).abs() < TOLERANCE);
    assert!((bench.projected_gain_kg - weekly * 2.0).abs() < TOLERANCE);
    assert!((bench.opportunity_pct - 1.0).abs() < TOLERANCE);
    assert!(bench.missed_opportunity_kg.abs() < TOLERANCE);
    assert!((bench.motivation_score - 100.0).abs() < TOLERANCE);
    assert_eq!(bench.days_behind_schedule, -67);
    assert_eq!(bench.actual_timeline.len(), 3);
    assert_eq!(bench.actual_timeline[2].point, 3);

    assert_eq!(bench.projected_timeline.len(), 3);
    assert_eq!(bench.projected_timeline[0].note, "Starting point");
    assert_eq!(bench.projected_timeline[1].note, "Projected");
    assert_eq!(
        bench.projected_timeline[2].date,
        bench.start_date + Duration::days(14)
    );
    assert!((bench.projected_timeline[2].estimated_1rm_kg - (70.0 + weekly * 2.0)).abs() < TOLERANCE);

    let squat = &report.projections[1];
    assert!((squat.actual_gain_kg - (105.0 - 100.0 * 7.0 / 6.0)).abs() < TOLERANCE);
    assert!(squat.opportunity_pct.abs() < TOLERANCE);
    let squat_missed = 100.0 * 7.0 / 6.0 + (1.0 + 2.0 / 90.0) - 105.0;
    assert!((squat.missed_opportunity_kg - squat_missed).abs() < TOLERANCE);
    assert_eq!(squat.days_behind_schedule, 88);
}

#[test]
fn test_strength_roll_up_and_messages() {
    let report = ProgressProjectionEngine::strength_projections(
        &mixed_history(),
        reference_now(),
        90,
        KnowledgeLevel::Novice,
        &ProjectionConfig::default(),
    );
    let impact = &report.emotional_impact;

    assert!((impact.average_opportunity - 0.5).abs() < TOLERANCE);
    assert_eq!(impact.best_opportunity.as_ref().unwrap().exercise_name, "Bench Press");
    assert_eq!(impact.worst_opportunity.as_ref().unwrap().exercise_name, "Back Squat");
    assert_eq!(
        impact.motivation_messages,
        vec![
            "Room for growth: You could be significantly stronger with more consistency."
                .to_owned(),
            "Star performer: Your Bench Press is near optimal!".to_owned(),
            "Focus area: Back Squat has the most room for improvement.".to_owned(),
        ]
    );

    let summary = report.summary.as_ref().unwrap();
    assert_eq!(summary.total_exercises_projected, 2);
    assert!((summary.average_opportunity_percentage - 50.0).abs() < TOLERANCE);
    assert_eq!(summary.recommended_focus, "Back Squat");
    assert_eq!(
        summary.overall_verdict,
        "Potential: Consider focusing on consistency for greater gains."
    );
}

#[test]
fn test_strength_projection_data_sufficiency() {
    let config = ProjectionConfig::default();

    let empty = HistoryBuilder::new(reference_now())
        .with_catalog(standard_catalog())
        .session_days_ago(3, vec![touch(SQUAT), lift(RUNNING, 1, 1, 10.0)])
        .build();
    let report = ProgressProjectionEngine::strength_projections(
        &empty,
        reference_now(),
        90,
        KnowledgeLevel::Learner,
        &config,
    );
    assert_eq!(report.data_sufficiency, DataSufficiency::NoData);
    assert!(report.projections.is_empty());
    assert!(report.summary.is_none());
    assert!(report.emotional_impact.motivation_messages.is_empty());
    assert!(report.emotional_impact.average_opportunity.abs() < TOLERANCE);

    let single = HistoryBuilder::new(reference_now())
        .with_catalog(standard_catalog())
        .session_days_ago(3, vec![lift(DEADLIFT, 3, 5, 120.0)])
        .build();
    let report = ProgressProjectionEngine::strength_projections(
        &single,
        reference_now(),
        90,
        KnowledgeLevel::Learner,
        &config,
    );
    assert_eq!(report.data_sufficiency, DataSufficiency::Insufficient);
    assert!(report.projections.is_empty());
}

#[test]
fn test_opportunity_always_clipped() {
    let catalog = standard_catalog();
    for seed in 0..25 {
        let snapshot = helpers::synthetic_history::SyntheticHistory::new(seed).snapshot(
            reference_now(),
            &catalog,
            30,
            80,
        );
        for level in KnowledgeLevel::ALL {
            let report = ProgressProjectionEngine::strength_projections(
                &snapshot,
                reference_now(),
                90,
                level,
                &ProjectionConfig::default(),
            );
            for projection in &report.projections {
                assert!((0.0..=1.0).contains(&projection.opportunity_pct));
                assert!(projection.missed_opportunity_kg >= 0.0);
                assert!((0.0..=100.0).contains(&projection.motivation_score));
                assert!(projection.weeks >= 1.0);
            }
            assert!(report.emotional_impact.motivation_messages.len() <= 3);
        }
    }
}

#[test]
fn test_consistency_projection_against_novice_target() {
    let snapshot = HistoryBuilder::new(reference_now())
        .with_catalog(standard_catalog())
        .session_days_ago(6, vec![touch(SQUAT)])
        .session_days_ago(5, vec![touch(BENCH_PRESS)])
        .session_days_ago(2, vec![touch(DEADLIFT)])
        .session_days_ago(1, vec![touch(SQUAT)])
        .build();
    let projection = ProgressProjectionEngine::consistency_projection(
        &snapshot,
        reference_now(),
        28,
        KnowledgeLevel::Novice,
        &ProjectionConfig::default(),
    );

    assert_eq!(projection.actual_workouts, 4);
    assert!((projection.actual_rate_per_week - 1.0).abs() < TOLERANCE);
    assert!((projection.target_rate_per_week - 2.5).abs() < TOLERANCE);
    assert!((projection.consistency_gap - 0.6).abs() < TOLERANCE);
    assert_eq!(projection.best_streak, 4);
    assert_eq!(projection.current_streak, 4);
    assert_eq!(projection.projected_streak, 6);
    assert_eq!(
        projection.missed_workouts,
        projection.projected_workouts - 4
    );
    assert_eq!(
        projection.messages.last().unwrap(),
        "Beginner focus: Build the habit with 2-3 sessions/week."
    );
    assert!(projection.messages[0].starts_with("Opportunity: You missed ~"));
}

#[test]
fn test_consistency_projection_without_history() {
    let snapshot = HistoryBuilder::new(reference_now()).build();
    let projection = ProgressProjectionEngine::consistency_projection(
        &snapshot,
        reference_now(),
        90,
        KnowledgeLevel::Expert,
        &ProjectionConfig::default(),
    );
    assert_eq!(projection.data_sufficiency, DataSufficiency::NoData);
    assert_eq!(projection.actual_workouts, 0);
    assert!((projection.consistency_gap - 1.0).abs() < TOLERANCE);
    assert_eq!(projection.current_streak, 0);
    assert_eq!(
        projection.messages[1],
        "Time to restart your streak! Even short workouts count."
    );

    let zero_window = ProgressProjectionEngine::consistency_projection(
        &snapshot,
        reference_now(),
        0,
        KnowledgeLevel::Expert,
        &ProjectionConfig::default(),
    );
    assert!(zero_window.actual_rate_per_week.abs() < TOLERANCE);
    assert_eq!(zero_window.projected_workouts, 0);
}

#[test]
fn test_projections_accept_unrepresentable_windows() {
    let snapshot = mixed_history();
    let config = ProjectionConfig::default();

    let strength = ProgressProjectionEngine::strength_projections(
        &snapshot,
        reference_now(),
        u32::MAX,
        KnowledgeLevel::Novice,
        &config,
    );
    assert_eq!(strength.period_days, u32::MAX);
    assert_eq!(strength.projections.len(), 2);

    let consistency = ProgressProjectionEngine::consistency_projection(
        &snapshot,
        reference_now(),
        200_000_000,
        KnowledgeLevel::Novice,
        &config,
    );
    assert_eq!(consistency.actual_workouts, 5);
    assert!(consistency.consistency_gap <= 1.0);

    let report = ProgressProjectionEngine::comprehensive_report(
        &snapshot,
        reference_now(),
        u32::MAX,
        KnowledgeLevel::Novice,
        &config,
        &mut FixedQuoteSelector::new(0),
    );
    assert!((0.0..=100.0).contains(&report.overall_progress_score));
}

#[test]
fn test_comprehensive_report_with_fixed_quote() {
    let mut quotes = FixedQuoteSelector::new(0);
    let report = ProgressProjectionEngine::comprehensive_report(
        &mixed_history(),
        reference_now(),
        90,
        KnowledgeLevel::Novice,
        &ProjectionConfig::default(),
        &mut quotes,
    );

    assert!((report.score_breakdown.strength_progress - 25.0).abs() < TOLERANCE);
    let gap = (2.5 - 5.0 / 90.0 * 7.0) / 2.5;
    assert!((report.score_breakdown.consistency_progress - (1.0 - gap) * 50.0).abs() < TOLERANCE);
    assert!((report.overall_progress_score - (25.0 + (1.0 - gap) * 50.0)).abs() < TOLERANCE);
    assert!((report.score_breakdown.max_possible - 100.0).abs() < TOLERANCE);

    let summary = &report.emotional_summary;
    assert_eq!(summary.mood, ProgressMood::Opportunity);
    assert_eq!(summary.key_metric, "33/100 progress score");
    assert_eq!(
        summary.motivational_quote,
        "The best time to start was yesterday. The second best time is now."
    );
    assert_eq!(summary.potential_unlock.workouts, 27);
    assert_eq!(
        summary.potential_unlock.summary,
        "Potential: 13kg stronger, 27 more workouts"
    );

    let kinds: Vec<InsightKind> = report
        .actionable_insights
        .iter()
        .map(|insight| insight.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            InsightKind::Strength,
            InsightKind::Consistency,
            InsightKind::Education
        ]
    );
    assert_eq!(
        report.actionable_insights[0].message,
        "Focus on Back Squat - 12.7kg potential"
    );

    let potential = &report.next_30_day_potential;
    assert_eq!(potential.timeframe_days, 30);
    assert_eq!(potential.consistency_potential_workouts, 6);
    assert_eq!(potential.commitment_required.weekly_sessions, 3);
    assert_eq!(potential.commitment_required.focus_minutes, 180);
    assert_eq!(potential.commitment_required.consistency_days, 20);
    assert_eq!(potential.achievable_goals[0], "Add 3.8kg to your lifts");
}

#[test]
fn test_quote_selection_is_injectable() {
    assert_eq!(QuoteBand::for_score(70.0), QuoteBand::Medium);
    assert_eq!(QuoteBand::for_score(70.1), QuoteBand::High);
    assert_eq!(QuoteBand::for_score(40.0), QuoteBand::Low);

    let mut fixed = FixedQuoteSelector::new(0);
    assert_eq!(
        fixed.quote_for_score(95.0),
        "The only bad workout is the one that didn't happen."
    );
    assert_eq!(
        fixed.quote_for_score(55.0),
        "It's not about having time, it's about making time."
    );

    let bank = QuoteBand::High.quotes();
    let mut wrapped = FixedQuoteSelector::new(bank.len());
    assert_eq!(wrapped.quote_for_score(95.0), bank[0]);

    let mut first = SeededQuoteSelector::new(7);
    let mut second = SeededQuoteSelector::new(7);
    for score in [10.0, 50.0, 90.0, 90.0, 20.0] {
        let quote = first.quote_for_score(score);
        assert_eq!(quote, second.quote_for_score(score));
        assert!(QuoteBand::for_score(score).quotes().contains(&quote));
    }
}
