// ABOUTME: Knowledge-level assessment from training age, consistency, and progression quality
// ABOUTME: Derives per-level safety thresholds and evaluates planned workouts against them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

//! # Knowledge Level Assessment
//!
//! Scores a user 0-100 from three components:
//!
//! - training age, saturating at 180 days (40 points)
//! - consistency, the share of days in the window with a session (40 points)
//! - progression quality, how often working weights go up (20 points)
//!
//! The score maps onto four tiers. Each tier carries a fixed table of safety
//! limits used to vet a planned workout before it is performed.

use crate::config::intelligence::KnowledgeConfig;
use crate::muscle_classifier::MuscleGroupClassifier;
use crate::window::window_start;
use chrono::{DateTime, NaiveDate, Utc};
use liftwise_core::models::{
    CanonicalMuscleGroup, DataSufficiency, ExerciseId, HistorySnapshot,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::debug;

/// Training age (days) at which the age component saturates
const AGE_SATURATION_DAYS: f64 = 180.0;

/// Weighted strength records needed before progression quality is measured
const MIN_PROGRESSION_RECORDS: usize = 4;

/// Weight points an exercise needs to contribute to progression quality
const MIN_POINTS_PER_EXERCISE: usize = 3;

/// Neutral progression quality used when data is insufficient
const NEUTRAL_PROGRESSION: f64 = 0.5;

/// Trailing window (days) for the weekly frequency check
const FREQUENCY_WINDOW_DAYS: u32 = 7;

/// Experience tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnowledgeLevel {
    /// Score below 30
    Novice,
    /// Score 30 to below 60
    Learner,
    /// Score 60 to below 80
    Practitioner,
    /// Score 80 and above
    Expert,
}

/// Safety limits for a knowledge level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafetyThresholds {
    /// Sessions in the trailing week at which frequency is flagged
    pub max_sessions_per_week: u32,
    /// Planned sets per muscle group above which volume is flagged
    pub max_sets_per_muscle: u32,
    /// Minimum rest days between sessions
    pub min_rest_days: u32,
    /// Largest single-session weight increase (kg) before it is flagged
    pub max_weight_increase_kg: f64,
}

impl KnowledgeLevel {
    /// All levels, lowest first
    pub const ALL: [Self; 4] = [Self::Novice, Self::Learner, Self::Practitioner, Self::Expert];

    /// Level for a 0-100 score
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Expert
        } else if score >= 60.0 {
            Self::Practitioner
        } else if score >= 30.0 {
            Self::Learner
        } else {
            Self::Novice
        }
    }

    /// Lowercase name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Novice => "novice",
            Self::Learner => "learner",
            Self::Practitioner => "practitioner",
            Self::Expert => "expert",
        }
    }

    /// Next tier up; `None` for Expert
    #[must_use]
    pub const fn next(&self) -> Option<Self> {
        match self {
            Self::Novice => Some(Self::Learner),
            Self::Learner => Some(Self::Practitioner),
            Self::Practitioner => Some(Self::Expert),
            Self::Expert => None,
        }
    }

    /// Training age (days) associated with reaching this level
    #[must_use]
    pub const fn age_threshold_days(&self) -> i64 {
        match self {
            Self::Novice => 0,
            Self::Learner => 30,
            Self::Practitioner => 90,
            Self::Expert => 180,
        }
    }

    /// Safety limits for this level
    #[must_use]
    pub const fn safety_thresholds(&self) -> SafetyThresholds {
        let (max_sessions_per_week, max_sets_per_muscle, min_rest_days, max_weight_increase_kg) =
            match self {
                Self::Novice => (4, 12, 2, 2.5),
                Self::Learner => (5, 15, 1, 5.0),
                Self::Practitioner => (6, 20, 1, 7.5),
                Self::Expert => (7, 25, 0, 10.0),
            };
        SafetyThresholds {
            max_sessions_per_week,
            max_sets_per_muscle,
            min_rest_days,
            max_weight_increase_kg,
        }
    }

    /// Idealized strength gain (kg/week); shrinks with experience
    #[must_use]
    pub const fn progression_rate_kg_per_week(&self) -> f64 {
        match self {
            Self::Novice => 1.0,
            Self::Learner => 0.75,
            Self::Practitioner => 0.5,
            Self::Expert => 0.25,
        }
    }

    /// Target workouts per week
    #[must_use]
    pub const fn target_workouts_per_week(&self) -> f64 {
        match self {
            Self::Novice => 2.5,
            Self::Learner => 3.0,
            Self::Practitioner => 3.5,
            Self::Expert => 4.0,
        }
    }

    /// One-line description
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Novice => "Just starting out. Focus on learning form and building consistency.",
            Self::Learner => "Building foundations. Working on consistency and basic programming.",
            Self::Practitioner => "Consistent training. Refining technique and programming.",
            Self::Expert => "Advanced training. Sophisticated programming and self-regulation.",
        }
    }

    /// What to work on at this level
    #[must_use]
    pub const fn focus_areas(&self) -> &'static [&'static str] {
        match self {
            Self::Novice => &[
                "Learn proper form for basic exercises",
                "Establish 2-3 workouts per week consistency",
                "Focus on full-body workouts",
                "Track workouts consistently",
            ],
            Self::Learner => &[
                "Improve exercise technique",
                "Introduce progressive overload",
                "Experiment with different exercises",
                "Learn about recovery needs",
            ],
            Self::Practitioner => &[
                "Optimize training splits",
                "Periodize training cycles",
                "Refine nutrition for goals",
                "Manage fatigue effectively",
            ],
            Self::Expert => &[
                "Advanced programming techniques",
                "Peaking for specific events",
                "Injury prevention strategies",
                "Mentoring others",
            ],
        }
    }

    /// Mistakes typical at this level
    #[must_use]
    pub const fn common_mistakes(&self) -> &'static [&'static str] {
        match self {
            Self::Novice => &[
                "Skipping warm-ups",
                "Using too much weight too soon",
                "Inconsistent training schedule",
                "Not tracking progress",
            ],
            Self::Learner => &[
                "Neglecting recovery",
                "Chasing weight over form",
                "Overtraining certain muscles",
                "Not deloading when needed",
            ],
            Self::Practitioner => &[
                "Plateauing from lack of variation",
                "Ignoring mobility work",
                "Underestimating sleep importance",
                "Neglecting weak points",
            ],
            Self::Expert => &[
                "Overcomplicating programming",
                "Ignoring new research",
                "Neglecting fundamentals",
                "Burnout from excessive intensity",
            ],
        }
    }

    /// Coaching tip appended to every safety check; only the two lowest tiers have one
    #[must_use]
    pub const fn coaching_tip(&self) -> Option<&'static str> {
        match self {
            Self::Novice => Some("Novice tip: Focus on form over weight. Consider a trainer."),
            Self::Learner => Some("Learner tip: Build consistency before increasing intensity."),
            Self::Practitioner | Self::Expert => None,
        }
    }
}

impl fmt::Display for KnowledgeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Points contributed by each score component
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Training-age points (0-40)
    pub age_points: f64,
    /// Consistency points (0-40)
    pub consistency_points: f64,
    /// Progression points (0-20)
    pub progression_points: f64,
}

/// Knowledge-level assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeAssessment {
    /// Assessed tier
    pub level: KnowledgeLevel,
    /// 0-100 score
    pub score: f64,
    /// Days since the first completed session
    pub training_age_days: i64,
    /// 0-1 share of window days with a session
    pub consistency_score: f64,
    /// 0-1 share of consecutive weight increases
    pub progression_quality: f64,
    /// Per-component points
    pub breakdown: ScoreBreakdown,
    /// Safety limits for `level`
    pub safety_thresholds: SafetyThresholds,
    /// Weighted strength records behind `progression_quality`
    pub progression_data_points: usize,
    /// Whether progression quality came from data or the neutral default
    pub data_sufficiency: DataSufficiency,
    /// Instant the assessment was computed for
    pub assessed_at: DateTime<Utc>,
}

/// One exercise in a planned workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedExercise {
    /// Catalog exercise
    pub exercise_id: ExerciseId,
    /// Planned sets
    #[serde(default)]
    pub sets: u32,
    /// Planned reps per set
    #[serde(default)]
    pub reps: Option<u32>,
    /// Planned working weight (kg)
    #[serde(default)]
    pub weight_kg: Option<f64>,
}

/// A workout the user intends to perform
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannedWorkout {
    /// Planned exercises in order
    #[serde(default)]
    pub exercises: Vec<PlannedExercise>,
}

/// Type of safety warning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyWarningKind {
    /// Too many sessions in the trailing week
    HighFrequency,
    /// Too many planned sets for one muscle group
    HighVolume,
    /// Planned weight jumps too far above the last recorded weight
    LargeWeightJump,
    /// Level-specific advice; does not make a plan unsafe
    CoachingTip,
}

/// A single safety warning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyWarning {
    /// Warning type
    pub kind: SafetyWarningKind,
    /// Human-readable message
    pub message: String,
}

/// Level-tailored guidance bundle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelGuidance {
    /// Tier the guidance is for
    pub level: KnowledgeLevel,
    /// One-line description
    pub description: String,
    /// What to work on
    pub focus_areas: Vec<String>,
    /// Mistakes to avoid
    pub common_mistakes: Vec<String>,
    /// Goals toward the next tier, or maintenance goals for experts
    pub next_level_goals: Vec<String>,
    /// Safety limits for the tier
    pub safety_limits: SafetyThresholds,
}

/// Result of vetting a planned workout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyCheckResult {
    /// Tier the check was made against
    pub level: KnowledgeLevel,
    /// Warnings in check order
    pub warnings: Vec<SafetyWarning>,
    /// Limits applied
    pub thresholds: SafetyThresholds,
    /// True when nothing but a coaching tip fired
    pub is_safe: bool,
    /// Guidance, attached whenever there is at least one warning
    pub guidance: Option<LevelGuidance>,
}

/// Knowledge level assessor
pub struct KnowledgeLevelAssessor;

impl KnowledgeLevelAssessor {
    /// Assess the user behind `snapshot`
    #[must_use]
    pub fn assess(
        snapshot: &HistorySnapshot,
        now: DateTime<Utc>,
        config: &KnowledgeConfig,
    ) -> KnowledgeAssessment {
        let training_age_days = Self::training_age_days(snapshot, now);
        let consistency_score =
            Self::consistency_score(snapshot, now, config.consistency_window_days);
        let (progression_quality, progression_data_points) = Self::progression_quality(snapshot);

        let breakdown = Self::score_breakdown(training_age_days, consistency_score, progression_quality);
        let score =
            breakdown.age_points + breakdown.consistency_points + breakdown.progression_points;
        let level = KnowledgeLevel::from_score(score);

        debug!(
            user_id = %snapshot.user_id(),
            level = %level,
            score,
            training_age_days,
            "Assessed knowledge level"
        );

        KnowledgeAssessment {
            level,
            score,
            training_age_days,
            consistency_score,
            progression_quality,
            breakdown,
            safety_thresholds: level.safety_thresholds(),
            progression_data_points,
            data_sufficiency: DataSufficiency::from_count(
                progression_data_points,
                MIN_PROGRESSION_RECORDS,
            ),
            assessed_at: now,
        }
    }

    /// 0-100 level score; non-decreasing in each argument
    #[must_use]
    pub fn level_score(training_age_days: i64, consistency_score: f64, progression_quality: f64) -> f64 {
        let breakdown = Self::score_breakdown(training_age_days, consistency_score, progression_quality);
        breakdown.age_points + breakdown.consistency_points + breakdown.progression_points
    }

    fn score_breakdown(
        training_age_days: i64,
        consistency_score: f64,
        progression_quality: f64,
    ) -> ScoreBreakdown {
        ScoreBreakdown {
            age_points: (training_age_days as f64 / AGE_SATURATION_DAYS).min(1.0) * 40.0,
            consistency_points: consistency_score * 40.0,
            progression_points: progression_quality * 20.0,
        }
    }

    /// Whole days since the first completed session started; 0 without history
    #[must_use]
    pub fn training_age_days(snapshot: &HistorySnapshot, now: DateTime<Utc>) -> i64 {
        snapshot
            .completed_sessions()
            .next()
            .map_or(0, |first| (now - first.start_time).num_days().max(0))
    }

    /// Distinct training days in the window divided by the window length, capped at 1
    #[must_use]
    pub fn consistency_score(snapshot: &HistorySnapshot, now: DateTime<Utc>, window_days: u32) -> f64 {
        if window_days == 0 {
            return 0.0;
        }
        let cutoff = window_start(now, window_days);
        let training_days: HashSet<NaiveDate> = snapshot
            .completed_since(cutoff)
            .map(|session| session.training_date())
            .collect();
        (training_days.len() as f64 / f64::from(window_days)).min(1.0)
    }

    /// Average share of consecutive weight increases per exercise, and the record count
    ///
    /// Falls back to 0.5 with fewer than four weighted strength records, or
    /// when no exercise has at least three of them.
    #[must_use]
    pub fn progression_quality(snapshot: &HistorySnapshot) -> (f64, usize) {
        let mut order: Vec<ExerciseId> = Vec::new();
        let mut weights: HashMap<ExerciseId, Vec<f64>> = HashMap::new();
        let mut total = 0;

        for (_, record, exercise) in snapshot.all_records() {
            if !exercise.is_strength() {
                continue;
            }
            let Some(weight) = record.positive_weight() else {
                continue;
            };
            total += 1;
            weights
                .entry(record.exercise_id)
                .or_insert_with(|| {
                    order.push(record.exercise_id);
                    Vec::new()
                })
                .push(weight);
        }

        if total < MIN_PROGRESSION_RECORDS {
            return (NEUTRAL_PROGRESSION, total);
        }

        let ratios: Vec<f64> = order
            .iter()
            .filter_map(|id| weights.get(id))
            .filter(|series| series.len() >= MIN_POINTS_PER_EXERCISE)
            .map(|series| {
                let increases = series.windows(2).filter(|pair| pair[1] > pair[0]).count();
                increases as f64 / (series.len() - 1) as f64
            })
            .collect();

        if ratios.is_empty() {
            return (NEUTRAL_PROGRESSION, total);
        }
        (ratios.iter().sum::<f64>() / ratios.len() as f64, total)
    }

    /// Level-tailored guidance for an assessment
    #[must_use]
    pub fn guidance(assessment: &KnowledgeAssessment, config: &KnowledgeConfig) -> LevelGuidance {
        let level = assessment.level;
        LevelGuidance {
            level,
            description: level.description().to_owned(),
            focus_areas: to_owned_list(level.focus_areas()),
            common_mistakes: to_owned_list(level.common_mistakes()),
            next_level_goals: Self::next_level_goals(assessment, config),
            safety_limits: assessment.safety_thresholds,
        }
    }

    fn next_level_goals(assessment: &KnowledgeAssessment, config: &KnowledgeConfig) -> Vec<String> {
        let Some(next_level) = assessment.level.next() else {
            return vec![
                "Maintain expert status".into(),
                "Help others learn".into(),
                "Set new personal records".into(),
            ];
        };

        let mut goals = Vec::new();
        if assessment.consistency_score < config.consistency_goal_target {
            goals.push(format!(
                "Increase consistency from {}% to {}%",
                as_whole_percent(assessment.consistency_score),
                as_whole_percent(config.consistency_goal_target)
            ));
        }
        if assessment.progression_quality < config.progression_goal_target {
            goals.push(format!(
                "Improve progression quality from {}% to {}%",
                as_whole_percent(assessment.progression_quality),
                as_whole_percent(config.progression_goal_target)
            ));
        }
        let days_needed = next_level.age_threshold_days() - assessment.training_age_days;
        if days_needed > 0 {
            goals.push(format!("Continue training for {days_needed} more days"));
        }
        goals
    }

    /// Vet a planned workout against the user's current level
    #[must_use]
    pub fn safety_check(
        snapshot: &HistorySnapshot,
        now: DateTime<Utc>,
        plan: &PlannedWorkout,
        config: &KnowledgeConfig,
    ) -> SafetyCheckResult {
        let assessment = Self::assess(snapshot, now, config);
        let level = assessment.level;
        let thresholds = assessment.safety_thresholds;
        let mut warnings = Vec::new();

        let recent_sessions = snapshot
            .completed_since(window_start(now, FREQUENCY_WINDOW_DAYS))
            .count();
        if recent_sessions >= thresholds.max_sessions_per_week as usize {
            warnings.push(SafetyWarning {
                kind: SafetyWarningKind::HighFrequency,
                message: format!(
                    "High frequency: {recent_sessions} sessions this week (max: {})",
                    thresholds.max_sessions_per_week
                ),
            });
        }

        for (group, sets) in Self::planned_sets_by_group(snapshot, plan) {
            if sets > thresholds.max_sets_per_muscle {
                warnings.push(SafetyWarning {
                    kind: SafetyWarningKind::HighVolume,
                    message: format!(
                        "High volume for {group}: {sets} sets (max: {})",
                        thresholds.max_sets_per_muscle
                    ),
                });
            }
        }

        for planned in &plan.exercises {
            let Some(planned_weight) = planned.weight_kg.filter(|weight| *weight != 0.0) else {
                continue;
            };
            let Some(last_weight) = Self::last_recorded_weight(snapshot, planned.exercise_id) else {
                continue;
            };
            let increase = planned_weight - last_weight;
            if increase > thresholds.max_weight_increase_kg {
                warnings.push(SafetyWarning {
                    kind: SafetyWarningKind::LargeWeightJump,
                    message: format!(
                        "Large weight jump: +{increase:.1}kg (max: {}kg)",
                        thresholds.max_weight_increase_kg
                    ),
                });
            }
        }

        if let Some(tip) = level.coaching_tip() {
            warnings.push(SafetyWarning {
                kind: SafetyWarningKind::CoachingTip,
                message: tip.to_owned(),
            });
        }

        let is_safe = warnings
            .iter()
            .all(|warning| warning.kind == SafetyWarningKind::CoachingTip);
        let guidance = (!warnings.is_empty()).then(|| Self::guidance(&assessment, config));

        debug!(
            user_id = %snapshot.user_id(),
            level = %level,
            warnings = warnings.len(),
            is_safe,
            "Completed safety check"
        );

        SafetyCheckResult {
            level,
            warnings,
            thresholds,
            is_safe,
            guidance,
        }
    }

    /// Planned sets summed per group, in order of first appearance
    fn planned_sets_by_group(
        snapshot: &HistorySnapshot,
        plan: &PlannedWorkout,
    ) -> Vec<(CanonicalMuscleGroup, u32)> {
        let mut totals: Vec<(CanonicalMuscleGroup, u32)> = Vec::new();
        for planned in &plan.exercises {
            let Some(exercise) = snapshot.exercise(planned.exercise_id) else {
                continue;
            };
            if exercise.muscle_label().is_none() {
                continue;
            }
            let group = MuscleGroupClassifier::classify_exercise(exercise);
            match totals.iter_mut().find(|(existing, _)| *existing == group) {
                Some((_, sets)) => *sets = sets.saturating_add(planned.sets),
                None => totals.push((group, planned.sets)),
            }
        }
        totals
    }

    /// Most recent positive weight recorded for an exercise in a completed session
    fn last_recorded_weight(snapshot: &HistorySnapshot, exercise_id: ExerciseId) -> Option<f64> {
        snapshot
            .completed_sessions()
            .flat_map(|session| session.records.iter())
            .filter(|record| record.exercise_id == exercise_id)
            .filter_map(|record| record.weight_kg)
            .last()
            .filter(|weight| *weight > 0.0)
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_owned()).collect()
}

fn as_whole_percent(fraction: f64) -> i64 {
    (fraction * 100.0).trunc() as i64
}
