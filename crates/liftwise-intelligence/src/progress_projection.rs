// ABOUTME: Projects idealized strength and consistency trajectories against actual training
// ABOUTME: Produces per-exercise opportunity metrics, streaks, a composite score, and a narrative summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

//! # Progress Projections
//!
//! For every strength exercise the engine compares the estimated one-rep max
//! actually reached with what a level-appropriate weekly progression would
//! have produced. Consistency is projected the same way against a
//! level-specific workouts-per-week target. Both feed a 0-100 progress score.
//!
//! One-rep max uses the Epley estimate `weight * (1 + reps / 30)`.

use crate::config::intelligence::ProjectionConfig;
use crate::knowledge_level::KnowledgeLevel;
use crate::muscle_classifier::MuscleGroupClassifier;
use crate::quotes::QuoteSelector;
use crate::window::window_start;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use liftwise_core::constants::time::DAYS_PER_WEEK;
use liftwise_core::models::{CanonicalMuscleGroup, DataSufficiency, ExerciseId, HistorySnapshot};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Dated weighted records an exercise needs to be projected
const MIN_PROJECTION_RECORDS: usize = 2;

/// Motivational messages kept per report section
const MAX_MESSAGES: usize = 3;

/// Actionable insights kept in the comprehensive report
const MAX_INSIGHTS: usize = 3;

/// Share of total missed strength considered reachable in 30 days
const MONTHLY_STRENGTH_SHARE: f64 = 0.3;

/// Extra workouts per month at a consistency gap of 1.0
const MONTHLY_EXTRA_WORKOUTS_AT_FULL_GAP: f64 = 8.0;

/// Minutes of focus time per extra workout
const MINUTES_PER_EXTRA_WORKOUT: u32 = 30;

/// Days of some activity to aim for in the next month
const MONTHLY_CONSISTENCY_DAYS: u32 = 20;

/// One recorded point on an exercise's actual trajectory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActualPoint {
    /// 1-based position in the history
    pub point: usize,
    /// Training day
    pub date: NaiveDate,
    /// Estimated one-rep max (kg)
    pub estimated_1rm_kg: f64,
    /// Working weight (kg)
    pub weight_kg: f64,
    /// Reps used for the estimate
    pub reps: u32,
    /// Recorded sets
    pub sets: u32,
}

/// One weekly point on an exercise's idealized trajectory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    /// 1-based week number
    pub week: usize,
    /// Start of the week
    pub date: NaiveDate,
    /// Projected one-rep max (kg)
    pub estimated_1rm_kg: f64,
    /// 1 while the projected session budget lasts, then 0
    pub sessions_this_week: u32,
    /// "Starting point" for week 1, "Projected" afterwards
    pub note: String,
}

/// Actual versus idealized strength for one exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthProjection {
    /// Catalog id
    pub exercise_id: ExerciseId,
    /// Catalog name
    pub exercise_name: String,
    /// Canonical group of the exercise
    pub muscle_group: CanonicalMuscleGroup,
    /// First estimated one-rep max in the window
    pub actual_start_1rm_kg: f64,
    /// Last estimated one-rep max in the window
    pub actual_current_1rm_kg: f64,
    /// `current - start`
    pub actual_gain_kg: f64,
    /// Weighted records considered
    pub actual_sessions: usize,
    /// Distinct training days for this exercise divided by window length
    pub actual_consistency: f64,
    /// `max(1, days between first and last / 7)`
    pub weeks: f64,
    /// Start plus idealized gain
    pub projected_current_1rm_kg: f64,
    /// Idealized gain over `weeks`
    pub projected_gain_kg: f64,
    /// Idealized gain per week including the consistency bonus
    pub projected_weekly_gain_kg: f64,
    /// Days of base-rate progression separating actual from projected; negative when ahead
    pub days_behind_schedule: i64,
    /// `max(0, projected - actual)`
    pub missed_opportunity_kg: f64,
    /// Share of the idealized gain realized, in [0, 1]
    pub opportunity_pct: f64,
    /// 0-100
    pub motivation_score: f64,
    /// First training day in the window
    pub start_date: NaiveDate,
    /// Last training day in the window
    pub end_date: NaiveDate,
    /// One point per record
    pub actual_timeline: Vec<ActualPoint>,
    /// One point per week
    pub projected_timeline: Vec<ProjectedPoint>,
}

/// Exercise singled out in the strength roll-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunityHighlight {
    /// Exercise name
    pub exercise_name: String,
    /// Its opportunity share
    pub opportunity_pct: f64,
    /// Its missed kg
    pub missed_kg: f64,
}

impl OpportunityHighlight {
    fn from_projection(projection: &StrengthProjection) -> Self {
        Self {
            exercise_name: projection.exercise_name.clone(),
            opportunity_pct: projection.opportunity_pct,
            missed_kg: projection.missed_opportunity_kg,
        }
    }
}

/// Aggregate "what could have been" across exercises
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmotionalImpact {
    /// Sum of missed kg
    pub total_missed_kg: f64,
    /// Mean opportunity share; 0 without projections
    pub average_opportunity: f64,
    /// Highest opportunity share
    pub best_opportunity: Option<OpportunityHighlight>,
    /// Lowest opportunity share
    pub worst_opportunity: Option<OpportunityHighlight>,
    /// Up to three messages
    pub motivation_messages: Vec<String>,
}

/// Summary line items for the strength report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthSummary {
    /// Exercises projected
    pub total_exercises_projected: usize,
    /// Mean opportunity as a percentage (0-100)
    pub average_opportunity_percentage: f64,
    /// Sum of missed kg
    pub total_missed_strength_kg: f64,
    /// Highest opportunity share
    pub best_performing_exercise: OpportunityHighlight,
    /// Lowest opportunity share
    pub most_opportunity_exercise: OpportunityHighlight,
    /// Banded verdict on the mean opportunity
    pub overall_verdict: String,
    /// Exercise with the most room to improve
    pub recommended_focus: String,
}

/// Strength projections for all qualifying exercises
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrengthProjectionReport {
    /// Window in days
    pub period_days: u32,
    /// Level the base rate was taken from
    pub knowledge_level: KnowledgeLevel,
    /// Base idealized progression (kg/week)
    pub base_progression_rate_kg_week: f64,
    /// Per-exercise projections in first-seen order
    pub projections: Vec<StrengthProjection>,
    /// Aggregate metrics and messages
    pub emotional_impact: EmotionalImpact,
    /// Roll-up; `None` without projections
    pub summary: Option<StrengthSummary>,
    /// Whether any exercise had enough records
    pub data_sufficiency: DataSufficiency,
}

/// Best and current training streaks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakStats {
    /// Longest run of training dates
    pub best_streak: u32,
    /// Run ending at the most recent date, if that date is recent
    pub current_streak: u32,
}

/// Actual versus target training frequency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsistencyProjection {
    /// Window in days
    pub period_days: u32,
    /// Level the target was taken from
    pub knowledge_level: KnowledgeLevel,
    /// Distinct training days in the window
    pub actual_workouts: u32,
    /// Workouts per week actually achieved
    pub actual_rate_per_week: f64,
    /// Level target in workouts per week
    pub target_rate_per_week: f64,
    /// Workouts the target implies over the window
    pub projected_workouts: u32,
    /// `max(0, projected - actual)`
    pub missed_workouts: u32,
    /// Shortfall against the target as a share of it, in [0, 1]
    pub consistency_gap: f64,
    /// Longest streak
    pub best_streak: u32,
    /// Current streak
    pub current_streak: u32,
    /// `floor(best_streak * 1.5)`
    pub projected_streak: u32,
    /// Up to three messages
    pub messages: Vec<String>,
    /// Whether any training happened in the window
    pub data_sufficiency: DataSufficiency,
}

/// Mood band of the overall progress score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressMood {
    /// Score above 80
    Exceptional,
    /// Score above 65
    Great,
    /// Score above 50
    Good,
    /// Everything else
    Opportunity,
}

impl ProgressMood {
    /// Mood for a 0-100 score
    #[must_use]
    pub fn for_score(score: f64) -> Self {
        if score > 80.0 {
            Self::Exceptional
        } else if score > 65.0 {
            Self::Great
        } else if score > 50.0 {
            Self::Good
        } else {
            Self::Opportunity
        }
    }

    /// Message shown with the mood
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Exceptional => "You're performing at an elite level! Keep up the amazing work.",
            Self::Great => "Strong progress! You're well on your way to your goals.",
            Self::Good => "Solid foundation with clear opportunities for growth.",
            Self::Opportunity => "Significant potential waiting to be unlocked!",
        }
    }
}

/// Points contributed by strength and consistency
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressScoreBreakdown {
    /// `average_opportunity * 50`
    pub strength_progress: f64,
    /// `(1 - consistency_gap) * 50`
    pub consistency_progress: f64,
    /// Always 100
    pub max_possible: f64,
}

/// What closing the gaps would be worth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotentialUnlock {
    /// Total missed strength (kg)
    pub strength_kg: f64,
    /// Missed workouts
    pub workouts: u32,
    /// One-line summary
    pub summary: String,
}

/// Narrative summary of the comprehensive report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionalSummary {
    /// Mood band
    pub mood: ProgressMood,
    /// Mood message
    pub message: String,
    /// "NN/100 progress score"
    pub key_metric: String,
    /// Quote from the score's band
    pub motivational_quote: String,
    /// What closing the gaps would be worth
    pub potential_unlock: PotentialUnlock,
}

/// Category of an actionable insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    /// About a specific lift
    Strength,
    /// About training frequency
    Consistency,
    /// Learning-oriented, for novices
    Education,
    /// Progression-oriented, for learners
    Progression,
    /// Applies to everyone
    General,
}

/// Urgency of an actionable insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightPriority {
    /// Act now
    High,
    /// Act soon
    Medium,
    /// Nice to have
    Low,
}

/// A concrete next step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionableInsight {
    /// Category
    pub kind: InsightKind,
    /// Urgency
    pub priority: InsightPriority,
    /// What was noticed
    pub message: String,
    /// What to do about it
    pub action: String,
}

/// Effort the 30-day potential assumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitmentRequired {
    /// Sessions per week
    pub weekly_sessions: u32,
    /// Extra focus minutes across the month
    pub focus_minutes: u32,
    /// Days of some activity to aim for
    pub consistency_days: u32,
}

/// Gains reachable in the next 30 days
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThirtyDayPotential {
    /// Always 30
    pub timeframe_days: u32,
    /// Strength reachable (kg)
    pub strength_potential_kg: f64,
    /// Extra workouts reachable
    pub consistency_potential_workouts: u32,
    /// Level the potential was computed at
    pub knowledge_level: KnowledgeLevel,
    /// Concrete goals
    pub achievable_goals: Vec<String>,
    /// Effort assumed
    pub commitment_required: CommitmentRequired,
}

/// Strength, consistency, and narrative in one report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComprehensiveReport {
    /// Window in days
    pub period_days: u32,
    /// Level used throughout
    pub knowledge_level: KnowledgeLevel,
    /// 0-100
    pub overall_progress_score: f64,
    /// Per-component points
    pub score_breakdown: ProgressScoreBreakdown,
    /// Strength section
    pub strength_projections: StrengthProjectionReport,
    /// Consistency section
    pub consistency_projections: ConsistencyProjection,
    /// Narrative
    pub emotional_summary: EmotionalSummary,
    /// Up to three next steps
    pub actionable_insights: Vec<ActionableInsight>,
    /// Next month's potential
    pub next_30_day_potential: ThirtyDayPotential,
    /// Instant the report was computed for
    pub generated_at: DateTime<Utc>,
}

/// Weighted history of one exercise, in session order
struct ExerciseSeries {
    exercise_id: ExerciseId,
    exercise_name: String,
    muscle_group: CanonicalMuscleGroup,
    points: Vec<SeriesPoint>,
}

struct SeriesPoint {
    date: NaiveDate,
    weight_kg: f64,
    reps: u32,
    sets: u32,
    estimated_1rm_kg: f64,
}

/// Progress projection engine
pub struct ProgressProjectionEngine;

impl ProgressProjectionEngine {
    /// Epley one-rep max estimate
    ///
    /// A single rep (or absent/zero reps) is already a one-rep max, so the
    /// lifted weight is returned unchanged.
    #[must_use]
    pub fn estimated_one_rep_max(weight_kg: f64, reps: Option<u32>) -> f64 {
        match reps {
            Some(reps) if reps > 1 => weight_kg * (1.0 + f64::from(reps) / 30.0),
            _ => weight_kg,
        }
    }

    /// Strength projections for every strength exercise with enough weighted records
    #[must_use]
    pub fn strength_projections(
        snapshot: &HistorySnapshot,
        now: DateTime<Utc>,
        window_days: u32,
        level: KnowledgeLevel,
        config: &ProjectionConfig,
    ) -> StrengthProjectionReport {
        let base_rate = level.progression_rate_kg_per_week();
        let series = Self::strength_series(snapshot, window_start(now, window_days));
        let weighted_exercises = series.len();

        let projections: Vec<StrengthProjection> = series
            .par_iter()
            .filter(|entry| entry.points.len() >= MIN_PROJECTION_RECORDS)
            .filter_map(|entry| Self::project_exercise(entry, base_rate, window_days))
            .collect();

        let mut emotional_impact = Self::emotional_impact(&projections);
        if !projections.is_empty() {
            emotional_impact.motivation_messages =
                Self::motivation_messages(&emotional_impact, level, config);
        }
        let summary = Self::strength_summary(&projections, &emotional_impact);

        let data_sufficiency = if weighted_exercises == 0 {
            DataSufficiency::NoData
        } else if projections.is_empty() {
            DataSufficiency::Insufficient
        } else {
            DataSufficiency::Sufficient
        };

        debug!(
            user_id = %snapshot.user_id(),
            window_days,
            level = %level,
            projected = projections.len(),
            total_missed_kg = emotional_impact.total_missed_kg,
            "Computed strength projections"
        );

        StrengthProjectionReport {
            period_days: window_days,
            knowledge_level: level,
            base_progression_rate_kg_week: base_rate,
            projections,
            emotional_impact,
            summary,
            data_sufficiency,
        }
    }

    /// Positive-weight strength records since `cutoff`, grouped per exercise in first-seen order
    fn strength_series(snapshot: &HistorySnapshot, cutoff: DateTime<Utc>) -> Vec<ExerciseSeries> {
        let mut series: Vec<ExerciseSeries> = Vec::new();
        let mut index: HashMap<ExerciseId, usize> = HashMap::new();

        for (session, record, exercise) in snapshot.records_since(cutoff) {
            if !exercise.is_strength() {
                continue;
            }
            let Some(weight_kg) = record.positive_weight() else {
                continue;
            };
            let reps = record.reps.filter(|reps| *reps > 0).unwrap_or(1);
            let point = SeriesPoint {
                date: session.training_date(),
                weight_kg,
                reps,
                sets: record.sets.unwrap_or(0),
                estimated_1rm_kg: Self::estimated_one_rep_max(weight_kg, Some(reps)),
            };

            let position = *index.entry(exercise.id).or_insert_with(|| {
                series.push(ExerciseSeries {
                    exercise_id: exercise.id,
                    exercise_name: exercise.name.clone(),
                    muscle_group: MuscleGroupClassifier::classify_exercise(exercise),
                    points: Vec::new(),
                });
                series.len() - 1
            });
            if let Some(entry) = series.get_mut(position) {
                entry.points.push(point);
            }
        }

        series
    }

    fn project_exercise(
        series: &ExerciseSeries,
        base_rate: f64,
        window_days: u32,
    ) -> Option<StrengthProjection> {
        let first = series.points.first()?;
        let last = series.points.last()?;

        let start_1rm = first.estimated_1rm_kg;
        let current_1rm = last.estimated_1rm_kg;
        let actual_gain = current_1rm - start_1rm;
        let days_elapsed = (last.date - first.date).num_days();
        let weeks = (days_elapsed as f64 / DAYS_PER_WEEK).max(1.0);

        let distinct_days: BTreeSet<NaiveDate> = series.points.iter().map(|point| point.date).collect();
        let consistency = if window_days == 0 {
            0.0
        } else {
            distinct_days.len() as f64 / f64::from(window_days)
        };

        let weekly_gain = base_rate * (1.0 + consistency);
        let projected_gain = weekly_gain * weeks;
        let projected_current = start_1rm + projected_gain;
        let missed = (projected_current - current_1rm).max(0.0);
        let opportunity_pct = if projected_gain > 0.0 {
            (actual_gain / projected_gain).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let motivation_score = (opportunity_pct * 100.0 * (1.0 + consistency)).min(100.0);
        let days_behind_schedule = if base_rate > 0.0 {
            ((projected_current - current_1rm) / base_rate * DAYS_PER_WEEK).trunc() as i64
        } else {
            0
        };

        let actual_timeline = series
            .points
            .iter()
            .enumerate()
            .map(|(position, point)| ActualPoint {
                point: position + 1,
                date: point.date,
                estimated_1rm_kg: point.estimated_1rm_kg,
                weight_kg: point.weight_kg,
                reps: point.reps,
                sets: point.sets,
            })
            .collect();

        let projected_sessions = (series.points.len() as f64 * (1.0 + consistency)).trunc() as usize;
        let projected_timeline = (0..=weeks.trunc() as usize)
            .map(|week| ProjectedPoint {
                week: week + 1,
                date: first.date + Duration::days(week as i64 * 7),
                estimated_1rm_kg: start_1rm + weekly_gain * week as f64,
                sessions_this_week: u32::from(week < projected_sessions),
                note: String::from(if week == 0 { "Starting point" } else { "Projected" }),
            })
            .collect();

        Some(StrengthProjection {
            exercise_id: series.exercise_id,
            exercise_name: series.exercise_name.clone(),
            muscle_group: series.muscle_group,
            actual_start_1rm_kg: start_1rm,
            actual_current_1rm_kg: current_1rm,
            actual_gain_kg: actual_gain,
            actual_sessions: series.points.len(),
            actual_consistency: consistency,
            weeks,
            projected_current_1rm_kg: projected_current,
            projected_gain_kg: projected_gain,
            projected_weekly_gain_kg: weekly_gain,
            days_behind_schedule,
            missed_opportunity_kg: missed,
            opportunity_pct,
            motivation_score,
            start_date: first.date,
            end_date: last.date,
            actual_timeline,
            projected_timeline,
        })
    }

    fn emotional_impact(projections: &[StrengthProjection]) -> EmotionalImpact {
        let Some(first) = projections.first() else {
            return EmotionalImpact::default();
        };

        let mut best = first;
        let mut worst = first;
        for projection in projections {
            if projection.opportunity_pct > best.opportunity_pct {
                best = projection;
            }
            if projection.opportunity_pct < worst.opportunity_pct {
                worst = projection;
            }
        }

        EmotionalImpact {
            total_missed_kg: projections
                .iter()
                .map(|projection| projection.missed_opportunity_kg)
                .sum(),
            average_opportunity: projections
                .iter()
                .map(|projection| projection.opportunity_pct)
                .sum::<f64>()
                / projections.len() as f64,
            best_opportunity: Some(OpportunityHighlight::from_projection(best)),
            worst_opportunity: Some(OpportunityHighlight::from_projection(worst)),
            motivation_messages: Vec::new(),
        }
    }

    fn motivation_messages(
        impact: &EmotionalImpact,
        level: KnowledgeLevel,
        config: &ProjectionConfig,
    ) -> Vec<String> {
        let mut messages = vec![if impact.average_opportunity > 0.8 {
            "Amazing consistency! You're capturing over 80% of your strength potential.".to_owned()
        } else if impact.average_opportunity > 0.6 {
            "Good progress! You're on track for about 60-80% of optimal gains.".to_owned()
        } else {
            "Room for growth: You could be significantly stronger with more consistency.".to_owned()
        }];

        if impact.total_missed_kg > config.unlock_callout_kg {
            messages.push(format!(
                "Potential unlock: You could be {:.0}kg stronger across all lifts!",
                impact.total_missed_kg
            ));
        }
        if let Some(best) = impact
            .best_opportunity
            .as_ref()
            .filter(|best| best.opportunity_pct > 0.9)
        {
            messages.push(format!(
                "Star performer: Your {} is near optimal!",
                best.exercise_name
            ));
        }
        if let Some(worst) = impact
            .worst_opportunity
            .as_ref()
            .filter(|worst| worst.opportunity_pct < 0.4)
        {
            messages.push(format!(
                "Focus area: {} has the most room for improvement.",
                worst.exercise_name
            ));
        }
        match level {
            KnowledgeLevel::Novice => messages
                .push("Beginner tip: Focus on consistency over weight. The gains will come!".into()),
            KnowledgeLevel::Learner => {
                messages.push("Learning phase: Perfect your form as you increase weight.".into());
            }
            KnowledgeLevel::Practitioner | KnowledgeLevel::Expert => {}
        }

        messages.truncate(MAX_MESSAGES);
        messages
    }

    fn strength_summary(
        projections: &[StrengthProjection],
        impact: &EmotionalImpact,
    ) -> Option<StrengthSummary> {
        let best = impact.best_opportunity.clone()?;
        let worst = impact.worst_opportunity.clone()?;
        let average = impact.average_opportunity;

        let overall_verdict = if average > 0.85 {
            "Exceptional: You're capturing most of your strength potential!"
        } else if average > 0.70 {
            "Great: Strong progress with room for optimization."
        } else if average > 0.50 {
            "Good: Solid foundation with significant opportunity."
        } else {
            "Potential: Consider focusing on consistency for greater gains."
        };

        Some(StrengthSummary {
            total_exercises_projected: projections.len(),
            average_opportunity_percentage: average * 100.0,
            total_missed_strength_kg: impact.total_missed_kg,
            recommended_focus: worst.exercise_name.clone(),
            best_performing_exercise: best,
            most_opportunity_exercise: worst,
            overall_verdict: overall_verdict.to_owned(),
        })
    }

    /// Best and current streaks over training dates
    ///
    /// A gap of up to `max_gap_days` between consecutive dates keeps a streak
    /// going. The current streak only counts if the latest date is within
    /// `max_gap_days` of `today`.
    #[must_use]
    pub fn streaks(dates: &[NaiveDate], today: NaiveDate, max_gap_days: i64) -> StreakStats {
        let unique: BTreeSet<NaiveDate> = dates.iter().copied().collect();
        let sorted: Vec<NaiveDate> = unique.into_iter().collect();
        let Some(latest) = sorted.last() else {
            return StreakStats::default();
        };

        let mut best_streak = 1;
        let mut running = 1;
        for pair in sorted.windows(2) {
            if (pair[1] - pair[0]).num_days() <= max_gap_days {
                running += 1;
                best_streak = best_streak.max(running);
            } else {
                running = 1;
            }
        }

        let mut current_streak = 0;
        if (today - *latest).num_days() <= max_gap_days {
            current_streak = 1;
            for pair in sorted.windows(2).rev() {
                if (pair[1] - pair[0]).num_days() <= max_gap_days {
                    current_streak += 1;
                } else {
                    break;
                }
            }
        }

        StreakStats {
            best_streak,
            current_streak,
        }
    }

    /// Consistency projection against the level's weekly target
    #[must_use]
    pub fn consistency_projection(
        snapshot: &HistorySnapshot,
        now: DateTime<Utc>,
        window_days: u32,
        level: KnowledgeLevel,
        config: &ProjectionConfig,
    ) -> ConsistencyProjection {
        let cutoff = window_start(now, window_days);
        let dates: BTreeSet<NaiveDate> = snapshot
            .completed_since(cutoff)
            .map(|session| session.training_date())
            .collect();
        let dates: Vec<NaiveDate> = dates.into_iter().collect();

        let actual_workouts = dates.len() as u32;
        let window = f64::from(window_days);
        let actual_rate_per_week = if window_days == 0 {
            0.0
        } else {
            f64::from(actual_workouts) / window * DAYS_PER_WEEK
        };
        let target_rate_per_week = level.target_workouts_per_week();
        let projected_workouts = (target_rate_per_week / DAYS_PER_WEEK * window).trunc() as u32;
        let missed_workouts = projected_workouts.saturating_sub(actual_workouts);
        let consistency_gap =
            (target_rate_per_week - actual_rate_per_week).max(0.0) / target_rate_per_week;

        let streaks = Self::streaks(&dates, now.date_naive(), config.streak_gap_days);
        let projected_streak = (f64::from(streaks.best_streak) * 1.5).floor() as u32;

        let mut projection = ConsistencyProjection {
            period_days: window_days,
            knowledge_level: level,
            actual_workouts,
            actual_rate_per_week,
            target_rate_per_week,
            projected_workouts,
            missed_workouts,
            consistency_gap,
            best_streak: streaks.best_streak,
            current_streak: streaks.current_streak,
            projected_streak,
            messages: Vec::new(),
            data_sufficiency: if actual_workouts == 0 {
                DataSufficiency::NoData
            } else {
                DataSufficiency::Sufficient
            },
        };
        projection.messages = Self::consistency_messages(&projection);

        debug!(
            user_id = %snapshot.user_id(),
            window_days,
            actual_workouts,
            consistency_gap,
            best_streak = projection.best_streak,
            "Computed consistency projection"
        );

        projection
    }

    fn consistency_messages(projection: &ConsistencyProjection) -> Vec<String> {
        let mut messages = vec![if projection.consistency_gap < 0.1 {
            "Consistency champion! You're hitting your target frequency.".to_owned()
        } else if projection.consistency_gap < 0.3 {
            "Solid consistency! Small improvements could yield big results.".to_owned()
        } else {
            format!(
                "Opportunity: You missed ~{} workouts vs target.",
                projection.missed_workouts
            )
        }];

        if projection.current_streak >= 7 {
            messages.push(format!(
                "Hot streak! {} days in a row!",
                projection.current_streak
            ));
        } else if projection.current_streak == 0 {
            messages.push("Time to restart your streak! Even short workouts count.".to_owned());
        }

        if projection.best_streak > 14 {
            messages.push(format!(
                "Record streak: You've done {} days before!",
                projection.best_streak
            ));
        }

        match projection.knowledge_level {
            KnowledgeLevel::Novice => {
                messages.push("Beginner focus: Build the habit with 2-3 sessions/week.".to_owned());
            }
            KnowledgeLevel::Learner => {
                messages.push("Learning phase: Consistency builds skill and strength.".to_owned());
            }
            KnowledgeLevel::Practitioner | KnowledgeLevel::Expert => {}
        }

        messages.truncate(MAX_MESSAGES);
        messages
    }

    /// Strength, consistency, composite score, and narrative in one report
    #[must_use]
    pub fn comprehensive_report(
        snapshot: &HistorySnapshot,
        now: DateTime<Utc>,
        window_days: u32,
        level: KnowledgeLevel,
        config: &ProjectionConfig,
        quotes: &mut dyn QuoteSelector,
    ) -> ComprehensiveReport {
        let strength = Self::strength_projections(snapshot, now, window_days, level, config);
        let consistency = Self::consistency_projection(snapshot, now, window_days, level, config);

        let strength_progress = strength.emotional_impact.average_opportunity * 50.0;
        let consistency_progress = (1.0 - consistency.consistency_gap) * 50.0;
        let overall_progress_score = strength_progress + consistency_progress;

        let emotional_summary =
            Self::emotional_summary(&strength, &consistency, overall_progress_score, quotes);
        let actionable_insights = Self::actionable_insights(&strength, &consistency, level);
        let next_30_day_potential = Self::thirty_day_potential(&strength, &consistency, level);

        debug!(
            user_id = %snapshot.user_id(),
            overall_progress_score,
            mood = ?emotional_summary.mood,
            "Built comprehensive progress report"
        );

        ComprehensiveReport {
            period_days: window_days,
            knowledge_level: level,
            overall_progress_score,
            score_breakdown: ProgressScoreBreakdown {
                strength_progress,
                consistency_progress,
                max_possible: 100.0,
            },
            strength_projections: strength,
            consistency_projections: consistency,
            emotional_summary,
            actionable_insights,
            next_30_day_potential,
            generated_at: now,
        }
    }

    fn emotional_summary(
        strength: &StrengthProjectionReport,
        consistency: &ConsistencyProjection,
        score: f64,
        quotes: &mut dyn QuoteSelector,
    ) -> EmotionalSummary {
        let mood = ProgressMood::for_score(score);
        let strength_missed = strength.emotional_impact.total_missed_kg;
        let workouts_missed = consistency.missed_workouts;

        EmotionalSummary {
            mood,
            message: mood.message().to_owned(),
            key_metric: format!("{score:.0}/100 progress score"),
            motivational_quote: quotes.quote_for_score(score).to_owned(),
            potential_unlock: PotentialUnlock {
                strength_kg: strength_missed,
                workouts: workouts_missed,
                summary: format!(
                    "Potential: {strength_missed:.0}kg stronger, {workouts_missed} more workouts"
                ),
            },
        }
    }

    fn actionable_insights(
        strength: &StrengthProjectionReport,
        consistency: &ConsistencyProjection,
        level: KnowledgeLevel,
    ) -> Vec<ActionableInsight> {
        let mut insights = Vec::new();

        if let Some(summary) = &strength.summary {
            let focus = &summary.most_opportunity_exercise;
            insights.push(ActionableInsight {
                kind: InsightKind::Strength,
                priority: InsightPriority::High,
                message: format!(
                    "Focus on {} - {:.1}kg potential",
                    focus.exercise_name, focus.missed_kg
                ),
                action: format!("Add 1-2 extra sessions for {} this month", focus.exercise_name),
            });
        }

        if consistency.consistency_gap > 0.2 {
            insights.push(ActionableInsight {
                kind: InsightKind::Consistency,
                priority: InsightPriority::Medium,
                message: format!(
                    "Aim for {} workouts/week (currently below target)",
                    consistency.target_rate_per_week
                ),
                action: "Schedule workouts in your calendar like appointments".to_owned(),
            });
        }

        match level {
            KnowledgeLevel::Novice => insights.push(ActionableInsight {
                kind: InsightKind::Education,
                priority: InsightPriority::Medium,
                message: "Focus on learning proper form for 3-5 key exercises".to_owned(),
                action: "Watch tutorial videos for your main lifts".to_owned(),
            }),
            KnowledgeLevel::Learner => insights.push(ActionableInsight {
                kind: InsightKind::Progression,
                priority: InsightPriority::Medium,
                message: "Start tracking weights and aiming for small weekly increases".to_owned(),
                action: "Add 1.25-2.5kg to one exercise each week".to_owned(),
            }),
            KnowledgeLevel::Practitioner | KnowledgeLevel::Expert => {}
        }

        insights.push(ActionableInsight {
            kind: InsightKind::General,
            priority: InsightPriority::Low,
            message: "Review your progress monthly to stay motivated".to_owned(),
            action: "Set a calendar reminder for monthly progress review".to_owned(),
        });

        insights.truncate(MAX_INSIGHTS);
        insights
    }

    fn thirty_day_potential(
        strength: &StrengthProjectionReport,
        consistency: &ConsistencyProjection,
        level: KnowledgeLevel,
    ) -> ThirtyDayPotential {
        let strength_potential_kg = strength.emotional_impact.total_missed_kg * MONTHLY_STRENGTH_SHARE;
        let extra_workouts =
            (consistency.consistency_gap * MONTHLY_EXTRA_WORKOUTS_AT_FULL_GAP).floor() as u32;

        ThirtyDayPotential {
            timeframe_days: 30,
            strength_potential_kg,
            consistency_potential_workouts: extra_workouts,
            knowledge_level: level,
            achievable_goals: vec![
                format!("Add {strength_potential_kg:.1}kg to your lifts"),
                format!("Complete {extra_workouts} extra workouts"),
                "Improve one exercise by 5-10%".to_owned(),
            ],
            commitment_required: CommitmentRequired {
                weekly_sessions: extra_workouts / 4 + 2,
                focus_minutes: MINUTES_PER_EXTRA_WORKOUT * extra_workouts,
                consistency_days: MONTHLY_CONSISTENCY_DAYS,
            },
        }
    }
}
