// ABOUTME: Detects training bias and neglect across muscle groups plus per-exercise progression trends
// ABOUTME: Re-ranks candidate recommendations away from favourites and toward under-trained groups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

//! # Override Pattern Analysis
//!
//! Compares what a user actually trains against an even split across the
//! muscle groups they touched. The average share is `100 / observed groups`,
//! so it moves with how many groups appear at all. A group never trained in
//! the window is not reported as neglected here; the fatigue engine covers it.

use crate::config::intelligence::OverrideAnalysisConfig;
use crate::muscle_classifier::MuscleGroupClassifier;
use crate::window::window_start;
use chrono::{DateTime, NaiveDate, Utc};
use liftwise_core::constants::time::DAYS_PER_WEEK;
use liftwise_core::models::{CanonicalMuscleGroup, DataSufficiency, ExerciseId, HistorySnapshot};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Weighted records an exercise needs before its progression is measured
const MIN_PROGRESSION_RECORDS: usize = 3;

/// Favourite exercises listed in the analysis
const MAX_FAVORITES: usize = 5;

/// Favourite count above which variety is recommended
const VARIETY_THRESHOLD: u32 = 10;

/// Share of the average a neglected group is asked to reach
const NEGLECT_RECOVERY_TARGET: f64 = 0.8;

/// Per-group exercise counts and shares
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MuscleDistribution {
    /// Labelled set-records per group
    pub counts: BTreeMap<CanonicalMuscleGroup, u32>,
    /// Share of all labelled set-records per group (0-100)
    pub percentages: BTreeMap<CanonicalMuscleGroup, f64>,
    /// `100 / number of observed groups`, or 0 when nothing was observed
    pub average_percentage: f64,
}

/// A group trained noticeably more than average
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MuscleBias {
    /// Over-trained group
    pub muscle_group: CanonicalMuscleGroup,
    /// Its share (0-100)
    pub percentage: f64,
    /// Average share
    pub average: f64,
    /// `percentage - average`
    pub over_trained_by: f64,
}

/// A present group trained noticeably less than average
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MuscleNeglect {
    /// Under-trained group
    pub muscle_group: CanonicalMuscleGroup,
    /// Its share (0-100)
    pub percentage: f64,
    /// Average share
    pub average: f64,
    /// `average - percentage`
    pub under_trained_by: f64,
}

/// Direction of an exercise's working weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressionTrend {
    /// Weight going up
    Increasing,
    /// No net change
    Stable,
    /// Weight going down
    Decreasing,
}

impl ProgressionTrend {
    fn from_rate(weekly_increase: f64) -> Self {
        if weekly_increase > 0.0 {
            Self::Increasing
        } else if weekly_increase < 0.0 {
            Self::Decreasing
        } else {
            Self::Stable
        }
    }
}

/// Progression of one exercise over the window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseProgression {
    /// Catalog id
    pub exercise_id: ExerciseId,
    /// Catalog name
    pub exercise_name: String,
    /// `(last - first) / max(1, weeks elapsed)`
    pub weekly_increase_kg: f64,
    /// `last - first`
    pub total_increase_kg: f64,
    /// Weighted records considered
    pub records_count: usize,
    /// Sign of `weekly_increase_kg`
    pub trend: ProgressionTrend,
}

/// Roll-up of per-exercise progression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionSummary {
    /// Up to three increasing exercises
    pub increasing_exercises: Vec<String>,
    /// Up to three stable exercises
    pub stable_exercises: Vec<String>,
    /// Up to three decreasing exercises
    pub decreasing_exercises: Vec<String>,
    /// Mean weekly increase across exercises
    pub average_weekly_increase_kg: f64,
    /// Exercise with the highest weekly increase
    pub fastest_progressing: String,
    /// Exercise with the lowest weekly increase
    pub slowest_progressing: String,
}

/// Progression patterns across all weighted exercises
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressionPatterns {
    /// Exercises with at least one weighted record
    pub exercises_tracked: usize,
    /// Exercises with enough records for a rate
    pub exercises_with_progression: usize,
    /// Per-exercise rates, in first-seen order
    pub progression_rates: Vec<ExerciseProgression>,
    /// Roll-up; `None` when no exercise has a rate
    pub summary: Option<ProgressionSummary>,
}

/// How often one exercise was performed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseFrequency {
    /// Catalog name
    pub exercise_name: String,
    /// Set-records in the window
    pub count: u32,
}

/// Bias, neglect, and progression analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverrideAnalysis {
    /// Window in days
    pub analysis_period_days: u32,
    /// Completed sessions in the window
    pub total_workouts: usize,
    /// Labelled set-records in the window
    pub total_exercises: u32,
    /// Whether there was anything to analyze
    pub data_sufficiency: DataSufficiency,
    /// Per-group distribution
    pub distribution: MuscleDistribution,
    /// Over-trained groups, largest excess first
    pub biases: Vec<MuscleBias>,
    /// Under-trained present groups, largest shortfall first
    pub neglected_muscles: Vec<MuscleNeglect>,
    /// Weight progression per exercise
    pub progression: ProgressionPatterns,
    /// Most frequent exercises
    pub favorite_exercises: Vec<ExerciseFrequency>,
    /// Templated insights
    pub insights: Vec<String>,
}

impl OverrideAnalysis {
    /// Whether `group` is flagged as biased
    #[must_use]
    pub fn bias_for(&self, group: CanonicalMuscleGroup) -> Option<&MuscleBias> {
        self.biases.iter().find(|bias| bias.muscle_group == group)
    }

    /// Whether `group` is flagged as neglected
    #[must_use]
    pub fn neglect_for(&self, group: CanonicalMuscleGroup) -> Option<&MuscleNeglect> {
        self.neglected_muscles
            .iter()
            .find(|neglect| neglect.muscle_group == group)
    }
}

/// A recommendation to be re-ranked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentCandidate {
    /// Catalog id, when the candidate is a concrete exercise
    pub exercise_id: Option<ExerciseId>,
    /// Catalog name, when the candidate is a concrete exercise
    pub exercise_name: Option<String>,
    /// Group the candidate trains
    pub muscle_group: CanonicalMuscleGroup,
    /// Priority before adjustment
    pub priority: f64,
}

/// A candidate after bias/neglect adjustment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustedRecommendation {
    /// Original candidate
    #[serde(flatten)]
    pub candidate: AdjustmentCandidate,
    /// Priority after adjustment
    pub adjusted_priority: f64,
    /// Why the priority changed (or did not)
    pub adjustment_reason: String,
}

/// Narrative report built on an analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverrideReport {
    /// Window in days
    pub period_analyzed_days: u32,
    /// One-sentence summary
    pub summary: String,
    /// Same as the analysis insights
    pub key_findings: Vec<String>,
    /// Actionable recommendations, at least three
    pub recommendations: Vec<String>,
    /// Underlying analysis
    pub detailed_analysis: OverrideAnalysis,
}

/// Override pattern analyzer
pub struct OverridePatternAnalyzer;

impl OverridePatternAnalyzer {
    /// Analyze the last `window_days` of completed sessions
    #[must_use]
    pub fn analyze(
        snapshot: &HistorySnapshot,
        now: DateTime<Utc>,
        window_days: u32,
        config: &OverrideAnalysisConfig,
    ) -> OverrideAnalysis {
        let cutoff = window_start(now, window_days);
        let total_workouts = snapshot.completed_since(cutoff).count();

        let distribution = Self::distribution(snapshot, cutoff);
        let total_exercises: u32 = distribution.counts.values().sum();
        let biases = Self::biases(&distribution, config);
        let neglected_muscles = Self::neglected(&distribution, config);
        let progression = Self::progression_patterns(snapshot, cutoff);
        let favorite_exercises = Self::favorite_exercises(snapshot, cutoff);
        let insights = Self::insights(&biases, &neglected_muscles, &progression, config);

        let data_sufficiency = if total_workouts == 0 {
            DataSufficiency::NoData
        } else if total_exercises == 0 {
            DataSufficiency::Insufficient
        } else {
            DataSufficiency::Sufficient
        };

        debug!(
            user_id = %snapshot.user_id(),
            window_days,
            total_workouts,
            biases = biases.len(),
            neglected = neglected_muscles.len(),
            "Analyzed override patterns"
        );

        OverrideAnalysis {
            analysis_period_days: window_days,
            total_workouts,
            total_exercises,
            data_sufficiency,
            distribution,
            biases,
            neglected_muscles,
            progression,
            favorite_exercises,
            insights,
        }
    }

    fn distribution(snapshot: &HistorySnapshot, cutoff: DateTime<Utc>) -> MuscleDistribution {
        let mut counts: BTreeMap<CanonicalMuscleGroup, u32> = BTreeMap::new();
        for (_, _, exercise) in snapshot.records_since(cutoff) {
            if exercise.muscle_label().is_some() {
                *counts
                    .entry(MuscleGroupClassifier::classify_exercise(exercise))
                    .or_insert(0) += 1;
            }
        }

        let total: u32 = counts.values().sum();
        if total == 0 {
            return MuscleDistribution::default();
        }

        let percentages = counts
            .iter()
            .map(|(group, count)| (*group, f64::from(*count) / f64::from(total) * 100.0))
            .collect();
        let average_percentage = 100.0 / counts.len() as f64;

        MuscleDistribution {
            counts,
            percentages,
            average_percentage,
        }
    }

    fn biases(distribution: &MuscleDistribution, config: &OverrideAnalysisConfig) -> Vec<MuscleBias> {
        let average = distribution.average_percentage;
        let mut biases: Vec<MuscleBias> = distribution
            .percentages
            .iter()
            .filter(|(_, percentage)| **percentage > average * config.bias_ratio)
            .map(|(group, percentage)| MuscleBias {
                muscle_group: *group,
                percentage: *percentage,
                average,
                over_trained_by: percentage - average,
            })
            .collect();
        biases.sort_by(|a, b| b.over_trained_by.total_cmp(&a.over_trained_by));
        biases
    }

    fn neglected(
        distribution: &MuscleDistribution,
        config: &OverrideAnalysisConfig,
    ) -> Vec<MuscleNeglect> {
        let average = distribution.average_percentage;
        let mut neglected: Vec<MuscleNeglect> = CanonicalMuscleGroup::TRACKED
            .iter()
            .filter_map(|group| {
                let percentage = distribution.percentages.get(group).copied().unwrap_or(0.0);
                (percentage > 0.0 && percentage < average * config.neglect_ratio).then(|| {
                    MuscleNeglect {
                        muscle_group: *group,
                        percentage,
                        average,
                        under_trained_by: average - percentage,
                    }
                })
            })
            .collect();
        neglected.sort_by(|a, b| b.under_trained_by.total_cmp(&a.under_trained_by));
        neglected
    }

    fn progression_patterns(snapshot: &HistorySnapshot, cutoff: DateTime<Utc>) -> ProgressionPatterns {
        let mut order: Vec<ExerciseId> = Vec::new();
        let mut series: HashMap<ExerciseId, (String, Vec<(NaiveDate, f64)>)> = HashMap::new();

        for (session, record, exercise) in snapshot.records_since(cutoff) {
            let Some(weight) = record.positive_weight() else {
                continue;
            };
            series
                .entry(exercise.id)
                .or_insert_with(|| {
                    order.push(exercise.id);
                    (exercise.name.clone(), Vec::new())
                })
                .1
                .push((session.training_date(), weight));
        }

        let progression_rates: Vec<ExerciseProgression> = order
            .iter()
            .filter_map(|id| series.get(id).map(|entry| (*id, entry)))
            .filter(|(_, (_, points))| points.len() >= MIN_PROGRESSION_RECORDS)
            .filter_map(|(id, (name, points))| {
                let (first_date, first_weight) = points.first()?;
                let (last_date, last_weight) = points.last()?;
                let days = (*last_date - *first_date).num_days() as f64;
                let weeks = (days / DAYS_PER_WEEK).max(1.0);
                let total_increase_kg = last_weight - first_weight;
                let weekly_increase_kg = total_increase_kg / weeks;
                Some(ExerciseProgression {
                    exercise_id: id,
                    exercise_name: name.clone(),
                    weekly_increase_kg,
                    total_increase_kg,
                    records_count: points.len(),
                    trend: ProgressionTrend::from_rate(weekly_increase_kg),
                })
            })
            .collect();

        let summary = Self::summarize_progression(&progression_rates);
        ProgressionPatterns {
            exercises_tracked: order.len(),
            exercises_with_progression: progression_rates.len(),
            progression_rates,
            summary,
        }
    }

    fn summarize_progression(rates: &[ExerciseProgression]) -> Option<ProgressionSummary> {
        let names_with = |trend: ProgressionTrend| -> Vec<String> {
            rates
                .iter()
                .filter(|rate| rate.trend == trend)
                .take(3)
                .map(|rate| rate.exercise_name.clone())
                .collect()
        };

        let mut fastest = rates.first()?;
        let mut slowest = fastest;
        for rate in rates {
            if rate.weekly_increase_kg > fastest.weekly_increase_kg {
                fastest = rate;
            }
            if rate.weekly_increase_kg < slowest.weekly_increase_kg {
                slowest = rate;
            }
        }

        let average_weekly_increase_kg =
            rates.iter().map(|rate| rate.weekly_increase_kg).sum::<f64>() / rates.len() as f64;

        Some(ProgressionSummary {
            increasing_exercises: names_with(ProgressionTrend::Increasing),
            stable_exercises: names_with(ProgressionTrend::Stable),
            decreasing_exercises: names_with(ProgressionTrend::Decreasing),
            average_weekly_increase_kg,
            fastest_progressing: fastest.exercise_name.clone(),
            slowest_progressing: slowest.exercise_name.clone(),
        })
    }

    /// Exercises by frequency, most frequent first; ties keep first-seen order
    fn favorite_exercises(snapshot: &HistorySnapshot, cutoff: DateTime<Utc>) -> Vec<ExerciseFrequency> {
        let mut frequencies: Vec<ExerciseFrequency> = Vec::new();
        for (_, _, exercise) in snapshot.records_since(cutoff) {
            match frequencies
                .iter_mut()
                .find(|entry| entry.exercise_name == exercise.name)
            {
                Some(entry) => entry.count += 1,
                None => frequencies.push(ExerciseFrequency {
                    exercise_name: exercise.name.clone(),
                    count: 1,
                }),
            }
        }
        frequencies.sort_by(|a, b| b.count.cmp(&a.count));
        frequencies.truncate(MAX_FAVORITES);
        frequencies
    }

    fn insights(
        biases: &[MuscleBias],
        neglected: &[MuscleNeglect],
        progression: &ProgressionPatterns,
        config: &OverrideAnalysisConfig,
    ) -> Vec<String> {
        let mut insights: Vec<String> = biases
            .iter()
            .take(2)
            .map(|bias| {
                format!(
                    "You train {} {:.1}% more than average",
                    bias.muscle_group, bias.over_trained_by
                )
            })
            .collect();

        insights.extend(neglected.iter().take(2).map(|neglect| {
            format!(
                "{} gets {:.1}% less attention than average",
                neglect.muscle_group, neglect.under_trained_by
            )
        }));

        if let Some(summary) = &progression.summary {
            if summary.average_weekly_increase_kg > config.progress_callout_kg_per_week {
                insights.push(format!(
                    "Great progress! Adding {:.2}kg/week on average",
                    summary.average_weekly_increase_kg
                ));
            }
            if !summary.decreasing_exercises.is_empty() {
                insights.push(format!(
                    "Watch out: {} trending down",
                    first_names(&summary.decreasing_exercises, 2)
                ));
            }
        }

        insights.push(
            match (biases.is_empty(), neglected.is_empty()) {
                (false, true) => "You have clear favorites but maintain good overall balance",
                (true, false) => "Good variety but some muscles need more attention",
                (false, false) => "You have strong preferences leading to muscle imbalances",
                (true, true) => "Excellent balanced training approach",
            }
            .to_owned(),
        );

        insights
    }

    /// Re-rank candidates: demote biased groups, promote neglected ones
    ///
    /// The sort is stable, so candidates with equal adjusted priority keep
    /// their original relative order.
    #[must_use]
    pub fn adjust_recommendations(
        candidates: Vec<AdjustmentCandidate>,
        analysis: &OverrideAnalysis,
        config: &OverrideAnalysisConfig,
    ) -> Vec<AdjustedRecommendation> {
        let mut adjusted: Vec<AdjustedRecommendation> = candidates
            .into_iter()
            .map(|candidate| {
                let group = candidate.muscle_group;
                let (adjusted_priority, adjustment_reason) =
                    if let Some(bias) = analysis.bias_for(group) {
                        (
                            candidate.priority * config.bias_priority_multiplier,
                            format!("Frequently trained ({:.1}% of workouts)", bias.percentage),
                        )
                    } else if let Some(neglect) = analysis.neglect_for(group) {
                        (
                            candidate.priority * config.neglect_priority_multiplier,
                            format!("Needs attention ({:.1}% of workouts)", neglect.percentage),
                        )
                    } else {
                        (candidate.priority, "Balanced training history".to_owned())
                    };
                AdjustedRecommendation {
                    candidate,
                    adjusted_priority,
                    adjustment_reason,
                }
            })
            .collect();

        adjusted.sort_by(|a, b| b.adjusted_priority.total_cmp(&a.adjusted_priority));
        adjusted
    }

    /// Narrative report over an analysis
    #[must_use]
    pub fn report(analysis: OverrideAnalysis) -> OverrideReport {
        let summary = match (analysis.biases.is_empty(), analysis.neglected_muscles.is_empty()) {
            (false, false) => "Mixed training patterns with clear favorites and some neglect",
            (false, true) => "Strong exercise preferences leading to focused training",
            (true, false) => "Balanced overall but some muscles need more attention",
            (true, true) => "Well-balanced training approach",
        }
        .to_owned();

        OverrideReport {
            period_analyzed_days: analysis.analysis_period_days,
            summary,
            key_findings: analysis.insights.clone(),
            recommendations: Self::report_recommendations(&analysis),
            detailed_analysis: analysis,
        }
    }

    fn report_recommendations(analysis: &OverrideAnalysis) -> Vec<String> {
        let mut recommendations: Vec<String> = analysis
            .biases
            .iter()
            .take(2)
            .map(|bias| {
                format!(
                    "Reduce {} frequency from {:.1}% to under {:.1}%",
                    bias.muscle_group, bias.percentage, bias.average
                )
            })
            .collect();

        recommendations.extend(analysis.neglected_muscles.iter().take(2).map(|neglect| {
            format!(
                "Increase {} training from {:.1}% to at least {:.1}%",
                neglect.muscle_group,
                neglect.percentage,
                neglect.average * NEGLECT_RECOVERY_TARGET
            )
        }));

        if let Some(summary) = &analysis.progression.summary {
            if !summary.decreasing_exercises.is_empty() {
                recommendations.push(format!(
                    "Re-evaluate programming for: {}",
                    first_names(&summary.decreasing_exercises, 2)
                ));
            }
        }

        if let Some(favorite) = analysis.favorite_exercises.first() {
            if favorite.count > VARIETY_THRESHOLD {
                recommendations.push(format!(
                    "Try alternatives to your most frequent exercise: {}",
                    favorite.exercise_name
                ));
            }
        }

        if recommendations.len() < 3 {
            recommendations.extend([
                "Consider a deload week if feeling fatigued".to_owned(),
                "Track weight and reps consistently for better insights".to_owned(),
                "Listen to your body - adjust intensity based on recovery".to_owned(),
            ]);
        }

        recommendations
    }
}

fn first_names(names: &[String], limit: usize) -> String {
    names
        .iter()
        .take(limit)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
