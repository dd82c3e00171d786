// ABOUTME: Daily exercise recommendations driven by muscle fatigue and the active catalog
// ABOUTME: Picks a primary group and exercise, alternates, balancing picks, warnings, and explanations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

use crate::config::intelligence::RecommendationConfig;
use crate::fatigue::{FatigueAnalysis, MuscleGroupStatus, RecoveryPreference};
use crate::muscle_classifier::MuscleGroupClassifier;
use chrono::{DateTime, Utc};
use liftwise_core::models::{CanonicalMuscleGroup, ExerciseDefinition, ExerciseId, HistorySnapshot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;
use uuid::Uuid;

/// Why an exercise was included
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    /// Top pick for the highest-priority recovered group
    Primary,
    /// Another exercise for the primary group
    Alternate,
    /// One exercise for a lower-ranked recovered group
    Balancing,
}

/// A single suggested exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRecommendation {
    /// Catalog id
    pub exercise_id: ExerciseId,
    /// Catalog name
    pub exercise_name: String,
    /// Group the exercise was selected for
    pub muscle_group: CanonicalMuscleGroup,
    /// Role in the recommendation
    pub kind: RecommendationKind,
    /// Human-readable reason
    pub reason: String,
    /// Suggested sets
    pub sets_suggestion: u32,
    /// Suggested reps per set
    pub reps_suggestion: String,
}

/// Whether a recommendation could be produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationAvailability {
    /// At least one exercise was recommended
    Available,
    /// Every tracked group is still inside its minimum rest period
    AllGroupsRecovering,
    /// Some groups are recovered, but the active catalog has nothing for them
    NoMatchingExercises,
}

/// Full recommendation output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResult {
    /// User the recommendation is for
    pub user_id: Uuid,
    /// Preference the recovery check used
    pub recovery_preference: RecoveryPreference,
    /// Lookback window in days
    pub analysis_period_days: u32,
    /// Instant the recommendation was computed for
    pub generated_at: DateTime<Utc>,
    /// Explicit availability signal
    pub availability: RecommendationAvailability,
    /// First recommendation, if any
    pub primary: Option<ExerciseRecommendation>,
    /// Remaining recommendations in selection order
    pub alternatives: Vec<ExerciseRecommendation>,
    /// Overtraining, neglect, and rest warnings
    pub warnings: Vec<String>,
    /// Deterministic explanation lines
    pub explanations: Vec<String>,
    /// Per-group fatigue state the decision was based on
    pub muscle_analysis: BTreeMap<CanonicalMuscleGroup, MuscleGroupStatus>,
    /// One-line summary
    pub summary: String,
}

impl RecommendationResult {
    /// Primary followed by alternatives
    #[must_use]
    pub fn all_recommendations(&self) -> Vec<&ExerciseRecommendation> {
        self.primary.iter().chain(self.alternatives.iter()).collect()
    }
}

/// Recommendation engine
pub struct RecommendationEngine;

impl RecommendationEngine {
    /// Recommend exercises from a fatigue analysis and the snapshot's active catalog
    #[must_use]
    pub fn recommend(
        analysis: &FatigueAnalysis,
        snapshot: &HistorySnapshot,
        neglect_threshold_days: u32,
        config: &RecommendationConfig,
    ) -> RecommendationResult {
        let catalog: Vec<&ExerciseDefinition> = snapshot.active_exercises().collect();
        let available = analysis.available_groups();
        let neglected = analysis.neglected_groups(neglect_threshold_days);

        let mut recommendations = Vec::new();
        if let Some(primary_status) = available.first() {
            let group = primary_status.muscle_group;
            let exercises = Self::exercises_for_group(&catalog, group);
            if let Some((first, rest)) = exercises.split_first() {
                recommendations.push(Self::build(
                    first,
                    group,
                    RecommendationKind::Primary,
                    format!(
                        "High priority: {group} has priority score {:.2}",
                        primary_status.priority_score
                    ),
                    config,
                ));
                recommendations.extend(rest.iter().take(config.max_alternates).map(|exercise| {
                    Self::build(
                        exercise,
                        group,
                        RecommendationKind::Alternate,
                        format!("Alternative {group} exercise"),
                        config,
                    )
                }));
            }
        }

        for status in available.iter().skip(1).take(config.max_balancing_groups) {
            let group = status.muscle_group;
            if let Some(exercise) = Self::exercises_for_group(&catalog, group).first() {
                recommendations.push(Self::build(
                    exercise,
                    group,
                    RecommendationKind::Balancing,
                    format!("Balancing: {group} needs attention"),
                    config,
                ));
            }
        }

        let warnings = Self::warnings(analysis, &neglected, config);
        let explanations = Self::explanations(analysis, &available, &neglected);

        let availability = if !recommendations.is_empty() {
            RecommendationAvailability::Available
        } else if available.is_empty() {
            RecommendationAvailability::AllGroupsRecovering
        } else {
            RecommendationAvailability::NoMatchingExercises
        };

        let mut recommendations = recommendations.into_iter();
        let primary = recommendations.next();
        let alternatives: Vec<ExerciseRecommendation> = recommendations.collect();
        let summary = Self::summary(primary.as_ref(), availability, &warnings);

        debug!(
            user_id = %snapshot.user_id(),
            availability = ?availability,
            recommended = alternatives.len() + usize::from(primary.is_some()),
            warnings = warnings.len(),
            "Generated recommendation"
        );

        RecommendationResult {
            user_id: snapshot.user_id(),
            recovery_preference: analysis.recovery_preference,
            analysis_period_days: analysis.lookback_days,
            generated_at: analysis.analyzed_at,
            availability,
            primary,
            alternatives,
            warnings,
            explanations,
            muscle_analysis: analysis.groups.clone(),
            summary,
        }
    }

    /// Active catalog entries classified into `group`, in catalog order
    #[must_use]
    pub fn exercises_for_group<'a>(
        catalog: &[&'a ExerciseDefinition],
        group: CanonicalMuscleGroup,
    ) -> Vec<&'a ExerciseDefinition> {
        catalog
            .iter()
            .copied()
            .filter(|exercise| {
                exercise.is_active
                    && exercise.muscle_label().is_some()
                    && MuscleGroupClassifier::classify_exercise(exercise) == group
            })
            .collect()
    }

    fn build(
        exercise: &ExerciseDefinition,
        group: CanonicalMuscleGroup,
        kind: RecommendationKind,
        reason: String,
        config: &RecommendationConfig,
    ) -> ExerciseRecommendation {
        ExerciseRecommendation {
            exercise_id: exercise.id,
            exercise_name: exercise.name.clone(),
            muscle_group: group,
            kind,
            reason,
            sets_suggestion: config.suggested_sets,
            reps_suggestion: config.suggested_reps.clone(),
        }
    }

    fn warnings(
        analysis: &FatigueAnalysis,
        neglected: &[CanonicalMuscleGroup],
        config: &RecommendationConfig,
    ) -> Vec<String> {
        let mut warnings = Vec::new();

        let overtrained: Vec<&str> = analysis
            .groups
            .values()
            .filter(|status| status.fatigue_score > config.overtraining_fatigue_threshold)
            .map(|status| status.muscle_group.as_str())
            .collect();
        if !overtrained.is_empty() {
            warnings.push(format!("Overtraining risk: {}", overtrained.join(", ")));
        }

        if !neglected.is_empty() {
            warnings.push(format!(
                "Neglected muscles: {}",
                join_groups(neglected, config.max_groups_in_warning)
            ));
        }

        let recovering = analysis.recovering_groups();
        if !recovering.is_empty() {
            warnings.push(format!(
                "Muscles need rest: {}",
                join_groups(&recovering, config.max_groups_in_warning)
            ));
        }

        warnings
    }

    fn explanations(
        analysis: &FatigueAnalysis,
        available: &[&MuscleGroupStatus],
        neglected: &[CanonicalMuscleGroup],
    ) -> Vec<String> {
        let mut explanations = vec![format!(
            "Based on last {} days of training",
            analysis.lookback_days
        )];

        if let Some(top) = available.first() {
            explanations.push(format!(
                "Primary focus: {} (priority: {:.2})",
                top.muscle_group, top.priority_score
            ));
        } else {
            explanations.push("All muscle groups are still recovering; consider a rest day".into());
        }

        if let Some(first) = neglected.first() {
            explanations.push(format!("Consider adding: {first} to address imbalance"));
        }

        explanations
    }

    fn summary(
        primary: Option<&ExerciseRecommendation>,
        availability: RecommendationAvailability,
        warnings: &[String],
    ) -> String {
        let Some(choice) = primary else {
            return match availability {
                RecommendationAvailability::AllGroupsRecovering => {
                    "No recommendation today: every muscle group is still recovering.".into()
                }
                _ => "No recommendation today: no active exercises match the recovered muscle groups."
                    .into(),
            };
        };

        let mut summary = format!(
            "Today's focus: {}. Recommended: {}.",
            choice.muscle_group, choice.exercise_name
        );
        if let Some(first) = warnings.first() {
            summary.push_str(" Note: ");
            summary.push_str(first);
        }
        summary
    }
}

fn join_groups(groups: &[CanonicalMuscleGroup], limit: usize) -> String {
    groups
        .iter()
        .take(limit)
        .map(CanonicalMuscleGroup::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
