// ABOUTME: Per-muscle-group fatigue, priority, and recovery modeling over recent training history
// ABOUTME: Fatigue rises with session count and recency; priority is its floor-clamped inverse
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

use crate::muscle_classifier::MuscleGroupClassifier;
use crate::window::window_start;
use chrono::{DateTime, Utc};
use liftwise_core::constants::time::{DAYS_PER_WEEK, HOURS_PER_DAY};
use liftwise_core::models::{CanonicalMuscleGroup, HistorySnapshot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Sessions at which session-driven fatigue saturates
const SESSION_FATIGUE_SATURATION: f64 = 3.0;

/// Weight of the recency term in the fatigue score
const RECENCY_WEIGHT: f64 = 0.3;

/// Priority assigned to a group with no sessions in the window
const NEGLECT_PRIORITY: f64 = 0.9;

/// Lowest priority a trained group can reach
const MIN_PRIORITY: f64 = 0.1;

/// How much rest a user wants between sessions on the same group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryPreference {
    /// 24 hours minimum rest
    Aggressive,
    /// 48 hours minimum rest
    #[default]
    Moderate,
    /// 72 hours minimum rest
    Conservative,
}

impl RecoveryPreference {
    /// Minimum hours between sessions on the same group
    #[must_use]
    pub const fn min_rest_hours(&self) -> f64 {
        match self {
            Self::Aggressive => 24.0,
            Self::Moderate => 48.0,
            Self::Conservative => 72.0,
        }
    }

    /// Parse a preference name, falling back to `Moderate` for anything unrecognised
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "aggressive" => Self::Aggressive,
            "moderate" => Self::Moderate,
            "conservative" => Self::Conservative,
            other => {
                debug!(preference = other, "Unknown recovery preference, using moderate");
                Self::Moderate
            }
        }
    }

    /// Lowercase name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Aggressive => "aggressive",
            Self::Moderate => "moderate",
            Self::Conservative => "conservative",
        }
    }
}

impl FromStr for RecoveryPreference {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_lenient(s))
    }
}

impl fmt::Display for RecoveryPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fatigue and recovery state of one muscle group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MuscleGroupStatus {
    /// Group this entry describes
    pub muscle_group: CanonicalMuscleGroup,
    /// Set-records in the window classified into this group
    pub session_count: u32,
    /// Most recent training instant (UTC)
    pub last_trained: Option<DateTime<Utc>>,
    /// Hours since `last_trained`, never negative; `None` if never trained
    pub hours_since_last: Option<f64>,
    /// 0-1, higher when trained more often and more recently
    pub fatigue_score: f64,
    /// 0-1, higher when the group should be trained next
    pub priority_score: f64,
    /// Whether the minimum rest for the preference has elapsed
    pub recovered: bool,
}

impl MuscleGroupStatus {
    /// Whether the group was trained at all in the window
    #[must_use]
    pub const fn is_trained(&self) -> bool {
        self.session_count > 0
    }
}

/// Fatigue analysis across all tracked groups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FatigueAnalysis {
    /// Instant the analysis was computed for
    pub analyzed_at: DateTime<Utc>,
    /// Lookback window in days
    pub lookback_days: u32,
    /// Preference used for the recovery check
    pub recovery_preference: RecoveryPreference,
    /// Completed sessions that fell inside the window
    pub sessions_analyzed: usize,
    /// Per-group state, in canonical order
    pub groups: BTreeMap<CanonicalMuscleGroup, MuscleGroupStatus>,
}

impl FatigueAnalysis {
    /// State of a single group
    #[must_use]
    pub fn status(&self, group: CanonicalMuscleGroup) -> Option<&MuscleGroupStatus> {
        self.groups.get(&group)
    }

    /// Groups with no sessions, or not trained for more than `threshold_days`
    #[must_use]
    pub fn neglected_groups(&self, threshold_days: u32) -> Vec<CanonicalMuscleGroup> {
        let threshold_hours = f64::from(threshold_days) * HOURS_PER_DAY;
        self.groups
            .values()
            .filter(|status| {
                !status.is_trained()
                    || status
                        .hours_since_last
                        .is_some_and(|hours| hours > threshold_hours)
            })
            .map(|status| status.muscle_group)
            .collect()
    }

    /// Groups ordered by priority, highest first; ties keep canonical order
    #[must_use]
    pub fn ranked_groups(&self) -> Vec<&MuscleGroupStatus> {
        let mut ranked: Vec<&MuscleGroupStatus> = self.groups.values().collect();
        ranked.sort_by(|a, b| b.priority_score.total_cmp(&a.priority_score));
        ranked
    }

    /// Recovered groups in priority order
    #[must_use]
    pub fn available_groups(&self) -> Vec<&MuscleGroupStatus> {
        self.ranked_groups()
            .into_iter()
            .filter(|status| status.recovered)
            .collect()
    }

    /// Top `limit` groups by priority
    #[must_use]
    pub fn priority_order(&self, limit: usize) -> Vec<CanonicalMuscleGroup> {
        self.ranked_groups()
            .into_iter()
            .take(limit)
            .map(|status| status.muscle_group)
            .collect()
    }

    /// Recovered flag per group
    #[must_use]
    pub fn recovery_status(&self) -> BTreeMap<CanonicalMuscleGroup, bool> {
        self.groups
            .iter()
            .map(|(group, status)| (*group, status.recovered))
            .collect()
    }

    /// Groups that have not yet had their minimum rest, in canonical order
    #[must_use]
    pub fn recovering_groups(&self) -> Vec<CanonicalMuscleGroup> {
        self.groups
            .values()
            .filter(|status| !status.recovered)
            .map(|status| status.muscle_group)
            .collect()
    }
}

/// Fatigue and recovery engine
pub struct FatigueRecoveryEngine;

impl FatigueRecoveryEngine {
    /// Analyze every tracked group over the last `lookback_days`
    #[must_use]
    pub fn analyze(
        snapshot: &HistorySnapshot,
        now: DateTime<Utc>,
        lookback_days: u32,
        preference: RecoveryPreference,
    ) -> FatigueAnalysis {
        let cutoff = window_start(now, lookback_days);

        let mut tallies: BTreeMap<CanonicalMuscleGroup, (u32, Option<DateTime<Utc>>)> =
            CanonicalMuscleGroup::TRACKED
                .iter()
                .map(|group| (*group, (0, None)))
                .collect();

        let mut sessions_analyzed = 0;
        for session in snapshot.completed_since(cutoff) {
            sessions_analyzed += 1;
            let trained_at = session.trained_at();
            for record in &session.records {
                let Some(exercise) = snapshot.exercise(record.exercise_id) else {
                    continue;
                };
                let group = MuscleGroupClassifier::classify_exercise(exercise);
                if let Some((count, last)) = tallies.get_mut(&group) {
                    *count += 1;
                    if last.is_none_or(|previous| trained_at > previous) {
                        *last = Some(trained_at);
                    }
                }
            }
        }

        let min_rest_hours = preference.min_rest_hours();
        let groups = tallies
            .into_iter()
            .map(|(group, (session_count, last_trained))| {
                let hours_since_last = last_trained.map(|last| hours_between(last, now).max(0.0));
                let fatigue_score = Self::fatigue_score(session_count, hours_since_last);
                let status = MuscleGroupStatus {
                    muscle_group: group,
                    session_count,
                    last_trained,
                    hours_since_last,
                    fatigue_score,
                    priority_score: Self::priority_score(session_count, fatigue_score),
                    recovered: hours_since_last.is_none_or(|hours| hours >= min_rest_hours),
                };
                (group, status)
            })
            .collect();

        debug!(
            user_id = %snapshot.user_id(),
            lookback_days,
            sessions_analyzed,
            preference = %preference,
            "Computed muscle fatigue"
        );

        FatigueAnalysis {
            analyzed_at: now,
            lookback_days,
            recovery_preference: preference,
            sessions_analyzed,
            groups,
        }
    }

    /// Fatigue score in [0, 1]
    ///
    /// Zero when never trained. Otherwise session fatigue (saturating at three
    /// sessions) plus a recency bonus that decays linearly to zero over a week.
    #[must_use]
    pub fn fatigue_score(session_count: u32, hours_since_last: Option<f64>) -> f64 {
        if session_count == 0 {
            return 0.0;
        }
        let session_fatigue = (f64::from(session_count) / SESSION_FATIGUE_SATURATION).min(1.0);
        hours_since_last.map_or(session_fatigue, |hours| {
            let recency_bonus = (1.0 - (hours / HOURS_PER_DAY) / DAYS_PER_WEEK).max(0.0);
            (session_fatigue + recency_bonus * RECENCY_WEIGHT).min(1.0)
        })
    }

    /// Priority score in [0.1, 1], or the fixed neglect priority when never trained
    #[must_use]
    pub fn priority_score(session_count: u32, fatigue_score: f64) -> f64 {
        if session_count == 0 {
            NEGLECT_PRIORITY
        } else {
            (1.0 - fatigue_score).max(MIN_PRIORITY)
        }
    }
}

/// Fractional hours from `from` to `to`
pub(crate) fn hours_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / 3_600_000.0
}
