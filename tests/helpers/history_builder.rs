// ABOUTME: Fluent builder for deterministic training histories relative to a fixed instant
// ABOUTME: Produces HistorySnapshot values and raw sessions for provider-backed tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

#![allow(dead_code, clippy::must_use_candidate, clippy::return_self_not_must_use)]

use chrono::{DateTime, Duration, Utc};
use liftwise_core::models::{
    ExerciseDefinition, ExerciseId, ExerciseSetRecord, HistorySnapshot, SessionId, WorkoutSession,
};
use uuid::Uuid;

/// Builder for a single user's history
///
/// Every session lasts one hour. Offsets are measured back from `now` to the
/// session's end time, which is what the fatigue engine treats as "trained at".
#[derive(Debug, Clone)]
pub struct HistoryBuilder {
    user_id: Uuid,
    now: DateTime<Utc>,
    catalog: Vec<ExerciseDefinition>,
    sessions: Vec<WorkoutSession>,
    next_session_id: SessionId,
}

impl HistoryBuilder {
    /// Empty history for a fresh user
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            user_id: Uuid::new_v4(),
            now,
            catalog: Vec::new(),
            sessions: Vec::new(),
            next_session_id: 1,
        }
    }

    /// Use a specific user id
    pub const fn for_user(mut self, user_id: Uuid) -> Self {
        self.user_id = user_id;
        self
    }

    /// Use `catalog` as the exercise catalog
    pub fn with_catalog(mut self, catalog: Vec<ExerciseDefinition>) -> Self {
        self.catalog = catalog;
        self
    }

    /// Completed session ending `hours_ago` hours before now
    pub fn session_hours_ago(self, hours_ago: i64, records: Vec<ExerciseSetRecord>) -> Self {
        let end = self.now - Duration::hours(hours_ago);
        self.completed_at(end, records)
    }

    /// Completed session ending `days_ago` days before now
    pub fn session_days_ago(self, days_ago: i64, records: Vec<ExerciseSetRecord>) -> Self {
        let end = self.now - Duration::days(days_ago);
        self.completed_at(end, records)
    }

    /// Completed session ending at `end`
    pub fn completed_at(mut self, end: DateTime<Utc>, records: Vec<ExerciseSetRecord>) -> Self {
        let session = self.session(end - Duration::hours(1), Some(end), records);
        self.sessions.push(session);
        self
    }

    /// Session started `hours_ago` hours before now and never finished
    pub fn in_progress_hours_ago(mut self, hours_ago: i64, records: Vec<ExerciseSetRecord>) -> Self {
        let start = self.now - Duration::hours(hours_ago);
        let session = self.session(start, None, records);
        self.sessions.push(session);
        self
    }

    /// One weighted session per entry of `weights`, `spacing_days` apart, the last one `last_days_ago` back
    pub fn weighted_series(
        mut self,
        exercise_id: ExerciseId,
        reps: u32,
        weights: &[f64],
        spacing_days: i64,
        last_days_ago: i64,
    ) -> Self {
        let count = weights.len() as i64;
        for (position, weight) in weights.iter().enumerate() {
            let days_ago = last_days_ago + (count - 1 - position as i64) * spacing_days;
            self = self.session_days_ago(days_ago, vec![lift(exercise_id, 3, reps, *weight)]);
        }
        self
    }

    pub const fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn catalog(&self) -> Vec<ExerciseDefinition> {
        self.catalog.clone()
    }

    pub fn sessions(&self) -> Vec<WorkoutSession> {
        self.sessions.clone()
    }

    /// Snapshot over completed and in-progress sessions
    pub fn build(&self) -> HistorySnapshot {
        HistorySnapshot::new(self.user_id, self.sessions.clone(), self.catalog.clone())
    }

    fn session(
        &mut self,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
        records: Vec<ExerciseSetRecord>,
    ) -> WorkoutSession {
        let id = self.next_session_id;
        self.next_session_id += 1;
        WorkoutSession {
            id,
            user_id: self.user_id,
            name: None,
            notes: None,
            start_time: start,
            end_time: end,
            total_duration_minutes: end.map(|_| 60.0),
            calories_burned: None,
            records,
        }
    }
}

/// Record with no load data
pub const fn touch(exercise_id: ExerciseId) -> ExerciseSetRecord {
    ExerciseSetRecord::new(exercise_id)
}

/// Weighted record
pub fn lift(exercise_id: ExerciseId, sets: u32, reps: u32, weight_kg: f64) -> ExerciseSetRecord {
    ExerciseSetRecord::new(exercise_id).with_load(sets, reps, weight_kg)
}
