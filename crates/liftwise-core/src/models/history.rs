// ABOUTME: Read-only snapshot of one user's training history and the exercise catalog
// ABOUTME: Every intelligence engine computes from a single snapshot and never writes back
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

use super::{ExerciseDefinition, ExerciseId, ExerciseSetRecord, WorkoutSession};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

/// Immutable view over a user's sessions and the catalog they reference
///
/// Sessions are kept sorted by start time ascending. Sessions with equal
/// start times keep the order the provider returned them in.
#[derive(Debug, Clone)]
pub struct HistorySnapshot {
    user_id: Uuid,
    sessions: Vec<WorkoutSession>,
    catalog: Vec<ExerciseDefinition>,
    catalog_index: HashMap<ExerciseId, usize>,
}

impl HistorySnapshot {
    /// Build a snapshot from provider data
    #[must_use]
    pub fn new(
        user_id: Uuid,
        mut sessions: Vec<WorkoutSession>,
        catalog: Vec<ExerciseDefinition>,
    ) -> Self {
        sessions.sort_by_key(|session| session.start_time);
        let catalog_index = catalog
            .iter()
            .enumerate()
            .map(|(position, exercise)| (exercise.id, position))
            .collect();

        Self {
            user_id,
            sessions,
            catalog,
            catalog_index,
        }
    }

    /// Snapshot with no history and no catalog
    #[must_use]
    pub fn empty(user_id: Uuid) -> Self {
        Self::new(user_id, Vec::new(), Vec::new())
    }

    /// User this snapshot belongs to
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.user_id
    }

    /// All sessions, completed or not, oldest first
    #[must_use]
    pub fn sessions(&self) -> &[WorkoutSession] {
        &self.sessions
    }

    /// Full catalog in catalog order
    #[must_use]
    pub fn catalog(&self) -> &[ExerciseDefinition] {
        &self.catalog
    }

    /// Completed sessions, oldest first
    pub fn completed_sessions(&self) -> impl Iterator<Item = &WorkoutSession> + '_ {
        self.sessions.iter().filter(|session| session.is_completed())
    }

    /// Completed sessions that started at or after `cutoff`, oldest first
    pub fn completed_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> impl Iterator<Item = &WorkoutSession> + '_ {
        self.completed_sessions()
            .filter(move |session| session.start_time >= cutoff)
    }

    /// Records of completed sessions since `cutoff`, joined with their catalog entry
    ///
    /// Records whose exercise is missing from the catalog are skipped.
    pub fn records_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> impl Iterator<Item = (&WorkoutSession, &ExerciseSetRecord, &ExerciseDefinition)> + '_ {
        self.completed_since(cutoff).flat_map(move |session| {
            session.records.iter().filter_map(move |record| {
                self.exercise(record.exercise_id)
                    .map(|exercise| (session, record, exercise))
            })
        })
    }

    /// Records of every completed session, joined with their catalog entry
    pub fn all_records(
        &self,
    ) -> impl Iterator<Item = (&WorkoutSession, &ExerciseSetRecord, &ExerciseDefinition)> + '_ {
        self.records_since(DateTime::<Utc>::MIN_UTC)
    }

    /// Catalog lookup by id
    #[must_use]
    pub fn exercise(&self, id: ExerciseId) -> Option<&ExerciseDefinition> {
        self.catalog_index
            .get(&id)
            .and_then(|position| self.catalog.get(*position))
    }

    /// Active catalog entries in catalog order
    pub fn active_exercises(&self) -> impl Iterator<Item = &ExerciseDefinition> + '_ {
        self.catalog.iter().filter(|exercise| exercise.is_active)
    }
}
