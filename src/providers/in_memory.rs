// ABOUTME: In-memory history provider for development, tests, and file-backed snapshots
// ABOUTME: Holds sessions and the catalog behind RwLocks and supports dynamic injection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

// RwLock poisoning errors are converted to AppError::internal
// for proper error propagation through the application

//! # In-Memory History Provider
//!
//! Keeps sessions for any number of users plus one shared catalog. Sessions
//! and exercises can be injected after construction, which makes the
//! provider useful both as a test double and as the backing store of the
//! JSON file provider.

use super::core::{muscle_label_matches, HistoryProvider};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use liftwise_core::errors::{AppError, AppResult};
use liftwise_core::models::{ExerciseDefinition, ExerciseId, WorkoutSession};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Provider name used in logs
pub const IN_MEMORY_PROVIDER: &str = "in_memory";

/// History provider backed by in-process vectors
///
/// # Examples
///
/// ```rust,no_run
/// use liftwise::providers::in_memory::InMemoryHistoryProvider;
/// use liftwise::providers::core::HistoryProvider;
/// use uuid::Uuid;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = InMemoryHistoryProvider::new();
/// let snapshot = provider.snapshot(Uuid::new_v4()).await?;
/// assert!(snapshot.sessions().is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryHistoryProvider {
    sessions: Arc<RwLock<Vec<WorkoutSession>>>,
    catalog: Arc<RwLock<Vec<ExerciseDefinition>>>,
}

impl InMemoryHistoryProvider {
    /// Empty provider
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider pre-loaded with a catalog and sessions
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error for the first session that ends before it starts
    pub fn with_data(
        catalog: Vec<ExerciseDefinition>,
        sessions: Vec<WorkoutSession>,
    ) -> AppResult<Self> {
        for session in &sessions {
            session.validate()?;
        }
        Ok(Self {
            sessions: Arc::new(RwLock::new(sessions)),
            catalog: Arc::new(RwLock::new(catalog)),
        })
    }

    /// Add a session
    ///
    /// # Errors
    ///
    /// Returns an error if the session is invalid or the internal lock is poisoned
    pub fn add_session(&self, session: WorkoutSession) -> AppResult<()> {
        session.validate()?;
        self.sessions
            .write()
            .map_err(|_| AppError::internal("RwLock poisoned: sessions lock"))?
            .push(session);
        Ok(())
    }

    /// Add or replace a catalog entry
    ///
    /// # Errors
    ///
    /// Returns an error if the internal lock is poisoned
    pub fn upsert_exercise(&self, exercise: ExerciseDefinition) -> AppResult<()> {
        let mut catalog = self
            .catalog
            .write()
            .map_err(|_| AppError::internal("RwLock poisoned: catalog lock"))?;
        if let Some(existing) = catalog.iter_mut().find(|entry| entry.id == exercise.id) {
            *existing = exercise;
        } else {
            catalog.push(exercise);
        }
        Ok(())
    }

    /// Number of stored sessions across all users
    ///
    /// # Errors
    ///
    /// Returns an error if the internal lock is poisoned
    pub fn session_count(&self) -> AppResult<usize> {
        Ok(self
            .sessions
            .read()
            .map_err(|_| AppError::internal("RwLock poisoned: sessions lock"))?
            .len())
    }

    fn read_catalog<T>(&self, view: impl FnOnce(&[ExerciseDefinition]) -> T) -> AppResult<T> {
        let catalog = self
            .catalog
            .read()
            .map_err(|_| AppError::internal("RwLock poisoned: catalog lock"))?;
        Ok(view(&catalog))
    }
}

#[async_trait]
impl HistoryProvider for InMemoryHistoryProvider {
    fn name(&self) -> &'static str {
        IN_MEMORY_PROVIDER
    }

    async fn completed_sessions(
        &self,
        user_id: Uuid,
        since: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<WorkoutSession>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| AppError::internal("RwLock poisoned: sessions lock"))?;
        Ok(sessions
            .iter()
            .filter(|session| session.user_id == user_id && session.is_completed())
            .filter(|session| since.is_none_or(|cutoff| session.start_time >= cutoff))
            .cloned()
            .collect())
    }

    async fn exercise(&self, id: ExerciseId) -> AppResult<Option<ExerciseDefinition>> {
        self.read_catalog(|catalog| catalog.iter().find(|exercise| exercise.id == id).cloned())
    }

    async fn exercises(&self, active_only: bool) -> AppResult<Vec<ExerciseDefinition>> {
        self.read_catalog(|catalog| {
            catalog
                .iter()
                .filter(|exercise| !active_only || exercise.is_active)
                .cloned()
                .collect()
        })
    }

    async fn exercises_by_muscle_label(&self, label: &str) -> AppResult<Vec<ExerciseDefinition>> {
        self.read_catalog(|catalog| {
            catalog
                .iter()
                .filter(|exercise| muscle_label_matches(exercise, label))
                .cloned()
                .collect()
        })
    }
}
