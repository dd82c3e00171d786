// ABOUTME: History provider trait giving the engines read access to sessions and the exercise catalog
// ABOUTME: Defines the collaborator seam between storage and the stateless intelligence engines
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

//! # History Provider
//!
//! The intelligence engines never talk to storage. A `HistoryProvider`
//! answers four read-only queries, and [`HistoryProvider::snapshot`] turns
//! them into the single [`HistorySnapshot`] every engine call computes from.
//!
//! ## Example: Adding a New Provider
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use chrono::{DateTime, Utc};
//! use liftwise::providers::core::HistoryProvider;
//! use liftwise_core::errors::AppResult;
//! use liftwise_core::models::{ExerciseDefinition, ExerciseId, WorkoutSession};
//! use uuid::Uuid;
//!
//! pub struct EmptyProvider;
//!
//! #[async_trait]
//! impl HistoryProvider for EmptyProvider {
//!     fn name(&self) -> &'static str {
//!         "empty"
//!     }
//!
//!     async fn completed_sessions(
//!         &self,
//!         _user_id: Uuid,
//!         _since: Option<DateTime<Utc>>,
//!     ) -> AppResult<Vec<WorkoutSession>> {
//!         Ok(Vec::new())
//!     }
//!
//!     async fn exercise(&self, _id: ExerciseId) -> AppResult<Option<ExerciseDefinition>> {
//!         Ok(None)
//!     }
//!
//!     async fn exercises(&self, _active_only: bool) -> AppResult<Vec<ExerciseDefinition>> {
//!         Ok(Vec::new())
//!     }
//!
//!     async fn exercises_by_muscle_label(&self, _label: &str) -> AppResult<Vec<ExerciseDefinition>> {
//!         Ok(Vec::new())
//!     }
//! }
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use liftwise_core::errors::AppResult;
use liftwise_core::models::{ExerciseDefinition, ExerciseId, HistorySnapshot, WorkoutSession};
use tracing::debug;
use uuid::Uuid;

/// Read-only access to training history and the exercise catalog
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &'static str;

    /// Completed sessions for `user_id`, optionally only those started at or after `since`
    async fn completed_sessions(
        &self,
        user_id: Uuid,
        since: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<WorkoutSession>>;

    /// Catalog entry by id
    async fn exercise(&self, id: ExerciseId) -> AppResult<Option<ExerciseDefinition>>;

    /// Catalog entries, optionally only active ones
    async fn exercises(&self, active_only: bool) -> AppResult<Vec<ExerciseDefinition>>;

    /// Catalog entries whose muscle label contains `label`, ignoring case
    async fn exercises_by_muscle_label(&self, label: &str) -> AppResult<Vec<ExerciseDefinition>>;

    /// Full completed history plus the full catalog as one snapshot
    async fn snapshot(&self, user_id: Uuid) -> AppResult<HistorySnapshot> {
        let sessions = self.completed_sessions(user_id, None).await?;
        let catalog = self.exercises(false).await?;
        debug!(
            provider = self.name(),
            user_id = %user_id,
            sessions = sessions.len(),
            catalog = catalog.len(),
            "Loaded history snapshot"
        );
        Ok(HistorySnapshot::new(user_id, sessions, catalog))
    }
}

/// Case-insensitive substring match on an exercise's muscle label
#[must_use]
pub fn muscle_label_matches(exercise: &ExerciseDefinition, label: &str) -> bool {
    let needle = label.trim().to_lowercase();
    exercise
        .muscle_label()
        .is_some_and(|muscle| muscle.to_lowercase().contains(&needle))
}
