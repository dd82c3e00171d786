// ABOUTME: History provider loading a catalog and sessions from a JSON snapshot document on disk
// ABOUTME: Validates sessions on load and maps missing files and malformed JSON to typed errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

use super::core::HistoryProvider;
use super::in_memory::InMemoryHistoryProvider;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use liftwise_core::errors::{AppError, AppResult};
use liftwise_core::models::{ExerciseDefinition, ExerciseId, WorkoutSession};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;
use uuid::Uuid;

/// Provider name used in logs
pub const JSON_FILE_PROVIDER: &str = "json_file";

/// On-disk snapshot format
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDocument {
    /// Exercise catalog
    #[serde(default)]
    pub catalog: Vec<ExerciseDefinition>,
    /// Sessions for any number of users
    #[serde(default)]
    pub sessions: Vec<WorkoutSession>,
}

impl SnapshotDocument {
    /// Parse a document from JSON text and validate every session
    ///
    /// # Errors
    ///
    /// Returns a serialization error for malformed JSON, or an invalid-input
    /// error for a session that ends before it starts
    pub fn from_json(text: &str) -> AppResult<Self> {
        let document: Self = serde_json::from_str(text)?;
        for session in &document.sessions {
            session.validate()?;
        }
        Ok(document)
    }
}

/// History provider backed by a [`SnapshotDocument`] file
#[derive(Debug, Clone)]
pub struct JsonFileHistoryProvider {
    path: PathBuf,
    inner: InMemoryHistoryProvider,
}

impl JsonFileHistoryProvider {
    /// Load and validate the document at `path`
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the file does not exist, a storage
    /// error for other I/O failures, and a serialization error for bad JSON
    pub async fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();
        let text = fs::read_to_string(&path).await.map_err(|error| {
            if error.kind() == ErrorKind::NotFound {
                AppError::not_found(format!("snapshot file {}", path.display()))
            } else {
                AppError::from(error)
            }
        })?;
        let document = SnapshotDocument::from_json(&text)
            .map_err(|error| error.with_resource_id(path.display().to_string()))?;

        info!(
            path = %path.display(),
            sessions = document.sessions.len(),
            catalog = document.catalog.len(),
            "Loaded snapshot document"
        );

        Ok(Self {
            path,
            inner: InMemoryHistoryProvider::with_data(document.catalog, document.sessions)?,
        })
    }

    /// File the provider was loaded from
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl HistoryProvider for JsonFileHistoryProvider {
    fn name(&self) -> &'static str {
        JSON_FILE_PROVIDER
    }

    async fn completed_sessions(
        &self,
        user_id: Uuid,
        since: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<WorkoutSession>> {
        self.inner.completed_sessions(user_id, since).await
    }

    async fn exercise(&self, id: ExerciseId) -> AppResult<Option<ExerciseDefinition>> {
        self.inner.exercise(id).await
    }

    async fn exercises(&self, active_only: bool) -> AppResult<Vec<ExerciseDefinition>> {
        self.inner.exercises(active_only).await
    }

    async fn exercises_by_muscle_label(&self, label: &str) -> AppResult<Vec<ExerciseDefinition>> {
        self.inner.exercises_by_muscle_label(label).await
    }
}
