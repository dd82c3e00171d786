// ABOUTME: Workout session and per-exercise set record models
// ABOUTME: A session counts as completed only once its end time is set
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

use super::ExerciseId;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a workout session
pub type SessionId = i64;

/// One exercise performed within a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSetRecord {
    /// Record identity
    #[serde(default)]
    pub id: i64,
    /// Catalog exercise this record refers to
    pub exercise_id: ExerciseId,
    /// Number of sets
    #[serde(default)]
    pub sets: Option<u32>,
    /// Repetitions per set
    #[serde(default)]
    pub reps: Option<u32>,
    /// Working weight in kilograms
    #[serde(default)]
    pub weight_kg: Option<f64>,
    /// Duration in minutes
    #[serde(default)]
    pub duration_minutes: Option<f64>,
    /// Distance in kilometers
    #[serde(default)]
    pub distance_km: Option<f64>,
    /// Calories burned
    #[serde(default)]
    pub calories: Option<u32>,
}

impl ExerciseSetRecord {
    /// Create a bare record for an exercise
    #[must_use]
    pub const fn new(exercise_id: ExerciseId) -> Self {
        Self {
            id: 0,
            exercise_id,
            sets: None,
            reps: None,
            weight_kg: None,
            duration_minutes: None,
            distance_km: None,
            calories: None,
        }
    }

    /// Set sets, reps and weight in one go
    #[must_use]
    pub fn with_load(mut self, sets: u32, reps: u32, weight_kg: f64) -> Self {
        self.sets = Some(sets);
        self.reps = Some(reps);
        self.weight_kg = Some(weight_kg);
        self
    }

    /// Weight when strictly positive
    #[must_use]
    pub fn positive_weight(&self) -> Option<f64> {
        self.weight_kg.filter(|weight| *weight > 0.0)
    }
}

/// A training session owned by one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSession {
    /// Session identity
    pub id: SessionId,
    /// Owning user
    pub user_id: Uuid,
    /// Optional session name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Optional notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// When the session started (UTC)
    pub start_time: DateTime<Utc>,
    /// When the session ended; `None` while in progress
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    /// Total duration recorded by the logger
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_duration_minutes: Option<f64>,
    /// Total calories recorded by the logger
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories_burned: Option<u32>,
    /// Exercises performed, in logging order
    #[serde(default, alias = "exercises")]
    pub records: Vec<ExerciseSetRecord>,
}

impl WorkoutSession {
    /// Whether the session has been finished
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.end_time.is_some()
    }

    /// Instant the session counts as trained: end time, else start time
    #[must_use]
    pub fn trained_at(&self) -> DateTime<Utc> {
        self.end_time.unwrap_or(self.start_time)
    }

    /// Calendar day (UTC) the session started on
    #[must_use]
    pub fn training_date(&self) -> NaiveDate {
        self.start_time.date_naive()
    }

    /// Check the session's own invariants
    ///
    /// # Errors
    ///
    /// Returns an error if the end time precedes the start time
    pub fn validate(&self) -> AppResult<()> {
        match self.end_time {
            Some(end) if end < self.start_time => Err(AppError::invalid_input(format!(
                "session {} ends before it starts",
                self.id
            ))
            .with_resource_id(self.id.to_string())),
            _ => Ok(()),
        }
    }
}
