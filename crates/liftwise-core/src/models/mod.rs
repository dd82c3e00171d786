// ABOUTME: Core data models for training history and the exercise catalog
// ABOUTME: Re-exports exercise, session, muscle group, and snapshot types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

//! # Data Models
//!
//! Plain records supplied by the history/catalog collaborator. The
//! intelligence engines only ever read them through a [`HistorySnapshot`].

mod exercise;
mod history;
mod muscle_group;
mod session;
mod sufficiency;

pub use exercise::{ExerciseDefinition, ExerciseId, ExerciseType};
pub use history::HistorySnapshot;
pub use muscle_group::CanonicalMuscleGroup;
pub use session::{ExerciseSetRecord, SessionId, WorkoutSession};
pub use sufficiency::DataSufficiency;
