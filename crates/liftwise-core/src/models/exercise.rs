// ABOUTME: Exercise catalog definitions owned by the catalog collaborator
// ABOUTME: Carries exercise type, free-text muscle label, and the active flag
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog identifier of an exercise definition
pub type ExerciseId = i64;

/// Kind of exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseType {
    /// Resistance training
    Strength,
    /// Conditioning work
    Cardio,
    /// Stretching and mobility
    Flexibility,
    /// Balance and stability
    Balance,
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Strength => "strength",
            Self::Cardio => "cardio",
            Self::Flexibility => "flexibility",
            Self::Balance => "balance",
        };
        f.write_str(name)
    }
}

/// An exercise in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseDefinition {
    /// Catalog identity
    pub id: ExerciseId,
    /// Unique display name
    pub name: String,
    /// Exercise type
    pub exercise_type: ExerciseType,
    /// Free-text muscle label (e.g. "Upper chest, triceps")
    #[serde(default)]
    pub muscle_group: Option<String>,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional equipment note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment_required: Option<String>,
    /// Inactive exercises stay resolvable for history but are never recommended
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

impl ExerciseDefinition {
    /// Create an active exercise definition
    #[must_use]
    pub fn new(
        id: ExerciseId,
        name: impl Into<String>,
        exercise_type: ExerciseType,
        muscle_group: Option<&str>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            exercise_type,
            muscle_group: muscle_group.map(str::to_owned),
            description: None,
            equipment_required: None,
            is_active: true,
        }
    }

    /// Mark the definition inactive
    #[must_use]
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Muscle label when present and non-empty
    #[must_use]
    pub fn muscle_label(&self) -> Option<&str> {
        self.muscle_group.as_deref().filter(|label| !label.is_empty())
    }

    /// Whether this is a strength exercise
    #[must_use]
    pub fn is_strength(&self) -> bool {
        self.exercise_type == ExerciseType::Strength
    }
}
