// ABOUTME: Maps free-text muscle labels onto the canonical muscle group set
// ABOUTME: First keyword match in fixed table order wins so overlapping labels resolve identically everywhere
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

use liftwise_core::models::{CanonicalMuscleGroup, ExerciseDefinition};

/// Keyword table scanned in order; the first group with a matching keyword wins
const KEYWORD_TABLE: [(CanonicalMuscleGroup, &[&str]); 7] = [
    (CanonicalMuscleGroup::Chest, &["chest", "pectoral", "bench"]),
    (CanonicalMuscleGroup::Back, &["back", "lat", "pull", "row"]),
    (
        CanonicalMuscleGroup::Legs,
        &["leg", "quad", "hamstring", "calf", "squat"],
    ),
    (
        CanonicalMuscleGroup::Shoulders,
        &["shoulder", "deltoid", "press"],
    ),
    (CanonicalMuscleGroup::Arms, &["bicep", "tricep", "arm"]),
    (
        CanonicalMuscleGroup::Core,
        &["core", "abdominal", "abs", "oblique"],
    ),
    (
        CanonicalMuscleGroup::Cardio,
        &["cardio", "endurance", "aerobic"],
    ),
];

/// Muscle group classifier
pub struct MuscleGroupClassifier;

impl MuscleGroupClassifier {
    /// Classify a free-text muscle label
    ///
    /// Empty or absent labels are `Unknown`; labels matching no keyword are `Other`.
    #[must_use]
    pub fn classify(label: Option<&str>) -> CanonicalMuscleGroup {
        let Some(label) = label.filter(|label| !label.is_empty()) else {
            return CanonicalMuscleGroup::Unknown;
        };

        let lowered = label.to_lowercase();
        KEYWORD_TABLE
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|keyword| lowered.contains(keyword)))
            .map_or(CanonicalMuscleGroup::Other, |(group, _)| *group)
    }

    /// Classify a catalog entry by its muscle label
    #[must_use]
    pub fn classify_exercise(exercise: &ExerciseDefinition) -> CanonicalMuscleGroup {
        Self::classify(exercise.muscle_label())
    }

    /// Keywords that map onto `group`; empty for `Other` and `Unknown`
    #[must_use]
    pub fn keywords(group: CanonicalMuscleGroup) -> &'static [&'static str] {
        KEYWORD_TABLE
            .iter()
            .find(|(candidate, _)| *candidate == group)
            .map_or(&[][..], |(_, keywords)| *keywords)
    }
}
