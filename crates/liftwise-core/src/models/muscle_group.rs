// ABOUTME: Canonical muscle group enumeration used to bucket free-text muscle labels
// ABOUTME: Fixed variant order doubles as the classification and reporting order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical muscle group buckets
///
/// Variant order is significant: it is the order in which keyword tables are
/// scanned and the order in which per-group results are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CanonicalMuscleGroup {
    /// Chest / pectorals
    Chest,
    /// Back / lats
    Back,
    /// Legs (quads, hamstrings, calves)
    Legs,
    /// Shoulders / deltoids
    Shoulders,
    /// Arms (biceps, triceps)
    Arms,
    /// Core / abdominals
    Core,
    /// Cardio / endurance work
    Cardio,
    /// Labelled, but matching no keyword table
    Other,
    /// Missing or empty label
    Unknown,
}

impl CanonicalMuscleGroup {
    /// Groups that carry a keyword table and are tracked for fatigue and balance
    pub const TRACKED: [Self; 7] = [
        Self::Chest,
        Self::Back,
        Self::Legs,
        Self::Shoulders,
        Self::Arms,
        Self::Core,
        Self::Cardio,
    ];

    /// Display name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Chest => "Chest",
            Self::Back => "Back",
            Self::Legs => "Legs",
            Self::Shoulders => "Shoulders",
            Self::Arms => "Arms",
            Self::Core => "Core",
            Self::Cardio => "Cardio",
            Self::Other => "Other",
            Self::Unknown => "Unknown",
        }
    }

    /// Whether this group is one of the keyword-backed tracked groups
    #[must_use]
    pub const fn is_tracked(&self) -> bool {
        !matches!(self, Self::Other | Self::Unknown)
    }
}

impl fmt::Display for CanonicalMuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
