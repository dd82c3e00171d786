// ABOUTME: Shared test utilities and fixtures for liftwise integration tests
// ABOUTME: Provides quiet logging setup, a fixed reference instant, and a standard exercise catalog
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `liftwise`

use chrono::{DateTime, TimeZone, Utc};
use liftwise_core::models::{ExerciseDefinition, ExerciseId, ExerciseType};
use std::env;
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Monday 2025-06-02 12:00 UTC, the "now" every engine test computes against
pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap()
}

pub const BENCH_PRESS: ExerciseId = 1;
pub const INCLINE_PRESS: ExerciseId = 2;
pub const PUSH_UP: ExerciseId = 3;
pub const CABLE_FLY: ExerciseId = 4;
pub const DEADLIFT: ExerciseId = 5;
pub const BARBELL_ROW: ExerciseId = 6;
pub const SQUAT: ExerciseId = 7;
pub const OVERHEAD_PRESS: ExerciseId = 8;
pub const BICEP_CURL: ExerciseId = 9;
pub const PLANK: ExerciseId = 10;
pub const RUNNING: ExerciseId = 11;
pub const RETIRED_MACHINE: ExerciseId = 12;
pub const YOGA_FLOW: ExerciseId = 13;

/// Catalog covering every tracked group, one inactive entry, and one unlabelled entry
pub fn standard_catalog() -> Vec<ExerciseDefinition> {
    vec![
        ExerciseDefinition::new(BENCH_PRESS, "Bench Press", ExerciseType::Strength, Some("chest")),
        ExerciseDefinition::new(
            INCLINE_PRESS,
            "Incline Dumbbell Press",
            ExerciseType::Strength,
            Some("chest"),
        ),
        ExerciseDefinition::new(PUSH_UP, "Push Up", ExerciseType::Strength, Some("chest")),
        ExerciseDefinition::new(CABLE_FLY, "Cable Fly", ExerciseType::Strength, Some("chest")),
        ExerciseDefinition::new(DEADLIFT, "Deadlift", ExerciseType::Strength, Some("back")),
        ExerciseDefinition::new(BARBELL_ROW, "Barbell Row", ExerciseType::Strength, Some("back")),
        ExerciseDefinition::new(SQUAT, "Back Squat", ExerciseType::Strength, Some("legs")),
        ExerciseDefinition::new(
            OVERHEAD_PRESS,
            "Overhead Press",
            ExerciseType::Strength,
            Some("shoulders"),
        ),
        ExerciseDefinition::new(BICEP_CURL, "Bicep Curl", ExerciseType::Strength, Some("biceps")),
        ExerciseDefinition::new(PLANK, "Plank", ExerciseType::Strength, Some("core")),
        ExerciseDefinition::new(RUNNING, "Running", ExerciseType::Cardio, Some("cardio")),
        ExerciseDefinition::new(
            RETIRED_MACHINE,
            "Pec Deck",
            ExerciseType::Strength,
            Some("chest"),
        )
        .inactive(),
        ExerciseDefinition::new(YOGA_FLOW, "Yoga Flow", ExerciseType::Flexibility, None),
    ]
}
