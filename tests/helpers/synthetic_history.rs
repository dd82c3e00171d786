// ABOUTME: Seeded synthetic training history generator for property-style engine tests
// ABOUTME: Produces random but reproducible sessions over the standard catalog with ChaCha8
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

#![allow(dead_code, clippy::must_use_candidate)]

use super::history_builder::{lift, HistoryBuilder};
use chrono::{DateTime, Utc};
use liftwise_core::models::{ExerciseDefinition, ExerciseSetRecord, HistorySnapshot};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Deterministic random history generator
#[derive(Debug, Clone)]
pub struct SyntheticHistory {
    rng: ChaCha8Rng,
}

impl SyntheticHistory {
    /// Generator with a fixed seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Up to `max_sessions` sessions over the last `span_days`, drawing exercises from `catalog`
    pub fn snapshot(
        &mut self,
        now: DateTime<Utc>,
        catalog: &[ExerciseDefinition],
        max_sessions: usize,
        span_days: i64,
    ) -> HistorySnapshot {
        let mut builder = HistoryBuilder::new(now).with_catalog(catalog.to_vec());
        let session_count = self.rng.gen_range(0..=max_sessions);
        for _ in 0..session_count {
            let hours_ago = self.rng.gen_range(0..span_days.max(1) * 24);
            let records = self.records(catalog);
            builder = builder.session_hours_ago(hours_ago, records);
        }
        builder.build()
    }

    fn records(&mut self, catalog: &[ExerciseDefinition]) -> Vec<ExerciseSetRecord> {
        if catalog.is_empty() {
            return Vec::new();
        }
        let count = self.rng.gen_range(1..=5);
        (0..count)
            .map(|_| {
                let exercise = &catalog[self.rng.gen_range(0..catalog.len())];
                let sets = self.rng.gen_range(1..=5);
                let reps = self.rng.gen_range(1..=15);
                let weight = f64::from(self.rng.gen_range(0..=120_u32)) + 0.5;
                lift(exercise.id, sets, reps, weight)
            })
            .collect()
    }
}
