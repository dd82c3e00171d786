// ABOUTME: Motivational quote bank keyed by progress-score band with pluggable selection
// ABOUTME: Seeded ChaCha8 selection for reports and fixed-index selection for deterministic callers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Quotes for scores above 70
const HIGH_QUOTES: [&str; 3] = [
    "The only bad workout is the one that didn't happen.",
    "Success isn't always about greatness. It's about consistency.",
    "Don't stop when you're tired. Stop when you're done.",
];

/// Quotes for scores above 40
const MEDIUM_QUOTES: [&str; 3] = [
    "It's not about having time, it's about making time.",
    "The hardest lift of all is lifting your butt off the couch.",
    "Small steps every day lead to big results over time.",
];

/// Quotes for everything else
const LOW_QUOTES: [&str; 3] = [
    "The best time to start was yesterday. The second best time is now.",
    "You don't have to be great to start, but you have to start to be great.",
    "Your only limit is you. What are you waiting for?",
];

/// Score band a quote is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteBand {
    /// Score above 70
    High,
    /// Score above 40
    Medium,
    /// Score 40 or below
    Low,
}

impl QuoteBand {
    /// Band for a 0-100 progress score
    #[must_use]
    pub fn for_score(score: f64) -> Self {
        if score > 70.0 {
            Self::High
        } else if score > 40.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Quotes in this band
    #[must_use]
    pub const fn quotes(&self) -> &'static [&'static str] {
        match self {
            Self::High => &HIGH_QUOTES,
            Self::Medium => &MEDIUM_QUOTES,
            Self::Low => &LOW_QUOTES,
        }
    }
}

/// Strategy for picking one quote out of a band
pub trait QuoteSelector {
    /// Index into a bank of `bank_len` quotes; must be below `bank_len` when it is non-zero
    fn select_index(&mut self, bank_len: usize) -> usize;

    /// Quote for a progress score
    fn quote_for_score(&mut self, score: f64) -> &'static str {
        let bank = QuoteBand::for_score(score).quotes();
        let index = self.select_index(bank.len());
        bank.get(index).copied().unwrap_or_default()
    }
}

/// Pseudo-random selection from an explicit seed
#[derive(Debug, Clone)]
pub struct SeededQuoteSelector {
    rng: ChaCha8Rng,
}

impl SeededQuoteSelector {
    /// Selector that always yields the same sequence for `seed`
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Selector seeded from the thread RNG
    #[must_use]
    pub fn from_random_seed() -> Self {
        Self::new(rand::random())
    }

    /// Seeded selector when `seed` is set, otherwise a randomly seeded one
    #[must_use]
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_random_seed, Self::new)
    }
}

impl QuoteSelector for SeededQuoteSelector {
    fn select_index(&mut self, bank_len: usize) -> usize {
        if bank_len == 0 {
            return 0;
        }
        self.rng.gen_range(0..bank_len)
    }
}

/// Always picks the same position (modulo bank size)
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedQuoteSelector {
    index: usize,
}

impl FixedQuoteSelector {
    /// Selector pinned to `index`
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self { index }
    }
}

impl QuoteSelector for FixedQuoteSelector {
    fn select_index(&mut self, bank_len: usize) -> usize {
        if bank_len == 0 {
            0
        } else {
            self.index % bank_len
        }
    }
}
