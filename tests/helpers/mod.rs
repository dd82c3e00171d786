// ABOUTME: Shared test helpers for liftwise integration tests
// ABOUTME: Exports the deterministic history builder and seeded synthetic history generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub mod history_builder;
pub mod synthetic_history;
