// ABOUTME: History providers feeding training sessions and the exercise catalog to the engines
// ABOUTME: Trait definition plus in-memory and JSON-file implementations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

/// Provider trait and shared helpers
pub mod core;

/// RwLock-guarded in-memory provider
pub mod in_memory;

/// Provider loading a JSON snapshot document
pub mod json_file;

pub use self::core::HistoryProvider;
pub use in_memory::InMemoryHistoryProvider;
pub use json_file::{JsonFileHistoryProvider, SnapshotDocument};
