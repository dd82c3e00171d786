// ABOUTME: Core types and constants for liftwise training intelligence
// ABOUTME: Foundation crate with the history data model, error handling, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

#![deny(unsafe_code)]

//! # Liftwise Core
//!
//! Foundation crate providing shared types for the liftwise workspace. It is
//! designed to change infrequently, enabling incremental compilation benefits.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode`, and `AppResult`
//! - **models**: sessions, set records, catalog entries, and `HistorySnapshot`
//! - **constants**: service names and calendar arithmetic

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Training history and catalog data models
pub mod models;
