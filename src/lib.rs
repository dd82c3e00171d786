// ABOUTME: Main library entry point for liftwise training intelligence
// ABOUTME: History providers, the intelligence service, and logging setup used by the CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

#![deny(unsafe_code)]

//! # Liftwise
//!
//! Training intelligence for strength athletes. Given a user's logged
//! workouts and an exercise catalog, liftwise answers:
//!
//! - which muscle groups are fatigued and which are ready to train
//! - what to train today
//! - how experienced the user is, and whether a planned workout is safe
//! - which muscle groups the user over- or under-trains
//! - how their strength and consistency compare to an idealized trajectory
//!
//! ## Architecture
//!
//! - **`liftwise_core`**: data model, errors, constants
//! - **`liftwise_intelligence`**: stateless engines and their configuration
//! - **providers**: where history comes from
//! - **services**: one snapshot per call, engines combined into API results
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use liftwise::providers::JsonFileHistoryProvider;
//! use liftwise::services::IntelligenceService;
//! use liftwise_core::errors::AppResult;
//! use liftwise_intelligence::IntelligenceConfig;
//! use uuid::Uuid;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let provider = JsonFileHistoryProvider::load("history.json").await?;
//!     let service = IntelligenceService::new(Arc::new(provider), IntelligenceConfig::load()?);
//!
//!     let recommendation = service.recommend(Uuid::nil(), None, None).await?;
//!     println!("{}", recommendation.summary);
//!     Ok(())
//! }
//! ```

/// Structured logging configuration
pub mod logging;

/// History providers
pub mod providers;

/// Intelligence orchestration
pub mod services;

pub use liftwise_core::errors::{AppError, AppResult, ErrorCode};
