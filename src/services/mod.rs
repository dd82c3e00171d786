// ABOUTME: Service layer combining history providers with the intelligence engines
// ABOUTME: Stateless orchestration; one snapshot and one clock reading per operation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

/// Intelligence orchestration over a history provider
pub mod intelligence_service;

pub use intelligence_service::{
    Clock, FixedClock, IntelligenceService, MuscleAnalysisReport, SmartRecommendation, SystemClock,
    TrainingInsights,
};
