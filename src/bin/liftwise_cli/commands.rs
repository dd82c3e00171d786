// ABOUTME: Command handlers for liftwise-cli, one per subcommand
// ABOUTME: Each handler calls the intelligence service and prints pretty JSON on stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

use anyhow::Result;
use liftwise::services::IntelligenceService;
use liftwise_intelligence::fatigue::RecoveryPreference;
use liftwise_intelligence::knowledge_level::PlannedWorkout;
use serde::Serialize;
use serde_json::json;
use std::io::{self, Write};
use std::path::Path;
use tokio::fs;
use uuid::Uuid;

/// Arguments shared by every subcommand
pub struct CommandContext<'a> {
    pub service: &'a IntelligenceService,
    pub user_id: Uuid,
    pub days: Option<u32>,
    pub preference: Option<RecoveryPreference>,
}

fn print_json(value: &impl Serialize) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

pub async fn muscles(ctx: &CommandContext<'_>) -> Result<()> {
    let report = ctx
        .service
        .muscle_analysis(ctx.user_id, ctx.days, ctx.preference)
        .await?;
    print_json(&report)
}

pub async fn recommend(ctx: &CommandContext<'_>) -> Result<()> {
    let result = ctx
        .service
        .recommend(ctx.user_id, ctx.days, ctx.preference)
        .await?;
    print_json(&result)
}

pub async fn knowledge(ctx: &CommandContext<'_>) -> Result<()> {
    let assessment = ctx.service.knowledge_level(ctx.user_id).await?;
    let guidance = ctx.service.level_guidance(ctx.user_id).await?;
    print_json(&json!({
        "assessment": assessment,
        "guidance": guidance,
    }))
}

pub async fn safety_check(ctx: &CommandContext<'_>, plan_path: &Path) -> Result<()> {
    let text = fs::read_to_string(plan_path).await?;
    let plan: PlannedWorkout = serde_json::from_str(&text)?;
    let result = ctx.service.safety_check(ctx.user_id, &plan).await?;
    print_json(&result)
}

pub async fn overrides(ctx: &CommandContext<'_>, report: bool) -> Result<()> {
    if report {
        print_json(&ctx.service.override_report(ctx.user_id, ctx.days).await?)
    } else {
        print_json(&ctx.service.override_analysis(ctx.user_id, ctx.days).await?)
    }
}

pub async fn smart(ctx: &CommandContext<'_>) -> Result<()> {
    let result = ctx
        .service
        .smart_recommendations(ctx.user_id, ctx.days, ctx.preference)
        .await?;
    print_json(&result)
}

pub async fn insights(ctx: &CommandContext<'_>) -> Result<()> {
    print_json(&ctx.service.training_insights(ctx.user_id).await?)
}

pub async fn strength(ctx: &CommandContext<'_>) -> Result<()> {
    print_json(&ctx.service.strength_projections(ctx.user_id, ctx.days).await?)
}

pub async fn consistency(ctx: &CommandContext<'_>) -> Result<()> {
    print_json(&ctx.service.consistency_projections(ctx.user_id, ctx.days).await?)
}

pub async fn progress_report(ctx: &CommandContext<'_>, seed: Option<u64>) -> Result<()> {
    print_json(
        &ctx.service
            .comprehensive_report(ctx.user_id, ctx.days, seed)
            .await?,
    )
}
