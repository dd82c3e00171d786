// ABOUTME: Liftwise CLI - runs the training intelligence engines over a JSON history snapshot
// ABOUTME: Prints fatigue, recommendations, knowledge level, override analysis, and projections as JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors
//!
//! Usage:
//! ```bash
//! # Muscle fatigue and recovery over the last 7 days
//! liftwise-cli --snapshot history.json --user <uuid> muscles
//!
//! # Today's recommendation with a conservative recovery preference
//! liftwise-cli --snapshot history.json --user <uuid> --preference conservative recommend
//!
//! # Vet a planned workout
//! liftwise-cli --snapshot history.json --user <uuid> safety-check --plan plan.json
//!
//! # Override analysis as a narrative report
//! liftwise-cli --snapshot history.json --user <uuid> overrides --report
//!
//! # Comprehensive progress report with a reproducible quote
//! liftwise-cli --snapshot history.json --user <uuid> progress report --seed 7
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use liftwise::logging::LoggingConfig;
use liftwise::providers::JsonFileHistoryProvider;
use liftwise::services::IntelligenceService;
use liftwise_intelligence::fatigue::RecoveryPreference;
use liftwise_intelligence::IntelligenceConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "liftwise-cli",
    about = "Liftwise training intelligence CLI",
    long_about = "Runs the liftwise engines over a JSON history snapshot and prints the results as JSON."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Snapshot document with `catalog` and `sessions`
    #[arg(long, global = true, env = "LIFTWISE_SNAPSHOT", default_value = "history.json")]
    snapshot: PathBuf,

    /// User to analyze
    #[arg(long, global = true, env = "LIFTWISE_USER", default_value_t = Uuid::nil())]
    user: Uuid,

    /// Analysis window in days (engine default when omitted)
    #[arg(long, global = true)]
    days: Option<u32>,

    /// Recovery preference: aggressive, moderate, or conservative
    #[arg(long, global = true)]
    preference: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Per-muscle-group fatigue, priority, and recovery
    Muscles,

    /// Today's exercise recommendation
    Recommend,

    /// Knowledge-level assessment with level guidance
    Knowledge,

    /// Vet a planned workout against the user's level
    SafetyCheck {
        /// JSON file with `{"exercises": [{"exercise_id", "sets", "reps", "weight_kg"}]}`
        #[arg(long)]
        plan: PathBuf,
    },

    /// Muscle bias, neglect, and progression patterns
    Overrides {
        /// Print the narrative report instead of the raw analysis
        #[arg(long)]
        report: bool,
    },

    /// Recommendation re-ranked by bias and neglect
    Smart,

    /// Knowledge level, patterns, and today's pick in one view
    Insights,

    /// Strength and consistency projections
    Progress {
        /// Which projection to print
        #[arg(value_enum, default_value_t = ProgressView::Report)]
        view: ProgressView,

        /// Seed for the motivational quote
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ProgressView {
    /// Per-exercise strength projections
    Strength,
    /// Training frequency projection
    Consistency,
    /// Combined report with score and narrative
    Report,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    LoggingConfig::for_cli(cli.verbose).init()?;
    info!(snapshot = %cli.snapshot.display(), user_id = %cli.user, "liftwise-cli starting");

    let config = IntelligenceConfig::load()?;
    let provider = JsonFileHistoryProvider::load(&cli.snapshot).await?;
    let service = IntelligenceService::new(Arc::new(provider), config);
    let preference = cli
        .preference
        .as_deref()
        .map(RecoveryPreference::parse_lenient);
    let context = commands::CommandContext {
        service: &service,
        user_id: cli.user,
        days: cli.days,
        preference,
    };

    match cli.command {
        Command::Muscles => commands::muscles(&context).await,
        Command::Recommend => commands::recommend(&context).await,
        Command::Knowledge => commands::knowledge(&context).await,
        Command::SafetyCheck { plan } => commands::safety_check(&context, &plan).await,
        Command::Overrides { report } => commands::overrides(&context, report).await,
        Command::Smart => commands::smart(&context).await,
        Command::Insights => commands::insights(&context).await,
        Command::Progress { view, seed } => match view {
            ProgressView::Strength => commands::strength(&context).await,
            ProgressView::Consistency => commands::consistency(&context).await,
            ProgressView::Report => commands::progress_report(&context, seed).await,
        },
    }
}
