// ABOUTME: Application-wide constants organized by domain
// ABOUTME: Service names and calendar arithmetic shared by every crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

/// Service identifiers used in structured logs
pub mod service_names {
    /// Main service name
    pub const LIFTWISE: &str = "liftwise";
    /// Command-line tool name
    pub const LIFTWISE_CLI: &str = "liftwise-cli";
}

/// Calendar arithmetic
pub mod time {
    /// Hours in a day
    pub const HOURS_PER_DAY: f64 = 24.0;
    /// Days in a week
    pub const DAYS_PER_WEEK: f64 = 7.0;
    /// Seconds in an hour
    pub const SECONDS_PER_HOUR: f64 = 3600.0;
}
