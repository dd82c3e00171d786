// ABOUTME: Start-of-window computation shared by every engine that looks back over history
// ABOUTME: Saturates at the earliest representable instant instead of overflowing on huge windows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors

use chrono::{DateTime, Duration, Utc};

/// Instant `days` days before `now`
///
/// Windows reaching past the earliest instant chrono can represent clamp to
/// [`DateTime::<Utc>::MIN_UTC`], so such a window simply covers all history.
#[must_use]
pub fn window_start(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    now.checked_sub_signed(Duration::days(i64::from(days)))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

