use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FreshnessState {
    Fresh,
    Stale,
    Offline,
}

const STALE_AFTER_MINUTES: i64 = 10;
const OFFLINE_AFTER_MINUTES: i64 = 30;
const OFFLINE_AFTER_FAILURES: u32 = 3;

/// How trustworthy the displayed snapshot is at `now`.
#[must_use]
pub fn evaluate_freshness(
    now: DateTime<Utc>,
    last_success: Option<DateTime<Utc>>,
    consecutive_failures: u32,
) -> FreshnessState {
    let Some(last_success) = last_success else {
        return if consecutive_failures >= OFFLINE_AFTER_FAILURES {
            FreshnessState::Offline
        } else {
            FreshnessState::Stale
        };
    };

    let age = now - last_success;
    if age > Duration::minutes(OFFLINE_AFTER_MINUTES)
        || consecutive_failures >= OFFLINE_AFTER_FAILURES
    {
        FreshnessState::Offline
    } else if age > Duration::minutes(STALE_AFTER_MINUTES) || consecutive_failures >= 1 {
        FreshnessState::Stale
    } else {
        FreshnessState::Fresh
    }
}
