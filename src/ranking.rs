//! Read-side policies over a user's log history.
//!
//! Storage groups the history per referenced item (`MAX(log_date)`, `COUNT(*)`); the policies
//! here decide which groups survive and in what order, so the "recent" and "favorite" listings
//! of every feature share one definition.

use serde::Serialize;
use time::{Date, Duration};

/// Per-item aggregate of a user's log history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemStats<T> {
    #[serde(flatten)]
    pub item: T,
    pub last_logged: Date,
    pub times_logged: i64,
}

/// Most-recently-logged first, optionally bounded by a lookback window and/or a count cap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecencyPolicy {
    pub lookback_days: Option<i64>,
    pub limit: Option<usize>,
}

impl RecencyPolicy {
    pub fn window(days: i64) -> Self {
        Self {
            lookback_days: Some(days),
            limit: None,
        }
    }

    pub fn capped(limit: usize) -> Self {
        Self {
            lookback_days: None,
            limit: Some(limit),
        }
    }

    /// First day still inside the lookback window.
    pub fn since(&self, today: Date) -> Option<Date> {
        self.lookback_days
            .map(|days| today.saturating_sub(Duration::days(days)))
    }

    pub fn apply<T>(&self, today: Date, mut stats: Vec<ItemStats<T>>) -> Vec<ItemStats<T>> {
        if let Some(since) = self.since(today) {
            stats.retain(|s| s.last_logged >= since);
        }
        stats.sort_by(|a, b| b.last_logged.cmp(&a.last_logged));
        if let Some(limit) = self.limit {
            stats.truncate(limit);
        }
        stats
    }
}

/// Items logged strictly more than `min_count` times, most frequent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyPolicy {
    pub min_count: i64,
}

impl FrequencyPolicy {
    pub fn apply<T>(&self, mut stats: Vec<ItemStats<T>>) -> Vec<ItemStats<T>> {
        stats.retain(|s| s.times_logged > self.min_count);
        stats.sort_by(|a, b| b.times_logged.cmp(&a.times_logged));
        stats
    }
}
