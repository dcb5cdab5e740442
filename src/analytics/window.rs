use crate::analytics::error::{AnalyticsError, AnalyticsResult};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A `[start, end]` reporting window. Both bounds are inclusive when
/// bucketing tickets by `created_at`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ReportWindow {
    /// Default reporting window length
    pub const DEFAULT_DAYS: i64 = 7;

    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> AnalyticsResult<Self> {
        if start >= end {
            return Err(AnalyticsError::InvalidDateRange(
                "start must be before end".to_string(),
            ));
        }
        Ok(Self { start, end })
    }

    /// Window covering the last `days` days, ending now
    pub fn last_days(days: i64) -> Self {
        let end = Utc::now();
        Self {
            start: end - Duration::days(days.max(1)),
            end,
        }
    }

    /// The immediately preceding window of equal length
    pub fn previous(&self) -> Self {
        let length = self.end - self.start;
        Self {
            start: self.start - length,
            end: self.start,
        }
    }

    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        timestamp >= self.start && timestamp <= self.end
    }

    pub fn length(&self) -> Duration {
        self.end - self.start
    }
}

impl Default for ReportWindow {
    fn default() -> Self {
        Self::last_days(Self::DEFAULT_DAYS)
    }
}
