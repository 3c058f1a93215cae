//! Reference time for a single analysis invocation
//!
//! The host supplies "now" together with the user's local UTC offset. All
//! calendar math (streaks, weekdays, time-of-day, current month) goes through
//! one `ReferenceTime` so a single invocation never observes two different nows.

use crate::error::AnalysisError;
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceTime {
    now: DateTime<FixedOffset>,
}

impl ReferenceTime {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self { now }
    }

    /// Parse an RFC 3339 timestamp; its offset becomes the local calendar
    pub fn parse(rfc3339: &str) -> Result<Self, AnalysisError> {
        DateTime::parse_from_rfc3339(rfc3339)
            .map(Self::new)
            .map_err(|e| AnalysisError::InvalidTimestamp(format!("{rfc3339}: {e}")))
    }

    /// Current instant in UTC
    pub fn utc_now() -> Self {
        Self::new(Utc::now().fixed_offset())
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        self.now
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    pub fn local(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        instant.with_timezone(self.now.offset())
    }

    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.local(instant).date_naive()
    }

    pub fn local_hour(&self, instant: DateTime<Utc>) -> u32 {
        self.local(instant).hour()
    }

    /// Weekday bucket, 1 = Sunday ... 7 = Saturday
    pub fn local_weekday(&self, instant: DateTime<Utc>) -> u8 {
        // number_from_sunday is always 1..=7
        self.local(instant).weekday().number_from_sunday() as u8
    }

    /// Whether the instant falls in the same local calendar month as now
    pub fn in_current_month(&self, instant: DateTime<Utc>) -> bool {
        let local = self.local_date(instant);
        let today = self.today();
        local.year() == today.year() && local.month() == today.month()
    }
}
