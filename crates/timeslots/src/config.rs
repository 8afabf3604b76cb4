//! Window configuration -- the bounds, slot length, gap and business hours a
//! [`SlotWindow`](crate::window::SlotWindow) is generated from.
//!
//! Durations are (de)serialized as whole minutes:
//!
//! ```json
//! {
//!   "start": "2023-03-13T12:00:00",
//!   "end": "2023-03-17T18:00:00",
//!   "duration_minutes": 60,
//!   "gap_minutes": 0,
//!   "business_hours": { "saturday": ["10:00", "14:00"] }
//! }
//! ```

use chrono::{Duration, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::business_hours::BusinessHours;
use crate::error::Result;
use crate::slot::default_slot_duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// First candidate instant; the recurrence is anchored here.
    pub start: NaiveDateTime,
    /// Last instant a candidate may start at (inclusive).
    pub end: NaiveDateTime,
    #[serde(
        rename = "duration_minutes",
        with = "minutes",
        default = "default_slot_duration"
    )]
    pub duration: Duration,
    #[serde(rename = "gap_minutes", with = "minutes", default = "Duration::zero")]
    pub gap: Duration,
    #[serde(default)]
    pub business_hours: Option<BusinessHours>,
}

impl WindowConfig {
    /// A window with 30 minute slots, no gap and no business-hours filter.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start,
            end,
            duration: default_slot_duration(),
            gap: Duration::zero(),
            business_hours: None,
        }
    }

    /// A window from `start` to the last microsecond of the same date.
    pub fn for_day(start: NaiveDateTime) -> Self {
        Self::new(start, end_of_day(start))
    }

    /// 00:00:00 to 23:59:59 of the current UTC date.
    pub fn today() -> Self {
        let midnight = Utc::now().date_naive().and_time(NaiveTime::MIN);
        Self::new(midnight, midnight + Duration::days(1) - Duration::seconds(1))
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_gap(mut self, gap: Duration) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_business_hours(mut self, business_hours: Option<BusinessHours>) -> Self {
        self.business_hours = business_hours;
        self
    }

    /// Parse a configuration from JSON.
    ///
    /// # Errors
    /// Returns `SlotError::Config` if the document is malformed or a business
    /// hours entry is invalid.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// 23:59:59.999999 on `instant`'s date.
pub fn end_of_day(instant: NaiveDateTime) -> NaiveDateTime {
    instant
        .date()
        .and_hms_micro_opt(23, 59, 59, 999_999)
        .unwrap_or(NaiveDateTime::MAX)
}

mod minutes {
    use chrono::Duration;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(duration.num_minutes())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let minutes = i64::deserialize(deserializer)?;
        Duration::try_minutes(minutes)
            .ok_or_else(|| D::Error::custom(format!("{} minutes is out of range", minutes)))
    }
}
