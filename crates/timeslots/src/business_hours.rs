//! Per-weekday business hours.
//!
//! Each weekday either has an `[open, close]` time-of-day window or is closed.
//! Comparisons are on wall-clock time-of-day only; the date is ignored.

use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

const TIME_FORMAT: &str = "%H:%M";

/// Opening window for a single weekday. Invariant: `open <= close`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(String, String)", into = "(String, String)")]
pub struct DayHours {
    open: NaiveTime,
    close: NaiveTime,
}

impl DayHours {
    /// # Errors
    /// Returns `SlotError::Usage` if `open` is after `close`.
    pub fn new(open: NaiveTime, close: NaiveTime) -> Result<Self> {
        if open > close {
            return Err(SlotError::Usage(format!(
                "business hours open at {} after closing at {}",
                open, close
            )));
        }
        Ok(Self { open, close })
    }

    /// Parse an `("HH:MM", "HH:MM")` pair.
    pub fn parse(open: &str, close: &str) -> Result<Self> {
        Self::new(parse_time(open)?, parse_time(close)?)
    }

    pub fn open(&self) -> NaiveTime {
        self.open
    }

    pub fn close(&self) -> NaiveTime {
        self.close
    }

    /// 08:00-18:00, the default for every weekday from Monday to Friday.
    pub fn office() -> Self {
        Self {
            open: NaiveTime::MIN + Duration::hours(8),
            close: NaiveTime::MIN + Duration::hours(18),
        }
    }
}

impl TryFrom<(String, String)> for DayHours {
    type Error = SlotError;

    fn try_from((open, close): (String, String)) -> Result<Self> {
        Self::parse(&open, &close)
    }
}

impl From<DayHours> for (String, String) {
    fn from(hours: DayHours) -> Self {
        (
            hours.open.format(TIME_FORMAT).to_string(),
            hours.close.format(TIME_FORMAT).to_string(),
        )
    }
}

fn parse_time(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .map_err(|e| SlotError::Usage(format!("invalid time of day {:?}: {}", value, e)))
}

/// A seven-entry table of opening windows, indexed Monday through Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "WeekHours", into = "WeekHours")]
pub struct BusinessHours {
    days: [Option<DayHours>; 7],
}

impl Default for BusinessHours {
    /// Monday to Friday 08:00-18:00, weekends closed.
    fn default() -> Self {
        let office = Some(DayHours::office());
        Self {
            days: [office, office, office, office, office, None, None],
        }
    }
}

impl BusinessHours {
    /// A table with every day closed.
    pub fn closed() -> Self {
        Self { days: [None; 7] }
    }

    /// Replace the window for `weekday`; `None` closes the day.
    pub fn with_day(mut self, weekday: Weekday, hours: Option<DayHours>) -> Self {
        self.days[weekday.num_days_from_monday() as usize] = hours;
        self
    }

    pub fn day(&self, weekday: Weekday) -> Option<DayHours> {
        self.days[weekday.num_days_from_monday() as usize]
    }

    /// Check whether the span `[after, before]` lies within business hours.
    ///
    /// Only `after`'s weekday is consulted, so a span ending on a later date is
    /// judged against the start day's window.
    pub fn is_within_business_hours(&self, after: NaiveDateTime, before: NaiveDateTime) -> bool {
        match self.day(after.weekday()) {
            Some(hours) => hours.open <= after.time() && before.time() <= hours.close,
            None => false,
        }
    }
}

/// Wire shape of [`BusinessHours`]: one optional `["HH:MM", "HH:MM"]` per weekday.
/// A missing key keeps that day's default; an explicit `null` closes it.
#[derive(Serialize, Deserialize)]
struct WeekHours {
    #[serde(default = "office_day")]
    monday: Option<DayHours>,
    #[serde(default = "office_day")]
    tuesday: Option<DayHours>,
    #[serde(default = "office_day")]
    wednesday: Option<DayHours>,
    #[serde(default = "office_day")]
    thursday: Option<DayHours>,
    #[serde(default = "office_day")]
    friday: Option<DayHours>,
    #[serde(default)]
    saturday: Option<DayHours>,
    #[serde(default)]
    sunday: Option<DayHours>,
}

fn office_day() -> Option<DayHours> {
    Some(DayHours::office())
}

impl From<WeekHours> for BusinessHours {
    fn from(week: WeekHours) -> Self {
        Self {
            days: [
                week.monday,
                week.tuesday,
                week.wednesday,
                week.thursday,
                week.friday,
                week.saturday,
                week.sunday,
            ],
        }
    }
}

impl From<BusinessHours> for WeekHours {
    fn from(hours: BusinessHours) -> Self {
        let [monday, tuesday, wednesday, thursday, friday, saturday, sunday] = hours.days;
        Self {
            monday,
            tuesday,
            wednesday,
            thursday,
            friday,
            saturday,
            sunday,
        }
    }
}
