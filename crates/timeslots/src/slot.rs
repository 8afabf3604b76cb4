//! A single half-open time span `[start, end)` with optional metadata.
//!
//! Two slots overlap when `a.start < b.end && a.end > b.start`.
//! Touching slots (one ends exactly when the other starts) do NOT overlap.

use std::fmt;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// Slot length used when neither an end nor a duration is given.
pub const DEFAULT_SLOT_MINUTES: i64 = 30;

pub fn default_slot_duration() -> Duration {
    Duration::minutes(DEFAULT_SLOT_MINUTES)
}

/// Descriptive metadata carried by a slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventInfo {
    pub name: String,
    pub description: String,
}

impl EventInfo {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

impl fmt::Display for EventInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.description)
    }
}

/// A time span `[start, end)`. Invariant: `end >= start`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSlot")]
pub struct Slot {
    start: NaiveDateTime,
    end: NaiveDateTime,
    info: Option<EventInfo>,
}

#[derive(Deserialize)]
struct RawSlot {
    start: NaiveDateTime,
    end: NaiveDateTime,
    #[serde(default)]
    info: Option<EventInfo>,
}

impl TryFrom<RawSlot> for Slot {
    type Error = SlotError;

    fn try_from(raw: RawSlot) -> Result<Self> {
        Ok(Slot::new(raw.start, raw.end)?.with_info_opt(raw.info))
    }
}

/// `start + duration`, or `Usage` when the result falls outside chrono's range.
fn end_after(start: NaiveDateTime, duration: Duration) -> Result<NaiveDateTime> {
    start.checked_add_signed(duration).ok_or_else(|| {
        SlotError::Usage(format!(
            "{} minutes after {} is out of range",
            duration.num_minutes(),
            start
        ))
    })
}

/// `at + duration`, pinned to the last representable instant on overflow.
fn saturating_add(at: NaiveDateTime, duration: Duration) -> NaiveDateTime {
    match at.checked_add_signed(duration) {
        Some(end) => end,
        None if duration < Duration::zero() => NaiveDateTime::MIN,
        None => NaiveDateTime::MAX,
    }
}

impl Slot {
    /// # Errors
    /// Returns `SlotError::Usage` if `end` is before `start`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if end < start {
            return Err(SlotError::Usage(format!(
                "slot ends at {} before it starts at {}",
                end, start
            )));
        }
        Ok(Self {
            start,
            end,
            info: None,
        })
    }

    /// A slot of the default 30 minutes.
    pub fn starting_at(start: NaiveDateTime) -> Self {
        Self {
            start,
            end: saturating_add(start, default_slot_duration()),
            info: None,
        }
    }

    /// # Errors
    /// Returns `SlotError::Usage` if `duration` is negative or `start + duration`
    /// is not a representable instant.
    pub fn with_duration(start: NaiveDateTime, duration: Duration) -> Result<Self> {
        Self::new(start, end_after(start, duration)?)
    }

    /// Infallible constructor for callers that already validated `duration >= 0`.
    pub(crate) fn spanning(start: NaiveDateTime, duration: Duration) -> Self {
        Self {
            start,
            end: saturating_add(start, duration).max(start),
            info: None,
        }
    }

    /// Build a slot from a start and either an explicit end or a duration.
    ///
    /// An explicit `end` wins; otherwise `end = start + duration`, with the
    /// duration defaulting to 30 minutes.
    pub fn from_parts(
        start: NaiveDateTime,
        end: Option<NaiveDateTime>,
        duration: Option<Duration>,
        info: Option<EventInfo>,
    ) -> Result<Self> {
        let end = match end {
            Some(end) => end,
            None => end_after(start, duration.unwrap_or_else(default_slot_duration))?,
        };
        Ok(Self::new(start, end)?.with_info_opt(info))
    }

    pub fn with_info(self, info: EventInfo) -> Self {
        self.with_info_opt(Some(info))
    }

    fn with_info_opt(mut self, info: Option<EventInfo>) -> Self {
        self.info = info;
        self
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn info(&self) -> Option<&EventInfo> {
        self.info.as_ref()
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Push `end` later by `duration`.
    ///
    /// A negative duration shrinks the slot but never moves `end` before `start`.
    pub fn extend(mut self, duration: Duration) -> Self {
        self.end = saturating_add(self.end, duration).max(self.start);
        self
    }

    /// Half-open intersection test.
    pub fn overlaps(&self, other: &Slot) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Minutes shared by both slots; 0 when they do not overlap.
    pub fn overlap_minutes(&self, other: &Slot) -> i64 {
        if !self.overlaps(other) {
            return 0;
        }
        let overlap_start = self.start.max(other.start);
        let overlap_end = self.end.min(other.end);
        (overlap_end - overlap_start).num_minutes()
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} from {} to ",
            self.start.format("%d/%m/%Y"),
            self.start.format("%H:%M")
        )?;
        if self.start.date() == self.end.date() {
            write!(f, "{}", self.end.format("%H:%M"))
        } else {
            write!(
                f,
                "{} at {}",
                self.end.format("%d/%m/%Y"),
                self.end.format("%H:%M")
            )
        }
    }
}
