//! Fixed-interval recurrence -- enumerates evenly spaced instants between two bounds.
//!
//! Wraps the `rrule` crate (v0.13) with a `FREQ=MINUTELY` rule anchored at the
//! window start. Instants are wall-clock values; the rule is expanded in UTC so
//! no DST shifting ever applies.

use crate::error::{Result, SlotError};
use chrono::{Duration, NaiveDateTime, Timelike, Utc};
use rrule::RRuleSet;

/// Upper bound on instants requested from `rrule` per expansion call.
const CHUNK_LIMIT: u16 = u16::MAX;

/// Largest step `rrule` accepts as an INTERVAL; longer steps are walked directly.
const MAX_RULE_INTERVAL: i64 = u16::MAX as i64;

/// A minutely recurrence: `anchor + k * step` for every `k >= 0`.
///
/// The sequence is restartable from any of its grid points, which is how
/// windows larger than a single `rrule` expansion are covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedInterval {
    anchor: NaiveDateTime,
    step_minutes: i64,
}

impl FixedInterval {
    /// Create a recurrence with the given step in whole minutes.
    ///
    /// # Errors
    /// Returns `SlotError::DegenerateInterval` if `step_minutes <= 0`.
    pub fn new(anchor: NaiveDateTime, step_minutes: i64) -> Result<Self> {
        if step_minutes <= 0 {
            return Err(SlotError::DegenerateInterval {
                minutes: step_minutes,
            });
        }
        Ok(Self {
            anchor,
            step_minutes,
        })
    }

    /// Build the recurrence from a slot duration and the gap that follows it.
    ///
    /// The step is `duration + gap` rounded down to whole minutes.
    pub fn from_slot(anchor: NaiveDateTime, duration: Duration, gap: Duration) -> Result<Self> {
        let step = duration.checked_add(&gap).ok_or_else(|| {
            SlotError::Usage(format!(
                "slot of {} minutes plus a gap of {} minutes is out of range",
                duration.num_minutes(),
                gap.num_minutes()
            ))
        })?;
        Self::new(anchor, step.num_minutes())
    }

    pub fn anchor(&self) -> NaiveDateTime {
        self.anchor
    }

    pub fn step_minutes(&self) -> i64 {
        self.step_minutes
    }

    /// The step as a duration, capped at `Duration::MAX`.
    pub fn step(&self) -> Duration {
        Duration::try_minutes(self.step_minutes).unwrap_or(Duration::MAX)
    }

    /// Every instant of the sequence up to and including `until`.
    pub fn between(&self, until: NaiveDateTime) -> Result<Vec<NaiveDateTime>> {
        self.slice_between(self.anchor, until)
    }

    /// Every instant of the sequence in `[after, before]`, both bounds inclusive.
    pub fn slice_between(
        &self,
        after: NaiveDateTime,
        before: NaiveDateTime,
    ) -> Result<Vec<NaiveDateTime>> {
        let Some(mut cursor) = self.first_at_or_after(after) else {
            return Ok(Vec::new());
        };
        let mut instants = Vec::new();

        if self.step_minutes > MAX_RULE_INTERVAL {
            let step = self.step();
            while cursor <= before {
                instants.push(cursor);
                match cursor.checked_add_signed(step) {
                    Some(next) => cursor = next,
                    None => break,
                }
            }
            return Ok(instants);
        }

        while cursor <= before {
            let chunk = expand_chunk(cursor, self.step_minutes, before)?;
            let limited = chunk.len() >= usize::from(CHUNK_LIMIT);
            let Some(&last) = chunk.last() else {
                break;
            };
            instants.extend(chunk);
            if !limited {
                break;
            }
            match last.checked_add_signed(self.step()) {
                Some(next) => cursor = next,
                None => break,
            }
        }

        Ok(instants)
    }

    /// The first grid point that is not earlier than `instant`, if it is representable.
    fn first_at_or_after(&self, instant: NaiveDateTime) -> Option<NaiveDateTime> {
        if instant <= self.anchor {
            return Some(self.anchor);
        }
        let step_ns = i128::from(self.step_minutes) * 60_000_000_000;
        let offset = instant - self.anchor;
        let offset_ns = i128::from(offset.num_seconds()) * 1_000_000_000
            + i128::from(offset.subsec_nanos());
        let steps = offset_ns / step_ns + i128::from(offset_ns % step_ns != 0);
        let offset = i64::try_from(i128::from(self.step_minutes) * steps)
            .ok()
            .and_then(Duration::try_minutes)?;
        self.anchor.checked_add_signed(offset)
    }
}

/// Expand one `rrule` chunk starting at `anchor` (inclusive) up to `until` (inclusive).
///
/// `rrule` works at whole-second precision, so the anchor's sub-second part is
/// stripped before expansion and added back to every instant.
fn expand_chunk(
    anchor: NaiveDateTime,
    step_minutes: i64,
    until: NaiveDateTime,
) -> Result<Vec<NaiveDateTime>> {
    let remainder = Duration::nanoseconds(i64::from(anchor.nanosecond()));
    let dtstart = anchor - remainder;
    // Instants sit on the whole-second grid, so flooring UNTIL keeps it inclusive.
    let shifted_until = until - remainder;
    let until_floor = shifted_until.with_nanosecond(0).unwrap_or(shifted_until);

    if until_floor < dtstart {
        return Ok(Vec::new());
    }

    let rrule_text = format!(
        "DTSTART;TZID=UTC:{}\nRRULE:FREQ=MINUTELY;INTERVAL={};UNTIL={}Z",
        dtstart.format("%Y%m%dT%H%M%S"),
        step_minutes,
        until_floor.format("%Y%m%dT%H%M%S"),
    );

    let rrule_set: RRuleSet = rrule_text
        .parse()
        .map_err(|e| SlotError::Recurrence(format!("{}", e)))?;

    let instances = rrule_set.all(CHUNK_LIMIT);

    Ok(instances
        .dates
        .into_iter()
        .map(|dt| dt.with_timezone(&Utc).naive_utc() + remainder)
        .collect())
}
