//! Candidate slot generation over a bounded window.
//!
//! A [`SlotWindow`] enumerates evenly spaced candidate instants from its start
//! to its end (both inclusive), drops candidates outside business hours or
//! crossing midnight, and subtracts every candidate that overlaps a booked slot.
//!
//! Items are held either as raw instants or as materialized [`Slot`]s; the two
//! representations convert into each other with [`SlotWindow::as_events`] and
//! [`SlotWindow::as_instants`].

use std::borrow::Cow;

use chrono::{Duration, NaiveDateTime};
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::business_hours::BusinessHours;
use crate::config::WindowConfig;
use crate::error::{Result, SlotError};
use crate::recurrence::FixedInterval;
use crate::slot::Slot;

/// The window's items in one of its two representations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotItems {
    /// Candidate start instants.
    Instants(Vec<NaiveDateTime>),
    /// Candidates materialized as slots of the window's duration.
    Slots(Vec<Slot>),
}

impl SlotItems {
    pub fn len(&self) -> usize {
        match self {
            SlotItems::Instants(instants) => instants.len(),
            SlotItems::Slots(slots) => slots.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What to subtract from a window.
#[derive(Debug, Clone, Copy)]
pub enum RemoveTarget<'a> {
    Slot(&'a Slot),
    Slots(&'a [Slot]),
    /// Another window's items; raw instants are materialized with that window's duration.
    Window(&'a SlotWindow),
}

impl<'a> From<&'a Slot> for RemoveTarget<'a> {
    fn from(slot: &'a Slot) -> Self {
        RemoveTarget::Slot(slot)
    }
}

impl<'a> From<&'a [Slot]> for RemoveTarget<'a> {
    fn from(slots: &'a [Slot]) -> Self {
        RemoveTarget::Slots(slots)
    }
}

impl<'a> From<&'a Vec<Slot>> for RemoveTarget<'a> {
    fn from(slots: &'a Vec<Slot>) -> Self {
        RemoveTarget::Slots(slots)
    }
}

impl<'a> From<&'a SlotWindow> for RemoveTarget<'a> {
    fn from(window: &'a SlotWindow) -> Self {
        RemoveTarget::Window(window)
    }
}

/// A bounded, filtered collection of candidate slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
    /// Length the window was last sized to (`end - start` until [`extends`](Self::extends)).
    span: Duration,
    duration: Duration,
    gap: Duration,
    business_hours: Option<BusinessHours>,
    items: SlotItems,
}

impl SlotWindow {
    /// Generate the window described by `config` and subtract `booked` from it.
    ///
    /// The result is in the raw-instant representation.
    ///
    /// # Errors
    /// Returns `SlotError::DegenerateInterval` if `duration + gap` is under one
    /// minute and `SlotError::Usage` if the duration is negative.
    pub fn new(config: &WindowConfig, booked: &[Slot]) -> Result<Self> {
        let mut window = Self {
            start: config.start,
            end: config.end,
            span: config.end - config.start,
            duration: config.duration,
            gap: config.gap,
            business_hours: config.business_hours,
            items: SlotItems::Instants(Vec::new()),
        };
        window.by(None)?;
        window.remove(booked);
        Ok(window)
    }

    /// Regenerate the candidates, optionally with a new slot duration.
    ///
    /// The recurrence step is `duration + gap`, rounded down to whole minutes.
    /// Candidates are kept when they fall within business hours (if configured)
    /// and end on the same date they start. Items come back as raw instants.
    pub fn by(&mut self, duration: Option<Duration>) -> Result<&mut Self> {
        let duration = duration.unwrap_or(self.duration);
        if duration < Duration::zero() {
            return Err(SlotError::Usage(format!(
                "slot duration must not be negative, got {} minutes",
                duration.num_minutes()
            )));
        }

        let rule = FixedInterval::from_slot(self.start, duration, self.gap)?;
        let candidates = rule.between(self.end)?;
        let generated = candidates.len();

        let instants: Vec<NaiveDateTime> = candidates
            .into_iter()
            .filter(|&start| self.admits(start, duration))
            .collect();

        debug!(
            step_minutes = rule.step_minutes(),
            generated,
            kept = instants.len(),
            "generated candidate slots"
        );

        self.duration = duration;
        self.items = SlotItems::Instants(instants);
        Ok(self)
    }

    fn admits(&self, start: NaiveDateTime, duration: Duration) -> bool {
        let Some(end) = start.checked_add_signed(duration) else {
            return false;
        };
        if let Some(hours) = &self.business_hours {
            if !hours.is_within_business_hours(start, end) {
                return false;
            }
        }
        start.date() == end.date()
    }

    /// Resize the window to `start + duration`.
    ///
    /// Items are left untouched; call [`by`](Self::by) to regenerate them.
    ///
    /// # Errors
    /// Returns `SlotError::Usage` if the new end is not a representable instant.
    /// The window is unchanged in that case.
    pub fn extends(&mut self, duration: Duration) -> Result<&mut Self> {
        let end = self.start.checked_add_signed(duration).ok_or_else(|| {
            SlotError::Usage(format!(
                "window of {} minutes from {} is out of range",
                duration.num_minutes(),
                self.start
            ))
        })?;
        self.span = duration;
        self.end = end;
        Ok(self)
    }

    /// Materialize raw instants into slots of the window's duration. No-op if
    /// the items are already slots.
    pub fn as_events(&mut self) -> &mut Self {
        if let SlotItems::Instants(instants) = &self.items {
            let slots = instants
                .iter()
                .map(|&start| Slot::spanning(start, self.duration))
                .collect();
            self.items = SlotItems::Slots(slots);
        }
        self
    }

    /// Reduce slots back to their start instants. No-op if already raw.
    pub fn as_instants(&mut self) -> &mut Self {
        if let SlotItems::Slots(slots) = &self.items {
            self.items = SlotItems::Instants(slots.iter().map(Slot::start).collect());
        }
        self
    }

    /// Drop every item overlapping any slot of `target`.
    ///
    /// The current representation is preserved. An empty window is left as is.
    pub fn remove<'a>(&mut self, target: impl Into<RemoveTarget<'a>>) -> &mut Self {
        if self.items.is_empty() {
            return self;
        }

        let booked: Cow<'a, [Slot]> = match target.into() {
            RemoveTarget::Slot(slot) => Cow::Borrowed(std::slice::from_ref(slot)),
            RemoveTarget::Slots(slots) => Cow::Borrowed(slots),
            RemoveTarget::Window(window) => match &window.items {
                SlotItems::Slots(slots) => Cow::Borrowed(slots.as_slice()),
                SlotItems::Instants(_) => Cow::Owned(window.to_slots()),
            },
        };

        let was_raw = matches!(self.items, SlotItems::Instants(_));
        self.as_events();

        if let SlotItems::Slots(slots) = &mut self.items {
            let before = slots.len();
            slots.retain(|slot| !booked.iter().any(|event| slot.overlaps(event)));
            debug!(
                booked = booked.len(),
                removed = before - slots.len(),
                remaining = slots.len(),
                "subtracted booked slots"
            );
        }

        if was_raw {
            self.as_instants();
        }
        self
    }

    pub fn remove_event(&mut self, event: &Slot) -> &mut Self {
        self.remove(event)
    }

    pub fn remove_events(&mut self, events: &[Slot]) -> &mut Self {
        self.remove(events)
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn span(&self) -> Duration {
        self.span
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn gap(&self) -> Duration {
        self.gap
    }

    pub fn business_hours(&self) -> Option<&BusinessHours> {
        self.business_hours.as_ref()
    }

    pub fn items(&self) -> &SlotItems {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The items as slots, whatever the current representation.
    pub fn to_slots(&self) -> Vec<Slot> {
        match &self.items {
            SlotItems::Slots(slots) => slots.clone(),
            SlotItems::Instants(instants) => instants
                .iter()
                .map(|&start| Slot::spanning(start, self.duration))
                .collect(),
        }
    }

    /// The items' start instants, whatever the current representation.
    pub fn to_instants(&self) -> Vec<NaiveDateTime> {
        match &self.items {
            SlotItems::Instants(instants) => instants.clone(),
            SlotItems::Slots(slots) => slots.iter().map(Slot::start).collect(),
        }
    }
}

impl Serialize for SlotWindow {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.to_slots())
    }
}
