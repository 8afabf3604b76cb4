//! A calendar of booked events and the free slots left around them.
//!
//! Every mutation rebuilds the free-slot window from scratch out of the stored
//! window configuration and the full event list. The new event list (or
//! configuration) and the rebuilt window are committed together: when the
//! rebuild fails the calendar is left exactly as it was.

use chrono::{Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::business_hours::BusinessHours;
use crate::config::{end_of_day, WindowConfig};
use crate::error::{Result, SlotError};
use crate::slot::{default_slot_duration, Slot};
use crate::window::SlotWindow;

/// Serializable view of a calendar: its booked events and free slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarSnapshot {
    pub events: Vec<Slot>,
    pub slots: Vec<Slot>,
}

#[derive(Debug, Clone)]
pub struct Calendar {
    config: WindowConfig,
    events: Vec<Slot>,
    slots: SlotWindow,
}

impl Calendar {
    /// A calendar over the current UTC day with 30 minute slots.
    pub fn new(business_hours: Option<BusinessHours>) -> Result<Self> {
        Self::with_window(business_hours, WindowConfig::today())
    }

    /// A calendar over an explicit window. `business_hours` replaces whatever
    /// the configuration carried.
    pub fn with_window(business_hours: Option<BusinessHours>, config: WindowConfig) -> Result<Self> {
        let config = config.with_business_hours(business_hours);
        let slots = SlotWindow::new(&config, &[])?;
        Ok(Self {
            config,
            events: Vec::new(),
            slots,
        })
    }

    pub fn add_event(&mut self, event: Slot) -> Result<&mut Self> {
        let mut events = self.events.clone();
        events.push(event);
        self.commit(self.config.clone(), events)?;
        Ok(self)
    }

    /// Book a new event from its start and either an end or a duration.
    pub fn add_event_at(
        &mut self,
        start: NaiveDateTime,
        end: Option<NaiveDateTime>,
        duration: Option<Duration>,
    ) -> Result<&mut Self> {
        self.add_event(Slot::from_parts(start, end, duration, None)?)
    }

    /// Remove the first event equal to `event`.
    ///
    /// # Errors
    /// Returns `SlotError::NotFound` if no such event is booked.
    pub fn remove_event(&mut self, event: &Slot) -> Result<&mut Self> {
        let mut events = self.events.clone();
        take_event(&mut events, event)?;
        self.commit(self.config.clone(), events)?;
        Ok(self)
    }

    pub fn import_events(&mut self, events: impl IntoIterator<Item = Slot>) -> Result<&mut Self> {
        let mut merged = self.events.clone();
        merged.extend(events);
        self.commit(self.config.clone(), merged)?;
        Ok(self)
    }

    /// Remove each of `events` once. Nothing is removed if any is missing.
    pub fn purge_events(&mut self, events: &[Slot]) -> Result<&mut Self> {
        let mut remaining = self.events.clone();
        for event in events {
            take_event(&mut remaining, event)?;
        }
        self.commit(self.config.clone(), remaining)?;
        Ok(self)
    }

    /// Reconfigure the slot window.
    ///
    /// `start` defaults to now (UTC), `end` to the last microsecond of
    /// `start`'s date, `duration` to 30 minutes and `gap` to zero.
    pub fn generate_slots(
        &mut self,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
        duration: Option<Duration>,
        gap: Option<Duration>,
    ) -> Result<&mut Self> {
        let start = start.unwrap_or_else(|| Utc::now().naive_utc());
        let end = end.unwrap_or_else(|| end_of_day(start));
        let config = WindowConfig::new(start, end)
            .with_duration(duration.unwrap_or_else(default_slot_duration))
            .with_gap(gap.unwrap_or_else(Duration::zero))
            .with_business_hours(self.config.business_hours);
        self.commit(config, self.events.clone())?;
        Ok(self)
    }

    /// The free slots left by the current events, as raw instants.
    pub fn slots(&self) -> &SlotWindow {
        &self.slots
    }

    pub fn events(&self) -> &[Slot] {
        &self.events
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    pub fn business_hours(&self) -> Option<&BusinessHours> {
        self.config.business_hours.as_ref()
    }

    pub fn snapshot(&self) -> CalendarSnapshot {
        CalendarSnapshot {
            events: self.events.clone(),
            slots: self.slots.to_slots(),
        }
    }

    fn commit(&mut self, config: WindowConfig, events: Vec<Slot>) -> Result<()> {
        match SlotWindow::new(&config, &events) {
            Ok(slots) => {
                debug!(
                    events = events.len(),
                    free = slots.len(),
                    "regenerated free slots"
                );
                self.config = config;
                self.events = events;
                self.slots = slots;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "slot regeneration failed, keeping previous window");
                Err(e)
            }
        }
    }
}

fn take_event(events: &mut Vec<Slot>, event: &Slot) -> Result<Slot> {
    let index = events
        .iter()
        .position(|booked| booked == event)
        .ok_or_else(|| SlotError::NotFound(format!("event {}", event)))?;
    Ok(events.remove(index))
}
