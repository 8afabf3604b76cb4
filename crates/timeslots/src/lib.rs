//! # timeslots
//!
//! Free time slot generation for scheduling.
//!
//! Candidate slots are enumerated at a fixed interval over a bounded window
//! (via the `rrule` crate), filtered against per-weekday business hours and
//! same-day completion, and then every candidate overlapping an already booked
//! event is subtracted. What remains is the set of free slots.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::{Duration, NaiveDate};
//! use timeslots::{BusinessHours, Calendar, WindowConfig};
//!
//! let monday = NaiveDate::from_ymd_opt(2023, 3, 13).unwrap();
//! let config = WindowConfig::new(
//!     monday.and_hms_opt(8, 0, 0).unwrap(),
//!     monday.and_hms_opt(18, 0, 0).unwrap(),
//! )
//! .with_duration(Duration::hours(1));
//!
//! let mut calendar = Calendar::with_window(Some(BusinessHours::default()), config).unwrap();
//! calendar
//!     .add_event_at(monday.and_hms_opt(9, 0, 0).unwrap(), None, Some(Duration::hours(1)))
//!     .unwrap();
//!
//! // 08:00 through 17:00 minus the booked 09:00 slot.
//! assert_eq!(calendar.slots().len(), 9);
//! ```
//!
//! ## Modules
//!
//! - [`business_hours`] -- per-weekday opening windows
//! - [`slot`] -- half-open `[start, end)` spans and their overlap test
//! - [`recurrence`] -- fixed-interval instant enumeration
//! - [`window`] -- candidate generation, filtering and overlap subtraction
//! - [`calendar`] -- booked events plus an always-current free-slot window
//! - [`config`] -- serializable window configuration
//! - [`error`] -- Error types

pub mod business_hours;
pub mod calendar;
pub mod config;
pub mod error;
pub mod recurrence;
pub mod slot;
pub mod window;

pub use business_hours::{BusinessHours, DayHours};
pub use calendar::{Calendar, CalendarSnapshot};
pub use config::WindowConfig;
pub use error::SlotError;
pub use recurrence::FixedInterval;
pub use slot::{EventInfo, Slot};
pub use window::{RemoveTarget, SlotItems, SlotWindow};
