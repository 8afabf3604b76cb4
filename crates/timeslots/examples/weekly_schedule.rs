//! Book a handful of events across three weeks of office hours and print the
//! free slots that remain.
//!
//! ```sh
//! RUST_LOG=timeslots=debug cargo run -p timeslots --example weekly_schedule
//! ```

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDateTime, Weekday};
use timeslots::{BusinessHours, Calendar, Slot, SlotWindow, WindowConfig};
use tracing_subscriber::EnvFilter;

const FORMAT: &str = "%d/%m/%Y %H:%M";

fn parse(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, FORMAT).with_context(|| format!("bad date {:?}", value))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let events = vec![
        Slot::new(parse("13/03/2023 15:00")?, parse("14/03/2023 09:00")?)?,
        Slot::starting_at(parse("14/03/2023 12:00")?),
        Slot::new(parse("15/03/2023 16:00")?, parse("15/03/2023 17:00")?)?,
        Slot::with_duration(parse("16/03/2023 08:00")?, Duration::minutes(30))?,
        Slot::starting_at(parse("20/03/2023 08:00")?).extend(Duration::minutes(30)),
        Slot::with_duration(parse("24/03/2023 14:00")?, Duration::minutes(105))?,
    ];
    for event in &events {
        println!("Events ---> {}", event);
    }

    let config = WindowConfig::new(parse("13/03/2023 12:00")?, parse("31/03/2023 18:00")?)
        .with_duration(Duration::hours(1))
        .with_business_hours(Some(BusinessHours::default()));
    let mut all_slots = SlotWindow::new(&config, &[])?;
    all_slots.as_events();
    let generated = all_slots.len();

    all_slots.remove(&events);
    for slot in all_slots.to_slots() {
        println!("Free Slots ---> {}", slot);
    }
    println!(
        "Events: {}, Slots Generated: {}, Free Slots: {}",
        events.len(),
        generated,
        all_slots.len()
    );

    let business_hours = BusinessHours::default()
        .with_day(Weekday::Mon, None)
        .with_day(Weekday::Thu, None);
    let mut calendar = Calendar::new(Some(business_hours))?;
    calendar
        .add_event_at(parse("15/03/2023 12:00")?, None, None)?
        .generate_slots(
            Some(parse("14/03/2023 12:00")?),
            Some(parse("30/04/2023 18:00")?),
            Some(Duration::minutes(40)),
            Some(Duration::minutes(88)),
        )?
        .add_event_at(parse("14/03/2023 15:00")?, None, None)?;

    for slot in calendar.slots().to_slots() {
        println!("Free Slots ---> {}", slot);
    }
    println!("{}", serde_json::to_string_pretty(&calendar.snapshot())?);

    Ok(())
}
