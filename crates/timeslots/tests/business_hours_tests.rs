//! Tests for the per-weekday business hours table.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use timeslots::{BusinessHours, DayHours, SlotError};

/// 2023-03-13 is a Monday; day 18 is the following Saturday.
fn at(day: u32, hour: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 3, day)
        .unwrap()
        .and_hms_opt(hour, min, 0)
        .unwrap()
}

fn time(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).unwrap()
}

#[test]
fn default_weekday_bounds_are_inclusive() {
    let hours = BusinessHours::default();

    assert!(hours.is_within_business_hours(at(13, 8, 0), at(13, 18, 0)));
    assert!(!hours.is_within_business_hours(at(13, 7, 59), at(13, 9, 0)));
    assert!(!hours.is_within_business_hours(at(13, 17, 30), at(13, 18, 1)));
}

#[test]
fn saturday_closed_by_default() {
    let hours = BusinessHours::default();

    assert!(!hours.is_within_business_hours(at(18, 10, 0), at(18, 11, 0)));
    assert_eq!(hours.day(Weekday::Sat), None);
    assert_eq!(hours.day(Weekday::Sun), None);
}

#[test]
fn only_the_start_weekday_is_consulted() {
    let hours = BusinessHours::default();

    // Mon 17:50 -> Tue 08:10: judged against Monday's 08:00-18:00 by time of day only.
    assert!(hours.is_within_business_hours(at(13, 17, 50), at(14, 8, 10)));

    // Fri 17:00 -> Sat 09:00 is still judged against Friday's window.
    assert!(hours.is_within_business_hours(at(17, 17, 0), at(18, 9, 0)));

    // Sun 09:00 -> Mon 10:00 starts on a closed day.
    assert!(!hours.is_within_business_hours(at(19, 9, 0), at(20, 10, 0)));
}

#[test]
fn closing_a_day_rejects_every_span_on_it() {
    let hours = BusinessHours::default().with_day(Weekday::Mon, None);

    assert!(!hours.is_within_business_hours(at(13, 9, 0), at(13, 10, 0)));
    assert!(hours.is_within_business_hours(at(14, 9, 0), at(14, 10, 0)));
}

#[test]
fn opening_a_weekend_day() {
    let saturday = DayHours::new(time(10, 0), time(14, 0)).unwrap();
    let hours = BusinessHours::closed().with_day(Weekday::Sat, Some(saturday));

    assert!(hours.is_within_business_hours(at(18, 10, 0), at(18, 14, 0)));
    assert!(!hours.is_within_business_hours(at(18, 13, 30), at(18, 14, 30)));
    assert!(!hours.is_within_business_hours(at(13, 10, 0), at(13, 11, 0)));
}

#[test]
fn open_after_close_is_rejected() {
    let err = DayHours::new(time(18, 0), time(8, 0)).unwrap_err();
    assert!(matches!(err, SlotError::Usage(_)), "got {:?}", err);
}

#[test]
fn parse_accepts_hh_mm() {
    let hours = DayHours::parse("09:30", "17:15").unwrap();
    assert_eq!(hours.open(), time(9, 30));
    assert_eq!(hours.close(), time(17, 15));

    assert!(matches!(
        DayHours::parse("25:00", "26:00"),
        Err(SlotError::Usage(_))
    ));
}

#[test]
fn json_missing_days_keep_defaults_and_null_closes() {
    let hours: BusinessHours =
        serde_json::from_str(r#"{"monday": null, "thursday": null, "saturday": ["10:00", "12:00"]}"#)
            .unwrap();

    assert_eq!(hours.day(Weekday::Mon), None);
    assert_eq!(hours.day(Weekday::Thu), None);
    assert_eq!(hours.day(Weekday::Tue), Some(DayHours::office()));
    assert_eq!(
        hours.day(Weekday::Sat),
        Some(DayHours::parse("10:00", "12:00").unwrap())
    );
    assert_eq!(hours.day(Weekday::Sun), None);
}

#[test]
fn json_shape_of_default_table() {
    let value = serde_json::to_value(BusinessHours::default()).unwrap();

    assert_eq!(value["monday"], serde_json::json!(["08:00", "18:00"]));
    assert_eq!(value["friday"], serde_json::json!(["08:00", "18:00"]));
    assert_eq!(value["saturday"], serde_json::Value::Null);
}

#[test]
fn json_rejects_inverted_hours() {
    let result: Result<BusinessHours, _> = serde_json::from_str(r#"{"monday": ["18:00", "08:00"]}"#);
    assert!(result.is_err());
}
