//! Tests for fixed-interval instant enumeration.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use timeslots::{FixedInterval, SlotError};

fn at(day: u32, hour: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 3, day)
        .unwrap()
        .and_hms_opt(hour, min, 0)
        .unwrap()
}

#[test]
fn both_bounds_are_inclusive() {
    let rule = FixedInterval::new(at(13, 12, 0), 60).unwrap();
    let instants = rule.between(at(13, 15, 0)).unwrap();

    assert_eq!(
        instants,
        vec![at(13, 12, 0), at(13, 13, 0), at(13, 14, 0), at(13, 15, 0)]
    );
}

#[test]
fn off_grid_end_is_not_reached() {
    let rule = FixedInterval::new(at(13, 12, 0), 60).unwrap();
    let instants = rule.between(at(13, 14, 30)).unwrap();

    assert_eq!(instants, vec![at(13, 12, 0), at(13, 13, 0), at(13, 14, 0)]);
}

#[test]
fn end_before_anchor_is_empty() {
    let rule = FixedInterval::new(at(13, 12, 0), 30).unwrap();
    assert!(rule.between(at(13, 11, 0)).unwrap().is_empty());
}

#[test]
fn end_equal_to_anchor_yields_anchor() {
    let rule = FixedInterval::new(at(13, 12, 0), 30).unwrap();
    assert_eq!(rule.between(at(13, 12, 0)).unwrap(), vec![at(13, 12, 0)]);
}

#[test]
fn crosses_midnight_and_days() {
    let rule = FixedInterval::new(at(13, 22, 0), 90).unwrap();
    let instants = rule.between(at(14, 2, 0)).unwrap();

    assert_eq!(instants, vec![at(13, 22, 0), at(13, 23, 30), at(14, 1, 0)]);
}

#[test]
fn zero_step_is_degenerate() {
    let err = FixedInterval::new(at(13, 12, 0), 0).unwrap_err();
    assert!(matches!(err, SlotError::DegenerateInterval { minutes: 0 }));

    let err = FixedInterval::new(at(13, 12, 0), -15).unwrap_err();
    assert!(matches!(err, SlotError::DegenerateInterval { minutes: -15 }));
}

#[test]
fn sub_minute_slot_rounds_down_to_degenerate() {
    let err =
        FixedInterval::from_slot(at(13, 12, 0), Duration::seconds(59), Duration::zero()).unwrap_err();
    assert!(matches!(err, SlotError::DegenerateInterval { minutes: 0 }));
}

#[test]
fn step_is_duration_plus_gap_in_whole_minutes() {
    // 40 min + 1h28m = 128 min; the extra 30 seconds are dropped.
    let rule = FixedInterval::from_slot(
        at(14, 8, 0),
        Duration::minutes(40),
        Duration::minutes(88) + Duration::seconds(30),
    )
    .unwrap();

    assert_eq!(rule.step_minutes(), 128);
    assert_eq!(rule.step(), Duration::minutes(128));
    assert_eq!(rule.anchor(), at(14, 8, 0));
}

#[test]
fn slice_restarts_on_the_grid() {
    // Grid: 12:00, 12:45, 13:30, 14:15, 15:00
    let rule = FixedInterval::new(at(13, 12, 0), 45).unwrap();
    let instants = rule.slice_between(at(13, 12, 50), at(13, 14, 30)).unwrap();

    assert_eq!(instants, vec![at(13, 13, 30), at(13, 14, 15)]);

    let on_grid = rule.slice_between(at(13, 12, 45), at(13, 13, 30)).unwrap();
    assert_eq!(on_grid, vec![at(13, 12, 45), at(13, 13, 30)]);
}

#[test]
fn sub_second_anchor_is_preserved() {
    let anchor = at(13, 12, 0) + Duration::milliseconds(500);
    let rule = FixedInterval::new(anchor, 30).unwrap();
    let instants = rule.between(at(13, 13, 0) + Duration::milliseconds(500)).unwrap();

    assert_eq!(
        instants,
        vec![
            anchor,
            anchor + Duration::minutes(30),
            anchor + Duration::minutes(60),
        ]
    );
}

#[test]
fn long_windows_are_expanded_in_chunks() {
    // 50 days of minutely instants is more than a single expansion returns.
    let anchor = at(1, 0, 0);
    let until = anchor + Duration::days(50);
    let rule = FixedInterval::new(anchor, 1).unwrap();

    let instants = rule.between(until).unwrap();

    assert_eq!(instants.len(), 50 * 24 * 60 + 1);
    assert_eq!(instants.first(), Some(&anchor));
    assert_eq!(instants.last(), Some(&until));
    assert!(instants
        .windows(2)
        .all(|pair| pair[1] - pair[0] == Duration::minutes(1)));
}

#[test]
fn steps_beyond_a_rule_interval_are_walked_directly() {
    let anchor = at(13, 8, 0);
    let until = anchor + Duration::days(100);

    let rule = FixedInterval::new(anchor, 65_536).unwrap();
    assert_eq!(
        rule.between(until).unwrap(),
        vec![anchor, anchor + Duration::minutes(65_536)]
    );

    // The largest step the rule engine takes must agree with the direct walk.
    let rule = FixedInterval::new(anchor, 65_535).unwrap();
    assert_eq!(
        rule.between(until).unwrap(),
        vec![anchor, anchor + Duration::minutes(65_535)]
    );
}

#[test]
fn slot_with_fifty_day_gap_yields_anchor() {
    let anchor = at(13, 8, 0);
    let rule = FixedInterval::from_slot(anchor, Duration::hours(1), Duration::days(50)).unwrap();
    assert_eq!(rule.step_minutes(), 72_060);

    let instants = rule.between(at(31, 0, 0)).unwrap();
    assert_eq!(instants, vec![anchor]);
}

#[test]
fn direct_walk_slices_from_the_grid() {
    let anchor = at(1, 0, 0);
    let rule = FixedInterval::new(anchor, 100_000).unwrap();
    let step = Duration::minutes(100_000);

    let instants = rule
        .slice_between(anchor + Duration::minutes(1), anchor + step * 3)
        .unwrap();

    assert_eq!(instants, vec![anchor + step, anchor + step * 2, anchor + step * 3]);
}

#[test]
fn step_past_the_calendar_range_stops_after_anchor() {
    let anchor = at(13, 8, 0);
    let rule = FixedInterval::new(anchor, 288_000_000_000).unwrap();

    assert_eq!(rule.between(at(13, 18, 0)).unwrap(), vec![anchor]);
    assert!(rule
        .slice_between(at(13, 8, 1), at(13, 18, 0))
        .unwrap()
        .is_empty());
}

#[test]
fn out_of_range_step_sum_is_a_usage_error() {
    let err =
        FixedInterval::from_slot(at(13, 8, 0), Duration::MAX, Duration::minutes(1)).unwrap_err();
    assert!(matches!(err, SlotError::Usage(_)));
}
