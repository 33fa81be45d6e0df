//! Tests for the event deriver and calendar view

use chrono::NaiveDate;
use rstest::rstest;

use famtree::domain::{
    calendar_events, derive_events, next_occurrence, AlertKind, CustomEvent, Member,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn member_with_birthday(id: &str, first: &str, last: &str, birthday: NaiveDate) -> Member {
    Member {
        birthday: Some(birthday),
        ..Member::new(id, first, last)
    }
}

fn event(id: &str, name: &str, on: NaiveDate) -> CustomEvent {
    CustomEvent {
        id: id.to_string(),
        family_id: "fam".to_string(),
        event_name: name.to_string(),
        event_date: on,
        member_id: None,
    }
}

#[rstest]
// birthday March 15 seen from March 10: this year, 5 days out
#[case(date(2024, 3, 10), date(2024, 3, 15), 5)]
// seen from March 20: already passed, next year, 360 days out
#[case(date(2024, 3, 20), date(2025, 3, 15), 360)]
fn given_march_birthday_when_deriving_then_next_occurrence_and_days_match(
    #[case] reference: NaiveDate,
    #[case] expected_date: NaiveDate,
    #[case] expected_days: i64,
) {
    // Arrange
    let members = vec![member_with_birthday("m1", "Ada", "Smith", date(1990, 3, 15))];

    // Act
    let alerts = derive_events(&members, &[], reference);

    // Assert
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].date, expected_date);
    assert_eq!(alerts[0].days_until, expected_days);
}

#[test]
fn given_feb_29_birthday_in_non_leap_year_then_resolves_to_feb_28() {
    // Arrange
    let members = vec![member_with_birthday("m1", "Leap", "Year", date(2000, 2, 29))];

    // Act
    let alerts = derive_events(&members, &[], date(2025, 1, 10));

    // Assert
    assert_eq!(alerts[0].date, date(2025, 2, 28));
}

#[test]
fn given_member_data_when_deriving_then_titles_are_formatted() {
    // Arrange
    let mut member = member_with_birthday("m1", "Ada", "Smith", date(1990, 3, 15));
    member.anniversary = Some(date(2015, 6, 1));
    let events = vec![event("e1", "Housewarming Party", date(2024, 9, 1))];

    // Act
    let alerts = derive_events(&[member], &events, date(2024, 1, 1));

    // Assert
    let titles: Vec<_> = alerts.iter().map(|a| a.title.clone()).collect();
    assert!(titles.contains(&"Ada Smith's Birthday".to_string()));
    assert!(titles.contains(&"Ada Smith's Anniversary".to_string()));
    assert!(titles.contains(&"Housewarming Party".to_string()));
}

#[test]
fn given_past_custom_event_when_deriving_then_it_recurs_yearly() {
    // Arrange: event entirely in the past, including the year
    let events = vec![event("e1", "First Date", date(2001, 4, 20))];

    // Act
    let alerts = derive_events(&[], &events, date(2024, 5, 1));

    // Assert: projected to next year's April 20
    assert_eq!(alerts[0].date, date(2025, 4, 20));
    assert!(alerts[0].days_until > 0);
    assert_eq!(alerts[0].event_id.as_deref(), Some("e1"));
}

#[test]
fn given_same_day_events_when_deriving_then_ties_break_by_kind_then_title() {
    // Arrange: all three kinds on the same upcoming day
    let mut member = member_with_birthday("m1", "Zoe", "Adams", date(1990, 7, 4));
    member.anniversary = Some(date(2010, 7, 4));
    let events = vec![
        event("e2", "Block Party", date(2020, 7, 4)),
        event("e1", "Anniversary BBQ", date(2020, 7, 4)),
    ];

    // Act
    let alerts = derive_events(&[member], &events, date(2024, 7, 1));

    // Assert: birthday < anniversary < custom, custom ties by title
    let kinds: Vec<_> = alerts.iter().map(|a| a.kind).collect();
    assert_eq!(
        kinds,
        vec![
            AlertKind::Birthday,
            AlertKind::Anniversary,
            AlertKind::Custom,
            AlertKind::Custom
        ]
    );
    assert_eq!(alerts[2].title, "Anniversary BBQ");
    assert_eq!(alerts[3].title, "Block Party");
}

#[test]
fn given_today_matches_when_deriving_then_days_until_is_zero() {
    let members = vec![member_with_birthday("m1", "Ada", "Smith", date(1990, 3, 15))];

    let alerts = derive_events(&members, &[], date(2024, 3, 15));

    assert_eq!(alerts[0].days_until, 0);
    assert_eq!(alerts[0].date, date(2024, 3, 15));
}

#[test]
fn given_output_when_deriving_then_sorted_ascending_by_days_until() {
    let members = vec![
        member_with_birthday("m1", "Far", "Out", date(1990, 12, 24)),
        member_with_birthday("m2", "Soon", "Now", date(1985, 3, 20)),
    ];

    let alerts = derive_events(&members, &[], date(2024, 3, 10));

    let days: Vec<_> = alerts.iter().map(|a| a.days_until).collect();
    let mut sorted = days.clone();
    sorted.sort();
    assert_eq!(days, sorted);
}

#[test]
fn given_month_filter_when_listing_calendar_then_recurring_kinds_match_by_month() {
    // Arrange: birthday from 1990 must still show for a 2024 calendar
    let members = vec![member_with_birthday("m1", "Ada", "Smith", date(1990, 3, 15))];
    let events = vec![
        event("e1", "Spring Fair", date(2024, 3, 22)),
        event("e2", "Old Fair", date(2019, 3, 22)),
        event("e3", "Summer Fest", date(2024, 6, 10)),
    ];

    // Act
    let entries = calendar_events(&members, &events, Some(3), Some(2024));

    // Assert: birthday matches by month; custom events also filter by year
    let titles: Vec<_> = entries.iter().map(|e| e.title.clone()).collect();
    assert_eq!(titles, vec!["Ada Smith's Birthday", "Spring Fair"]);
}

#[test]
fn given_no_filters_when_listing_calendar_then_sorted_by_month_and_day() {
    let members = vec![
        member_with_birthday("m1", "Ada", "Smith", date(1990, 11, 2)),
        member_with_birthday("m2", "Bob", "Jones", date(1980, 2, 14)),
    ];

    let entries = calendar_events(&members, &[], None, None);

    let days: Vec<_> = entries
        .iter()
        .map(|e| {
            use chrono::Datelike;
            (e.date.month(), e.date.day())
        })
        .collect();
    assert_eq!(days, vec![(2, 14), (11, 2)]);
}

#[test]
fn given_invalid_month_day_when_projecting_then_returns_none() {
    // Only Feb 29 has a fallback; a plainly impossible pair yields None
    assert_eq!(next_occurrence(13, 1, date(2024, 1, 1)), None);
}
