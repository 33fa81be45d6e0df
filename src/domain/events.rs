//! Event derivation: next yearly occurrences and days-until math.
//!
//! All computations are date-only (no time-of-day) and relative to a
//! caller-supplied reference date, never the system clock.

use chrono::{Datelike, NaiveDate};
use itertools::Itertools;
use tracing::warn;

use crate::domain::entities::{CustomEvent, Member};

/// Kind of a derived alert. The ordering is load-bearing: ties in
/// `days_until` are broken birthday < anniversary < custom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AlertKind {
    Birthday,
    Anniversary,
    Custom,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Birthday => "birthday",
            AlertKind::Anniversary => "anniversary",
            AlertKind::Custom => "custom",
        }
    }
}

/// A derived reminder: ephemeral, recomputed on each request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertEntry {
    pub kind: AlertKind,
    pub title: String,
    /// Next occurrence on or after the reference date
    pub date: NaiveDate,
    /// Whole days from the reference date to `date`, always >= 0
    pub days_until: i64,
    /// Source event id for custom events, to support deletion from the UI
    pub event_id: Option<String>,
}

/// An entry in the month calendar view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEntry {
    pub kind: AlertKind,
    pub title: String,
    pub date: NaiveDate,
    pub member_id: Option<String>,
    pub event_id: Option<String>,
}

/// Next occurrence of (month, day) on or after `reference`.
///
/// The stored date's (month, day) is paired with the reference year; if that
/// date falls strictly before the reference it advances one year. Explicit
/// rule for Feb 29: in a year without one, the occurrence falls back to
/// Feb 28 of that year.
///
/// Returns None only when (month, day) cannot form a date in either
/// candidate year; callers skip such entries.
pub fn next_occurrence(month: u32, day: u32, reference: NaiveDate) -> Option<NaiveDate> {
    let in_year = |year: i32| {
        NaiveDate::from_ymd_opt(year, month, day).or_else(|| {
            if month == 2 && day == 29 {
                NaiveDate::from_ymd_opt(year, 2, 28)
            } else {
                None
            }
        })
    };

    match in_year(reference.year()) {
        Some(date) if date >= reference => Some(date),
        Some(_) => in_year(reference.year() + 1),
        None => None,
    }
}

/// Derive alert entries for every member birthday, member anniversary, and
/// custom event, relative to `reference`.
///
/// All three kinds recur yearly: a custom event whose stored year is
/// entirely in the past is still projected forward. An entry whose date
/// cannot be projected is skipped so one bad record never blocks the rest
/// of the family's alerts.
///
/// Output is sorted ascending by `days_until`, ties broken by kind
/// (birthday < anniversary < custom), then by title.
pub fn derive_events(
    members: &[Member],
    events: &[CustomEvent],
    reference: NaiveDate,
) -> Vec<AlertEntry> {
    let mut alerts: Vec<AlertEntry> = Vec::new();

    for member in members {
        if let Some(birthday) = member.birthday {
            alerts.extend(project(
                AlertKind::Birthday,
                format!("{}'s Birthday", member.full_name()),
                birthday,
                None,
                reference,
            ));
        }
        if let Some(anniversary) = member.anniversary {
            alerts.extend(project(
                AlertKind::Anniversary,
                format!("{}'s Anniversary", member.full_name()),
                anniversary,
                None,
                reference,
            ));
        }
    }

    for event in events {
        alerts.extend(project(
            AlertKind::Custom,
            event.event_name.clone(),
            event.event_date,
            Some(event.id.clone()),
            reference,
        ));
    }

    alerts
        .into_iter()
        .sorted_by(|a, b| {
            a.days_until
                .cmp(&b.days_until)
                .then(a.kind.cmp(&b.kind))
                .then_with(|| a.title.cmp(&b.title))
        })
        .collect()
}

fn project(
    kind: AlertKind,
    title: String,
    stored: NaiveDate,
    event_id: Option<String>,
    reference: NaiveDate,
) -> Option<AlertEntry> {
    let Some(date) = next_occurrence(stored.month(), stored.day(), reference) else {
        warn!(%title, %stored, "cannot project date forward, skipping entry");
        return None;
    };
    Some(AlertEntry {
        kind,
        title,
        date,
        days_until: date.signed_duration_since(reference).num_days(),
        event_id,
    })
}

/// Calendar view: all events falling in a given month (and year, for custom
/// events).
///
/// Birthdays and anniversaries are recurring, so they match on month alone;
/// the year filter applies only to custom events, which carry a meaningful
/// year. Sorted by (month, day), ties by kind then title.
pub fn calendar_events(
    members: &[Member],
    events: &[CustomEvent],
    month: Option<u32>,
    year: Option<i32>,
) -> Vec<CalendarEntry> {
    let month_matches = |date: NaiveDate| month.map(|m| date.month() == m).unwrap_or(true);
    let mut entries: Vec<CalendarEntry> = Vec::new();

    for member in members {
        if let Some(birthday) = member.birthday.filter(|&d| month_matches(d)) {
            entries.push(CalendarEntry {
                kind: AlertKind::Birthday,
                title: format!("{}'s Birthday", member.full_name()),
                date: birthday,
                member_id: Some(member.id.clone()),
                event_id: None,
            });
        }
        if let Some(anniversary) = member.anniversary.filter(|&d| month_matches(d)) {
            entries.push(CalendarEntry {
                kind: AlertKind::Anniversary,
                title: format!("{}'s Anniversary", member.full_name()),
                date: anniversary,
                member_id: Some(member.id.clone()),
                event_id: None,
            });
        }
    }

    for event in events {
        let year_matches = year.map(|y| event.event_date.year() == y).unwrap_or(true);
        if month_matches(event.event_date) && year_matches {
            entries.push(CalendarEntry {
                kind: AlertKind::Custom,
                title: event.event_name.clone(),
                date: event.event_date,
                member_id: event.member_id.clone(),
                event_id: Some(event.id.clone()),
            });
        }
    }

    entries
        .into_iter()
        .sorted_by(|a, b| {
            (a.date.month(), a.date.day())
                .cmp(&(b.date.month(), b.date.day()))
                .then(a.kind.cmp(&b.kind))
                .then_with(|| a.title.cmp(&b.title))
        })
        .collect()
}
