//! Date math and display formatting helpers
//!
//! Every relative-date decision in the engine flows through these helpers:
//! timezone resolution, local-date truncation, the Monday week anchor, the
//! previous-school-day reference, and the small display formats shared by
//! the grid, detail, and progress views.
//!
//! Nothing here reads a wall clock; callers pass the reference instant.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;

use crate::error::EngineError;

/// Resolve an IANA timezone name, e.g. `"America/Los_Angeles"`.
pub fn resolve_tz(name: &str) -> Result<Tz, EngineError> {
    name.parse()
        .map_err(|_| EngineError::InvalidTimezone(name.to_string()))
}

/// Truncate an instant to its calendar date in the given timezone.
pub fn local_date(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Monday of the ISO week containing `as_of`, evaluated in the timezone.
pub fn week_monday(as_of: DateTime<Utc>, tz: Tz) -> NaiveDate {
    local_date(as_of, tz).week(Weekday::Mon).first_day()
}

/// The last school day before `today`: the previous Friday when `today`
/// falls on Sat/Sun/Mon, otherwise the previous calendar day.
pub fn previous_school_day(today: NaiveDate) -> NaiveDate {
    let back = match today.weekday() {
        Weekday::Sun => 2,
        Weekday::Mon => 3,
        _ => 1,
    };
    today - Duration::days(back)
}

/// `M/d` without zero padding, e.g. `10/6`.
pub fn month_day(date: NaiveDate) -> String {
    format!("{}/{}", date.month(), date.day())
}

/// Three-letter weekday abbreviation, e.g. `Tue`.
pub fn weekday_abbrev(date: NaiveDate) -> String {
    date.format("%a").to_string()
}

/// `M/D` when the instant's local year matches `reference_year`, else
/// `M/D/YY` with a two-digit year.
pub fn year_aware(instant: DateTime<Utc>, tz: Tz, reference_year: i32) -> String {
    let local = local_date(instant, tz);
    if local.year() == reference_year {
        month_day(local)
    } else {
        format!("{}/{}/{:02}", local.month(), local.day(), local.year() % 100)
    }
}

/// Render a point value without a trailing `.0` (`5`, not `5.0`).
pub fn points_display(points: f64) -> String {
    if points.fract() == 0.0 {
        format!("{}", points as i64)
    } else {
        format!("{points}")
    }
}

/// Integer percentage clamped to 0..=100.
pub fn clamped_pct(earned: f64, possible: f64) -> u32 {
    ((earned / possible) * 100.0).round().clamp(0.0, 100.0) as u32
}

/// Shared percentage display; guards the zero denominator.
pub fn percent_display(earned: f64, possible: f64) -> String {
    if possible > 0.0 {
        format!("{}%", clamped_pct(earned, possible))
    } else {
        "—".to_string()
    }
}
