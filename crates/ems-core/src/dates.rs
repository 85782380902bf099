//! Date parsing and day arithmetic.
//!
//! Dates are stored as `YYYY-MM-DD` and shown as `DD-MM-YYYY`. Every
//! calculation takes the reference instant as a parameter so results are
//! reproducible against a fixed `now`.

use chrono::{DateTime, Months, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::error::{EmsError, Result};

pub const STORAGE_FORMAT: &str = "%Y-%m-%d";
pub const DISPLAY_FORMAT: &str = "%d-%m-%Y";

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Parse a stored or user-entered date. Returns `None` for anything that is
/// not a recognizable calendar date, including the empty string.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(d) = NaiveDate::parse_from_str(trimmed, STORAGE_FORMAT) {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(trimmed, DISPLAY_FORMAT) {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(trimmed, "%d/%m/%Y") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

pub fn to_storage(date: NaiveDate) -> String {
    date.format(STORAGE_FORMAT).to_string()
}

pub fn to_display(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Normalize form input (display or storage format) to storage format.
pub fn display_to_storage(raw: &str) -> Option<String> {
    parse_date(raw).map(to_storage)
}

/// Midnight UTC at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Whole days from `now` until the start of `date`, rounded up.
///
/// A date 30.1 days away counts as 31; exactly 30.0 days away counts as 30.
/// Negative when the date has already passed.
pub fn days_until(date: NaiveDate, now: DateTime<Utc>) -> i64 {
    let diff_ms = start_of_day(date).timestamp_millis() - now.timestamp_millis();
    ceil_div(diff_ms, MILLIS_PER_DAY)
}

fn ceil_div(numerator: i64, denominator: i64) -> i64 {
    let quotient = numerator / denominator;
    if numerator % denominator > 0 {
        quotient + 1
    } else {
        quotient
    }
}

/// Completed years between `dob` and `now`. `None` if `dob` is in the future.
pub fn age_in_years(dob: NaiveDate, now: DateTime<Utc>) -> Option<u32> {
    now.date_naive().years_since(dob)
}

/// Short month label used by the join-month breakdown, e.g. `Jan 24`.
pub fn month_key(date: NaiveDate) -> String {
    date.format("%b %y").to_string()
}

/// The calendar date twelve months before `now`.
pub fn twelve_months_before(now: DateTime<Utc>) -> NaiveDate {
    let today = now.date_naive();
    today.checked_sub_months(Months::new(12)).unwrap_or(today)
}

/// Parse the reference instant given on the command line. A bare date means
/// midnight UTC of that day.
pub fn parse_reference_instant(raw: &str) -> Result<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    match parse_date(trimmed) {
        Some(d) => Ok(start_of_day(d)),
        None => Err(EmsError::InvalidReferenceDate(raw.to_string())),
    }
}
