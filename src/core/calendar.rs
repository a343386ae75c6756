//! Calendar arithmetic over `NaiveDateTime`.
//!
//! Period boundaries, shifts and parsing used by `DateRange` and the preset
//! resolver. Month and year shifts clamp to the last valid day of the target
//! month, so Jan 31 plus one month is the last day of February.

use crate::utils::error::{DateRangeError, Result};
use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

pub const END_OF_DAY: NaiveTime = match NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999) {
    Some(time) => time,
    None => panic!("23:59:59.999999999 is a valid time"),
};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

fn out_of_range(value: NaiveDateTime, operation: &str) -> DateRangeError {
    DateRangeError::invalid_date(value.to_string(), format!("{} is out of range", operation))
}

pub fn start_of_day(value: NaiveDateTime) -> NaiveDateTime {
    value.date().and_time(NaiveTime::MIN)
}

pub fn end_of_day(value: NaiveDateTime) -> NaiveDateTime {
    value.date().and_time(END_OF_DAY)
}

/// Start of the week containing `value`, where weeks begin on `first_day`.
pub fn start_of_week(value: NaiveDateTime, first_day: Weekday) -> Result<NaiveDateTime> {
    let offset = (value.weekday().num_days_from_monday() + 7 - first_day.num_days_from_monday()) % 7;
    add_days(start_of_day(value), -i64::from(offset))
}

pub fn end_of_week(value: NaiveDateTime, first_day: Weekday) -> Result<NaiveDateTime> {
    let start = start_of_week(value, first_day)?;
    Ok(end_of_day(add_days(start, 6)?))
}

pub fn start_of_month(value: NaiveDateTime) -> Result<NaiveDateTime> {
    NaiveDate::from_ymd_opt(value.year(), value.month(), 1)
        .map(|date| date.and_time(NaiveTime::MIN))
        .ok_or_else(|| out_of_range(value, "start of month"))
}

pub fn end_of_month(value: NaiveDateTime) -> Result<NaiveDateTime> {
    let next_month = add_months(start_of_month(value)?, 1)?;
    Ok(end_of_day(add_days(next_month, -1)?))
}

pub fn start_of_year(value: NaiveDateTime) -> Result<NaiveDateTime> {
    NaiveDate::from_ymd_opt(value.year(), 1, 1)
        .map(|date| date.and_time(NaiveTime::MIN))
        .ok_or_else(|| out_of_range(value, "start of year"))
}

pub fn end_of_year(value: NaiveDateTime) -> Result<NaiveDateTime> {
    NaiveDate::from_ymd_opt(value.year(), 12, 31)
        .map(|date| date.and_time(END_OF_DAY))
        .ok_or_else(|| out_of_range(value, "end of year"))
}

pub fn add_days(value: NaiveDateTime, days: i64) -> Result<NaiveDateTime> {
    let shifted = if days >= 0 {
        value.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        value.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.ok_or_else(|| out_of_range(value, &format!("shifting by {} days", days)))
}

pub fn add_weeks(value: NaiveDateTime, weeks: i64) -> Result<NaiveDateTime> {
    let days = weeks
        .checked_mul(7)
        .ok_or_else(|| out_of_range(value, &format!("shifting by {} weeks", weeks)))?;
    add_days(value, days)
}

pub fn add_months(value: NaiveDateTime, months: i32) -> Result<NaiveDateTime> {
    let shifted = if months >= 0 {
        value.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        value.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.ok_or_else(|| out_of_range(value, &format!("shifting by {} months", months)))
}

pub fn add_years(value: NaiveDateTime, years: i32) -> Result<NaiveDateTime> {
    let months = years
        .checked_mul(12)
        .ok_or_else(|| out_of_range(value, &format!("shifting by {} years", years)))?;
    add_months(value, months)
}

/// Whole days from `from` to `to`, truncated towards zero.
pub fn diff_in_days(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    (to - from).num_days()
}

/// Parses a date or date-time string. `now` anchors the relative keywords
/// `now`, `today`, `yesterday` and `tomorrow`.
pub fn parse(input: &str, now: NaiveDateTime) -> Result<NaiveDateTime> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DateRangeError::invalid_date(input, "empty date string"));
    }

    match trimmed.to_ascii_lowercase().as_str() {
        "now" => return Ok(now),
        "today" => return Ok(start_of_day(now)),
        "yesterday" => return add_days(start_of_day(now), -1),
        "tomorrow" => return add_days(start_of_day(now), 1),
        _ => {}
    }

    // Offset-carrying input keeps its wall-clock time.
    if let Ok(value) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(value.naive_local());
    }

    for format in DATETIME_FORMATS {
        if let Ok(value) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(value);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date.and_time(NaiveTime::MIN));
        }
    }

    Err(DateRangeError::invalid_date(
        input,
        "expected YYYY-MM-DD, YYYY-MM-DD HH:MM[:SS], RFC 3339, DD/MM/YYYY or a keyword such as today",
    ))
}
