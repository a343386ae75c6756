use crate::core::calendar;
use crate::utils::error::{DateRangeError, Result};
use chrono::{NaiveDateTime, Weekday};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_weekday(field_name: &str, value: &str) -> Result<Weekday> {
    if value.trim().is_empty() {
        return Err(DateRangeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Weekday cannot be empty".to_string(),
        });
    }

    value
        .trim()
        .parse::<Weekday>()
        .map_err(|_| DateRangeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Expected a weekday name such as monday or sun".to_string(),
        })
}

/// Checks that `value` parses as an instant. Relative keywords are resolved
/// against `now`.
pub fn validate_instant(field_name: &str, value: &str, now: NaiveDateTime) -> Result<NaiveDateTime> {
    calendar::parse(value, now).map_err(|e| DateRangeError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DateRangeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}
