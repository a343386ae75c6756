use crate::core::calendar;
use crate::core::resolver::RangeResolver;
use crate::domain::model::Interval;
use crate::utils::error::{DateRangeError, Result};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;
use std::iter::FusedIterator;

const TEXT_FORMAT: &str = "%d/%m/%Y";

/// An inclusive span of whole days.
///
/// `start` is always midnight of its day and `end` the last representable
/// instant of its day, with `start <= end`. Values never change after
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl DateRange {
    /// Builds a range from two instants, widening them to whole days.
    ///
    /// Fails with `InvalidDateRange` when `end` is before `start`; the check
    /// uses the instants as given, before widening.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if end < start {
            return Err(DateRangeError::InvalidDateRange {
                message: format!("{} is after {}", start, end),
            });
        }

        Ok(Self {
            start: calendar::start_of_day(start),
            end: calendar::end_of_day(end),
        })
    }

    /// Ad-hoc range from optional date strings, defaulting to today.
    ///
    /// See [`RangeResolver::create`]; this uses the system clock.
    pub fn create(start: Option<&str>, end: Option<&str>) -> Result<Self> {
        RangeResolver::system().create(start, end)
    }

    /// Resolves a preset token such as `month_to_date` against `now`
    /// (the current moment when `None`).
    ///
    /// See [`RangeResolver::resolve_token`]; this uses the system clock and
    /// weeks starting on Monday.
    pub fn resolve_range(token: &str, now: Option<&str>) -> Result<Self> {
        RangeResolver::system().resolve_token(token, now)
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Start of the equally long window that ends at this range's start.
    pub fn prev_start(&self) -> Result<NaiveDateTime> {
        calendar::add_days(self.start, -self.range_difference_in_days())
    }

    pub fn prev_end(&self) -> NaiveDateTime {
        self.start
    }

    /// Whole days between start and end. A single-day range spans 0 days.
    pub fn range_difference_in_days(&self) -> i64 {
        calendar::diff_in_days(self.start, self.end)
    }

    pub fn as_text(&self) -> String {
        let start = self.start.format(TEXT_FORMAT).to_string();
        let end = self.end.format(TEXT_FORMAT).to_string();

        if start == end {
            start
        } else {
            format!("From {} to {}", start, end)
        }
    }

    /// Lazily walks the range one `interval` at a time.
    ///
    /// Forward iteration starts at `start` and stops once the cursor reaches
    /// `end`. Reverse iteration starts at midnight of the last day and stops
    /// once the cursor drops below `start`. Every call returns a fresh
    /// iterator.
    pub fn each(&self, interval: Interval, reverse: bool) -> Each {
        let cursor = if reverse {
            calendar::start_of_day(self.end)
        } else {
            calendar::start_of_day(self.start)
        };

        tracing::debug!(
            "Iterating {} by {} ({})",
            self,
            interval,
            if reverse { "reverse" } else { "forward" }
        );

        Each {
            cursor: Some(cursor),
            start: self.start,
            end: self.end,
            interval,
            reverse,
        }
    }

    /// Like [`DateRange::each`], with the interval given by name.
    pub fn each_by(&self, interval: &str, reverse: bool) -> Result<Each> {
        let interval = interval.parse::<Interval>()?;
        Ok(self.each(interval, reverse))
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

/// Iterator returned by [`DateRange::each`].
#[derive(Debug, Clone)]
pub struct Each {
    cursor: Option<NaiveDateTime>,
    start: NaiveDateTime,
    end: NaiveDateTime,
    interval: Interval,
    reverse: bool,
}

impl Each {
    fn step(&self, from: NaiveDateTime) -> Option<NaiveDateTime> {
        let direction = if self.reverse { -1 } else { 1 };
        let next = match self.interval {
            Interval::Day => calendar::add_days(from, direction),
            Interval::Month => calendar::add_months(from, direction as i32),
        };
        // Stepping off the representable calendar ends the walk.
        next.ok()
    }
}

impl Iterator for Each {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor?;
        let in_range = if self.reverse {
            current >= self.start
        } else {
            current < self.end
        };

        if !in_range {
            self.cursor = None;
            return None;
        }

        self.cursor = self.step(current);
        Some(current)
    }
}

impl FusedIterator for Each {}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(value: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn fmt(value: NaiveDateTime) -> String {
        value.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    #[test]
    fn test_construct_normalizes_to_whole_days() {
        let range = DateRange::new(at("2000-01-01 10:00:00"), at("2000-01-02 06:30:00")).unwrap();
        assert_eq!(fmt(range.start()), "2000-01-01 00:00:00");
        assert_eq!(fmt(range.end()), "2000-01-02 23:59:59");
    }

    #[test]
    fn test_construct_rejects_inverted_range() {
        let err = DateRange::new(at("2001-01-01 00:00:00"), at("2000-01-01 00:00:00")).unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, DateRangeError::InvalidDateRange { .. }));
        assert!(message.contains("2001-01-01"));
        assert!(message.contains("2000-01-01"));
    }

    #[test]
    fn test_construct_compares_raw_instants() {
        // Same day, end earlier in the day than start.
        assert!(DateRange::new(at("2000-01-01 12:00:00"), at("2000-01-01 08:00:00")).is_err());
        assert!(DateRange::new(at("2000-01-01 08:00:00"), at("2000-01-01 08:00:00")).is_ok());
    }

    #[test]
    fn test_previous_period() {
        let range = DateRange::new(at("2000-01-11 00:00:00"), at("2000-01-21 00:00:00")).unwrap();
        assert_eq!(range.range_difference_in_days(), 10);
        assert_eq!(fmt(range.prev_start().unwrap()), "2000-01-01 00:00:00");
        assert_eq!(range.prev_end(), range.start());
    }

    #[test]
    fn test_single_day_has_zero_span() {
        let range = DateRange::new(at("2000-01-11 09:00:00"), at("2000-01-11 17:00:00")).unwrap();
        assert_eq!(range.range_difference_in_days(), 0);
        assert_eq!(range.prev_start().unwrap(), range.start());
    }

    #[test]
    fn test_as_text() {
        let single = DateRange::new(at("2000-02-01 09:00:00"), at("2000-02-01 09:00:00")).unwrap();
        assert_eq!(single.as_text(), "01/02/2000");

        let multi = DateRange::new(at("2000-02-01 00:00:00"), at("2000-03-15 00:00:00")).unwrap();
        assert_eq!(multi.as_text(), "From 01/02/2000 to 15/03/2000");
        assert_eq!(multi.to_string(), multi.as_text());
    }

    #[test]
    fn test_each_month_forward_and_reverse() {
        let range = DateRange::new(at("2000-01-01 00:00:00"), at("2000-03-31 00:00:00")).unwrap();

        let forward: Vec<String> = range.each(Interval::Month, false).map(fmt).collect();
        assert_eq!(
            forward,
            vec!["2000-01-01 00:00:00", "2000-02-01 00:00:00", "2000-03-01 00:00:00"]
        );

        let reverse: Vec<String> = range.each(Interval::Month, true).map(fmt).collect();
        assert_eq!(
            reverse,
            vec!["2000-03-31 00:00:00", "2000-02-29 00:00:00", "2000-01-29 00:00:00"]
        );
    }

    #[test]
    fn test_each_is_fused() {
        let range = DateRange::new(at("2000-01-01 00:00:00"), at("2000-01-01 00:00:00")).unwrap();
        let mut days = range.each(Interval::Day, false);
        assert!(days.next().is_some());
        assert!(days.next().is_none());
        assert!(days.next().is_none());
    }

    #[test]
    fn test_each_by_rejects_unknown_interval() {
        let range = DateRange::new(at("2000-01-01 00:00:00"), at("2000-01-03 00:00:00")).unwrap();
        assert!(matches!(
            range.each_by("sub_day", false),
            Err(DateRangeError::InvalidInterval { .. })
        ));
        assert_eq!(range.each_by("day", true).unwrap().count(), 3);
    }

    #[test]
    fn test_serializes_start_and_end() {
        let range = DateRange::new(at("2000-01-01 00:00:00"), at("2000-01-03 00:00:00")).unwrap();
        let json = serde_json::to_value(range).unwrap();
        assert_eq!(json["start"], "2000-01-01T00:00:00");
        assert_eq!(json["end"], "2000-01-03T23:59:59.999999999");
    }
}
