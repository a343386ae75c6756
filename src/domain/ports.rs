use chrono::{NaiveDateTime, Weekday};

/// Source of the current moment. Everything relative to "now" or "today"
/// goes through this, so resolution can be pinned in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

pub trait ConfigProvider: Send + Sync {
    fn week_start(&self) -> Weekday;
    fn reference_now(&self) -> Option<&str>;
}
