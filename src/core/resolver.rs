use crate::adapters::clock::SystemClock;
use crate::core::calendar::{self, end_of_day, start_of_day};
use crate::core::date_range::DateRange;
use crate::domain::model::Preset;
use crate::domain::ports::{Clock, ConfigProvider};
use crate::utils::error::Result;
use chrono::{NaiveDateTime, Weekday};

/// Builds ranges relative to a clock.
///
/// Holds the calendar conventions that "now"-relative construction depends
/// on: where "now" comes from and which weekday starts a week.
#[derive(Debug, Clone)]
pub struct RangeResolver<C: Clock> {
    clock: C,
    week_start: Weekday,
}

impl RangeResolver<SystemClock> {
    pub fn system() -> Self {
        Self::new(SystemClock)
    }
}

impl<C: Clock> RangeResolver<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            week_start: Weekday::Mon,
        }
    }

    pub fn from_config<P: ConfigProvider>(clock: C, config: &P) -> Self {
        Self::new(clock).with_week_start(config.week_start())
    }

    pub fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn parse(&self, input: &str) -> Result<NaiveDateTime> {
        calendar::parse(input, self.clock.now())
    }

    /// Range between two optional date strings.
    ///
    /// A missing start or end is midnight today. A given start is moved to
    /// midnight and a given end to the end of its day before the range is
    /// validated.
    pub fn create(&self, start: Option<&str>, end: Option<&str>) -> Result<DateRange> {
        let today = start_of_day(self.clock.now());

        let start = match start {
            Some(value) => start_of_day(self.parse(value)?),
            None => today,
        };
        let end = match end {
            Some(value) => end_of_day(self.parse(value)?),
            None => today,
        };

        tracing::debug!("Creating range from {} to {}", start, end);
        DateRange::new(start, end)
    }

    /// Resolves a preset given by token. Unknown tokens fail before `now` is
    /// looked at.
    pub fn resolve_token(&self, token: &str, now: Option<&str>) -> Result<DateRange> {
        let preset = token.parse::<Preset>()?;
        self.resolve(preset, now)
    }

    /// Resolves `preset` against `now`, or against the clock when `now` is
    /// `None`.
    pub fn resolve(&self, preset: Preset, now: Option<&str>) -> Result<DateRange> {
        let now = match now {
            Some(value) => self.parse(value)?,
            None => self.clock.now(),
        };
        self.resolve_at(preset, now)
    }

    pub fn resolve_at(&self, preset: Preset, now: NaiveDateTime) -> Result<DateRange> {
        let now = end_of_day(now);
        let week_start = self.week_start;

        let (start, end) = match preset {
            Preset::Year => (start_of_day(calendar::add_years(now, -1)?), now),
            Preset::Month => (start_of_day(calendar::add_months(now, -1)?), now),
            Preset::MonthCommencing => (calendar::start_of_month(now)?, calendar::end_of_month(now)?),
            Preset::LastMonth => {
                let this_month = calendar::start_of_month(now)?;
                (
                    calendar::add_months(this_month, -1)?,
                    end_of_day(calendar::add_days(this_month, -1)?),
                )
            }
            Preset::MonthToDate => (calendar::start_of_month(now)?, now),
            Preset::YearToDate => (calendar::start_of_year(now)?, now),
            Preset::YearCommencing => (calendar::start_of_year(now)?, calendar::end_of_year(now)?),
            Preset::Week => (start_of_day(calendar::add_weeks(now, -1)?), now),
            Preset::WeekToDate => (calendar::start_of_week(now, week_start)?, now),
            Preset::WeekCommencing => (
                calendar::start_of_week(now, week_start)?,
                calendar::end_of_week(now, week_start)?,
            ),
            Preset::Day => (start_of_day(now), now),
            Preset::NextMonth => (start_of_day(now), end_of_day(calendar::add_months(now, 1)?)),
            Preset::NextSixMonths => (start_of_day(now), end_of_day(calendar::add_months(now, 6)?)),
        };

        tracing::debug!("Resolved {} at {} to {} - {}", preset, now, start, end);
        DateRange::new(start, end)
    }
}
