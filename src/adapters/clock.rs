use crate::core::calendar;
use crate::domain::ports::Clock;
use crate::utils::error::Result;
use chrono::{Local, NaiveDateTime};

/// Wall-clock time in the process's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: NaiveDateTime,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// Freezes the clock at a parsed instant. Keywords such as `today` are
    /// taken relative to the system clock.
    pub fn parse(input: &str) -> Result<Self> {
        calendar::parse(input, SystemClock.now()).map(Self::new)
    }

    /// Snapshot of the system clock.
    pub fn snapshot() -> Self {
        Self::new(SystemClock.now())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now
    }
}
