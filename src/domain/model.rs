use crate::utils::error::DateRangeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named window relative to a reference "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    Year,
    Month,
    Week,
    Day,
    MonthToDate,
    LastMonth,
    WeekToDate,
    YearToDate,
    WeekCommencing,
    NextMonth,
    NextSixMonths,
    MonthCommencing,
    YearCommencing,
}

impl Preset {
    pub const ALL: [Preset; 13] = [
        Preset::Year,
        Preset::Month,
        Preset::Week,
        Preset::Day,
        Preset::MonthToDate,
        Preset::LastMonth,
        Preset::WeekToDate,
        Preset::YearToDate,
        Preset::WeekCommencing,
        Preset::NextMonth,
        Preset::NextSixMonths,
        Preset::MonthCommencing,
        Preset::YearCommencing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Year => "year",
            Preset::Month => "month",
            Preset::Week => "week",
            Preset::Day => "day",
            Preset::MonthToDate => "month_to_date",
            Preset::LastMonth => "last_month",
            Preset::WeekToDate => "week_to_date",
            Preset::YearToDate => "year_to_date",
            Preset::WeekCommencing => "week_commencing",
            Preset::NextMonth => "next_month",
            Preset::NextSixMonths => "next_six_months",
            Preset::MonthCommencing => "month_commencing",
            Preset::YearCommencing => "year_commencing",
        }
    }

    fn vocabulary() -> String {
        Self::ALL
            .iter()
            .map(Preset::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = DateRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|preset| preset.as_str() == s)
            .ok_or_else(|| DateRangeError::InvalidDateRange {
                message: format!("{} must be one of {}", s, Self::vocabulary()),
            })
    }
}

/// Step used when iterating a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interval {
    Day,
    Month,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Day => "day",
            Interval::Month => "month",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = DateRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Interval::Day),
            "month" => Ok(Interval::Month),
            other => Err(DateRangeError::InvalidInterval {
                interval: other.to_string(),
            }),
        }
    }
}
