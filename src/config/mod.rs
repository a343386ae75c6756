pub mod toml_config;

#[cfg(feature = "cli")]
use crate::adapters::clock::SystemClock;
#[cfg(feature = "cli")]
use crate::core::{Clock, ConfigProvider, Interval, Preset};
#[cfg(feature = "cli")]
use crate::utils::error::{DateRangeError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use chrono::{NaiveDateTime, Weekday};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "daterange")]
#[command(about = "Resolve, inspect and iterate day-aligned date ranges")]
pub struct CliConfig {
    #[arg(long, help = "TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, conflicts_with_all = ["start", "end"], help = "Preset such as month_to_date")]
    pub preset: Option<String>,

    #[arg(long, help = "Range start; defaults to today")]
    pub start: Option<String>,

    #[arg(long, help = "Range end; defaults to today")]
    pub end: Option<String>,

    #[arg(long, help = "Reference instant used instead of the current time")]
    pub now: Option<String>,

    #[arg(long, help = "First day of the week, e.g. monday or sun")]
    pub week_start: Option<String>,

    #[arg(long, help = "List the range's instants by day or month")]
    pub each: Option<String>,

    #[arg(long, requires = "each", help = "Iterate from the end of the range")]
    pub reverse: bool,

    #[arg(long, help = "Print JSON instead of text")]
    pub json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Fills settings not given on the command line from a config file.
    pub fn with_defaults_from(mut self, file: &toml_config::TomlConfig) -> Self {
        if self.week_start.is_none() {
            self.week_start = file.week_starts_on().map(str::to_string);
        }
        if self.now.is_none() {
            self.now = file.reference_now().map(str::to_string);
        }
        self
    }

    pub fn preset(&self) -> Result<Option<Preset>> {
        self.preset.as_deref().map(str::parse::<Preset>).transpose()
    }

    pub fn interval(&self) -> Result<Option<Interval>> {
        self.each.as_deref().map(str::parse::<Interval>).transpose()
    }

    pub fn validate_config(&self, now: NaiveDateTime) -> Result<()> {
        if let Some(week_start) = &self.week_start {
            validation::validate_weekday("week_start", week_start)?;
        }
        if let Some(reference) = &self.now {
            validation::validate_instant("now", reference, now)?;
        }
        if self.preset.is_some() && (self.start.is_some() || self.end.is_some()) {
            return Err(DateRangeError::ConfigError {
                message: "--preset cannot be combined with --start or --end".to_string(),
            });
        }
        self.preset()?;
        self.interval()?;
        Ok(())
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn week_start(&self) -> Weekday {
        self.week_start
            .as_deref()
            .and_then(|day| day.trim().parse().ok())
            .unwrap_or(Weekday::Mon)
    }

    fn reference_now(&self) -> Option<&str> {
        self.now.as_deref()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config(SystemClock.now())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::config::toml_config::TomlConfig;

    fn parse(args: &[&str]) -> CliConfig {
        CliConfig::try_parse_from(std::iter::once("daterange").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_preset_and_interval() {
        let config = parse(&["--preset", "last_month", "--each", "day", "--reverse"]);
        assert_eq!(config.preset().unwrap(), Some(Preset::LastMonth));
        assert_eq!(config.interval().unwrap(), Some(Interval::Day));
        assert!(config.reverse);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_preset_conflicts_with_explicit_bounds() {
        let result = CliConfig::try_parse_from(["daterange", "--preset", "day", "--start", "2000-01-01"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_reverse_requires_each() {
        assert!(CliConfig::try_parse_from(["daterange", "--reverse"]).is_err());
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        assert!(parse(&["--preset", "fortnight"]).validate().is_err());
        assert!(matches!(
            parse(&["--each", "sub_day"]).validate(),
            Err(DateRangeError::InvalidInterval { .. })
        ));
        assert!(parse(&["--week-start", "someday"]).validate().is_err());
        assert!(parse(&["--now", "whenever"]).validate().is_err());
    }

    #[test]
    fn test_command_line_overrides_file() {
        let file = TomlConfig::from_toml_str(
            r#"
[calendar]
week_starts_on = "sunday"
reference_now = "2000-02-01"
"#,
        )
        .unwrap();

        let merged = parse(&["--week-start", "tuesday"]).with_defaults_from(&file);
        assert_eq!(merged.week_start(), Weekday::Tue);
        assert_eq!(merged.reference_now(), Some("2000-02-01"));
    }
}
