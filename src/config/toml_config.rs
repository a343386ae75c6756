use crate::adapters::clock::SystemClock;
use crate::core::ConfigProvider;
use crate::domain::ports::Clock;
use crate::utils::error::{DateRangeError, Result};
use crate::utils::validation::{self, Validate};
use chrono::Weekday;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub calendar: Option<CalendarConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalendarConfig {
    pub week_starts_on: Option<String>,
    pub reference_now: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DateRangeError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the value of the environment variable. Unset
    /// variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DateRangeError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(week_start) = self.week_starts_on() {
            validation::validate_weekday("calendar.week_starts_on", week_start)?;
        }

        if let Some(reference) = self.reference_now() {
            validation::validate_instant("calendar.reference_now", reference, SystemClock.now())?;
        }

        if let Some(level) = self.log_level() {
            validation::validate_non_empty_string("logging.level", level)?;
        }

        Ok(())
    }

    pub fn week_starts_on(&self) -> Option<&str> {
        self.calendar.as_ref()?.week_starts_on.as_deref()
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref()?.level.as_deref()
    }

    pub fn json_logs(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.json)
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn week_start(&self) -> Weekday {
        self.week_starts_on()
            .and_then(|day| day.trim().parse().ok())
            .unwrap_or(Weekday::Mon)
    }

    fn reference_now(&self) -> Option<&str> {
        self.calendar.as_ref()?.reference_now.as_deref()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[calendar]
week_starts_on = "sunday"
reference_now = "2000-02-01"

[logging]
level = "date_range=debug"
json = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.week_start(), Weekday::Sun);
        assert_eq!(config.reference_now(), Some("2000-02-01"));
        assert_eq!(config.log_level(), Some("date_range=debug"));
        assert!(config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.week_start(), Weekday::Mon);
        assert_eq!(config.reference_now(), None);
        assert!(!config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DATE_RANGE_TEST_REFERENCE", "2010-06-15");

        let toml_content = r#"
[calendar]
reference_now = "${DATE_RANGE_TEST_REFERENCE}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.reference_now(), Some("2010-06-15"));

        std::env::remove_var("DATE_RANGE_TEST_REFERENCE");
    }

    #[test]
    fn test_unset_env_var_is_left_verbatim() {
        let toml_content = r#"
[calendar]
reference_now = "${DATE_RANGE_TEST_NEVER_SET}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.reference_now(), Some("${DATE_RANGE_TEST_NEVER_SET}"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[calendar]
week_starts_on = "someday"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(DateRangeError::InvalidConfigValueError { ref field, .. }) if field == "calendar.week_starts_on"
        ));
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[calendar\nweek_starts_on = 1").unwrap_err();
        assert!(matches!(err, DateRangeError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[calendar]
week_starts_on = "saturday"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.week_start(), Weekday::Sat);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = TomlConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, DateRangeError::IoError(_)));
    }
}
