use thiserror::Error;

#[derive(Error, Debug)]
pub enum DateRangeError {
    #[error("Invalid date range: {message}")]
    InvalidDateRange { message: String },

    #[error("Invalid interval '{interval}': must be one of day, month")]
    InvalidInterval { interval: String },

    #[error("Invalid date '{input}': {reason}")]
    InvalidDate { input: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl DateRangeError {
    pub fn invalid_date(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDate {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error came from the caller's input rather than from the
    /// environment (files, configuration).
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDateRange { .. } | Self::InvalidInterval { .. } | Self::InvalidDate { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, DateRangeError>;
