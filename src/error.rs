use thiserror::Error;

/// Crate specific Errors implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CronError {
    /// Error parsing cron schedule line.
    #[error("invalid cron schedule: {0}")]
    InvalidCronSchedule(String),
    /// Unknown `@keyword` shorthand.
    #[error("unknown schedule keyword: @{0}")]
    InvalidKeyword(String),
    /// Malformed or out of bounds numeric value.
    #[error("invalid digital value: {0}")]
    InvalidDigitalValue(String),
    /// Month or weekday name can't be resolved.
    #[error("invalid mnemonic value: {0}")]
    InvalidMnemonicValue(String),
    /// Range with bounds outside the field domain or reversed.
    #[error("invalid range value: {0}")]
    InvalidRangeValue(String),
    /// Malformed step suffix.
    #[error("invalid repeating pattern: {0}")]
    InvalidRepeatingPattern(String),
    /// Calendar date or time that doesn't exist.
    #[error("invalid date or time: {0}")]
    InvalidDateTime(String),
}
