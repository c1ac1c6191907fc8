use config::{Config, Environment};
use thiserror::Error;

use crate::reading_time::ReadingTimeConfig;

pub const ENV_PREFIX: &str = "PROSE";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("words per minute must be a positive number, got {0}")]
    InvalidSpeed(f64),
    #[error("min_minutes must be at least 1, got {0}")]
    ZeroMinimum(u32),
    #[error("min_minutes ({min}) is greater than max_minutes ({max})")]
    InvertedBounds { min: u32, max: u32 },
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),
}

/// Reading-time settings from `PROSE_*` environment variables over the defaults.
pub fn load() -> Result<ReadingTimeConfig, SettingsError> {
    let defaults = ReadingTimeConfig::default();
    let settings = Config::builder()
        .set_default("words_per_minute", defaults.words_per_minute)?
        .set_default("min_minutes", defaults.min_minutes as i64)?
        .set_default("max_minutes", defaults.max_minutes as i64)?
        .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
        .build()?;
    let config: ReadingTimeConfig = settings.try_deserialize()?;
    validate(&config)?;
    Ok(config)
}

pub fn validate(config: &ReadingTimeConfig) -> Result<(), SettingsError> {
    if !config.words_per_minute.is_finite() || config.words_per_minute <= 0.0 {
        return Err(SettingsError::InvalidSpeed(config.words_per_minute));
    }
    if config.min_minutes == 0 {
        return Err(SettingsError::ZeroMinimum(config.min_minutes));
    }
    if config.min_minutes > config.max_minutes {
        return Err(SettingsError::InvertedBounds {
            min: config.min_minutes,
            max: config.max_minutes,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate(&ReadingTimeConfig::default()).is_ok());
    }

    #[test]
    fn rejects_bad_speed() {
        for wpm in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            let config = ReadingTimeConfig { words_per_minute: wpm, ..Default::default() };
            assert!(matches!(validate(&config), Err(SettingsError::InvalidSpeed(_))));
        }
    }

    #[test]
    fn rejects_zero_minimum() {
        let config = ReadingTimeConfig { min_minutes: 0, ..Default::default() };
        assert!(matches!(validate(&config), Err(SettingsError::ZeroMinimum(0))));
    }

    #[test]
    fn rejects_inverted_bounds() {
        let config = ReadingTimeConfig { min_minutes: 30, max_minutes: 10, ..Default::default() };
        let err = validate(&config).unwrap_err();
        assert_eq!(err.to_string(), "min_minutes (30) is greater than max_minutes (10)");
    }
}
