//! Countdown configuration as submitted by the configuration form

use std::{fmt, num::IntErrorKind, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Largest accepted hours component
pub const MAX_HOURS: u32 = 99;
/// Largest accepted minutes component
pub const MAX_MINUTES: u32 = 59;
/// Largest accepted seconds component
pub const MAX_SECONDS: u32 = 59;
/// Value the form is pre-filled with
pub const DEFAULT_TOTAL_TIME: &str = "00:00:10";

/// Field every time validation message is attached to
pub const TOTAL_TIME_FIELD: &str = "totalTime";

/// JSON names of every form field
pub const FORM_FIELDS: [&str; 3] = [TOTAL_TIME_FIELD, "showLabels", "soundEnabled"];

/// Validation failures for the `totalTime` field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid time format. Please use HH:MM:SS, MM:SS, or SS.")]
    InvalidFormat,
    #[error("'{0}' is not a number. Please use HH:MM:SS, MM:SS, or SS.")]
    InvalidNumber(String),
    #[error("Seconds must be a number between 0 and 59.")]
    SecondsOutOfRange,
    #[error("Minutes must be a number between 0 and 59.")]
    MinutesOutOfRange,
    #[error("Hours must be a number between 0 and 99.")]
    HoursOutOfRange,
}

impl ConfigError {
    /// Form field the message belongs to
    pub fn field(&self) -> &'static str {
        TOTAL_TIME_FIELD
    }
}

/// A validated countdown length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeSpec {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl TimeSpec {
    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self { hours, minutes, seconds }
    }

    pub fn total_seconds(&self) -> u64 {
        u64::from(self.hours) * 3600 + u64::from(self.minutes) * 60 + u64::from(self.seconds)
    }
}

impl fmt::Display for TimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

impl Serialize for TimeSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for TimeSpec {
    type Err = ConfigError;

    /// Parses `SS`, `MM:SS` or `HH:MM:SS`, reading components from the right.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() > 3 {
            return Err(ConfigError::InvalidFormat);
        }

        let values = parts
            .iter()
            .map(|part| parse_component(part))
            .collect::<Result<Vec<i64>, _>>()?;

        // offset 0 is seconds, 1 minutes, 2 hours
        let from_end = |offset: usize| {
            values
                .len()
                .checked_sub(offset + 1)
                .map_or(0, |index| values[index])
        };

        let seconds = unit_in_range(from_end(0), MAX_SECONDS, ConfigError::SecondsOutOfRange)?;
        let minutes = unit_in_range(from_end(1), MAX_MINUTES, ConfigError::MinutesOutOfRange)?;
        let hours = unit_in_range(from_end(2), MAX_HOURS, ConfigError::HoursOutOfRange)?;

        Ok(Self::new(hours, minutes, seconds))
    }
}

fn parse_component(raw: &str) -> Result<i64, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    match trimmed.parse::<i64>() {
        Ok(value) => Ok(value),
        // out-of-range integers are still numbers; the unit check rejects them
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Ok(i64::MAX),
        Err(e) if *e.kind() == IntErrorKind::NegOverflow => Ok(i64::MIN),
        Err(_) => Err(ConfigError::InvalidNumber(trimmed.to_string())),
    }
}

fn unit_in_range(value: i64, max: u32, err: ConfigError) -> Result<u32, ConfigError> {
    u32::try_from(value)
        .ok()
        .filter(|v| *v <= max)
        .ok_or(err)
}

fn default_total_time() -> String {
    DEFAULT_TOTAL_TIME.to_string()
}

/// Raw form submission, before validation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigForm {
    #[serde(default = "default_total_time")]
    pub total_time: String,
    #[serde(default)]
    pub show_labels: bool,
    #[serde(default)]
    pub sound_enabled: bool,
}

impl Default for ConfigForm {
    fn default() -> Self {
        Self {
            total_time: default_total_time(),
            show_labels: false,
            sound_enabled: false,
        }
    }
}

impl ConfigForm {
    pub fn validate(&self) -> Result<CountdownConfig, ConfigError> {
        Ok(CountdownConfig {
            time: self.total_time.parse()?,
            show_labels: self.show_labels,
            sound_enabled: self.sound_enabled,
        })
    }
}

/// Validated configuration handed to the countdown view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountdownConfig {
    #[serde(rename = "totalTime")]
    pub time: TimeSpec,
    pub show_labels: bool,
    pub sound_enabled: bool,
}

impl CountdownConfig {
    pub fn new(time: TimeSpec) -> Self {
        Self {
            time,
            show_labels: false,
            sound_enabled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_components_from_the_right() {
        let cases = vec![
            ("10", Ok(TimeSpec::new(0, 0, 10))),
            ("5", Ok(TimeSpec::new(0, 0, 5))),
            ("02:03", Ok(TimeSpec::new(0, 2, 3))),
            ("1:2:3", Ok(TimeSpec::new(1, 2, 3))),
            ("00:00:10", Ok(TimeSpec::new(0, 0, 10))),
            ("99:59:59", Ok(TimeSpec::new(99, 59, 59))),
            ("0", Ok(TimeSpec::new(0, 0, 0))),
            (" 1 : 30 ", Ok(TimeSpec::new(0, 1, 30))),
        ];

        for (input, expected) in cases {
            assert_eq!(input.parse::<TimeSpec>(), expected, "Failed for input: {:?}", input);
        }
    }

    #[test]
    fn empty_components_count_as_zero() {
        assert_eq!("".parse::<TimeSpec>(), Ok(TimeSpec::default()));
        assert_eq!("5:".parse::<TimeSpec>(), Ok(TimeSpec::new(0, 5, 0)));
        assert_eq!("::7".parse::<TimeSpec>(), Ok(TimeSpec::new(0, 0, 7)));
    }

    #[test]
    fn rejects_invalid_input() {
        let cases = vec![
            ("1:2:3:4", ConfigError::InvalidFormat),
            ("1:00:00:00", ConfigError::InvalidFormat),
            ("abc", ConfigError::InvalidNumber("abc".to_string())),
            ("1:x:3", ConfigError::InvalidNumber("x".to_string())),
            ("60", ConfigError::SecondsOutOfRange),
            ("-1", ConfigError::SecondsOutOfRange),
            ("60:00", ConfigError::MinutesOutOfRange),
            ("100:00:00", ConfigError::HoursOutOfRange),
            ("-1:00:00", ConfigError::HoursOutOfRange),
        ];

        for (input, expected) in cases {
            assert_eq!(input.parse::<TimeSpec>(), Err(expected), "Failed for input: {:?}", input);
        }
    }

    #[test]
    fn seconds_are_checked_before_minutes_and_hours() {
        assert_eq!("100:60:60".parse::<TimeSpec>(), Err(ConfigError::SecondsOutOfRange));
        assert_eq!("100:60:00".parse::<TimeSpec>(), Err(ConfigError::MinutesOutOfRange));
    }

    #[test]
    fn huge_integers_fail_their_unit_range() {
        assert_eq!(
            "99999999999999999999".parse::<TimeSpec>(),
            Err(ConfigError::SecondsOutOfRange)
        );
        assert_eq!(
            "99999999999999999999:00".parse::<TimeSpec>(),
            Err(ConfigError::MinutesOutOfRange)
        );
        assert_eq!(
            "-99999999999999999999:00:00".parse::<TimeSpec>(),
            Err(ConfigError::HoursOutOfRange)
        );
    }

    #[test]
    fn total_seconds() {
        assert_eq!(TimeSpec::new(1, 2, 3).total_seconds(), 3723);
        assert_eq!(TimeSpec::new(99, 59, 59).total_seconds(), 359_999);
        assert_eq!(TimeSpec::default().total_seconds(), 0);
    }

    #[test]
    fn form_defaults_and_validation() {
        let form: ConfigForm = serde_json::from_str("{}").unwrap();
        assert_eq!(form, ConfigForm::default());

        let config = form.validate().unwrap();
        assert_eq!(config, CountdownConfig::new(TimeSpec::new(0, 0, 10)));

        let form: ConfigForm =
            serde_json::from_str(r#"{"totalTime":"1:02:03","showLabels":true,"soundEnabled":true}"#)
                .unwrap();
        let config = form.validate().unwrap();
        assert_eq!(config.time, TimeSpec::new(1, 2, 3));
        assert!(config.show_labels);
        assert!(config.sound_enabled);
    }

    #[test]
    fn config_serializes_canonical_time() {
        let config = CountdownConfig::new(TimeSpec::new(0, 2, 3));
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(
            json,
            r#"{"totalTime":"00:02:03","showLabels":false,"soundEnabled":false}"#
        );
    }

    #[test]
    fn errors_carry_form_messages() {
        assert_eq!(ConfigError::HoursOutOfRange.field(), "totalTime");
        assert_eq!(
            ConfigError::SecondsOutOfRange.to_string(),
            "Seconds must be a number between 0 and 59."
        );
    }
}
