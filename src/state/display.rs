//! Display digits derived from the remaining time

use serde::Serialize;

fn tens(value: u64) -> u8 {
    ((value / 10) % 10) as u8
}

fn ones(value: u64) -> u8 {
    (value % 10) as u8
}

/// Digit pairs and unit visibility for one remaining-time value.
///
/// Derived from `remaining_seconds` alone, rounded down to whole seconds.
/// Hours are hidden under an hour; minutes are hidden under a minute
/// unless hours are still shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Digits {
    pub hours_tens: u8,
    pub hours_ones: u8,
    pub minutes_tens: u8,
    pub minutes_ones: u8,
    pub seconds_tens: u8,
    pub seconds_ones: u8,
    pub show_hours_unit: bool,
    pub show_minutes_unit: bool,
}

impl Digits {
    pub fn from_remaining(remaining_seconds: f64) -> Self {
        let whole_seconds = remaining_seconds.max(0.0).floor() as u64;
        let hours = whole_seconds / 3600;
        let minutes = (whole_seconds % 3600) / 60;
        let seconds = whole_seconds % 60;

        Self {
            hours_tens: tens(hours),
            hours_ones: ones(hours),
            minutes_tens: tens(minutes),
            minutes_ones: ones(minutes),
            seconds_tens: tens(seconds),
            seconds_ones: ones(seconds),
            show_hours_unit: hours > 0,
            show_minutes_unit: minutes > 0 || hours > 0,
        }
    }

    pub fn hours(&self) -> u8 {
        self.hours_tens * 10 + self.hours_ones
    }

    pub fn minutes(&self) -> u8 {
        self.minutes_tens * 10 + self.minutes_ones
    }

    pub fn seconds(&self) -> u8 {
        self.seconds_tens * 10 + self.seconds_ones
    }

    /// How many unit groups have collapsed: 0 with hours shown, 1 with
    /// minutes and seconds, 2 with seconds only.
    pub fn emphasis(&self) -> u8 {
        match (self.show_hours_unit, self.show_minutes_unit) {
            (true, _) => 0,
            (false, true) => 1,
            (false, false) => 2,
        }
    }
}

/// Everything the display layer needs after a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayFrame {
    #[serde(flatten)]
    pub digits: Digits,
    pub emphasis: u8,
    pub running: bool,
    pub remaining_seconds: f64,
    pub show_labels: bool,
    pub completed: bool,
}

impl DisplayFrame {
    pub fn new(remaining_seconds: f64, running: bool, show_labels: bool, completed: bool) -> Self {
        let digits = Digits::from_remaining(remaining_seconds);
        Self {
            digits,
            emphasis: digits.emphasis(),
            running,
            remaining_seconds,
            show_labels,
            completed,
        }
    }
}
