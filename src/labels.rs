//! Code/label mapping for the categorical columns.
//!
//! The hourly dataset encodes month, weekday, season and weather as small
//! integers; the cleaned variant of the same dataset carries the label text
//! instead. Both are accepted on input and views always report labels.

pub const MONTH_LABELS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Display order of the weekly view.
pub const WEEKDAY_LABELS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub const SEASON_LABELS: [&str; 4] = ["Spring", "Summer", "Fall", "Winter"];

pub const WEATHER_LABELS: [&str; 4] = ["Clear", "Mist", "Light Rain/Snow", "Heavy Rain/Snow"];

/// Label used for a code outside its documented range.
pub const UNKNOWN_LABEL: &str = "Unknown";

const MONTH_PREFIXES: [&[&str]; 12] = [
    &["jan"],
    &["feb"],
    &["mar"],
    &["apr"],
    &["may"],
    &["jun"],
    &["jul"],
    &["aug"],
    &["sep"],
    &["oct"],
    &["nov"],
    &["dec"],
];

const WEEKDAY_PREFIXES: [&[&str]; 7] = [
    &["mon"],
    &["tue"],
    &["wed"],
    &["thu"],
    &["fri"],
    &["sat"],
    &["sun"],
];

const SEASON_PREFIXES: [&[&str]; 4] = [&["spring"], &["summer"], &["fall", "autumn"], &["winter"]];

const WEATHER_PREFIXES: [&[&str]; 4] = [
    &["clear"],
    &["mist", "cloudy"],
    &["light"],
    &["heavy", "severe"],
];

/// Which weekday the code `0` stands for.
///
/// The UCI hourly dataset uses `0 = Sunday`; some derived copies use
/// `0 = Monday`. Both map onto the same Monday..Sunday display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum WeekdayOrigin {
    #[default]
    Sunday,
    Monday,
}

impl WeekdayOrigin {
    /// Position of a weekday code in [`WEEKDAY_LABELS`].
    pub fn position(self, code: u8) -> Option<usize> {
        if code > 6 {
            return None;
        }
        let pos = match self {
            WeekdayOrigin::Monday => code,
            WeekdayOrigin::Sunday => (code + 6) % 7,
        };
        Some(pos as usize)
    }

    pub fn label(self, code: u8) -> Option<&'static str> {
        self.position(code).map(|pos| WEEKDAY_LABELS[pos])
    }

    /// Inverse of [`WeekdayOrigin::position`].
    pub fn code_at(self, position: usize) -> Option<u8> {
        if position > 6 {
            return None;
        }
        let pos = position as u8;
        Some(match self {
            WeekdayOrigin::Monday => pos,
            WeekdayOrigin::Sunday => (pos + 1) % 7,
        })
    }

    /// Parses a weekday column value: a code `0..=6` or a day name.
    pub fn parse(self, value: &str) -> Option<u8> {
        if let Ok(code) = value.parse::<u8>() {
            return (code <= 6).then_some(code);
        }
        position_by_prefix(&WEEKDAY_PREFIXES, value).and_then(|pos| self.code_at(pos))
    }
}

pub fn month_label(code: u8) -> Option<&'static str> {
    one_based(&MONTH_LABELS, code)
}

pub fn season_label(code: u8) -> Option<&'static str> {
    one_based(&SEASON_LABELS, code)
}

pub fn weather_label(code: u8) -> Option<&'static str> {
    one_based(&WEATHER_LABELS, code)
}

/// Parses a month column value: a code `1..=12` or a month name.
pub fn parse_month(value: &str) -> Option<u8> {
    parse_one_based(&MONTH_PREFIXES, value)
}

pub fn parse_season(value: &str) -> Option<u8> {
    parse_one_based(&SEASON_PREFIXES, value)
}

pub fn parse_weather(value: &str) -> Option<u8> {
    parse_one_based(&WEATHER_PREFIXES, value)
}

fn one_based(labels: &[&'static str], code: u8) -> Option<&'static str> {
    let idx = code.checked_sub(1)? as usize;
    labels.get(idx).copied()
}

fn parse_one_based(prefixes: &[&[&str]], value: &str) -> Option<u8> {
    if let Ok(code) = value.parse::<u8>() {
        return (1..=prefixes.len() as u8).contains(&code).then_some(code);
    }
    position_by_prefix(prefixes, value).map(|pos| pos as u8 + 1)
}

fn position_by_prefix(prefixes: &[&[&str]], value: &str) -> Option<usize> {
    let value = value.trim().to_ascii_lowercase();
    if value.is_empty() {
        return None;
    }
    prefixes
        .iter()
        .position(|group| group.iter().any(|p| value.starts_with(p)))
}
