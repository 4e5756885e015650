//! Minute-precision calendar timestamps and their single boundary text form.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Text form used wherever a timestamp crosses the crate boundary.
pub const TEXT_FORMAT: &str = "%d/%m/%Y %H:%M";

/// A fully resolved fixture start time: year, month, day, hour and minute.
///
/// Seconds are always zero, so two timestamps compare equal exactly when
/// they name the same minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalTimestamp(NaiveDateTime);

impl CanonicalTimestamp {
    /// Build from calendar fields. `None` if any field is out of range.
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        Self::on(date, hour, minute)
    }

    /// `date` at `hour:minute`. `None` if the time is out of range.
    pub fn on(date: NaiveDate, hour: u32, minute: u32) -> Option<Self> {
        let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
        Some(Self(date.and_time(time)))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }
}

impl From<CanonicalTimestamp> for NaiveDateTime {
    fn from(ts: CanonicalTimestamp) -> Self {
        ts.0
    }
}

impl std::fmt::Display for CanonicalTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(TEXT_FORMAT))
    }
}

/// Strict parse of `DD/MM/YYYY HH:MM`.
impl std::str::FromStr for CanonicalTimestamp {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDateTime::parse_from_str(s.trim(), TEXT_FORMAT).map(Self)
    }
}
