//! Date phrase parser: resolves bookmaker date/time text into a
//! [`CanonicalTimestamp`] relative to a [`ReferenceClock`].
//!
//! Grammars are tried in order, cheapest relative forms first:
//!
//! | # | Shape                               | Example                       |
//! |---|-------------------------------------|-------------------------------|
//! | 1 | `today, HH:MM`                      | `astăzi, 15:30`               |
//! | 2 | `tomorrow, HH:MM`                   | `Mâine, 15:15`                |
//! | 3 | `DD.MM, HH:MM`                      | `03.05, 16:00`                |
//! | 4 | `<label> DD, HH:MM`                 | `lun. 28, 00:30`              |
//! | 5 | `<label> DD <month> YYYY, HH:MM`    | `sâmbătă, 3 mai 2025, 16:00`  |
//!
//! Matching is case-insensitive and whitespace around the comma is ignored.
//! The label in grammars 4 and 5 is never checked against the computed date.

use std::sync::LazyLock;

use chrono::{Datelike, Days};
use regex::{Captures, Regex};

use crate::error::ParseError;
use crate::timestamp::CanonicalTimestamp;
use crate::types::ReferenceClock;

// ---------------------------------------------------------------------------
// Locale tables
// ---------------------------------------------------------------------------

/// Romanian month names, full and abbreviated.
static MONTHS: phf::Map<&'static str, u32> = phf::phf_map! {
    "ianuarie" => 1, "ian" => 1,
    "februarie" => 2, "feb" => 2,
    "martie" => 3, "mar" => 3,
    "aprilie" => 4, "apr" => 4,
    "mai" => 5,
    "iunie" => 6, "iun" => 6,
    "iulie" => 7, "iul" => 7,
    "august" => 8, "aug" => 8,
    "septembrie" => 9, "sep" => 9, "sept" => 9,
    "octombrie" => 10, "oct" => 10,
    "noiembrie" => 11, "noi" => 11, "nov" => 11,
    "decembrie" => 12, "dec" => 12,
};

/// Month number for a locale month token, if it is in the table.
pub fn month_number(token: &str) -> Option<u32> {
    MONTHS.get(token.trim().trim_end_matches('.').to_lowercase().as_str()).copied()
}

// ---------------------------------------------------------------------------
// Grammars
// ---------------------------------------------------------------------------

fn grammar(pattern: &str) -> Regex {
    Regex::new(pattern).expect("date phrase grammar must be a valid regex")
}

static TODAY: LazyLock<Regex> =
    LazyLock::new(|| grammar(r"^(?:astăzi|astazi|azi)\s*,\s*([0-9]{1,2}):([0-9]{2})$"));

static TOMORROW: LazyLock<Regex> =
    LazyLock::new(|| grammar(r"^(?:mâine|maine)\s*,\s*([0-9]{1,2}):([0-9]{2})$"));

static DAY_MONTH: LazyLock<Regex> = LazyLock::new(|| {
    grammar(r"^([0-9]{1,2})\.([0-9]{1,2})\s*,\s*([0-9]{1,2}):([0-9]{2})$")
});

static LABEL_DAY: LazyLock<Regex> = LazyLock::new(|| {
    grammar(r"^([^0-9,.]+)\.?\s*([0-9]{1,2})\s*,\s*([0-9]{1,2}):([0-9]{2})$")
});

static FULLY_QUALIFIED: LazyLock<Regex> = LazyLock::new(|| {
    grammar(
        r"^([^0-9,.]+?)\.?\s*,?\s*([0-9]{1,2})\s+([^0-9\s,.]+)\.?\s+([0-9]{4})\s*,\s*([0-9]{1,2}):([0-9]{2})$",
    )
});

/// Resolve `phrase` against `clock.today`.
///
/// Fails with [`ParseError::UnrecognizedFormat`] when no grammar matches,
/// [`ParseError::UnknownMonthName`] when grammar 5 names a month outside the
/// locale table, and [`ParseError::InvalidDate`] when a grammar matches but
/// the resulting date or time does not exist.
pub fn parse(phrase: &str, clock: &ReferenceClock) -> Result<CanonicalTimestamp, ParseError> {
    let trimmed = phrase.trim();
    let low = trimmed.to_lowercase();
    let today = clock.today;
    let invalid = || ParseError::InvalidDate(trimmed.to_string());

    if let Some(caps) = TODAY.captures(&low) {
        let (hour, minute) = (number(&caps, 1), number(&caps, 2));
        return CanonicalTimestamp::on(today, hour, minute).ok_or_else(invalid);
    }

    if let Some(caps) = TOMORROW.captures(&low) {
        let tomorrow = today.checked_add_days(Days::new(1)).ok_or_else(invalid)?;
        let (hour, minute) = (number(&caps, 1), number(&caps, 2));
        return CanonicalTimestamp::on(tomorrow, hour, minute).ok_or_else(invalid);
    }

    if let Some(caps) = DAY_MONTH.captures(&low) {
        let (day, month) = (number(&caps, 1), number(&caps, 2));
        let (hour, minute) = (number(&caps, 3), number(&caps, 4));
        return CanonicalTimestamp::new(today.year(), month, day, hour, minute).ok_or_else(invalid);
    }

    if let Some(caps) = LABEL_DAY.captures(&low) {
        let day = number(&caps, 2);
        let (hour, minute) = (number(&caps, 3), number(&caps, 4));
        // Listings are near-future: a day before today belongs to next month.
        let (mut year, mut month) = (today.year(), today.month());
        if day < today.day() {
            if month == 12 {
                month = 1;
                year += 1;
            } else {
                month += 1;
            }
        }
        return CanonicalTimestamp::new(year, month, day, hour, minute).ok_or_else(invalid);
    }

    if let Some(caps) = FULLY_QUALIFIED.captures(&low) {
        let token = &caps[3];
        let month =
            month_number(token).ok_or_else(|| ParseError::UnknownMonthName(token.to_string()))?;
        let day = number(&caps, 2);
        let year = number(&caps, 4) as i32;
        let (hour, minute) = (number(&caps, 5), number(&caps, 6));
        return CanonicalTimestamp::new(year, month, day, hour, minute).ok_or_else(invalid);
    }

    Err(ParseError::UnrecognizedFormat(trimmed.to_string()))
}

/// Capture group `i`, which every grammar restricts to 1–4 ASCII digits.
fn number(caps: &Captures<'_>, i: usize) -> u32 {
    caps[i].bytes().fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
