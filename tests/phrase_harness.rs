#![allow(unused)]
//! Date phrase integration harness.
//!
//! # What this covers
//!
//! - **Every grammar**: today/tomorrow tokens, weekday label plus day of
//!   month, `DD.MM`, and fully qualified dates, each resolved against a fixed
//!   reference date. Parameterised with rstest over [`PHRASES`].
//! - **Rejections**: [`UNRECOGNIZED`] phrases fail with
//!   `ParseError::UnrecognizedFormat`; unknown month names and impossible
//!   dates get their own variants.
//! - **Month rollover**: a label day before today lands in the next month,
//!   December into January of the next year.
//! - **Property: canonical text round-trips**: for any valid timestamp, the
//!   `DD/MM/YYYY HH:MM` form parses back to the same value. Verified with
//!   proptest.
//! - **Property: `DD.MM` phrases resolve to their own fields** for every
//!   real calendar day.
//!
//! # What this does NOT cover
//!
//! - Fuzzy or misspelled phrases (rejected by design)
//! - Time zones: every timestamp is naive local bookmaker time
//!
//! # Running
//!
//! ```sh
//! cargo test --test phrase_harness
//! ```

mod common;
use common::*;

use fixrec::{phrase, CanonicalTimestamp, ParseError};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

fn phrase_clock() -> fixrec::ReferenceClock {
    let (y, m, d) = PHRASE_REF;
    clock(y, m, d)
}

// ---------------------------------------------------------------------------
// Grammars
// ---------------------------------------------------------------------------

#[test]
fn corpus_resolves() {
    for (text, expected) in PHRASES {
        let at = phrase::parse(text, &phrase_clock())
            .unwrap_or_else(|e| panic!("{text:?} failed: {e}"));
        assert_canonical(&at, expected);
    }
}

#[rstest]
#[case::today("astăzi, 15:30", (2025, 5, 1), "01/05/2025 15:30")]
#[case::tomorrow("mâine, 15:15", (2025, 4, 30), "01/05/2025 15:15")]
#[case::label_day_next_month("lun. 28, 00:30", (2025, 4, 30), "28/05/2025 00:30")]
#[case::day_month("03.05, 16:00", (2025, 4, 20), "03/05/2025 16:00")]
#[case::december_rollover("sâm. 3, 12:00", (2025, 12, 20), "03/01/2026 12:00")]
#[case::tomorrow_leap_day("Mâine, 10:00", (2024, 2, 28), "29/02/2024 10:00")]
fn resolves_against_reference(
    #[case] text: &str,
    #[case] today: (i32, u32, u32),
    #[case] expected: &str,
) {
    let at = phrase::parse(text, &clock(today.0, today.1, today.2)).unwrap();
    assert_canonical(&at, expected);
}

// ---------------------------------------------------------------------------
// Rejections
// ---------------------------------------------------------------------------

#[test]
fn unrecognized_phrases() {
    for text in UNRECOGNIZED {
        assert!(
            matches!(phrase::parse(text, &phrase_clock()), Err(ParseError::UnrecognizedFormat(_))),
            "{text:?} should be unrecognized"
        );
    }
}

#[test]
fn unknown_month_name() {
    assert_eq!(
        phrase::parse("Sâmbătă, 3 brumar 2025, 19:30", &phrase_clock()),
        Err(ParseError::UnknownMonthName("brumar".into()))
    );
}

#[rstest]
#[case::hour_out_of_range("azi, 24:00")]
#[case::minute_out_of_range("mâine, 10:60")]
#[case::no_such_day("31.04, 10:00")]
#[case::not_a_leap_year("29.02, 10:00")]
fn impossible_values_are_invalid_dates(#[case] text: &str) {
    assert!(matches!(phrase::parse(text, &phrase_clock()), Err(ParseError::InvalidDate(_))));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn canonical_text_round_trips(
        day in 1u32..=28, month in 1u32..=12, year in 2000i32..2100,
        hour in 0u32..24, minute in 0u32..60,
    ) {
        let at = ts(year, month, day, hour, minute);
        let back: CanonicalTimestamp = at.to_string().parse().unwrap();
        prop_assert_eq!(back, at);
    }

    #[test]
    fn day_month_phrase_keeps_its_fields(
        day in 1u32..=28, month in 1u32..=12, hour in 0u32..24, minute in 0u32..60,
    ) {
        let text = format!("{day:02}.{month:02}, {hour}:{minute:02}");
        let at = phrase::parse(&text, &phrase_clock()).unwrap();
        prop_assert_eq!(at, ts(2025, month, day, hour, minute));
    }

    #[test]
    fn parse_never_panics(text in "\\PC{0,40}") {
        let _ = phrase::parse(&text, &phrase_clock());
    }
}
