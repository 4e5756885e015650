//! Superbet listing rows.
//!
//! Fields: `date` (the capitalized label span), `label` (the whole card
//! label, used when `date` is absent), `team1`, `team2`. Odds cells carry
//! their `1`/`X`/`2` name.

use fixrec_core::{Bookmaker, Odds, Outcome, RawEventRecord};

use crate::{ScrapedRow, SourceAdapter};

#[derive(Debug, Clone, Copy, Default)]
pub struct Superbet;

impl SourceAdapter for Superbet {
    fn bookmaker(&self) -> Bookmaker {
        Bookmaker::Superbet
    }

    fn extract(&self, row: &ScrapedRow) -> RawEventRecord {
        let mut phrase = row.text("date");
        if phrase.is_empty() {
            phrase = row.text("label");
        }
        RawEventRecord::new(phrase, row.text("team1"), row.text("team2"))
            .with_odds(labelled_odds(row))
    }
}

/// Odds from cells named `1`, `X`, `2`; unnamed cells are ignored.
pub(crate) fn labelled_odds(row: &ScrapedRow) -> Odds {
    let mut odds = Odds::default();
    for cell in &row.odds {
        if let Some(outcome) = cell.label.as_deref().and_then(Outcome::from_label) {
            odds.set(outcome, crate::clean(&cell.value));
        }
    }
    odds
}
