//! MaxBet listing rows.
//!
//! The time cell is a two-line block, `27/04` over `20:30`, or a single
//! `lun. 28, 00:30` style phrase. Competitors are one block with one team per
//! line. Odds buttons are unlabeled; the first three are 1, X, 2 in order.

use fixrec_core::{Bookmaker, Odds, Outcome, RawEventRecord};

use crate::{ScrapedRow, SourceAdapter};

#[derive(Debug, Clone, Copy, Default)]
pub struct Maxbet;

impl SourceAdapter for Maxbet {
    fn bookmaker(&self) -> Bookmaker {
        Bookmaker::Maxbet
    }

    fn extract(&self, row: &ScrapedRow) -> RawEventRecord {
        let (team1, team2) = competitors(&row.text("competitors"));
        let mut odds = Odds::default();
        for (outcome, cell) in Outcome::ALL.into_iter().zip(&row.odds) {
            odds.set(outcome, crate::clean(&cell.value));
        }
        RawEventRecord::new(time_phrase(&row.text("time")), team1, team2).with_odds(odds)
    }
}

/// Rewrite the time block into a `DD.MM, HH:MM` style phrase.
pub fn time_phrase(block: &str) -> String {
    let lines: Vec<&str> = block.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    match lines.as_slice() {
        [] => String::new(),
        [first, ..] if first.contains(',') => first.to_string(),
        [date, time, ..] => format!("{}, {}", date.replace('/', "."), time),
        [single] => match single.rsplit_once(' ') {
            Some((date, time)) => format!("{}, {}", date.replace('/', "."), time),
            None => single.to_string(),
        },
    }
}

/// Split the competitors block. Anything other than exactly two lines
/// leaves both names blank.
fn competitors(block: &str) -> (String, String) {
    let lines: Vec<&str> = block.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    match lines.as_slice() {
        [team1, team2] => (team1.to_string(), team2.to_string()),
        _ => (String::new(), String::new()),
    }
}
