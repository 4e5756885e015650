//! Spin listing rows.
//!
//! Fields: `date` and `hour` are separate spans joined as `date, hour`;
//! `team1`, `team2`. Odds cells are labelled like Superbet's. The site
//! renders `–` where a value is missing.

use fixrec_core::{Bookmaker, RawEventRecord};

use crate::superbet::labelled_odds;
use crate::{ScrapedRow, SourceAdapter};

#[derive(Debug, Clone, Copy, Default)]
pub struct Spin;

impl SourceAdapter for Spin {
    fn bookmaker(&self) -> Bookmaker {
        Bookmaker::Spin
    }

    fn extract(&self, row: &ScrapedRow) -> RawEventRecord {
        let date = row.text("date");
        let hour = row.text("hour");
        let phrase = match (date.is_empty(), hour.is_empty()) {
            (false, false) => format!("{date}, {hour}"),
            (false, true) => date,
            // An hour alone cannot be placed on a day.
            (true, _) => String::new(),
        };
        RawEventRecord::new(phrase, row.text("team1"), row.text("team2"))
            .with_odds(labelled_odds(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixrec_core::Odds;
    use pretty_assertions::assert_eq;

    #[test]
    fn joins_date_and_hour() {
        let row = ScrapedRow::new()
            .field("date", "Azi")
            .field("hour", "21:45")
            .field("team1", "Dinamo")
            .field("team2", "Petrolul")
            .odd(Some("1"), "1.95")
            .odd(Some("X"), "–")
            .odd(Some("2"), "4.10");
        let record = Spin.extract(&row);
        assert_eq!(record.date_time_phrase, "Azi, 21:45");
        assert_eq!(record.odds, Odds::new(Some("1.95".into()), None, Some("4.10".into())));
    }

    #[test]
    fn placeholder_hour_keeps_date_only() {
        let row = ScrapedRow::new().field("date", "12.05").field("hour", "–");
        assert_eq!(Spin.extract(&row).date_time_phrase, "12.05");
    }
}
