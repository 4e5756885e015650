//! Cross-bookmaker odds comparison.
//!
//! Records from several stores are joined on [`EventIdentity`]; for every
//! fixture quoted by at least two bookmakers the best price per outcome is
//! picked and turned into a stake plan. An arbitrage exists when the implied
//! probabilities of the best prices sum to less than one.

use std::collections::BTreeMap;

use crate::identity::EventIdentity;
use crate::store::PersistedRecord;
use crate::types::{Bookmaker, Odds, Outcome};

/// Highest price on offer for one outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestPrice {
    pub outcome: Outcome,
    pub bookmaker: Bookmaker,
    pub price: f64,
}

/// Amount to place on one outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stake {
    pub outcome: Outcome,
    pub bookmaker: Bookmaker,
    pub price: f64,
    pub amount: f64,
    pub potential_return: f64,
    /// Share of the investment, in percent.
    pub share_pct: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StakePlan {
    pub stakes: Vec<Stake>,
    pub arbitrage: bool,
    pub expected_profit: f64,
    pub expected_roi_pct: f64,
    pub implied_sum: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Opportunity {
    pub identity: EventIdentity,
    pub bookmakers: Vec<Bookmaker>,
    pub plan: StakePlan,
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Best price per outcome across `quotes`. `None` unless every outcome has
/// at least one usable price. Ties keep the earlier quote.
pub fn best_prices(quotes: &[(Bookmaker, &Odds)]) -> Option<[BestPrice; 3]> {
    let best = |outcome: Outcome| {
        quotes
            .iter()
            .filter_map(|(bookmaker, odds)| {
                odds.price(outcome).map(|price| BestPrice {
                    outcome,
                    bookmaker: *bookmaker,
                    price,
                })
            })
            .fold(None, |acc: Option<BestPrice>, cur| match acc {
                Some(b) if b.price >= cur.price => Some(b),
                _ => Some(cur),
            })
    };
    Some([best(Outcome::Home)?, best(Outcome::Draw)?, best(Outcome::Away)?])
}

/// Split `investment` across `best` in proportion to implied probability.
pub fn stake_plan(best: &[BestPrice], investment: f64) -> StakePlan {
    let implied: Vec<f64> = best.iter().map(|b| 1.0 / b.price).collect();
    let implied_sum: f64 = implied.iter().sum();
    let arbitrage = implied_sum < 1.0;

    let stakes: Vec<Stake> = best
        .iter()
        .zip(&implied)
        .map(|(b, p)| {
            let share = if arbitrage { p / implied_sum } else { *p };
            let amount = share * investment;
            Stake {
                outcome: b.outcome,
                bookmaker: b.bookmaker,
                price: b.price,
                amount: round2(amount),
                potential_return: round2(amount * b.price),
                share_pct: round2(share * 100.0),
            }
        })
        .collect();

    let expected_profit = if arbitrage {
        // Every outcome returns the same amount.
        stakes.first().map_or(0.0, |s| s.potential_return - investment)
    } else {
        stakes
            .iter()
            .map(|s| (s.potential_return - investment) / s.price)
            .sum()
    };

    StakePlan {
        stakes,
        arbitrage,
        expected_profit: round2(expected_profit),
        expected_roi_pct: if investment > 0.0 { round2(expected_profit / investment * 100.0) } else { 0.0 },
        implied_sum: (implied_sum * 10_000.0).round() / 10_000.0,
    }
}

/// Join `books` on identity and plan stakes for every fixture that at least
/// two bookmakers quote with a full 1X2 market. Within one book the last row
/// for an identity wins. Sorted best opportunity first.
pub fn compare_books(books: &[(Bookmaker, Vec<PersistedRecord>)], investment: f64) -> Vec<Opportunity> {
    let mut joined: BTreeMap<EventIdentity, BTreeMap<Bookmaker, &Odds>> = BTreeMap::new();
    for (bookmaker, records) in books {
        for record in records {
            joined
                .entry(record.identity())
                .or_default()
                .insert(*bookmaker, &record.odds);
        }
    }

    let mut opportunities: Vec<Opportunity> = joined
        .into_iter()
        .filter(|(_, quotes)| quotes.len() >= 2)
        .filter_map(|(identity, quotes)| {
            let quotes: Vec<(Bookmaker, &Odds)> = quotes.into_iter().collect();
            let best = best_prices(&quotes)?;
            Some(Opportunity {
                identity,
                bookmakers: quotes.iter().map(|(b, _)| *b).collect(),
                plan: stake_plan(&best, investment),
            })
        })
        .collect();

    opportunities.sort_by(|a, b| a.plan.implied_sum.total_cmp(&b.plan.implied_sum));
    tracing::debug!(count = opportunities.len(), "compared fixtures across bookmakers");
    opportunities
}
