//! Operations behind the `fixrec` subcommands.
//!
//! Each function takes an already loaded [`Config`] and returns plain data;
//! printing and exit codes stay in `main.rs`.

use std::collections::HashSet;

use anyhow::Context;
use chrono::NaiveDate;

use fixrec_core::arbitrage::{self, Opportunity};
use fixrec_core::config::Config;
use fixrec_core::{
    store, Bookmaker, CsvStore, FixtureQuery, Lookup, MatchReconciler, PersistedRecord, RecordSink,
    ReferenceClock, ScanReport,
};
use fixrec_feeds::{adapter_for, Feed, RowSource};

/// Reference date: explicit override, then `scan.today`, then the local date.
pub fn reference_clock(config: &Config, today: Option<NaiveDate>) -> anyhow::Result<ReferenceClock> {
    let date = match today {
        Some(date) => date,
        None => config
            .scan
            .today()?
            .unwrap_or_else(|| chrono::Local::now().date_naive()),
    };
    Ok(ReferenceClock::new(date))
}

/// Drain `source` through the bookmaker's adapter into its store, keeping
/// only the first record per identity.
pub fn collect<S: RowSource>(
    config: &Config,
    clock: ReferenceClock,
    bookmaker: Bookmaker,
    source: S,
) -> anyhow::Result<ScanReport> {
    let path = config.store.path_for(bookmaker);
    let mut sink = CsvStore::open(&path, config.store.columns())
        .with_context(|| format!("opening {bookmaker} store"))?;

    let seen = if config.store.seed_seen_from_store {
        let seen = sink.identities().context("reading existing identities")?;
        tracing::info!(%bookmaker, seeded = seen.len(), "seeded seen-set from store");
        seen
    } else {
        HashSet::new()
    };

    let mut feed = Feed::new(source, adapter_for(bookmaker));
    let report = MatchReconciler::new(clock)
        .collect_into(feed.by_ref(), seen, &mut sink)
        .with_context(|| format!("appending to {}", path.display()))?;
    sink.close()
        .with_context(|| format!("closing {}", path.display()))?;

    let stats = feed.finish().with_context(|| format!("{bookmaker} feed failed"))?;
    tracing::info!(%bookmaker, polls = stats.polls, rows = stats.rows, "feed drained");
    Ok(report)
}

/// First record in `source` matching `query`. With `save`, the match is
/// appended to the bookmaker's store.
pub fn find<S: RowSource>(
    config: &Config,
    clock: ReferenceClock,
    bookmaker: Bookmaker,
    source: S,
    query: &FixtureQuery,
    save: bool,
) -> anyhow::Result<Lookup> {
    let mut feed = Feed::new(source, adapter_for(bookmaker));
    let outcome = MatchReconciler::new(clock).find(feed.by_ref(), query);

    let lookup = match outcome {
        Ok(lookup) => lookup,
        Err(e) => {
            // A stream cut short by the source is not a clean miss.
            feed.finish().with_context(|| format!("{bookmaker} feed failed"))?;
            return Err(e).with_context(|| format!("looking up fixture in {bookmaker}"));
        }
    };

    if save {
        let path = config.store.path_for(bookmaker);
        let mut sink = CsvStore::open(&path, config.store.columns())
            .with_context(|| format!("opening {bookmaker} store"))?;
        sink.append(&lookup.found.to_persisted())
            .with_context(|| format!("appending to {}", path.display()))?;
        sink.close()
            .with_context(|| format!("closing {}", path.display()))?;
    }
    Ok(lookup)
}

/// Load every bookmaker store present under `store.dir` and compare them.
pub fn compare(config: &Config) -> anyhow::Result<Vec<Opportunity>> {
    let mut books: Vec<(Bookmaker, Vec<PersistedRecord>)> = Vec::new();
    for bookmaker in Bookmaker::ALL {
        let path = config.store.path_for(bookmaker);
        if !path.exists() {
            tracing::debug!(%bookmaker, path = %path.display(), "no store, skipping");
            continue;
        }
        let records = store::load(&path).with_context(|| format!("loading {bookmaker} store"))?;
        books.push((bookmaker, records));
    }
    Ok(arbitrage::compare_books(&books, config.arbitrage.investment))
}
