//! Test builders: ergonomic constructors for raw records, clocks, configs
//! and snapshot sources.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use std::path::Path;

use fixrec::config::Config;
use fixrec::{BatchSource, CanonicalTimestamp, MatchReconciler, Odds, RawEventRecord, ReferenceClock, ScrapedRow};

// ---------------------------------------------------------------------------
// RecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`RawEventRecord`] test fixtures.
///
/// # Example
///
/// ```rust
/// let record = RecordBuilder::new("astăzi, 15:30", "FCSB", "Rapid")
///     .odds("2.05", "3.40", "3.60")
///     .build();
/// ```
pub struct RecordBuilder {
    record: RawEventRecord,
}

impl RecordBuilder {
    pub fn new(phrase: &str, team1: &str, team2: &str) -> Self {
        Self {
            record: RawEventRecord::new(phrase, team1, team2),
        }
    }

    pub fn odds(mut self, home: &str, draw: &str, away: &str) -> Self {
        self.record.odds = Odds::new(Some(home.into()), Some(draw.into()), Some(away.into()));
        self
    }

    pub fn build(self) -> RawEventRecord {
        self.record
    }
}

/// Shorthand for a record without odds.
pub fn record(phrase: &str, team1: &str, team2: &str) -> RawEventRecord {
    RecordBuilder::new(phrase, team1, team2).build()
}

// ---------------------------------------------------------------------------
// Clocks and timestamps
// ---------------------------------------------------------------------------

pub fn clock(year: i32, month: u32, day: u32) -> ReferenceClock {
    ReferenceClock::ymd(year, month, day).expect("valid reference date")
}

pub fn reconciler(year: i32, month: u32, day: u32) -> MatchReconciler {
    MatchReconciler::new(clock(year, month, day))
}

pub fn ts(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> CanonicalTimestamp {
    CanonicalTimestamp::new(year, month, day, hour, minute).expect("valid timestamp")
}

// ---------------------------------------------------------------------------
// Config and sources
// ---------------------------------------------------------------------------

/// Defaults with the store directory pointed at `dir`.
pub fn config_in(dir: &Path) -> Config {
    let mut config = Config::defaults();
    config.store.dir = dir.to_path_buf();
    config
}

/// Parse a JSON-lines snapshot into one in-memory batch per line.
pub fn batches(snapshot: &str) -> BatchSource {
    let lines = snapshot.lines().filter(|l| !l.trim().is_empty()).map(|line| {
        match serde_json::from_str::<Vec<ScrapedRow>>(line) {
            Ok(rows) => rows,
            Err(_) => vec![serde_json::from_str::<ScrapedRow>(line).expect("snapshot row")],
        }
    });
    BatchSource::new(lines.collect::<Vec<_>>())
}
