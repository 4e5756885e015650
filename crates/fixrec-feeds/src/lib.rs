//! fixrec-feeds: bookmaker source adapters for fixrec.
//!
//! The browser-driving scraper is an external collaborator. It hands over
//! what it sees one poll at a time as [`ScrapedRow`]s (named text fields plus
//! odds cells); a [`RowSource`] yields those batches and a [`SourceAdapter`]
//! turns each row into a [`RawEventRecord`]. [`Feed`] glues the two into the
//! lazy record stream the reconciler consumes.
//!
//! Adapters only extract. Parsing, identity and deduplication live in
//! `fixrec-core`.

use std::collections::{BTreeMap, VecDeque};
use std::path::PathBuf;

use fixrec_core::{Bookmaker, RawEventRecord};
use serde::Deserialize;

pub mod maxbet;
pub mod snapshot;
pub mod spin;
pub mod superbet;

pub use snapshot::SnapshotSource;

// ---------------------------------------------------------------------------
// Scraped rows
// ---------------------------------------------------------------------------

/// Text extracted from one listing element, keyed by the role it plays on
/// the page (`"team1"`, `"date"`, …). Keys are adapter specific.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ScrapedRow {
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    #[serde(default)]
    pub odds: Vec<OddCell>,
}

/// One odds button: an optional outcome label and the displayed price.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OddCell {
    #[serde(default)]
    pub label: Option<String>,
    pub value: String,
}

impl ScrapedRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn odd(mut self, label: Option<&str>, value: impl Into<String>) -> Self {
        self.odds.push(OddCell {
            label: label.map(str::to_string),
            value: value.into(),
        });
        self
    }

    /// Cleaned text of `key`, empty when absent or a placeholder.
    pub fn text(&self, key: &str) -> String {
        self.fields.get(key).map(|s| clean(s)).unwrap_or_default()
    }
}

/// Placeholders bookmakers render where a value is missing.
const PLACEHOLDERS: &[&str] = &["–", "-", "—", "N/A", "Unknown"];

/// Trim, collapse inner whitespace on each line, and blank out placeholders.
pub fn clean(text: &str) -> String {
    let lines: Vec<String> = text
        .lines()
        .map(|l| l.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|l| !l.is_empty())
        .collect();
    let joined = lines.join("\n");
    if PLACEHOLDERS.contains(&joined.as_str()) {
        String::new()
    } else {
        joined
    }
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Turns a scraped row of one bookmaker into a raw record. Never fails:
/// anything missing is left blank for the reconciler to report.
pub trait SourceAdapter {
    fn bookmaker(&self) -> Bookmaker;
    fn extract(&self, row: &ScrapedRow) -> RawEventRecord;
}

impl<A: SourceAdapter + ?Sized> SourceAdapter for Box<A> {
    fn bookmaker(&self) -> Bookmaker {
        (**self).bookmaker()
    }

    fn extract(&self, row: &ScrapedRow) -> RawEventRecord {
        (**self).extract(row)
    }
}

/// The adapter for `bookmaker`.
pub fn adapter_for(bookmaker: Bookmaker) -> Box<dyn SourceAdapter> {
    match bookmaker {
        Bookmaker::Superbet => Box::new(superbet::Superbet),
        Bookmaker::Maxbet => Box::new(maxbet::Maxbet),
        Bookmaker::Spin => Box::new(spin::Spin),
    }
}

/// Polled source of newly visible rows. `Ok(None)` means the page bottom was
/// reached and nothing more will load.
pub trait RowSource {
    fn next_batch(&mut self) -> Result<Option<Vec<ScrapedRow>>, FeedError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("feed I/O on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("snapshot line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// In-memory batches, one per poll.
#[derive(Debug, Clone, Default)]
pub struct BatchSource {
    batches: VecDeque<Vec<ScrapedRow>>,
}

impl BatchSource {
    pub fn new(batches: impl IntoIterator<Item = Vec<ScrapedRow>>) -> Self {
        Self {
            batches: batches.into_iter().collect(),
        }
    }
}

impl RowSource for BatchSource {
    fn next_batch(&mut self) -> Result<Option<Vec<ScrapedRow>>, FeedError> {
        Ok(self.batches.pop_front())
    }
}

// ---------------------------------------------------------------------------
// Feed
// ---------------------------------------------------------------------------

/// Lazy stream of raw records: polls `source` only when the rows of the
/// previous batch are used up.
///
/// A source error ends the stream; call [`Feed::finish`] afterwards to
/// surface it.
#[derive(Debug)]
pub struct Feed<S, A> {
    source: S,
    adapter: A,
    pending: VecDeque<ScrapedRow>,
    polls: usize,
    rows: usize,
    done: bool,
    error: Option<FeedError>,
}

/// Counters for a drained feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedStats {
    pub polls: usize,
    pub rows: usize,
}

impl<S: RowSource, A: SourceAdapter> Feed<S, A> {
    pub fn new(source: S, adapter: A) -> Self {
        Self {
            source,
            adapter,
            pending: VecDeque::new(),
            polls: 0,
            rows: 0,
            done: false,
            error: None,
        }
    }

    pub fn bookmaker(&self) -> Bookmaker {
        self.adapter.bookmaker()
    }

    /// Consume the feed, returning the source error that ended it, if any.
    pub fn finish(self) -> Result<FeedStats, FeedError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(FeedStats {
                polls: self.polls,
                rows: self.rows,
            }),
        }
    }
}

impl<S: RowSource, A: SourceAdapter> Iterator for Feed<S, A> {
    type Item = RawEventRecord;

    fn next(&mut self) -> Option<RawEventRecord> {
        loop {
            if let Some(row) = self.pending.pop_front() {
                self.rows += 1;
                return Some(self.adapter.extract(&row));
            }
            if self.done {
                return None;
            }
            match self.source.next_batch() {
                Ok(Some(batch)) => {
                    self.polls += 1;
                    tracing::debug!(
                        bookmaker = %self.adapter.bookmaker(),
                        poll = self.polls,
                        rows = batch.len(),
                        "polled source"
                    );
                    self.pending.extend(batch);
                }
                Ok(None) => self.done = true,
                Err(e) => {
                    tracing::error!(bookmaker = %self.adapter.bookmaker(), "feed stopped: {e}");
                    self.error = Some(e);
                    self.done = true;
                }
            }
        }
    }
}
