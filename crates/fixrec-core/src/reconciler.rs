//! Reconciler: turns a lazy stream of raw records into identities, then
//! either finds one targeted fixture or deduplicates the whole stream.
//!
//! ```text
//! RawEventRecord ──► resolve ──► EventIdentity ──┬──► find     (first match, short-circuit)
//!                                                └──► collect  (seen-set, every new identity)
//! ```
//!
//! A record that fails to resolve is skipped, logged and counted in the
//! [`ScanReport`]; it never ends a scan.

use std::collections::HashSet;

use crate::error::{Field, LookupError, RecordError, StoreError};
use crate::identity::{EventIdentity, FixtureQuery};
use crate::normalizer::NormalizedName;
use crate::phrase;
use crate::store::{PersistedRecord, RecordSink};
use crate::types::{RawEventRecord, ReferenceClock};

/// A raw record together with the identity derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub identity: EventIdentity,
    pub record: RawEventRecord,
}

impl Resolved {
    pub fn to_persisted(&self) -> PersistedRecord {
        PersistedRecord::from_raw(self.identity.at, &self.record)
    }
}

/// A record that was skipped, with its 0-based arrival position.
#[derive(Debug, Clone, PartialEq)]
pub struct Skipped {
    pub position: usize,
    pub record: RawEventRecord,
    pub error: RecordError,
}

/// Counters and warnings gathered during one scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanReport {
    pub scanned: usize,
    pub accepted: usize,
    pub duplicates: usize,
    pub skipped: Vec<Skipped>,
}

/// Successful targeted lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup {
    pub found: Resolved,
    /// 0-based arrival position of the match.
    pub position: usize,
    pub report: ScanReport,
}

// ---------------------------------------------------------------------------
// MatchReconciler
// ---------------------------------------------------------------------------

/// Shared core every bookmaker adapter delegates to.
#[derive(Debug, Clone, Copy)]
pub struct MatchReconciler {
    clock: ReferenceClock,
}

impl MatchReconciler {
    pub fn new(clock: ReferenceClock) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> ReferenceClock {
        self.clock
    }

    /// Derive the identity of one record.
    pub fn resolve(&self, record: &RawEventRecord) -> Result<EventIdentity, RecordError> {
        let (team1, team2) = names(record)?;
        if record.date_time_phrase.trim().is_empty() {
            return Err(RecordError::MissingField(Field::DateTimePhrase));
        }
        let at = phrase::parse(&record.date_time_phrase, &self.clock)?;
        Ok(EventIdentity { at, team1, team2 })
    }

    /// Scan in arrival order and return the first record matching `query`.
    ///
    /// Stops at the first hit. When nothing matches, the error is
    /// [`LookupError::Malformed`] if some record carried the queried team
    /// pair but could not be resolved, and [`LookupError::NotFound`] otherwise.
    pub fn find<I>(&self, records: I, query: &FixtureQuery) -> Result<Lookup, LookupError>
    where
        I: IntoIterator<Item = RawEventRecord>,
    {
        let mut report = ScanReport::default();
        let mut malformed: Option<(RawEventRecord, RecordError)> = None;

        for (position, record) in records.into_iter().enumerate() {
            report.scanned += 1;
            match self.resolve(&record) {
                Ok(identity) if query.matches(&identity) => {
                    report.accepted = 1;
                    tracing::info!(%identity, position, "fixture found");
                    return Ok(Lookup {
                        found: Resolved { identity, record },
                        position,
                        report,
                    });
                }
                Ok(_) => {}
                Err(error) => {
                    if malformed.is_none() {
                        if let Ok((team1, team2)) = names(&record) {
                            if query.matches_teams(&team1, &team2) {
                                malformed = Some((record.clone(), error.clone()));
                            }
                        }
                    }
                    skip(&mut report, position, record, error);
                }
            }
        }

        tracing::info!(scanned = report.scanned, skipped = report.skipped.len(), "fixture not found");
        match malformed {
            Some((record, reason)) => Err(LookupError::Malformed {
                record: Box::new(record),
                reason,
            }),
            None => Err(LookupError::NotFound {
                scanned: report.scanned,
            }),
        }
    }

    /// Deduplicate `records` lazily with a fresh seen-set.
    pub fn collect<I>(&self, records: I) -> BulkCollection<I::IntoIter>
    where
        I: IntoIterator<Item = RawEventRecord>,
    {
        self.collect_with_seen(records, HashSet::new())
    }

    /// Like [`collect`](Self::collect), but identities in `seen` count as
    /// already emitted.
    pub fn collect_with_seen<I>(&self, records: I, seen: HashSet<EventIdentity>) -> BulkCollection<I::IntoIter>
    where
        I: IntoIterator<Item = RawEventRecord>,
    {
        BulkCollection {
            reconciler: *self,
            records: records.into_iter(),
            seen,
            position: 0,
            report: ScanReport::default(),
        }
    }

    /// Drive a bulk collection to the end, appending each new record to `sink`.
    ///
    /// A sink failure aborts the scan and is returned; records are never
    /// dropped silently because persistence failed.
    pub fn collect_into<I, S>(
        &self,
        records: I,
        seen: HashSet<EventIdentity>,
        sink: &mut S,
    ) -> Result<ScanReport, StoreError>
    where
        I: IntoIterator<Item = RawEventRecord>,
        S: RecordSink + ?Sized,
    {
        let mut collection = self.collect_with_seen(records, seen);
        for resolved in collection.by_ref() {
            sink.append(&resolved.to_persisted())?;
        }
        let report = collection.into_report();
        tracing::info!(
            scanned = report.scanned,
            accepted = report.accepted,
            duplicates = report.duplicates,
            skipped = report.skipped.len(),
            "bulk collection finished"
        );
        Ok(report)
    }
}

fn names(record: &RawEventRecord) -> Result<(NormalizedName, NormalizedName), RecordError> {
    let team1 = NormalizedName::new(&record.team1);
    if team1.is_empty() {
        return Err(RecordError::MissingField(Field::Team1));
    }
    let team2 = NormalizedName::new(&record.team2);
    if team2.is_empty() {
        return Err(RecordError::MissingField(Field::Team2));
    }
    Ok((team1, team2))
}

fn skip(report: &mut ScanReport, position: usize, record: RawEventRecord, error: RecordError) {
    tracing::warn!(
        position,
        phrase = %record.date_time_phrase,
        team1 = %record.team1,
        team2 = %record.team2,
        "skipping record: {error}"
    );
    report.skipped.push(Skipped {
        position,
        record,
        error,
    });
}

// ---------------------------------------------------------------------------
// BulkCollection
// ---------------------------------------------------------------------------

/// Iterator over the records of a stream whose identity has not been seen
/// before in this collection. Owns its seen-set; dropping it discards the set.
#[derive(Debug)]
pub struct BulkCollection<I> {
    reconciler: MatchReconciler,
    records: I,
    seen: HashSet<EventIdentity>,
    position: usize,
    report: ScanReport,
}

impl<I> BulkCollection<I> {
    pub fn report(&self) -> &ScanReport {
        &self.report
    }

    pub fn into_report(self) -> ScanReport {
        self.report
    }
}

impl<I> Iterator for BulkCollection<I>
where
    I: Iterator<Item = RawEventRecord>,
{
    type Item = Resolved;

    fn next(&mut self) -> Option<Resolved> {
        for record in self.records.by_ref() {
            let position = self.position;
            self.position += 1;
            self.report.scanned += 1;

            match self.reconciler.resolve(&record) {
                Ok(identity) => {
                    if self.seen.contains(&identity) {
                        self.report.duplicates += 1;
                        tracing::debug!(%identity, position, "duplicate dropped");
                        continue;
                    }
                    self.seen.insert(identity.clone());
                    self.report.accepted += 1;
                    tracing::debug!(%identity, position, "accepted");
                    return Some(Resolved { identity, record });
                }
                Err(error) => skip(&mut self.report, position, record, error),
            }
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
