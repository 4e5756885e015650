//! Store: append-only CSV file of accepted fixtures.
//!
//! Rows are never updated or deleted. The header is written once, when the
//! file is created; reopening an existing store only checks it. Every
//! appended row is flushed before `append` returns, so an interrupted run
//! keeps everything it accepted.

use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};

use crate::csv;
use crate::error::StoreError;
use crate::identity::EventIdentity;
use crate::timestamp::CanonicalTimestamp;
use crate::types::{Odds, RawEventRecord};

/// Fixed column order of every store.
pub const BASE_COLUMNS: [&str; 6] = ["Data", "team1", "team2", "odd_1", "odd_X", "odd_2"];
pub const UPDATED_AT_COLUMN: &str = "updated_at";

/// Which optional columns a store carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Columns {
    #[default]
    Base,
    WithUpdatedAt,
}

impl Columns {
    pub fn header(self) -> Vec<&'static str> {
        let mut header = BASE_COLUMNS.to_vec();
        if self == Columns::WithUpdatedAt {
            header.push(UPDATED_AT_COLUMN);
        }
        header
    }

    /// The layout whose header is exactly `row`.
    pub fn from_header<S: AsRef<str>>(row: &[S]) -> Option<Self> {
        [Columns::Base, Columns::WithUpdatedAt].into_iter().find(|columns| {
            let header = columns.header();
            header.len() == row.len() && header.iter().zip(row).all(|(h, f)| *h == f.as_ref())
        })
    }
}

// ---------------------------------------------------------------------------
// PersistedRecord
// ---------------------------------------------------------------------------

/// One accepted fixture as written to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedRecord {
    pub at: CanonicalTimestamp,
    /// Names as scraped; the identity is derived from them on demand.
    pub team1: String,
    pub team2: String,
    pub odds: Odds,
    pub updated_at: Option<DateTime<Utc>>,
}

impl PersistedRecord {
    pub fn from_raw(at: CanonicalTimestamp, raw: &RawEventRecord) -> Self {
        Self {
            at,
            team1: raw.team1.trim().to_string(),
            team2: raw.team2.trim().to_string(),
            odds: raw.odds.clone(),
            updated_at: None,
        }
    }

    pub fn stamped(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    pub fn identity(&self) -> EventIdentity {
        EventIdentity::new(self.at, &self.team1, &self.team2)
    }

    fn to_row(&self, columns: Columns) -> Vec<String> {
        let price = |p: &Option<String>| p.clone().unwrap_or_default();
        let mut row = vec![
            self.at.to_string(),
            self.team1.clone(),
            self.team2.clone(),
            price(&self.odds.home),
            price(&self.odds.draw),
            price(&self.odds.away),
        ];
        if columns == Columns::WithUpdatedAt {
            let ts = self.updated_at.unwrap_or_else(Utc::now);
            row.push(ts.to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        row
    }

    fn from_row(row: &[String], columns: Columns, line: usize) -> Result<Self, StoreError> {
        let invalid = |reason: String| StoreError::InvalidRow { line, reason };
        let width = columns.header().len();
        if row.len() != width {
            return Err(invalid(format!("expected {width} fields, found {}", row.len())));
        }
        let at: CanonicalTimestamp = row[0]
            .parse()
            .map_err(|e| invalid(format!("bad Data {:?}: {e}", row[0])))?;
        let price = |s: &String| (!s.trim().is_empty()).then(|| s.trim().to_string());
        let updated_at = match row.get(BASE_COLUMNS.len()).map(|s| s.trim()) {
            Some(s) if !s.is_empty() => Some(
                DateTime::parse_from_rfc3339(s)
                    .map_err(|e| invalid(format!("bad updated_at {s:?}: {e}")))?
                    .with_timezone(&Utc),
            ),
            _ => None,
        };
        Ok(Self {
            at,
            team1: row[1].clone(),
            team2: row[2].clone(),
            odds: Odds::new(price(&row[3]), price(&row[4]), price(&row[5])),
            updated_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Sinks
// ---------------------------------------------------------------------------

/// Destination for accepted records.
pub trait RecordSink {
    fn append(&mut self, record: &PersistedRecord) -> Result<(), StoreError>;
}

impl RecordSink for Vec<PersistedRecord> {
    fn append(&mut self, record: &PersistedRecord) -> Result<(), StoreError> {
        self.push(record.clone());
        Ok(())
    }
}

impl<S: RecordSink + ?Sized> RecordSink for &mut S {
    fn append(&mut self, record: &PersistedRecord) -> Result<(), StoreError> {
        (**self).append(record)
    }
}

/// Single-writer, append-only CSV store.
#[derive(Debug)]
pub struct CsvStore {
    path: PathBuf,
    columns: Columns,
    writer: BufWriter<File>,
}

impl CsvStore {
    /// Open `path` for appending, creating it (and its parent directory) with
    /// a header row if it does not exist or is empty.
    pub fn open(path: impl AsRef<Path>, columns: Columns) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
            }
        }

        let existing = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => return Err(StoreError::io(&path, e)),
        };

        let expected = columns.header();
        let needs_header = match parse(&existing)?.into_iter().next() {
            None => true,
            Some(found) if found == expected => false,
            Some(found) => {
                return Err(StoreError::HeaderMismatch {
                    path,
                    expected: expected.iter().map(|s| s.to_string()).collect(),
                    found,
                })
            }
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| StoreError::io(&path, e))?;
        let mut writer = BufWriter::new(file);

        // Rows are newline-terminated; an unterminated last row would swallow
        // the first append.
        if !needs_header && !existing.ends_with(['\n', '\r']) {
            writer
                .write_all(b"\n")
                .and_then(|()| writer.flush())
                .map_err(|e| StoreError::io(&path, e))?;
            tracing::warn!(path = %path.display(), "terminated unfinished last row");
        }

        if needs_header {
            csv::write_row(&mut writer, &expected)
                .and_then(|()| writer.flush())
                .map_err(|e| StoreError::io(&path, e))?;
            tracing::info!(path = %path.display(), "created store");
        }

        Ok(Self {
            path,
            columns,
            writer,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn columns(&self) -> Columns {
        self.columns
    }

    /// Identities of every row already in the store. Unreadable rows are
    /// skipped with a warning.
    pub fn identities(&self) -> Result<HashSet<EventIdentity>, StoreError> {
        let text = fs::read_to_string(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        let mut seen = HashSet::new();
        for (line, row) in data_rows(parse(&text)?) {
            match PersistedRecord::from_row(&row, self.columns, line) {
                Ok(record) => {
                    seen.insert(record.identity());
                }
                Err(e) => tracing::warn!(path = %self.path.display(), "skipping row: {e}"),
            }
        }
        Ok(seen)
    }

    /// Flush and release the file, reporting any final I/O error.
    pub fn close(mut self) -> Result<(), StoreError> {
        self.writer.flush().map_err(|e| StoreError::io(&self.path, e))
    }
}

impl RecordSink for CsvStore {
    fn append(&mut self, record: &PersistedRecord) -> Result<(), StoreError> {
        csv::write_row(&mut self.writer, &record.to_row(self.columns))
            .and_then(|()| self.writer.flush())
            .map_err(|e| StoreError::io(&self.path, e))
    }
}

impl Drop for CsvStore {
    fn drop(&mut self) {
        if let Err(e) = self.writer.flush() {
            tracing::warn!(path = %self.path.display(), "flush on drop failed: {e}");
        }
    }
}

/// Read every data row of the store at `path`. The header decides whether
/// rows carry `updated_at`; an empty file holds no rows.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<PersistedRecord>, StoreError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    let rows = parse(&text)?;
    let Some(header) = rows.first() else {
        return Ok(Vec::new());
    };
    let columns = Columns::from_header(header).ok_or_else(|| StoreError::HeaderMismatch {
        path: path.to_path_buf(),
        expected: Columns::Base.header().iter().map(|s| s.to_string()).collect(),
        found: header.clone(),
    })?;
    data_rows(rows)
        .map(|(line, row)| PersistedRecord::from_row(&row, columns, line))
        .collect()
}

fn parse(text: &str) -> Result<Vec<Vec<String>>, StoreError> {
    csv::parse_rows(text).map_err(|e| StoreError::InvalidRow {
        line: e.row,
        reason: e.to_string(),
    })
}

/// Rows after the header, paired with their 1-based row number.
fn data_rows(rows: Vec<Vec<String>>) -> impl Iterator<Item = (usize, Vec<String>)> {
    rows.into_iter().enumerate().skip(1).map(|(i, row)| (i + 1, row))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(h: u32, team1: &str, team2: &str) -> PersistedRecord {
        let at = CanonicalTimestamp::new(2025, 5, 1, h, 0).unwrap();
        PersistedRecord::from_raw(at, &RawEventRecord::new("", team1, team2))
    }

    #[test]
    fn header_written_once_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/superbet.csv");

        let mut store = CsvStore::open(&path, Columns::Base).unwrap();
        store.append(&record(15, "FCSB", "Rapid")).unwrap();
        store.close().unwrap();

        let mut store = CsvStore::open(&path, Columns::Base).unwrap();
        store.append(&record(18, "CFR Cluj", "Dinamo")).unwrap();
        drop(store);

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "Data,team1,team2,odd_1,odd_X,odd_2\n\
             01/05/2025 15:00,FCSB,Rapid,,,\n\
             01/05/2025 18:00,CFR Cluj,Dinamo,,,\n"
        );
    }

    #[test]
    fn mismatched_header_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("maxbet.csv");
        fs::write(&path, "date,team1,team2\n").unwrap();

        let err = CsvStore::open(&path, Columns::Base).unwrap_err();
        assert!(matches!(err, StoreError::HeaderMismatch { .. }), "{err}");
    }

    #[test]
    fn updated_at_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spin.csv");
        let stamp = DateTime::parse_from_rfc3339("2025-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);

        let mut store = CsvStore::open(&path, Columns::WithUpdatedAt).unwrap();
        store.append(&record(20, "Petrolul", "Farul").stamped(stamp)).unwrap();
        store.close().unwrap();

        let rows = load(&path).unwrap();
        assert_eq!(rows, vec![record(20, "Petrolul", "Farul").stamped(stamp)]);
    }

    #[test]
    fn identities_are_rederived_from_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("superbet.csv");
        let mut store = CsvStore::open(&path, Columns::Base).unwrap();
        store.append(&record(15, "Oţelul", "Rapid")).unwrap();

        let seen = store.identities().unwrap();
        assert!(seen.contains(&record(15, "OȚELUL", "rapid").identity()));
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn columns_from_header() {
        assert_eq!(Columns::from_header(&Columns::Base.header()), Some(Columns::Base));
        assert_eq!(
            Columns::from_header(&Columns::WithUpdatedAt.header()),
            Some(Columns::WithUpdatedAt)
        );
        assert_eq!(Columns::from_header(&["Data", "team1", "team2"]), None);
    }

    #[test]
    fn base_row_with_extra_field_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("superbet.csv");
        fs::write(
            &path,
            "Data,team1,team2,odd_1,odd_X,odd_2\n01/05/2025 15:00,A,B,,,,2025-05-01T12:00:00Z\n",
        )
        .unwrap();
        assert!(matches!(load(&path), Err(StoreError::InvalidRow { line: 2, .. })));
    }

    #[test]
    fn load_reports_bad_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "Data,team1,team2,odd_1,odd_X,odd_2\nastăzi,a,b,,,\n").unwrap();
        assert!(matches!(load(&path), Err(StoreError::InvalidRow { line: 2, .. })));
    }
}
