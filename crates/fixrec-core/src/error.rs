//! Error types for every fixrec-core layer.
//!
//! Per-record failures ([`ParseError`], [`RecordError`]) are recoverable: the
//! reconciler records them and keeps scanning. [`StoreError`] is fatal to the
//! run. [`LookupError`] separates "fixture absent" from "fixture present but
//! unreadable".

use std::path::PathBuf;

use crate::types::RawEventRecord;

/// A date phrase could not be resolved to a [`CanonicalTimestamp`](crate::CanonicalTimestamp).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unrecognized date format: {0:?}")]
    UnrecognizedFormat(String),
    #[error("unknown month name: {0:?}")]
    UnknownMonthName(String),
    /// The phrase has a known shape but names a date or time that does not exist.
    #[error("date out of range: {0:?}")]
    InvalidDate(String),
}

/// Raw record field names, as reported in [`RecordError::MissingField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    DateTimePhrase,
    Team1,
    Team2,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::DateTimePhrase => write!(f, "date/time phrase"),
            Field::Team1 => write!(f, "team1"),
            Field::Team2 => write!(f, "team2"),
        }
    }
}

/// Why a single raw record could not be turned into an identity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("missing field: {0}")]
    MissingField(Field),
    #[error(transparent)]
    Phrase(#[from] ParseError),
}

/// Outcome of a targeted lookup that did not produce a match.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// The sequence ended and no record matched the query.
    #[error("fixture not found after scanning {scanned} records")]
    NotFound { scanned: usize },
    /// A record with the queried team pair was seen, but its date phrase
    /// could not be resolved.
    #[error("fixture {} vs {} is listed but malformed: {reason}", .record.team1, .record.team2)]
    Malformed {
        record: Box<RawEventRecord>,
        reason: RecordError,
    },
}

/// Failures of the durable CSV store. Always fatal to the current run.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store I/O on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("store {} has header {found:?}, expected {expected:?}", .path.display())]
    HeaderMismatch {
        path: PathBuf,
        expected: Vec<String>,
        found: Vec<String>,
    },
    #[error("invalid store row at line {line}: {reason}")]
    InvalidRow { line: usize, reason: String },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}
