//! JSON-lines snapshot source.
//!
//! Each non-blank line is either one row object or an array of rows. A line
//! is one poll, so an array line reproduces a batch that became visible
//! after a scroll. Lines are read lazily.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{FeedError, RowSource, ScrapedRow};

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotLine {
    Batch(Vec<ScrapedRow>),
    Row(ScrapedRow),
}

pub struct SnapshotSource<R> {
    path: PathBuf,
    lines: std::io::Lines<R>,
    line: usize,
}

impl SnapshotSource<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FeedError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| FeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::with_path(BufReader::new(file), path))
    }
}

impl<R: BufRead> SnapshotSource<R> {
    pub fn from_reader(reader: R) -> Self {
        Self::with_path(reader, Path::new("<reader>"))
    }

    fn with_path(reader: R, path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            lines: reader.lines(),
            line: 0,
        }
    }
}

impl<R: BufRead> RowSource for SnapshotSource<R> {
    fn next_batch(&mut self) -> Result<Option<Vec<ScrapedRow>>, FeedError> {
        for text in self.lines.by_ref() {
            self.line += 1;
            let text = text.map_err(|source| FeedError::Io {
                path: self.path.clone(),
                source,
            })?;
            if text.trim().is_empty() {
                continue;
            }
            let parsed: SnapshotLine = serde_json::from_str(&text).map_err(|source| FeedError::Json {
                line: self.line,
                source,
            })?;
            return Ok(Some(match parsed {
                SnapshotLine::Batch(rows) => rows,
                SnapshotLine::Row(row) => vec![row],
            }));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SNAPSHOT: &str = r#"{"fields":{"team1":"FCSB","team2":"Rapid"}}

[{"fields":{"team1":"A"}},{"fields":{"team1":"B"},"odds":[{"label":"1","value":"2.0"}]}]
"#;

    #[test]
    fn rows_and_batches() {
        let mut source = SnapshotSource::from_reader(SNAPSHOT.as_bytes());
        assert_eq!(source.next_batch().unwrap().unwrap().len(), 1);
        let batch = source.next_batch().unwrap().unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[1].odds[0].label.as_deref(), Some("1"));
        assert!(source.next_batch().unwrap().is_none());
    }

    #[test]
    fn bad_line_reports_line_number() {
        let mut source = SnapshotSource::from_reader("{}\nnot json\n".as_bytes());
        assert!(source.next_batch().unwrap().is_some());
        match source.next_batch() {
            Err(FeedError::Json { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected json error, got {other:?}"),
        }
    }

    #[test]
    fn open_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spin.jsonl");
        std::fs::write(&path, SNAPSHOT).unwrap();
        let mut source = SnapshotSource::open(&path).unwrap();
        assert!(source.next_batch().unwrap().is_some());
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            SnapshotSource::open("/nonexistent/fixrec.jsonl"),
            Err(FeedError::Io { .. })
        ));
    }
}
