//! Comma-separated reader/writer for the store. Quotes follow RFC 4180;
//! CRLF and blank lines are tolerated on read.

use std::io::{self, Write};
use std::mem::take;

pub const SEP: char = ',';

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// A quoted field was still open when the text ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unterminated quote in row {row}")]
pub struct UnterminatedQuote {
    /// 1-based row the open field belongs to, not counting blank lines.
    pub row: usize,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Bare,
    Quoted,
    /// Saw `"` inside a quoted field: either its end or the first half of `""`.
    QuoteSeen,
}

/// Split `text` into rows of fields. Blank lines are dropped; `\n`, `\r\n`
/// and a lone `\r` all end a row.
pub fn parse_rows(text: &str) -> Result<Vec<Vec<String>>, UnterminatedQuote> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut state = State::Bare;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if state == State::QuoteSeen && ch != '"' {
            state = State::Bare;
        }
        state = match (state, ch) {
            (State::Quoted, '"') => State::QuoteSeen,
            (State::QuoteSeen, '"') => {
                field.push('"');
                State::Quoted
            }
            (State::Quoted, c) => {
                field.push(c);
                State::Quoted
            }
            (_, '"') => State::Quoted,
            (_, SEP) => {
                row.push(take(&mut field));
                State::Bare
            }
            (_, '\r') if chars.peek() == Some(&'\n') => State::Bare,
            (_, '\n' | '\r') => {
                end_row(&mut rows, &mut row, &mut field);
                State::Bare
            }
            (_, c) => {
                field.push(c);
                State::Bare
            }
        };
    }

    if state == State::Quoted {
        return Err(UnterminatedQuote { row: rows.len() + 1 });
    }
    end_row(&mut rows, &mut row, &mut field);
    Ok(rows)
}

fn end_row(rows: &mut Vec<Vec<String>>, row: &mut Vec<String>, field: &mut String) {
    row.push(take(field));
    if matches!(row.as_slice(), [only] if only.is_empty()) {
        row.clear();
    } else {
        rows.push(take(row));
    }
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

fn needs_quotes(field: &str) -> bool {
    field.contains(SEP) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write one row, quoting fields that contain the separator, quotes or newlines.
pub fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S]) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            write!(w, "{SEP}")?;
        }
        let cell = cell.as_ref();
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            w.write_all(cell.as_bytes())?;
        }
    }
    writeln!(w)
}
