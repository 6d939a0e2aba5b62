// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Operation records and the log reader.
//!
//! Every line of the benchmark log is the same fixed ten-column numeric row
//! `id op ct rt unused ax vx unused ay vy`, whatever the operation. Fields
//! are positional, never named. Two columns are present but consumed by no
//! operation; they must still parse for the line to count as well-formed.

use crate::err::RecordParseError;
use crate::id::ObjectId;
use std::fmt::Display;
use std::io::BufRead;
use tracing::trace;

/// The number of whitespace-separated fields of a well-formed record.
pub const RECORD_FIELDS: usize = 10;

/// The kind of work a record asks for.
///
/// The numeric codes are part of the log format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    Delete,
    Insert,
    Query,
}

impl OpKind {
    /// Maps a log op code to a kind: 0 delete, 1 insert, 2 query.
    #[inline]
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(OpKind::Delete),
            1 => Some(OpKind::Insert),
            2 => Some(OpKind::Query),
            _ => None,
        }
    }

    #[inline]
    pub fn code(self) -> i64 {
        match self {
            OpKind::Delete => 0,
            OpKind::Insert => 1,
            OpKind::Query => 2,
        }
    }
}

impl Display for OpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            OpKind::Delete => "delete",
            OpKind::Insert => "insert",
            OpKind::Query => "query",
        };
        write!(f, "{}", label)
    }
}

/// One parsed log line, kept raw.
///
/// The record does not interpret its numeric columns: `ct`/`rt` and
/// `ax`/`vx`/`ay`/`vy` mean different things per [`OpKind`], and that
/// mapping belongs to [`Operation`]. Keeping the record raw means the
/// reader can stay oblivious to it.
///
/// [`Operation`]: crate::op::Operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperationRecord {
    id: ObjectId,
    kind: OpKind,
    ct: f64,
    rt: f64,
    ax: f64,
    vx: f64,
    ay: f64,
    vy: f64,
}

impl OperationRecord {
    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub fn new(
        id: ObjectId,
        kind: OpKind,
        ct: f64,
        rt: f64,
        ax: f64,
        vx: f64,
        ay: f64,
        vy: f64,
    ) -> Self {
        Self {
            id,
            kind,
            ct,
            rt,
            ax,
            vx,
            ay,
            vy,
        }
    }

    /// Parses one log line.
    ///
    /// A well-formed line has exactly [`RECORD_FIELDS`] whitespace-separated
    /// numeric fields in the fixed order `id op ct rt unused ax vx unused
    /// ay vy`. The two unused columns must parse but are discarded.
    ///
    /// # Examples
    ///
    /// ```
    /// use kinetic_model::record::{OpKind, OperationRecord};
    ///
    /// let r = OperationRecord::parse_line("1 1 0 1000000000 0 5.0 1.0 0 5.0 1.0").unwrap();
    /// assert_eq!(r.kind(), OpKind::Insert);
    /// assert_eq!(r.ax(), 5.0);
    ///
    /// assert!(OperationRecord::parse_line("").is_err());
    /// assert!(OperationRecord::parse_line("1 7 0 0 0 0 0 0 0 0").is_err());
    /// ```
    pub fn parse_line(line: &str) -> Result<Self, RecordParseError> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != RECORD_FIELDS {
            return Err(RecordParseError::FieldCount {
                found: fields.len(),
            });
        }

        let number = |column: usize| -> Result<f64, RecordParseError> {
            fields[column]
                .parse::<f64>()
                .map_err(|_| RecordParseError::InvalidNumber {
                    column,
                    token: fields[column].to_string(),
                })
        };

        let id = fields[0]
            .parse::<i64>()
            .map_err(|_| RecordParseError::InvalidNumber {
                column: 0,
                token: fields[0].to_string(),
            })?;
        let code = fields[1]
            .parse::<i64>()
            .map_err(|_| RecordParseError::InvalidNumber {
                column: 1,
                token: fields[1].to_string(),
            })?;
        let kind = OpKind::from_code(code).ok_or(RecordParseError::UnknownOpCode { code })?;

        let ct = number(2)?;
        let rt = number(3)?;
        number(4)?; // unused, must still be numeric
        let ax = number(5)?;
        let vx = number(6)?;
        number(7)?; // unused, must still be numeric
        let ay = number(8)?;
        let vy = number(9)?;

        Ok(Self::new(ObjectId::new(id), kind, ct, rt, ax, vx, ay, vy))
    }

    #[inline]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> OpKind {
        self.kind
    }

    #[inline]
    pub fn ct(&self) -> f64 {
        self.ct
    }

    #[inline]
    pub fn rt(&self) -> f64 {
        self.rt
    }

    #[inline]
    pub fn ax(&self) -> f64 {
        self.ax
    }

    #[inline]
    pub fn vx(&self) -> f64 {
        self.vx
    }

    #[inline]
    pub fn ay(&self) -> f64 {
        self.ay
    }

    #[inline]
    pub fn vy(&self) -> f64 {
        self.vy
    }
}

impl Display for OperationRecord {
    /// Re-emits the record as a log line; the unused columns render as 0.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {} 0 {} {} 0 {} {}",
            self.id.value(),
            self.kind.code(),
            self.ct,
            self.rt,
            self.ax,
            self.vx,
            self.ay,
            self.vy
        )
    }
}

/// Iterates over the syntactically valid records of a line-oriented source.
///
/// Malformed lines (blank lines, wrong field counts, non-numeric tokens,
/// unknown op codes) are skipped here and never surface downstream; the
/// skip leaves only a trace-level event behind. End of input ends
/// iteration normally.
pub struct RecordReader<R> {
    input: R,
    line: String,
}

impl<R: BufRead> RecordReader<R> {
    #[inline]
    pub fn new(input: R) -> Self {
        Self {
            input,
            line: String::new(),
        }
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = OperationRecord;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line.clear();
            match self.input.read_line(&mut self.line) {
                Ok(0) => return None,
                Ok(_) => match OperationRecord::parse_line(&self.line) {
                    Ok(record) => return Some(record),
                    Err(error) => {
                        trace!(line = %self.line.trim_end(), %error, "skipping malformed record");
                    }
                },
                Err(error) => {
                    trace!(%error, "read error, treating as end of input");
                    return None;
                }
            }
        }
    }
}
