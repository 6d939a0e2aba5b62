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

//! Per-kind operation accounting.
//!
//! One [`OpTally`] per operation kind, owned by a [`RunStats`] value the
//! driver threads through the run and hands back at the end. No ambient
//! counters anywhere.

use kinetic_model::record::OpKind;
use std::fmt::Display;
use std::time::Duration;

/// Count and accumulated latency of one operation kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpTally {
    count: u64,
    total: Duration,
}

impl OpTally {
    #[inline]
    pub fn record(&mut self, elapsed: Duration) {
        self.count += 1;
        self.total += elapsed;
    }

    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    #[inline]
    pub fn total(&self) -> Duration {
        self.total
    }

    /// Mean latency, or `None` when nothing of this kind ran.
    ///
    /// The zero-count case is a guard, not an error: a log with no
    /// deletions is perfectly valid and must not produce a NaN average.
    #[inline]
    pub fn average(&self) -> Option<Duration> {
        (self.count > 0).then(|| self.total.div_f64(self.count as f64))
    }
}

/// Per-kind statistics for one whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    inserts: OpTally,
    deletes: OpTally,
    queries: OpTally,
}

impl RunStats {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Books one successfully dispatched operation.
    #[inline]
    pub fn record(&mut self, kind: OpKind, elapsed: Duration) {
        match kind {
            OpKind::Insert => self.inserts.record(elapsed),
            OpKind::Delete => self.deletes.record(elapsed),
            OpKind::Query => self.queries.record(elapsed),
        }
    }

    #[inline]
    pub fn tally(&self, kind: OpKind) -> &OpTally {
        match kind {
            OpKind::Insert => &self.inserts,
            OpKind::Delete => &self.deletes,
            OpKind::Query => &self.queries,
        }
    }

    #[inline]
    pub fn total_operations(&self) -> u64 {
        self.inserts.count() + self.deletes.count() + self.queries.count()
    }
}

fn write_kind(
    f: &mut std::fmt::Formatter<'_>,
    label: &str,
    tally: &OpTally,
) -> std::fmt::Result {
    write!(
        f,
        "{}: {} Time: {:.3} ms Avg: ",
        label,
        tally.count(),
        tally.total().as_secs_f64() * 1e3
    )?;
    match tally.average() {
        Some(avg) => write!(f, "{:.3} us", avg.as_secs_f64() * 1e6),
        None => write!(f, "n/a"),
    }
}

impl Display for RunStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_kind(f, "Inserts", &self.inserts)?;
        writeln!(f)?;
        write_kind(f, "Deletes", &self.deletes)?;
        writeln!(f)?;
        write_kind(f, "Queries", &self.queries)
    }
}
