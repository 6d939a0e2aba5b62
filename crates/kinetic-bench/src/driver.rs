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

//! The sequential dispatch loop.
//!
//! Records come in one at a time, already filtered down to the
//! syntactically valid by the reader; each is lifted to its typed operation
//! and dispatched against the index, with exactly the engine call under the
//! stopwatch. A failed delete is a correctness violation of the whole run
//! and aborts it on the spot.

use crate::report::RunStats;
use crate::stopwatch::Stopwatch;
use kinetic_index::engine::{QueryVisitor, TrajectoryIndex};
use kinetic_model::id::ObjectId;
use kinetic_model::op::Operation;
use kinetic_model::record::{OpKind, RecordReader};
use std::fmt::Display;
use std::io::BufRead;
use tracing::info;

/// A progress event fires each time this many records have been dispatched.
pub const PROGRESS_EVERY: u64 = 1000;

/// Why a run aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunError {
    /// The engine found nothing to delete for this record. Deletion
    /// correctness is a hard invariant of the benchmark; `records` is how
    /// many operations had been dispatched before the failing one.
    DeleteFailed { id: ObjectId, records: u64 },
}

impl Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunError::DeleteFailed { id, records } => {
                write!(f, "cannot delete {} after {} operations", id, records)
            }
        }
    }
}

impl std::error::Error for RunError {}

/// The harness's result collector: observes that matches occurred.
///
/// The index stores no payload in this benchmark, so there is nothing else
/// to fetch per match.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchTally {
    matches: u64,
}

impl MatchTally {
    #[inline]
    pub fn matches(&self) -> u64 {
        self.matches
    }
}

impl QueryVisitor for MatchTally {
    #[inline]
    fn visit(&mut self, _id: ObjectId) {
        self.matches += 1;
    }
}

/// Replays every record of `records` against `index`.
///
/// Exactly one progress event is emitted per [`PROGRESS_EVERY`] dispatched
/// records, starting with the very first (the counter is read before it
/// advances). Returns the accumulated statistics, or the first fatal
/// condition.
pub fn run<R, I>(records: RecordReader<R>, index: &mut I) -> Result<RunStats, RunError>
where
    R: BufRead,
    I: TrajectoryIndex<f64>,
{
    let mut stats = RunStats::new();
    let mut stopwatch = Stopwatch::new();
    let mut count: u64 = 0;

    for record in records {
        match Operation::from_record(&record) {
            Operation::Insert { id, region } => {
                stopwatch.start();
                index.insert(None, region, id);
                stopwatch.stop();
                stats.record(OpKind::Insert, stopwatch.last());
            }
            Operation::Delete { id, region } => {
                stopwatch.start();
                let removed = index.delete(&region, id);
                stopwatch.stop();
                if !removed {
                    return Err(RunError::DeleteFailed { id, records: count });
                }
                stats.record(OpKind::Delete, stopwatch.last());
            }
            Operation::Query { region } => {
                let mut collector = MatchTally::default();
                stopwatch.start();
                index.intersects_with(&region, &mut collector);
                stopwatch.stop();
                stats.record(OpKind::Query, stopwatch.last());
            }
        }

        if count % PROGRESS_EVERY == 0 {
            info!(records = count, "progress");
        }
        count += 1;
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinetic_core::region::MovingRegion2;
    use std::io::Cursor;

    /// A scripted engine double: answers deletes from a script and counts
    /// calls, no spatial machinery involved.
    #[derive(Debug, Default)]
    struct ScriptedIndex {
        inserts: Vec<ObjectId>,
        deletes: Vec<ObjectId>,
        queries: u64,
        delete_script: Vec<bool>,
        visits_per_query: u64,
    }

    impl ScriptedIndex {
        fn with_delete_script(script: Vec<bool>) -> Self {
            Self {
                delete_script: script,
                ..Self::default()
            }
        }
    }

    impl TrajectoryIndex<f64> for ScriptedIndex {
        fn insert(&mut self, _payload: Option<Vec<u8>>, _region: MovingRegion2<f64>, id: ObjectId) {
            self.inserts.push(id);
        }

        fn delete(&mut self, _region: &MovingRegion2<f64>, id: ObjectId) -> bool {
            self.deletes.push(id);
            if self.delete_script.is_empty() {
                true
            } else {
                self.delete_script.remove(0)
            }
        }

        fn intersects_with(&mut self, _query: &MovingRegion2<f64>, visitor: &mut dyn QueryVisitor) {
            self.queries += 1;
            for i in 0..self.visits_per_query {
                visitor.visit(ObjectId::new(i as i64));
            }
        }

        fn validate(&mut self) -> bool {
            true
        }
    }

    fn reader(input: &str) -> RecordReader<Cursor<&str>> {
        RecordReader::new(Cursor::new(input))
    }

    #[test]
    fn test_counts_equal_valid_lines_despite_garbage() {
        let input = "\n\
                     not a record\n\
                     1 1 0 0 0 5.0 1.0 0 5.0 1.0\n\
                     1 1 0\n\
                     2 1 0 0 0 6.0 1.0 0 6.0 1.0\n\
                     9 2 0 10 0 0.0 20.0 0 0.0 20.0\n\
                     xxx yyy\n\
                     1 0 10 0 0 5.0 1.0 0 5.0 1.0\n";
        let mut index = ScriptedIndex::default();
        let stats = run(reader(input), &mut index).unwrap();

        assert_eq!(stats.tally(OpKind::Insert).count(), 2);
        assert_eq!(stats.tally(OpKind::Query).count(), 1);
        assert_eq!(stats.tally(OpKind::Delete).count(), 1);
        assert_eq!(stats.total_operations(), 4);
        assert_eq!(index.inserts.len(), 2);
        assert_eq!(index.queries, 1);
    }

    #[test]
    fn test_failed_delete_aborts_with_running_count() {
        let input = "1 1 0 0 0 5.0 1.0 0 5.0 1.0\n\
                     1 0 5 0 0 5.0 1.0 0 5.0 1.0\n\
                     2 0 5 0 0 6.0 1.0 0 6.0 1.0\n\
                     3 1 6 0 0 7.0 1.0 0 7.0 1.0\n";
        let mut index = ScriptedIndex::with_delete_script(vec![true, false]);
        let error = run(reader(input), &mut index).unwrap_err();

        assert_eq!(
            error,
            RunError::DeleteFailed {
                id: ObjectId::new(2),
                records: 2
            }
        );
        // The record after the failing delete was never dispatched.
        assert!(index.inserts.len() == 1);
    }

    #[test]
    fn test_failed_delete_books_no_statistic() {
        let input = "1 0 5 0 0 5.0 1.0 0 5.0 1.0\n";
        let mut index = ScriptedIndex::with_delete_script(vec![false]);
        assert!(run(reader(input), &mut index).is_err());
    }

    #[test]
    fn test_empty_input_yields_empty_stats() {
        let mut index = ScriptedIndex::default();
        let stats = run(reader(""), &mut index).unwrap();
        assert_eq!(stats.total_operations(), 0);
        assert_eq!(stats.tally(OpKind::Delete).average(), None);
    }

    #[test]
    fn test_queries_drive_the_visitor() {
        let input = "9 2 0 10 0 0.0 20.0 0 0.0 20.0\n";
        let mut index = ScriptedIndex {
            visits_per_query: 3,
            ..ScriptedIndex::default()
        };
        let stats = run(reader(input), &mut index).unwrap();
        assert_eq!(stats.tally(OpKind::Query).count(), 1);
        assert_eq!(index.queries, 1);
    }

    #[test]
    fn test_match_tally_counts_visits() {
        let mut tally = MatchTally::default();
        tally.visit(ObjectId::new(1));
        tally.visit(ObjectId::new(2));
        assert_eq!(tally.matches(), 2);
    }

    #[test]
    fn test_run_error_display_names_id_and_count() {
        let error = RunError::DeleteFailed {
            id: ObjectId::new(42),
            records: 7,
        };
        assert_eq!(
            format!("{}", error),
            "cannot delete ObjectId(42) after 7 operations"
        );
    }
}
