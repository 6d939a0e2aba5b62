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

//! From raw records to typed operations.
//!
//! The operation log reuses the same four numeric columns (`ax, vx, ay,
//! vy`) and the same two time columns (`ct, rt`) with a different meaning
//! per operation kind. That reinterpretation is the heart of the log
//! format, and this module is the only place that knows it; everything
//! downstream consumes the tagged [`Operation`] and cannot confuse a
//! velocity column with a spatial bound.
//!
//! The mapping, per kind:
//!
//! | kind   | position bounds        | velocity bounds | validity       |
//! |--------|------------------------|-----------------|----------------|
//! | insert | point `(ax, ay)`       | point `(vx, vy)`| `[ct, +inf]`   |
//! | delete | point `(ax, ay)`       | point `(vx, vy)`| `[rt, ct]`     |
//! | query  | `(ax, ay)..(vx, vy)`   | zero            | `[ct, rt]`     |
//!
//! For a query, the columns nominally named after velocities carry the
//! upper corner of the search box. For a delete, the validity interval
//! takes its *start* from the `rt` column and its *end* from `ct` — the
//! reverse of the query pairing. That ordering is part of the log contract
//! and is preserved here bound-for-bound.

use crate::id::ObjectId;
use crate::record::{OpKind, OperationRecord};
use kinetic_core::motion::{Coordinate, Velocity};
use kinetic_core::region::MovingRegion2;
use kinetic_core::time::{TimeInterval, TimePoint};

/// A fully interpreted operation, ready to dispatch against an index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation {
    Insert {
        id: ObjectId,
        region: MovingRegion2<f64>,
    },
    Delete {
        id: ObjectId,
        region: MovingRegion2<f64>,
    },
    Query {
        region: MovingRegion2<f64>,
    },
}

impl Operation {
    /// Builds the operation a record denotes, applying the per-kind column
    /// mapping exactly.
    pub fn from_record(record: &OperationRecord) -> Self {
        match record.kind() {
            OpKind::Insert => Operation::Insert {
                id: record.id(),
                region: MovingRegion2::point(
                    [Coordinate::new(record.ax()), Coordinate::new(record.ay())],
                    [Velocity::new(record.vx()), Velocity::new(record.vy())],
                    TimeInterval::open_ended(TimePoint::new(record.ct())),
                ),
            },
            OpKind::Delete => Operation::Delete {
                id: record.id(),
                region: MovingRegion2::point(
                    [Coordinate::new(record.ax()), Coordinate::new(record.ay())],
                    [Velocity::new(record.vx()), Velocity::new(record.vy())],
                    // Deletion validity runs [rt, ct]: start from the rt
                    // column, end from ct. Log contract; do not reorder.
                    TimeInterval::new(TimePoint::new(record.rt()), TimePoint::new(record.ct())),
                ),
            },
            OpKind::Query => Operation::Query {
                region: MovingRegion2::stationary(
                    [Coordinate::new(record.ax()), Coordinate::new(record.ay())],
                    // The vx/vy columns are the upper spatial corner here.
                    [Coordinate::new(record.vx()), Coordinate::new(record.vy())],
                    TimeInterval::new(TimePoint::new(record.ct()), TimePoint::new(record.rt())),
                ),
            },
        }
    }

    #[inline]
    pub fn kind(&self) -> OpKind {
        match self {
            Operation::Insert { .. } => OpKind::Insert,
            Operation::Delete { .. } => OpKind::Delete,
            Operation::Query { .. } => OpKind::Query,
        }
    }
}
