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

//! # Moving-Object Workload Model (`kinetic-model`)
//!
//! This crate turns the raw, line-oriented operation log of the benchmark
//! into well-typed values built on the primitives of `kinetic-core`, and
//! generates such logs for tests and benchmarks.
//!
//! ## Key Data Structures
//!
//! - **`ObjectId`**: the opaque identifier an indexed object is tracked by.
//!
//! - **`OperationRecord`**: one parsed log line — the fixed ten-column
//!   numeric row `id op ct rt unused ax vx unused ay vy`. The same columns
//!   mean different things per operation kind; the record itself stays raw.
//!
//! - **`RecordReader`**: an iterator over the syntactically valid records
//!   of an input stream. Malformed lines are absorbed here and never reach
//!   downstream components.
//!
//! - **`Operation`**: the tagged interpretation of a record — `Insert`,
//!   `Delete`, or `Query`, each carrying the moving region the record's
//!   columns denote *for that kind*. This is where the operation-dependent
//!   field mapping lives, and the only place allowed to know it.
//!
//! - **`WorkloadGenerator`**: a seeded, reproducible producer of operation
//!   logs whose deletes are correctly paired with their inserts.

pub mod err;
pub mod generator;
pub mod id;
pub mod op;
pub mod record;

pub mod prelude {
    pub use crate::err::{RecordParseError, WorkloadConfigError};
    pub use crate::generator::{WorkloadConfig, WorkloadGenerator};
    pub use crate::id::ObjectId;
    pub use crate::op::Operation;
    pub use crate::record::{OpKind, OperationRecord, RecordReader};
}
