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

use std::fmt::Display;

/// Why a log line failed to parse into an [`OperationRecord`].
///
/// Parse failures are recoverable by policy: the record reader absorbs them
/// and moves to the next line. The error type exists so that boundary can
/// be tested, and so skips can be traced.
///
/// [`OperationRecord`]: crate::record::OperationRecord
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordParseError {
    /// The line did not split into exactly ten whitespace-separated fields.
    FieldCount { found: usize },
    /// A field did not parse as a number of the expected shape.
    InvalidNumber { column: usize, token: String },
    /// The operation code was not one of 0 (delete), 1 (insert), 2 (query).
    UnknownOpCode { code: i64 },
}

impl Display for RecordParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordParseError::FieldCount { found } => {
                write!(f, "expected 10 fields, found {}", found)
            }
            RecordParseError::InvalidNumber { column, token } => {
                write!(f, "field {} is not a number: {:?}", column, token)
            }
            RecordParseError::UnknownOpCode { code } => {
                write!(f, "unknown operation code {}", code)
            }
        }
    }
}

impl std::error::Error for RecordParseError {}

/// Why a workload configuration cannot produce a log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkloadConfigError {
    /// A workload needs at least one object.
    NoObjects,
    /// The world side length must be strictly positive.
    NonPositiveWorld { world_size: f64 },
    /// The speed distribution must have a nonnegative mean and sigma.
    NegativeSpeed { mean: f64, sigma: f64 },
    /// A probability parameter was outside `[0, 1]`.
    ProbabilityOutOfRange { name: &'static str, value: f64 },
}

impl Display for WorkloadConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkloadConfigError::NoObjects => {
                write!(f, "workload must contain at least one object")
            }
            WorkloadConfigError::NonPositiveWorld { world_size } => {
                write!(f, "world side length must be positive, got {}", world_size)
            }
            WorkloadConfigError::NegativeSpeed { mean, sigma } => {
                write!(
                    f,
                    "speed distribution must be nonnegative, got mean {} sigma {}",
                    mean, sigma
                )
            }
            WorkloadConfigError::ProbabilityOutOfRange { name, value } => {
                write!(f, "{} must lie in [0, 1], got {}", name, value)
            }
        }
    }
}

impl std::error::Error for WorkloadConfigError {}
