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

//! # Domain-Specific Core Data Types
//!
//! This crate provides the fundamental data types for describing objects
//! that move linearly through space over bounded windows of time. It
//! establishes a strong, type-safe foundation for the two primary domains
//! of the problem: **time** and **motion**.
//!
//! ## Key Concepts
//!
//! - **Time**:
//!   - `TimePoint<F>`: Represents a specific instant in time.
//!   - `TimeDelta<F>`: Represents a duration or the difference between two time points.
//!   - `TimeInterval<F>`: A closed interval `[start, end]` composed of two `TimePoint`s;
//!     the end may be positive infinity for half-open validity.
//!
//! - **Motion**:
//!   - `Coordinate<F>`: A position along one spatial axis.
//!   - `Velocity<F>`: A rate of change of position along one spatial axis.
//!   - `MovingRegion<F, D>`: A D-dimensional extent with per-axis velocity
//!     bounds, valid over a time interval.
//!
//! The use of distinct newtypes enforces correctness at compile time — for
//! example, preventing the addition of two `TimePoint`s or the comparison of
//! a coordinate against a velocity.

use num_traits::Float;
use std::fmt::{Debug, Display};

pub mod motion;
pub mod primitives;
pub mod region;
pub mod time;

pub trait AxisValue: Float + Copy + Send + Sync + Debug + Display {}
impl<T> AxisValue for T where T: Float + Copy + Send + Sync + Debug + Display {}
