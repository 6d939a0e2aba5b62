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

//! Typed instants, durations, and time intervals.
//!
//! `TimePoint` and `TimeDelta` keep instants and durations apart at the type
//! level: a point plus a delta is a point, the difference of two points is a
//! delta, and adding two points does not compile. `TimeInterval` is the
//! closed, order-preserving [`Interval`] over time points; the end bound may
//! be positive infinity to describe validity with no known expiry.

use crate::AxisValue;
use crate::primitives::Interval;
use std::fmt::Display;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimePoint<F: AxisValue>(F);

impl<F: AxisValue> TimePoint<F> {
    #[inline]
    pub const fn new(value: F) -> Self {
        TimePoint(value)
    }

    #[inline]
    pub fn zero() -> Self {
        TimePoint(F::zero())
    }

    #[inline]
    pub const fn value(self) -> F {
        self.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl<F: AxisValue> Default for TimePoint<F> {
    #[inline]
    fn default() -> Self {
        TimePoint(F::zero())
    }
}

impl<F: AxisValue> Display for TimePoint<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TimePoint({})", self.value())
    }
}

impl<F: AxisValue> From<F> for TimePoint<F> {
    #[inline]
    fn from(v: F) -> Self {
        TimePoint(v)
    }
}

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimeDelta<F: AxisValue>(F);

impl<F: AxisValue> TimeDelta<F> {
    #[inline]
    pub const fn new(value: F) -> Self {
        Self(value)
    }

    #[inline]
    pub fn zero() -> Self {
        Self(F::zero())
    }

    #[inline]
    pub const fn value(self) -> F {
        self.0
    }

    #[inline]
    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.0 < F::zero()
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        self.0 > F::zero()
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == F::zero()
    }
}

impl<F: AxisValue> Default for TimeDelta<F> {
    #[inline]
    fn default() -> Self {
        Self(F::zero())
    }
}

impl<F: AxisValue> Display for TimeDelta<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TimeDelta({})", self.0)
    }
}

pub type TimeInterval<F> = Interval<TimePoint<F>>;

impl<F: AxisValue> Interval<TimePoint<F>> {
    /// A validity interval with a known start and no known expiry,
    /// `[start, +inf]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use kinetic_core::time::{TimeInterval, TimePoint};
    ///
    /// let iv = TimeInterval::open_ended(TimePoint::new(3.0));
    /// assert!(iv.is_open_ended());
    /// assert!(iv.contains(TimePoint::new(1.0e12)));
    /// ```
    #[inline]
    pub fn open_ended(start: TimePoint<F>) -> Self {
        Self::new(start, TimePoint::new(F::infinity()))
    }

    #[inline]
    pub fn is_open_ended(&self) -> bool {
        self.end().value() == F::infinity()
    }

    /// The length of the ordered hull as a duration.
    #[inline]
    pub fn duration(&self) -> TimeDelta<F> {
        self.length()
    }
}

impl<F: AxisValue> Add<TimeDelta<F>> for TimePoint<F> {
    type Output = TimePoint<F>;

    #[inline]
    fn add(self, rhs: TimeDelta<F>) -> Self::Output {
        TimePoint(self.0 + rhs.0)
    }
}

impl<F: AxisValue> Add<TimePoint<F>> for TimeDelta<F> {
    type Output = TimePoint<F>;

    #[inline]
    fn add(self, rhs: TimePoint<F>) -> Self::Output {
        TimePoint(rhs.0 + self.0)
    }
}

impl<F: AxisValue> AddAssign<TimeDelta<F>> for TimePoint<F> {
    #[inline]
    fn add_assign(&mut self, rhs: TimeDelta<F>) {
        self.0 = self.0 + rhs.0;
    }
}

impl<F: AxisValue> Sub<TimeDelta<F>> for TimePoint<F> {
    type Output = TimePoint<F>;

    #[inline]
    fn sub(self, rhs: TimeDelta<F>) -> Self::Output {
        TimePoint(self.0 - rhs.0)
    }
}

impl<F: AxisValue> SubAssign<TimeDelta<F>> for TimePoint<F> {
    #[inline]
    fn sub_assign(&mut self, rhs: TimeDelta<F>) {
        self.0 = self.0 - rhs.0;
    }
}

impl<F: AxisValue> Sub<TimePoint<F>> for TimePoint<F> {
    type Output = TimeDelta<F>;

    #[inline]
    fn sub(self, rhs: TimePoint<F>) -> Self::Output {
        TimeDelta(self.0 - rhs.0)
    }
}

impl<F: AxisValue> Add for TimeDelta<F> {
    type Output = TimeDelta<F>;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        TimeDelta(self.0 + rhs.0)
    }
}

impl<F: AxisValue> Sub for TimeDelta<F> {
    type Output = TimeDelta<F>;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        TimeDelta(self.0 - rhs.0)
    }
}

impl<F: AxisValue> AddAssign for TimeDelta<F> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0 + rhs.0;
    }
}

impl<F: AxisValue> SubAssign for TimeDelta<F> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.0 = self.0 - rhs.0;
    }
}

impl<F: AxisValue> Neg for TimeDelta<F> {
    type Output = TimeDelta<F>;

    #[inline]
    fn neg(self) -> Self::Output {
        TimeDelta(-self.0)
    }
}

impl<F: AxisValue> Mul<F> for TimeDelta<F> {
    type Output = TimeDelta<F>;

    #[inline]
    fn mul(self, rhs: F) -> Self::Output {
        TimeDelta(self.0 * rhs)
    }
}

impl<F: AxisValue> Div<F> for TimeDelta<F> {
    type Output = TimeDelta<F>;

    #[inline]
    fn div(self, rhs: F) -> Self::Output {
        TimeDelta(self.0 / rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_plus_delta_is_point() {
        let t = TimePoint::new(3.0) + TimeDelta::new(2.5);
        assert_eq!(t, TimePoint::new(5.5));
    }

    #[test]
    fn test_point_difference_is_delta() {
        let d = TimePoint::new(7.0) - TimePoint::new(2.0);
        assert_eq!(d, TimeDelta::new(5.0));
    }

    #[test]
    fn test_delta_arithmetic() {
        let d = TimeDelta::new(4.0) - TimeDelta::new(1.5);
        assert_eq!(d, TimeDelta::new(2.5));
        assert_eq!(-d, TimeDelta::new(-2.5));
        assert_eq!(d * 2.0, TimeDelta::new(5.0));
        assert_eq!(d / 2.5, TimeDelta::new(1.0));
    }

    #[test]
    fn test_delta_sign_predicates() {
        assert!(TimeDelta::new(-1.0).is_negative());
        assert!(TimeDelta::new(1.0).is_positive());
        assert!(TimeDelta::<f64>::zero().is_zero());
        assert_eq!(TimeDelta::new(-3.0).abs(), TimeDelta::new(3.0));
    }

    #[test]
    fn test_open_ended_interval_contains_far_future() {
        let iv = TimeInterval::open_ended(TimePoint::new(10.0));
        assert!(iv.is_open_ended());
        assert!(iv.contains(TimePoint::new(10.0)));
        assert!(iv.contains(TimePoint::new(1.0e100)));
        assert!(!iv.contains(TimePoint::new(9.0)));
    }

    #[test]
    fn test_bounded_interval_is_not_open_ended() {
        let iv = TimeInterval::new(TimePoint::new(0.0), TimePoint::new(10.0));
        assert!(!iv.is_open_ended());
        assert_eq!(iv.duration(), TimeDelta::new(10.0));
    }

    #[test]
    fn test_reversed_interval_round_trips() {
        let iv = TimeInterval::new(TimePoint::new(10.0), TimePoint::new(0.0));
        assert_eq!(iv.start(), TimePoint::new(10.0));
        assert_eq!(iv.end(), TimePoint::new(0.0));
        assert_eq!(iv.duration(), TimeDelta::new(10.0));
    }

    #[test]
    fn test_display_formats() {
        assert_eq!(format!("{}", TimePoint::new(2.0)), "TimePoint(2)");
        assert_eq!(format!("{}", TimeDelta::new(1.5)), "TimeDelta(1.5)");
    }
}
