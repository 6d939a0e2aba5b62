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

//! Typed positions and velocities along a single spatial axis.
//!
//! A `Coordinate` and a `Velocity` are kept apart at the type level; the
//! only way to combine them is through time: displacing a coordinate by a
//! velocity over a duration yields a coordinate. `SpaceExtent` and
//! `VelocityBand` are the order-preserving closed intervals over these
//! newtypes used to bound one axis of a moving region.

use crate::AxisValue;
use crate::primitives::Interval;
use crate::time::TimeDelta;
use std::fmt::Display;
use std::ops::Sub;

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Coordinate<F: AxisValue>(F);

impl<F: AxisValue> Coordinate<F> {
    #[inline]
    pub const fn new(value: F) -> Self {
        Coordinate(value)
    }

    #[inline]
    pub fn zero() -> Self {
        Coordinate(F::zero())
    }

    #[inline]
    pub const fn value(self) -> F {
        self.0
    }

    /// The position reached after moving at `velocity` for `elapsed` time.
    ///
    /// # Examples
    ///
    /// ```
    /// use kinetic_core::motion::{Coordinate, Velocity};
    /// use kinetic_core::time::TimeDelta;
    ///
    /// let c = Coordinate::new(5.0).displaced(Velocity::new(1.0), TimeDelta::new(3.0));
    /// assert_eq!(c, Coordinate::new(8.0));
    /// ```
    #[inline]
    pub fn displaced(self, velocity: Velocity<F>, elapsed: TimeDelta<F>) -> Self {
        Coordinate(self.0 + velocity.0 * elapsed.value())
    }
}

impl<F: AxisValue> Default for Coordinate<F> {
    #[inline]
    fn default() -> Self {
        Coordinate(F::zero())
    }
}

impl<F: AxisValue> Display for Coordinate<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Coordinate({})", self.0)
    }
}

impl<F: AxisValue> From<F> for Coordinate<F> {
    #[inline]
    fn from(v: F) -> Self {
        Coordinate(v)
    }
}

impl<F: AxisValue> Sub for Coordinate<F> {
    type Output = F;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.0 - rhs.0
    }
}

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Velocity<F: AxisValue>(F);

impl<F: AxisValue> Velocity<F> {
    #[inline]
    pub const fn new(value: F) -> Self {
        Velocity(value)
    }

    #[inline]
    pub fn zero() -> Self {
        Velocity(F::zero())
    }

    #[inline]
    pub const fn value(self) -> F {
        self.0
    }
}

impl<F: AxisValue> Default for Velocity<F> {
    #[inline]
    fn default() -> Self {
        Velocity(F::zero())
    }
}

impl<F: AxisValue> Display for Velocity<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Velocity({})", self.0)
    }
}

impl<F: AxisValue> From<F> for Velocity<F> {
    #[inline]
    fn from(v: F) -> Self {
        Velocity(v)
    }
}

impl<F: AxisValue> Sub for Velocity<F> {
    type Output = F;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.0 - rhs.0
    }
}

/// Position bounds of one axis of a moving region.
pub type SpaceExtent<F> = Interval<Coordinate<F>>;

/// Velocity bounds of one axis of a moving region.
pub type VelocityBand<F> = Interval<Velocity<F>>;

impl<F: AxisValue> Interval<Coordinate<F>> {
    /// The extent reached after the low bound moves at the band's low
    /// velocity and the high bound at the band's high velocity for
    /// `elapsed` time.
    ///
    /// This is the linear-motion evolution rule for a bounded extent: each
    /// bound carries its own worst-case velocity.
    #[inline]
    pub fn displaced(&self, band: &VelocityBand<F>, elapsed: TimeDelta<F>) -> Self {
        Self::new(
            self.start().displaced(band.start(), elapsed),
            self.end().displaced(band.end(), elapsed),
        )
    }
}

impl<F: AxisValue> Interval<Velocity<F>> {
    /// The degenerate band of a stationary extent.
    #[inline]
    pub fn stationary() -> Self {
        Self::new(Velocity::zero(), Velocity::zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::TimeDelta;

    #[test]
    fn test_displaced_moves_with_velocity() {
        let c = Coordinate::new(2.0).displaced(Velocity::new(-0.5), TimeDelta::new(4.0));
        assert_eq!(c, Coordinate::new(0.0));
    }

    #[test]
    fn test_displaced_by_zero_velocity_is_identity() {
        let c = Coordinate::new(2.0).displaced(Velocity::zero(), TimeDelta::new(100.0));
        assert_eq!(c, Coordinate::new(2.0));
    }

    #[test]
    fn test_extent_displaced_per_bound() {
        let extent = SpaceExtent::new(Coordinate::new(0.0), Coordinate::new(10.0));
        let band = VelocityBand::new(Velocity::new(-1.0), Velocity::new(2.0));
        let moved = extent.displaced(&band, TimeDelta::new(3.0));
        assert_eq!(moved.start(), Coordinate::new(-3.0));
        assert_eq!(moved.end(), Coordinate::new(16.0));
    }

    #[test]
    fn test_stationary_band_is_zero() {
        let band = VelocityBand::<f64>::stationary();
        assert_eq!(band.start(), Velocity::zero());
        assert_eq!(band.end(), Velocity::zero());
        assert!(band.is_point());
    }

    #[test]
    fn test_coordinate_difference_is_scalar() {
        assert_eq!(Coordinate::new(7.0) - Coordinate::new(2.0), 5.0);
    }
}
