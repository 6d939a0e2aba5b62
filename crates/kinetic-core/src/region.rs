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

//! The moving-region composite primitive.
//!
//! A [`MovingRegion`] bounds an object (or a query window) in `D` spatial
//! dimensions. Each dimension carries a position extent and a velocity band;
//! the region as a whole carries the time interval over which the
//! description is valid. Bounds evolve linearly: the low position bound
//! moves at the band's low velocity and the high bound at the band's high
//! velocity, measured from the validity start (the *reference time*).

use crate::AxisValue;
use crate::motion::{Coordinate, SpaceExtent, Velocity, VelocityBand};
use crate::primitives::Interval;
use crate::time::{TimeInterval, TimePoint};
use std::array;
use std::fmt::Display;

/// A `D`-dimensional spatial extent with per-axis velocity bounds, valid
/// over a time interval.
///
/// # Examples
///
/// ```
/// use kinetic_core::motion::{Coordinate, Velocity};
/// use kinetic_core::region::MovingRegion2;
/// use kinetic_core::time::{TimeInterval, TimePoint};
///
/// // A point object at (5, 5) moving with velocity (1, 1), valid from t=0.
/// let object = MovingRegion2::point(
///     [Coordinate::new(5.0), Coordinate::new(5.0)],
///     [Velocity::new(1.0), Velocity::new(1.0)],
///     TimeInterval::open_ended(TimePoint::new(0.0)),
/// );
/// let at_three = object.extent_at(TimePoint::new(3.0), 0);
/// assert_eq!(at_three.start(), Coordinate::new(8.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovingRegion<F: AxisValue, const D: usize> {
    extent: [SpaceExtent<F>; D],
    velocity: [VelocityBand<F>; D],
    valid: TimeInterval<F>,
}

/// The two-dimensional region every operation in the benchmark log uses.
pub type MovingRegion2<F> = MovingRegion<F, 2>;

impl<F: AxisValue, const D: usize> MovingRegion<F, D> {
    #[inline]
    pub const fn new(
        extent: [SpaceExtent<F>; D],
        velocity: [VelocityBand<F>; D],
        valid: TimeInterval<F>,
    ) -> Self {
        Self {
            extent,
            velocity,
            valid,
        }
    }

    /// A degenerate region: zero spatial extent at `position`, moving with
    /// a deterministic `velocity` (no uncertainty band).
    ///
    /// This is the shape of an indexed object.
    #[inline]
    pub fn point(
        position: [Coordinate<F>; D],
        velocity: [Velocity<F>; D],
        valid: TimeInterval<F>,
    ) -> Self {
        Self {
            extent: array::from_fn(|d| Interval::new(position[d], position[d])),
            velocity: array::from_fn(|d| Interval::new(velocity[d], velocity[d])),
            valid,
        }
    }

    /// A motionless box from `low` to `high`.
    ///
    /// This is the shape of a query window: it expresses where objects will
    /// be, not how the window itself moves.
    #[inline]
    pub fn stationary(
        low: [Coordinate<F>; D],
        high: [Coordinate<F>; D],
        valid: TimeInterval<F>,
    ) -> Self {
        Self {
            extent: array::from_fn(|d| Interval::new(low[d], high[d])),
            velocity: array::from_fn(|_| VelocityBand::stationary()),
            valid,
        }
    }

    #[inline]
    pub fn dimensions(&self) -> usize {
        D
    }

    #[inline]
    pub fn extent(&self, dim: usize) -> &SpaceExtent<F> {
        &self.extent[dim]
    }

    #[inline]
    pub fn velocity(&self, dim: usize) -> &VelocityBand<F> {
        &self.velocity[dim]
    }

    #[inline]
    pub fn valid(&self) -> TimeInterval<F> {
        self.valid
    }

    /// The instant the bounds are anchored to: the validity start.
    #[inline]
    pub fn reference_time(&self) -> TimePoint<F> {
        self.valid.start()
    }

    /// Evaluates the position extent of dimension `dim` at instant `t`.
    ///
    /// Instants before the reference time extrapolate backwards along the
    /// same linear motion, which is exact for per-bound velocities.
    #[inline]
    pub fn extent_at(&self, t: TimePoint<F>, dim: usize) -> SpaceExtent<F> {
        self.extent[dim].displaced(&self.velocity[dim], t - self.reference_time())
    }

    /// Compares the spatial shape of two regions: position extents and
    /// velocity bands, dimension by dimension.
    ///
    /// Validity intervals are deliberately excluded. An object's stored
    /// validity (`[ct, +inf]`) and the validity its deletion record carries
    /// (`[rt, ct]`) are never equal, so shape plus identifier is the only
    /// workable match key for deletion.
    #[inline]
    pub fn matches_shape(&self, other: &Self) -> bool {
        self.extent == other.extent && self.velocity == other.velocity
    }

    /// The closed time interval during which the two regions overlap in
    /// every dimension, or `None` if they never do.
    ///
    /// The candidate window is the intersection of both (ordered) validity
    /// intervals; within it, each dimension contributes two linear
    /// inequalities (each region's low bound below the other's high bound)
    /// whose feasible instants are intersected.
    pub fn overlap_window(&self, other: &Self) -> Option<TimeInterval<F>> {
        let window = self
            .valid
            .ordered()
            .intersection(&other.valid.ordered())?;
        let mut lo = window.start().value();
        let mut hi = window.end().value();

        let ra = self.reference_time().value();
        let rb = other.reference_time().value();
        for d in 0..D {
            let (al, ah) = (self.extent[d].start().value(), self.extent[d].end().value());
            let (avl, avh) = (
                self.velocity[d].start().value(),
                self.velocity[d].end().value(),
            );
            let (bl, bh) = (
                other.extent[d].start().value(),
                other.extent[d].end().value(),
            );
            let (bvl, bvh) = (
                other.velocity[d].start().value(),
                other.velocity[d].end().value(),
            );

            // a_low(t) <= b_high(t), rewritten as c + m*t <= 0.
            let c = (al - avl * ra) - (bh - bvh * rb);
            let m = avl - bvh;
            (lo, hi) = constrain(lo, hi, c, m)?;

            // b_low(t) <= a_high(t).
            let c = (bl - bvl * rb) - (ah - avh * ra);
            let m = bvl - avh;
            (lo, hi) = constrain(lo, hi, c, m)?;
        }

        Some(Interval::new(TimePoint::new(lo), TimePoint::new(hi)))
    }

    /// A conservative bound covering both regions, anchored at the earlier
    /// of the two reference times.
    ///
    /// Re-anchoring an extent to an earlier instant and evolving it forward
    /// again reproduces the original bounds exactly, so the hull loses
    /// nothing beyond the usual union slack.
    pub fn union_hull(&self, other: &Self) -> Self {
        let ra = self.reference_time();
        let rb = other.reference_time();
        let anchor = if rb < ra { rb } else { ra };

        let extent = array::from_fn(|d| {
            self.extent_at(anchor, d)
                .union_hull(&other.extent_at(anchor, d))
        });
        let velocity = array::from_fn(|d| self.velocity[d].union_hull(&other.velocity[d]));

        let a = self.valid.ordered();
        let b = other.valid.ordered();
        let end = if a.end() > b.end() { a.end() } else { b.end() };

        Self {
            extent,
            velocity,
            valid: Interval::new(anchor, end),
        }
    }
}

/// Narrows the feasible instants of `c + m*t <= 0` into `[lo, hi]`.
#[inline]
fn constrain<F: AxisValue>(lo: F, hi: F, c: F, m: F) -> Option<(F, F)> {
    let (lo, hi) = if m > F::zero() {
        let bound = -c / m;
        (lo, if bound < hi { bound } else { hi })
    } else if m < F::zero() {
        let bound = -c / m;
        (if bound > lo { bound } else { lo }, hi)
    } else if c > F::zero() {
        return None;
    } else {
        (lo, hi)
    };
    (lo <= hi).then_some((lo, hi))
}

impl<F: AxisValue, const D: usize> Display for MovingRegion<F, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MovingRegion(extent: [")?;
        for (d, e) in self.extent.iter().enumerate() {
            if d > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", e)?;
        }
        write!(f, "], velocity: [")?;
        for (d, v) in self.velocity.iter().enumerate() {
            if d > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, "], valid: {})", self.valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point_object(x: f64, y: f64, vx: f64, vy: f64, from: f64) -> MovingRegion2<f64> {
        MovingRegion2::point(
            [Coordinate::new(x), Coordinate::new(y)],
            [Velocity::new(vx), Velocity::new(vy)],
            TimeInterval::open_ended(TimePoint::new(from)),
        )
    }

    fn query_box(lx: f64, ly: f64, hx: f64, hy: f64, from: f64, to: f64) -> MovingRegion2<f64> {
        MovingRegion2::stationary(
            [Coordinate::new(lx), Coordinate::new(ly)],
            [Coordinate::new(hx), Coordinate::new(hy)],
            TimeInterval::new(TimePoint::new(from), TimePoint::new(to)),
        )
    }

    #[test]
    fn test_extent_at_reference_time_is_initial() {
        let obj = point_object(5.0, 7.0, 1.0, -1.0, 2.0);
        let e = obj.extent_at(TimePoint::new(2.0), 0);
        assert_eq!(e.start(), Coordinate::new(5.0));
        assert_eq!(e.end(), Coordinate::new(5.0));
    }

    #[test]
    fn test_extent_at_moves_forward_and_backward() {
        let obj = point_object(5.0, 7.0, 1.0, -1.0, 2.0);
        assert_eq!(
            obj.extent_at(TimePoint::new(5.0), 0).start(),
            Coordinate::new(8.0)
        );
        assert_eq!(
            obj.extent_at(TimePoint::new(5.0), 1).start(),
            Coordinate::new(4.0)
        );
        assert_eq!(
            obj.extent_at(TimePoint::new(0.0), 0).start(),
            Coordinate::new(3.0)
        );
    }

    #[test]
    fn test_overlap_window_of_contained_trajectory() {
        // Object starts at (5, 5) with velocity (1, 1); a [0,20]^2 box over
        // [0, 10] contains the whole visible trajectory.
        let obj = point_object(5.0, 5.0, 1.0, 1.0, 0.0);
        let q = query_box(0.0, 0.0, 20.0, 20.0, 0.0, 10.0);
        let w = obj.overlap_window(&q).expect("trajectory crosses the box");
        assert_eq!(w.start(), TimePoint::new(0.0));
        assert_eq!(w.end(), TimePoint::new(10.0));
    }

    #[test]
    fn test_overlap_window_clipped_by_exit() {
        // Object at x=5 moving at 2/s exits a [0,8] box at t = 1.5.
        let obj = point_object(5.0, 0.0, 2.0, 0.0, 0.0);
        let q = query_box(0.0, -1.0, 8.0, 1.0, 0.0, 10.0);
        let w = obj.overlap_window(&q).expect("object starts inside");
        assert_eq!(w.start(), TimePoint::new(0.0));
        assert_eq!(w.end(), TimePoint::new(1.5));
    }

    #[test]
    fn test_overlap_window_entry_after_window_start() {
        // Object at x=-10 moving at 2/s reaches x=0 at t = 5.
        let obj = point_object(-10.0, 0.0, 2.0, 0.0, 0.0);
        let q = query_box(0.0, -1.0, 8.0, 1.0, 0.0, 10.0);
        let w = obj.overlap_window(&q).expect("object enters in time");
        assert_eq!(w.start(), TimePoint::new(5.0));
        assert_eq!(w.end(), TimePoint::new(9.0));
    }

    #[test]
    fn test_overlap_window_none_when_moving_away() {
        let obj = point_object(25.0, 25.0, 1.0, 1.0, 0.0);
        let q = query_box(0.0, 0.0, 20.0, 20.0, 0.0, 10.0);
        assert!(obj.overlap_window(&q).is_none());
    }

    #[test]
    fn test_overlap_window_none_outside_time_window() {
        // Spatial paths cross, but only after the query window closed.
        let obj = point_object(-100.0, 0.0, 1.0, 0.0, 0.0);
        let q = query_box(0.0, -1.0, 8.0, 1.0, 0.0, 10.0);
        assert!(obj.overlap_window(&q).is_none());
    }

    #[test]
    fn test_overlap_window_requires_all_dimensions() {
        // Overlaps in x over [0, 10], but y stays far below the box.
        let obj = point_object(5.0, -50.0, 0.0, 0.0, 0.0);
        let q = query_box(0.0, 0.0, 20.0, 20.0, 0.0, 10.0);
        assert!(obj.overlap_window(&q).is_none());
    }

    #[test]
    fn test_matches_shape_ignores_validity() {
        let a = point_object(5.0, 5.0, 1.0, 1.0, 0.0);
        let b = MovingRegion2::point(
            [Coordinate::new(5.0), Coordinate::new(5.0)],
            [Velocity::new(1.0), Velocity::new(1.0)],
            TimeInterval::new(TimePoint::new(10.0), TimePoint::new(0.0)),
        );
        assert!(a.matches_shape(&b));
    }

    #[test]
    fn test_matches_shape_rejects_different_velocity() {
        let a = point_object(5.0, 5.0, 1.0, 1.0, 0.0);
        let b = point_object(5.0, 5.0, 1.0, 2.0, 0.0);
        assert!(!a.matches_shape(&b));
    }

    #[test]
    fn test_union_hull_covers_both_at_anchor() {
        let a = point_object(0.0, 0.0, 1.0, 0.0, 0.0);
        let b = point_object(10.0, 4.0, -1.0, 0.0, 2.0);
        let hull = a.union_hull(&b);

        assert_eq!(hull.reference_time(), TimePoint::new(0.0));
        // b re-anchored to t=0 sits at x = 12.
        let x = hull.extent(0);
        assert_eq!(x.start(), Coordinate::new(0.0));
        assert_eq!(x.end(), Coordinate::new(12.0));
        let vx = hull.velocity(0);
        assert_eq!(vx.start(), Velocity::new(-1.0));
        assert_eq!(vx.end(), Velocity::new(1.0));
        assert!(hull.valid().is_open_ended());
    }

    #[test]
    fn test_union_hull_still_overlaps_members() {
        let a = point_object(0.0, 0.0, 1.0, 0.0, 0.0);
        let b = point_object(10.0, 4.0, -1.0, 0.0, 2.0);
        let hull = a.union_hull(&b);
        let q = query_box(9.0, 3.0, 11.0, 5.0, 2.0, 3.0);
        assert!(hull.overlap_window(&q).is_some());
    }
}
