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

//! The index capability a harness consumes.

use kinetic_core::AxisValue;
use kinetic_core::region::MovingRegion2;
use kinetic_model::id::ObjectId;

/// Receives one call per entry matching a query.
///
/// The visitor observes identifiers only; the index holds no payload worth
/// returning for this benchmark.
pub trait QueryVisitor {
    fn visit(&mut self, id: ObjectId);
}

/// Adapts a closure into a visitor.
///
/// # Examples
///
/// ```
/// use kinetic_index::engine::{QueryVisitor, VisitFn};
/// use kinetic_model::id::ObjectId;
///
/// let mut seen = Vec::new();
/// let mut visitor = VisitFn(|id| seen.push(id));
/// visitor.visit(ObjectId::new(4));
/// assert_eq!(seen, vec![ObjectId::new(4)]);
/// ```
pub struct VisitFn<T>(pub T);

impl<T: FnMut(ObjectId)> QueryVisitor for VisitFn<T> {
    #[inline]
    fn visit(&mut self, id: ObjectId) {
        (self.0)(id)
    }
}

/// A spatio-temporal index over moving regions.
///
/// Methods take `&mut self` throughout: even a query moves pages through
/// the backing buffer, whose occupancy and hit counter are observable
/// state.
pub trait TrajectoryIndex<F: AxisValue> {
    /// Associates `id` (and an optional opaque payload) with `region`.
    ///
    /// Always succeeds for a well-formed region.
    fn insert(&mut self, payload: Option<Vec<u8>>, region: MovingRegion2<F>, id: ObjectId);

    /// Removes the entry previously inserted with this `id` and a region of
    /// matching shape (position extents and velocity bands; validity is not
    /// part of the key). Returns `false` if no such entry exists.
    fn delete(&mut self, region: &MovingRegion2<F>, id: ObjectId) -> bool;

    /// Invokes `visitor` once per entry whose moving extent intersects
    /// `query` at some instant within the query's validity window. No
    /// ordering guarantee.
    fn intersects_with(&mut self, query: &MovingRegion2<F>, visitor: &mut dyn QueryVisitor);

    /// Full structural self-check. Intended for end-of-run reporting, not
    /// per-operation use.
    fn validate(&mut self) -> bool;
}
