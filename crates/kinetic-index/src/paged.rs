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

//! The paged reference engine.
//!
//! Entries live in flat pages of bounded fan-out. Every page carries a
//! conservative moving bound over its members, maintained with
//! [`MovingRegion::union_hull`] on insert and never shrunk on delete.
//! Queries prune whole pages through the bound before testing entries;
//! inserts go to the non-full page whose bound grows the least when
//! evaluated one horizon ahead of the entry's reference time, the
//! time-parameterized analogue of least-enlargement placement.
//!
//! [`MovingRegion::union_hull`]: kinetic_core::region::MovingRegion::union_hull

use crate::engine::{QueryVisitor, TrajectoryIndex};
use crate::stats::IndexStats;
use crate::storage::{PageId, PageStore};
use kinetic_core::AxisValue;
use kinetic_core::motion::SpaceExtent;
use kinetic_core::region::MovingRegion2;
use kinetic_core::time::{TimeDelta, TimePoint};
use kinetic_model::id::ObjectId;
use num_traits::NumCast;
use std::fmt::Display;
use tracing::warn;

/// Tuning parameters forwarded at engine construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexConfig<F: AxisValue> {
    node_capacity: usize,
    horizon: TimeDelta<F>,
}

impl<F: AxisValue> IndexConfig<F> {
    /// `node_capacity` is the page fan-out (clamped to at least one);
    /// `horizon` is how far ahead of an entry's reference time bound growth
    /// is evaluated during placement.
    #[inline]
    pub fn new(node_capacity: usize, horizon: TimeDelta<F>) -> Self {
        Self {
            node_capacity: node_capacity.max(1),
            horizon,
        }
    }

    #[inline]
    pub fn node_capacity(&self) -> usize {
        self.node_capacity
    }

    #[inline]
    pub fn horizon(&self) -> TimeDelta<F> {
        self.horizon
    }
}

/// Identifies an engine instance in reports.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexId(u64);

impl IndexId {
    #[inline]
    pub const fn new(id: u64) -> Self {
        IndexId(id)
    }

    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl Display for IndexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Entry<F: AxisValue> {
    id: ObjectId,
    region: MovingRegion2<F>,
    #[allow(dead_code)]
    payload: Option<Vec<u8>>,
}

/// One page of the index: its entries and their conservative moving bound.
#[derive(Debug, Clone)]
pub struct Node<F: AxisValue> {
    entries: Vec<Entry<F>>,
    bound: MovingRegion2<F>,
}

impl<F: AxisValue> Node<F> {
    fn seeded(entry: Entry<F>) -> Self {
        Self {
            bound: entry.region,
            entries: vec![entry],
        }
    }
}

/// The in-memory paged trajectory index.
///
/// Generic over its page store, so the same engine runs on a bare
/// [`MemoryStore`] or behind an [`EvictionBuffer`].
///
/// [`MemoryStore`]: crate::storage::MemoryStore
/// [`EvictionBuffer`]: crate::storage::EvictionBuffer
#[derive(Debug)]
pub struct PagedIndex<F: AxisValue, S: PageStore<Node<F>>> {
    config: IndexConfig<F>,
    store: S,
    pages: Vec<PageId>,
    entries: usize,
    reads: u64,
    writes: u64,
    id: IndexId,
}

impl<F: AxisValue, S: PageStore<Node<F>>> PagedIndex<F, S> {
    /// A fresh, empty engine on `store`. The store holds a single index,
    /// reported as instance 1.
    pub fn new(store: S, config: IndexConfig<F>) -> Self {
        Self {
            config,
            store,
            pages: Vec::new(),
            entries: 0,
            reads: 0,
            writes: 0,
            id: IndexId::new(1),
        }
    }

    #[inline]
    pub fn id(&self) -> IndexId {
        self.id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    #[inline]
    pub fn config(&self) -> &IndexConfig<F> {
        &self.config
    }

    /// The page store, for readouts the capability trait does not cover
    /// (buffer hit counters and the like).
    #[inline]
    pub fn storage(&self) -> &S {
        &self.store
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats::new(
            self.pages.len(),
            self.entries,
            self.config.node_capacity,
            self.reads,
            self.writes,
        )
    }

    fn load_page(&mut self, id: PageId) -> Node<F> {
        self.reads += 1;
        self.store
            .load(id)
            .expect("page directory references a stored page")
    }

    fn store_page(&mut self, id: PageId, node: Node<F>) {
        self.writes += 1;
        self.store.store(id, node);
    }
}

/// The spatial volume of a region's extent evaluated at one instant.
fn volume_at<F: AxisValue>(region: &MovingRegion2<F>, t: TimePoint<F>) -> F {
    let mut volume = F::one();
    for d in 0..region.dimensions() {
        volume = volume * region.extent_at(t, d).length();
    }
    volume
}

/// Containment with slack for re-anchored float bounds.
///
/// Page bounds are repeatedly re-anchored to earlier reference times as
/// unions accumulate; each re-anchoring rounds, so exact comparison would
/// flag structurally sound pages.
fn covers_with_slack<F: AxisValue>(outer: &SpaceExtent<F>, inner: &SpaceExtent<F>) -> bool {
    let magnitude = outer.start().value().abs()
        + outer.end().value().abs()
        + inner.start().value().abs()
        + inner.end().value().abs();
    let factor: F = NumCast::from(64.0).expect("small constant fits any float");
    let slack = (F::one() + magnitude) * F::epsilon() * factor;
    outer.start().value() <= inner.start().value() + slack
        && inner.end().value() <= outer.end().value() + slack
}

impl<F: AxisValue, S: PageStore<Node<F>>> TrajectoryIndex<F> for PagedIndex<F, S> {
    fn insert(&mut self, payload: Option<Vec<u8>>, region: MovingRegion2<F>, id: ObjectId) {
        let entry = Entry {
            id,
            region,
            payload,
        };
        let probe = region.reference_time() + self.config.horizon;

        let mut best: Option<(usize, F)> = None;
        for slot in 0..self.pages.len() {
            let pid = self.pages[slot];
            let node = self.load_page(pid);
            if node.entries.len() >= self.config.node_capacity {
                continue;
            }
            let before = volume_at(&node.bound, probe);
            let after = volume_at(&node.bound.union_hull(&region), probe);
            let growth = after - before;
            if best.is_none_or(|(_, g)| growth < g) {
                best = Some((slot, growth));
            }
        }

        match best {
            Some((slot, _)) => {
                let pid = self.pages[slot];
                let mut node = self.load_page(pid);
                node.bound = node.bound.union_hull(&region);
                node.entries.push(entry);
                self.store_page(pid, node);
            }
            None => {
                let pid = self.store.allocate();
                self.store_page(pid, Node::seeded(entry));
                self.pages.push(pid);
            }
        }
        self.entries += 1;
    }

    fn delete(&mut self, region: &MovingRegion2<F>, id: ObjectId) -> bool {
        for slot in 0..self.pages.len() {
            let pid = self.pages[slot];
            let mut node = self.load_page(pid);
            let Some(pos) = node
                .entries
                .iter()
                .position(|e| e.id == id && e.region.matches_shape(region))
            else {
                continue;
            };

            node.entries.swap_remove(pos);
            self.entries -= 1;
            if node.entries.is_empty() {
                self.store.remove(pid);
                self.pages.swap_remove(slot);
            } else {
                // The bound stays as-is; it remains conservative.
                self.store_page(pid, node);
            }
            return true;
        }
        false
    }

    fn intersects_with(&mut self, query: &MovingRegion2<F>, visitor: &mut dyn QueryVisitor) {
        for slot in 0..self.pages.len() {
            let pid = self.pages[slot];
            let node = self.load_page(pid);
            if node.bound.overlap_window(query).is_none() {
                continue;
            }
            for entry in &node.entries {
                if entry.region.overlap_window(query).is_some() {
                    visitor.visit(entry.id);
                }
            }
        }
    }

    fn validate(&mut self) -> bool {
        let mut total = 0;
        for slot in 0..self.pages.len() {
            let pid = self.pages[slot];
            let node = self.load_page(pid);

            if node.entries.is_empty() {
                warn!(page = pid, "structural check failed: empty page");
                return false;
            }
            if node.entries.len() > self.config.node_capacity {
                warn!(
                    page = pid,
                    entries = node.entries.len(),
                    capacity = self.config.node_capacity,
                    "structural check failed: page over capacity"
                );
                return false;
            }

            for entry in &node.entries {
                let t = entry.region.reference_time();
                for d in 0..entry.region.dimensions() {
                    if !covers_with_slack(&node.bound.extent_at(t, d), entry.region.extent(d)) {
                        warn!(page = pid, id = %entry.id, dim = d,
                            "structural check failed: entry extent outside page bound");
                        return false;
                    }
                    if !node
                        .bound
                        .velocity(d)
                        .contains_interval(entry.region.velocity(d))
                    {
                        warn!(page = pid, id = %entry.id, dim = d,
                            "structural check failed: entry velocity outside page band");
                        return false;
                    }
                }
                if !node
                    .bound
                    .valid()
                    .ordered()
                    .contains_interval(&entry.region.valid().ordered())
                {
                    warn!(page = pid, id = %entry.id,
                        "structural check failed: entry validity outside page window");
                    return false;
                }
            }
            total += node.entries.len();
        }

        if total != self.entries {
            warn!(
                counted = total,
                tracked = self.entries,
                "structural check failed: entry count drift"
            );
            return false;
        }
        true
    }
}
