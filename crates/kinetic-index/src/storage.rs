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

//! Page storage behind the engine.
//!
//! The engine never touches its pages directly; it goes through a
//! [`PageStore`], normally a bounded [`EvictionBuffer`] in front of a
//! [`MemoryStore`]. Pages move by value: a `load` hands out a copy and a
//! `store` writes one back, which is what keeps a cache layer honest.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

/// Identifies a page within one store.
pub type PageId = u64;

/// Copy-in/copy-out page storage.
pub trait PageStore<N: Clone> {
    /// Reserves a fresh page id. The page exists once stored.
    fn allocate(&mut self) -> PageId;

    /// Copies a page out, or `None` if the id was never stored or was
    /// removed.
    fn load(&mut self, id: PageId) -> Option<N>;

    /// Writes a page, replacing any previous content.
    fn store(&mut self, id: PageId, page: N);

    /// Drops a page.
    fn remove(&mut self, id: PageId);

    /// Number of pages currently stored.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Plain in-memory page storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore<N> {
    pages: HashMap<PageId, N>,
    next: PageId,
}

impl<N> MemoryStore<N> {
    #[inline]
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            next: 0,
        }
    }
}

impl<N: Clone> PageStore<N> for MemoryStore<N> {
    #[inline]
    fn allocate(&mut self) -> PageId {
        let id = self.next;
        self.next += 1;
        id
    }

    #[inline]
    fn load(&mut self, id: PageId) -> Option<N> {
        self.pages.get(&id).cloned()
    }

    #[inline]
    fn store(&mut self, id: PageId, page: N) {
        self.pages.insert(id, page);
    }

    #[inline]
    fn remove(&mut self, id: PageId) {
        self.pages.remove(&id);
    }

    #[inline]
    fn len(&self) -> usize {
        self.pages.len()
    }
}

/// A bounded cache in front of a page store, with a random eviction policy
/// and a monotonically increasing hit counter.
///
/// Writes go through to the backing store immediately; the cache only
/// saves repeated loads. When a load or write would push the cache past
/// its capacity, a randomly chosen resident page is discarded. The hit
/// counter counts loads served from the cache and never decreases.
#[derive(Debug, Clone)]
pub struct EvictionBuffer<N, S> {
    backing: S,
    cache: HashMap<PageId, N>,
    capacity: usize,
    hits: u64,
    rng: ChaCha8Rng,
}

impl<N: Clone, S: PageStore<N>> EvictionBuffer<N, S> {
    /// Wraps `backing` with a cache of at most `capacity` pages.
    pub fn new(backing: S, capacity: usize) -> Self {
        Self {
            backing,
            cache: HashMap::with_capacity(capacity),
            capacity: capacity.max(1),
            hits: 0,
            rng: ChaCha8Rng::seed_from_u64(0),
        }
    }

    /// Loads served from the cache so far.
    #[inline]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Pages currently resident in the cache.
    #[inline]
    pub fn resident(&self) -> usize {
        self.cache.len()
    }

    fn admit(&mut self, id: PageId, page: N) {
        if !self.cache.contains_key(&id) && self.cache.len() >= self.capacity {
            let victim = *self
                .cache
                .keys()
                .nth(self.rng.random_range(0..self.cache.len()))
                .expect("cache is non-empty when over capacity");
            self.cache.remove(&victim);
        }
        self.cache.insert(id, page);
    }
}

impl<N: Clone, S: PageStore<N>> PageStore<N> for EvictionBuffer<N, S> {
    #[inline]
    fn allocate(&mut self) -> PageId {
        self.backing.allocate()
    }

    fn load(&mut self, id: PageId) -> Option<N> {
        if let Some(page) = self.cache.get(&id) {
            self.hits += 1;
            return Some(page.clone());
        }
        let page = self.backing.load(id)?;
        self.admit(id, page.clone());
        Some(page)
    }

    fn store(&mut self, id: PageId, page: N) {
        self.backing.store(id, page.clone());
        self.admit(id, page);
    }

    fn remove(&mut self, id: PageId) {
        self.cache.remove(&id);
        self.backing.remove(id);
    }

    #[inline]
    fn len(&self) -> usize {
        self.backing.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        let a = store.allocate();
        let b = store.allocate();
        assert_ne!(a, b);
        store.store(a, 10u32);
        store.store(b, 20u32);
        assert_eq!(store.load(a), Some(10));
        assert_eq!(store.load(b), Some(20));
        assert_eq!(store.len(), 2);
        store.remove(a);
        assert_eq!(store.load(a), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_buffer_hit_counter_counts_cached_loads() {
        let mut buf = EvictionBuffer::new(MemoryStore::new(), 4);
        let a = buf.allocate();
        buf.store(a, 1u32);
        assert_eq!(buf.hits(), 0);
        assert_eq!(buf.load(a), Some(1));
        assert_eq!(buf.load(a), Some(1));
        assert_eq!(buf.hits(), 2);
    }

    #[test]
    fn test_buffer_miss_populates_cache() {
        let mut backing = MemoryStore::new();
        let a = backing.allocate();
        backing.store(a, 7u32);
        let mut buf = EvictionBuffer::new(backing, 4);
        assert_eq!(buf.load(a), Some(7)); // miss
        assert_eq!(buf.hits(), 0);
        assert_eq!(buf.load(a), Some(7)); // hit
        assert_eq!(buf.hits(), 1);
    }

    #[test]
    fn test_buffer_never_exceeds_capacity() {
        let mut buf = EvictionBuffer::new(MemoryStore::new(), 3);
        for value in 0..10u32 {
            let id = buf.allocate();
            buf.store(id, value);
            assert!(buf.resident() <= 3);
        }
        assert_eq!(buf.len(), 10); // backing keeps everything
    }

    #[test]
    fn test_buffer_evicted_page_still_loads_from_backing() {
        let mut buf = EvictionBuffer::new(MemoryStore::new(), 2);
        let ids: Vec<_> = (0..5u32)
            .map(|value| {
                let id = buf.allocate();
                buf.store(id, value);
                id
            })
            .collect();
        for (i, id) in ids.iter().enumerate() {
            assert_eq!(buf.load(*id), Some(i as u32));
        }
    }

    #[test]
    fn test_buffer_remove_drops_both_layers() {
        let mut buf = EvictionBuffer::new(MemoryStore::new(), 2);
        let a = buf.allocate();
        buf.store(a, 1u32);
        buf.remove(a);
        assert_eq!(buf.load(a), None);
        assert_eq!(buf.len(), 0);
    }

    #[test]
    fn test_write_through_remains_consistent_after_eviction() {
        let mut buf = EvictionBuffer::new(MemoryStore::new(), 1);
        let a = buf.allocate();
        let b = buf.allocate();
        buf.store(a, 1u32);
        buf.store(b, 2u32); // evicts a from the cache
        buf.store(a, 3u32); // must update the backing copy too
        assert_eq!(buf.load(a), Some(3));
    }
}
