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

/// A snapshot of the engine's internal structure, taken for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    pages: usize,
    entries: usize,
    page_capacity: usize,
    page_reads: u64,
    page_writes: u64,
}

impl IndexStats {
    #[inline]
    pub fn new(
        pages: usize,
        entries: usize,
        page_capacity: usize,
        page_reads: u64,
        page_writes: u64,
    ) -> Self {
        Self {
            pages,
            entries,
            page_capacity,
            page_reads,
            page_writes,
        }
    }

    #[inline]
    pub fn pages(&self) -> usize {
        self.pages
    }

    #[inline]
    pub fn entries(&self) -> usize {
        self.entries
    }

    #[inline]
    pub fn page_capacity(&self) -> usize {
        self.page_capacity
    }

    #[inline]
    pub fn page_reads(&self) -> u64 {
        self.page_reads
    }

    #[inline]
    pub fn page_writes(&self) -> u64 {
        self.page_writes
    }
}

impl Display for IndexStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Paged trajectory index")?;
        writeln!(f, "  pages: {}", self.pages)?;
        writeln!(f, "  entries: {}", self.entries)?;
        writeln!(f, "  page capacity: {}", self.page_capacity)?;
        writeln!(f, "  page reads: {}", self.page_reads)?;
        write!(f, "  page writes: {}", self.page_writes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_lists_all_counters() {
        let s = IndexStats::new(2, 17, 16, 40, 21);
        let text = format!("{}", s);
        assert!(text.contains("pages: 2"));
        assert!(text.contains("entries: 17"));
        assert!(text.contains("page capacity: 16"));
        assert!(text.contains("page reads: 40"));
        assert!(text.contains("page writes: 21"));
    }
}
