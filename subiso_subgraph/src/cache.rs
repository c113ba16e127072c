//! Memoized adjacency tests between compacted candidates.

use subiso_common::Graph;

use crate::compact::{CandidateIndex, CompactIdx};
use crate::error::MatchError;

/// State of one cached pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
enum CacheCell {
    #[default]
    Unknown,
    Adjacent,
    NotAdjacent,
}

/// Lookup counters of an [`AdjacencyCache`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Tests answered from the table.
    pub hits: u64,
    /// Tests that queried the data graph.
    pub misses: u64,
}

/// Square table of adjacency results, indexed by compacted candidate pairs.
///
/// The pair `(i, j)` is always stored and read at `min * side + max`, so a
/// pair is resolved against the data graph at most once whichever argument
/// order the caller uses.
#[derive(Clone, Debug)]
pub struct AdjacencyCache {
    side: usize,
    cells: Vec<CacheCell>,
    stats: CacheStats,
}

impl AdjacencyCache {
    /// Allocates an all-unknown table for `side` compacted candidates.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::CacheTooLarge`] if `side * side` cells cannot be
    /// allocated.
    pub fn new(side: usize) -> Result<Self, MatchError> {
        let len = side
            .checked_mul(side)
            .ok_or(MatchError::CacheTooLarge { side })?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| MatchError::CacheTooLarge { side })?;
        cells.resize(len, CacheCell::Unknown);

        Ok(Self {
            side,
            cells,
            stats: CacheStats::default(),
        })
    }

    /// Number of compacted candidates the table covers.
    #[must_use]
    pub const fn side(&self) -> usize {
        self.side
    }

    #[inline]
    const fn cell(&self, i: CompactIdx, j: CompactIdx) -> usize {
        let (lo, hi) = if i.as_usize() <= j.as_usize() {
            (i.as_usize(), j.as_usize())
        } else {
            (j.as_usize(), i.as_usize())
        };
        lo * self.side + hi
    }

    /// Whether the data vertices behind `i` and `j` are adjacent.
    pub fn test<G: Graph>(
        &mut self,
        data: &G,
        index: &CandidateIndex,
        i: CompactIdx,
        j: CompactIdx,
    ) -> bool {
        let cell = self.cell(i, j);
        match self.cells[cell] {
            CacheCell::Adjacent => {
                self.stats.hits += 1;
                true
            }
            CacheCell::NotAdjacent => {
                self.stats.hits += 1;
                false
            }
            CacheCell::Unknown => {
                self.stats.misses += 1;
                let adjacent = data.is_neighbor(index.reverse(i), index.reverse(j));
                self.cells[cell] = if adjacent {
                    CacheCell::Adjacent
                } else {
                    CacheCell::NotAdjacent
                };
                adjacent
            }
        }
    }

    /// Cached result for the pair without touching the data graph.
    #[must_use]
    pub fn peek(&self, i: CompactIdx, j: CompactIdx) -> Option<bool> {
        match self.cells[self.cell(i, j)] {
            CacheCell::Unknown => None,
            CacheCell::Adjacent => Some(true),
            CacheCell::NotAdjacent => Some(false),
        }
    }

    /// Lookup counters so far.
    #[must_use]
    pub const fn stats(&self) -> CacheStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::ops::Range;
    use subiso_common::{CsrGraph, VecCandidateSet, VertexId};

    /// Counts adjacency queries reaching the wrapped graph.
    struct Counting<'g> {
        inner: &'g CsrGraph,
        calls: Cell<usize>,
    }

    impl Graph for Counting<'_> {
        fn vertex_count(&self) -> usize {
            self.inner.vertex_count()
        }
        fn neighbor_range(&self, v: VertexId) -> Range<usize> {
            self.inner.neighbor_range(v)
        }
        fn neighbor_at(&self, i: usize) -> VertexId {
            self.inner.neighbor_at(i)
        }
        fn is_neighbor(&self, u: VertexId, v: VertexId) -> bool {
            self.calls.set(self.calls.get() + 1);
            self.inner.is_neighbor(u, v)
        }
    }

    #[test]
    fn test_each_pair_resolved_once() {
        let g = CsrGraph::unlabeled(3, &[(0, 1)]);
        let data = Counting {
            inner: &g,
            calls: Cell::new(0),
        };
        let mut cs = VecCandidateSet::from_raw(&[&[0, 1, 2]]);
        let index = CandidateIndex::compact(&mut cs);
        let mut cache = AdjacencyCache::new(index.len()).expect("small cache");

        let (a, b, c) = (CompactIdx::new(0), CompactIdx::new(1), CompactIdx::new(2));
        assert_eq!(cache.peek(a, b), None);
        assert!(cache.test(&data, &index, a, b));
        assert!(cache.test(&data, &index, b, a));
        assert!(!cache.test(&data, &index, c, a));
        assert!(!cache.test(&data, &index, a, c));

        assert_eq!(data.calls.get(), 2);
        assert_eq!(cache.peek(b, a), Some(true));
        assert_eq!(cache.stats(), CacheStats { hits: 2, misses: 2 });
    }

    #[test]
    fn test_empty_cache() {
        let cache = AdjacencyCache::new(0).expect("empty cache");
        assert_eq!(cache.side(), 0);
    }

    #[test]
    fn test_overflowing_side_is_rejected() {
        assert!(matches!(
            AdjacencyCache::new(usize::MAX),
            Err(MatchError::CacheTooLarge { .. })
        ));
    }
}
