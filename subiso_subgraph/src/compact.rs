//! Dense re-indexing of candidate data vertices.
//!
//! Every distinct data vertex named by any candidate list gets an index in
//! `0..N` in first-seen order (query vertex, then list position). The lists
//! are rewritten in place to hold those indices, which size and address the
//! adjacency cache and the used bitmap.

use std::collections::HashMap;
use std::fmt;

use contracts::*;
use subiso_common::{CandidateSet, VertexId};
use tracing::debug;

/// Dense index of a distinct candidate data vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompactIdx {
    inner: u32,
}

impl CompactIdx {
    /// Creates an index from a raw integer.
    #[ensures(ret.inner == id)]
    pub const fn new(id: u32) -> Self {
        Self { inner: id }
    }

    /// Returns the index as a usize for array access.
    pub const fn as_usize(self) -> usize {
        self.inner as usize
    }

    /// Reads an index back out of a compacted candidate entry.
    pub const fn decode(stored: VertexId) -> Self {
        Self {
            inner: stored.as_u32(),
        }
    }

    /// Encodes the index as a candidate entry.
    pub const fn encode(self) -> VertexId {
        VertexId::new(self.inner)
    }
}

impl fmt::Display for CompactIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.inner)
    }
}

/// Bijection between candidate data vertices and compacted indices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CandidateIndex {
    forward: HashMap<VertexId, CompactIdx>,
    reverse: Vec<VertexId>,
}

impl CandidateIndex {
    /// Rewrites `cs` in place with compacted indices and returns the maps.
    ///
    /// Must run exactly once per candidate set: entries of an already
    /// compacted set are read as data vertices and remapped again.
    #[debug_ensures(ret.is_consistent())]
    pub fn compact<C: CandidateSet>(cs: &mut C) -> Self {
        let mut index = Self::default();

        for q in (0..cs.query_vertex_count()).map(VertexId::from) {
            for pos in 0..cs.size(q) {
                let v = cs.get(q, pos);
                let next = index.reverse.len();
                let idx = *index.forward.entry(v).or_insert_with(|| {
                    index.reverse.push(v);
                    CompactIdx::from(next)
                });
                cs.set(q, pos, idx.encode());
            }
        }

        debug!(
            "Compacted candidate sets to {} distinct data vertices",
            index.len()
        );
        index
    }

    /// Compacted index of data vertex `v`.
    #[must_use]
    pub fn forward(&self, v: VertexId) -> Option<CompactIdx> {
        self.forward.get(&v).copied()
    }

    /// Data vertex behind compacted index `c`.
    #[must_use]
    pub fn reverse(&self, c: CompactIdx) -> VertexId {
        self.reverse[c.as_usize()]
    }

    /// Number of distinct candidate data vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reverse.len()
    }

    /// True if no candidate was seen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reverse.is_empty()
    }

    /// `(compacted index, data vertex)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (CompactIdx, VertexId)> + '_ {
        self.reverse
            .iter()
            .enumerate()
            .map(|(i, &v)| (CompactIdx::from(i), v))
    }

    /// Checks that both maps describe the same bijection.
    pub fn is_consistent(&self) -> bool {
        self.forward.len() == self.reverse.len()
            && self
                .iter()
                .all(|(c, v)| self.forward.get(&v) == Some(&c))
    }
}

impl From<usize> for CompactIdx {
    #[inline]
    fn from(id: usize) -> Self {
        debug_assert!(u32::try_from(id).is_ok(), "compacted index {id} exceeds u32");
        Self { inner: id as u32 }
    }
}
