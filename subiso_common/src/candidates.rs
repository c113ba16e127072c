//! Candidate sets: the data vertices admissible for each query vertex.

use contracts::*;

use crate::{Graph, VertexId};

/// Per-query-vertex candidate lists.
///
/// `set` exists for the matcher's index compaction, which rewrites every
/// entry in place exactly once before the search starts.
pub trait CandidateSet {
    /// Number of query vertices covered.
    fn query_vertex_count(&self) -> usize;

    /// Number of candidates of `q`.
    fn size(&self, q: VertexId) -> usize;

    /// Candidate of `q` at `pos`.
    fn get(&self, q: VertexId, pos: usize) -> VertexId;

    /// Overwrites the candidate of `q` at `pos`.
    fn set(&mut self, q: VertexId, pos: usize, value: VertexId);
}

/// Candidate set backed by one vector per query vertex.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VecCandidateSet {
    lists: Vec<Vec<VertexId>>,
}

impl VecCandidateSet {
    /// Wraps explicit candidate lists, indexed by query vertex.
    #[must_use]
    pub const fn new(lists: Vec<Vec<VertexId>>) -> Self {
        Self { lists }
    }

    /// Builds candidate lists from raw integers.
    #[must_use]
    pub fn from_raw(lists: &[&[u32]]) -> Self {
        Self::new(
            lists
                .iter()
                .map(|l| l.iter().copied().map(VertexId::new).collect())
                .collect(),
        )
    }

    /// Admits every data vertex carrying the query vertex's label.
    #[debug_ensures(ret.query_vertex_count() == query.vertex_count())]
    pub fn by_label<Q: Graph, D: Graph>(query: &Q, data: &D) -> Self {
        Self::filtered(query, data, |q, d| data.label(d) == query.label(q))
    }

    /// Admits every data vertex with the query vertex's label and at least
    /// its degree, in data-vertex order.
    #[debug_ensures(ret.query_vertex_count() == query.vertex_count())]
    pub fn by_label_and_degree<Q: Graph, D: Graph>(query: &Q, data: &D) -> Self {
        Self::filtered(query, data, |q, d| {
            data.label(d) == query.label(q) && data.degree(d) >= query.degree(q)
        })
    }

    fn filtered<Q: Graph, D: Graph>(
        query: &Q,
        data: &D,
        admit: impl Fn(VertexId, VertexId) -> bool,
    ) -> Self {
        let lists = (0..query.vertex_count())
            .map(VertexId::from)
            .map(|q| {
                (0..data.vertex_count())
                    .map(VertexId::from)
                    .filter(|&d| admit(q, d))
                    .collect()
            })
            .collect();
        Self { lists }
    }

    /// Candidate list of `q`.
    #[must_use]
    pub fn list(&self, q: VertexId) -> &[VertexId] {
        &self.lists[q.as_usize()]
    }

    /// All candidate lists.
    #[must_use]
    pub fn lists(&self) -> &[Vec<VertexId>] {
        &self.lists
    }

    /// Total number of entries across every list.
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.lists.iter().map(Vec::len).sum()
    }

    /// Whether `d` is listed as a candidate of `q`.
    #[must_use]
    pub fn contains(&self, q: VertexId, d: VertexId) -> bool {
        self.lists
            .get(q.as_usize())
            .is_some_and(|l| l.contains(&d))
    }
}

impl CandidateSet for VecCandidateSet {
    fn query_vertex_count(&self) -> usize {
        self.lists.len()
    }

    fn size(&self, q: VertexId) -> usize {
        self.lists[q.as_usize()].len()
    }

    fn get(&self, q: VertexId, pos: usize) -> VertexId {
        self.lists[q.as_usize()][pos]
    }

    fn set(&mut self, q: VertexId, pos: usize, value: VertexId) {
        self.lists[q.as_usize()][pos] = value;
    }
}
