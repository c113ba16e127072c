use std::fmt;

use itertools::Itertools;
use subiso_common::VertexId;

use crate::search::SearchOutcome;

/// One complete mapping from query vertices to data vertices.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Embedding {
    /// Data vertex per query vertex.
    mapping: Vec<VertexId>,
}

impl Embedding {
    /// Wraps a mapping indexed by query vertex.
    #[must_use]
    pub const fn new(mapping: Vec<VertexId>) -> Self {
        Self { mapping }
    }

    /// Data vertex assigned to query vertex `q`.
    #[must_use]
    pub fn get(&self, q: VertexId) -> VertexId {
        self.mapping[q.as_usize()]
    }

    /// Number of mapped query vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    /// True for the empty mapping.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    /// Data vertices in query-vertex order.
    #[must_use]
    pub fn as_slice(&self) -> &[VertexId] {
        &self.mapping
    }

    /// `(query vertex, data vertex)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.mapping
            .iter()
            .enumerate()
            .map(|(q, &d)| (VertexId::from(q), d))
    }

    /// Sorted, unique data vertices covered by this embedding.
    #[must_use]
    pub fn signature(&self) -> Vec<VertexId> {
        let mut sig = self.mapping.clone();
        sig.sort_unstable();
        sig.dedup();
        sig
    }

    pub(crate) fn mapping_mut(&mut self) -> &mut Vec<VertexId> {
        &mut self.mapping
    }
}

impl fmt::Display for Embedding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mapping.iter().join(" "))
    }
}

/// Embeddings collected by one search.
#[derive(Clone, Debug)]
pub struct EmbeddingSet {
    /// Embeddings in discovery order.
    pub items: Vec<Embedding>,
    /// How the search ended.
    pub outcome: SearchOutcome,
}

impl EmbeddingSet {
    /// Returns true if no embedding was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the count of found embeddings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the search stopped at the embedding cap.
    #[must_use]
    pub const fn hit_limit(&self) -> bool {
        self.outcome.hit_limit()
    }
}
